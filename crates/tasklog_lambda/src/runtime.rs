pub use tasklog_core::console_url;
pub use tasklog_core::contract;
pub use tasklog_core::naming;
