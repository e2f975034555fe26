/// Group creation is idempotent from the handler's perspective: an
/// already-existing group is a success, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateGroupOutcome {
    Created,
    AlreadyExists,
}

pub trait LogStore {
    fn create_log_group(&self, log_group: &str) -> Result<CreateGroupOutcome, String>;

    fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), String>;

    /// Current append-position token for the first stream matching the prefix,
    /// or `None` when the stream has no events yet (or no stream matches).
    fn upload_sequence_token(
        &self,
        log_group: &str,
        log_stream_prefix: &str,
    ) -> Result<Option<String>, String>;

    fn put_log_event(
        &self,
        log_group: &str,
        log_stream: &str,
        timestamp_ms: i64,
        message: &str,
        sequence_token: Option<&str>,
    ) -> Result<(), String>;
}
