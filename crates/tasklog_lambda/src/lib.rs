//! AWS-oriented adapters and handlers for task result reporting.
//!
//! This crate owns runtime integration details (the Lambda handler, task
//! invocation, and CloudWatch Logs adapters) and exposes a single runtime
//! module boundary for naming, URL, and contract primitives.

pub mod adapters;
pub mod handlers;
pub mod runtime;
