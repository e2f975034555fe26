use chrono::Utc;
use serde_json::json;

use crate::adapters::log_store::{CreateGroupOutcome, LogStore};
use crate::adapters::task_invoke::TaskInvoker;
use crate::runtime::console_url::log_stream_url;
use crate::runtime::contract::{
    report_body, success_response, TaskOutcome, TaskReportResponse, TaskSpec,
};
use crate::runtime::naming::{log_stream_name, result_message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandlerConfig {
    pub region: String,
    pub request_id: String,
    pub invoked_at_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandlerError {
    pub message: String,
}

impl ReportHandlerError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Runs every task in the table through the full report path: provision all
/// streams, invoke all tasks, record all results, then assemble the response.
/// Any step's failure aborts the invocation; streams already created remain.
pub fn handle_task_report(
    tasks: &[TaskSpec],
    config: &ReportHandlerConfig,
    log_store: &impl LogStore,
    invoker: &impl TaskInvoker,
) -> Result<TaskReportResponse, ReportHandlerError> {
    match run_report(tasks, config, log_store, invoker) {
        Ok(response) => {
            log_report_info(
                "report_completed",
                json!({
                    "request_id": config.request_id.clone(),
                    "task_count": tasks.len(),
                }),
            );
            Ok(response)
        }
        Err(error) => {
            log_report_error(
                "report_failed",
                json!({
                    "request_id": config.request_id.clone(),
                    "error": error.message.clone(),
                }),
            );
            Err(error)
        }
    }
}

fn run_report(
    tasks: &[TaskSpec],
    config: &ReportHandlerConfig,
    log_store: &impl LogStore,
    invoker: &impl TaskInvoker,
) -> Result<TaskReportResponse, ReportHandlerError> {
    if config.request_id.trim().is_empty() {
        return Err(ReportHandlerError::new("request id cannot be empty"));
    }

    log_report_info(
        "report_started",
        json!({
            "request_id": config.request_id.clone(),
            "task_count": tasks.len(),
        }),
    );

    let mut streams = Vec::with_capacity(tasks.len());
    for task in tasks {
        let group_outcome = log_store
            .create_log_group(&task.log_group)
            .map_err(ReportHandlerError::new)?;
        let stream = log_stream_name(&config.request_id, config.invoked_at_seconds);
        log_store
            .create_log_stream(&task.log_group, &stream)
            .map_err(ReportHandlerError::new)?;
        log_report_info(
            "log_stream_provisioned",
            json!({
                "task": task.name.clone(),
                "log_group": task.log_group.clone(),
                "log_stream": stream.clone(),
                "group_already_existed": group_outcome == CreateGroupOutcome::AlreadyExists,
            }),
        );
        streams.push(stream);
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let result = invoker
            .invoke_task(&task.name)
            .map_err(ReportHandlerError::new)?;
        log_report_info("task_invoked", json!({ "task": task.name.clone() }));
        results.push(result);
    }

    for ((task, stream), result) in tasks.iter().zip(&streams).zip(&results) {
        // Each stream is owned by this invocation and written exactly once,
        // so the token fetched here cannot race another writer.
        let token = log_store
            .upload_sequence_token(&task.log_group, stream)
            .map_err(ReportHandlerError::new)?;
        let message = result_message(&task.name, result);
        log_store
            .put_log_event(
                &task.log_group,
                stream,
                Utc::now().timestamp_millis(),
                &message,
                token.as_deref(),
            )
            .map_err(ReportHandlerError::new)?;
        log_report_info(
            "result_logged",
            json!({
                "task": task.name.clone(),
                "log_stream": stream.clone(),
                "used_sequence_token": token.is_some(),
            }),
        );
    }

    let outcomes: Vec<TaskOutcome> = tasks
        .iter()
        .zip(&streams)
        .zip(&results)
        .map(|((task, stream), result)| TaskOutcome {
            task_name: task.name.clone(),
            log_url: log_stream_url(&config.region, &task.log_group, stream),
            result: result.clone(),
        })
        .collect();

    Ok(success_response(200, &report_body(&outcomes)))
}

fn log_report_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "report_handler",
            "event": event,
            "timestamp": Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_report_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "report_handler",
            "level": "error",
            "event": event,
            "timestamp": Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
