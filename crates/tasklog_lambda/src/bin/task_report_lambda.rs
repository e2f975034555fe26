use std::collections::HashMap;

use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tasklog_lambda::adapters::log_store::{CreateGroupOutcome, LogStore};
use tasklog_lambda::adapters::task_invoke::TaskInvoker;
use tasklog_lambda::handlers::report::{handle_task_report, ReportHandlerConfig};
use tasklog_lambda::runtime::contract::{
    standard_task_table, TaskReportResponse, TASK1_NAME, TASK2_NAME,
};

struct CloudWatchLogStore {
    logs_client: aws_sdk_cloudwatchlogs::Client,
}

impl LogStore for CloudWatchLogStore {
    fn create_log_group(&self, log_group: &str) -> Result<CreateGroupOutcome, String> {
        let group = log_group.to_string();
        let client = self.logs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                match client.create_log_group().log_group_name(group).send().await {
                    Ok(_) => Ok(CreateGroupOutcome::Created),
                    Err(error) => {
                        let service_error = error.into_service_error();
                        if service_error.is_resource_already_exists_exception() {
                            Ok(CreateGroupOutcome::AlreadyExists)
                        } else {
                            Err(format!("failed to create log group: {service_error}"))
                        }
                    }
                }
            })
        })
    }

    fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), String> {
        let group = log_group.to_string();
        let stream = log_stream.to_string();
        let client = self.logs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .create_log_stream()
                    .log_group_name(group)
                    .log_stream_name(stream)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to create log stream: {error}"))
            })
        })
    }

    fn upload_sequence_token(
        &self,
        log_group: &str,
        log_stream_prefix: &str,
    ) -> Result<Option<String>, String> {
        let group = log_group.to_string();
        let prefix = log_stream_prefix.to_string();
        let client = self.logs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_log_streams()
                    .log_group_name(group)
                    .log_stream_name_prefix(prefix)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe log streams: {error}"))?;

                Ok(output
                    .log_streams()
                    .first()
                    .and_then(|stream| stream.upload_sequence_token())
                    .map(str::to_string))
            })
        })
    }

    fn put_log_event(
        &self,
        log_group: &str,
        log_stream: &str,
        timestamp_ms: i64,
        message: &str,
        sequence_token: Option<&str>,
    ) -> Result<(), String> {
        let group = log_group.to_string();
        let stream = log_stream.to_string();
        let token = sequence_token.map(str::to_string);
        let event = InputLogEvent::builder()
            .timestamp(timestamp_ms)
            .message(message)
            .build()
            .map_err(|error| format!("invalid log event: {error}"))?;
        let client = self.logs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_log_events()
                    .log_group_name(group)
                    .log_stream_name(stream)
                    .log_events(event)
                    .set_sequence_token(token)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put log events: {error}"))
            })
        })
    }
}

struct LambdaTaskInvoker {
    lambda_client: aws_sdk_lambda::Client,
    task_functions: HashMap<String, String>,
}

impl TaskInvoker for LambdaTaskInvoker {
    fn invoke_task(&self, task_name: &str) -> Result<Value, String> {
        let function_name = self
            .task_functions
            .get(task_name)
            .ok_or_else(|| format!("no function configured for task '{task_name}'"))?
            .clone();
        let client = self.lambda_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .invoke()
                    .function_name(function_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to invoke task function: {error}"))?;

                if let Some(function_error) = output.function_error() {
                    return Err(format!(
                        "task function returned an error: {function_error}"
                    ));
                }

                match output.payload() {
                    Some(payload) => serde_json::from_slice(payload.as_ref()).map_err(|error| {
                        format!("task function returned a non-JSON payload: {error}")
                    }),
                    None => Ok(Value::Null),
                }
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<TaskReportResponse, Error> {
    let task1_function = std::env::var("TASK1_FUNCTION")
        .map_err(|_| Error::from("TASK1_FUNCTION must be configured"))?;
    let task2_function = std::env::var("TASK2_FUNCTION")
        .map_err(|_| Error::from("TASK2_FUNCTION must be configured"))?;
    let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let config = ReportHandlerConfig {
        region,
        request_id: event.context.request_id.clone(),
        invoked_at_seconds: chrono::Utc::now().timestamp(),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let log_store = CloudWatchLogStore {
        logs_client: aws_sdk_cloudwatchlogs::Client::new(&aws_config),
    };
    let invoker = LambdaTaskInvoker {
        lambda_client: aws_sdk_lambda::Client::new(&aws_config),
        task_functions: HashMap::from([
            (TASK1_NAME.to_string(), task1_function),
            (TASK2_NAME.to_string(), task2_function),
        ]),
    };

    handle_task_report(&standard_task_table(), &config, &log_store, &invoker)
        .map_err(|error| Error::from(error.message))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
