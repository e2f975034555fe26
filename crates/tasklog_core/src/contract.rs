use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const TASK1_NAME: &str = "task1";
pub const TASK2_NAME: &str = "task2";
pub const TASK1_LOG_GROUP: &str = "/custom/task1/logs";
pub const TASK2_LOG_GROUP: &str = "/custom/task2/logs";

/// Descriptor for one subordinate task: the name used in response keys and
/// the log group its results are recorded under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: String,
    pub log_group: String,
}

impl TaskSpec {
    pub fn new(
        name: impl Into<String>,
        log_group: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::new("task name cannot be empty"));
        }

        let log_group = log_group.into();
        if log_group.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "log group for task '{name}' cannot be empty"
            )));
        }

        Ok(Self { name, log_group })
    }
}

/// The fixed two-task table every invocation iterates over.
pub fn standard_task_table() -> Vec<TaskSpec> {
    vec![
        TaskSpec::new(TASK1_NAME, TASK1_LOG_GROUP)
            .expect("standard task1 descriptor should validate"),
        TaskSpec::new(TASK2_NAME, TASK2_LOG_GROUP)
            .expect("standard task2 descriptor should validate"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task_name: String,
    pub log_url: String,
    pub result: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskReportResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Body payload keyed by task name: `{name}_log_url` and `{name}_result`
/// entries for each outcome.
pub fn report_body(outcomes: &[TaskOutcome]) -> Value {
    let mut body = Map::new();
    for outcome in outcomes {
        body.insert(
            format!("{}_log_url", outcome.task_name),
            Value::String(outcome.log_url.clone()),
        );
        body.insert(
            format!("{}_result", outcome.task_name),
            outcome.result.clone(),
        );
    }
    Value::Object(body)
}

pub fn success_response(status_code: u16, payload: &Value) -> TaskReportResponse {
    TaskReportResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_spec_rejects_empty_name() {
        let error = TaskSpec::new(" ", "/custom/task1/logs").expect_err("descriptor should fail");
        assert_eq!(error.message(), "task name cannot be empty");
    }

    #[test]
    fn task_spec_rejects_empty_log_group() {
        let error = TaskSpec::new("task1", "").expect_err("descriptor should fail");
        assert_eq!(error.message(), "log group for task 'task1' cannot be empty");
    }

    #[test]
    fn standard_table_lists_both_tasks_in_order() {
        let tasks = standard_task_table();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "task1");
        assert_eq!(tasks[0].log_group, "/custom/task1/logs");
        assert_eq!(tasks[1].name, "task2");
        assert_eq!(tasks[1].log_group, "/custom/task2/logs");
    }

    #[test]
    fn report_body_keys_each_outcome_by_task_name() {
        let body = report_body(&[
            TaskOutcome {
                task_name: "task1".to_string(),
                log_url: "https://example/one".to_string(),
                result: Value::from("ok1"),
            },
            TaskOutcome {
                task_name: "task2".to_string(),
                log_url: "https://example/two".to_string(),
                result: json!({"rows": 3}),
            },
        ]);

        assert_eq!(body["task1_log_url"], Value::from("https://example/one"));
        assert_eq!(body["task1_result"], Value::from("ok1"));
        assert_eq!(body["task2_log_url"], Value::from("https://example/two"));
        assert_eq!(body["task2_result"], json!({"rows": 3}));
    }

    #[test]
    fn success_response_serializes_status_code_in_camel_case() {
        let response = success_response(200, &json!({"task1_result": "ok1"}));
        let serialized =
            serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(serialized["statusCode"], Value::from(200));
        assert!(serialized["body"]
            .as_str()
            .expect("body should be a string")
            .contains("task1_result"));
    }
}
