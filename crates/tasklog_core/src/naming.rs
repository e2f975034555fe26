use serde_json::Value;

/// Stream names are unique per invocation: the caller's request id plus the
/// invocation time at second granularity. Two invocations sharing a request
/// id and a second would collide; creation then fails and is not retried.
pub fn log_stream_name(request_id: &str, unix_seconds: i64) -> String {
    format!("{request_id}/{unix_seconds}")
}

/// The single message recorded for a task. String results are rendered bare,
/// anything else as compact JSON.
pub fn result_message(task_name: &str, result: &Value) -> String {
    let rendered = match result {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    format!("{} Result: {rendered}", title_case(task_name))
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_stream_name_from_request_id_and_seconds() {
        assert_eq!(
            log_stream_name("req-1", 1_700_000_000),
            "req-1/1700000000"
        );
    }

    #[test]
    fn renders_string_results_without_quotes() {
        assert_eq!(
            result_message("task1", &Value::from("ok1")),
            "Task1 Result: ok1"
        );
    }

    #[test]
    fn renders_structured_results_as_compact_json() {
        assert_eq!(
            result_message("task2", &json!({"rows": 3})),
            "Task2 Result: {\"rows\":3}"
        );
    }
}
