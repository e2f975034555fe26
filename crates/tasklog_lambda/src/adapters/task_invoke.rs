use serde_json::Value;

pub trait TaskInvoker {
    fn invoke_task(&self, task_name: &str) -> Result<Value, String>;
}
