use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Processing => "processing",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Canceled => "canceled",
        }
    }

    /// Terminal once the task has left `Processing`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Processing)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side generation job as reported by the task endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub task_status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Kept as raw JSON, nothing here reads them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
}

impl Task {
    pub fn processing(id: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            task_status: TaskStatus::Processing,
            image_url: None,
            aspect_ratio: None,
            input_prompt: None,
            model: None,
            locale: None,
            is_private: None,
            execute_time: None,
            created_at: None,
        }
    }

    /// The image reference, if the backend has produced a non-empty one.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body of the task endpoint: `{"data": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskEnvelope {
    #[serde(default)]
    pub data: Option<Task>,
}

impl TaskEnvelope {
    pub fn status(&self) -> Option<TaskStatus> {
        self.data.as_ref().map(|task| task.task_status)
    }

    /// The task, when it carries an identifier worth displaying.
    pub fn into_task(self) -> Option<Task> {
        self.data.filter(|task| !task.id.is_empty())
    }
}

impl From<Task> for TaskEnvelope {
    fn from(task: Task) -> Self {
        TaskEnvelope { data: Some(task) }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub flux_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_from_backend_payload() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({
            "data": {
                "id": "t1",
                "taskStatus": "succeeded",
                "imageUrl": "https://x/y.png",
                "aspectRatio": "1:1",
                "userId": "user_123"
            }
        }))
        .unwrap();

        assert_eq!(envelope.status(), Some(TaskStatus::Succeeded));
        let task = envelope.into_task().unwrap();
        assert_eq!(task.image(), Some("https://x/y.png"));
        assert_eq!(task.aspect_ratio.as_deref(), Some("1:1"));
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(envelope.status(), None);
        assert!(envelope.into_task().is_none());
    }

    #[test]
    fn test_loosely_typed_extras_do_not_break_parsing() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({
            "data": {
                "id": "t1",
                "taskStatus": "processing",
                "isPrivate": true,
                "executeTime": 12.5,
                "createdAt": 1729238400000u64
            }
        }))
        .unwrap();

        let task = envelope.into_task().unwrap();
        assert_eq!(task.task_status, TaskStatus::Processing);
        assert_eq!(task.is_private, Some(json!(true)));
        assert_eq!(task.execute_time, Some(json!(12.5)));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let parsed = serde_json::from_value::<TaskEnvelope>(json!({
            "data": { "id": "t1", "taskStatus": "exploded" }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_image_url_is_not_an_image() {
        let mut task = Task::processing("t1");
        task.image_url = Some(String::new());
        assert_eq!(task.image(), None);
    }

    #[test]
    fn test_task_query_wire_shape() {
        let body = serde_json::to_value(TaskQuery {
            flux_id: "t1".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "fluxId": "t1" }));
    }
}
