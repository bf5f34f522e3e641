//! Response envelope of the board service: every body is `{ "data": ... }`,
//! error bodies carry a `message`.

use serde::{Deserialize, Serialize};
use taskboard_core::TaskboardError;
use taskboard_domain::{Column, ColumnId, Task, TaskId};

pub const UNAUTHORIZED_MESSAGE: &str = "Please login to continue";

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// `GET /columns` answers `{ columns: [...] }`; older deployments send the
/// bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColumnList {
    Wrapped { columns: Vec<Column> },
    Bare(Vec<Column>),
}

impl ColumnList {
    pub fn into_columns(self) -> Vec<Column> {
        match self {
            Self::Wrapped { columns } | Self::Bare(columns) => columns,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct TaskBody {
    pub task: Task,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOrderBody<'a> {
    pub column_order: &'a [ColumnId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrderBody<'a> {
    pub task_order: &'a [TaskId],
}

#[derive(Debug, Serialize)]
pub struct TitleBody<'a> {
    pub title: &'a str,
}

/// Map a non-success response to an error. 401 always asks the user to log
/// in; otherwise the server's message wins over `fallback`.
pub fn error_from_response(status: u16, body: &[u8], fallback: &str) -> TaskboardError {
    if status == 401 {
        return TaskboardError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string());
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    if status == 404 {
        return TaskboardError::NotFound(message);
    }
    TaskboardError::Remote { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_ignores_body() {
        let err = error_from_response(401, br#"{"message":"jwt expired"}"#, "Failed to fetch columns");
        match err {
            TaskboardError::Unauthorized(msg) => assert_eq!(msg, UNAUTHORIZED_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_server_message_preferred() {
        let err = error_from_response(500, br#"{"message":"Database unavailable"}"#, "Failed to move task");
        match err {
            TaskboardError::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_fallback_message() {
        let err = error_from_response(502, b"<html>Bad Gateway</html>", "Failed to reorder columns");
        assert_eq!(err.to_string(), "Remote error (502): Failed to reorder columns");

        let err = error_from_response(404, b"", "Failed to update task");
        assert!(matches!(err, TaskboardError::NotFound(ref m) if m == "Failed to update task"));
    }

    #[test]
    fn test_column_list_shapes() {
        let wrapped: ApiEnvelope<ColumnList> = serde_json::from_str(
            r#"{"data":{"columns":[{"_id":"c1","board":"b1","title":"Todo"}]}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.data.into_columns().len(), 1);

        let bare: ApiEnvelope<ColumnList> =
            serde_json::from_str(r#"{"data":[{"_id":"c1","title":"Todo"}]}"#).unwrap();
        assert_eq!(bare.data.into_columns()[0].id, "c1");
    }

    #[test]
    fn test_reorder_bodies() {
        let order = vec!["c2".to_string(), "c1".to_string()];
        let body = serde_json::to_value(ColumnOrderBody { column_order: &order }).unwrap();
        assert_eq!(body, serde_json::json!({ "columnOrder": ["c2", "c1"] }));

        let body = serde_json::to_value(TaskOrderBody { task_order: &order }).unwrap();
        assert_eq!(body, serde_json::json!({ "taskOrder": ["c2", "c1"] }));
    }
}
