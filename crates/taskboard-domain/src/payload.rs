//! Request bodies for creating and editing boards, columns and tasks.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use taskboard_core::{TaskboardError, TaskboardResult};

use crate::board::DEFAULT_BOARD_ICON;
use crate::column::ColumnId;
use crate::field_update::FieldUpdate;
use crate::task::{Task, TaskPriority};

fn require_title(kind: &str, title: &str) -> TaskboardResult<()> {
    if title.trim().is_empty() {
        return Err(TaskboardError::Validation(format!(
            "{} title must not be empty",
            kind
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoard {
    pub title: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl NewBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: DEFAULT_BOARD_ICON.to_string(),
            background: None,
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        require_title("Board", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl BoardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.icon.is_none() && self.background.is_none()
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        if self.is_empty() {
            return Err(TaskboardError::Validation(
                "Board update has no fields to change".to_string(),
            ));
        }
        match &self.title {
            Some(title) => require_title("Board", title),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewColumn {
    pub title: String,
}

impl NewColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        require_title("Column", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(serialize_with = "serialize_deadline")]
    pub deadline: Option<NaiveDate>,
}

fn serialize_deadline<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    crate::task::deadline_format::serialize(value, serializer)
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::Without,
            deadline: None,
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        require_title("Task", &self.title)
    }
}

/// Edits to a task. Setting `column` reassigns the owning column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub priority: Option<TaskPriority>,
    pub deadline: FieldUpdate<NaiveDate>,
    pub column: Option<ColumnId>,
}

impl TaskUpdate {
    pub fn move_to(column: impl Into<ColumnId>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.description.is_change()
            && self.priority.is_none()
            && !self.deadline.is_change()
            && self.column.is_none()
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        if self.is_empty() {
            return Err(TaskboardError::Validation(
                "Task update has no fields to change".to_string(),
            ));
        }
        match &self.title {
            Some(title) => require_title("Task", title),
            None => Ok(()),
        }
    }

    /// Apply locally, used when the service acknowledges without a body.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        self.description.apply_to(&mut task.description);
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        self.deadline.apply_to(&mut task.deadline);
        if let Some(column) = self.column {
            task.move_to_column(column);
        }
    }
}

impl Serialize for TaskUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        match &self.description {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(description) => map.serialize_entry("description", description)?,
            FieldUpdate::Clear => map.serialize_entry("description", &None::<String>)?,
        }
        if let Some(priority) = &self.priority {
            map.serialize_entry("priority", priority)?;
        }
        match &self.deadline {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(date) => {
                map.serialize_entry("deadline", &date.format("%Y-%m-%d").to_string())?
            }
            FieldUpdate::Clear => map.serialize_entry("deadline", &None::<String>)?,
        }
        if let Some(column) = &self.column {
            map.serialize_entry("column", column)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_only_update_body() {
        let update = TaskUpdate::move_to("c2");
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "column": "c2" }));
    }

    #[test]
    fn test_clear_fields_serialize_as_null() {
        let update = TaskUpdate {
            title: Some("Renamed".to_string()),
            description: FieldUpdate::Clear,
            priority: Some(TaskPriority::Low),
            deadline: FieldUpdate::Set(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            column: None,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "title": "Renamed",
                "description": null,
                "priority": "Low",
                "deadline": "2025-02-01"
            })
        );
    }

    #[test]
    fn test_apply_to_task() {
        let mut task = Task::new("t1", "c1", "Old");
        task.description = Some("details".to_string());

        TaskUpdate {
            title: Some("New".to_string()),
            description: FieldUpdate::Clear,
            column: Some("c2".to_string()),
            ..TaskUpdate::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.title, "New");
        assert_eq!(task.description, None);
        assert_eq!(task.column_id, "c2");
    }

    #[test]
    fn test_validation() {
        assert!(NewTask::new("   ").validate().is_err());
        assert!(NewTask::new("Ship it").validate().is_ok());
        assert!(NewColumn::new("").validate().is_err());
        assert!(TaskUpdate::default().validate().is_err());
        assert!(BoardUpdate::default().validate().is_err());
        assert!(NewBoard::new("Roadmap").validate().is_ok());
    }

    #[test]
    fn test_new_task_body() {
        let mut task = NewTask::new("Write tests");
        task.priority = TaskPriority::Medium;
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({
                "title": "Write tests",
                "description": null,
                "priority": "Medium",
                "deadline": null
            })
        );
    }
}
