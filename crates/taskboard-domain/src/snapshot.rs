//! Point-in-time capture of one board's columns and tasks as fetched from
//! the service. This is the input the ordered collection is derived from.

use crate::{BoardId, Column, ColumnId, Task};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Columns in server order, and each column's tasks in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board_id: BoardId,

    #[serde(default)]
    pub columns: Vec<Column>,

    /// Columns whose task list was never fetched have no entry.
    #[serde(default)]
    pub tasks_by_column: HashMap<ColumnId, Vec<Task>>,
}

impl BoardSnapshot {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
            ..Self::default()
        }
    }

    pub fn from_data(
        board_id: impl Into<BoardId>,
        columns: Vec<Column>,
        tasks_by_column: HashMap<ColumnId, Vec<Task>>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            columns,
            tasks_by_column,
        }
    }

    /// Attach a column's fetched tasks, stamping each with its owning column.
    pub fn insert_tasks(&mut self, column_id: ColumnId, mut tasks: Vec<Task>) {
        for task in &mut tasks {
            task.column_id = column_id.clone();
        }
        self.tasks_by_column.insert(column_id, tasks);
    }

    pub fn task_count(&self) -> usize {
        self.tasks_by_column.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_tasks_stamps_column() {
        let mut snapshot = BoardSnapshot::new("b1");
        snapshot.columns.push(Column::new("c1", "b1", "Todo"));
        snapshot.insert_tasks(
            "c1".to_string(),
            vec![Task::new("t1", "", "A"), Task::new("t2", "stale", "B")],
        );

        let tasks = &snapshot.tasks_by_column["c1"];
        assert!(tasks.iter().all(|t| t.column_id == "c1"));
        assert_eq!(snapshot.task_count(), 2);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = BoardSnapshot::new("b1");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.task_count(), 0);
    }
}
