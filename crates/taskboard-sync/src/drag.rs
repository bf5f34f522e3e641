//! Turns a finished drag gesture into the reorder it stands for.
//!
//! Resolution only reads the [`OrderedCollection`]; applying the outcome and
//! talking to the service is the coordinator's job.

use crate::order::OrderedCollection;
use serde::Serialize;
use taskboard_domain::{ColumnId, TaskId};

/// Why a drop was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DropRejection {
    /// Released outside any drop zone.
    NoTarget,
    /// The dragged id is neither a loaded column nor a loaded task.
    UnknownDragged { dragged: String },
    /// The target cannot receive the dragged item.
    InvalidTarget { dragged: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DragOutcome {
    MoveColumn {
        column_id: ColumnId,
        from: usize,
        to: usize,
    },
    ReorderTasks {
        column_id: ColumnId,
        task_id: TaskId,
        from: usize,
        to: usize,
    },
    MoveTaskAcross {
        task_id: TaskId,
        from_column: ColumnId,
        to_column: ColumnId,
        target_index: usize,
    },
    NoOp,
    Rejected(DropRejection),
}

impl DragOutcome {
    /// Whether applying this outcome changes the order.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::MoveColumn { .. } | Self::ReorderTasks { .. } | Self::MoveTaskAcross { .. }
        )
    }
}

/// Work out what dropping `dragged_id` onto `target_id` means for `order`.
///
/// A column may only be dropped onto another column. A task may be dropped
/// onto a task (taking its slot) or onto a column id (landing at the end of
/// that column).
pub fn resolve_drop(
    dragged_id: &str,
    target_id: Option<&str>,
    order: &OrderedCollection,
) -> DragOutcome {
    let Some(target_id) = target_id else {
        return DragOutcome::Rejected(DropRejection::NoTarget);
    };
    let invalid = || {
        DragOutcome::Rejected(DropRejection::InvalidTarget {
            dragged: dragged_id.to_string(),
            target: target_id.to_string(),
        })
    };

    if let Some(from) = order.column_index(dragged_id) {
        return match order.column_index(target_id) {
            Some(to) if to == from => DragOutcome::NoOp,
            Some(to) => DragOutcome::MoveColumn {
                column_id: dragged_id.to_string(),
                from,
                to,
            },
            None => invalid(),
        };
    }

    let Some((source, from)) = order.locate_task(dragged_id) else {
        return DragOutcome::Rejected(DropRejection::UnknownDragged {
            dragged: dragged_id.to_string(),
        });
    };

    let (destination, target_index) = if let Some((column, index)) = order.locate_task(target_id) {
        (column, index)
    } else if let Some(index) = order.column_index(target_id) {
        let column = &order.column_order()[index];
        let len = order.tasks_in(column).map_or(0, <[TaskId]>::len);
        // Dropping on the own column means "to the end", which is the last
        // index once the task has been taken out
        let end = if column == source { len.saturating_sub(1) } else { len };
        (column, end)
    } else {
        return invalid();
    };

    if destination == source {
        if from == target_index {
            return DragOutcome::NoOp;
        }
        return DragOutcome::ReorderTasks {
            column_id: source.clone(),
            task_id: dragged_id.to_string(),
            from,
            to: target_index,
        };
    }

    DragOutcome::MoveTaskAcross {
        task_id: dragged_id.to_string(),
        from_column: source.clone(),
        to_column: destination.clone(),
        target_index,
    }
}
