//! Display order of a board: the column sequence and each column's task
//! sequence, kept apart from entity content.
//!
//! Every transition leaves the collection valid: column ids are unique and
//! every task id lives in exactly one column's sequence.

use std::collections::{HashMap, HashSet};
use taskboard_domain::{Column, ColumnId, Task, TaskId};
use thiserror::Error;

/// First invariant violation found by [`OrderedCollection::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderViolation {
    #[error("Column {0} appears more than once in the column order")]
    DuplicateColumn(ColumnId),

    #[error("Task {task} appears more than once in column {column}")]
    DuplicateTask { column: ColumnId, task: TaskId },

    #[error("Task {task} is in both column {first} and column {second}")]
    TaskInTwoColumns {
        task: TaskId,
        first: ColumnId,
        second: ColumnId,
    },

    #[error("Task sequence kept for unknown column {0}")]
    UnknownColumn(ColumnId),

    #[error("Column {0} has no task sequence")]
    MissingTaskSequence(ColumnId),

    #[error("{0} is ordered but not cached")]
    NotCached(String),

    #[error("{0} is cached but not ordered")]
    NotOrdered(String),
}

/// Names one sequence of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceKey {
    Columns,
    Tasks(ColumnId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCollection {
    column_order: Vec<ColumnId>,
    task_order: HashMap<ColumnId, Vec<TaskId>>,
}

impl OrderedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities<'a>(
        columns: impl IntoIterator<Item = &'a Column>,
        tasks_by_column: &HashMap<ColumnId, Vec<Task>>,
    ) -> Self {
        let mut order = Self::new();
        order.initialize_from_entities(columns, tasks_by_column);
        order
    }

    /// Rebuild both sequences from entity lists, replacing everything.
    ///
    /// Columns keep the order they are listed in; a column without a task
    /// list gets an empty sequence. Repeated column or task ids are dropped
    /// after their first occurrence, and task lists for columns that are
    /// not listed are ignored.
    pub fn initialize_from_entities<'a>(
        &mut self,
        columns: impl IntoIterator<Item = &'a Column>,
        tasks_by_column: &HashMap<ColumnId, Vec<Task>>,
    ) {
        self.column_order.clear();
        self.task_order.clear();

        let mut seen_tasks: HashSet<&str> = HashSet::new();
        for column in columns {
            if self.task_order.contains_key(&column.id) {
                tracing::warn!(column_id = %column.id, "Dropping duplicate column");
                continue;
            }

            let mut sequence = Vec::new();
            for task in tasks_by_column.get(&column.id).into_iter().flatten() {
                if seen_tasks.insert(task.id.as_str()) {
                    sequence.push(task.id.clone());
                } else {
                    tracing::warn!(task_id = %task.id, column_id = %column.id, "Dropping duplicate task");
                }
            }

            self.column_order.push(column.id.clone());
            self.task_order.insert(column.id.clone(), sequence);
        }
    }

    /// Move the column at `from` to `to`, shifting the columns in between.
    ///
    /// Returns `false` when nothing changed: equal indices or `from` out of
    /// range. `to` is clamped to the last index.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        shift(&mut self.column_order, from, to)
    }

    /// Same shift semantics as [`move_column`](Self::move_column), within
    /// one column's task sequence. Unknown columns are left alone.
    pub fn move_task_within_column(&mut self, column_id: &str, from: usize, to: usize) -> bool {
        match self.task_order.get_mut(column_id) {
            Some(sequence) => shift(sequence, from, to),
            None => false,
        }
    }

    /// Take `task_id` out of `from_column` and insert it into `to_column` at
    /// `target_index`, clamped to the end of the destination.
    ///
    /// Both sequences change in one step. Returns `false` without touching
    /// anything if either column is unknown or the task is not in
    /// `from_column`.
    pub fn move_task_across_columns(
        &mut self,
        task_id: &str,
        from_column: &str,
        to_column: &str,
        target_index: usize,
    ) -> bool {
        if from_column == to_column {
            let Some(from) = self.position_in(from_column, task_id) else {
                return false;
            };
            return self.move_task_within_column(from_column, from, target_index);
        }
        if !self.task_order.contains_key(to_column) {
            return false;
        }
        let Some(from) = self.position_in(from_column, task_id) else {
            return false;
        };

        let moved = match self.task_order.get_mut(from_column) {
            Some(source) => source.remove(from),
            None => return false,
        };
        if let Some(destination) = self.task_order.get_mut(to_column) {
            let index = target_index.min(destination.len());
            destination.insert(index, moved);
        }
        true
    }

    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    pub fn tasks_in(&self, column_id: &str) -> Option<&[TaskId]> {
        self.task_order.get(column_id).map(Vec::as_slice)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.column_order.iter().position(|id| id == column_id)
    }

    /// Owning column and index of a task.
    pub fn locate_task(&self, task_id: &str) -> Option<(&ColumnId, usize)> {
        self.column_order.iter().find_map(|column_id| {
            self.position_in(column_id, task_id)
                .map(|index| (column_id, index))
        })
    }

    pub fn contains_column(&self, column_id: &str) -> bool {
        self.task_order.contains_key(column_id)
    }

    pub fn task_count(&self) -> usize {
        self.task_order.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty()
    }

    /// Copy of one sequence, `None` for an unknown column.
    pub fn sequence(&self, key: &SequenceKey) -> Option<Vec<String>> {
        match key {
            SequenceKey::Columns => Some(self.column_order.clone()),
            SequenceKey::Tasks(column_id) => self.task_order.get(column_id).cloned(),
        }
    }

    /// Put back a sequence taken with [`sequence`](Self::sequence).
    ///
    /// A task sequence for a column that no longer exists is discarded. The
    /// caller restores every sequence a transition touched, so the
    /// collection is valid again once all of them are back.
    pub fn restore_sequence(&mut self, key: &SequenceKey, sequence: Vec<String>) {
        match key {
            SequenceKey::Columns => self.column_order = sequence,
            SequenceKey::Tasks(column_id) => {
                if let Some(slot) = self.task_order.get_mut(column_id) {
                    *slot = sequence;
                }
            }
        }
    }

    pub fn check_invariants(&self) -> Result<(), OrderViolation> {
        let mut columns = HashSet::new();
        for column_id in &self.column_order {
            if !columns.insert(column_id.as_str()) {
                return Err(OrderViolation::DuplicateColumn(column_id.clone()));
            }
            if !self.task_order.contains_key(column_id) {
                return Err(OrderViolation::MissingTaskSequence(column_id.clone()));
            }
        }
        if let Some(unknown) = self
            .task_order
            .keys()
            .find(|column_id| !columns.contains(column_id.as_str()))
        {
            return Err(OrderViolation::UnknownColumn(unknown.clone()));
        }

        let mut owners: HashMap<&str, &ColumnId> = HashMap::new();
        for column_id in &self.column_order {
            for task_id in &self.task_order[column_id] {
                if let Some(first) = owners.insert(task_id.as_str(), column_id) {
                    if first == column_id {
                        return Err(OrderViolation::DuplicateTask {
                            column: column_id.clone(),
                            task: task_id.clone(),
                        });
                    }
                    return Err(OrderViolation::TaskInTwoColumns {
                        task: task_id.clone(),
                        first: first.clone(),
                        second: column_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn position_in(&self, column_id: &str, task_id: &str) -> Option<usize> {
        self.task_order
            .get(column_id)?
            .iter()
            .position(|id| id == task_id)
    }
}

fn shift(sequence: &mut Vec<String>, from: usize, to: usize) -> bool {
    if from >= sequence.len() {
        return false;
    }
    let to = to.min(sequence.len() - 1);
    if from == to {
        return false;
    }
    let moved = sequence.remove(from);
    sequence.insert(to, moved);
    true
}
