//! Entity content for the active board, as last received from the service.

use crate::order::OrderedCollection;
use std::collections::HashMap;
use taskboard_domain::{BoardSnapshot, Column, ColumnId, Task};

/// Columns and tasks by id. Cached lists are kept in display order so that
/// re-deriving the [`OrderedCollection`] from them reproduces the current
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCache {
    columns: Vec<Column>,
    tasks: HashMap<ColumnId, Vec<Task>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and take the snapshot's content. A repeated column id
    /// keeps only its first occurrence.
    pub fn replace(&mut self, snapshot: BoardSnapshot) {
        let BoardSnapshot {
            columns,
            mut tasks_by_column,
            ..
        } = snapshot;

        self.tasks.clear();
        self.columns.clear();
        for column in columns {
            if self.tasks.contains_key(&column.id) {
                tracing::warn!(column_id = %column.id, "Skipping duplicate column");
                continue;
            }
            let mut list = tasks_by_column.remove(&column.id).unwrap_or_default();
            for task in &mut list {
                task.column_id = column.id.clone();
            }
            self.tasks.insert(column.id.clone(), list);
            self.columns.push(column);
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tasks_by_column(&self) -> &HashMap<ColumnId, Vec<Task>> {
        &self.tasks
    }

    pub fn tasks_in(&self, column_id: &str) -> &[Task] {
        self.tasks.get(column_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.values().flatten().find(|t| t.id == task_id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    /// Replace a column in place, or append it.
    pub fn upsert_column(&mut self, column: Column) {
        self.tasks.entry(column.id.clone()).or_default();
        match self.columns.iter_mut().find(|c| c.id == column.id) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Remove a column along with its tasks.
    pub fn remove_column(&mut self, column_id: &str) -> Option<Column> {
        let index = self.columns.iter().position(|c| c.id == column_id)?;
        self.tasks.remove(column_id);
        Some(self.columns.remove(index))
    }

    /// Replace a task in place when it is already in `column_id`, otherwise
    /// append it there (taking it out of any other column first).
    ///
    /// Returns `false` if the column is not cached.
    pub fn upsert_task(&mut self, column_id: &str, mut task: Task) -> bool {
        if !self.tasks.contains_key(column_id) {
            return false;
        }
        task.column_id = column_id.to_string();

        if let Some(list) = self.tasks.get_mut(column_id) {
            if let Some(existing) = list.iter_mut().find(|t| t.id == task.id) {
                *existing = task;
                return true;
            }
        }
        self.remove_task(&task.id);
        if let Some(list) = self.tasks.get_mut(column_id) {
            list.push(task);
        }
        true
    }

    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        self.tasks.values_mut().find_map(|list| {
            let index = list.iter().position(|t| t.id == task_id)?;
            Some(list.remove(index))
        })
    }

    /// Move a task record to `to_column` at `index` (clamped to the end).
    pub fn relocate_task(&mut self, task_id: &str, to_column: &str, index: usize) -> bool {
        if !self.tasks.contains_key(to_column) {
            return false;
        }
        let Some(mut task) = self.remove_task(task_id) else {
            return false;
        };
        task.column_id = to_column.to_string();
        if let Some(list) = self.tasks.get_mut(to_column) {
            let index = index.min(list.len());
            list.insert(index, task);
        }
        true
    }

    /// Take new content for a cached task without moving it.
    pub fn refresh_task(&mut self, task: Task) -> bool {
        for (column_id, list) in &mut self.tasks {
            if let Some(existing) = list.iter_mut().find(|t| t.id == task.id) {
                *existing = Task {
                    column_id: column_id.clone(),
                    ..task
                };
                return true;
            }
        }
        false
    }

    /// Re-sequence cached records so that they follow `order`.
    ///
    /// Task records follow their id into whichever column the order puts
    /// them in. Records the order does not mention stay in their own column
    /// after the ordered ones.
    pub fn align_to(&mut self, order: &OrderedCollection) {
        self.columns
            .sort_by_key(|c| order.column_index(&c.id).unwrap_or(usize::MAX));

        // Previous per-column sequences, so leftovers keep their relative order
        let mut previous: Vec<(ColumnId, Vec<String>)> = Vec::with_capacity(self.tasks.len());
        let mut pool: HashMap<String, Task> = HashMap::new();
        for column in &self.columns {
            if let Some(list) = self.tasks.remove(&column.id) {
                previous.push((column.id.clone(), list.iter().map(|t| t.id.clone()).collect()));
                pool.extend(list.into_iter().map(|task| (task.id.clone(), task)));
            }
        }
        for (column_id, list) in self.tasks.drain() {
            previous.push((column_id, list.iter().map(|t| t.id.clone()).collect()));
            pool.extend(list.into_iter().map(|task| (task.id.clone(), task)));
        }

        for column in &self.columns {
            if self.tasks.contains_key(&column.id) {
                continue;
            }
            let list: Vec<Task> = order
                .tasks_in(&column.id)
                .unwrap_or(&[])
                .iter()
                .filter_map(|task_id| pool.remove(task_id))
                .map(|mut task| {
                    task.column_id = column.id.clone();
                    task
                })
                .collect();
            self.tasks.insert(column.id.clone(), list);
        }

        for (column_id, task_ids) in previous {
            for task_id in task_ids {
                let Some(task) = pool.remove(&task_id) else {
                    continue;
                };
                match self.tasks.get_mut(&column_id) {
                    Some(list) => list.push(task),
                    None => tracing::warn!(task_id = %task.id, "Dropping task of unknown column"),
                }
            }
        }
    }

    /// Columns joined with the display order.
    pub fn columns_in_order<'a>(&'a self, order: &OrderedCollection) -> Vec<&'a Column> {
        order
            .column_order()
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }

    /// A column's tasks joined with the display order.
    pub fn tasks_in_order<'a>(&'a self, order: &OrderedCollection, column_id: &str) -> Vec<&'a Task> {
        let cached = self.tasks_in(column_id);
        order
            .tasks_in(column_id)
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| cached.iter().find(|t| &t.id == id))
            .collect()
    }
}
