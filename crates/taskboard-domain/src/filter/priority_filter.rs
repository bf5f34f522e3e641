//! Priority ("label color") selection for the task view.

use super::TaskFilter;
use crate::{Task, TaskPriority};
use std::collections::HashSet;

/// Selected priorities. An empty selection shows every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityFilter {
    selected: HashSet<TaskPriority>,
}

impl PriorityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only(priorities: impl IntoIterator<Item = TaskPriority>) -> Self {
        Self {
            selected: priorities.into_iter().collect(),
        }
    }

    /// Replace the selection with a single priority.
    pub fn select(&mut self, priority: TaskPriority) {
        self.selected.clear();
        self.selected.insert(priority);
    }

    /// Show all tasks again.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_selected(&self, priority: TaskPriority) -> bool {
        self.selected.contains(&priority)
    }
}

impl TaskFilter for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        self.selected.is_empty() || self.selected.contains(&task.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(priority: TaskPriority) -> Task {
        Task::new("t", "c", "x").with_priority(priority)
    }

    #[test]
    fn test_empty_selection_shows_all() {
        let filter = PriorityFilter::new();
        assert!(!filter.is_active());
        for priority in TaskPriority::ALL {
            assert!(filter.matches(&task(priority)));
        }
    }

    #[test]
    fn test_select_replaces_selection() {
        let mut filter = PriorityFilter::only([TaskPriority::Low, TaskPriority::High]);
        filter.select(TaskPriority::Without);

        assert!(filter.matches(&task(TaskPriority::Without)));
        assert!(!filter.matches(&task(TaskPriority::High)));
    }

    #[test]
    fn test_clear_shows_all_again() {
        let mut filter = PriorityFilter::new();
        filter.select(TaskPriority::Medium);
        assert!(filter.is_selected(TaskPriority::Medium));
        assert!(!filter.matches(&task(TaskPriority::Low)));

        filter.clear();
        assert!(!filter.is_active());
        assert!(filter.matches(&task(TaskPriority::Low)));
    }
}
