use crate::Task;
use chrono::NaiveDate;

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Tasks whose deadline falls on or before a given day.
pub struct DeadlineFilter {
    due_by: NaiveDate,
}

impl DeadlineFilter {
    pub fn due_by(due_by: NaiveDate) -> Self {
        Self { due_by }
    }
}

impl TaskFilter for DeadlineFilter {
    fn matches(&self, task: &Task) -> bool {
        task.deadline.is_some_and(|deadline| deadline <= self.due_by)
    }
}

/// Tasks whose deadline has passed as of `today`.
pub struct OverdueFilter {
    today: NaiveDate,
}

impl OverdueFilter {
    pub fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl TaskFilter for OverdueFilter {
    fn matches(&self, task: &Task) -> bool {
        task.is_overdue(self.today)
    }
}

/// A task matches only if it passes all filters.
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter + Send + Sync>>,
}

impl CompositeFilter {
    /// An empty composite matches every task.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl TaskFilter + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PriorityFilter, TaskPriority};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn test_deadline_filter() {
        let filter = DeadlineFilter::due_by(day(1));

        let mut task = Task::new("t1", "c1", "A");
        assert!(!filter.matches(&task));

        task.deadline = Some(day(1));
        assert!(filter.matches(&task));

        task.deadline = Some(day(2));
        assert!(!filter.matches(&task));
    }

    #[test]
    fn test_overdue_filter_excludes_today() {
        let filter = OverdueFilter::as_of(day(10));
        let mut task = Task::new("t1", "c1", "A");

        task.deadline = Some(day(9));
        assert!(filter.matches(&task));
        task.deadline = Some(day(10));
        assert!(!filter.matches(&task));
    }

    #[test]
    fn test_composite_requires_every_filter() {
        let empty = CompositeFilter::new();
        assert!(empty.is_empty());
        assert!(empty.matches(&Task::new("t1", "c1", "A")));

        let filter = CompositeFilter::new()
            .with_filter(PriorityFilter::only([TaskPriority::High]))
            .with_filter(DeadlineFilter::due_by(day(5)));

        let mut task = Task::new("t1", "c1", "A").with_priority(TaskPriority::High);
        task.deadline = Some(day(3));
        assert!(filter.matches(&task));

        task.deadline = Some(day(6));
        assert!(!filter.matches(&task));

        let mut low = Task::new("t2", "c1", "B").with_priority(TaskPriority::Low);
        low.deadline = Some(day(3));
        assert!(!filter.matches(&low));
    }
}
