//! Task filtering functionality.
//!
//! Filters are applied when reading tasks for display and never touch the
//! ordered collection, so drags stay valid while a filter is active.

pub mod priority_filter;
pub mod task_filter;

pub use priority_filter::PriorityFilter;
pub use task_filter::{CompositeFilter, DeadlineFilter, OverdueFilter, TaskFilter};
