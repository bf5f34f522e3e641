pub mod board;
pub mod column;
pub mod field_update;
pub mod filter;
pub mod payload;
pub mod snapshot;
pub mod task;

pub use board::{Board, BoardId, DEFAULT_BOARD_ICON};
pub use column::{Column, ColumnId};
pub use field_update::FieldUpdate;
pub use filter::{CompositeFilter, DeadlineFilter, OverdueFilter, PriorityFilter, TaskFilter};
pub use payload::{BoardUpdate, NewBoard, NewColumn, NewTask, TaskUpdate};
pub use snapshot::BoardSnapshot;
pub use task::{parse_deadline, Task, TaskId, TaskPriority};
