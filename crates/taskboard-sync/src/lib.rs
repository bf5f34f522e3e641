pub mod boards;
pub mod cache;
pub mod coordinator;
pub mod drag;
pub mod optimistic;
pub mod order;
pub mod state;

pub use boards::BoardDirectory;
pub use cache::EntityCache;
pub use coordinator::{DropReport, SkipReason, SyncCoordinator, SyncOutcome};
pub use drag::{resolve_drop, DragOutcome, DropRejection};
pub use optimistic::{apply_optimistic, Checkpoint, OnFailure, Settlement};
pub use order::{OrderViolation, OrderedCollection, SequenceKey};
pub use state::{BoardState, OrderCheckpoint, SavedOrder, SharedBoardState};
