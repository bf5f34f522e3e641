pub mod board;
pub mod column;
pub mod drag;
pub mod task;
