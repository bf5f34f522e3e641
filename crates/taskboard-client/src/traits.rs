use async_trait::async_trait;
use taskboard_core::TaskboardResult;
use taskboard_domain::{
    Board, BoardUpdate, Column, ColumnId, NewBoard, NewColumn, NewTask, Task, TaskId, TaskUpdate,
};

/// The remote board service: source of truth for boards, columns and tasks.
///
/// Implementations handle the transport; `HttpBoardService` talks to the
/// REST API, tests substitute mocks or in-memory fakes.
#[async_trait]
pub trait BoardService: Send + Sync {
    // Boards
    async fn list_boards(&self) -> TaskboardResult<Vec<Board>>;
    async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board>;
    async fn update_board(&self, board_id: &str, update: &BoardUpdate) -> TaskboardResult<Board>;
    async fn delete_board(&self, board_id: &str) -> TaskboardResult<()>;

    // Columns
    async fn list_columns(&self, board_id: &str) -> TaskboardResult<Vec<Column>>;
    async fn create_column(&self, board_id: &str, column: &NewColumn) -> TaskboardResult<Column>;
    async fn rename_column(
        &self,
        board_id: &str,
        column_id: &str,
        title: &str,
    ) -> TaskboardResult<Column>;
    async fn delete_column(&self, board_id: &str, column_id: &str) -> TaskboardResult<()>;

    /// Persist the full column order of a board.
    async fn reorder_columns(
        &self,
        board_id: &str,
        column_order: &[ColumnId],
    ) -> TaskboardResult<()>;

    // Tasks
    async fn list_tasks(&self, board_id: &str, column_id: &str) -> TaskboardResult<Vec<Task>>;
    async fn create_task(
        &self,
        board_id: &str,
        column_id: &str,
        task: &NewTask,
    ) -> TaskboardResult<Task>;

    /// Edit a task. `column_id` is the column the task currently lives in;
    /// `update.column` reassigns it.
    async fn update_task(
        &self,
        board_id: &str,
        column_id: &str,
        task_id: &str,
        update: &TaskUpdate,
    ) -> TaskboardResult<Task>;
    async fn delete_task(&self, board_id: &str, column_id: &str, task_id: &str)
        -> TaskboardResult<()>;

    /// Persist the full task order of one column.
    async fn reorder_tasks(
        &self,
        board_id: &str,
        column_id: &str,
        task_order: &[TaskId],
    ) -> TaskboardResult<()>;
}
