//! Keeps the local board in step with the board service.
//!
//! Drags are applied locally first and confirmed or rolled back once the
//! service answers. Everything else (creating, editing and deleting boards,
//! columns and tasks) waits for the service and then updates local state
//! from its response.

use crate::boards::BoardDirectory;
use crate::drag::{resolve_drop, DragOutcome, DropRejection};
use crate::optimistic::{apply_optimistic, OnFailure, Settlement};
use crate::state::{BoardState, OrderCheckpoint, SharedBoardState};
use parking_lot::Mutex;
use std::sync::Arc;
use taskboard_client::{fetch_board_snapshot, BoardService};
use taskboard_core::{Notification, Notifier, RollbackPolicy, TaskboardError, TaskboardResult};
use taskboard_domain::{
    Board, BoardId, BoardUpdate, Column, ColumnId, NewBoard, NewColumn, NewTask, Task, TaskId,
    TaskUpdate,
};

/// Why a drop was not sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoBoard,
    NoChange,
    Rejected(DropRejection),
    /// The board changed between resolving the drop and applying it.
    Superseded,
}

/// How a drop ended up after talking to the service.
#[derive(Debug)]
pub enum SyncOutcome {
    Applied,
    Skipped(SkipReason),
    /// The service failed and the previous order was restored.
    RolledBack(TaskboardError),
    /// The service failed and the local order was left in place; the board
    /// is stale until reloaded.
    Kept(TaskboardError),
    /// The service failed after a newer change touched the same sequences;
    /// the newer change was left alone and the board is stale.
    Diverged(TaskboardError),
}

impl SyncOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Skipped(_) => "skipped",
            Self::RolledBack(_) => "rolled_back",
            Self::Kept(_) => "kept",
            Self::Diverged(_) => "diverged",
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn error(&self) -> Option<&TaskboardError> {
        match self {
            Self::RolledBack(e) | Self::Kept(e) | Self::Diverged(e) => Some(e),
            Self::Applied | Self::Skipped(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct DropReport {
    pub outcome: DragOutcome,
    pub sync: SyncOutcome,
}

/// What the service has to be told after a drag was applied locally.
#[derive(Debug)]
enum ReorderRequest {
    Columns(Vec<ColumnId>),
    Tasks {
        column_id: ColumnId,
        order: Vec<TaskId>,
    },
    Move {
        task_id: TaskId,
        from_column: ColumnId,
        to_column: ColumnId,
    },
}

impl ReorderRequest {
    /// Built from the state right after `outcome` was applied, so reorders
    /// carry the complete new sequence.
    fn after(outcome: &DragOutcome, state: &BoardState) -> Option<Self> {
        match outcome {
            DragOutcome::MoveColumn { .. } => {
                Some(Self::Columns(state.order().column_order().to_vec()))
            }
            DragOutcome::ReorderTasks { column_id, .. } => Some(Self::Tasks {
                column_id: column_id.clone(),
                order: state.order().tasks_in(column_id)?.to_vec(),
            }),
            DragOutcome::MoveTaskAcross {
                task_id,
                from_column,
                to_column,
                ..
            } => Some(Self::Move {
                task_id: task_id.clone(),
                from_column: from_column.clone(),
                to_column: to_column.clone(),
            }),
            DragOutcome::NoOp | DragOutcome::Rejected(_) => None,
        }
    }
}

/// Owns the shared board state and routes every change through the
/// service.
///
/// # Example
/// ```ignore
/// let coordinator = SyncCoordinator::new(Arc::new(service), RollbackPolicy::Uniform);
/// coordinator.load_board("b1").await?;
/// let report = coordinator.handle_drop("t1", Some("c2")).await;
/// ```
pub struct SyncCoordinator<S: ?Sized> {
    service: Arc<S>,
    state: SharedBoardState,
    boards: Mutex<BoardDirectory>,
    notifications: Mutex<Vec<Notification>>,
    rollback: RollbackPolicy,
}

impl<S: BoardService + ?Sized> SyncCoordinator<S> {
    pub fn new(service: Arc<S>, rollback: RollbackPolicy) -> Self {
        Self::with_state(service, BoardState::shared(), rollback)
    }

    pub fn with_state(service: Arc<S>, state: SharedBoardState, rollback: RollbackPolicy) -> Self {
        Self {
            service,
            state,
            boards: Mutex::new(BoardDirectory::new()),
            notifications: Mutex::new(Vec::new()),
            rollback,
        }
    }

    pub fn state(&self) -> SharedBoardState {
        Arc::clone(&self.state)
    }

    pub fn rollback_policy(&self) -> RollbackPolicy {
        self.rollback
    }

    pub fn boards(&self) -> BoardDirectory {
        self.boards.lock().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().notifications().to_vec()
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().drain_notifications()
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().notify(notification);
    }

    /// Log and surface a failed call, passing the result through.
    fn surface<T>(&self, result: TaskboardResult<T>) -> TaskboardResult<T> {
        if let Err(e) = &result {
            tracing::error!("{}", e);
            self.notify(Notification::error(e.user_message()));
        }
        result
    }

    fn active_board(&self) -> TaskboardResult<BoardId> {
        self.state
            .lock()
            .board_id()
            .map(str::to_string)
            .ok_or_else(|| TaskboardError::Validation("No board is loaded".to_string()))
    }

    fn locate_task(&self, task_id: &str) -> TaskboardResult<(BoardId, ColumnId)> {
        let state = self.state.lock();
        let board_id = state
            .board_id()
            .ok_or_else(|| TaskboardError::Validation("No board is loaded".to_string()))?;
        let (column_id, _) = state
            .order()
            .locate_task(task_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("Task {} is not on the board", task_id)))?;
        Ok((board_id.to_string(), column_id.clone()))
    }

    /// Run `f` on the state if `board_id` is still the loaded board.
    fn with_board<R>(&self, board_id: &str, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        let mut state = self.state.lock();
        if state.board_id() != Some(board_id) {
            tracing::debug!(board_id, "Board switched while a request was in flight");
            return None;
        }
        Some(f(&mut state))
    }

    // Boards

    pub async fn refresh_boards(&self) -> TaskboardResult<Vec<Board>> {
        let boards = self.surface(self.service.list_boards().await)?;
        self.boards.lock().replace(boards.clone());
        Ok(boards)
    }

    pub async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board> {
        let created = self.surface(self.service.create_board(board).await)?;
        self.boards.lock().upsert(created.clone());
        Ok(created)
    }

    pub async fn update_board(&self, board_id: &str, update: &BoardUpdate) -> TaskboardResult<Board> {
        let updated = self.surface(self.service.update_board(board_id, update).await)?;
        self.boards.lock().upsert(updated.clone());
        Ok(updated)
    }

    /// Delete a board; if it is the loaded one the board state is cleared.
    pub async fn delete_board(&self, board_id: &str) -> TaskboardResult<()> {
        self.surface(self.service.delete_board(board_id).await)?;
        self.boards.lock().remove(board_id);
        self.with_board(board_id, BoardState::clear);
        Ok(())
    }

    /// Fetch a board and make it the loaded one. On failure the previous
    /// state is kept.
    pub async fn load_board(&self, board_id: &str) -> TaskboardResult<()> {
        let snapshot = self.surface(fetch_board_snapshot(self.service.as_ref(), board_id).await)?;
        self.state.lock().load(snapshot);
        self.boards.lock().select(board_id);
        Ok(())
    }

    /// Re-fetch the loaded board, clearing the stale flag.
    pub async fn reload(&self) -> TaskboardResult<()> {
        let board_id = self.surface(self.active_board())?;
        self.load_board(&board_id).await
    }

    // Drag and drop

    /// Resolve a drop against the current order, apply it and sync it.
    ///
    /// Failures never come back as `Err`; they are reported in the
    /// [`SyncOutcome`] and as a notification.
    pub async fn handle_drop(&self, dragged_id: &str, target_id: Option<&str>) -> DropReport {
        let (board_id, outcome) = {
            let state = self.state.lock();
            (
                state.board_id().map(str::to_string),
                resolve_drop(dragged_id, target_id, state.order()),
            )
        };

        let sync = match (&board_id, &outcome) {
            (None, _) => SyncOutcome::Skipped(SkipReason::NoBoard),
            (_, DragOutcome::Rejected(reason)) => {
                tracing::debug!(dragged_id, ?target_id, ?reason, "Drop rejected");
                SyncOutcome::Skipped(SkipReason::Rejected(reason.clone()))
            }
            (_, DragOutcome::NoOp) => SyncOutcome::Skipped(SkipReason::NoChange),
            (Some(board_id), _) => {
                self.sync_drag(board_id, dragged_id, target_id, &outcome)
                    .await
            }
        };
        DropReport { outcome, sync }
    }

    async fn sync_drag(
        &self,
        board_id: &str,
        dragged_id: &str,
        target_id: Option<&str>,
        outcome: &DragOutcome,
    ) -> SyncOutcome {
        let checkpoint = OrderCheckpoint::for_outcome(outcome);
        let on_failure = match outcome {
            DragOutcome::MoveTaskAcross { .. } => OnFailure::Revert,
            _ if self.rollback.reverts_reorders() => OnFailure::Revert,
            _ => OnFailure::Keep,
        };

        let settled = apply_optimistic(
            &*self.state,
            &checkpoint,
            |state: &mut BoardState| {
                // Re-check under the lock: another gesture may have landed
                // since the drop was resolved
                if state.board_id() != Some(board_id)
                    || resolve_drop(dragged_id, target_id, state.order()) != *outcome
                    || !state.apply(outcome)
                {
                    return None;
                }
                ReorderRequest::after(outcome, state)
            },
            |request| self.send(board_id, request),
            on_failure,
        )
        .await;

        match settled {
            None => SyncOutcome::Skipped(SkipReason::Superseded),
            Some(Settlement::Confirmed(updated)) => {
                if let Some(task) = updated {
                    self.with_board(board_id, |state| state.cache_mut().refresh_task(task));
                }
                tracing::info!(board_id, ?outcome, "Drop confirmed");
                SyncOutcome::Applied
            }
            Some(Settlement::Reverted(e)) => {
                tracing::warn!(board_id, ?outcome, "Drop rolled back");
                self.notify(Notification::error(e.user_message()));
                SyncOutcome::RolledBack(e)
            }
            Some(Settlement::Kept(e)) => {
                tracing::warn!(board_id, ?outcome, "Drop failed, keeping local order");
                self.with_board(board_id, BoardState::mark_stale);
                self.notify(Notification::error(e.user_message()));
                SyncOutcome::Kept(e)
            }
            Some(Settlement::Diverged(e)) => {
                tracing::warn!(board_id, ?outcome, "Drop failed after a newer change, not reverting");
                self.with_board(board_id, BoardState::mark_stale);
                self.notify(Notification::warning(format!(
                    "{}. The board changed since; reload to resync.",
                    e.user_message()
                )));
                SyncOutcome::Diverged(e)
            }
        }
    }

    async fn send(&self, board_id: &str, request: ReorderRequest) -> TaskboardResult<Option<Task>> {
        tracing::debug!(board_id, ?request, "Syncing drop");
        match request {
            ReorderRequest::Columns(order) => {
                self.service.reorder_columns(board_id, &order).await?;
                Ok(None)
            }
            ReorderRequest::Tasks { column_id, order } => {
                self.service
                    .reorder_tasks(board_id, &column_id, &order)
                    .await?;
                Ok(None)
            }
            ReorderRequest::Move {
                task_id,
                from_column,
                to_column,
            } => {
                let update = TaskUpdate::move_to(to_column);
                let task = self
                    .service
                    .update_task(board_id, &from_column, &task_id, &update)
                    .await?;
                Ok(Some(task))
            }
        }
    }

    // Columns

    pub async fn create_column(&self, title: &str) -> TaskboardResult<Column> {
        let board_id = self.surface(self.active_board())?;
        let column = self.surface(
            self.service
                .create_column(&board_id, &NewColumn::new(title))
                .await,
        )?;
        self.with_board(&board_id, |state| {
            state.cache_mut().upsert_column(column.clone());
            state.reinitialize();
        });
        Ok(column)
    }

    pub async fn rename_column(&self, column_id: &str, title: &str) -> TaskboardResult<Column> {
        let board_id = self.surface(self.active_board())?;
        let column = self.surface(
            self.service
                .rename_column(&board_id, column_id, title)
                .await,
        )?;
        self.with_board(&board_id, |state| {
            state.cache_mut().upsert_column(column.clone());
        });
        Ok(column)
    }

    /// Delete a column; its tasks leave the board with it.
    pub async fn delete_column(&self, column_id: &str) -> TaskboardResult<()> {
        let board_id = self.surface(self.active_board())?;
        self.surface(self.service.delete_column(&board_id, column_id).await)?;
        self.with_board(&board_id, |state| {
            state.cache_mut().remove_column(column_id);
            state.reinitialize();
        });
        Ok(())
    }

    // Tasks

    pub async fn create_task(&self, column_id: &str, task: &NewTask) -> TaskboardResult<Task> {
        let board_id = self.surface(self.active_board())?;
        let created = self.surface(
            self.service
                .create_task(&board_id, column_id, task)
                .await,
        )?;
        self.with_board(&board_id, |state| {
            state.cache_mut().upsert_task(column_id, created.clone());
            state.reinitialize();
        });
        Ok(created)
    }

    /// Edit a task. Moving it to another column through an edit puts it on
    /// top of that column.
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> TaskboardResult<Task> {
        let (board_id, column_id) = self.surface(self.locate_task(task_id))?;
        let updated = self.surface(
            self.service
                .update_task(&board_id, &column_id, task_id, update)
                .await,
        )?;

        let destination = update
            .column
            .as_deref()
            .filter(|to| *to != column_id.as_str());
        self.with_board(&board_id, |state| {
            if let Some(to) = destination {
                state.cache_mut().relocate_task(task_id, to, 0);
            }
            state.cache_mut().refresh_task(updated.clone());
            state.reinitialize();
        });
        Ok(updated)
    }

    pub async fn delete_task(&self, task_id: &str) -> TaskboardResult<()> {
        let (board_id, column_id) = self.surface(self.locate_task(task_id))?;
        self.surface(
            self.service
                .delete_task(&board_id, &column_id, task_id)
                .await,
        )?;
        self.with_board(&board_id, |state| {
            state.cache_mut().remove_task(task_id);
            state.reinitialize();
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use taskboard_core::NotificationLevel;

    mock! {
        pub Service {}

        #[async_trait]
        impl BoardService for Service {
            async fn list_boards(&self) -> TaskboardResult<Vec<Board>>;
            async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board>;
            async fn update_board(&self, board_id: &str, update: &BoardUpdate) -> TaskboardResult<Board>;
            async fn delete_board(&self, board_id: &str) -> TaskboardResult<()>;
            async fn list_columns(&self, board_id: &str) -> TaskboardResult<Vec<Column>>;
            async fn create_column(&self, board_id: &str, column: &NewColumn) -> TaskboardResult<Column>;
            async fn rename_column(&self, board_id: &str, column_id: &str, title: &str) -> TaskboardResult<Column>;
            async fn delete_column(&self, board_id: &str, column_id: &str) -> TaskboardResult<()>;
            async fn reorder_columns(&self, board_id: &str, column_order: &[ColumnId]) -> TaskboardResult<()>;
            async fn list_tasks(&self, board_id: &str, column_id: &str) -> TaskboardResult<Vec<Task>>;
            async fn create_task(&self, board_id: &str, column_id: &str, task: &NewTask) -> TaskboardResult<Task>;
            async fn update_task(&self, board_id: &str, column_id: &str, task_id: &str, update: &TaskUpdate) -> TaskboardResult<Task>;
            async fn delete_task(&self, board_id: &str, column_id: &str, task_id: &str) -> TaskboardResult<()>;
            async fn reorder_tasks(&self, board_id: &str, column_id: &str, task_order: &[TaskId]) -> TaskboardResult<()>;
        }
    }

    /// Board b1: c1 [t1, t2], c2 [t3], c3 [].
    fn expect_board(service: &mut MockService) {
        service.expect_list_columns().returning(|board_id| {
            Ok(vec![
                Column::new("c1", board_id, "Todo"),
                Column::new("c2", board_id, "Doing"),
                Column::new("c3", board_id, "Done"),
            ])
        });
        service
            .expect_list_tasks()
            .returning(|_, column_id| match column_id {
                "c1" => Ok(vec![Task::new("t1", "c1", "Write"), Task::new("t2", "c1", "Review")]),
                "c2" => Ok(vec![Task::new("t3", "c2", "Ship")]),
                _ => Ok(vec![]),
            });
    }

    fn server_error(message: &str) -> TaskboardError {
        TaskboardError::Remote {
            status: 500,
            message: message.to_string(),
        }
    }

    async fn loaded(service: MockService, rollback: RollbackPolicy) -> SyncCoordinator<MockService> {
        let coordinator = SyncCoordinator::new(Arc::new(service), rollback);
        coordinator.load_board("b1").await.unwrap();
        coordinator
    }

    fn column_order(coordinator: &SyncCoordinator<MockService>) -> Vec<String> {
        coordinator.state().lock().order().column_order().to_vec()
    }

    fn task_order(coordinator: &SyncCoordinator<MockService>, column_id: &str) -> Vec<String> {
        let state = coordinator.state();
        let state = state.lock();
        state.order().tasks_in(column_id).unwrap_or(&[]).to_vec()
    }

    #[tokio::test]
    async fn test_column_drop_sends_full_order() {
        let mut service = MockService::new();
        expect_board(&mut service);
        let sent = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&sent);
        service
            .expect_reorder_columns()
            .times(1)
            .returning(move |_, order| {
                log.lock().push(order.to_vec());
                Ok(())
            });

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        let report = coordinator.handle_drop("c1", Some("c2")).await;

        assert!(report.sync.is_applied());
        assert_eq!(column_order(&coordinator), ["c2", "c1", "c3"]);
        assert_eq!(sent.lock()[0], ["c2", "c1", "c3"]);
    }

    #[tokio::test]
    async fn test_failed_reorder_rolls_back() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_reorder_tasks()
            .returning(|_, _, _| Err(server_error("Failed to reorder tasks")));

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        let report = coordinator.handle_drop("t2", Some("t1")).await;

        assert!(matches!(report.sync, SyncOutcome::RolledBack(_)));
        assert_eq!(task_order(&coordinator, "c1"), ["t1", "t2"]);
        let notes = coordinator.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Failed to reorder tasks");
        assert!(!coordinator.state().lock().is_stale());
    }

    #[tokio::test]
    async fn test_cross_column_only_keeps_failed_reorder() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_reorder_columns()
            .returning(|_, _| Err(server_error("Failed to reorder columns")));

        let coordinator = loaded(service, RollbackPolicy::CrossColumnOnly).await;
        let report = coordinator.handle_drop("c3", Some("c1")).await;

        assert_eq!(report.sync.label(), "kept");
        assert_eq!(column_order(&coordinator), ["c3", "c1", "c2"]);
        assert!(coordinator.state().lock().is_stale());
    }

    #[tokio::test]
    async fn test_cross_column_only_still_reverts_moves() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_update_task()
            .returning(|_, _, _, _| Err(server_error("Failed to move task")));

        let coordinator = loaded(service, RollbackPolicy::CrossColumnOnly).await;
        let report = coordinator.handle_drop("t1", Some("c3")).await;

        assert!(matches!(report.sync, SyncOutcome::RolledBack(_)));
        assert_eq!(task_order(&coordinator, "c1"), ["t1", "t2"]);
        assert!(task_order(&coordinator, "c3").is_empty());
        assert!(coordinator.state().lock().check_consistency().is_ok());
    }

    #[tokio::test]
    async fn test_cross_column_success_refreshes_task() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_update_task()
            .times(1)
            .returning(|_, from_column, task_id, update| {
                assert_eq!(from_column, "c1");
                assert_eq!(update.column.as_deref(), Some("c2"));
                let mut task = Task::new(task_id, "c2", "Write");
                task.description = Some("Moved by server".into());
                Ok(task)
            });

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        let report = coordinator.handle_drop("t1", Some("t3")).await;

        assert!(report.sync.is_applied());
        assert_eq!(task_order(&coordinator, "c2"), ["t1", "t3"]);
        let state = coordinator.state();
        let state = state.lock();
        let task = state.cache().task("t1").unwrap();
        assert_eq!(task.column_id, "c2");
        assert_eq!(task.description.as_deref(), Some("Moved by server"));
    }

    #[tokio::test]
    async fn test_noop_and_rejected_drops_send_nothing() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service.expect_reorder_columns().never();
        service.expect_reorder_tasks().never();
        service.expect_update_task().never();

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;

        let report = coordinator.handle_drop("t2", Some("t2")).await;
        assert!(matches!(report.sync, SyncOutcome::Skipped(SkipReason::NoChange)));

        let report = coordinator.handle_drop("c1", None).await;
        assert!(matches!(
            report.sync,
            SyncOutcome::Skipped(SkipReason::Rejected(DropRejection::NoTarget))
        ));
        assert!(coordinator.drain_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_drop_without_board_is_skipped() {
        let coordinator = SyncCoordinator::new(Arc::new(MockService::new()), RollbackPolicy::Uniform);
        let report = coordinator.handle_drop("c1", Some("c2")).await;
        assert!(matches!(report.sync, SyncOutcome::Skipped(SkipReason::NoBoard)));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_board() {
        let mut service = MockService::new();
        let mut calls = 0;
        service.expect_list_columns().returning(move |board_id| {
            calls += 1;
            if calls == 1 {
                Ok(vec![Column::new("c1", board_id, "Todo")])
            } else {
                Err(TaskboardError::Unauthorized("Please login to continue".into()))
            }
        });
        service.expect_list_tasks().returning(|_, _| Ok(vec![]));

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        let err = coordinator.load_board("b2").await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(coordinator.state().lock().board_id(), Some("b1"));
        assert_eq!(column_order(&coordinator), ["c1"]);
        assert_eq!(coordinator.notifications()[0].message, "Please login to continue");
    }

    #[tokio::test]
    async fn test_create_and_delete_rederive_order() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_create_column()
            .returning(|board_id, column| Ok(Column::new("c4", board_id, column.title.clone())));
        service
            .expect_create_task()
            .returning(|_, column_id, task| Ok(Task::new("t9", column_id, task.title.clone())));
        service.expect_delete_column().returning(|_, _| Ok(()));

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        coordinator.create_column("Later").await.unwrap();
        assert_eq!(column_order(&coordinator), ["c1", "c2", "c3", "c4"]);

        coordinator.create_task("c2", &NewTask::new("Deploy")).await.unwrap();
        assert_eq!(task_order(&coordinator, "c2"), ["t3", "t9"]);

        coordinator.delete_column("c1").await.unwrap();
        assert_eq!(column_order(&coordinator), ["c2", "c3", "c4"]);
        let state = coordinator.state();
        assert!(state.lock().cache().task("t1").is_none());
        assert!(state.lock().check_consistency().is_ok());
    }

    #[tokio::test]
    async fn test_update_task_move_lands_on_top() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_update_task()
            .returning(|_, _, task_id, update| {
                let column = update.column.clone().unwrap_or_default();
                Ok(Task::new(task_id, column, "Review"))
            });

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        coordinator
            .update_task("t2", &TaskUpdate::move_to("c2"))
            .await
            .unwrap();

        assert_eq!(task_order(&coordinator, "c1"), ["t1"]);
        assert_eq!(task_order(&coordinator, "c2"), ["t2", "t3"]);
    }

    #[tokio::test]
    async fn test_unknown_task_is_not_found() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service.expect_delete_task().never();

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        let err = coordinator.delete_task("ghost").await.unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_board_directory_follows_service() {
        let mut service = MockService::new();
        expect_board(&mut service);
        service
            .expect_list_boards()
            .returning(|| Ok(vec![Board::new("b1", "Work"), Board::new("b2", "Home")]));
        service
            .expect_create_board()
            .returning(|board| Ok(Board::new("b3", board.title.clone())));
        service.expect_delete_board().returning(|_| Ok(()));

        let coordinator = loaded(service, RollbackPolicy::Uniform).await;
        coordinator.refresh_boards().await.unwrap();
        assert_eq!(coordinator.boards().selected().unwrap().id, "b1");

        coordinator.create_board(&NewBoard::new("Side")).await.unwrap();
        assert_eq!(coordinator.boards().selected().unwrap().id, "b3");

        coordinator.delete_board("b1").await.unwrap();
        assert_eq!(coordinator.boards().boards().len(), 2);
        assert_eq!(coordinator.state().lock().board_id(), None);
    }
}
