//! Fetches everything one board view needs in a single snapshot.

use crate::traits::BoardService;
use futures::future::try_join_all;
use taskboard_core::TaskboardResult;
use taskboard_domain::BoardSnapshot;

/// Fetch a board's columns, then every column's tasks concurrently.
///
/// Any failure fails the whole load; callers keep their previous state.
pub async fn fetch_board_snapshot<S>(service: &S, board_id: &str) -> TaskboardResult<BoardSnapshot>
where
    S: BoardService + ?Sized,
{
    let columns = service.list_columns(board_id).await?;

    let task_lists = try_join_all(
        columns
            .iter()
            .map(|column| service.list_tasks(board_id, &column.id)),
    )
    .await?;

    let mut snapshot = BoardSnapshot::new(board_id);
    for (column, tasks) in columns.iter().zip(task_lists) {
        snapshot.insert_tasks(column.id.clone(), tasks);
    }
    snapshot.columns = columns;

    tracing::info!(
        board_id,
        columns = snapshot.columns.len(),
        tasks = snapshot.task_count(),
        "Loaded board"
    );
    Ok(snapshot)
}
