use crate::cli::Cli;
use serde::Serialize;
use std::sync::Arc;
use taskboard_client::HttpBoardService;
use taskboard_core::{ClientConfig, TaskboardResult};
use taskboard_domain::{Column, Task, TaskFilter};
use taskboard_sync::{BoardState, SyncCoordinator};

/// A column with its tasks, in display order.
#[derive(Debug, Serialize)]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<Task>,
}

pub struct CliContext {
    coordinator: SyncCoordinator<HttpBoardService>,
}

impl CliContext {
    pub fn new(config: &ClientConfig) -> TaskboardResult<Self> {
        let service = HttpBoardService::new(config)?;
        tracing::debug!(api_url = service.base_url(), rollback = ?config.rollback, "Using board service");
        Ok(Self {
            coordinator: SyncCoordinator::new(Arc::new(service), config.rollback),
        })
    }

    pub fn coordinator(&self) -> &SyncCoordinator<HttpBoardService> {
        &self.coordinator
    }

    pub async fn open_board(&self, board_id: &str) -> TaskboardResult<()> {
        self.coordinator.load_board(board_id).await
    }

    /// Columns of the loaded board with their tasks narrowed by `filter`.
    pub fn board_view(&self, column: Option<&str>, filter: &dyn TaskFilter) -> Vec<ColumnView> {
        let state = self.coordinator.state();
        let state = state.lock();
        view(&state, column, filter)
    }
}

fn view(state: &BoardState, column: Option<&str>, filter: &dyn TaskFilter) -> Vec<ColumnView> {
    state
        .columns()
        .into_iter()
        .filter(|c| column.map_or(true, |id| c.id == id))
        .map(|c| ColumnView {
            column: c.clone(),
            tasks: state
                .visible_tasks(&c.id, filter)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect()
}

/// File config (default location or `--config`) with command-line
/// overrides on top.
pub fn resolve_config(cli: &Cli) -> TaskboardResult<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load(),
    };
    Ok(config
        .with_api_url(cli.api_url.clone())
        .with_token(cli.token.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_domain::{BoardSnapshot, PriorityFilter, TaskPriority};

    fn state() -> BoardState {
        let mut snapshot = BoardSnapshot::new("b1");
        snapshot.columns = vec![Column::new("c1", "b1", "Todo"), Column::new("c2", "b1", "Done")];
        snapshot.insert_tasks(
            "c1".into(),
            vec![
                Task::new("t1", "c1", "Write").with_priority(TaskPriority::Low),
                Task::new("t2", "c1", "Review").with_priority(TaskPriority::High),
            ],
        );
        let mut state = BoardState::new();
        state.load(snapshot);
        state
    }

    #[test]
    fn test_view_applies_filter_and_column() {
        let state = state();
        let filter = PriorityFilter::only([TaskPriority::High]);

        let all = view(&state, None, &filter);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tasks.len(), 1);
        assert_eq!(all[0].tasks[0].id, "t2");

        let done = view(&state, Some("c2"), &PriorityFilter::new());
        assert_eq!(done.len(), 1);
        assert!(done[0].tasks.is_empty());
    }

    #[test]
    fn test_view_serializes_column_fields_inline() {
        let state = state();
        let views = view(&state, Some("c1"), &PriorityFilter::new());
        let value = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(value["_id"], "c1");
        assert_eq!(value["title"], "Todo");
        assert_eq!(value["tasks"].as_array().unwrap().len(), 2);
    }
}
