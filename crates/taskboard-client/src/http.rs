use crate::envelope::{
    error_from_response, ApiEnvelope, ColumnList, ColumnOrderBody, TaskBody, TaskList,
    TaskOrderBody, TitleBody,
};
use crate::routes;
use crate::traits::BoardService;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taskboard_core::{ClientConfig, TaskboardError, TaskboardResult};
use taskboard_domain::{
    Board, BoardUpdate, Column, ColumnId, NewBoard, NewColumn, NewTask, Task, TaskId, TaskUpdate,
};
use uuid::Uuid;

/// REST implementation of `BoardService`.
#[derive(Debug, Clone)]
pub struct HttpBoardService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBoardService {
    pub fn new(config: &ClientConfig) -> TaskboardResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TaskboardError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, request_id: Uuid) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        fallback: &str,
    ) -> TaskboardResult<Vec<u8>> {
        let request_id = Uuid::new_v4();
        let mut builder = self.request(method.clone(), path, request_id);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        tracing::debug!(%request_id, %method, path, "Sending request");
        let response = builder.send().await.map_err(|e| transport_error(e, fallback))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, fallback))?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), &bytes, fallback);
            tracing::error!(%request_id, %method, path, status = status.as_u16(), "{}", err);
            return Err(err);
        }

        tracing::debug!(%request_id, status = status.as_u16(), bytes = bytes.len(), "Response received");
        Ok(bytes.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        fallback: &str,
    ) -> TaskboardResult<T> {
        let bytes = self.execute(method, path, body, fallback).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| TaskboardError::Serialization(format!("{}: {}", fallback, e)))?;
        Ok(envelope.data)
    }
}

fn transport_error(err: reqwest::Error, context: &str) -> TaskboardError {
    if err.is_timeout() {
        TaskboardError::Timeout(context.to_string())
    } else if err.is_decode() {
        TaskboardError::Serialization(format!("{}: {}", context, err))
    } else {
        TaskboardError::Connection(format!("{}: {}", context, err))
    }
}

fn json_body<T: Serialize>(body: &T) -> TaskboardResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

#[async_trait]
impl BoardService for HttpBoardService {
    async fn list_boards(&self) -> TaskboardResult<Vec<Board>> {
        self.fetch(Method::GET, &routes::boards(), None, "Failed to fetch boards")
            .await
    }

    async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board> {
        board.validate()?;
        let created: Board = self
            .fetch(Method::POST, &routes::boards(), Some(json_body(board)?), "Failed to create board")
            .await?;
        tracing::info!(board_id = %created.id, "Created board '{}'", created.title);
        Ok(created)
    }

    async fn update_board(&self, board_id: &str, update: &BoardUpdate) -> TaskboardResult<Board> {
        update.validate()?;
        self.fetch(
            Method::PATCH,
            &routes::board(board_id),
            Some(json_body(update)?),
            "Failed to update board",
        )
        .await
    }

    async fn delete_board(&self, board_id: &str) -> TaskboardResult<()> {
        self.execute(Method::DELETE, &routes::board(board_id), None, "Failed to delete board")
            .await?;
        tracing::info!(board_id, "Deleted board");
        Ok(())
    }

    async fn list_columns(&self, board_id: &str) -> TaskboardResult<Vec<Column>> {
        let list: ColumnList = self
            .fetch(Method::GET, &routes::columns(board_id), None, "Failed to fetch columns")
            .await?;
        Ok(list.into_columns())
    }

    async fn create_column(&self, board_id: &str, column: &NewColumn) -> TaskboardResult<Column> {
        column.validate()?;
        self.fetch(
            Method::POST,
            &routes::columns(board_id),
            Some(json_body(column)?),
            "Failed to create column",
        )
        .await
    }

    async fn rename_column(
        &self,
        board_id: &str,
        column_id: &str,
        title: &str,
    ) -> TaskboardResult<Column> {
        NewColumn::new(title).validate()?;
        self.fetch(
            Method::PATCH,
            &routes::column(board_id, column_id),
            Some(json_body(&TitleBody { title })?),
            "Failed to update column",
        )
        .await
    }

    async fn delete_column(&self, board_id: &str, column_id: &str) -> TaskboardResult<()> {
        self.execute(
            Method::DELETE,
            &routes::column(board_id, column_id),
            None,
            "Failed to delete column",
        )
        .await?;
        Ok(())
    }

    async fn reorder_columns(
        &self,
        board_id: &str,
        column_order: &[ColumnId],
    ) -> TaskboardResult<()> {
        self.execute(
            Method::PATCH,
            &routes::column_reorder(board_id),
            Some(json_body(&ColumnOrderBody { column_order })?),
            "Failed to reorder columns",
        )
        .await?;
        Ok(())
    }

    async fn list_tasks(&self, board_id: &str, column_id: &str) -> TaskboardResult<Vec<Task>> {
        let list: TaskList = self
            .fetch(
                Method::GET,
                &routes::tasks(board_id, column_id),
                None,
                "Failed to fetch tasks",
            )
            .await?;
        Ok(list.tasks)
    }

    async fn create_task(
        &self,
        board_id: &str,
        column_id: &str,
        task: &NewTask,
    ) -> TaskboardResult<Task> {
        task.validate()?;
        let body: TaskBody = self
            .fetch(
                Method::POST,
                &routes::tasks(board_id, column_id),
                Some(json_body(task)?),
                "Failed to add task",
            )
            .await?;
        Ok(body.task)
    }

    async fn update_task(
        &self,
        board_id: &str,
        column_id: &str,
        task_id: &str,
        update: &TaskUpdate,
    ) -> TaskboardResult<Task> {
        update.validate()?;
        let fallback = if update.column.is_some() {
            "Failed to move task"
        } else {
            "Failed to update task"
        };
        let body: TaskBody = self
            .fetch(
                Method::PATCH,
                &routes::task(board_id, column_id, task_id),
                Some(json_body(update)?),
                fallback,
            )
            .await?;
        Ok(body.task)
    }

    async fn delete_task(
        &self,
        board_id: &str,
        column_id: &str,
        task_id: &str,
    ) -> TaskboardResult<()> {
        self.execute(
            Method::DELETE,
            &routes::task(board_id, column_id, task_id),
            None,
            "Failed to delete task",
        )
        .await?;
        Ok(())
    }

    async fn reorder_tasks(
        &self,
        board_id: &str,
        column_id: &str,
        task_order: &[TaskId],
    ) -> TaskboardResult<()> {
        self.execute(
            Method::PATCH,
            &routes::task_reorder(board_id, column_id),
            Some(json_body(&TaskOrderBody { task_order })?),
            "Failed to reorder tasks",
        )
        .await?;
        Ok(())
    }
}
