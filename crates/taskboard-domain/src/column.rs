use serde::{Deserialize, Serialize};

use crate::board::BoardId;

pub type ColumnId = String;

/// A lane on a board. Display order is owned by the ordered collection, so
/// `position` is only what the server last reported, if anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "_id", alias = "id")]
    pub id: ColumnId,
    #[serde(default, alias = "board")]
    pub board_id: BoardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
            title: title.into(),
            position: None,
        }
    }

    pub fn rename(&mut self, title: String) {
        self.title = title;
    }
}
