use serde::{Deserialize, Serialize};

pub type BoardId = String;

pub const DEFAULT_BOARD_ICON: &str = "icon-grid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id", alias = "id")]
    pub id: BoardId,
    pub title: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default, alias = "backgroundId")]
    pub background: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_BOARD_ICON.to_string()
}

impl Board {
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: default_icon(),
            background: None,
        }
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn update_icon(&mut self, icon: String) {
        self.icon = icon;
    }

    pub fn update_background(&mut self, background: Option<String>) {
        self.background = background;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_board() {
        let json = r#"{"_id":"b1","title":"Roadmap","icon":"icon-star","background":"mountains"}"#;
        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.id, "b1");
        assert_eq!(board.icon, "icon-star");
        assert_eq!(board.background.as_deref(), Some("mountains"));
    }

    #[test]
    fn test_missing_icon_defaults() {
        let json = r#"{"id":"b2","title":"Inbox"}"#;
        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.icon, DEFAULT_BOARD_ICON);
        assert_eq!(board.background, None);
    }
}
