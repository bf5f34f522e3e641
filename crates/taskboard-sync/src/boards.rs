//! The user's boards and which one is selected.

use taskboard_domain::{Board, BoardId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDirectory {
    boards: Vec<Board>,
    selected: Option<BoardId>,
}

impl BoardDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a fresh board list. The selection survives if its board is still
    /// listed, otherwise the first board is selected.
    pub fn replace(&mut self, boards: Vec<Board>) {
        self.boards = boards;
        let still_listed = self
            .selected
            .as_deref()
            .is_some_and(|id| self.get(id).is_some());
        if !still_listed {
            self.selected = self.boards.first().map(|b| b.id.clone());
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn get(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    pub fn selected(&self) -> Option<&Board> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn select(&mut self, board_id: &str) -> bool {
        if self.get(board_id).is_none() {
            return false;
        }
        self.selected = Some(board_id.to_string());
        true
    }

    /// Replace a board in place, or append and select it.
    pub fn upsert(&mut self, board: Board) {
        match self.boards.iter_mut().find(|b| b.id == board.id) {
            Some(existing) => *existing = board,
            None => {
                self.selected = Some(board.id.clone());
                self.boards.push(board);
            }
        }
    }

    /// Remove a board. Removing the selected board selects the first one
    /// left.
    pub fn remove(&mut self, board_id: &str) -> Option<Board> {
        let index = self.boards.iter().position(|b| b.id == board_id)?;
        let removed = self.boards.remove(index);
        if self.selected.as_deref() == Some(board_id) {
            self.selected = self.boards.first().map(|b| b.id.clone());
        }
        Some(removed)
    }
}
