//! The active board: entity cache and display order as two slices of one
//! state value, shared behind a lock.

use crate::cache::EntityCache;
use crate::drag::DragOutcome;
use crate::optimistic::Checkpoint;
use crate::order::{OrderViolation, OrderedCollection, SequenceKey};
use parking_lot::Mutex;
use std::sync::Arc;
use taskboard_domain::{BoardId, BoardSnapshot, Column, Task, TaskFilter};

pub type SharedBoardState = Arc<Mutex<BoardState>>;

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    board_id: Option<BoardId>,
    cache: EntityCache,
    order: OrderedCollection,
    stale: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBoardState {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Replace everything with a freshly fetched board.
    pub fn load(&mut self, snapshot: BoardSnapshot) {
        self.board_id = Some(snapshot.board_id.clone());
        self.cache.replace(snapshot);
        self.reinitialize();
        self.stale = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut EntityCache {
        &mut self.cache
    }

    pub fn order(&self) -> &OrderedCollection {
        &self.order
    }

    /// Set when a failed request left local order that the server may not
    /// share. Cleared by the next [`load`](Self::load).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Re-derive the order from the cache after entities were added or
    /// removed.
    pub fn reinitialize(&mut self) {
        self.order
            .initialize_from_entities(self.cache.columns(), self.cache.tasks_by_column());
    }

    /// Apply a resolved drag to the order and mirror it into the cache.
    /// Returns `false` if nothing changed.
    pub fn apply(&mut self, outcome: &DragOutcome) -> bool {
        let changed = match outcome {
            DragOutcome::MoveColumn { from, to, .. } => self.order.move_column(*from, *to),
            DragOutcome::ReorderTasks {
                column_id, from, to, ..
            } => self.order.move_task_within_column(column_id, *from, *to),
            DragOutcome::MoveTaskAcross {
                task_id,
                from_column,
                to_column,
                target_index,
            } => self
                .order
                .move_task_across_columns(task_id, from_column, to_column, *target_index),
            DragOutcome::NoOp | DragOutcome::Rejected(_) => false,
        };
        if changed {
            self.cache.align_to(&self.order);
        }
        changed
    }

    pub fn columns(&self) -> Vec<&Column> {
        self.cache.columns_in_order(&self.order)
    }

    pub fn tasks(&self, column_id: &str) -> Vec<&Task> {
        self.cache.tasks_in_order(&self.order, column_id)
    }

    /// A column's tasks in display order, narrowed by `filter`. The order
    /// itself is never filtered.
    pub fn visible_tasks(&self, column_id: &str, filter: &dyn TaskFilter) -> Vec<&Task> {
        self.tasks(column_id)
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Order invariants, plus agreement between order and cache on which
    /// columns and tasks exist and where each task lives.
    pub fn check_consistency(&self) -> Result<(), OrderViolation> {
        self.order.check_invariants()?;

        for column in self.cache.columns() {
            if !self.order.contains_column(&column.id) {
                return Err(OrderViolation::NotOrdered(column.id.clone()));
            }
        }
        for column_id in self.order.column_order() {
            if self.cache.column(column_id).is_none() {
                return Err(OrderViolation::NotCached(column_id.clone()));
            }
            let ordered = self.order.tasks_in(column_id).unwrap_or(&[]);
            let cached = self.cache.tasks_in(column_id);
            if let Some(task) = cached.iter().find(|t| !ordered.contains(&t.id)) {
                return Err(OrderViolation::NotOrdered(task.id.clone()));
            }
            if let Some(id) = ordered.iter().find(|id| !cached.iter().any(|t| &t.id == *id)) {
                return Err(OrderViolation::NotCached(id.clone()));
            }
        }
        Ok(())
    }
}

/// Captures the sequences a drag outcome touches, plus the board they
/// belong to.
#[derive(Debug, Clone)]
pub struct OrderCheckpoint {
    keys: Vec<SequenceKey>,
}

impl OrderCheckpoint {
    pub fn for_outcome(outcome: &DragOutcome) -> Self {
        let keys = match outcome {
            DragOutcome::MoveColumn { .. } => vec![SequenceKey::Columns],
            DragOutcome::ReorderTasks { column_id, .. } => {
                vec![SequenceKey::Tasks(column_id.clone())]
            }
            DragOutcome::MoveTaskAcross {
                from_column,
                to_column,
                ..
            } => vec![
                SequenceKey::Tasks(from_column.clone()),
                SequenceKey::Tasks(to_column.clone()),
            ],
            DragOutcome::NoOp | DragOutcome::Rejected(_) => Vec::new(),
        };
        Self { keys }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOrder {
    board_id: Option<BoardId>,
    sequences: Vec<Option<Vec<String>>>,
}

impl Checkpoint<BoardState> for OrderCheckpoint {
    type Saved = SavedOrder;

    fn capture(&self, state: &BoardState) -> SavedOrder {
        SavedOrder {
            board_id: state.board_id.clone(),
            sequences: self.keys.iter().map(|key| state.order.sequence(key)).collect(),
        }
    }

    fn restore(&self, state: &mut BoardState, saved: SavedOrder) {
        if saved.board_id != state.board_id {
            return;
        }
        for (key, sequence) in self.keys.iter().zip(saved.sequences) {
            if let Some(sequence) = sequence {
                state.order.restore_sequence(key, sequence);
            }
        }
        state.cache.align_to(&state.order);
    }
}
