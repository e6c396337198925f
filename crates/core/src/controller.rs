//! Board controller: the event handlers of the reward board.
//!
//! Owns the board, its undo/redo history and the blob store. Every
//! user action that changes the layout is applied here first and then
//! recorded as a reversible command; the undo/redo buttons only ever
//! reflect [`History::affordances`].

use crate::actions::{MoveReward, PlaceReward, RemoveReward};
use crate::board::{Board, Catalog, Layout, RestoreReport};
use crate::error::BoardError;
use crate::events::{DragOver, DropEvent, DropOutcome, DropSource};
use crate::history::{Affordances, Command, History};
use crate::store::{BlobStore, LAYOUT_KEY};

pub struct BoardController<S> {
    board: Board,
    history: History<Board>,
    store: S,
    key: String,
}

impl<S: BlobStore> BoardController<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            board: Board::new(catalog),
            history: History::new(),
            store,
            key: LAYOUT_KEY.to_string(),
        }
    }

    /// Use a storage key other than [`LAYOUT_KEY`]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History<Board> {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Drop veto: false when the target category already holds the reward.
    pub fn on_move(&self, evt: &DragOver) -> bool {
        !self.board.contains(&evt.to, &evt.reward)
    }

    /// Apply a drop and record it.
    pub fn on_add(&mut self, evt: DropEvent) -> DropOutcome {
        let catalog = self.board.catalog();
        if !catalog.has_reward(&evt.reward) {
            return DropOutcome::Rejected(format!("unknown reward '{}'", evt.reward));
        }
        if !catalog.has_category(&evt.to) {
            return DropOutcome::Rejected(format!("unknown category '{}'", evt.to));
        }
        if self.board.contains(&evt.to, &evt.reward) {
            log::debug!("drop of '{}' into '{}' discarded as duplicate", evt.reward, evt.to);
            return DropOutcome::Duplicate;
        }

        match evt.from {
            DropSource::Palette => {
                self.board.place(&evt.to, &evt.reward);
                self.record(PlaceReward { category: evt.to, reward: evt.reward });
                DropOutcome::Placed
            }
            DropSource::Category(from) => {
                if !self.board.contains(&from, &evt.reward) {
                    return DropOutcome::Rejected(format!(
                        "reward '{}' is not in category '{}'",
                        evt.reward, from
                    ));
                }
                let mut command = MoveReward::new(from, evt.to, evt.reward);
                command.execute(&mut self.board);
                self.record(command);
                DropOutcome::Moved
            }
        }
    }

    /// The remove button on a placed reward.
    pub fn remove_reward(&mut self, category: &str, reward: &str) -> Result<(), BoardError> {
        if !self.board.catalog().has_category(category) {
            return Err(BoardError::UnknownCategory(category.to_string()));
        }
        if !self.board.catalog().has_reward(reward) {
            return Err(BoardError::UnknownReward(reward.to_string()));
        }
        if !self.board.contains(category, reward) {
            return Err(BoardError::NotPlaced {
                category: category.to_string(),
                reward: reward.to_string(),
            });
        }
        let mut command = RemoveReward::new(category, reward);
        command.execute(&mut self.board);
        self.record(command);
        Ok(())
    }

    fn record<C: Command<Board> + 'static>(&mut self, command: C) {
        let id = self.history.next_id();
        self.history.add_command(id, command);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.board)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.board)
    }

    pub fn affordances(&self) -> Affordances {
        self.history.affordances()
    }

    /// Persist the current layout under the storage key.
    pub fn save(&mut self) -> Result<(), BoardError> {
        let json = self.board.layout().to_json()?;
        self.store.save(&self.key, &json)?;
        log::info!("saved layout ({} reward(s)) under '{}'", self.board.layout().placed(), self.key);
        Ok(())
    }

    /// Whether a saved layout exists (the clear button is shown)
    pub fn has_saved(&self) -> Result<bool, BoardError> {
        Ok(self.store.contains(&self.key)?)
    }

    /// Remove the saved layout and start over with an empty board and history.
    pub fn clear_saved(&mut self) -> Result<(), BoardError> {
        self.store.remove(&self.key)?;
        self.board.reset();
        self.history.clear();
        log::info!("cleared saved layout '{}'", self.key);
        Ok(())
    }

    /// Load the saved layout, if any, onto a fresh board. History starts empty.
    pub fn restore(&mut self) -> Result<Option<RestoreReport>, BoardError> {
        self.board.reset();
        self.history.clear();

        let Some(json) = self.store.load(&self.key)? else {
            return Ok(None);
        };
        let layout = Layout::from_json(&json)?;
        let report = self.board.restore(&layout);
        log::info!(
            "restored layout '{}': {} placed, {} skipped",
            self.key,
            report.placed,
            report.skipped
        );
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Entry;
    use crate::store::MemoryStore;

    fn controller() -> BoardController<MemoryStore> {
        BoardController::new(
            Catalog::new(
                vec![Entry::new("c1", "Gold"), Entry::new("c2", "Silver"), Entry::new("c3", "Bronze")],
                vec![Entry::new("r1", "Coffee"), Entry::new("r2", "Lunch"), Entry::new("r3", "Day off")],
            ),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_palette_drop_then_undo_redo() {
        let mut ctl = controller();
        assert_eq!(ctl.on_add(DropEvent::from_palette("r1", "c1")), DropOutcome::Placed);
        assert!(ctl.board().contains("c1", "r1"));
        assert_eq!(ctl.affordances(), Affordances { undo: true, redo: false });

        assert!(ctl.undo());
        assert!(!ctl.board().contains("c1", "r1"));
        assert_eq!(ctl.affordances(), Affordances { undo: false, redo: true });

        assert!(ctl.redo());
        assert!(ctl.board().contains("c1", "r1"));
        assert!(!ctl.redo());
    }

    #[test]
    fn test_duplicate_drop_not_recorded() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        assert!(!ctl.on_move(&DragOver { reward: "r1".into(), to: "c1".into() }));
        assert!(ctl.on_move(&DragOver { reward: "r1".into(), to: "c2".into() }));

        let outcome = ctl.on_add(DropEvent::from_palette("r1", "c1"));
        assert_eq!(outcome, DropOutcome::Duplicate);
        assert!(!outcome.is_recorded());
        assert_eq!(ctl.history().len(), 1);
        assert_eq!(ctl.board().rewards_in("c1"), ["r1"]);
    }

    #[test]
    fn test_move_is_single_command() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        assert_eq!(ctl.on_add(DropEvent::between("r1", "c1", "c2")), DropOutcome::Moved);
        assert_eq!(ctl.history().len(), 2);
        assert!(ctl.board().rewards_in("c1").is_empty());
        assert_eq!(ctl.board().rewards_in("c2"), ["r1"]);

        assert!(ctl.undo());
        assert_eq!(ctl.board().rewards_in("c1"), ["r1"]);
        assert!(ctl.board().rewards_in("c2").is_empty());
    }

    #[test]
    fn test_move_between_duplicates_keeps_source() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.on_add(DropEvent::from_palette("r1", "c2"));
        assert_eq!(ctl.on_add(DropEvent::between("r1", "c1", "c2")), DropOutcome::Duplicate);
        assert!(ctl.board().contains("c1", "r1"));
    }

    #[test]
    fn test_rejected_drops() {
        let mut ctl = controller();
        assert!(matches!(ctl.on_add(DropEvent::from_palette("r9", "c1")), DropOutcome::Rejected(_)));
        assert!(matches!(ctl.on_add(DropEvent::from_palette("r1", "c9")), DropOutcome::Rejected(_)));
        assert!(matches!(ctl.on_add(DropEvent::between("r1", "c1", "c2")), DropOutcome::Rejected(_)));
        assert!(ctl.history().is_empty());
    }

    #[test]
    fn test_remove_reward() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r2", "c3"));
        ctl.remove_reward("c3", "r2").unwrap();
        assert!(!ctl.board().contains("c3", "r2"));

        assert!(matches!(ctl.remove_reward("c3", "r2"), Err(BoardError::NotPlaced { .. })));
        assert!(matches!(ctl.remove_reward("c9", "r2"), Err(BoardError::UnknownCategory(_))));
        assert!(matches!(ctl.remove_reward("c3", "r9"), Err(BoardError::UnknownReward(_))));

        assert!(ctl.undo());
        assert!(ctl.board().contains("c3", "r2"));
    }

    #[test]
    fn test_remove_then_undo_restores_exact_layout() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.on_add(DropEvent::from_palette("r2", "c1"));
        let before = ctl.board().layout().clone();

        ctl.remove_reward("c1", "r1").unwrap();
        assert_eq!(ctl.board().rewards_in("c1"), ["r2"]);
        assert!(ctl.undo());
        assert_eq!(ctl.board().layout(), &before);
        assert!(ctl.redo());
        assert_eq!(ctl.board().rewards_in("c1"), ["r2"]);
    }

    #[test]
    fn test_undone_move_keeps_order_across_undo_redo() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.on_add(DropEvent::from_palette("r2", "c1"));
        ctl.on_add(DropEvent::between("r1", "c1", "c2"));
        assert!(ctl.undo());
        assert_eq!(ctl.board().rewards_in("c1"), ["r1", "r2"]);

        let snapshot = ctl.board().layout().clone();
        assert!(ctl.undo());
        assert!(ctl.redo());
        assert_eq!(ctl.board().layout(), &snapshot);
    }

    #[test]
    fn test_new_action_after_undo_drops_redo() {
        let mut ctl = controller();
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.on_add(DropEvent::from_palette("r2", "c1"));
        ctl.undo();
        ctl.on_add(DropEvent::from_palette("r3", "c2"));

        assert!(!ctl.redo());
        assert_eq!(ctl.history().len(), 2);
        assert_eq!(ctl.board().rewards_in("c1"), ["r1"]);
        assert_eq!(ctl.board().rewards_in("c2"), ["r3"]);
    }

    #[test]
    fn test_save_restore_clear() {
        let mut ctl = controller();
        assert!(!ctl.has_saved().unwrap());
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.on_add(DropEvent::from_palette("r3", "c1"));
        ctl.save().unwrap();
        assert!(ctl.has_saved().unwrap());

        let report = ctl.restore().unwrap().unwrap();
        assert_eq!(report, RestoreReport { placed: 2, skipped: 0 });
        assert_eq!(ctl.board().rewards_in("c1"), ["r1", "r3"]);
        // Restore starts a fresh history
        assert!(!ctl.affordances().undo);

        ctl.clear_saved().unwrap();
        assert!(!ctl.has_saved().unwrap());
        assert!(ctl.board().layout().is_empty());
        assert_eq!(ctl.restore().unwrap(), None);
    }

    #[test]
    fn test_restore_invalid_blob() {
        let mut store = MemoryStore::new();
        store.save(LAYOUT_KEY, "{broken").unwrap();
        let mut ctl = BoardController::new(Catalog::default(), store);
        assert!(matches!(ctl.restore(), Err(BoardError::Layout(_))));
        assert!(ctl.board().layout().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut ctl = controller().with_key("other");
        ctl.on_add(DropEvent::from_palette("r1", "c1"));
        ctl.save().unwrap();
        assert!(ctl.store().load("other").unwrap().is_some());
        assert!(ctl.store().load(LAYOUT_KEY).unwrap().is_none());
    }
}
