//! Reversible board commands recorded in the history

use crate::board::{Board, CategoryId, RewardId};
use crate::history::Command;

/// A reward dropped into a category (from the palette or a fresh category)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceReward {
    pub category: CategoryId,
    pub reward: RewardId,
}

impl Command<Board> for PlaceReward {
    fn execute(&mut self, board: &mut Board) {
        board.place(&self.category, &self.reward);
    }

    fn undo(&mut self, board: &mut Board) {
        board.remove(&self.category, &self.reward);
    }
}

/// A reward dragged from one category into another. Undo puts it back at
/// the index it was dragged from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReward {
    pub from: CategoryId,
    pub to: CategoryId,
    pub reward: RewardId,
    from_index: usize,
}

impl MoveReward {
    pub fn new(
        from: impl Into<CategoryId>,
        to: impl Into<CategoryId>,
        reward: impl Into<RewardId>,
    ) -> Self {
        Self { from: from.into(), to: to.into(), reward: reward.into(), from_index: 0 }
    }
}

impl Command<Board> for MoveReward {
    fn execute(&mut self, board: &mut Board) {
        if let Some(index) = board.position(&self.from, &self.reward) {
            self.from_index = index;
        }
        board.remove(&self.from, &self.reward);
        board.place(&self.to, &self.reward);
    }

    fn undo(&mut self, board: &mut Board) {
        board.remove(&self.to, &self.reward);
        board.insert_at(&self.from, self.from_index, &self.reward);
    }
}

/// A reward taken out of a category with its remove button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveReward {
    pub category: CategoryId,
    pub reward: RewardId,
    index: usize,
}

impl RemoveReward {
    pub fn new(category: impl Into<CategoryId>, reward: impl Into<RewardId>) -> Self {
        Self { category: category.into(), reward: reward.into(), index: 0 }
    }
}

impl Command<Board> for RemoveReward {
    fn execute(&mut self, board: &mut Board) {
        if let Some(index) = board.position(&self.category, &self.reward) {
            self.index = index;
        }
        board.remove(&self.category, &self.reward);
    }

    fn undo(&mut self, board: &mut Board) {
        board.insert_at(&self.category, self.index, &self.reward);
    }
}
