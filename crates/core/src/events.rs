//! Drag-and-drop event shapes delivered to the controller

use std::fmt;

use crate::board::{CategoryId, RewardId};

/// Where a dragged reward came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropSource {
    /// The rewards swimlane. Dragging clones; the palette never changes.
    Palette,
    Category(CategoryId),
}

/// A reward hovering over a category, before it is dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOver {
    pub reward: RewardId,
    pub to: CategoryId,
}

/// A reward dropped into a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub reward: RewardId,
    pub from: DropSource,
    pub to: CategoryId,
}

impl DropEvent {
    pub fn from_palette(reward: impl Into<RewardId>, to: impl Into<CategoryId>) -> Self {
        Self { reward: reward.into(), from: DropSource::Palette, to: to.into() }
    }

    pub fn between(
        reward: impl Into<RewardId>,
        from: impl Into<CategoryId>,
        to: impl Into<CategoryId>,
    ) -> Self {
        Self {
            reward: reward.into(),
            from: DropSource::Category(from.into()),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Reward added to the target category
    Placed,
    /// Reward moved out of its source category into the target
    Moved,
    /// Target already holds the reward; the dropped copy is discarded
    Duplicate,
    /// Drop could not be applied (unknown ids, reward not in source)
    Rejected(String),
}

impl DropOutcome {
    /// Whether the drop changed the board and was recorded in the history
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Placed | Self::Moved)
    }
}

impl fmt::Display for DropOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed => write!(f, "placed"),
            Self::Moved => write!(f, "moved"),
            Self::Duplicate => write!(f, "duplicate, discarded"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}
