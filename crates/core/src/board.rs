//! Reward board model
//!
//! A board is a fixed catalog of categories and rewards plus the layout: which
//! rewards have been dropped into which category, in drop order. The layout is
//! what gets persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

pub type CategoryId = String;
pub type RewardId = String;

/// A catalog entry (category or reward)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub name: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// The known categories (drop targets) and rewards (draggable items)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Entry>,
    rewards: Vec<Entry>,
}

impl Catalog {
    pub fn new(categories: Vec<Entry>, rewards: Vec<Entry>) -> Self {
        Self { categories, rewards }
    }

    pub fn categories(&self) -> &[Entry] {
        &self.categories
    }

    pub fn rewards(&self) -> &[Entry] {
        &self.rewards
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    pub fn has_reward(&self, id: &str) -> bool {
        self.rewards.iter().any(|r| r.id == id)
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    pub fn reward_name(&self, id: &str) -> Option<&str> {
        self.rewards.iter().find(|r| r.id == id).map(|r| r.name.as_str())
    }
}

/// Category to reward list mapping, serialized as a plain JSON object:
/// `{"c1": ["r1", "r3"], "c2": []}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(BTreeMap<CategoryId, Vec<RewardId>>);

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        serde_json::from_str(json).map_err(|e| BoardError::Layout(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BoardError> {
        serde_json::to_string(self).map_err(|e| BoardError::Layout(e.to_string()))
    }

    pub fn get(&self, category: &str) -> &[RewardId] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &Vec<RewardId>)> {
        self.0.iter()
    }

    /// Total number of placed rewards across all categories
    pub fn placed(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.placed() == 0
    }

    fn insert(&mut self, category: &str, reward: &str) -> bool {
        let rewards = self.0.entry(category.to_string()).or_default();
        if rewards.iter().any(|r| r == reward) {
            return false;
        }
        rewards.push(reward.to_string());
        true
    }

    fn insert_at(&mut self, category: &str, index: usize, reward: &str) -> bool {
        let rewards = self.0.entry(category.to_string()).or_default();
        if rewards.iter().any(|r| r == reward) {
            return false;
        }
        let index = index.min(rewards.len());
        rewards.insert(index, reward.to_string());
        true
    }

    /// Removes the reward but keeps the (possibly empty) category key
    fn remove(&mut self, category: &str, reward: &str) -> bool {
        match self.0.get_mut(category) {
            Some(rewards) => match rewards.iter().position(|r| r == reward) {
                Some(index) => {
                    rewards.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}

/// Outcome of replaying a persisted layout onto a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub placed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    catalog: Catalog,
    layout: Layout,
}

impl Board {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, layout: Layout::new() }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Put `reward` at the end of `category`. Returns false if it is
    /// already there.
    pub fn place(&mut self, category: &str, reward: &str) -> bool {
        self.layout.insert(category, reward)
    }

    /// Put `reward` at `index` within `category`, or at the end if the
    /// category is shorter. Returns false if it is already there.
    pub fn insert_at(&mut self, category: &str, index: usize, reward: &str) -> bool {
        self.layout.insert_at(category, index, reward)
    }

    pub fn remove(&mut self, category: &str, reward: &str) -> bool {
        self.layout.remove(category, reward)
    }

    pub fn position(&self, category: &str, reward: &str) -> Option<usize> {
        self.layout.get(category).iter().position(|r| r == reward)
    }

    pub fn contains(&self, category: &str, reward: &str) -> bool {
        self.layout.get(category).iter().any(|r| r == reward)
    }

    pub fn rewards_in(&self, category: &str) -> &[RewardId] {
        self.layout.get(category)
    }

    pub fn reset(&mut self) {
        self.layout = Layout::new();
    }

    /// Replay a persisted layout. Unknown categories, unknown rewards and
    /// duplicates are skipped rather than failing the whole restore.
    pub fn restore(&mut self, layout: &Layout) -> RestoreReport {
        let mut report = RestoreReport::default();

        for (category, rewards) in layout.iter() {
            if !self.catalog.has_category(category) {
                log::warn!("restore: unknown category '{}', skipping {} reward(s)", category, rewards.len());
                report.skipped += rewards.len();
                continue;
            }
            for reward in rewards {
                if !self.catalog.has_reward(reward) {
                    log::warn!("restore: unknown reward '{}' in category '{}'", reward, category);
                    report.skipped += 1;
                } else if self.place(category, reward) {
                    report.placed += 1;
                } else {
                    log::warn!("restore: duplicate reward '{}' in category '{}'", reward, category);
                    report.skipped += 1;
                }
            }
        }

        report
    }
}
