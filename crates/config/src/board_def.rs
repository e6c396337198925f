// Board definitions: the categories and rewards a board offers
// Loaded from TOML, e.g. ~/.config/rewardboard/board.toml

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rewardboard_core::{Catalog, Entry};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    /// Display name, defaults to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ItemDef {
    fn to_entry(&self) -> Entry {
        Entry::new(self.id.clone(), self.name.clone().unwrap_or_else(|| self.id.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefinition {
    #[serde(rename = "category", default)]
    pub categories: Vec<ItemDef>,
    #[serde(rename = "reward", default)]
    pub rewards: Vec<ItemDef>,
}

impl BoardDefinition {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let def: BoardDefinition =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        def.validate()?;
        Ok(def)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Validation("at least one category is required".into()));
        }

        for (kind, items) in [("category", &self.categories), ("reward", &self.rewards)] {
            let mut seen = HashSet::new();
            for item in items {
                let id = item.id.trim();
                if id.is_empty() {
                    return Err(ConfigError::Validation(format!("{kind} id must not be empty")));
                }
                if id != item.id || id.contains(char::is_whitespace) {
                    return Err(ConfigError::Validation(format!(
                        "{kind} id '{}' must not contain whitespace",
                        item.id
                    )));
                }
                if !seen.insert(id) {
                    return Err(ConfigError::Validation(format!("duplicate {kind} id '{id}'")));
                }
            }
        }

        Ok(())
    }

    pub fn to_catalog(&self) -> Catalog {
        Catalog::new(
            self.categories.iter().map(ItemDef::to_entry).collect(),
            self.rewards.iter().map(ItemDef::to_entry).collect(),
        )
    }

    /// Built-in board used when no board file is configured
    pub fn sample() -> Self {
        let item = |id: &str, name: &str| ItemDef { id: id.to_string(), name: Some(name.to_string()) };
        Self {
            categories: vec![
                item("c1", "Bronze"),
                item("c2", "Silver"),
                item("c3", "Gold"),
            ],
            rewards: vec![
                item("r1", "Free coffee"),
                item("r2", "Team lunch"),
                item("r3", "Extra day off"),
                item("r4", "Gift card"),
                item("r5", "Conference ticket"),
            ],
        }
    }
}
