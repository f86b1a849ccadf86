//! Crafting recipes detected against aggregated items.
//!
//! - [`glassblower`] - flasks totalling 40% quality for a Glassblower's Bauble

pub mod glassblower;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Result;
use crate::inventory::Inventories;

pub use glassblower::{FlaskCandidate, FlaskGroup, GroupEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeKind {
    GlassblowersBauble,
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 1] = [RecipeKind::GlassblowersBauble];

    pub fn name(self) -> &'static str {
        match self {
            RecipeKind::GlassblowersBauble => "glassblowers_bauble",
        }
    }

    pub fn run(self, inventories: &Inventories) -> Result<RecipeOutcome> {
        match self {
            RecipeKind::GlassblowersBauble => {
                let candidates = glassblower::flask_candidates(inventories)?;
                tracing::debug!("{} flasks carry quality", candidates.len());
                let groups = glassblower::find_groups(&candidates);
                Ok(RecipeOutcome::from_groups(
                    groups.iter().map(FlaskGroup::entries).collect(),
                ))
            }
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recipe {0:?}")]
pub struct UnknownRecipe(pub String);

impl FromStr for RecipeKind {
    type Err = UnknownRecipe;

    /// Case-insensitive; `-` and `_` separators are optional.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "glassblowersbauble" => Ok(RecipeKind::GlassblowersBauble),
            _ => Err(UnknownRecipe(s.to_string())),
        }
    }
}

/// Result of one recipe. `NothingFound` is distinct from an empty group list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    Found(Vec<Vec<GroupEntry>>),
    NothingFound,
}

impl RecipeOutcome {
    pub fn from_groups(groups: Vec<Vec<GroupEntry>>) -> Self {
        if groups.is_empty() {
            RecipeOutcome::NothingFound
        } else {
            RecipeOutcome::Found(groups)
        }
    }
}
