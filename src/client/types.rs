//! Type definitions for the character-window API.
//!
//! Only the fields the aggregator and recipes read are modelled; everything
//! else in the payloads is ignored by serde.
//!
//! ## Key Types
//!
//! - [`Character`] - character summary from `get-characters`
//! - [`Item`] - an item snapshot from inventories and stash tabs
//! - [`StashTab`] - tab descriptor from `get-stash-items?tabs=1`
//! - [`LocatedItem`] - an [`Item`] tagged with where it was found

use serde::{Deserialize, Serialize};

/// Character summary as returned by `/character-window/get-characters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub league: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
}

/// Item classification carried by `frameType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Unique,
    /// Gems, currency, divination cards and other special frames.
    Other(u8),
}

impl From<u8> for Rarity {
    fn from(frame_type: u8) -> Self {
        match frame_type {
            0 => Rarity::Normal,
            1 => Rarity::Magic,
            2 => Rarity::Rare,
            3 => Rarity::Unique,
            other => Rarity::Other(other),
        }
    }
}

/// A single item snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    /// Item name; empty for normal items.
    #[serde(default)]
    pub name: String,
    pub type_line: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub frame_type: u8,
    /// Container slot, e.g. `MainInventory`, `Flask`, `Stash3`.
    #[serde(default)]
    pub inventory_id: Option<String>,
    #[serde(default)]
    pub x: Option<u32>,
    #[serde(default)]
    pub y: Option<u32>,
    #[serde(default)]
    pub properties: Vec<ItemProperty>,
}

impl Item {
    pub fn rarity(&self) -> Rarity {
        Rarity::from(self.frame_type)
    }

    pub fn property(&self, name: &str) -> Option<&ItemProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Named item property. Values come over the wire as `[text, style]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProperty {
    pub name: String,
    #[serde(default)]
    pub values: Vec<PropertyValue>,
    #[serde(default)]
    pub display_mode: Option<u8>,
    #[serde(rename = "type", default)]
    pub kind: Option<u32>,
}

impl ItemProperty {
    /// Displayed text of the first value, e.g. `+20%`.
    pub fn display_value(&self) -> Option<&str> {
        self.values.first().map(|v| v.0.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue(pub String, pub i64);

/// Body of `/character-window/get-items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterItems {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Stash tab descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StashTab {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "i")]
    pub index: u32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body of `/character-window/get-stash-items`. `tabs` is only populated
/// when the request asks for the tab list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashItems {
    #[serde(default)]
    pub num_tabs: Option<u32>,
    #[serde(default)]
    pub tabs: Vec<StashTab>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Where an item was found during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLocation {
    Inventory { character: String },
    Stash { index: u32, name: String },
}

impl ItemLocation {
    /// `"Inventory"` for character items, the tab index for stash items.
    pub fn index_label(&self) -> String {
        match self {
            ItemLocation::Inventory { .. } => "Inventory".to_string(),
            ItemLocation::Stash { index, .. } => index.to_string(),
        }
    }

    /// Owning character name or stash tab name.
    pub fn name(&self) -> &str {
        match self {
            ItemLocation::Inventory { character } => character,
            ItemLocation::Stash { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedItem {
    pub item: Item,
    pub location: ItemLocation,
}
