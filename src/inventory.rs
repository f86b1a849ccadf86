//! Builds the item collections recipes run against.
//!
//! Requests are issued one after another: the client spaces every uncached
//! request by the configured delay, and fanning out would defeat that.

use crate::client::{ItemLocation, LocatedItem, PoeClient};
use crate::error::Result;

/// Inventory slot holding a character's carried items.
pub const MAIN_INVENTORY: &str = "MainInventory";

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterInventory {
    pub name: String,
    pub items: Vec<LocatedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StashTabContents {
    pub index: u32,
    pub name: String,
    pub items: Vec<LocatedItem>,
}

/// Everything fetched in one run, in API order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventories {
    pub characters: Vec<CharacterInventory>,
    pub stash_tabs: Vec<StashTabContents>,
}

impl Inventories {
    /// Character items first, then stash items, each in fetch order.
    pub fn items(&self) -> impl Iterator<Item = &LocatedItem> {
        self.characters
            .iter()
            .flat_map(|c| c.items.iter())
            .chain(self.stash_tabs.iter().flat_map(|t| t.items.iter()))
    }
}

pub async fn aggregate(
    client: &PoeClient,
    account: &str,
    realm: &str,
    league: &str,
) -> Result<Inventories> {
    let characters = client.fetch_characters(account, realm).await?;
    tracing::info!("Account {} has {} characters", account, characters.len());

    let mut inventories = Inventories::default();

    for character in characters.into_iter().filter(|c| c.league == league) {
        let items = client
            .fetch_character_inventory(account, realm, &character.name)
            .await?
            .into_iter()
            .filter(|item| item.inventory_id.as_deref() == Some(MAIN_INVENTORY))
            .map(|item| LocatedItem {
                item,
                location: ItemLocation::Inventory {
                    character: character.name.clone(),
                },
            })
            .collect::<Vec<_>>();

        tracing::debug!("{} carries {} items", character.name, items.len());
        inventories.characters.push(CharacterInventory {
            name: character.name,
            items,
        });
    }

    let tabs = client.fetch_stash_tab_list(account, realm, league).await?;
    tracing::info!("{} league stash has {} tabs", league, tabs.len());

    for tab in tabs {
        let items = client
            .fetch_stash_tab_items(account, realm, league, tab.index)
            .await?
            .into_iter()
            .map(|item| LocatedItem {
                item,
                location: ItemLocation::Stash {
                    index: tab.index,
                    name: tab.name.clone(),
                },
            })
            .collect::<Vec<_>>();

        tracing::debug!("Tab {} ({}) holds {} items", tab.index, tab.name, items.len());
        inventories.stash_tabs.push(StashTabContents {
            index: tab.index,
            name: tab.name,
            items,
        });
    }

    Ok(inventories)
}
