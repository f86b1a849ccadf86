//! Glassblower's Bauble recipe: flasks whose qualities add up to 40%, or a
//! single normal flask at 20% quality.
//!
//! The search is a greedy scan with one step of lookback, not an exact
//! subset-sum solver. For each anchor flask taken from the front of the pool
//! the rest of the pool is scanned in order:
//!
//! - a flask that lands the running total exactly on the target closes the group;
//! - a flask that still leaves room for the smallest flask after it is kept
//!   as a tentative pick;
//! - otherwise the flask replaces the most recent tentative pick.
//!
//! Anchors that never reach the target are dropped; they are not retried
//! against later anchors. Members of a closed group leave the pool.

use serde::Serialize;

use crate::client::{ItemLocation, LocatedItem, Rarity};
use crate::error::{Error, Result};
use crate::inventory::Inventories;

pub const TARGET_QUALITY: u32 = 40;
/// Quality of a flask that completes the recipe on its own when normal.
pub const MAX_QUALITY: u32 = 20;

const QUALITY_PROPERTY: &str = "Quality";

#[derive(Debug, Clone, PartialEq)]
pub struct FlaskCandidate {
    pub type_line: String,
    pub rarity: Rarity,
    pub location: ItemLocation,
    pub quality: u32,
}

impl FlaskCandidate {
    /// `Ok(None)` for items that are not flasks or carry no Quality property.
    pub fn from_item(located: &LocatedItem) -> Result<Option<Self>> {
        let item = &located.item;
        if !item.type_line.contains("Flask") {
            return Ok(None);
        }
        let Some(property) = item.property(QUALITY_PROPERTY) else {
            return Ok(None);
        };

        let raw = property.display_value().unwrap_or_default();
        let quality = parse_quality(raw).ok_or_else(|| Error::ParseFailure {
            type_line: item.type_line.clone(),
            value: raw.to_string(),
        })?;

        Ok(Some(Self {
            type_line: item.type_line.clone(),
            rarity: item.rarity(),
            location: located.location.clone(),
            quality,
        }))
    }

    fn completes_alone(&self) -> bool {
        self.quality == MAX_QUALITY && self.rarity == Rarity::Normal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlaskGroup {
    pub flasks: Vec<FlaskCandidate>,
}

impl FlaskGroup {
    pub fn total_quality(&self) -> u32 {
        self.flasks.iter().map(|f| f.quality).sum()
    }

    pub fn entries(&self) -> Vec<GroupEntry> {
        self.flasks.iter().map(GroupEntry::from).collect()
    }
}

/// One line of a printed group: what the flask is, where it is, and the
/// stash search string that highlights it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub type_line: String,
    pub location_index: String,
    pub location_name: String,
    pub search: String,
}

impl From<&FlaskCandidate> for GroupEntry {
    fn from(flask: &FlaskCandidate) -> Self {
        Self {
            type_line: flask.type_line.clone(),
            location_index: flask.location.index_label(),
            location_name: flask.location.name().to_string(),
            search: format!("+{}%", flask.quality),
        }
    }
}

/// Leading integer of a displayed quality such as `+17%`.
pub fn parse_quality(display: &str) -> Option<u32> {
    let digits: String = display
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Every quality-bearing flask, character inventories first, then stash tabs.
pub fn flask_candidates(inventories: &Inventories) -> Result<Vec<FlaskCandidate>> {
    let mut candidates = Vec::new();
    for located in inventories.items() {
        if let Some(candidate) = FlaskCandidate::from_item(located)? {
            candidates.push(candidate);
        }
    }
    Ok(candidates)
}

/// Disjoint groups in discovery order. `candidates` is left untouched.
pub fn find_groups(candidates: &[FlaskCandidate]) -> Vec<FlaskGroup> {
    let mut pool = candidates.to_vec();
    let mut groups = Vec::new();

    while !pool.is_empty() {
        let anchor = pool.remove(0);

        if anchor.completes_alone() {
            groups.push(FlaskGroup { flasks: vec![anchor] });
            continue;
        }

        let Some(picks) = complete_group(anchor.quality, &pool) else {
            continue;
        };

        let (taken, rest) = take_picks(pool, &picks);
        pool = rest;

        let mut flasks = Vec::with_capacity(taken.len() + 1);
        flasks.push(anchor);
        flasks.extend(taken);
        groups.push(FlaskGroup { flasks });
    }

    groups
}

/// Indices into `rest` that bring `anchor` to the target, ascending.
fn complete_group(anchor: u32, rest: &[FlaskCandidate]) -> Option<Vec<usize>> {
    let mut sum = anchor;
    let mut picks: Vec<usize> = Vec::new();

    // Sums saturate: a quality near u32::MAX simply never fits.
    for (i, next) in rest.iter().enumerate() {
        let with_next = sum.saturating_add(next.quality);
        if with_next == TARGET_QUALITY {
            picks.push(i);
            return Some(picks);
        }

        let smallest_after = rest[i + 1..].iter().map(|c| c.quality).min().unwrap_or(0);
        if with_next.saturating_add(smallest_after) <= TARGET_QUALITY {
            picks.push(i);
            sum = with_next;
        } else if let Some(previous) = picks.pop() {
            // The anchor itself is never swapped out.
            sum = (sum - rest[previous].quality).saturating_add(next.quality);
            picks.push(i);
        }
    }

    None
}

fn take_picks(pool: Vec<FlaskCandidate>, picks: &[usize]) -> (Vec<FlaskCandidate>, Vec<FlaskCandidate>) {
    let (taken, rest): (Vec<_>, Vec<_>) = pool
        .into_iter()
        .enumerate()
        .partition(|(i, _)| picks.contains(i));
    (
        taken.into_iter().map(|(_, c)| c).collect(),
        rest.into_iter().map(|(_, c)| c).collect(),
    )
}
