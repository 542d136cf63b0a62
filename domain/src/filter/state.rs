//! Filter UI state
//!
//! Plain serializable struct mutated by the panel reducer. The compiled form
//! lives in [`crate::filter::compiler`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chip label that disables partner filtering
pub const ALL_CHIP: &str = "All";

/// Single-select filter chips, in display order
pub const FILTER_CHIPS: [&str; 6] = [
    ALL_CHIP,
    "Child Welfare (CW)",
    "Probation",
    "Behavioral Health (BH)",
    "Developmental Services",
    "Education",
];

pub const COUNTY_OPTIONS: [&str; 5] = ["County", "Alameda", "Los Angeles", "Sacramento", "San Diego"];

pub const INSURANCE_OPTIONS: [&str; 5] = [
    "Insurance",
    "Private",
    "MediCal Managed Care",
    "MediCal FFS",
    "Other",
];

pub const CW_OPTIONS: [&str; 4] = ["Child Welfare", "Option 1", "Option 2", "Option 3"];

/// Multi-select facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    County,
    Insurance,
    ChildWelfare,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::County, Facet::Insurance, Facet::ChildWelfare];

    /// All options; the first is the placeholder sentinel
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Facet::County => &COUNTY_OPTIONS,
            Facet::Insurance => &INSURANCE_OPTIONS,
            Facet::ChildWelfare => &CW_OPTIONS,
        }
    }

    /// Placeholder shown for an empty selection; selecting it clears
    pub fn sentinel(&self) -> &'static str {
        self.options()[0]
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sentinel())
    }
}

/// Apply a multi-select click to `selected`
///
/// The sentinel clears the list; any other value toggles membership,
/// appending when added.
pub fn toggle_multi(selected: &mut Vec<String>, option: &str, sentinel: &str) {
    if option == sentinel {
        selected.clear();
    } else if let Some(pos) = selected.iter().position(|v| v == option) {
        selected.remove(pos);
    } else {
        selected.retain(|v| v != sentinel);
        selected.push(option.to_string());
    }
}

/// Free text, selected chip and facet selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub selected_chip: usize,
    pub county: Vec<String>,
    pub insurance: Vec<String>,
    pub cw: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a chip by index.
    ///
    /// Returns whether the selection changed.
    pub fn select_chip(&mut self, index: usize) -> Result<bool, DomainError> {
        if index >= FILTER_CHIPS.len() {
            return Err(DomainError::ChipOutOfRange {
                index,
                len: FILTER_CHIPS.len(),
            });
        }
        let changed = self.selected_chip != index;
        self.selected_chip = index;
        Ok(changed)
    }

    pub fn chip_label(&self) -> &'static str {
        FILTER_CHIPS
            .get(self.selected_chip)
            .copied()
            .unwrap_or(ALL_CHIP)
    }

    pub fn facet(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::County => &self.county,
            Facet::Insurance => &self.insurance,
            Facet::ChildWelfare => &self.cw,
        }
    }

    pub fn toggle_facet(&mut self, facet: Facet, option: &str) {
        let list = match facet {
            Facet::County => &mut self.county,
            Facet::Insurance => &mut self.insurance,
            Facet::ChildWelfare => &mut self.cw,
        };
        toggle_multi(list, option, facet.sentinel());
    }

    /// The filter event handed to downstream consumers
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search_text.clone(),
            county: self.county.clone(),
            insurance: self.insurance.clone(),
            cw: self.cw.clone(),
            selected_filter: self.chip_label().to_string(),
        }
    }
}

/// Filter state with the chip resolved to its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search: String,
    pub county: Vec<String>,
    pub insurance: Vec<String>,
    pub cw: Vec<String>,
    pub selected_filter: String,
}

impl FilterCriteria {
    /// Criteria that match every resource
    pub fn match_all() -> Self {
        FilterState::default().criteria()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_chip(mut self, label: impl Into<String>) -> Self {
        self.selected_filter = label.into();
        self
    }
}
