//! Filter compiler and resource filter engine
//!
//! [`FilterCompiler::compile`] turns [`FilterCriteria`] into a
//! [`CompiledFilter`]: the AND of a search predicate, a chip predicate and the
//! facet slots. [`ResourceFilterEngine::apply`] keeps the matching resources in
//! their original order.
//!
//! # Chip matching
//!
//! A partner matches a target when either contains the other,
//! case-insensitively. `"MHP"` matches `"Mental Health Plan (MHP)"` and
//! `"Behavioral Health Services"` matches `"Behavioral Health"`. An unmapped
//! chip has no targets and therefore matches nothing.

use crate::core::string::contains_ignore_case;
use crate::filter::partner::PartnerMapping;
use crate::filter::state::{ALL_CHIP, Facet, FilterCriteria, FilterState};
use crate::resource::entities::Resource;

/// Anything that can accept or reject a resource
pub trait ResourcePredicate {
    fn matches(&self, resource: &Resource) -> bool;
}

impl<F> ResourcePredicate for F
where
    F: Fn(&Resource) -> bool,
{
    fn matches(&self, resource: &Resource) -> bool {
        self(resource)
    }
}

/// Free-text predicate over `service_type` and `description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    /// Lower-cased trimmed needle; `None` matches everything
    needle: Option<String>,
}

impl SearchPredicate {
    pub fn new(search: &str) -> Self {
        let trimmed = search.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }
}

impl ResourcePredicate for SearchPredicate {
    fn matches(&self, resource: &Resource) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                resource.service_type.to_lowercase().contains(needle)
                    || resource.description.to_lowercase().contains(needle)
            }
        }
    }
}

/// Partner predicate derived from the selected chip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipPredicate {
    All,
    Targets(Vec<String>),
}

impl ResourcePredicate for ChipPredicate {
    fn matches(&self, resource: &Resource) -> bool {
        match self {
            ChipPredicate::All => true,
            ChipPredicate::Targets(targets) => resource.partners.iter().any(|partner| {
                targets.iter().any(|target| {
                    contains_ignore_case(partner, target) || contains_ignore_case(target, partner)
                })
            }),
        }
    }
}

/// Multi-select facet slot
///
/// Resources carry no county/insurance/child-welfare fields yet, so every
/// slot accepts every resource regardless of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPredicate {
    pub facet: Facet,
    pub selected: Vec<String>,
}

impl ResourcePredicate for FacetPredicate {
    fn matches(&self, _resource: &Resource) -> bool {
        true
    }
}

/// AND of all filter predicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    pub search: SearchPredicate,
    pub chip: ChipPredicate,
    pub facets: Vec<FacetPredicate>,
}

impl ResourcePredicate for CompiledFilter {
    fn matches(&self, resource: &Resource) -> bool {
        self.search.matches(resource)
            && self.chip.matches(resource)
            && self.facets.iter().all(|f| f.matches(resource))
    }
}

/// Builds [`CompiledFilter`]s against a partner mapping
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    mapping: PartnerMapping,
}

impl FilterCompiler {
    pub fn new(mapping: PartnerMapping) -> Self {
        Self { mapping }
    }

    pub fn compile(&self, criteria: &FilterCriteria) -> CompiledFilter {
        let chip = if criteria.selected_filter == ALL_CHIP {
            ChipPredicate::All
        } else {
            ChipPredicate::Targets(self.mapping.targets(&criteria.selected_filter).to_vec())
        };

        let facets = vec![
            FacetPredicate {
                facet: Facet::County,
                selected: criteria.county.clone(),
            },
            FacetPredicate {
                facet: Facet::Insurance,
                selected: criteria.insurance.clone(),
            },
            FacetPredicate {
                facet: Facet::ChildWelfare,
                selected: criteria.cw.clone(),
            },
        ];

        CompiledFilter {
            search: SearchPredicate::new(&criteria.search),
            chip,
            facets,
        }
    }

    pub fn compile_state(&self, state: &FilterState) -> CompiledFilter {
        self.compile(&state.criteria())
    }
}

/// Stable filter over an ordered resource collection
pub struct ResourceFilterEngine;

impl ResourceFilterEngine {
    /// Resources accepted by `predicate`, in their original order
    pub fn apply<'a, P>(resources: &'a [Resource], predicate: &P) -> Vec<&'a Resource>
    where
        P: ResourcePredicate + ?Sized,
    {
        resources.iter().filter(|r| predicate.matches(r)).collect()
    }
}
