//! Hit Filter
//!
//! Narrows a hit list to an optional exact name and an optional exact URL.

use crate::storage::Hit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filter criteria. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl HitFilter {
    /// A filter that matches every hit
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from raw selections, treating empty strings as unset
    pub fn from_selection(name: Option<String>, url: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            url: url.filter(|u| !u.is_empty()),
        }
    }

    /// Builder method: require an exact name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method: require an exact URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// True when no criterion is set
    pub fn is_unset(&self) -> bool {
        self.name.is_none() && self.url.is_none()
    }

    /// Check a single hit
    pub fn matches(&self, hit: &Hit) -> bool {
        self.name.as_deref().map_or(true, |n| hit.name() == n)
            && self.url.as_deref().map_or(true, |u| hit.url() == u)
    }

    /// Matching hits in their original order
    pub fn apply<'a>(&self, hits: &'a [Hit]) -> Vec<&'a Hit> {
        hits.iter().filter(|h| self.matches(h)).collect()
    }
}

/// Values available for the filter selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterChoices {
    pub names: Vec<String>,
    pub urls: Vec<String>,
}

impl FilterChoices {
    /// Distinct names and URLs in first-seen order
    pub fn from_hits(hits: &[Hit]) -> Self {
        Self {
            names: distinct(hits.iter().map(Hit::name)),
            urls: distinct(hits.iter().map(Hit::url)),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
