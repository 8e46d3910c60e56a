//! Data structures for link harvesting

use std::collections::HashSet;

use scraper::Selector;

use crate::config::HarvestConfig;
use crate::error::ConfigError;

/// Deduplicated collection of harvested result links
///
/// Behaves as a set (inserting an existing link is a no-op). Iteration
/// follows first-seen order so a run's processing positions are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link; returns `false` if it was already present
    pub fn insert(&mut self, link: String) -> bool {
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Everything the harvester needs to know about the search engine's markup
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub search_url: String,
    pub input_selector: String,
    pub next_page_selector: String,
    pub result_selector: Selector,
    pub link_selector: Selector,
    pub max_pages: usize,
}

impl SearchPlan {
    pub fn from_config(config: &HarvestConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            search_url: config.search_url().to_string(),
            input_selector: config.search_input_selector().to_string(),
            next_page_selector: config.next_page_selector().to_string(),
            result_selector: parse_selector("result_selector", config.result_selector())?,
            link_selector: parse_selector("link_selector", config.link_selector())?,
            max_pages: config.max_pages(),
        })
    }
}

pub(crate) fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}
