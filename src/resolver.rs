use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::dataset::Registry;
use crate::error::{Error, Result};

/// Exact-match lookup from an identifier to the category it belongs to.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    software: HashMap<String, Option<String>>,
    categories: HashSet<String>,
}

impl CategoryIndex {
    pub fn build(registry: &Registry) -> Self {
        let mut index = Self::default();
        for row in registry.rows() {
            index
                .software
                .entry(row.software_name.clone())
                .or_insert_with(|| row.category.clone());
            if let Some(ref category) = row.category {
                index.categories.insert(category.clone());
            }
        }
        index
    }

    /// Resolve a software name to its first row's category, or accept a category name as is.
    /// Matching is case-sensitive with no normalization.
    pub fn resolve(&self, identifier: &str) -> Result<String> {
        if let Some(Some(category)) = self.software.get(identifier) {
            debug!(identifier, category = %category, "resolved as software name");
            return Ok(category.clone());
        }
        if self.categories.contains(identifier) {
            debug!(identifier, "resolved as category name");
            return Ok(identifier.to_string());
        }
        Err(Error::InvalidInput(identifier.to_string()))
    }
}
