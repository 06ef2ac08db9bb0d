//! Chassis catalog loading and lookup.
//!
//! Chassis data is a JSON array of chassis records. Every record is
//! validated while it is deserialized.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::matching::{fuzzy_matches, normalize_key};

use super::attributes::Chassis;

/// Collection of chassis definitions loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct ChassisCatalog {
    chassis: HashMap<String, Arc<Chassis>>,
}

impl ChassisCatalog {
    /// Load a chassis catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        debug!(path = %path.display(), chassis = catalog.len(), "loaded chassis catalog");
        Ok(catalog)
    }

    /// Load a chassis catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<Chassis> = serde_json::from_reader(reader)?;
        Self::from_chassis(records)
    }

    /// Build a catalog from already-validated chassis.
    pub fn from_chassis<I>(chassis: I) -> Result<Self>
    where
        I: IntoIterator<Item = Chassis>,
    {
        let mut catalog = Self::default();
        for entry in chassis {
            let key = normalize_key(entry.name());
            if catalog.chassis.contains_key(&key) {
                return Err(Error::DuplicateChassisName { name: key });
            }
            catalog.chassis.insert(key, Arc::new(entry));
        }
        Ok(catalog)
    }

    /// Get a chassis by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Arc<Chassis>> {
        self.chassis.get(&normalize_key(name))
    }

    /// Get a chassis by name, failing with suggestions when it is unknown.
    pub fn require(&self, name: &str) -> Result<Arc<Chassis>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownChassis {
                name: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            })
    }

    /// Chassis names similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(name, self.chassis.values().map(|c| c.name()), limit)
    }

    /// Get a sorted list of all chassis names.
    pub fn chassis_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.chassis.values().map(|c| c.name().to_string()).collect();
        names.sort();
        names
    }

    /// Get all chassis sorted by mass, then series, then name.
    pub fn chassis_sorted(&self) -> Vec<&Arc<Chassis>> {
        let mut chassis: Vec<&Arc<Chassis>> = self.chassis.values().collect();
        chassis.sort_by(|a, b| {
            a.mass_tons()
                .cmp(&b.mass_tons())
                .then_with(|| a.series().cmp(b.series()))
                .then_with(|| a.name().cmp(b.name()))
        });
        chassis
    }

    pub fn len(&self) -> usize {
        self.chassis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chassis.is_empty()
    }
}
