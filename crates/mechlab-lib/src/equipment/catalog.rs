//! Equipment catalog loading and lookup.
//!
//! The catalog is read from a CSV file with one item per row. Header names
//! are matched loosely so that exports from different tools load unchanged.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::location::HardpointType;
use crate::matching::{fuzzy_matches, normalize_key};

use super::attributes::{EngineSpec, EngineType, Equipment, EquipmentKind};

/// Collection of equipment definitions loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    items: HashMap<String, Arc<Equipment>>,
}

impl EquipmentCatalog {
    /// Load an equipment catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        debug!(path = %path.display(), items = catalog.len(), "loaded equipment catalog");
        Ok(catalog)
    }

    /// Load an equipment catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::EquipmentDataValidation {
                message: format!("failed to read equipment headers: {err}"),
            })?
            .clone();
        let columns = ColumnMap::resolve(&headers)?;

        let mut catalog = Self::default();
        let mut row_num: usize = 1;
        for result in csv_reader.records() {
            row_num += 1;
            let record = result?;
            let item = columns.parse_row(&record, row_num)?;
            catalog.insert(item)?;
        }

        Ok(catalog)
    }

    /// Build a catalog from already-constructed definitions.
    pub fn from_items<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Equipment>,
    {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, item: Equipment) -> Result<()> {
        item.validate()?;
        let key = normalize_key(&item.id);
        if self.items.contains_key(&key) {
            return Err(Error::DuplicateEquipmentId { id: key });
        }
        self.items.insert(key, Arc::new(item));
        Ok(())
    }

    /// Get an item by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&Arc<Equipment>> {
        self.items.get(&normalize_key(id))
    }

    /// Find an engine by construction type and rating.
    pub fn find_engine(&self, engine_type: EngineType, rating: u32) -> Option<&Arc<Equipment>> {
        self.items.values().find(|item| {
            item.engine
                .is_some_and(|spec| spec.engine_type == engine_type && spec.rating == rating)
        })
    }

    /// Ids similar to `id`, best match first.
    pub fn fuzzy_matches(&self, id: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(id, self.items.values().map(|item| item.id.as_str()), limit)
    }

    /// Get all items sorted by id.
    pub fn items_sorted(&self) -> Vec<&Arc<Equipment>> {
        let mut items: Vec<&Arc<Equipment>> = self.items.values().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maps canonical field names to CSV column indices.
struct ColumnMap {
    index: BTreeMap<&'static str, usize>,
}

impl ColumnMap {
    const REQUIRED: [&'static str; 5] = ["id", "name", "kind", "slots", "tons"];

    fn resolve(headers: &StringRecord) -> Result<Self> {
        // Helper to normalize header strings for robust matching.
        let normalize = |s: &str| {
            s.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        };
        let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

        let synonyms: &[(&'static str, &[&str])] = &[
            ("id", &["id", "item_id", "equipment_id", "key"]),
            ("name", &["name", "display_name", "item_name"]),
            ("kind", &["kind", "type", "category"]),
            ("hardpoint", &["hardpoint", "hardpoint_type", "mount"]),
            ("slots", &["slots", "crits", "critical_slots", "criticals"]),
            ("tons", &["tons", "tonnage", "mass", "mass_t", "weight"]),
            ("heat", &["heat", "heat_per_shot"]),
            ("rating", &["rating", "engine_rating"]),
            ("engine_type", &["engine_type", "enginetype"]),
        ];

        let mut index = BTreeMap::new();
        for (canon, alts) in synonyms {
            'outer: for alt in *alts {
                let alt_n = normalize(alt);
                for (i, header) in normalized_headers.iter().enumerate() {
                    if header == &alt_n {
                        index.insert(*canon, i);
                        break 'outer;
                    }
                }
            }
        }

        let missing: Vec<&str> = Self::REQUIRED
            .into_iter()
            .filter(|c| !index.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::EquipmentDataValidation {
                message: format!(
                    "equipment data missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        Ok(Self { index })
    }

    fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.index
            .get(field)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> Result<Equipment> {
        let id = self.get(record, "id").unwrap_or_default().to_string();
        let invalid = |field: &str, detail: String| Error::EquipmentDataValidation {
            message: format!("invalid {field} for equipment '{id}' at row {row}: {detail}"),
        };

        let name = self.get(record, "name").unwrap_or_default().to_string();
        let kind: EquipmentKind = self
            .get(record, "kind")
            .unwrap_or_default()
            .parse::<EquipmentKind>()
            .map_err(|e| invalid("kind", e))?;
        let hardpoint = self
            .get(record, "hardpoint")
            .filter(|s| !s.eq_ignore_ascii_case("none"))
            .map(str::parse::<HardpointType>)
            .transpose()
            .map_err(|e| invalid("hardpoint", e))?;
        let slots: u32 = self
            .get(record, "slots")
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|e| invalid("slots", format!("{e}")))?;
        let tons: f64 = self
            .get(record, "tons")
            .unwrap_or_default()
            .parse::<f64>()
            .map_err(|e| invalid("tons", format!("{e}")))?;
        let heat: f64 = self
            .get(record, "heat")
            .map(str::parse::<f64>)
            .transpose()
            .map_err(|e| invalid("heat", format!("{e}")))?
            .unwrap_or(0.0);
        let rating: Option<u32> = self
            .get(record, "rating")
            .map(str::parse::<u32>)
            .transpose()
            .map_err(|e| invalid("rating", format!("{e}")))?;
        let engine_type: Option<EngineType> = self
            .get(record, "engine_type")
            .map(str::parse::<EngineType>)
            .transpose()
            .map_err(|e| invalid("engine_type", e))?;

        let engine = match (rating, engine_type) {
            (Some(rating), Some(engine_type)) => Some(EngineSpec {
                engine_type,
                rating,
            }),
            (None, None) => None,
            _ => {
                return Err(invalid(
                    "engine",
                    "rating and engine_type must be given together".to_string(),
                ))
            }
        };

        Ok(Equipment {
            id,
            name,
            kind,
            hardpoint,
            slots,
            tons,
            heat,
            engine,
        })
    }
}
