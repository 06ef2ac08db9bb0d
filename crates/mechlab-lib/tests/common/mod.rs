//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! fixture paths and loaders for the checked-in chassis and equipment data.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use mechlab_lib::{Chassis, ChassisCatalog, EquipmentCatalog};
use serde_json::Value;

/// Path to fixtures directory used by tests (equipment, chassis, settings).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn equipment_catalog() -> EquipmentCatalog {
    EquipmentCatalog::from_path(&fixtures_dir().join("equipment.csv"))
        .expect("load fixture equipment.csv")
}

#[allow(dead_code)]
pub fn chassis_catalog() -> ChassisCatalog {
    ChassisCatalog::from_path(&fixtures_dir().join("chassis.json"))
        .expect("load fixture chassis.json")
}

/// Convenience helper to load a chassis from test fixtures by name.
#[allow(dead_code)]
pub fn chassis(name: &str) -> Arc<Chassis> {
    chassis_catalog()
        .require(name)
        .unwrap_or_else(|err| panic!("{name} present in fixtures: {err}"))
}

/// Load a fixture chassis as raw JSON, let `edit` corrupt it, and parse the
/// result. Used to build malformed-stock scenarios from known-good data.
#[allow(dead_code)]
pub fn edited_chassis<F>(name: &str, edit: F) -> Arc<Chassis>
where
    F: FnOnce(&mut Value),
{
    let raw = fs::read_to_string(fixtures_dir().join("chassis.json")).expect("read chassis.json");
    let all: Vec<Value> = serde_json::from_str(&raw).expect("chassis.json is a JSON array");
    let mut entry = all
        .into_iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("{name} present in fixtures"));
    edit(&mut entry);
    Arc::new(serde_json::from_value(entry).expect("edited chassis still parses"))
}
