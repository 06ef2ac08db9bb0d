//! MechLab library entry points.
//!
//! This crate loads chassis and equipment reference data, models loadouts
//! and their structural rules, and constructs loadouts through a
//! [`LoadoutFactory`]: empty, settings-driven default, stock, or cloned from
//! an existing loadout. Higher-level consumers (the CLI) should only depend
//! on the items exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod chassis;
pub mod constants;
pub mod equipment;
pub mod error;
pub mod factory;
pub mod loadout;
pub mod location;
mod matching;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use chassis::{Chassis, ChassisCatalog, ChassisRecord, ComponentDef, StockLoadout};
pub use equipment::{EngineSpec, EngineType, Equipment, EquipmentCatalog, EquipmentKind};
pub use error::{Error, ErrorKind, Result};
pub use factory::{Construction, LoadoutFactory, StandardLoadoutFactory};
pub use loadout::{ComponentState, ComponentSummary, Loadout, LoadoutSummary, Violation};
pub use location::{HardpointType, Location};
pub use settings::{default_settings_path, EngineSettings, LoadoutSettings};
