//! Chassis reference data and catalog management.
//!
//! - [`attributes`] - Chassis, component definitions and stock loadout data
//! - [`catalog`] - Chassis catalog loading and lookup

pub mod attributes;
pub mod catalog;

pub use attributes::{Chassis, ChassisRecord, ComponentDef, StockLoadout};
pub use catalog::ChassisCatalog;
