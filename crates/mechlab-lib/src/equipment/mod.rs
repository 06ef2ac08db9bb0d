//! Equipment definitions and catalog management.
//!
//! - [`attributes`] - Equipment definitions, kinds and engine attributes
//! - [`catalog`] - Equipment catalog loading and lookup

pub mod attributes;
pub mod catalog;

pub use attributes::{EngineSpec, EngineType, Equipment, EquipmentKind};
pub use catalog::EquipmentCatalog;
