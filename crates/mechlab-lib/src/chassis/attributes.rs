//! Chassis reference data.
//!
//! A [`Chassis`] describes a mech hull: its mass, the engines it accepts,
//! one [`ComponentDef`] per body location, and optionally the stock loadout
//! it ships with. Chassis are immutable once loaded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{HEAD_MAX_ARMOR, INTERNAL_STRUCTURE_DIVISOR, MAX_INTERNAL_POINTS};
use crate::error::{Error, Result};
use crate::location::{HardpointType, Location};

/// Static description of one body component of a chassis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub location: Location,
    /// Total critical slots of the component.
    pub slots: u32,
    /// Slots taken by actuators, cockpit, gyro and other fixed internals.
    #[serde(default)]
    pub fixed_slots: u32,
    pub internal_points: u32,
    #[serde(default)]
    pub hardpoints: Vec<HardpointType>,
}

impl ComponentDef {
    /// Slots available for equipment.
    pub fn free_slots(&self) -> u32 {
        self.slots.saturating_sub(self.fixed_slots)
    }

    pub fn max_armor(&self) -> u32 {
        if self.location == Location::Head {
            HEAD_MAX_ARMOR
        } else {
            self.internal_points.saturating_mul(2)
        }
    }

    /// Number of hardpoints of the given type.
    pub fn hardpoint_count(&self, hardpoint: HardpointType) -> usize {
        self.hardpoints.iter().filter(|hp| **hp == hardpoint).count()
    }
}

/// Reference "as shipped" configuration of a chassis.
///
/// Items are equipment ids, resolved against the equipment catalog when the
/// stock loadout is constructed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockLoadout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub armor: BTreeMap<Location, u32>,
    #[serde(default)]
    pub items: BTreeMap<Location, Vec<String>>,
    /// Total tonnage recorded in the reference data, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_tons: Option<f64>,
}

/// Mech hull reference data as it appears in data files.
#[derive(Debug, Clone, Deserialize)]
pub struct ChassisRecord {
    pub name: String,
    #[serde(default)]
    pub series: String,
    pub mass_tons: u32,
    pub engine_min: u32,
    pub engine_max: u32,
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub stock: Option<StockLoadout>,
}

/// Validated mech hull reference data.
///
/// A `Chassis` always defines exactly one component per location, stored in
/// canonical order, so [`Chassis::component`] cannot miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChassisRecord")]
pub struct Chassis {
    name: String,
    series: String,
    mass_tons: u32,
    engine_min: u32,
    engine_max: u32,
    components: Vec<ComponentDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stock: Option<StockLoadout>,
}

impl TryFrom<ChassisRecord> for Chassis {
    type Error = Error;

    fn try_from(record: ChassisRecord) -> Result<Self> {
        Chassis::new(record)
    }
}

impl Chassis {
    /// Validate a chassis record and build a chassis from it.
    pub fn new(record: ChassisRecord) -> Result<Self> {
        let ChassisRecord {
            name,
            series,
            mass_tons,
            engine_min,
            engine_max,
            mut components,
            stock,
        } = record;
        let invalid = |message: String| Error::ChassisDataValidation { message };

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("chassis name must not be empty".to_string()));
        }
        if mass_tons == 0 {
            return Err(invalid(format!(
                "mass_tons of chassis '{}' must be positive",
                name
            )));
        }
        if engine_min > engine_max {
            return Err(invalid(format!(
                "engine range of chassis '{}' is empty ({}..={})",
                name, engine_min, engine_max
            )));
        }

        for location in Location::ALL {
            let count = components.iter().filter(|c| c.location == location).count();
            if count != 1 {
                return Err(invalid(format!(
                    "chassis '{}' must define {} exactly once (found {})",
                    name, location, count
                )));
            }
        }

        if let Some(component) = components.iter().find(|c| c.fixed_slots > c.slots) {
            return Err(invalid(format!(
                "{} of chassis '{}' has more fixed slots than slots",
                component.location, name
            )));
        }

        if let Some(component) = components
            .iter()
            .find(|c| c.internal_points > MAX_INTERNAL_POINTS)
        {
            return Err(invalid(format!(
                "{} of chassis '{}' has {} internal points, more than the maximum {}",
                component.location, name, component.internal_points, MAX_INTERNAL_POINTS
            )));
        }

        components.sort_by_key(|c| c.location);
        Ok(Self {
            name,
            series,
            mass_tons,
            engine_min,
            engine_max,
            components,
            stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn mass_tons(&self) -> u32 {
        self.mass_tons
    }

    pub fn engine_min(&self) -> u32 {
        self.engine_min
    }

    pub fn engine_max(&self) -> u32 {
        self.engine_max
    }

    /// Component definitions in canonical location order.
    pub fn components(&self) -> &[ComponentDef] {
        &self.components
    }

    /// Component definition for a location.
    pub fn component(&self, location: Location) -> &ComponentDef {
        &self.components[location.index()]
    }

    pub fn stock(&self) -> Option<&StockLoadout> {
        self.stock.as_ref()
    }

    /// Mass of the internal structure in tons.
    pub fn structure_tons(&self) -> f64 {
        f64::from(self.mass_tons) / INTERNAL_STRUCTURE_DIVISOR
    }

    /// Sum of the armor maxima of all components.
    pub fn max_armor(&self) -> u32 {
        self.components.iter().map(ComponentDef::max_armor).sum()
    }

    /// Whether an engine of this rating may be mounted.
    pub fn accepts_engine_rating(&self, rating: u32) -> bool {
        (self.engine_min..=self.engine_max).contains(&rating)
    }
}
