//! Equipment definitions.
//!
//! An [`Equipment`] is immutable catalog data. Loadouts hold it behind an
//! `Arc` and never mutate it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ENGINE_RATING_PER_HEAT_SINK, MAX_ENGINE_HEAT_SINKS, XL_SIDE_TORSO_SLOTS};
use crate::error::{Error, Result};
use crate::location::HardpointType;

/// Broad category of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Weapon,
    Ammo,
    HeatSink,
    Engine,
    JumpJet,
    Module,
}

impl EquipmentKind {
    pub fn name(self) -> &'static str {
        match self {
            EquipmentKind::Weapon => "weapon",
            EquipmentKind::Ammo => "ammo",
            EquipmentKind::HeatSink => "heat_sink",
            EquipmentKind::Engine => "engine",
            EquipmentKind::JumpJet => "jump_jet",
            EquipmentKind::Module => "module",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Accept "heat_sink", "heatsink", "Heat Sink" and friends.
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "weapon" => Ok(EquipmentKind::Weapon),
            "ammo" | "ammunition" => Ok(EquipmentKind::Ammo),
            "heatsink" => Ok(EquipmentKind::HeatSink),
            "engine" => Ok(EquipmentKind::Engine),
            "jumpjet" => Ok(EquipmentKind::JumpJet),
            "module" => Ok(EquipmentKind::Module),
            _ => Err(format!("unknown equipment kind '{}'", s.trim())),
        }
    }
}

/// Engine construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    Std,
    Xl,
}

impl EngineType {
    /// Slots the engine occupies in each side torso in addition to its
    /// center torso slots.
    pub fn side_torso_slots(self) -> u32 {
        match self {
            EngineType::Std => 0,
            EngineType::Xl => XL_SIDE_TORSO_SLOTS,
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::Std => f.write_str("std"),
            EngineType::Xl => f.write_str("xl"),
        }
    }
}

impl FromStr for EngineType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "std" | "standard" => Ok(EngineType::Std),
            "xl" => Ok(EngineType::Xl),
            other => Err(format!("unknown engine type '{}'", other)),
        }
    }
}

/// Engine-specific attributes of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub engine_type: EngineType,
    pub rating: u32,
}

impl EngineSpec {
    /// Heat sinks carried inside the engine.
    pub fn internal_heat_sinks(&self) -> u32 {
        (self.rating / ENGINE_RATING_PER_HEAT_SINK).min(MAX_ENGINE_HEAT_SINKS)
    }
}

/// An equipment definition loaded from the equipment catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub kind: EquipmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardpoint: Option<HardpointType>,
    pub slots: u32,
    pub tons: f64,
    pub heat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineSpec>,
}

impl Equipment {
    /// Validate equipment attributes for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::EquipmentDataValidation {
                message: "equipment id must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::EquipmentDataValidation {
                message: format!("equipment '{}' must have a name", self.id),
            });
        }
        if self.slots == 0 {
            return Err(Error::EquipmentDataValidation {
                message: format!("equipment '{}' must occupy at least one slot", self.id),
            });
        }

        for (value, field) in [(self.tons, "tons"), (self.heat, "heat")] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::EquipmentDataValidation {
                    message: format!(
                        "{field} of equipment '{}' must be a finite non-negative number",
                        self.id
                    ),
                });
            }
        }

        if self.kind == EquipmentKind::Weapon && self.hardpoint.is_none() {
            return Err(Error::EquipmentDataValidation {
                message: format!("weapon '{}' must declare a hardpoint type", self.id),
            });
        }

        match (self.kind, self.engine) {
            (EquipmentKind::Engine, None) => Err(Error::EquipmentDataValidation {
                message: format!("engine '{}' must declare a rating and engine type", self.id),
            }),
            (EquipmentKind::Engine, Some(spec)) if spec.rating == 0 => {
                Err(Error::EquipmentDataValidation {
                    message: format!("engine '{}' must have a positive rating", self.id),
                })
            }
            (kind, Some(_)) if kind != EquipmentKind::Engine => {
                Err(Error::EquipmentDataValidation {
                    message: format!("{kind} '{}' must not declare an engine rating", self.id),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_heat_sink(&self) -> bool {
        self.kind == EquipmentKind::HeatSink
    }
}
