//! Structural validity rules for loadouts.

use thiserror::Error;

use crate::constants::TONNAGE_EPSILON;
use crate::location::{HardpointType, Location};

use super::Loadout;

/// A structural rule a loadout (or a proposed change to it) breaks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("{location} needs {required} slots but only {free} are free")]
    SlotOverflow {
        location: Location,
        required: u32,
        free: u32,
    },

    #[error("{location} has no free {hardpoint} hardpoint ({available} in total)")]
    HardpointOverflow {
        location: Location,
        hardpoint: HardpointType,
        available: usize,
    },

    #[error("{location} armor {requested} exceeds maximum {max}")]
    ArmorOverflow {
        location: Location,
        requested: u32,
        max: u32,
    },

    #[error("total tonnage {total} t exceeds chassis capacity {capacity} t")]
    TonnageOverflow { total: f64, capacity: f64 },

    #[error("loadout already has an engine")]
    DuplicateEngine,

    #[error("engines must be mounted in the center torso, not {location}")]
    EngineLocation { location: Location },

    #[error("engine rating {rating} is outside the chassis range {min}..={max}")]
    EngineRating { rating: u32, min: u32, max: u32 },
}

/// Check every structural rule, returning the first violation found.
pub(super) fn validate(loadout: &Loadout) -> Result<(), Violation> {
    check_engines(loadout)?;

    for component in loadout.components() {
        let location = component.location();
        let def = loadout.chassis().component(location);

        if component.armor() > def.max_armor() {
            return Err(Violation::ArmorOverflow {
                location,
                requested: component.armor(),
                max: def.max_armor(),
            });
        }

        let used = loadout.slots_used(location);
        if used > def.free_slots() {
            return Err(Violation::SlotOverflow {
                location,
                required: used,
                free: def.free_slots(),
            });
        }

        for hardpoint in HardpointType::ALL {
            let available = def.hardpoint_count(hardpoint);
            if component.hardpoints_used(hardpoint) > available {
                return Err(Violation::HardpointOverflow {
                    location,
                    hardpoint,
                    available,
                });
            }
        }
    }

    check_tonnage(loadout, 0.0)
}

/// Fail when the loadout plus `additional` tons exceeds the chassis mass.
pub(super) fn check_tonnage(loadout: &Loadout, additional: f64) -> Result<(), Violation> {
    let total = loadout.total_tons() + additional;
    let capacity = f64::from(loadout.chassis().mass_tons());
    if total > capacity + TONNAGE_EPSILON {
        return Err(Violation::TonnageOverflow { total, capacity });
    }
    Ok(())
}

fn check_engines(loadout: &Loadout) -> Result<(), Violation> {
    let mut seen = false;
    for component in loadout.components() {
        for item in component.items() {
            let Some(spec) = item.engine else {
                continue;
            };
            if seen {
                return Err(Violation::DuplicateEngine);
            }
            seen = true;
            if component.location() != Location::CenterTorso {
                return Err(Violation::EngineLocation {
                    location: component.location(),
                });
            }
            check_engine_rating(loadout, spec.rating)?;
        }
    }
    Ok(())
}

pub(super) fn check_engine_rating(loadout: &Loadout, rating: u32) -> Result<(), Violation> {
    let chassis = loadout.chassis();
    if !chassis.accepts_engine_rating(rating) {
        return Err(Violation::EngineRating {
            rating,
            min: chassis.engine_min(),
            max: chassis.engine_max(),
        });
    }
    Ok(())
}
