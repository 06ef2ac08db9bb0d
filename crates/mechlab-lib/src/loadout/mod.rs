//! Loadouts: concrete equipment and armor configurations built on a chassis.
//!
//! A [`Loadout`] owns its per-location [`ComponentState`]s. Chassis and
//! equipment definitions are shared immutable reference data held behind
//! `Arc`; nothing a loadout does can change them.
//!
//! Loadouts are created by a [`LoadoutFactory`](crate::factory::LoadoutFactory)
//! and edited through [`Loadout::add_item`], [`Loadout::remove_item`] and
//! [`Loadout::set_armor`]. Edits that would break a structural rule are
//! refused with a [`Violation`] and leave the loadout untouched, so a
//! loadout is valid at every observable point.

pub mod summary;
pub mod validation;

use std::sync::Arc;

use crate::chassis::Chassis;
use crate::constants::{ARMOR_POINTS_PER_TON, HEAT_SINK_DISSIPATION};
use crate::equipment::{EngineType, Equipment, EquipmentKind};
use crate::location::{HardpointType, Location};

pub use summary::{ComponentSummary, LoadoutSummary};
pub use validation::Violation;

/// Mutable state of one chassis component within a loadout.
#[derive(Debug, PartialEq)]
pub struct ComponentState {
    location: Location,
    armor: u32,
    items: Vec<Arc<Equipment>>,
}

impl ComponentState {
    fn new(location: Location) -> Self {
        Self {
            location,
            armor: 0,
            items: Vec::new(),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn armor(&self) -> u32 {
        self.armor
    }

    /// Equipped items in mounting order.
    pub fn items(&self) -> &[Arc<Equipment>] {
        &self.items
    }

    /// Tons of equipment mounted in this component.
    pub fn item_tons(&self) -> f64 {
        self.items.iter().map(|item| item.tons).sum()
    }

    /// Number of mounted items that occupy a hardpoint of the given type.
    pub fn hardpoints_used(&self, hardpoint: HardpointType) -> usize {
        self.items
            .iter()
            .filter(|item| item.hardpoint == Some(hardpoint))
            .count()
    }

    fn item_slots(&self) -> u32 {
        self.items.iter().map(|item| item.slots).sum()
    }
}

/// A concrete equipment and armor configuration built on a chassis.
#[derive(Debug, PartialEq)]
pub struct Loadout {
    name: String,
    chassis: Arc<Chassis>,
    components: Vec<ComponentState>,
}

impl Loadout {
    /// An unequipped, unarmored loadout with one component per location.
    pub(crate) fn empty(chassis: Arc<Chassis>) -> Self {
        Self {
            name: chassis.name().to_string(),
            components: Location::ALL.into_iter().map(ComponentState::new).collect(),
            chassis,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn chassis(&self) -> &Arc<Chassis> {
        &self.chassis
    }

    /// Component states in canonical location order.
    pub fn components(&self) -> &[ComponentState] {
        &self.components
    }

    pub fn component(&self, location: Location) -> &ComponentState {
        &self.components[location.index()]
    }

    /// Mount an item, refusing it if the result would be invalid.
    pub fn add_item(&mut self, location: Location, item: Arc<Equipment>) -> Result<(), Violation> {
        if let Some(spec) = item.engine {
            if location != Location::CenterTorso {
                return Err(Violation::EngineLocation { location });
            }
            if self.engine().is_some() {
                return Err(Violation::DuplicateEngine);
            }
            validation::check_engine_rating(self, spec.rating)?;

            let side_slots = spec.engine_type.side_torso_slots();
            for side in [Location::LeftTorso, Location::RightTorso] {
                let free = self.slots_free(side);
                if side_slots > free {
                    return Err(Violation::SlotOverflow {
                        location: side,
                        required: side_slots,
                        free,
                    });
                }
            }
        }

        let free = self.slots_free(location);
        if item.slots > free {
            return Err(Violation::SlotOverflow {
                location,
                required: item.slots,
                free,
            });
        }

        if let Some(hardpoint) = item.hardpoint {
            let available = self.chassis.component(location).hardpoint_count(hardpoint);
            if self.component(location).hardpoints_used(hardpoint) >= available {
                return Err(Violation::HardpointOverflow {
                    location,
                    hardpoint,
                    available,
                });
            }
        }

        validation::check_tonnage(self, item.tons)?;

        self.components[location.index()].items.push(item);
        Ok(())
    }

    /// Unmount the first item with the given id (case-insensitive).
    pub fn remove_item(&mut self, location: Location, id: &str) -> Option<Arc<Equipment>> {
        let items = &mut self.components[location.index()].items;
        let position = items
            .iter()
            .position(|item| item.id.eq_ignore_ascii_case(id.trim()))?;
        Some(items.remove(position))
    }

    /// Set the armor of a component, refusing values above its maximum or
    /// beyond the chassis tonnage.
    pub fn set_armor(&mut self, location: Location, points: u32) -> Result<(), Violation> {
        let max = self.chassis.component(location).max_armor();
        if points > max {
            return Err(Violation::ArmorOverflow {
                location,
                requested: points,
                max,
            });
        }

        let current = self.component(location).armor;
        let delta = (f64::from(points) - f64::from(current)) / ARMOR_POINTS_PER_TON;
        validation::check_tonnage(self, delta)?;

        self.components[location.index()].armor = points;
        Ok(())
    }

    /// Re-check every structural rule.
    pub fn validate(&self) -> Result<(), Violation> {
        validation::validate(self)
    }

    /// Slots used by equipment in a component, including the side-torso
    /// share of an XL engine.
    pub fn slots_used(&self, location: Location) -> u32 {
        let mut used = self.component(location).item_slots();
        if location.is_side_torso() {
            used += self.engine_type().map_or(0, EngineType::side_torso_slots);
        }
        used
    }

    pub fn slots_free(&self, location: Location) -> u32 {
        self.chassis
            .component(location)
            .free_slots()
            .saturating_sub(self.slots_used(location))
    }

    /// The mounted engine, if any.
    pub fn engine(&self) -> Option<&Arc<Equipment>> {
        self.items().find(|item| item.is_engine())
    }

    fn engine_type(&self) -> Option<EngineType> {
        self.engine()
            .and_then(|engine| engine.engine)
            .map(|spec| spec.engine_type)
    }

    /// All mounted items in canonical location order.
    pub fn items(&self) -> impl Iterator<Item = &Arc<Equipment>> {
        self.components.iter().flat_map(|c| c.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.components.iter().map(|c| c.items.len()).sum()
    }

    pub fn armor_total(&self) -> u32 {
        self.components.iter().map(|c| c.armor).sum()
    }

    pub fn armor_tons(&self) -> f64 {
        f64::from(self.armor_total()) / ARMOR_POINTS_PER_TON
    }

    pub fn item_tons(&self) -> f64 {
        self.components.iter().map(ComponentState::item_tons).sum()
    }

    /// Structure, armor and equipment mass.
    pub fn total_tons(&self) -> f64 {
        self.chassis.structure_tons() + self.armor_tons() + self.item_tons()
    }

    pub fn free_tons(&self) -> f64 {
        f64::from(self.chassis.mass_tons()) - self.total_tons()
    }

    /// Engine-internal plus externally mounted heat sinks.
    pub fn heat_sink_count(&self) -> u32 {
        let internal = self
            .engine()
            .and_then(|engine| engine.engine)
            .map_or(0, |spec| spec.internal_heat_sinks());
        let external = self.items().filter(|item| item.is_heat_sink()).count() as u32;
        internal + external
    }

    /// Heat dissipated per second.
    pub fn dissipation(&self) -> f64 {
        f64::from(self.heat_sink_count()) * HEAT_SINK_DISSIPATION
    }

    /// Heat generated by firing every weapon once.
    pub fn alpha_heat(&self) -> f64 {
        self.items()
            .filter(|item| item.kind == EquipmentKind::Weapon)
            .map(|item| item.heat)
            .sum()
    }

    pub fn jump_jet_count(&self) -> usize {
        self.items()
            .filter(|item| item.kind == EquipmentKind::JumpJet)
            .count()
    }

    /// Serializable snapshot of the loadout.
    pub fn summary(&self) -> LoadoutSummary {
        LoadoutSummary::from(self)
    }
}
