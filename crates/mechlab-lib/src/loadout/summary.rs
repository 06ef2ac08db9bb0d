//! Serializable loadout snapshots for JSON output.

use serde::Serialize;

use crate::location::Location;

use super::Loadout;

/// Per-component portion of a [`LoadoutSummary`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComponentSummary {
    pub location: Location,
    pub armor: u32,
    pub max_armor: u32,
    pub slots_used: u32,
    pub slots_free: u32,
    /// Equipment ids in mounting order.
    pub items: Vec<String>,
}

/// Flat, serializable view of a loadout and its derived totals.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadoutSummary {
    pub name: String,
    pub chassis: String,
    pub mass_tons: u32,
    pub total_tons: f64,
    pub free_tons: f64,
    pub armor: u32,
    pub max_armor: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    pub heat_sinks: u32,
    pub dissipation: f64,
    pub alpha_heat: f64,
    pub jump_jets: usize,
    pub components: Vec<ComponentSummary>,
}

impl From<&Loadout> for LoadoutSummary {
    fn from(loadout: &Loadout) -> Self {
        let chassis = loadout.chassis();
        let components = loadout
            .components()
            .iter()
            .map(|component| {
                let location = component.location();
                ComponentSummary {
                    location,
                    armor: component.armor(),
                    max_armor: chassis.component(location).max_armor(),
                    slots_used: loadout.slots_used(location),
                    slots_free: loadout.slots_free(location),
                    items: component.items().iter().map(|item| item.id.clone()).collect(),
                }
            })
            .collect();

        Self {
            name: loadout.name().to_string(),
            chassis: chassis.name().to_string(),
            mass_tons: chassis.mass_tons(),
            total_tons: loadout.total_tons(),
            free_tons: loadout.free_tons(),
            armor: loadout.armor_total(),
            max_armor: chassis.max_armor(),
            engine: loadout.engine().map(|engine| engine.id.clone()),
            heat_sinks: loadout.heat_sink_count(),
            dissipation: loadout.dissipation(),
            alpha_heat: loadout.alpha_heat(),
            jump_jets: loadout.jump_jet_count(),
            components,
        }
    }
}
