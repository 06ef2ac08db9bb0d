//! Output formatting for catalog listings and loadouts.
//!
//! Every formatter returns a `String` so callers decide where it goes and
//! tests can inspect it directly.

use std::fmt::Write;
use std::sync::Arc;

use clap::ValueEnum;
use serde::Serialize;

use mechlab_lib::{Chassis, Equipment, Loadout, LoadoutSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// One row of the chassis listing.
#[derive(Debug, Clone, Serialize)]
pub struct ChassisRow {
    pub name: String,
    pub series: String,
    pub mass_tons: u32,
    pub engine_min: u32,
    pub engine_max: u32,
    pub max_armor: u32,
    pub stock: bool,
}

impl ChassisRow {
    pub fn new(chassis: &Chassis) -> Self {
        Self {
            name: chassis.name().to_string(),
            series: chassis.series().to_string(),
            mass_tons: chassis.mass_tons(),
            engine_min: chassis.engine_min(),
            engine_max: chassis.engine_max(),
            max_armor: chassis.max_armor(),
            stock: chassis.stock().is_some(),
        }
    }
}

/// A built loadout together with the construction mode that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    pub mode: &'static str,
    #[serde(flatten)]
    pub summary: LoadoutSummary,
}

pub fn format_chassis_text(chassis: &[&Arc<Chassis>]) -> String {
    if chassis.is_empty() {
        return "No chassis available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available chassis ({}):", chassis.len());
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:>5} {:>9} {:>6} {:>5}",
        "Name", "Series", "Tons", "Engine", "Armor", "Stock"
    );
    for row in chassis.iter().map(|c| ChassisRow::new(c)) {
        let engine = format!("{}-{}", row.engine_min, row.engine_max);
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>5} {:>9} {:>6} {:>5}",
            row.name,
            row.series,
            row.mass_tons,
            engine,
            row.max_armor,
            if row.stock { "yes" } else { "no" }
        );
    }
    out
}

pub fn format_chassis_json(chassis: &[&Arc<Chassis>]) -> serde_json::Result<String> {
    let rows: Vec<ChassisRow> = chassis.iter().map(|c| ChassisRow::new(c)).collect();
    serde_json::to_string_pretty(&rows)
}

pub fn format_equipment_text(items: &[&Arc<Equipment>]) -> String {
    if items.is_empty() {
        return "No equipment available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available equipment ({}):", items.len());
    let _ = writeln!(
        out,
        "{:<16} {:<24} {:<9} {:>2} {:>5} {:>6} {:>5}",
        "Id", "Name", "Kind", "HP", "Slots", "Tons", "Heat"
    );
    for item in items {
        let hardpoint = item
            .hardpoint
            .map(|hp| hp.code().to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<16} {:<24} {:<9} {:>2} {:>5} {:>6.2} {:>5.1}",
            item.id, item.name, item.kind, hardpoint, item.slots, item.tons, item.heat
        );
    }
    out
}

pub fn format_equipment_json(items: &[&Arc<Equipment>]) -> serde_json::Result<String> {
    let items: Vec<&Equipment> = items.iter().map(|item| Arc::as_ref(*item)).collect();
    serde_json::to_string_pretty(&items)
}

/// Render a loadout as a per-location table followed by its totals.
pub fn format_loadout_text(loadout: &Loadout, mode: &str) -> String {
    let summary = loadout.summary();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} [{}, {} t] ({} build)",
        summary.name, summary.chassis, summary.mass_tons, mode
    );
    let _ = writeln!(out, "{:<3} {:>7} {:>7}  Items", "Loc", "Armor", "Slots");
    for component in &summary.components {
        let items = if component.items.is_empty() {
            "-".to_string()
        } else {
            component.items.join(", ")
        };
        let armor = format!("{}/{}", component.armor, component.max_armor);
        let slots = format!(
            "{}/{}",
            component.slots_used,
            component.slots_used + component.slots_free
        );
        let _ = writeln!(
            out,
            "{:<3} {:>7} {:>7}  {}",
            component.location.short_name(),
            armor,
            slots,
            items
        );
    }

    let _ = writeln!(
        out,
        "\nTonnage: {:.2} / {} t ({:.2} t free)",
        summary.total_tons, summary.mass_tons, summary.free_tons
    );
    let _ = writeln!(out, "Armor: {} / {}", summary.armor, summary.max_armor);
    let _ = writeln!(
        out,
        "Engine: {}",
        summary.engine.as_deref().unwrap_or("none")
    );
    let _ = writeln!(
        out,
        "Heat sinks: {} (dissipation {:.2})",
        summary.heat_sinks, summary.dissipation
    );
    let _ = writeln!(out, "Alpha heat: {:.1}", summary.alpha_heat);
    let _ = writeln!(out, "Jump jets: {}", summary.jump_jets);
    out
}

pub fn format_loadout_json(loadout: &Loadout, mode: &'static str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BuildOutput {
        mode,
        summary: loadout.summary(),
    })
}
