//! Reference data discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use mechlab_lib::{ChassisCatalog, EquipmentCatalog};

/// Environment variable naming the equipment CSV file.
pub const EQUIPMENT_DATA_ENV: &str = "MECHLAB_EQUIPMENT_DATA";
/// Environment variable naming the chassis JSON file.
pub const CHASSIS_DATA_ENV: &str = "MECHLAB_CHASSIS_DATA";

pub const EQUIPMENT_FILENAME: &str = "equipment.csv";
pub const CHASSIS_FILENAME: &str = "chassis.json";

/// Resolved locations of the reference data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub equipment: PathBuf,
    pub chassis: PathBuf,
}

impl DataPaths {
    /// Locate both data files.
    ///
    /// An explicit `data_dir` must contain both files. Otherwise each file is
    /// searched for in the following order:
    /// 1. Its environment variable (`MECHLAB_EQUIPMENT_DATA` / `MECHLAB_CHASSIS_DATA`)
    /// 2. Debug fixture path (only in debug builds)
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let paths = Self {
            equipment: resolve_file(data_dir, EQUIPMENT_FILENAME, EQUIPMENT_DATA_ENV)?,
            chassis: resolve_file(data_dir, CHASSIS_FILENAME, CHASSIS_DATA_ENV)?,
        };
        debug!(
            equipment = %paths.equipment.display(),
            chassis = %paths.chassis.display(),
            "resolved data files"
        );
        Ok(paths)
    }

    pub fn load_equipment(&self) -> Result<EquipmentCatalog> {
        EquipmentCatalog::from_path(&self.equipment).with_context(|| {
            format!(
                "failed to load equipment data from {}",
                self.equipment.display()
            )
        })
    }

    pub fn load_chassis(&self) -> Result<ChassisCatalog> {
        ChassisCatalog::from_path(&self.chassis)
            .with_context(|| format!("failed to load chassis data from {}", self.chassis.display()))
    }
}

fn resolve_file(data_dir: Option<&Path>, filename: &str, env_var: &str) -> Result<PathBuf> {
    if let Some(dir) = data_dir {
        let path = dir.join(filename);
        if path.is_file() {
            return Ok(path);
        }
        anyhow::bail!("{} not found in data directory {}", filename, dir.display());
    }

    candidates(filename, env_var)
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| {
            anyhow::anyhow!("{filename} not found; set {env_var} or pass --data-dir")
        })
}

/// Get candidate paths for a data file when no directory was given.
fn candidates(filename: &str, env_var: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(env_path) = std::env::var_os(env_var) {
        candidates.push(PathBuf::from(env_path));
    }

    if cfg!(debug_assertions) {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../docs/fixtures")
            .join(filename);
        candidates.push(fixture);
    }

    candidates
}
