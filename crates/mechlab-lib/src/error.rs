use thiserror::Error;

use crate::equipment::{EngineType, EquipmentKind};
use crate::loadout::Violation;

/// Convenient result alias for the MechLab library.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], used by callers to decide how to
/// recover (prompt for other settings, report bad data, abort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Settings-driven defaults cannot be satisfied by the chassis.
    Configuration,
    /// Reference stock or catalog data is inconsistent or incomplete.
    DataIntegrity,
    /// An invariant that should hold for any valid loadout did not.
    Internal,
    /// Input data could not be read, parsed or looked up.
    Input,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when chassis data fails validation while loading.
    #[error("invalid chassis data: {message}")]
    ChassisDataValidation { message: String },

    /// Raised when duplicate chassis names are encountered during catalog load.
    #[error("duplicate chassis name encountered: {name}")]
    DuplicateChassisName { name: String },

    /// Raised when equipment data fails validation while loading.
    #[error("invalid equipment data: {message}")]
    EquipmentDataValidation { message: String },

    /// Raised when duplicate equipment ids are encountered during catalog load.
    #[error("duplicate equipment id encountered: {id}")]
    DuplicateEquipmentId { id: String },

    /// Raised when a chassis name could not be found in the catalog.
    #[error("unknown chassis: {name}{}", format_suggestions(.suggestions))]
    UnknownChassis {
        name: String,
        suggestions: Vec<String>,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for settings")]
    ProjectDirsUnavailable,

    /// Raised when loadout settings are malformed.
    #[error("invalid loadout settings: {message}")]
    SettingsValidation { message: String },

    /// Raised when the configured default engine cannot be mounted on the chassis.
    #[error("engine rating {rating} is outside {chassis}'s range {min}..={max}")]
    EngineRatingOutOfRange {
        chassis: String,
        rating: u32,
        min: u32,
        max: u32,
    },

    /// Raised when the configured default engine is not in the equipment catalog.
    #[error("no {engine_type} engine with rating {rating} in the equipment catalog")]
    EngineUnavailable { engine_type: EngineType, rating: u32 },

    /// Raised when settings name equipment that is not in the catalog.
    #[error("configured equipment {id} is not in the equipment catalog")]
    EquipmentUnavailable { id: String },

    /// Raised when the configured heat sink id names some other kind of equipment.
    #[error("configured heat sink {id} is {kind} equipment, not a heat sink")]
    NotAHeatSink { id: String, kind: EquipmentKind },

    /// Raised when the default-build policy produces an invalid loadout.
    #[error("default loadout does not fit {chassis}: {violation}")]
    DefaultsDoNotFit { chassis: String, violation: Violation },

    /// Raised when a stock loadout is requested for a chassis without stock data.
    #[error("chassis {chassis} has no stock loadout data")]
    MissingStockData { chassis: String },

    /// Raised when stock data references equipment absent from the catalog.
    #[error("unknown equipment {id} in stock for {chassis}{}", format_suggestions(.suggestions))]
    UnknownEquipment {
        chassis: String,
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when stock data breaks a structural rule.
    #[error("stock loadout for {chassis} is inconsistent: {violation}")]
    StockDoesNotFit { chassis: String, violation: Violation },

    /// Raised when the reconstructed stock tonnage drifts from the reference value.
    #[error("stock loadout for {chassis} weighs {actual} t, reference data says {expected} t")]
    StockTonnageMismatch {
        chassis: String,
        expected: f64,
        actual: f64,
    },

    /// Raised when a cloned loadout fails re-validation.
    #[error("cloned loadout is inconsistent: {message}")]
    CloneInconsistent { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SettingsValidation { .. }
            | Error::EngineRatingOutOfRange { .. }
            | Error::EngineUnavailable { .. }
            | Error::EquipmentUnavailable { .. }
            | Error::NotAHeatSink { .. }
            | Error::DefaultsDoNotFit { .. } => ErrorKind::Configuration,
            Error::MissingStockData { .. }
            | Error::UnknownEquipment { .. }
            | Error::StockDoesNotFit { .. }
            | Error::StockTonnageMismatch { .. } => ErrorKind::DataIntegrity,
            Error::CloneInconsistent { .. } => ErrorKind::Internal,
            Error::ChassisDataValidation { .. }
            | Error::DuplicateChassisName { .. }
            | Error::EquipmentDataValidation { .. }
            | Error::DuplicateEquipmentId { .. }
            | Error::UnknownChassis { .. }
            | Error::ProjectDirsUnavailable
            | Error::Io(_)
            | Error::Json(_)
            | Error::Csv(_) => ErrorKind::Input,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
