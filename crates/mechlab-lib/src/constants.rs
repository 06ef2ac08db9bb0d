//! Construction rule constants shared by chassis, equipment and loadouts.

/// Armor points provided by one ton of standard armor.
pub const ARMOR_POINTS_PER_TON: f64 = 16.0;

/// Maximum armor of the head, regardless of internal structure.
pub const HEAD_MAX_ARMOR: u32 = 9;

/// Upper bound on the internal structure points of a single component.
pub const MAX_INTERNAL_POINTS: u32 = 1_000;

/// Internal structure weighs one tenth of the chassis mass.
pub const INTERNAL_STRUCTURE_DIVISOR: f64 = 10.0;

/// Engine rating per engine-internal heat sink.
pub const ENGINE_RATING_PER_HEAT_SINK: u32 = 25;

/// Upper bound on heat sinks an engine carries internally.
pub const MAX_ENGINE_HEAT_SINKS: u32 = 10;

/// Heat dissipated per second by a single standard heat sink.
pub const HEAT_SINK_DISSIPATION: f64 = 0.1;

/// Slots an XL engine occupies in each side torso.
pub const XL_SIDE_TORSO_SLOTS: u32 = 3;

/// Tolerance for tonnage comparisons.
///
/// Tonnages are multiples of 1/16 t in practice so sums are exact in `f64`;
/// the tolerance only guards hand-entered reference values.
pub const TONNAGE_EPSILON: f64 = 1e-6;
