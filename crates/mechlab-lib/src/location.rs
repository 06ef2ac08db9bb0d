//! Mech body locations and hardpoint types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A body location of a mech. Every chassis defines exactly one component
/// per location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Head,
    LeftArm,
    LeftTorso,
    CenterTorso,
    RightTorso,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Location {
    /// All locations in canonical order.
    pub const ALL: [Location; 8] = [
        Location::Head,
        Location::LeftArm,
        Location::LeftTorso,
        Location::CenterTorso,
        Location::RightTorso,
        Location::RightArm,
        Location::LeftLeg,
        Location::RightLeg,
    ];

    /// Position of this location in [`Location::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// snake_case name used in data files.
    pub fn name(self) -> &'static str {
        match self {
            Location::Head => "head",
            Location::LeftArm => "left_arm",
            Location::LeftTorso => "left_torso",
            Location::CenterTorso => "center_torso",
            Location::RightTorso => "right_torso",
            Location::RightArm => "right_arm",
            Location::LeftLeg => "left_leg",
            Location::RightLeg => "right_leg",
        }
    }

    /// Two-letter code used in compact output.
    pub fn short_name(self) -> &'static str {
        match self {
            Location::Head => "HD",
            Location::LeftArm => "LA",
            Location::LeftTorso => "LT",
            Location::CenterTorso => "CT",
            Location::RightTorso => "RT",
            Location::RightArm => "RA",
            Location::LeftLeg => "LL",
            Location::RightLeg => "RL",
        }
    }

    /// True for the left and right torso.
    pub fn is_side_torso(self) -> bool {
        matches!(self, Location::LeftTorso | Location::RightTorso)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Location::ALL
            .into_iter()
            .find(|loc| {
                loc.name().eq_ignore_ascii_case(needle)
                    || loc.short_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown location '{}'", needle))
    }
}

/// Kind of mount point a component offers for weapons and some modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardpointType {
    Energy,
    Ballistic,
    Missile,
    Ams,
    Ecm,
}

impl HardpointType {
    pub const ALL: [HardpointType; 5] = [
        HardpointType::Energy,
        HardpointType::Ballistic,
        HardpointType::Missile,
        HardpointType::Ams,
        HardpointType::Ecm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HardpointType::Energy => "energy",
            HardpointType::Ballistic => "ballistic",
            HardpointType::Missile => "missile",
            HardpointType::Ams => "ams",
            HardpointType::Ecm => "ecm",
        }
    }

    /// Single-letter code used in compact output.
    pub fn code(self) -> char {
        match self {
            HardpointType::Energy => 'E',
            HardpointType::Ballistic => 'B',
            HardpointType::Missile => 'M',
            HardpointType::Ams => 'A',
            HardpointType::Ecm => 'C',
        }
    }
}

impl fmt::Display for HardpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HardpointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        HardpointType::ALL
            .into_iter()
            .find(|hp| hp.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown hardpoint type '{}'", needle))
    }
}
