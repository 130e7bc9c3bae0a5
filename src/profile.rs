// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use crate::RoadType;

/// Travel mode, deciding which [Edges](crate::Edge) may be used
/// and how long a route is expected to take.
///
/// The profile never changes the cost of an edge - routes always
/// minimize the total distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(C)]
pub enum Profile {
    #[default]
    Walking,
    Driving,
    Cycling,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Walking, Profile::Driving, Profile::Cycling];

    /// Human readable name of the profile, as accepted by [Profile::from_str].
    pub fn name(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Cycling => "cycling",
        }
    }

    /// Checks if edges of the given [RoadType] may be traversed.
    ///
    /// Only driving is restricted, to non-footpaths. Cycling may use every road type,
    /// including footpaths and arterials.
    pub fn allows(self, road_type: RoadType) -> bool {
        !(self == Self::Driving && road_type == RoadType::Path)
    }

    /// Flat average speed, in km/h, used for duration estimates.
    pub fn speed_kmh(self) -> f64 {
        match self {
            Self::Walking => 5.0,
            Self::Cycling => 15.0,
            Self::Driving => 30.0,
        }
    }

    /// Estimates how many seconds covering `distance` meters takes, rounded up.
    pub fn estimate_duration(self, distance: f64) -> u64 {
        // Multiply first - all factors are integral, so common distances stay exact
        (distance * 3600.0 / (self.speed_kmh() * 1000.0)).ceil() as u64
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile: {0:?} (expected walking, driving or cycling)")]
pub struct ParseProfileError(String);

impl FromStr for Profile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseProfileError(s.to_string()))
    }
}
