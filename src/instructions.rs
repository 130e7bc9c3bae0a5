// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use crate::{Coordinate, Path};

/// Minimal absolute [turn_angle], in degrees, for which a turn instruction is generated.
pub const TURN_THRESHOLD: f64 = 45.0;

/// What the traveler has to do at a [NavigationInstruction::point].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(C)]
pub enum InstructionKind {
    Start,
    TurnLeft,
    TurnRight,
    Straight,
    Arrive,
}

impl InstructionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TurnLeft => "turn_left",
            Self::TurnRight => "turn_right",
            Self::Straight => "straight",
            Self::Arrive => "arrive",
        }
    }
}

/// Single step of turn-by-turn directions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationInstruction {
    pub kind: InstructionKind,

    /// Human readable description, in the requested [Language].
    pub text: String,

    /// Distance, in meters, to travel along the route after this instruction,
    /// up to the point of the next one. Zero for [InstructionKind::Arrive].
    pub distance: f64,

    /// Position at which the instruction applies.
    pub point: Coordinate,
}

/// Language of [NavigationInstruction::text].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(C)]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    /// ISO 639-1 code of the language.
    pub fn code(self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    fn describe(self, kind: InstructionKind, street: Option<&str>) -> String {
        use InstructionKind::*;

        let (action, preposition) = match (self, kind) {
            (Self::Spanish, Start) => ("Inicia el recorrido", "por"),
            (Self::Spanish, TurnLeft) => ("Gira a la izquierda", "en"),
            (Self::Spanish, TurnRight) => ("Gira a la derecha", "en"),
            (Self::Spanish, Straight) => ("Continúa", "por"),
            (Self::Spanish, Arrive) => return "Has llegado a tu destino".to_string(),

            (Self::English, Start) => ("Start", "along"),
            (Self::English, TurnLeft) => ("Turn left", "onto"),
            (Self::English, TurnRight) => ("Turn right", "onto"),
            (Self::English, Straight) => ("Continue", "onto"),
            (Self::English, Arrive) => return "You have arrived at your destination".to_string(),
        };

        match street {
            Some(street) => format!("{} {} {}", action, preposition, street),
            None => action.to_string(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0:?} (expected es or en)")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Self::Spanish),
            "en" | "english" => Ok(Self::English),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

/// Calculates the signed change of direction, in degrees within (-180, 180],
/// when going from `prev` through `curr` to `next`.
///
/// Directions are measured counter-clockwise from east on a plane of raw
/// longitude (x) and latitude (y) degrees, so positive values are left turns
/// and negative values are right turns.
pub fn turn_angle(prev: Coordinate, curr: Coordinate, next: Coordinate) -> f64 {
    let incoming = (curr.lat - prev.lat).atan2(curr.lng - prev.lng);
    let outgoing = (next.lat - curr.lat).atan2(next.lng - curr.lng);

    let delta = (outgoing - incoming).to_degrees();
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Converts a [Path] into turn-by-turn [NavigationInstructions](NavigationInstruction).
///
/// The first instruction is always [InstructionKind::Start] and the last one
/// is always [InstructionKind::Arrive]. An intermediate node produces a turn if the
/// path bends by more than [TURN_THRESHOLD], [InstructionKind::Straight] if it
/// continues onto a differently named street, and nothing otherwise.
///
/// Returns no instructions for an empty path, or for one whose edges don't
/// join its nodes (`edges.len() + 1 != nodes.len()`).
pub fn generate_instructions(path: &Path, language: Language) -> Vec<NavigationInstruction> {
    let nodes = &path.nodes;
    if nodes.is_empty() || path.edges.len() + 1 != nodes.len() {
        return Vec::default();
    }

    let mut maneuvers: Vec<(usize, InstructionKind, Option<&str>)> = vec![(
        0,
        InstructionKind::Start,
        path.edges.first().map(|e| e.street_name.as_str()),
    )];

    for i in 1..nodes.len().saturating_sub(1) {
        let incoming = path.edges[i - 1];
        let outgoing = path.edges[i];

        let angle = turn_angle(
            nodes[i - 1].position(),
            nodes[i].position(),
            nodes[i + 1].position(),
        );

        let kind = if angle.abs() > TURN_THRESHOLD {
            if angle > 0.0 {
                InstructionKind::TurnLeft
            } else {
                InstructionKind::TurnRight
            }
        } else if incoming.street_name != outgoing.street_name {
            InstructionKind::Straight
        } else {
            continue;
        };

        maneuvers.push((i, kind, Some(outgoing.street_name.as_str())));
    }

    maneuvers.push((nodes.len() - 1, InstructionKind::Arrive, None));

    maneuvers
        .iter()
        .enumerate()
        .map(|(k, &(at, kind, street))| {
            let until = maneuvers.get(k + 1).map_or(at, |&(next_at, _, _)| next_at);
            NavigationInstruction {
                kind,
                text: language.describe(kind, street),
                distance: path.edges[at..until]
                    .iter()
                    .fold(0.0, |total, e| total + e.distance),
                point: nodes[at].position(),
            }
        })
        .collect()
}
