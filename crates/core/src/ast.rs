//! Structured result types produced by the grammars.
//!
//! Every type here is plain data with public fields. Field errors and
//! excess input are stored on the smallest record that owns them, so a
//! consumer can show exactly which part of which line went wrong.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::codes::{Border, Item, Passage, Resource, Terrain};
use crate::coords::{Coordinates, Direction};
use crate::error::{FieldError, ReportError};
use crate::turn::Turn;

// ──────────────────────────────────────────────
// Units
// ──────────────────────────────────────────────

static UNIT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(?:[cefg][1-9])?$").expect("unit id regex"));

/// `NNNN` for a tribe, `NNNN` + `c|e|f|g` + digit for its sub-units.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn parse(text: &str) -> Option<UnitId> {
        UNIT_ID.is_match(text).then(|| UnitId(text.to_string()))
    }

    /// Leading four digits: the owning clan's tribe number.
    pub fn clan(&self) -> &str {
        &self.0[..4]
    }

    pub fn kind(&self) -> UnitKind {
        match self.0.as_bytes().get(4) {
            Some(b'c') => UnitKind::Courier,
            Some(b'e') => UnitKind::Element,
            Some(b'f') => UnitKind::Fleet,
            Some(b'g') => UnitKind::Garrison,
            _ => UnitKind::Tribe,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitKind {
    Tribe,
    Courier,
    Element,
    Fleet,
    Garrison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Line number of the unit header in the normalized report.
    pub line: usize,
    pub previous_hex: Coordinates,
    pub current_hex: Coordinates,
    pub turn: Option<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<Moves>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Unit {
    /// Every field error recorded anywhere under this unit.
    pub fn all_errors(&self) -> Vec<&FieldError> {
        let mut out: Vec<&FieldError> = self.errors.iter().collect();
        if let Some(moves) = &self.moves {
            out.extend(moves.errors.iter());
            let march = match &moves.movement {
                Some(Movement::Marches(steps)) => steps.as_slice(),
                _ => &[],
            };
            let patrols = moves.patrols.iter().flat_map(|p| p.steps.iter());
            for step in march.iter().chain(patrols) {
                out.extend(step.errors.iter());
            }
        }
        if let Some(status) = &self.status {
            out.extend(status.errors.iter());
        }
        out
    }
}

// ──────────────────────────────────────────────
// Movement
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Moves {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patrols: Vec<Patrol>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// The unit's own movement for the turn. At most one per unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Follows(UnitId),
    GoesTo(Coordinates),
    Marches(Vec<Step>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patrol {
    pub scout: u8,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Entered the hex in `direction`.
    Moved,
    /// A known failure message; the unit stayed put.
    Blocked,
    /// Observation without movement (scout reports, unparsed text).
    Stayed,
}

/// One `\`-delimited segment of a movement or scout line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub outcome: StepOutcome,
    pub from: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub to: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<Neighbor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<BorderEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub passages: Vec<PassageEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encounters: Vec<UnitId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemFound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excess_input: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Step {
    /// A step that observes `at` without moving.
    pub fn stay(at: Coordinates, terrain: Option<Terrain>) -> Step {
        Step {
            outcome: StepOutcome::Stayed,
            from: at,
            direction: None,
            to: at,
            terrain,
            neighbors: Vec::new(),
            borders: Vec::new(),
            passages: Vec::new(),
            resources: Vec::new(),
            encounters: Vec::new(),
            items: Vec::new(),
            hex_name: None,
            excess_input: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn moved(from: Coordinates, direction: Direction, terrain: Option<Terrain>) -> Step {
        Step {
            outcome: StepOutcome::Moved,
            direction: Some(direction),
            to: from.step(Some(direction)),
            ..Step::stay(from, terrain)
        }
    }

    pub fn blocked(at: Coordinates, terrain: Option<Terrain>) -> Step {
        Step {
            outcome: StepOutcome::Blocked,
            ..Step::stay(at, terrain)
        }
    }
}

// ──────────────────────────────────────────────
// Observations
// ──────────────────────────────────────────────

/// Terrain seen in the adjacent hexes in `directions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub terrain: Terrain,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorderEdge {
    pub border: Border,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageEdge {
    pub passage: Passage,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFound {
    pub quantity: u32,
    pub item: Item,
}

/// What a unit reports about the hex it ends the turn in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub unit: UnitId,
    pub coordinates: Coordinates,
    pub terrain: Terrain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<Neighbor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<BorderEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub passages: Vec<PassageEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encounters: Vec<UnitId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excess_input: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

// ──────────────────────────────────────────────
// Report
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub turn: Turn,
    pub units: Vec<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ids_validate_and_expose_clan() {
        let id = UnitId::parse("0987e1").unwrap();
        assert_eq!(id.clan(), "0987");
        assert_eq!(id.kind(), UnitKind::Element);
        assert_eq!(UnitId::parse("0987").unwrap().kind(), UnitKind::Tribe);
        assert!(UnitId::parse("0987e0").is_none());
        assert!(UnitId::parse("987").is_none());
        assert!(UnitId::parse("0987x1").is_none());
    }

    #[test]
    fn moved_step_computes_destination() {
        let from = Coordinates::parse("ab 1013").unwrap();
        let step = Step::moved(from, Direction::S, Some(Terrain::Prairie));
        assert_eq!(step.to, Coordinates::parse("ab 1014").unwrap());
        assert_eq!(step.outcome, StepOutcome::Moved);
    }

    #[test]
    fn empty_collections_are_omitted_from_json() {
        let at = Coordinates::parse("ab 1013").unwrap();
        let v = serde_json::to_value(Step::stay(at, None)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"outcome": "stayed", "from": "AB 1013", "to": "AB 1013"})
        );
    }
}
