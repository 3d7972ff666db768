//! Line classification: which role, if any, a normalized line plays.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineKind {
    UnitHeader,
    TurnHeader,
    TribeFollows,
    TribeGoesTo,
    TribeMovement,
    FleetMovement,
    /// Scout slot 1 through 8.
    ScoutLine(u8),
    UnitStatus,
}

impl LineKind {
    /// Kinds that occupy the single movement slot of a section.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            LineKind::TribeFollows
                | LineKind::TribeGoesTo
                | LineKind::TribeMovement
                | LineKind::FleetMovement
        )
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::UnitHeader => f.write_str("unit header"),
            LineKind::TurnHeader => f.write_str("turn header"),
            LineKind::TribeFollows => f.write_str("tribe follows"),
            LineKind::TribeGoesTo => f.write_str("tribe goes to"),
            LineKind::TribeMovement => f.write_str("tribe movement"),
            LineKind::FleetMovement => f.write_str("fleet movement"),
            LineKind::ScoutLine(n) => write!(f, "scout {}", n),
            LineKind::UnitStatus => f.write_str("unit status"),
        }
    }
}

static UNIT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:tribe \d{4}|courier \d{4}c\d|element \d{4}e\d|fleet \d{4}f\d|garrison \d{4}g\d),",
    )
    .expect("unit header regex")
});

static TURN_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^current turn \d{3,4}-\d{1,2}\(#\d+\),").expect("turn header regex")
});

static FLEET_MOVEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:calm|mild|strong|gale) (?:ne|se|sw|nw|n|s) fleet movement:")
        .expect("fleet movement regex")
});

static SCOUT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^scout ([1-8]):").expect("scout line regex"));

static UNIT_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(?:[cefg]\d)? status:").expect("unit status regex"));

/// Classify one normalized line. `None` means the line has no role and is
/// ignored by the splitter.
pub fn classify(line: &str) -> Option<LineKind> {
    if UNIT_HEADER.is_match(line) {
        return Some(LineKind::UnitHeader);
    }
    if TURN_HEADER.is_match(line) {
        return Some(LineKind::TurnHeader);
    }
    if line.starts_with("tribe follows ") {
        return Some(LineKind::TribeFollows);
    }
    if line.starts_with("tribe goes to ") {
        return Some(LineKind::TribeGoesTo);
    }
    if line.starts_with("tribe movement:") {
        return Some(LineKind::TribeMovement);
    }
    if FLEET_MOVEMENT.is_match(line) {
        return Some(LineKind::FleetMovement);
    }
    if let Some(caps) = SCOUT_LINE.captures(line) {
        let slot = caps[1].parse().ok()?;
        return Some(LineKind::ScoutLine(slot));
    }
    if UNIT_STATUS.is_match(line) {
        return Some(LineKind::UnitStatus);
    }
    None
}
