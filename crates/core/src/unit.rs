//! Section to unit: run each line of a section through its grammar.

use tracing::{debug, warn};

use crate::ast::{Movement, Moves, Patrol, Unit};
use crate::classify::LineKind;
use crate::error::{FieldError, SectionError};
use crate::grammar;
use crate::repair::repair;
use crate::section::Section;
use crate::turn;

/// Parse one section. Only an unreadable unit header fails; every other
/// problem is recorded as a field error on the unit.
pub fn parse_section(section: &Section) -> Result<Unit, SectionError> {
    let header = grammar::parse_unit_header(&section.header).ok_or_else(|| {
        SectionError::MissingHeader {
            line: section.line,
            text: section.header.clone(),
        }
    })?;
    debug!(unit = %header.id, line = section.line, "parsing section");

    let mut unit = Unit {
        id: header.id,
        kind: header.kind,
        name: header.name,
        line: section.line,
        previous_hex: header.previous_hex,
        current_hex: header.current_hex,
        turn: None,
        moves: None,
        status: None,
        errors: header.errors,
    };

    if let Some(text) = &section.turn {
        match turn::parse_turn_line(text) {
            Ok(t) => unit.turn = Some(t),
            Err(e) => unit.errors.push(e),
        }
    }

    let mut moves = Moves::default();
    if let Some(line) = &section.movement {
        let text = repair(line.kind, &line.text);
        match line.kind {
            LineKind::TribeFollows => match grammar::parse_follows(&text) {
                Ok(id) => moves.movement = Some(Movement::Follows(id)),
                Err(e) => moves.errors.push(e),
            },
            LineKind::TribeGoesTo => match grammar::parse_goes_to(&text) {
                Ok(to) => moves.movement = Some(Movement::GoesTo(to)),
                Err(e) => moves.errors.push(e),
            },
            LineKind::TribeMovement => match grammar::parse_march(unit.previous_hex, &text) {
                Some(steps) => moves.movement = Some(Movement::Marches(steps)),
                None => moves.errors.push(unrecognized(line.kind, &text)),
            },
            LineKind::FleetMovement => {
                debug!(unit = %unit.id, "fleet movement not parsed");
                moves.errors.push(FieldError::UnsupportedFleetMovement);
            }
            _ => {}
        }
    }
    for (slot, line) in section.scout_lines() {
        let kind = LineKind::ScoutLine(slot);
        let text = repair(kind, line);
        match grammar::parse_patrol(unit.current_hex, &text) {
            Some((scout, steps)) => moves.patrols.push(Patrol { scout, steps }),
            None => moves.errors.push(unrecognized(kind, &text)),
        }
    }
    if moves != Moves::default() {
        unit.moves = Some(moves);
    }

    if let Some(line) = &section.status {
        let text = repair(LineKind::UnitStatus, line);
        match grammar::parse_status(unit.current_hex, &text) {
            Ok(status) => unit.status = Some(status),
            Err(e) => {
                warn!(unit = %unit.id, error = %e, "status line rejected");
                unit.errors.push(e);
            }
        }
    }

    Ok(unit)
}

fn unrecognized(kind: LineKind, text: &str) -> FieldError {
    FieldError::UnrecognizedLine {
        line_kind: kind.to_string(),
        text: text.to_string(),
    }
}
