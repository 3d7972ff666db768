//! Unit status line: `<unit id> status:<terrain name>[,<field>...]`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::accept::{self, FieldSet};
use crate::ast::{Status, UnitId};
use crate::coords::Coordinates;
use crate::error::FieldError;

static STATUS_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}(?:[cefg][1-9])?) status:").expect("regex"));

/// Parse a status line observed from `at`, the unit's current hex.
pub fn parse_status(at: Coordinates, line: &str) -> Result<Status, FieldError> {
    let unrecognized = || FieldError::UnrecognizedLine {
        line_kind: "unit status".to_string(),
        text: line.to_string(),
    };
    let caps = STATUS_PREFIX.captures(line).ok_or_else(unrecognized)?;
    let unit = caps
        .get(1)
        .and_then(|id| UnitId::parse(id.as_str()))
        .ok_or_else(unrecognized)?;
    let prefix_len = caps.get(0).map_or(0, |m| m.end());

    let (terrain, rest) =
        accept::terrain_name(&line[prefix_len..]).ok_or(FieldError::MissingTerrain)?;
    let obs = accept::fields(rest, FieldSet::Status);

    Ok(Status {
        unit,
        coordinates: at,
        terrain,
        hex_name: obs.hex_name,
        resources: obs.resources,
        neighbors: obs.neighbors,
        borders: obs.borders,
        passages: obs.passages,
        encounters: obs.encounters,
        excess_input: obs.excess_input,
        errors: obs.errors,
    })
}
