//! Error types for the report pipeline.
//!
//! Only [`ReportError`] can stop a report from being produced. Everything
//! else is data: [`FieldError`] values are attached to the smallest record
//! that owns the bad text, and [`SectionError`] drops one section while the
//! rest of the report carries on.

use serde::Serialize;

use crate::turn::Turn;

/// A problem with one field of one record. Never aborts parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum FieldError {
    #[error("invalid coordinates {text:?}")]
    InvalidCoordinates { text: String },

    #[error("unknown terrain {text:?}")]
    UnknownTerrain { text: String },

    /// Status line with no terrain name after the prefix.
    #[error("status line is missing the terrain")]
    MissingTerrain,

    #[error("invalid turn {text:?}")]
    InvalidTurn { text: String },

    /// Unit's turn line disagrees with the first turn line of the report.
    #[error("unit reports turn {found}, report is for turn {expected}")]
    TurnMismatch { expected: Turn, found: Turn },

    #[error("invalid follows line {text:?}")]
    InvalidFollows { text: String },

    #[error("invalid goes to line {text:?}")]
    InvalidGoesTo { text: String },

    #[error("invalid item find {text:?}")]
    InvalidItem { text: String },

    /// A classified line whose grammar rejected it outright, such as a
    /// movement line without its leading keyword.
    #[error("{line_kind} line does not match its grammar: {text:?}")]
    UnrecognizedLine { line_kind: String, text: String },

    #[error("fleet movement lines are not parsed")]
    UnsupportedFleetMovement,
}

/// A section that cannot produce a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum SectionError {
    #[error("line {line}: unit header is malformed: {text:?}")]
    MissingHeader { line: usize, text: String },
}

/// Report-level outcome. `NoTurnLine` and `NoUnits` reject the report;
/// `UnexpectedTurnNumber` is carried on an otherwise usable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ReportError {
    #[error("report has no turn line")]
    NoTurnLine,

    #[error("report has no unit headers")]
    NoUnits,

    #[error("{} unit(s) report a different turn", units.len())]
    UnexpectedTurnNumber { units: Vec<String> },
}

impl ReportError {
    /// Serialize to the JSON shape the command line prints on failure.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "detail": self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_serializes_with_tag() {
        let err = FieldError::InvalidCoordinates {
            text: "ab 0013".to_string(),
        };
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["error"], "invalid_coordinates");
        assert_eq!(v["text"], "ab 0013");
    }

    #[test]
    fn turn_mismatch_message_names_both_turns() {
        let err = FieldError::TurnMismatch {
            expected: Turn::new(901, 4).unwrap(),
            found: Turn::new(901, 3).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "unit reports turn 0901-03, report is for turn 0901-04"
        );
    }

    #[test]
    fn report_error_json_has_message_and_detail() {
        let err = ReportError::UnexpectedTurnNumber {
            units: vec!["0987e1".to_string()],
        };
        let v = err.to_json_value();
        assert_eq!(v["error"], "1 unit(s) report a different turn");
        assert_eq!(v["detail"]["error"], "unexpected_turn_number");
        assert_eq!(v["detail"]["units"][0], "0987e1");
    }
}
