//! Report assembly: combine parsed units and enforce report-level rules.

use tracing::warn;

use crate::ast::{Report, Unit};
use crate::error::{FieldError, ReportError};
use crate::turn::Turn;

/// Build the report for `turn`. Units without a turn line inherit the
/// report's turn; units that name a different turn keep theirs, get a
/// [`FieldError::TurnMismatch`] and mark the report with
/// [`ReportError::UnexpectedTurnNumber`].
///
/// A report with no turn or no units is rejected.
pub fn assemble(turn: Option<Turn>, mut units: Vec<Unit>) -> Result<Report, ReportError> {
    let turn = turn.ok_or(ReportError::NoTurnLine)?;
    if units.is_empty() {
        return Err(ReportError::NoUnits);
    }

    let mut mismatched = Vec::new();
    for unit in &mut units {
        match unit.turn {
            None => unit.turn = Some(turn),
            Some(found) if found != turn => {
                warn!(unit = %unit.id, %found, expected = %turn, "unit reports a different turn");
                unit.errors.push(FieldError::TurnMismatch {
                    expected: turn,
                    found,
                });
                mismatched.push(unit.id.to_string());
            }
            Some(_) => {}
        }
    }

    let error = (!mismatched.is_empty())
        .then_some(ReportError::UnexpectedTurnNumber { units: mismatched });
    Ok(Report { turn, units, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::UnitId;
    use crate::coords::Coordinates;

    fn unit(id: &str, turn: Option<Turn>) -> Unit {
        let id = UnitId::parse(id).unwrap();
        Unit {
            kind: id.kind(),
            id,
            name: None,
            line: 1,
            previous_hex: Coordinates::NA,
            current_hex: Coordinates::NA,
            turn,
            moves: None,
            status: None,
            errors: Vec::new(),
        }
    }

    fn t(year: u16, month: u8) -> Turn {
        Turn::new(year, month).unwrap()
    }

    #[test]
    fn rejects_missing_turn_or_units() {
        assert_eq!(
            assemble(None, vec![unit("0987", None)]),
            Err(ReportError::NoTurnLine)
        );
        assert_eq!(assemble(Some(t(901, 4)), vec![]), Err(ReportError::NoUnits));
    }

    #[test]
    fn units_inherit_report_turn() {
        let report = assemble(Some(t(901, 4)), vec![unit("0987e1", None)]).unwrap();
        assert_eq!(report.units[0].turn, Some(t(901, 4)));
        assert!(report.error.is_none());
    }

    #[test]
    fn mismatched_turn_flags_unit_and_report() {
        let report = assemble(
            Some(t(901, 4)),
            vec![unit("0987", Some(t(901, 4))), unit("0987e1", Some(t(901, 3)))],
        )
        .unwrap();
        assert!(report.units[0].errors.is_empty());
        assert_eq!(
            report.units[1].errors,
            vec![FieldError::TurnMismatch {
                expected: t(901, 4),
                found: t(901, 3)
            }]
        );
        assert_eq!(report.units[1].turn, Some(t(901, 3)));
        assert_eq!(
            report.error,
            Some(ReportError::UnexpectedTurnNumber {
                units: vec!["0987e1".to_string()]
            })
        );
    }
}
