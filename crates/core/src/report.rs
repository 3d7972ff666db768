//! Report pipeline: raw bytes to a [`Report`].
//!
//! This is a thin orchestrator that calls each stage in order:
//! normalize, split into sections, parse each section, assemble.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::assemble::assemble;
use crate::ast::{Report, Unit};
use crate::classify::{classify, LineKind};
use crate::error::ReportError;
use crate::normalize::{lines, normalize, NormalizeOptions};
use crate::section::{split, Section};
use crate::turn::{parse_turn_line, Turn};
use crate::unit::parse_section;

/// Pipeline settings. Every field has a default so a partial config
/// table deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Replace control and non-ASCII characters with spaces.
    pub scrub_non_printable: bool,
    /// Order sections by clan, unit id and line before parsing.
    pub sort_sections: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            scrub_non_printable: false,
            sort_sections: true,
        }
    }
}

impl ParseOptions {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            scrub_non_printable: self.scrub_non_printable,
        }
    }
}

/// Parse a whole report from raw bytes.
pub fn parse_report(input: &[u8], options: &ParseOptions) -> Result<Report, ReportError> {
    let text = normalize(input, &options.normalize_options());
    parse_normalized(&lines(&text), options)
}

/// Parse a report that has already been broken into lines. Each line is
/// normalized on its own.
pub fn parse_report_lines<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<Report, ReportError> {
    let normalize_options = options.normalize_options();
    let lines: Vec<String> = lines
        .iter()
        .map(|l| normalize(l.as_ref().as_bytes(), &normalize_options))
        .collect();
    parse_normalized(&lines, options)
}

/// Normalize and split without parsing; used for the debug dump.
pub fn sections_of(input: &[u8], options: &ParseOptions) -> Vec<Section> {
    let text = normalize(input, &options.normalize_options());
    split(&lines(&text), options.sort_sections)
}

fn parse_normalized<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<Report, ReportError> {
    let turn = report_turn(lines);
    let sections = split(lines, options.sort_sections);
    debug!(sections = sections.len(), turn = ?turn, "report split");

    let units: Vec<Unit> = sections
        .iter()
        .filter_map(|section| match parse_section(section) {
            Ok(unit) => Some(unit),
            Err(e) => {
                warn!(section = section.id, error = %e, "section dropped");
                None
            }
        })
        .collect();

    assemble(turn, units)
}

/// The first readable turn-header line anywhere in the report.
fn report_turn<S: AsRef<str>>(lines: &[S]) -> Option<Turn> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| classify(l) == Some(LineKind::TurnHeader))
        .find_map(|l| parse_turn_line(l).ok())
}
