//! Splitting a normalized report into one section per unit.
//!
//! A section is opened by a unit header and collects the lines that follow
//! it until the next header. Each slot keeps the first line seen; later
//! duplicates are dropped. A report that leaves out a status line therefore
//! lets the next unit's lines bleed into the open section until its header
//! appears. That is how the reports are laid out and is left alone.

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{classify, LineKind};

pub const SCOUT_SLOTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 1-based order of appearance in the report.
    pub id: usize,
    /// 1-based line number of the unit header.
    pub line: usize,
    /// Numeric clan prefix of the unit id, 0 when the header has none.
    pub clan_id: u16,
    pub unit_id: String,
    pub header: String,
    pub turn: Option<String>,
    pub movement: Option<MovementLine>,
    pub scouts: [Option<String>; SCOUT_SLOTS],
    pub status: Option<String>,
}

impl Section {
    fn open(id: usize, line: usize, header: &str) -> Section {
        let unit_id = header
            .split_once(' ')
            .and_then(|(_, rest)| rest.split(',').next())
            .unwrap_or_default()
            .to_string();
        let clan_id = unit_id.get(..4).and_then(|s| s.parse().ok()).unwrap_or(0);
        Section {
            id,
            line,
            clan_id,
            unit_id,
            header: header.to_string(),
            turn: None,
            movement: None,
            scouts: Default::default(),
            status: None,
        }
    }

    fn accept(&mut self, kind: LineKind, no: usize, text: &str) {
        let filled = match kind {
            LineKind::TurnHeader => fill(&mut self.turn, text),
            LineKind::UnitStatus => fill(&mut self.status, text),
            LineKind::ScoutLine(n) => match usize::from(n)
                .checked_sub(1)
                .and_then(|i| self.scouts.get_mut(i))
            {
                Some(slot) => fill(slot, text),
                None => false,
            },
            k if k.is_movement() => {
                if self.movement.is_some() {
                    false
                } else {
                    self.movement = Some(MovementLine {
                        kind: k,
                        text: text.to_string(),
                    });
                    true
                }
            }
            _ => false,
        };
        if !filled {
            warn!(
                section = self.id,
                line = no,
                kind = %kind,
                "duplicate line dropped"
            );
        }
    }

    /// Scout lines in slot order with their slot numbers.
    pub fn scout_lines(&self) -> impl Iterator<Item = (u8, &str)> {
        self.scouts
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|s| (i as u8 + 1, s)))
    }
}

fn fill(slot: &mut Option<String>, text: &str) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(text.to_string());
    true
}

/// Group normalized lines into sections. With `sort` set the result is
/// ordered by clan, then unit id, then header line; ties keep input order.
pub fn split<S: AsRef<str>>(lines: &[S], sort: bool) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let no = i + 1;
        let Some(kind) = classify(line) else {
            continue;
        };
        if kind == LineKind::UnitHeader {
            debug!(line = no, header = line, "section opened");
            sections.push(Section::open(sections.len() + 1, no, line));
            continue;
        }
        match sections.last_mut() {
            Some(section) => section.accept(kind, no, line),
            None => debug!(line = no, kind = %kind, "line before first unit header ignored"),
        }
    }
    if sort {
        sections.sort_by(|a, b| {
            a.clan_id
                .cmp(&b.clan_id)
                .then_with(|| a.unit_id.as_bytes().cmp(b.unit_id.as_bytes()))
                .then_with(|| a.line.cmp(&b.line))
        });
    }
    sections
}

/// Debug listing of the lines each section kept, in parse order.
pub fn dump_sections(sections: &[Section], separate_units: bool) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if separate_units && i > 0 {
            out.push('\n');
        }
        out.push_str(&section.header);
        out.push('\n');
        if let Some(turn) = &section.turn {
            out.push_str(turn);
            out.push('\n');
        }
        if let Some(movement) = &section.movement {
            out.push_str(&movement.text);
            out.push('\n');
        }
        for (_, scout) in section.scout_lines() {
            out.push_str(scout);
            out.push('\n');
        }
        if let Some(status) = &section.status {
            out.push_str(status);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &[&str] = &[
        "preamble line",
        "tribe 0987,,current hex = ab 1013,(previous hex = ab 1012)",
        "current turn 901-04(#53),spring,fine",
        "tribe movement:move\\s-pr",
        "scout 2:scout n-pr\\nothing of interest found",
        "scout 1:scout s-pr\\nothing of interest found",
        "0987 status:prairie",
        "",
        "element 0987e1,,current hex = ab 1013,(previous hex = ab 1013)",
        "current turn 901-04(#53),spring,fine",
        "tribe follows 0987",
        "tribe movement:move\\n-pr",
        "0987e1 status:prairie",
    ];

    #[test]
    fn one_section_per_header() {
        let sections = split(REPORT, true);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].unit_id, "0987");
        assert_eq!(sections[0].line, 2);
        assert_eq!(sections[0].clan_id, 987);
        assert_eq!(sections[1].unit_id, "0987e1");
        assert_eq!(sections[1].status.as_deref(), Some("0987e1 status:prairie"));
    }

    #[test]
    fn first_movement_line_wins() {
        let sections = split(REPORT, true);
        let movement = sections[1].movement.as_ref().unwrap();
        assert_eq!(movement.kind, LineKind::TribeFollows);
        assert_eq!(movement.text, "tribe follows 0987");
    }

    #[test]
    fn scouts_are_slotted_by_number() {
        let sections = split(REPORT, true);
        let scouts: Vec<u8> = sections[0].scout_lines().map(|(n, _)| n).collect();
        assert_eq!(scouts, vec![1, 2]);
    }

    #[test]
    fn duplicate_turn_and_status_are_dropped() {
        let lines = [
            "tribe 0987,,current hex = ab 1013,(previous hex = n/a)",
            "current turn 901-04(#53),spring,fine",
            "current turn 901-05(#54),spring,fine",
            "0987 status:prairie",
            "0987 status:swamp",
        ];
        let sections = split(&lines, true);
        assert_eq!(
            sections[0].turn.as_deref(),
            Some("current turn 901-04(#53),spring,fine")
        );
        assert_eq!(sections[0].status.as_deref(), Some("0987 status:prairie"));
    }

    #[test]
    fn sorts_by_clan_then_unit_then_line() {
        let lines = [
            "tribe 1234,,current hex = ab 1013,(previous hex = n/a)",
            "element 0987e1,,current hex = ab 1013,(previous hex = n/a)",
            "tribe 0987,,current hex = ab 1013,(previous hex = n/a)",
            "element 0987e1,,current hex = ab 1014,(previous hex = n/a)",
        ];
        let sorted: Vec<(String, usize)> = split(&lines, true)
            .into_iter()
            .map(|s| (s.unit_id, s.line))
            .collect();
        assert_eq!(
            sorted,
            vec![
                ("0987".to_string(), 3),
                ("0987e1".to_string(), 2),
                ("0987e1".to_string(), 4),
                ("1234".to_string(), 1),
            ]
        );
        let unsorted: Vec<usize> = split(&lines, false).iter().map(|s| s.line).collect();
        assert_eq!(unsorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn dump_lists_lines_in_parse_order() {
        let sections = split(REPORT, true);
        let dump = dump_sections(&sections[..1], true);
        assert_eq!(
            dump,
            "tribe 0987,,current hex = ab 1013,(previous hex = ab 1012)\n\
             current turn 901-04(#53),spring,fine\n\
             tribe movement:move\\s-pr\n\
             scout 1:scout s-pr\\nothing of interest found\n\
             scout 2:scout n-pr\\nothing of interest found\n\
             0987 status:prairie\n"
        );
        let both = dump_sections(&sections, true);
        assert!(both.contains("0987 status:prairie\n\nelement 0987e1"));
        let compact = dump_sections(&sections, false);
        assert!(compact.contains("0987 status:prairie\nelement 0987e1"));
    }
}
