//! Heuristic fixes for hand-transcribed movement and status lines.
//!
//! Reports are retyped by players and the delimiters are the first thing
//! to go wrong: doubled backslashes, a comma where a backslash belongs, a
//! unit id glued to the wrong segment. Each rule here rewrites one known
//! mistake into the canonical form the grammars expect. Rules are plain
//! text to text and run in a fixed order.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::LineKind;

const TRIBE_MOVE_PREFIX: &str = "tribe movement:move";

/// Phrases that always start a new scout segment.
const SCOUT_SEGMENT_STARTS: &[&str] = &[
    "nothing of interest found",
    "no groups located",
    "patrolled and found ",
    "can't move on ",
    "no ford on ",
    "not enough m.p's",
    "cannot move wagons",
];

static BACKSLASH_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\+-+ *").expect("regex"));
static BACKSLASH_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\+,+").expect("regex"));
static COMMA_BACKSLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r",+\\").expect("regex"));
static BACKSLASH_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\+(\d{4}(?:[cefg]\d)?)").expect("regex"));
static DIRECTION_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(ne|se|sw|nw|n|s) (\d{4}(?:[cefg]\d)?)").expect("regex"));
static BACKSLASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\\+").expect("regex"));
static COMMA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r",,+").expect("regex"));
static DIRECTION_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" (?:nw|ne|n|sw|se|s),(?:nw|ne|n|sw|se|s)(?:[,\\]|$)").expect("regex")
});
static UNIT_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}(?:[cefg][1-9])?,[0-9]{4}(?:[cefg][1-9])?").expect("regex")
});

/// Apply the rules for `kind` to a normalized line. Kinds without rules
/// come back unchanged.
pub fn repair(kind: LineKind, line: &str) -> String {
    match kind {
        LineKind::TribeMovement => {
            let line = force_backslash_after(line, TRIBE_MOVE_PREFIX);
            list_cleanup(&delimiters(&line))
        }
        LineKind::ScoutLine(_) => {
            let line = force_backslash_after(line, &scout_prefix(line));
            let mut line = delimiters(&line);
            for phrase in SCOUT_SEGMENT_STARTS {
                line = line.replace(&format!(",{}", phrase), &format!("\\{}", phrase));
            }
            list_cleanup(&line)
        }
        LineKind::FleetMovement => {
            let line = delimiters(line).replace(",)", ")");
            line.trim_end_matches('\\').to_string()
        }
        LineKind::UnitStatus => list_cleanup(&delimiters(line)),
        _ => line.to_string(),
    }
}

/// Rules shared by every repaired kind: backslash/dash/comma clutter, unit
/// ids with the wrong delimiter, runs of delimiters, trailing backslashes.
fn delimiters(line: &str) -> String {
    let line = BACKSLASH_DASH.replace_all(line, "\\");
    let line = BACKSLASH_COMMA.replace_all(&line, "\\");
    let line = COMMA_BACKSLASH.replace_all(&line, "\\");
    let line = BACKSLASH_UNIT.replace_all(&line, ",${1}");
    let line = DIRECTION_UNIT.replace_all(&line, "${1},${2}");
    let line = BACKSLASH_RUN.replace_all(&line, "\\");
    let line = COMMA_RUN.replace_all(&line, ",");
    line.trim_end_matches('\\').to_string()
}

/// `"scout 3:scout"` for a scout line, empty otherwise.
fn scout_prefix(line: &str) -> String {
    match line.get(..13) {
        Some(p) if p.starts_with("scout ") && p.ends_with(":scout") => p.to_string(),
        _ => String::new(),
    }
}

/// The keyword must be followed by a backslash; transcribers often type a
/// space instead.
fn force_backslash_after<'a>(line: &'a str, prefix: &str) -> Cow<'a, str> {
    if prefix.is_empty() || !line.starts_with(prefix) {
        return Cow::Borrowed(line);
    }
    match line[prefix.len()..].strip_prefix(' ') {
        Some(rest) => Cow::Owned(format!("{}\\{}", prefix, rest)),
        None => Cow::Borrowed(line),
    }
}

/// `"pr n,s"` becomes `"pr n s"` and `"0987,0988"` becomes `"0987 0988"`.
fn list_cleanup(line: &str) -> String {
    let line = replace_first_comma_while(line, &DIRECTION_LIST);
    replace_first_comma_while(&line, &UNIT_LIST)
}

fn replace_first_comma_while(line: &str, rx: &Regex) -> String {
    let mut line = line.to_string();
    while let Some(m) = rx.find(&line) {
        let Some(offset) = line[m.range()].find(',') else {
            break;
        };
        let at = m.start() + offset;
        line.replace_range(at..=at, " ");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_backslash_dash_and_comma_clutter() {
        assert_eq!(
            repair(LineKind::TribeMovement, "tribe movement:move\\-- n-pr\\,s-gh,\\"),
            "tribe movement:move\\n-pr\\s-gh"
        );
    }

    #[test]
    fn forces_backslash_after_keyword() {
        assert_eq!(
            repair(LineKind::TribeMovement, "tribe movement:move n-pr"),
            "tribe movement:move\\n-pr"
        );
        assert_eq!(
            repair(LineKind::ScoutLine(1), "scout 1:scout n-pr"),
            "scout 1:scout\\n-pr"
        );
    }

    #[test]
    fn moves_unit_ids_to_comma_delimiters() {
        assert_eq!(
            repair(LineKind::TribeMovement, "tribe movement:move\\n-pr\\0988"),
            "tribe movement:move\\n-pr,0988"
        );
        assert_eq!(
            repair(LineKind::UnitStatus, "0987 status:prairie,river s 0988"),
            "0987 status:prairie,river s,0988"
        );
    }

    #[test]
    fn collapses_runs_and_trailing_backslashes() {
        assert_eq!(
            repair(LineKind::TribeMovement, "tribe movement:move\\\\\\n-pr,,river s\\\\"),
            "tribe movement:move\\n-pr,river s"
        );
    }

    #[test]
    fn fleet_drops_comma_before_paren() {
        assert_eq!(
            repair(
                LineKind::FleetMovement,
                "calm nw fleet movement:move\\n-o(nw o,ne o,)\\"
            ),
            "calm nw fleet movement:move\\n-o(nw o,ne o)"
        );
    }

    #[test]
    fn scout_phrases_start_new_segments() {
        assert_eq!(
            repair(
                LineKind::ScoutLine(2),
                "scout 2:scout\\n-pr,nothing of interest found"
            ),
            "scout 2:scout\\n-pr\\nothing of interest found"
        );
        assert_eq!(
            repair(
                LineKind::ScoutLine(2),
                "scout 2:scout\\n-pr,can't move on ocean to n of hex,patrolled and found 0988"
            ),
            "scout 2:scout\\n-pr\\can't move on ocean to n of hex\\patrolled and found 0988"
        );
    }

    #[test]
    fn comma_lists_become_space_lists() {
        assert_eq!(
            repair(LineKind::TribeMovement, "tribe movement:move\\n-pr,l n,ne,s"),
            "tribe movement:move\\n-pr,l n ne s"
        );
        assert_eq!(
            repair(
                LineKind::ScoutLine(1),
                "scout 1:scout\\n-pr\\patrolled and found 0988,0989e1,1234"
            ),
            "scout 1:scout\\n-pr\\patrolled and found 0988 0989e1 1234"
        );
        // a lone direction followed by another field is not a list
        assert_eq!(
            repair(LineKind::UnitStatus, "0987 status:prairie,pr n,river s"),
            "0987 status:prairie,pr n,river s"
        );
    }

    #[test]
    fn other_kinds_are_untouched() {
        let line = "tribe follows 0988";
        assert_eq!(repair(LineKind::TribeFollows, line), line);
    }
}
