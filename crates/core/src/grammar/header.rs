//! Unit header, follows and goes-to lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{UnitId, UnitKind};
use crate::coords::Coordinates;
use crate::error::FieldError;

static UNIT_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(tribe|courier|element|fleet|garrison) (\d{4}(?:[cefg][1-9])?),").expect("regex")
});
static CURRENT_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"current hex = ([^,()]*)").expect("regex"));
static PREVIOUS_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(previous hex = ([^,()]*)\)").expect("regex"));
static FOLLOWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tribe follows (\d{4}(?:[cefg][1-9])?)$").expect("regex"));
static GOES_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tribe goes to ([a-z#]{2} \d{4}|n/a)$").expect("regex"));

/// The parsed first line of a unit section.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitHeader {
    pub kind: UnitKind,
    pub id: UnitId,
    pub name: Option<String>,
    pub current_hex: Coordinates,
    pub previous_hex: Coordinates,
    /// Coordinate problems. The affected hex is left as n/a.
    pub errors: Vec<FieldError>,
}

/// `<kind> <id>,<name>,current hex = <coords>,(previous hex = <coords>)`.
///
/// `None` only when the kind and id cannot be read; bad coordinates are
/// recorded on the header instead.
pub fn parse_unit_header(line: &str) -> Option<UnitHeader> {
    let caps = UNIT_DECLARATION.captures(line)?;
    let kind = match &caps[1] {
        "tribe" => UnitKind::Tribe,
        "courier" => UnitKind::Courier,
        "element" => UnitKind::Element,
        "fleet" => UnitKind::Fleet,
        _ => UnitKind::Garrison,
    };
    let id = UnitId::parse(&caps[2])?;
    if id.kind() != kind {
        return None;
    }
    let rest = &line[caps.get(0)?.end()..];
    let name = rest
        .split(',')
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty() && !n.starts_with("current hex"))
        .map(str::to_string);

    let mut errors = Vec::new();
    let mut hex = |rx: &Regex, label: &str| -> Coordinates {
        let text = rx
            .captures(rest)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());
        match text {
            Some(text) => Coordinates::parse(&text).unwrap_or_else(|e| {
                errors.push(e);
                Coordinates::NA
            }),
            None => {
                errors.push(FieldError::InvalidCoordinates {
                    text: format!("missing {}", label),
                });
                Coordinates::NA
            }
        }
    };
    let current_hex = hex(&CURRENT_HEX, "current hex");
    let previous_hex = hex(&PREVIOUS_HEX, "previous hex");

    Some(UnitHeader {
        kind,
        id,
        name,
        current_hex,
        previous_hex,
        errors,
    })
}

/// `tribe follows <unit id>`
pub fn parse_follows(line: &str) -> Result<UnitId, FieldError> {
    FOLLOWS
        .captures(line)
        .and_then(|c| UnitId::parse(&c[1]))
        .ok_or_else(|| FieldError::InvalidFollows {
            text: line.to_string(),
        })
}

/// `tribe goes to <coords>`
pub fn parse_goes_to(line: &str) -> Result<Coordinates, FieldError> {
    let caps = GOES_TO
        .captures(line)
        .ok_or_else(|| FieldError::InvalidGoesTo {
            text: line.to_string(),
        })?;
    Coordinates::parse(&caps[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> Coordinates {
        Coordinates::parse(text).unwrap()
    }

    #[test]
    fn parses_each_unit_kind() {
        for (line, kind, id) in [
            (
                "tribe 0987,,current hex = ab 1013,(previous hex = ab 1211)",
                UnitKind::Tribe,
                "0987",
            ),
            (
                "courier 0987c1,,current hex = ab 1013,(previous hex = ab 1211)",
                UnitKind::Courier,
                "0987c1",
            ),
            (
                "element 0987e1,,current hex = ab 1013,(previous hex = ab 1211)",
                UnitKind::Element,
                "0987e1",
            ),
            (
                "fleet 0987f1,,current hex = ab 1013,(previous hex = ab 1211)",
                UnitKind::Fleet,
                "0987f1",
            ),
            (
                "garrison 0987g1,,current hex = ab 1013,(previous hex = ab 1211)",
                UnitKind::Garrison,
                "0987g1",
            ),
        ] {
            let h = parse_unit_header(line).unwrap();
            assert_eq!(h.kind, kind, "{}", line);
            assert_eq!(h.id.as_str(), id);
            assert_eq!(h.name, None);
            assert_eq!(h.current_hex, at("ab 1013"));
            assert_eq!(h.previous_hex, at("ab 1211"));
            assert!(h.errors.is_empty());
        }
    }

    #[test]
    fn na_and_obscured_hexes() {
        let h = parse_unit_header("garrison 0987g2,,current hex = ab 1013,(previous hex = n/a)")
            .unwrap();
        assert!(h.previous_hex.is_na());

        let h = parse_unit_header("tribe 1987,,current hex = ## 1013,(previous hex = ## 1211)")
            .unwrap();
        assert!(h.current_hex.is_obscured());
        assert_eq!(h.previous_hex.to_string(), "## 1211");
    }

    #[test]
    fn bad_coordinates_are_field_errors() {
        let h = parse_unit_header("tribe 1987,,current hex = na,(previous hex = ab 11)").unwrap();
        assert!(h.current_hex.is_na());
        assert!(h.previous_hex.is_na());
        assert_eq!(h.errors.len(), 2);
    }

    #[test]
    fn reads_optional_name() {
        let line = "tribe 0987,black river,current hex = ab 1013,(previous hex = n/a)";
        let h = parse_unit_header(line).unwrap();
        assert_eq!(h.name.as_deref(), Some("black river"));
    }

    #[test]
    fn mismatched_kind_and_id_is_rejected() {
        let line = "tribe 0987e1,,current hex = ab 1013,(previous hex = n/a)";
        assert!(parse_unit_header(line).is_none());
    }

    #[test]
    fn follows_and_goes_to() {
        assert_eq!(parse_follows("tribe follows 0988c2").unwrap().as_str(), "0988c2");
        assert!(matches!(
            parse_follows("tribe follows nobody"),
            Err(FieldError::InvalidFollows { .. })
        ));
        assert_eq!(parse_goes_to("tribe goes to ab 1013").unwrap(), at("ab 1013"));
        assert!(parse_goes_to("tribe goes to ## 1013").unwrap().is_obscured());
        assert!(matches!(
            parse_goes_to("tribe goes to ab 1099"),
            Err(FieldError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            parse_goes_to("tribe goes to somewhere"),
            Err(FieldError::InvalidGoesTo { .. })
        ));
    }
}
