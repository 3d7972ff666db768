//! Field acceptors shared by the march, patrol and status grammars.
//!
//! Each acceptor looks at the front of its input and either returns the
//! value it recognised with the unconsumed remainder, or `None` with the
//! input untouched. The remainder always starts at the delimiter that
//! ended the field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{BorderEdge, ItemFound, Neighbor, PassageEdge, UnitId};
use crate::codes::{Border, Item, Passage, Resource, Terrain};
use crate::coords::Direction;
use crate::error::FieldError;

static DIRECTION_DASH_TERRAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ns][ew]?)-([a-z]{1,4})(?:[ ,]|$)").expect("regex"));
static DIRECTION_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ ([ns][ew]?)(?: |,|$)").expect("regex"));
static TERRAIN_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]{1,4}) ").expect("regex"));
static BORDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(canal|river) ").expect("regex"));
static PASSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(ford|pass|stone road) ").expect("regex"));
static FIND_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^find (\d+) ([a-z]+(?: [a-z]+){0,2})(?:,|$)").expect("regex"));
static UNIT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}(?:[cefg][1-9])?)(?:[ ,]|$)").expect("regex"));

/// `dir '-' code`. The terrain is `None` when the code is not a known
/// terrain; the code text is returned so the caller can report it.
pub(crate) fn direction_dash_terrain(
    input: &str,
) -> Option<(Direction, Option<Terrain>, &str, &str)> {
    let caps = DIRECTION_DASH_TERRAIN.captures(input)?;
    let direction = Direction::from_code(caps.get(1)?.as_str())?;
    let code = caps.get(2)?;
    Some((
        direction,
        Terrain::from_code(code.as_str()),
        code.as_str(),
        &input[code.end()..],
    ))
}

/// `(' ' dir)+`, stopping at the first element that is not a direction.
pub(crate) fn direction_list(mut input: &str) -> Option<(Vec<Direction>, &str)> {
    let mut list = Vec::new();
    while let Some(caps) = DIRECTION_ELEMENT.captures(input) {
        let Some(code) = caps.get(1) else { break };
        let Some(direction) = Direction::from_code(code.as_str()) else {
            break;
        };
        list.push(direction);
        input = &input[code.end()..];
    }
    (!list.is_empty()).then_some((list, input))
}

/// `terrain_code (' ' dir)+`
pub(crate) fn neighbor(input: &str) -> Option<(Neighbor, &str)> {
    let caps = TERRAIN_CODE.captures(input)?;
    let code = caps.get(1)?;
    let terrain = Terrain::from_code(code.as_str())?;
    let (directions, rest) = direction_list(&input[code.end()..])?;
    Some((
        Neighbor {
            terrain,
            directions,
        },
        rest,
    ))
}

/// A terrain-code shaped neighbor whose code is not a known terrain. Only
/// matches when the direction list runs to the end of the field.
pub(crate) fn unknown_neighbor(input: &str) -> Option<(String, &str)> {
    let caps = TERRAIN_CODE.captures(input)?;
    let code = caps.get(1)?;
    if Terrain::from_code(code.as_str()).is_some() {
        return None;
    }
    let (_, rest) = direction_list(&input[code.end()..])?;
    ends_field_at_comma(rest).then(|| (code.as_str().to_string(), rest))
}

/// `('canal' | 'river') (' ' dir)+`
pub(crate) fn border(input: &str) -> Option<(BorderEdge, &str)> {
    let caps = BORDER.captures(input)?;
    let name = caps.get(1)?;
    let border = Border::from_name(name.as_str())?;
    let (directions, rest) = direction_list(&input[name.end()..])?;
    Some((BorderEdge { border, directions }, rest))
}

/// `('ford' | 'pass' | 'stone road') (' ' dir)+`
pub(crate) fn passage(input: &str) -> Option<(PassageEdge, &str)> {
    let caps = PASSAGE.captures(input)?;
    let name = caps.get(1)?;
    let passage = Passage::from_name(name.as_str())?;
    let (directions, rest) = direction_list(&input[name.end()..])?;
    Some((PassageEdge { passage, directions }, rest))
}

/// A bare resource name, as written in status lines.
pub(crate) fn resource_name(input: &str) -> Option<(Resource, &str)> {
    let (resource, len) = Resource::prefix_of(input)?;
    let rest = &input[len..];
    ends_field(rest).then_some((resource, rest))
}

/// `'find ' resource`, as written in scout reports.
pub(crate) fn find_resource(input: &str) -> Option<(Resource, &str)> {
    resource_name(input.strip_prefix("find ")?)
}

/// `'find ' quantity ' ' item`. A zero quantity is not a find; an unknown
/// item name is returned as an error so the caller can record it.
pub(crate) fn find_item(input: &str) -> Option<(Result<ItemFound, FieldError>, &str)> {
    let caps = FIND_ITEM.captures(input)?;
    let quantity: u32 = caps[1].parse().ok().filter(|&q| q > 0)?;
    let name = caps.get(2)?;
    let found = match Item::from_name(name.as_str()) {
        Some(item) => Ok(ItemFound { quantity, item }),
        None => Err(FieldError::InvalidItem {
            text: input[..name.end()].to_string(),
        }),
    };
    Some((found, &input[name.end()..]))
}

pub(crate) fn encounter(input: &str) -> Option<(UnitId, &str)> {
    let caps = UNIT_ID.captures(input)?;
    let id = caps.get(1)?;
    Some((UnitId::parse(id.as_str())?, &input[id.end()..]))
}

/// One or more unit ids separated by spaces or commas.
pub(crate) fn encounter_list(mut input: &str) -> (Vec<UnitId>, &str) {
    let mut list = Vec::new();
    while let Some((id, rest)) = encounter(input) {
        list.push(id);
        input = rest.strip_prefix([' ', ',']).unwrap_or(rest);
    }
    (list, input)
}

/// Long terrain name up to the next comma or the end of the input.
pub(crate) fn terrain_name(input: &str) -> Option<(Terrain, &str)> {
    let (name, rest) = match input.find(',') {
        Some(i) => input.split_at(i),
        None => (input, ""),
    };
    Some((Terrain::from_long_name(name)?, rest))
}

fn ends_field(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with([' ', ','])
}

fn ends_field_at_comma(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(',')
}

/// Upper-case the first letter of every word. Anything other than a
/// letter, digit or underscore separates words.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

// ──────────────────────────────────────────────
// Comma-delimited observation fields
// ──────────────────────────────────────────────

/// Which optional fields a line kind may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldSet {
    March,
    Patrol,
    Status,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Observations {
    pub neighbors: Vec<Neighbor>,
    pub borders: Vec<BorderEdge>,
    pub passages: Vec<PassageEdge>,
    pub resources: Vec<Resource>,
    pub encounters: Vec<UnitId>,
    pub items: Vec<ItemFound>,
    pub hex_name: Option<String>,
    pub excess_input: Vec<String>,
    pub errors: Vec<FieldError>,
}

/// Consume the optional fields after a terrain. The first unrecognised
/// field is taken as the hex name; any further ones are excess input. A
/// neighbor with an unknown terrain code is dropped with an error.
pub(crate) fn fields(mut input: &str, set: FieldSet) -> Observations {
    let mut obs = Observations::default();
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix([' ', ',']) {
            input = rest;
            continue;
        }
        if set == FieldSet::Status {
            if let Some((r, rest)) = resource_name(input) {
                obs.resources.push(r);
                input = rest;
                continue;
            }
        }
        if let Some((n, rest)) = neighbor(input) {
            obs.neighbors.push(n);
            input = rest;
        } else if let Some((b, rest)) = border(input) {
            obs.borders.push(b);
            input = rest;
        } else if let Some((p, rest)) = passage(input) {
            obs.passages.push(p);
            input = rest;
        } else if let Some((found, rest)) = find_item(input).filter(|_| set == FieldSet::Patrol) {
            match found {
                Ok(item) => obs.items.push(item),
                Err(e) => obs.errors.push(e),
            }
            input = rest;
        } else if let Some((r, rest)) = find_resource(input).filter(|_| set == FieldSet::Patrol) {
            obs.resources.push(r);
            input = rest;
        } else if let Some((id, rest)) = encounter(input) {
            obs.encounters.push(id);
            input = rest;
        } else if let Some((code, rest)) = unknown_neighbor(input) {
            obs.errors.push(FieldError::UnknownTerrain { text: code });
            input = rest;
        } else {
            let (name, rest) = input.split_once(',').unwrap_or((input, ""));
            let name = name.trim();
            if !name.is_empty() {
                if obs.hex_name.is_none() {
                    obs.hex_name = Some(title_case(name));
                } else {
                    obs.excess_input.push(name.to_string());
                }
            }
            input = rest;
        }
    }
    obs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_direction_dash_terrain() {
        let (d, t, code, rest) = direction_dash_terrain("s-pr,river s").unwrap();
        assert_eq!(d, Direction::S);
        assert_eq!(t, Some(Terrain::Prairie));
        assert_eq!(code, "pr");
        assert_eq!(rest, ",river s");

        let (d, t, _, rest) = direction_dash_terrain("ne-alps").unwrap();
        assert_eq!((d, t, rest), (Direction::NE, Some(Terrain::Alps), ""));

        let (_, t, code, _) = direction_dash_terrain("n-xq").unwrap();
        assert_eq!((t, code), (None, "xq"));

        assert!(direction_dash_terrain("x-pr").is_none());
        assert!(direction_dash_terrain("n-prairie").is_none());
    }

    #[test]
    fn direction_list_needs_one_direction() {
        let (dirs, rest) = direction_list(" n ne se,river s").unwrap();
        assert_eq!(dirs, vec![Direction::N, Direction::NE, Direction::SE]);
        assert_eq!(rest, ",river s");
        assert!(direction_list(",n").is_none());
        assert!(direction_list(" north").is_none());
    }

    #[test]
    fn accepts_edges_and_neighbors() {
        let (n, rest) = neighbor("pr n s,x").unwrap();
        assert_eq!(n.terrain, Terrain::Prairie);
        assert_eq!(n.directions, vec![Direction::N, Direction::S]);
        assert_eq!(rest, ",x");

        let (b, _) = border("river se sw").unwrap();
        assert_eq!(b.border, Border::River);
        assert_eq!(b.directions, vec![Direction::SE, Direction::SW]);

        let (p, _) = passage("stone road n").unwrap();
        assert_eq!(p.passage, Passage::StoneRoad);

        assert!(neighbor("river s").is_none());
        assert!(neighbor("pr").is_none());
    }

    #[test]
    fn accepts_resources_only_at_field_boundaries() {
        assert_eq!(
            resource_name("iron ore,pr n"),
            Some((Resource::IronOre, ",pr n"))
        );
        assert_eq!(find_resource("find coal"), Some((Resource::Coal, "")));
        assert!(resource_name("saltwater").is_none());
        assert!(find_resource("coal").is_none());
    }

    #[test]
    fn accepts_encounter_lists() {
        let (ids, rest) = encounter_list("0988 0989e1,1234 junk");
        let ids: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["0988", "0989e1", "1234"]);
        assert_eq!(rest, "junk");
    }

    #[test]
    fn title_cases_names() {
        assert_eq!(title_case("old mill"), "Old Mill");
        assert_eq!(title_case("o'brien's ford"), "O'Brien'S Ford");
    }

    #[test]
    fn status_fields_in_any_order() {
        let obs = fields(",iron ore,pr n,river s", FieldSet::Status);
        assert_eq!(obs.resources, vec![Resource::IronOre]);
        assert_eq!(obs.neighbors.len(), 1);
        assert_eq!(obs.borders.len(), 1);
        assert!(obs.hex_name.is_none());
        assert!(obs.excess_input.is_empty());
    }

    #[test]
    fn first_unknown_field_is_hex_name_then_excess() {
        let obs = fields(",old mill,pr n,what is this,more", FieldSet::March);
        assert_eq!(obs.hex_name.as_deref(), Some("Old Mill"));
        assert_eq!(obs.excess_input, vec!["what is this", "more"]);
    }

    #[test]
    fn find_item_is_a_patrol_field() {
        let obs = fields(",find 12 wagons,0988", FieldSet::Patrol);
        assert_eq!(
            obs.items,
            vec![ItemFound {
                quantity: 12,
                item: Item::from_name("wagons").unwrap()
            }]
        );
        assert_eq!(obs.encounters.len(), 1);
        assert!(obs.hex_name.is_none());

        let obs = fields(",find 2 spaceships", FieldSet::Patrol);
        assert!(obs.items.is_empty());
        assert!(matches!(obs.errors[0], FieldError::InvalidItem { .. }));

        assert!(find_item("find 0 wagons").is_none());
        assert!(find_item("find wagons").is_none());
    }

    #[test]
    fn unknown_neighbor_codes_are_errors() {
        let obs = fields(",xx n s,pr ne", FieldSet::Status);
        assert_eq!(
            obs.errors,
            vec![FieldError::UnknownTerrain {
                text: "xx".to_string()
            }]
        );
        assert_eq!(obs.neighbors.len(), 1);
        assert!(obs.hex_name.is_none());

        // without a direction list it is still a name
        let obs = fields(",xx north", FieldSet::Status);
        assert_eq!(obs.hex_name.as_deref(), Some("Xx North"));
        assert!(obs.errors.is_empty());
        // a direction list that does not end the field is a name too
        let obs = fields(",big n shore", FieldSet::Status);
        assert_eq!(obs.hex_name.as_deref(), Some("Big N Shore"));
    }

    #[test]
    fn find_resource_is_a_patrol_field() {
        let obs = fields(",find coal", FieldSet::Patrol);
        assert_eq!(obs.resources, vec![Resource::Coal]);
        let obs = fields(",find coal", FieldSet::March);
        assert!(obs.resources.is_empty());
        assert_eq!(obs.hex_name.as_deref(), Some("Find Coal"));
    }
}
