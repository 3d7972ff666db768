//! March and patrol grammars.
//!
//! A movement line is a keyword segment followed by `\`-separated result
//! segments. Each segment is fed through [`transition`], which takes the
//! walker's current hex and terrain and returns the next state together
//! with the step it produced. Segments that no rule recognises are kept as
//! excess input rather than stopping the parse.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::accept::{self, FieldSet};
use crate::ast::{BorderEdge, Neighbor, Step};
use crate::codes::{Border, Terrain};
use crate::coords::{Coordinates, Direction};
use crate::error::FieldError;

pub const MARCH_KEYWORD: &str = "tribe movement:move";

static SCOUT_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^scout ([1-8]):scout(?: |,|$)").expect("regex"));
static CANT_MOVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^can't move on ([a-z]+(?: [a-z]+){0,2}) to ([ns][ew]?) of hex$").expect("regex")
});
static CANT_MOVE_WAGONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^cannot move wagons into swamp/jungle hill to ([ns][ew]?) of hex$")
        .expect("regex")
});
static NO_FORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^no ford on (canal|river) to ([ns][ew]?) of hex$").expect("regex")
});
static NOT_ENOUGH_MPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^not enough m\.p's to move to ([ns][ew]?) into ([a-z]+(?: [a-z]+){0,2})$")
        .expect("regex")
});

/// Which grammar a line is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    March,
    Patrol,
}

/// Where the walker is and what it is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub position: Coordinates,
    pub terrain: Option<Terrain>,
}

impl State {
    pub fn start(position: Coordinates) -> State {
        State {
            position,
            terrain: None,
        }
    }
}

/// Read one segment. `None` means no rule recognised it.
pub fn transition(walk: Walk, state: State, segment: &str) -> Option<(State, Step)> {
    if let Some(step) = moved(walk, state, segment) {
        let next = State {
            position: step.to,
            terrain: step.terrain,
        };
        return Some((next, step));
    }
    if let Some(step) = blocked(state, segment) {
        return Some((state, step));
    }
    if walk == Walk::Patrol {
        if let Some(step) = patrol_report(state, segment) {
            return Some((state, step));
        }
    }
    None
}

/// `dir-code` followed by the optional observation fields.
fn moved(walk: Walk, state: State, segment: &str) -> Option<Step> {
    let (direction, terrain, code, rest) = accept::direction_dash_terrain(segment)?;
    let mut step = Step::moved(state.position, direction, terrain);
    if terrain.is_none() {
        step.errors.push(FieldError::UnknownTerrain {
            text: code.to_string(),
        });
    }
    let set = match walk {
        Walk::March => FieldSet::March,
        Walk::Patrol => FieldSet::Patrol,
    };
    let obs = accept::fields(rest, set);
    step.neighbors = obs.neighbors;
    step.borders = obs.borders;
    step.passages = obs.passages;
    step.resources = obs.resources;
    step.encounters = obs.encounters;
    step.items = obs.items;
    step.hex_name = obs.hex_name;
    step.excess_input = obs.excess_input;
    step.errors.extend(obs.errors);
    Some(step)
}

/// Known failure messages. The walker stays where it is and keeps its
/// terrain; the message tells us about the hex or edge it could not cross.
fn blocked(state: State, segment: &str) -> Option<Step> {
    let mut step = Step::blocked(state.position, state.terrain);
    if let Some(caps) = CANT_MOVE.captures(segment) {
        let direction = Direction::from_code(&caps[2])?;
        neighbor(&caps[1], direction, &mut step);
    } else if let Some(caps) = CANT_MOVE_WAGONS.captures(segment) {
        let direction = Direction::from_code(&caps[1])?;
        step.neighbors.push(Neighbor {
            terrain: Terrain::UnknownJungleSwamp,
            directions: vec![direction],
        });
    } else if let Some(caps) = NO_FORD.captures(segment) {
        let direction = Direction::from_code(&caps[2])?;
        let border = Border::from_name(&caps[1])?;
        step.borders.push(BorderEdge {
            border,
            directions: vec![direction],
        });
    } else if let Some(caps) = NOT_ENOUGH_MPS.captures(segment) {
        let direction = Direction::from_code(&caps[1])?;
        neighbor(&caps[2], direction, &mut step);
    } else {
        return None;
    }
    Some(step)
}

fn neighbor(name: &str, direction: Direction, step: &mut Step) {
    match Terrain::from_long_name(name) {
        Some(terrain) => step.neighbors.push(Neighbor {
            terrain,
            directions: vec![direction],
        }),
        None => step.errors.push(FieldError::UnknownTerrain {
            text: name.to_string(),
        }),
    }
}

/// Scout-only segments that describe what the patrol saw where it stands.
fn patrol_report(state: State, segment: &str) -> Option<Step> {
    let mut step = Step::stay(state.position, state.terrain);
    let rest = if let Some(rest) = segment.strip_prefix("no groups located") {
        rest
    } else if let Some(rest) = segment.strip_prefix("nothing of interest found") {
        rest
    } else if let Some(rest) = segment.strip_prefix("patrolled and found ") {
        let (encounters, rest) = accept::encounter_list(rest);
        step.encounters = encounters;
        rest
    } else if let Some((found, rest)) = accept::find_item(segment) {
        match found {
            Ok(item) => step.items.push(item),
            Err(e) => step.errors.push(e),
        }
        rest
    } else if let Some((resource, rest)) = accept::find_resource(segment) {
        step.resources.push(resource);
        rest
    } else {
        return None;
    };
    let rest = rest.trim_matches([' ', ',']);
    if !rest.is_empty() {
        step.excess_input.push(rest.to_string());
    }
    Some(step)
}

/// Read every result segment from `start`. Unrecognised segments are
/// attached to the latest step, or to a placeholder step when there is none.
fn walk_segments<'a>(
    walk: Walk,
    start: Coordinates,
    segments: impl Iterator<Item = &'a str>,
) -> Vec<Step> {
    let mut state = State::start(start);
    let mut steps: Vec<Step> = Vec::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match transition(walk, state, segment) {
            Some((next, step)) => {
                trace!(from = %state.position, to = %next.position, segment, "step");
                state = next;
                steps.push(step);
            }
            None => {
                trace!(at = %state.position, segment, "excess input");
                if steps.is_empty() {
                    steps.push(Step::stay(state.position, state.terrain));
                }
                if let Some(last) = steps.last_mut() {
                    last.excess_input.push(segment.to_string());
                }
            }
        }
    }
    steps
}

/// `tribe movement:move` line. `None` when the keyword segment is missing.
pub fn parse_march(start: Coordinates, line: &str) -> Option<Vec<Step>> {
    let mut segments = line.split('\\');
    if segments.next()? != MARCH_KEYWORD {
        return None;
    }
    Some(walk_segments(Walk::March, start, segments))
}

/// `scout N:scout` line. Returns the scout number with its steps, or
/// `None` when the keyword segment is missing.
pub fn parse_patrol(start: Coordinates, line: &str) -> Option<(u8, Vec<Step>)> {
    let mut segments = line.split('\\');
    let first = segments.next()?;
    let caps = SCOUT_KEYWORD.captures(first)?;
    let scout: u8 = caps[1].parse().ok()?;
    let tail = &first[caps.get(0)?.end()..];
    let steps = walk_segments(Walk::Patrol, start, std::iter::once(tail).chain(segments));
    Some((scout, steps))
}
