//! Line grammars: turn the repaired text of one line into structured
//! records.
//!
//! - [`header`] -- unit header, follows and goes-to lines
//! - [`movement`] -- march and patrol lines, segment by segment
//! - [`status`] -- the unit status line
//!
//! The field acceptors in `accept` are shared by all of them.

mod accept;
pub mod header;
pub mod movement;
pub mod status;

pub use header::{parse_follows, parse_goes_to, parse_unit_header, UnitHeader};
pub use movement::{parse_march, parse_patrol, transition, State, Walk};
pub use status::parse_status;
