//! ottomap-core: TribeNet turn report parser.
//!
//! Turns the hand-transcribed text of a turn report into one structured
//! record per unit: where it started, where it went, what it saw, and what
//! could not be read.
//!
//! # Pipeline
//!
//! 1. [`normalize()`] -- UTF-8 repair, line endings, case, whitespace
//! 2. [`classify()`] -- tag each line with a [`LineKind`]
//! 3. [`split()`] -- group lines into one [`Section`] per unit
//! 4. [`repair()`] -- fix known transcription errors in a line
//! 5. [`grammar`] -- march, patrol, status and header grammars
//! 6. [`assemble()`] -- report-level turn checks
//!
//! [`parse_report()`] runs all of them.

pub mod assemble;
pub mod ast;
pub mod classify;
pub mod codes;
pub mod coords;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod repair;
pub mod report;
pub mod section;
pub mod source;
pub mod turn;
pub mod unit;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    BorderEdge, ItemFound, Movement, Moves, Neighbor, PassageEdge, Patrol, Report, Status, Step,
    StepOutcome, Unit, UnitId, UnitKind,
};
pub use classify::LineKind;
pub use codes::{Border, Item, Passage, Resource, Terrain};
pub use coords::{Coordinates, Direction};
pub use error::{FieldError, ReportError, SectionError};
pub use report::ParseOptions;
pub use section::Section;
pub use source::{FileSystemSource, InMemorySource, ReportFileName, ReportSource, SourceError};
pub use turn::{turn_to_year_month, year_month_to_turn, Turn, TurnId};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use assemble::assemble;
pub use classify::classify;
pub use normalize::{normalize, NormalizeOptions};
pub use repair::repair;
pub use report::{parse_report, parse_report_lines, sections_of};
pub use section::{dump_sections, split};
pub use unit::parse_section;
