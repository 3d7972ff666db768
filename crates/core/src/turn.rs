//! Game turns and the turn-header line.
//!
//! Turn numbers count months from the start of the game: 899-12 is turn 0,
//! 900-01 is turn 1.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub const FIRST_YEAR: u16 = 899;
pub const LAST_YEAR: u16 = 9999;

/// Sequential turn number derived from year and month.
pub type TurnId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Turn {
    pub year: u16,
    pub month: u8,
}

impl Turn {
    /// Returns `None` outside 899-12 ..= 9999-12.
    pub fn new(year: u16, month: u8) -> Option<Turn> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        if year == FIRST_YEAR && month != 12 {
            return None;
        }
        Some(Turn { year, month })
    }

    pub fn id(&self) -> TurnId {
        (u32::from(self.year) - u32::from(FIRST_YEAR)) * 12 + u32::from(self.month) - 12
    }

    pub fn from_id(id: TurnId) -> Option<Turn> {
        let (year, month) = turn_to_year_month(id);
        let year = u16::try_from(year).ok()?;
        Turn::new(year, month)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// `None` when the pair is not a valid game turn.
pub fn year_month_to_turn(year: u16, month: u8) -> Option<TurnId> {
    Turn::new(year, month).map(|t| t.id())
}

/// Inverse of [`year_month_to_turn`].
pub fn turn_to_year_month(id: TurnId) -> (u32, u8) {
    let adjusted = u64::from(id) + 12;
    let mut year = (adjusted / 12) as u32 + u32::from(FIRST_YEAR);
    let mut month = (adjusted % 12) as u8;
    if month == 0 {
        year -= 1;
        month = 12;
    }
    (year, month)
}

static TURN_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^current turn (\d{3,4})-(\d{1,2})\(#(\d+)\),").expect("turn line regex")
});

/// Parse a normalized `current turn YYYY-MM(#N),...` line.
///
/// The `#N` counter is informational only; the turn is taken from the
/// year and month.
pub fn parse_turn_line(line: &str) -> Result<Turn, FieldError> {
    let invalid = || FieldError::InvalidTurn {
        text: line.to_string(),
    };
    let caps = TURN_LINE.captures(line).ok_or_else(invalid)?;
    let year: u16 = caps[1].parse().map_err(|_| invalid())?;
    let month: u8 = caps[2].parse().map_err(|_| invalid())?;
    Turn::new(year, month).ok_or_else(invalid)
}
