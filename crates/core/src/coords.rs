//! Hex map addressing and single-step movement.
//!
//! A location is written `"ab 1013"`: grid row letter, grid column letter,
//! then a two-digit column and a two-digit row inside the grid. Each grid
//! holds 30 columns by 21 rows; the world is 26 by 26 grids and wraps at
//! every edge. Columns use the "odd-q" layout: odd columns sit half a hex
//! higher than even columns.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::FieldError;

pub const GRID_SIZE: u8 = 26;
pub const COLUMNS_PER_GRID: u8 = 30;
pub const ROWS_PER_GRID: u8 = 21;

// ──────────────────────────────────────────────
// Direction
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::N,
        Direction::NE,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
    ];

    /// Lower-case report code (`"ne"`).
    pub fn from_code(code: &str) -> Option<Direction> {
        match code {
            "n" => Some(Direction::N),
            "ne" => Some(Direction::NE),
            "se" => Some(Direction::SE),
            "s" => Some(Direction::S),
            "sw" => Some(Direction::SW),
            "nw" => Some(Direction::NW),
            _ => None,
        }
    }

    /// (column, row) offset for a step out of a hex in an odd or even column.
    fn offset(self, odd_column: bool) -> (i16, i16) {
        match (self, odd_column) {
            (Direction::N, _) => (0, -1),
            (Direction::S, _) => (0, 1),
            (Direction::NE, true) => (1, -1),
            (Direction::SE, true) => (1, 0),
            (Direction::SW, true) => (-1, 0),
            (Direction::NW, true) => (-1, -1),
            (Direction::NE, false) => (1, 0),
            (Direction::SE, false) => (1, 1),
            (Direction::SW, false) => (-1, 1),
            (Direction::NW, false) => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::NW => "NW",
        };
        f.write_str(s)
    }
}

// ──────────────────────────────────────────────
// Coordinates
// ──────────────────────────────────────────────

/// A hex location. Grid 0/0 is an obscured grid (`##`); all four fields
/// zero is the "n/a" sentinel for an unknown location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coordinates {
    pub grid_row: u8,
    pub grid_col: u8,
    pub column: u8,
    pub row: u8,
}

impl Coordinates {
    pub const NA: Coordinates = Coordinates {
        grid_row: 0,
        grid_col: 0,
        column: 0,
        row: 0,
    };

    pub fn is_na(&self) -> bool {
        *self == Coordinates::NA
    }

    pub fn is_obscured(&self) -> bool {
        self.grid_row == 0 || self.grid_col == 0
    }

    /// Parse the lower-case text form: `"ab 1013"`, `"## 1013"` or `"n/a"`.
    pub fn parse(text: &str) -> Result<Coordinates, FieldError> {
        if text == "n/a" {
            return Ok(Coordinates::NA);
        }
        let invalid = || FieldError::InvalidCoordinates {
            text: text.to_string(),
        };
        let b = text.as_bytes();
        if b.len() != 7 || b[2] != b' ' || !b[3..].iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let (grid_row, grid_col) = match (b[0], b[1]) {
            (b'#', b'#') => (0, 0),
            (r @ b'a'..=b'z', c @ b'a'..=b'z') => (r - b'a' + 1, c - b'a' + 1),
            _ => return Err(invalid()),
        };
        let column = (b[3] - b'0') * 10 + (b[4] - b'0');
        let row = (b[5] - b'0') * 10 + (b[6] - b'0');
        if !(1..=COLUMNS_PER_GRID).contains(&column) || !(1..=ROWS_PER_GRID).contains(&row) {
            return Err(invalid());
        }
        Ok(Coordinates {
            grid_row,
            grid_col,
            column,
            row,
        })
    }

    /// The hex one step away. `None` and the n/a sentinel do not move.
    pub fn step(self, direction: Option<Direction>) -> Coordinates {
        let Some(direction) = direction else {
            return self;
        };
        if self.is_na() {
            return self;
        }
        let obscured = self.is_obscured();
        let (dc, dr) = direction.offset(self.column % 2 == 1);
        let mut next = self;

        let column = i16::from(self.column) + dc;
        if column < 1 {
            next.column = COLUMNS_PER_GRID;
            if !obscured {
                next.grid_col = wrap_grid(i16::from(self.grid_col) - 1);
            }
        } else if column > i16::from(COLUMNS_PER_GRID) {
            next.column = 1;
            if !obscured {
                next.grid_col = wrap_grid(i16::from(self.grid_col) + 1);
            }
        } else {
            next.column = column as u8;
        }

        let row = i16::from(self.row) + dr;
        if row < 1 {
            next.row = ROWS_PER_GRID;
            if !obscured {
                next.grid_row = wrap_grid(i16::from(self.grid_row) - 1);
            }
        } else if row > i16::from(ROWS_PER_GRID) {
            next.row = 1;
            if !obscured {
                next.grid_row = wrap_grid(i16::from(self.grid_row) + 1);
            }
        } else {
            next.row = row as u8;
        }

        next
    }
}

fn wrap_grid(value: i16) -> u8 {
    if value < 1 {
        GRID_SIZE
    } else if value > i16::from(GRID_SIZE) {
        1
    } else {
        value as u8
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_na() {
            return f.write_str("N/A");
        }
        if self.is_obscured() {
            return write!(f, "## {:02}{:02}", self.column, self.row);
        }
        write!(
            f,
            "{}{} {:02}{:02}",
            (b'A' + self.grid_row - 1) as char,
            (b'A' + self.grid_col - 1) as char,
            self.column,
            self.row
        )
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
