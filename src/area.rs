//! Area Labels - Single-Letter Region Names
//!
//! Items are named by ordinal: item 0 is `A`, item 1 is `B`, and so on.
//! Labels are stored as ordinals and only shown as letters at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard ceiling on items per layout (one per uppercase letter).
pub const MAX_AREAS: usize = 26;

/// Marker for a grid cell that belongs to no area.
pub const EMPTY_CELL: char = '.';

/// Identifier of a named grid area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct AreaLabel(u8);

impl AreaLabel {
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        (ordinal < MAX_AREAS).then(|| Self(ordinal as u8))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_uppercase().then(|| Self(c as u8 - b'A'))
    }

    pub fn ordinal(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// The labels of the first `count` items, in order.
    pub fn first(count: usize) -> impl Iterator<Item = AreaLabel> {
        (0..count.min(MAX_AREAS)).map(|i| Self(i as u8))
    }
}

/// Label assigned to the item at `ordinal`. `None` past the alphabet.
pub fn item_area(ordinal: usize) -> Option<AreaLabel> {
    AreaLabel::from_ordinal(ordinal)
}

impl fmt::Display for AreaLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAnAreaLabel(pub char);

impl fmt::Display for NotAnAreaLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not an area label (expected A-Z)", self.0)
    }
}

impl std::error::Error for NotAnAreaLabel {}

impl TryFrom<char> for AreaLabel {
    type Error = NotAnAreaLabel;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(NotAnAreaLabel(c))
    }
}

impl From<AreaLabel> for char {
    fn from(label: AreaLabel) -> char {
        label.as_char()
    }
}

/// One grid cell as written in a layout token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Cell {
    Empty,
    Area(AreaLabel),
    /// Any other character. Never valid, kept so validation can report it.
    Stray(char),
}

impl Cell {
    pub fn area(self) -> Option<AreaLabel> {
        match self {
            Cell::Area(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        if c == EMPTY_CELL {
            return Cell::Empty;
        }
        AreaLabel::from_char(c).map_or(Cell::Stray(c), Cell::Area)
    }
}

impl From<AreaLabel> for Cell {
    fn from(label: AreaLabel) -> Self {
        Cell::Area(label)
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> char {
        match cell {
            Cell::Empty => EMPTY_CELL,
            Cell::Area(label) => label.as_char(),
            Cell::Stray(c) => c,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
