//! Grid - Rows of Area Cells
//!
//! The artifact produced by expansion and checked by validation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::area::{AreaLabel, Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Ordered rows of cells. Rows may be ragged until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row; only meaningful once rows are known to match.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    /// Every cell with its position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (Coord::new(r, c), *cell))
        })
    }

    /// Coordinates occupied by each non-empty cell value.
    pub fn area_index(&self) -> BTreeMap<Cell, BTreeSet<Coord>> {
        let mut index: BTreeMap<Cell, BTreeSet<Coord>> = BTreeMap::new();
        for (coord, cell) in self.cells().filter(|(_, cell)| !cell.is_empty()) {
            index.entry(cell).or_default().insert(coord);
        }
        index
    }

    /// Named areas in the order they first appear, row-major.
    pub fn areas_in_order(&self) -> Vec<AreaLabel> {
        let mut seen = BTreeSet::new();
        self.cells()
            .filter_map(|(_, cell)| cell.area())
            .filter(|area| seen.insert(*area))
            .collect()
    }

    /// Bounding rectangle of every named area, ordered by label.
    ///
    /// On a validated grid each rectangle is exactly the area's cells.
    pub fn placements(&self) -> Vec<AreaPlacement> {
        self.area_index()
            .into_iter()
            .filter_map(|(cell, coords)| {
                let area = cell.area()?;
                let bounds = Bounds::of(&coords)?;
                Some(AreaPlacement::new(area, bounds))
            })
            .collect()
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

/// Written back as an explicit layout token (`AB|C.`).
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

/// Inclusive bounding box of a coordinate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Bounds {
    pub fn of<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Self> {
        let mut coords = coords.into_iter();
        let first = coords.next()?;
        let init = Bounds {
            top: first.row,
            left: first.column,
            bottom: first.row,
            right: first.column,
        };
        Some(coords.fold(init, |b, c| Bounds {
            top: b.top.min(c.row),
            left: b.left.min(c.column),
            bottom: b.bottom.max(c.row),
            right: b.right.max(c.column),
        }))
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn cell_count(&self) -> usize {
        self.height() * self.width()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |r| (self.left..=self.right).map(move |c| Coord::new(r, c)))
    }
}

/// Where an area sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaPlacement {
    pub area: AreaLabel,
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl AreaPlacement {
    fn new(area: AreaLabel, bounds: Bounds) -> Self {
        Self {
            area,
            row: bounds.top,
            column: bounds.left,
            row_span: bounds.height(),
            column_span: bounds.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(rows.iter().map(|r| r.chars().map(Cell::from).collect()).collect())
    }

    #[test]
    fn test_display_joins_rows() {
        assert_eq!(grid(&["AB", "C."]).to_string(), "AB|C.");
        assert_eq!(grid(&["A"]).to_string(), "A");
        assert_eq!(Grid::default().to_string(), "");
    }

    #[test]
    fn test_area_index_skips_empty_cells() {
        let index = grid(&["AA", ".B"]).area_index();
        assert_eq!(index.len(), 2);
        let a = &index[&Cell::from('A')];
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![Coord::new(0, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_bounds() {
        let coords = [Coord::new(1, 2), Coord::new(0, 0), Coord::new(2, 1)];
        let b = Bounds::of(&coords).unwrap();
        assert_eq!((b.top, b.left, b.bottom, b.right), (0, 0, 2, 2));
        assert_eq!(b.cell_count(), 9);
        assert_eq!(b.coords().count(), 9);
        assert!(Bounds::of(&[] as &[Coord]).is_none());
    }

    #[test]
    fn test_areas_in_first_appearance_order() {
        let order: String = grid(&["B.A", "CAB"])
            .areas_in_order()
            .into_iter()
            .map(char::from)
            .collect();
        assert_eq!(order, "BAC");
    }

    #[test]
    fn test_placements() {
        let placements = grid(&["AAB", "AAC"]).placements();
        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].area.as_char(), 'A');
        assert_eq!((placements[0].row_span, placements[0].column_span), (2, 2));
        assert_eq!((placements[2].row, placements[2].column), (1, 2));
    }

    #[test]
    fn test_serializes_as_nested_strings() {
        let json = serde_json::to_string(&grid(&["AB", "C."])).unwrap();
        assert_eq!(json, r#"[["A","B"],["C","."]]"#);
    }
}
