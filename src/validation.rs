//! Validation System - Ordered Layout Rules
//!
//! Rules run in a fixed order and the first failure wins, so the same
//! bad layout always yields the same reason.

use log::{debug, trace};
use std::collections::BTreeSet;

use crate::area::{AreaLabel, Cell, MAX_AREAS};
use crate::error::LayoutError;
use crate::grid::{Bounds, Grid};

/// A single structural check on a grid.
pub trait LayoutRule {
    fn name(&self) -> &'static str;
    fn check(&self, grid: &Grid, item_count: usize) -> Result<(), LayoutError>;
}

// --- Concrete Rules ---

pub struct ItemCountRule;

impl LayoutRule for ItemCountRule {
    fn name(&self) -> &'static str { "item_count" }

    fn check(&self, _grid: &Grid, item_count: usize) -> Result<(), LayoutError> {
        if item_count > MAX_AREAS {
            return Err(LayoutError::TooManyItems(item_count));
        }
        Ok(())
    }
}

/// Non-empty grid, non-empty rows, equal row lengths.
pub struct ShapeRule;

impl LayoutRule for ShapeRule {
    fn name(&self) -> &'static str { "shape" }

    fn check(&self, grid: &Grid, _item_count: usize) -> Result<(), LayoutError> {
        let width = grid.column_count();
        if grid.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        for row in grid.rows() {
            if row.is_empty() {
                return Err(LayoutError::EmptyRow);
            }
            if row.len() != width {
                return Err(LayoutError::RowLengthMismatch);
            }
        }
        Ok(())
    }
}

/// The areas used are exactly the first `item_count` labels.
pub struct CoverageRule;

impl LayoutRule for CoverageRule {
    fn name(&self) -> &'static str { "coverage" }

    fn check(&self, grid: &Grid, item_count: usize) -> Result<(), LayoutError> {
        let used: BTreeSet<Cell> = grid.area_index().into_keys().collect();
        let available: BTreeSet<Cell> = AreaLabel::first(item_count).map(Cell::Area).collect();

        let missing: Vec<AreaLabel> = available
            .difference(&used)
            .filter_map(|cell| cell.area())
            .collect();
        if !missing.is_empty() {
            return Err(LayoutError::MissingAreas(missing));
        }

        let additional: Vec<Cell> = used.difference(&available).copied().collect();
        if !additional.is_empty() {
            return Err(LayoutError::InvalidAreas(additional));
        }
        Ok(())
    }
}

/// Every area fills its bounding rectangle exactly.
///
/// Areas are checked in first-appearance order, so with several bad
/// areas the one met first in the grid is reported.
pub struct RectangleRule;

impl LayoutRule for RectangleRule {
    fn name(&self) -> &'static str { "rectangle" }

    fn check(&self, grid: &Grid, _item_count: usize) -> Result<(), LayoutError> {
        let index = grid.area_index();
        for area in grid.areas_in_order() {
            let Some(coords) = index.get(&Cell::Area(area)) else { continue };
            if coords.len() == 1 {
                continue;
            }
            let Some(bounds) = Bounds::of(coords) else { continue };
            trace!("area {} spans {:?}", area, bounds);

            // Both sides iterate row-major, so equal sequences mean equal sets.
            if !bounds.coords().eq(coords.iter().copied()) {
                return Err(LayoutError::NonRectangularArea(area));
            }
        }
        Ok(())
    }
}

/// Validator runs the rules in order and stops at the first failure.
pub struct Validator {
    rules: Vec<Box<dyn LayoutRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ItemCountRule),
                Box::new(ShapeRule),
                Box::new(CoverageRule),
                Box::new(RectangleRule),
            ],
        }
    }

    pub fn validate(&self, grid: &Grid, item_count: usize) -> Result<(), LayoutError> {
        for rule in &self.rules {
            if let Err(e) = rule.check(grid, item_count) {
                debug!("layout {:?} failed rule {}: {}", grid.to_string(), rule.name(), e);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check `grid` against `item_count` with the standard rules.
pub fn validate(grid: &Grid, item_count: usize) -> Result<(), LayoutError> {
    Validator::new().validate(grid, item_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(rows.iter().map(|r| r.chars().map(Cell::from).collect()).collect())
    }

    fn label(c: char) -> AreaLabel {
        AreaLabel::from_char(c).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(validate(&Grid::default(), 1), Err(LayoutError::EmptyLayout));
    }

    #[test]
    fn test_empty_row_reported_before_mismatch() {
        assert_eq!(validate(&grid(&["A", ""]), 1), Err(LayoutError::EmptyRow));
        assert_eq!(validate(&grid(&["", "A"]), 1), Err(LayoutError::EmptyRow));
    }

    #[test]
    fn test_row_length_mismatch() {
        assert_eq!(validate(&grid(&["AB", "C"]), 3), Err(LayoutError::RowLengthMismatch));
    }

    #[test]
    fn test_missing_reports_full_set() {
        assert_eq!(
            validate(&grid(&["A."]), 3),
            Err(LayoutError::MissingAreas(vec![label('B'), label('C')]))
        );
    }

    #[test]
    fn test_missing_checked_before_invalid() {
        assert_eq!(
            validate(&grid(&["AC"]), 2),
            Err(LayoutError::MissingAreas(vec![label('B')]))
        );
    }

    #[test]
    fn test_stray_characters_are_invalid_areas() {
        assert_eq!(
            validate(&grid(&["A B"]), 2),
            Err(LayoutError::InvalidAreas(vec![Cell::Stray(' ')]))
        );
        assert_eq!(
            validate(&grid(&["Aa"]), 1),
            Err(LayoutError::InvalidAreas(vec![Cell::Stray('a')]))
        );
    }

    #[test]
    fn test_disjoint_area() {
        assert_eq!(
            validate(&grid(&["ABA"]), 2),
            Err(LayoutError::NonRectangularArea(label('A')))
        );
    }

    #[test]
    fn test_l_shape() {
        assert_eq!(
            validate(&grid(&["AA", "AB"]), 2),
            Err(LayoutError::NonRectangularArea(label('A')))
        );
    }

    #[test]
    fn test_first_bad_area_in_grid_order_reported() {
        assert_eq!(
            validate(&grid(&["BA", "AB"]), 2),
            Err(LayoutError::NonRectangularArea(label('B')))
        );
    }

    #[test]
    fn test_rectangles_with_empty_cells() {
        assert_eq!(validate(&grid(&["AAB", "AA.", "CCC"]), 3), Ok(()));
    }

    #[test]
    fn test_too_many_items() {
        assert_eq!(validate(&grid(&["A"]), 30), Err(LayoutError::TooManyItems(30)));
    }
}
