//! Layout Expansion - Token to Raw Grid
//!
//! Pure syntax: nothing here checks that the grid makes sense.

use log::{debug, trace};

use crate::area::{AreaLabel, Cell, MAX_AREAS};
use crate::error::LayoutError;
use crate::grid::Grid;

/// Row separator in explicit layout tokens.
pub const ROW_SEPARATOR: char = '|';

/// Widest grid a column token may ask for.
pub const MAX_COLUMNS: usize = 1024;

/// A layout token, classified but not yet expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutToken<'a> {
    /// Fill this many columns with the items in order.
    Columns(i64),
    /// Explicit rows, one character per cell.
    Rows(Vec<&'a str>),
}

impl<'a> LayoutToken<'a> {
    /// Anything that is not an integer is read as explicit rows.
    pub fn parse(token: &'a str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(columns) => LayoutToken::Columns(columns),
            Err(_) => LayoutToken::Rows(token.split(ROW_SEPARATOR).collect()),
        }
    }
}

/// Expand `token` into a grid for `item_count` items.
pub fn expand(token: &str, item_count: usize) -> Result<Grid, LayoutError> {
    if item_count > MAX_AREAS {
        return Err(LayoutError::TooManyItems(item_count));
    }

    let grid = match LayoutToken::parse(token) {
        LayoutToken::Columns(columns) => fill_columns(columns, item_count)?,
        LayoutToken::Rows(rows) => explicit_rows(&rows),
    };

    debug!(
        "expanded layout {:?} for {} items into {} rows",
        token,
        item_count,
        grid.row_count()
    );
    Ok(grid)
}

fn fill_columns(columns: i64, item_count: usize) -> Result<Grid, LayoutError> {
    let width = usize::try_from(columns)
        .ok()
        .filter(|&w| (1..=MAX_COLUMNS).contains(&w))
        .ok_or(LayoutError::InvalidColumnCount(columns))?;

    let rows = (0..item_count.div_ceil(width))
        .map(|r| {
            (0..width)
                .map(|c| {
                    AreaLabel::from_ordinal(r * width + c)
                        .filter(|label| label.ordinal() < item_count)
                        .map_or(Cell::Empty, Cell::Area)
                })
                .collect()
        })
        .collect();

    Ok(Grid::new(rows))
}

fn explicit_rows(rows: &[&str]) -> Grid {
    let rows = rows
        .iter()
        .map(|row| {
            trace!("layout row {:?}", row);
            row.chars().map(Cell::from).collect()
        })
        .collect();
    Grid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_tokens() {
        assert_eq!(LayoutToken::parse("3"), LayoutToken::Columns(3));
        assert_eq!(LayoutToken::parse(" 2 "), LayoutToken::Columns(2));
        assert_eq!(LayoutToken::parse("-1"), LayoutToken::Columns(-1));
        assert_eq!(LayoutToken::parse("AB|C."), LayoutToken::Rows(vec!["AB", "C."]));
        assert_eq!(LayoutToken::parse("AB"), LayoutToken::Rows(vec!["AB"]));
    }

    #[test]
    fn test_columns_fill_row_major() {
        let grid = expand("2", 3).unwrap();
        assert_eq!(grid.to_string(), "AB|C.");
    }

    #[test]
    fn test_columns_wider_than_items() {
        assert_eq!(expand("4", 2).unwrap().to_string(), "AB..");
    }

    #[test]
    fn test_zero_items_gives_empty_grid() {
        assert!(expand("3", 0).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_columns_rejected() {
        assert_eq!(expand("0", 4), Err(LayoutError::InvalidColumnCount(0)));
        assert_eq!(expand("-2", 4), Err(LayoutError::InvalidColumnCount(-2)));
    }

    #[test]
    fn test_oversized_columns_rejected() {
        assert_eq!(
            expand("4000000000", 1),
            Err(LayoutError::InvalidColumnCount(4_000_000_000))
        );
        assert_eq!(expand("1025", 1), Err(LayoutError::InvalidColumnCount(1025)));
        assert_eq!(expand("1024", 1).unwrap().column_count(), MAX_COLUMNS);
    }

    #[test]
    fn test_explicit_rows_keep_every_character() {
        let grid = expand("A B|..", 2).unwrap();
        assert_eq!(grid.rows()[0], vec![Cell::from('A'), Cell::Stray(' '), Cell::from('B')]);
        assert_eq!(grid.rows()[1].len(), 2);
    }

    #[test]
    fn test_explicit_empty_rows_survive() {
        let grid = expand("A||A", 1).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert!(grid.rows()[1].is_empty());
    }

    #[test]
    fn test_too_many_items() {
        assert_eq!(expand("3", 27), Err(LayoutError::TooManyItems(27)));
    }
}
