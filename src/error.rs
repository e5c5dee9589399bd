use std::fmt::Display;

use thiserror::Error;

use crate::area::{AreaLabel, Cell};

/// Why a layout token was rejected. `Display` is the bare reason string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("empty")]
    EmptyLayout,
    #[error("empty row")]
    EmptyRow,
    #[error("row length mismatch")]
    RowLengthMismatch,
    #[error("missing areas {}", format_set(.0))]
    MissingAreas(Vec<AreaLabel>),
    #[error("invalid areas {}", format_set(.0))]
    InvalidAreas(Vec<Cell>),
    #[error("area {0} is not a single rectangle")]
    NonRectangularArea(AreaLabel),
    #[error("invalid column count {0}")]
    InvalidColumnCount(i64),
    #[error("too many items: {0} (limit is 26)")]
    TooManyItems(usize),
}

fn format_set<T: Display>(items: &[T]) -> String {
    let joined = items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let b = AreaLabel::from_char('B').unwrap();
        let c = AreaLabel::from_char('C').unwrap();
        assert_eq!(LayoutError::MissingAreas(vec![b, c]).to_string(), "missing areas {B, C}");
        assert_eq!(
            LayoutError::InvalidAreas(vec![Cell::Stray(' '), Cell::Area(b)]).to_string(),
            "invalid areas { , B}"
        );
        assert_eq!(
            LayoutError::NonRectangularArea(b).to_string(),
            "area B is not a single rectangle"
        );
        assert_eq!(LayoutError::InvalidColumnCount(0).to_string(), "invalid column count 0");
    }
}
