//! Subfigure Core - Grid Layouts for Figure Mosaics
//!
//! A layout token is either a column count (`"2"`) or explicit rows of
//! area letters (`"AA|BC"`). Items are named `A`, `B`, `C`, ... by position.
//!
//! # Guarantees
//! 1. Expansion is pure syntax and never validates
//! 2. Validation is all-or-nothing, first failure wins
//! 3. Every area in a valid grid is one filled rectangle
//! 4. Every failure names the layout role that caused it

pub mod area;
pub mod error;
pub mod expand;
pub mod grid;
pub mod hashing;
pub mod logging;
pub mod pipeline;
pub mod validation;

pub use area::{item_area, AreaLabel, Cell, EMPTY_CELL, MAX_AREAS};
pub use error::LayoutError;
pub use expand::{expand, LayoutToken};
pub use grid::{AreaPlacement, Coord, Grid};
pub use hashing::{canonical_json, compute_layout_fingerprint};
pub use pipeline::{
    CompiledLayout, LayoutPipeline, LayoutRequest, LayoutRole, PipelineError, SubfigureLayouts,
};
pub use validation::{validate, LayoutRule, Validator};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
