//! Layout Pipeline - Single Entry Point
//!
//! Every layout that leaves `compile` has been expanded and validated
//! against the request's item count.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::area::AreaLabel;
use crate::error::LayoutError;
use crate::expand::expand;
use crate::grid::{AreaPlacement, Grid};
use crate::hashing::compute_layout_fingerprint;
use crate::validation::Validator;
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

/// Token used when no layout is given: a single column.
pub const DEFAULT_LAYOUT: &str = "1";

/// Which layout of a figure is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutRole {
    /// The default layout.
    Layout,
    /// The compact layout for small viewports.
    LayoutSm,
}

impl fmt::Display for LayoutRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutRole::Layout => f.write_str("layout"),
            LayoutRole::LayoutSm => f.write_str("layout-sm"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid subfigure {role} ({source})")]
    InvalidLayout {
        role: LayoutRole,
        #[source]
        source: LayoutError,
    },

    #[error("Failed to read request {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PipelineError {
    /// The layout failure, if this error is one.
    pub fn layout_error(&self) -> Option<(LayoutRole, &LayoutError)> {
        match self {
            PipelineError::InvalidLayout { role, source } => Some((*role, source)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub item_count: usize,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub layout_sm: Option<String>,
}

impl LayoutRequest {
    pub fn new(item_count: usize) -> Self {
        Self { item_count, ..Self::default() }
    }

    pub fn with_layout(mut self, token: impl Into<String>) -> Self {
        self.layout = Some(token.into());
        self
    }

    pub fn with_layout_sm(mut self, token: impl Into<String>) -> Self {
        self.layout_sm = Some(token.into());
        self
    }

    pub fn from_json(payload: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Primary token, falling back to a single column.
    pub fn layout_token(&self) -> &str {
        self.layout.as_deref().unwrap_or(DEFAULT_LAYOUT)
    }

    /// Small-viewport token; an empty one also means a single column.
    pub fn layout_sm_token(&self) -> Option<&str> {
        self.layout_sm
            .as_deref()
            .map(|token| if token.is_empty() { DEFAULT_LAYOUT } else { token })
    }
}

/// A validated grid for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledLayout {
    pub role: LayoutRole,
    pub grid: Grid,
    pub placements: Vec<AreaPlacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfigureLayouts {
    pub engine_version: String,
    pub item_count: usize,
    /// Area of each item, by ordinal.
    pub item_areas: Vec<AreaLabel>,
    pub layout: CompiledLayout,
    pub layout_sm: Option<CompiledLayout>,
    pub fingerprint: String,
}

pub struct LayoutPipeline {
    validator: Validator,
}

impl LayoutPipeline {
    pub fn new() -> Self {
        Self {
            validator: Validator::new(),
        }
    }

    /// Expand and validate one token.
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_layout(
        &self,
        role: LayoutRole,
        token: &str,
        item_count: usize,
    ) -> Result<CompiledLayout, PipelineError> {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let tag = |source| PipelineError::InvalidLayout { role, source };
        let grid = expand(token, item_count).map_err(tag)?;
        self.validator.validate(&grid, item_count).map_err(tag)?;

        debug!("{} {:?} valid for {} items", role, token, item_count);
        Ok(CompiledLayout {
            role,
            placements: grid.placements(),
            grid,
        })
    }

    /// Compile every layout in the request. Fails on the first bad one.
    pub fn compile(&self, request: &LayoutRequest) -> Result<SubfigureLayouts, PipelineError> {
        let layout = self.validate_layout(
            LayoutRole::Layout,
            request.layout_token(),
            request.item_count,
        )?;
        let layout_sm = request
            .layout_sm_token()
            .map(|token| self.validate_layout(LayoutRole::LayoutSm, token, request.item_count))
            .transpose()?;

        let fingerprint =
            compute_layout_fingerprint(&layout.grid, layout_sm.as_ref().map(|l| &l.grid))?;
        info!(
            "compiled subfigure layouts for {} items ({})",
            request.item_count, fingerprint
        );

        Ok(SubfigureLayouts {
            engine_version: ENGINE_VERSION.to_string(),
            item_count: request.item_count,
            item_areas: AreaLabel::first(request.item_count).collect(),
            layout,
            layout_sm,
            fingerprint,
        })
    }
}

impl Default for LayoutPipeline {
    fn default() -> Self {
        Self::new()
    }
}
