//! Error handling for Pencilbox
//!
//! Error types for every stage of the pipeline:
//! - Joint errors (tooth pattern construction)
//! - Geometry errors (panel construction)
//! - Packing errors (sheet layout)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::geometry::Size;
use crate::panel::{EdgeSide, PanelId};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Finger joint error type
///
/// Raised when a tooth pattern cannot be laid out on an edge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JointError {
    /// Fewer than three segments requested
    #[error("A finger joint needs at least 3 segments, got {tab_count}")]
    TooFewTeeth {
        /// The requested segment count.
        tab_count: usize,
    },

    /// Segments would be narrower than the minimum tooth width
    #[error(
        "Edge of {edge_length:.2}mm cannot hold {tab_count} segments of at least {min_tooth_width:.2}mm"
    )]
    TeethTooNarrow {
        /// The edge length in mm.
        edge_length: f64,
        /// The requested segment count.
        tab_count: usize,
        /// The configured minimum tooth width in mm.
        min_tooth_width: f64,
    },

    /// Material is too thick for the edge
    #[error("Material thickness {thickness:.2}mm is too large for an edge of {edge_length:.2}mm")]
    ThicknessExceedsEdge {
        /// The edge length in mm.
        edge_length: f64,
        /// The material thickness in mm.
        thickness: f64,
    },

    /// Non-finite or non-positive input
    #[error("Invalid joint input: {0}")]
    InvalidInput(String),
}

/// Panel geometry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A box dimension is unusable
    #[error("Invalid dimension {dimension} = {value_mm:.2}mm: {reason}")]
    InvalidDimensions {
        /// Which dimension (length, width, height).
        dimension: &'static str,
        /// The offending value in mm.
        value_mm: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// A tooth pattern could not be built for an edge
    #[error("{panel} panel, {edge} edge: {source}")]
    Joint {
        /// The panel being built.
        panel: PanelId,
        /// The edge whose joint failed.
        edge: EdgeSide,
        /// The underlying joint failure.
        #[source]
        source: JointError,
    },

    /// A divider slot would cut into a T-slot
    #[error("{panel} panel: divider slot {divider} at x = {position_mm:.2}mm collides with a T-slot")]
    DividerCollision {
        /// The panel being built.
        panel: PanelId,
        /// One-based divider index.
        divider: usize,
        /// Slot centre along the panel length in mm.
        position_mm: f64,
    },

    /// Too little material would be left between a divider slot and the top edge
    #[error(
        "{panel} panel: divider slot {divider} leaves {bridge_mm:.3}mm below the top edge, less than the {kerf_mm:.3}mm kerf"
    )]
    DividerBridge {
        /// The panel being built.
        panel: PanelId,
        /// One-based divider index.
        divider: usize,
        /// Material between the slot and the traced top edge in mm.
        bridge_mm: f64,
        /// Laser kerf in mm.
        kerf_mm: f64,
    },

    /// A divider slot would reach into the bottom joint
    #[error("{panel} panel: divider slot depth {depth_mm:.2}mm exceeds the {available_mm:.2}mm available")]
    DividerTooDeep {
        /// The panel being built.
        panel: PanelId,
        /// Requested slot depth in mm.
        depth_mm: f64,
        /// Room between the top joint and the bottom joint in mm.
        available_mm: f64,
    },

    /// More dividers than the box supports
    #[error("At most 2 dividers are supported, got {0}")]
    TooManyDividers(u8),

    /// Text decoration without any visible characters
    #[error("{panel} panel: engraving text is empty")]
    EmptyText {
        /// The decorated panel.
        panel: PanelId,
    },

    /// The text outliner failed
    #[error("{panel} panel: text outline failed: {reason}")]
    TextOutline {
        /// The decorated panel.
        panel: PanelId,
        /// The outliner's message.
        reason: String,
    },
}

/// Why a panel could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingFailure {
    /// Wider than the sheet in both orientations.
    TooWide,
    /// Taller than an empty sheet in every orientation that fits the width.
    TooTall,
    /// Needs more sheets than allowed.
    SheetLimit,
}

impl fmt::Display for PackingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PackingFailure::TooWide => "too wide for the sheet",
            PackingFailure::TooTall => "too tall for the sheet",
            PackingFailure::SheetLimit => "sheet limit reached",
        };
        f.write_str(text)
    }
}

/// Sheet packing error
///
/// Carries enough detail for a caller to shrink the dimensions and retry.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{panel} panel does not fit: {reason} (needs {required}, sheet is {available}, sheet #{sheet})")]
pub struct PackingError {
    /// The panel that could not be placed.
    pub panel: PanelId,
    /// The failure category.
    pub reason: PackingFailure,
    /// Panel size including the gap.
    pub required: Size,
    /// Sheet size.
    pub available: Size,
    /// Zero-based sheet index at the time of failure.
    pub sheet: usize,
}

/// Main error type for the generation pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Panel construction error
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Layout error
    #[error("Packing error: {0}")]
    Packing(#[from] PackingError),

    /// An internal invariant did not hold
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// True when the box simply does not fit the sheet.
    pub fn is_fit_failure(&self) -> bool {
        matches!(self, Error::Packing(_))
    }
}

/// Result type alias using Pencilbox Error
pub type Result<T> = std::result::Result<T, Error>;
