//! # Pencilbox CAM Tools
//!
//! Geometry and layout engine for laser-cut pencil boxes.
//!
//! ## Pipeline
//!
//! - **Joints**: finger-joint tooth patterns for a single edge ([`JointProfile`])
//! - **Panels**: the six faces with outlines, fastener cutouts, divider slots
//!   and wall engravings ([`PanelBuilder`])
//! - **Engraving**: text outlines from system fonts and Sierpinski fractals
//! - **Packing**: greedy shelf packing onto bounded sheets ([`ShelfPacker`])
//! - **SVG**: layered drawing for laser software ([`SvgEmitter`])
//!
//! [`BoxGenerator`] runs all stages in order.

pub mod engraving;
pub mod generator;
pub mod joint;
pub mod packer;
pub mod panel;
pub mod svg;

// Re-export commonly used items
pub use engraving::{FontOutliner, NoTextOutliner, SierpinskiSegments, TextOutliner};
pub use generator::{BoxGenerator, GeneratedBox};
pub use joint::{JointProfile, JointSegment, SegmentKind};
pub use packer::{PlacedPanel, PlacementRecord, Rotation, SheetLayout, ShelfPacker};
pub use panel::{
    BoxRequest, Cutout, CutoutKind, Decoration, Dimensions, Panel, PanelBuilder, WallDecorations,
    MAX_DIVIDERS,
};
pub use svg::{SvgEmitter, LAYERS};
