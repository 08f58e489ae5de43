//! # Pencilbox Core
//!
//! Core types shared by every Pencilbox crate:
//! - 2D geometry primitives (points, rectangles, paths)
//! - Panel and edge identifiers for the six faces of a box
//! - Unit conversion between inches and millimetres
//! - The error taxonomy used by panel construction, packing and emission
//!
//! All geometry is expressed in millimetres. Inches only appear at the
//! input boundary and are converted once through [`units`].

pub mod error;
pub mod geometry;
pub mod panel;
pub mod units;

pub use error::{Error, GeometryError, JointError, PackingError, PackingFailure, Result};
pub use geometry::{Path, Point, Rect, Size};
pub use panel::{EdgeSide, PanelId};
pub use units::{inches_to_mm, mm_to_inches, MeasurementSystem, MM_PER_INCH};
