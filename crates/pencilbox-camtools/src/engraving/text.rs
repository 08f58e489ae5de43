//! Text to vector outlines.
//!
//! [`TextOutliner`] is the seam between panel construction and font
//! handling. [`FontOutliner`] resolves a family through the system font
//! database, lays the string out with `rusttype` and flattens the glyph
//! curves with `lyon`.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::{Event, Path as LyonPath};
use pencilbox_core::{Path, Point};
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use thiserror::Error;

/// Em size used for layout. Output is rescaled by the caller.
const LAYOUT_SCALE: f32 = 100.0;

/// Errors raised while turning text into outlines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextOutlineError {
    /// No installed font matched the requested family
    #[error("No font found for family '{0}'")]
    FontNotFound(String),

    /// Font data could not be parsed
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// No outliner was configured for text engraving
    #[error("Text engraving is not available: {0}")]
    Unavailable(String),
}

/// Converts a string into closed outline contours.
///
/// Coordinates are in arbitrary units with y growing downward. The caller
/// scales and positions the result.
pub trait TextOutliner {
    fn outline(&self, text: &str) -> Result<Vec<Path>, TextOutlineError>;
}

/// Outliner for runs without any text decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextOutliner;

impl TextOutliner for NoTextOutliner {
    fn outline(&self, _text: &str) -> Result<Vec<Path>, TextOutlineError> {
        Err(TextOutlineError::Unavailable(
            "no font has been loaded".to_string(),
        ))
    }
}

/// Glyph outliner backed by a TrueType/OpenType font.
pub struct FontOutliner {
    font: Font<'static>,
    tolerance: f32,
}

impl std::fmt::Debug for FontOutliner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontOutliner")
            .field("glyphs", &self.font.glyph_count())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl FontOutliner {
    /// Look up a family in the installed fonts.
    ///
    /// "Sans", "Serif" and "Monospace" map to the generic families.
    pub fn from_system(family: &str, tolerance: f64) -> Result<Self, TextOutlineError> {
        let mut db = Database::new();
        db.load_system_fonts();

        let families: Vec<Family<'_>> = match family.trim() {
            "" | "Sans" => vec![Family::SansSerif],
            "Serif" => vec![Family::Serif],
            "Monospace" => vec![Family::Monospace],
            other => vec![Family::Name(other), Family::SansSerif],
        };
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };

        let id = db
            .query(&query)
            .ok_or_else(|| TextOutlineError::FontNotFound(family.to_string()))?;
        let data = db
            .with_face_data(id, |data, _index| data.to_vec())
            .ok_or_else(|| TextOutlineError::FontNotFound(family.to_string()))?;

        tracing::debug!("Resolved font family '{}' ({} bytes)", family, data.len());
        Self::from_bytes(data, tolerance)
    }

    pub fn from_bytes(data: Vec<u8>, tolerance: f64) -> Result<Self, TextOutlineError> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| TextOutlineError::InvalidFont("unrecognised font format".to_string()))?;
        Ok(Self {
            font,
            tolerance: tolerance as f32,
        })
    }
}

impl TextOutliner for FontOutliner {
    fn outline(&self, text: &str) -> Result<Vec<Path>, TextOutlineError> {
        let scale = Scale::uniform(LAYOUT_SCALE);
        let v_metrics = self.font.v_metrics(scale);
        let start = rt_point(0.0, v_metrics.ascent);

        let mut builder = GlyphPathBuilder::new();
        for glyph in self.font.layout(text, scale, start) {
            glyph.build_outline(&mut builder);
        }

        Ok(flatten_contours(&builder.finish(), self.tolerance))
    }
}

/// Collects glyph outlines into a lyon path.
struct GlyphPathBuilder {
    builder: lyon::path::path::Builder,
    open: bool,
}

impl GlyphPathBuilder {
    fn new() -> Self {
        Self {
            builder: LyonPath::builder(),
            open: false,
        }
    }

    fn finish(mut self) -> LyonPath {
        if self.open {
            self.builder.end(true);
        }
        self.builder.build()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.builder.end(true);
        }
        self.builder.begin(point(x, y));
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(point(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quadratic_bezier_to(point(x1, y1), point(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder
            .cubic_bezier_to(point(x1, y1), point(x2, y2), point(x, y));
    }

    fn close(&mut self) {
        if self.open {
            self.builder.end(true);
            self.open = false;
        }
    }
}

/// Flatten every sub-path into a closed polygon.
fn flatten_contours(path: &LyonPath, tolerance: f32) -> Vec<Path> {
    let mut contours = Vec::new();
    let mut current = Path::closed(Vec::new());

    for event in path.iter().flattened(tolerance) {
        match event {
            Event::Begin { at } => {
                current = Path::closed(Vec::new());
                current.push_unique(Point::new(at.x as f64, at.y as f64));
            }
            Event::Line { to, .. } => {
                current.push_unique(Point::new(to.x as f64, to.y as f64));
            }
            Event::End { .. } => {
                current.normalize_closure();
                if current.len() >= 3 {
                    contours.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    contours
}
