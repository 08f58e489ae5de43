//! Wall engravings
//!
//! Both collaborators produce vectors in their own coordinate space; the
//! helpers here decide where on a wall an engraving may go and fit it there.

pub mod fractal;
pub mod text;

pub use fractal::{fractal_depth, LineSegment, SierpinskiSegments};
pub use text::{FontOutliner, NoTextOutliner, TextOutlineError, TextOutliner};

use pencilbox_core::geometry::bounding_box_of;
use pencilbox_core::{Path, Point, Rect};
use pencilbox_settings::HardwareSettings;

/// Area of a `width` x `height` wall clear of joints and T-slots.
///
/// The sides and bottom carry T-slots, the top only a joint.
pub(crate) fn engraving_zone(
    width: f64,
    height: f64,
    thickness: f64,
    hardware: &HardwareSettings,
    margin: f64,
) -> Option<Rect> {
    let fastened = thickness + hardware.shaft_length_mm + margin;
    let top = thickness + margin;
    let zone = Rect::new(
        fastened,
        top,
        width - 2.0 * fastened,
        height - top - fastened,
    );
    (!zone.is_empty()).then_some(zone)
}

/// Widest vertical strip of `zone` outside every blocked x-range.
///
/// Ties go to the leftmost strip.
pub(crate) fn widest_free_span(zone: Rect, blocked: &[(f64, f64)]) -> Option<Rect> {
    let mut blocked = blocked.to_vec();
    blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut best: Option<(f64, f64)> = None;
    let mut consider = |start: f64, end: f64| {
        if end - start > best.map_or(0.0, |(s, e)| e - s) {
            best = Some((start, end));
        }
    };

    let mut cursor = zone.x;
    for (start, end) in blocked {
        if start > cursor {
            consider(cursor, start.min(zone.max_x()));
        }
        cursor = cursor.max(end);
    }
    consider(cursor, zone.max_x());

    best.map(|(start, end)| Rect::new(start, zone.y, end - start, zone.height))
}

/// Scale `contours` uniformly into a fraction of `target` and centre them.
pub(crate) fn fit_contours(
    contours: &[Path],
    target: Rect,
    width_fraction: f64,
    height_fraction: f64,
) -> Option<Vec<Path>> {
    let bbox = bounding_box_of(contours)?;
    if bbox.width <= 0.0 && bbox.height <= 0.0 {
        return None;
    }

    let scale_for = |available: f64, extent: f64| {
        if extent > 0.0 {
            available / extent
        } else {
            f64::INFINITY
        }
    };
    let scale = scale_for(target.width * width_fraction, bbox.width)
        .min(scale_for(target.height * height_fraction, bbox.height));

    let from = bbox.center();
    let to = target.center();
    Some(
        contours
            .iter()
            .map(|contour| {
                contour.map(|p| {
                    Point::new(
                        (p.x - from.x) * scale + to.x,
                        (p.y - from.y) * scale + to.y,
                    )
                })
            })
            .collect(),
    )
}
