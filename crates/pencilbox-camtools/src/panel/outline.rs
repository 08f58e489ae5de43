//! Outline tracing and interior cutouts in nominal face coordinates.
//!
//! Every edge is described in its own frame: `along` runs in the clockwise
//! walking direction, `depth` points into the face. Tabs sit on the nominal
//! boundary, slots are notches one thickness deep. With kerf compensation a
//! tab grows by half a kerf on each side, a slot shrinks by the same amount,
//! and the whole perimeter moves half a kerf outward.

use super::types::{Cutout, CutoutKind};
use crate::joint::{JointProfile, SegmentKind};
use pencilbox_core::{EdgeSide, Path, Point, Rect};
use pencilbox_settings::HardwareSettings;
use std::f64::consts::TAU;

/// Maps edge-local `(along, depth)` to face coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeFrame {
    side: EdgeSide,
    width: f64,
    height: f64,
}

impl EdgeFrame {
    pub(crate) fn new(side: EdgeSide, width: f64, height: f64) -> Self {
        Self {
            side,
            width,
            height,
        }
    }

    pub(crate) fn length(&self) -> f64 {
        match self.side {
            EdgeSide::Top | EdgeSide::Bottom => self.width,
            EdgeSide::Right | EdgeSide::Left => self.height,
        }
    }

    pub(crate) fn to_face(&self, along: f64, depth: f64) -> Point {
        let (w, h) = (self.width, self.height);
        match self.side {
            EdgeSide::Top => Point::new(along, depth),
            EdgeSide::Right => Point::new(w - depth, along),
            EdgeSide::Bottom => Point::new(w - along, h - depth),
            EdgeSide::Left => Point::new(depth, h - along),
        }
    }

    /// Closed rectangle spanning `along` and `depth` ranges.
    fn rect(&self, along: (f64, f64), depth: (f64, f64)) -> Path {
        let a = self.to_face(along.0, depth.0);
        let b = self.to_face(along.1, depth.1);
        Path::rect(&Rect::from_corners(a, b))
    }
}

/// A straight edge behaves like one long tab.
fn edge_spans(profile: Option<&JointProfile>, length: f64) -> Vec<(SegmentKind, f64, f64)> {
    match profile {
        Some(profile) => profile.spans().collect(),
        None => vec![(SegmentKind::Tab, 0.0, length)],
    }
}

/// Trace the closed outline of a `width` x `height` face.
///
/// `profiles` is indexed by [`EdgeSide::index`]; `None` means a plain edge.
/// The result is in nominal coordinates, so with kerf it reaches half a
/// kerf past every side.
pub(crate) fn trace_outline(
    width: f64,
    height: f64,
    thickness: f64,
    kerf: f64,
    profiles: &[Option<JointProfile>; 4],
) -> Path {
    let half_kerf = kerf / 2.0;
    let depth_of = |kind: SegmentKind| match kind {
        SegmentKind::Tab => -half_kerf,
        SegmentKind::Slot => thickness - half_kerf,
    };

    let spans: Vec<Vec<(SegmentKind, f64, f64)>> = EdgeSide::ALL
        .iter()
        .map(|&side| {
            let frame = EdgeFrame::new(side, width, height);
            edge_spans(profiles[side.index()].as_ref(), frame.length())
        })
        .collect();

    let mut outline = Path::closed(Vec::new());
    for side in EdgeSide::ALL {
        let frame = EdgeFrame::new(side, width, height);
        let length = frame.length();
        let segments = &spans[side.index()];

        // Corners: the first segment starts where the previous edge's last
        // segment sits, the last one ends where the next edge begins.
        let enter = spans[side.previous().index()]
            .last()
            .map_or(-half_kerf, |&(kind, _, _)| depth_of(kind));
        let exit = spans[side.next().index()]
            .first()
            .map_or(-half_kerf, |&(kind, _, _)| depth_of(kind));

        let last = segments.len().saturating_sub(1);
        for (i, &(kind, start, end)) in segments.iter().enumerate() {
            let grow = match kind {
                SegmentKind::Tab => half_kerf,
                SegmentKind::Slot => -half_kerf,
            };
            let from = if i == 0 { enter } else { start - grow };
            let to = if i == last { length - exit } else { end + grow };
            let depth = depth_of(kind);
            outline.push_unique(frame.to_face(from, depth));
            outline.push_unique(frame.to_face(to, depth));
        }
    }
    outline.normalize_closure();
    outline
}

/// Shaft slot and nut pocket at the midpoint of an edge.
///
/// The shaft runs inward from the notch floor the mating tab sits on.
pub(crate) fn t_slot(
    frame: &EdgeFrame,
    hardware: &HardwareSettings,
    thickness: f64,
    kerf: f64,
) -> [Cutout; 2] {
    let half_kerf = kerf / 2.0;
    let mid = frame.length() / 2.0;
    let floor = thickness - half_kerf;

    let shaft_half = (hardware.shaft_width_mm - kerf) / 2.0;
    let shaft = frame.rect(
        (mid - shaft_half, mid + shaft_half),
        (floor, thickness + hardware.shaft_length_mm - half_kerf),
    );

    let nut_half = (hardware.nut_width_mm - kerf) / 2.0;
    let nut_near = thickness + hardware.nut_offset_mm + half_kerf;
    let nut = frame.rect(
        (mid - nut_half, mid + nut_half),
        (nut_near, nut_near + hardware.nut_depth_mm - kerf),
    );

    [
        Cutout::new(CutoutKind::ShaftSlot, shaft),
        Cutout::new(CutoutKind::NutPocket, nut),
    ]
}

/// Polygonal clearance hole centred half a thickness in from the edge midpoint.
pub(crate) fn screw_hole(
    frame: &EdgeFrame,
    hardware: &HardwareSettings,
    thickness: f64,
    kerf: f64,
) -> Cutout {
    let center = frame.to_face(frame.length() / 2.0, thickness / 2.0);
    let radius = (hardware.hole_diameter_mm - kerf) / 2.0;
    let n = hardware.hole_segments;
    let points = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect();
    Cutout::new(CutoutKind::ScrewHole, Path::closed(points))
}

/// Divider slot of `depth` hanging from `top`, below the top joint.
pub(crate) fn divider_slot_rect(
    center_x: f64,
    top: f64,
    thickness: f64,
    kerf: f64,
    depth: f64,
) -> Rect {
    let width = thickness - kerf;
    Rect::new(center_x - width / 2.0, top, width, depth)
}

/// Lowest point of the traced top edge between `from` and `to`.
///
/// Notches are taken at their full nominal width, which never
/// underestimates how deep the edge reaches over the range.
pub(crate) fn top_edge_floor(
    profile: Option<&JointProfile>,
    width: f64,
    thickness: f64,
    kerf: f64,
    from: f64,
    to: f64,
) -> f64 {
    let half_kerf = kerf / 2.0;
    let notched = edge_spans(profile, width)
        .into_iter()
        .any(|(kind, start, end)| kind == SegmentKind::Slot && start < to && end > from);
    if notched {
        thickness - half_kerf
    } else {
        -half_kerf
    }
}
