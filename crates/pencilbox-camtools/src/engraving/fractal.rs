//! Sierpinski triangle engraving.
//!
//! The triangle is subdivided depth-first with an explicit stack, and only
//! the edges of the leaf triangles are emitted. The sequence is lazy, finite
//! (`3 * 3^depth` segments) and deterministic.

use pencilbox_core::{Path, Point, Rect};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A single engraved stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    pub fn into_path(self) -> Path {
        Path::open(vec![self.start, self.end])
    }
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    apex: Point,
    right: Point,
    left: Point,
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Deepest subdivision whose leaf side stays at or above `min_edge`.
pub fn fractal_depth(side: f64, min_edge: f64, max_depth: u32) -> u32 {
    let mut depth = 0;
    while depth < max_depth && side / 2f64.powi(depth as i32 + 1) >= min_edge {
        depth += 1;
    }
    depth
}

/// Lazy iterator over the leaf edges of a Sierpinski triangle.
#[derive(Debug, Clone)]
pub struct SierpinskiSegments {
    stack: Vec<(Triangle, u32)>,
    pending: Vec<LineSegment>,
    depth: u32,
    side: f64,
}

impl SierpinskiSegments {
    /// Subdivide the triangle `apex`, `right`, `left` `depth` times.
    pub fn new(apex: Point, right: Point, left: Point, depth: u32) -> Self {
        let side = (right.x - left.x).hypot(right.y - left.y);
        Self {
            stack: vec![(Triangle { apex, right, left }, depth)],
            pending: Vec::with_capacity(3),
            depth,
            side,
        }
    }

    /// Largest upright equilateral triangle centred in `zone`.
    ///
    /// Returns `None` when not even one triangle of side `min_edge` fits.
    pub fn fitted(zone: Rect, min_edge: f64, max_depth: u32) -> Option<Self> {
        if zone.is_empty() {
            return None;
        }

        let side = zone.width.min(zone.height * 2.0 / SQRT_3);
        if side < min_edge {
            return None;
        }
        let tri_height = side * SQRT_3 / 2.0;
        let center = zone.center();
        let top = center.y - tri_height / 2.0;
        let bottom = center.y + tri_height / 2.0;

        Some(Self::new(
            Point::new(center.x, top),
            Point::new(center.x + side / 2.0, bottom),
            Point::new(center.x - side / 2.0, bottom),
            fractal_depth(side, min_edge, max_depth),
        ))
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Side length of the leaf triangles.
    pub fn leaf_side(&self) -> f64 {
        self.side / 2f64.powi(self.depth as i32)
    }
}

impl Iterator for SierpinskiSegments {
    type Item = LineSegment;

    fn next(&mut self) -> Option<LineSegment> {
        loop {
            if let Some(segment) = self.pending.pop() {
                return Some(segment);
            }

            let (tri, depth) = self.stack.pop()?;
            if depth == 0 {
                // Popped from the back, so apex->right comes out first
                self.pending.push(LineSegment::new(tri.left, tri.apex));
                self.pending.push(LineSegment::new(tri.right, tri.left));
                self.pending.push(LineSegment::new(tri.apex, tri.right));
                continue;
            }

            let ar = midpoint(tri.apex, tri.right);
            let rl = midpoint(tri.right, tri.left);
            let la = midpoint(tri.left, tri.apex);
            self.stack.push((
                Triangle {
                    apex: la,
                    right: rl,
                    left: tri.left,
                },
                depth - 1,
            ));
            self.stack.push((
                Triangle {
                    apex: ar,
                    right: tri.right,
                    left: rl,
                },
                depth - 1,
            ));
            self.stack.push((
                Triangle {
                    apex: tri.apex,
                    right: ar,
                    left: la,
                },
                depth - 1,
            ));
        }
    }
}
