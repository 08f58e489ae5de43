//! Finger joint tooth patterns
//!
//! A [`JointProfile`] describes one edge as a run of alternating tabs and
//! slots. Tooth widths are multiples of the material thickness, rounded
//! down to a fixed grid, with the rounding remainder split between the two
//! end segments so every profile is symmetric. Two edges mate when they share
//! length, thickness and segment count but start with opposite parity.
//!
//! Profiles are nominal; kerf compensation is applied when the outline is
//! traced.

use pencilbox_core::JointError;
use pencilbox_settings::JointSettings;
use serde::{Deserialize, Serialize};

/// Lengths of a mating pair agree to this tolerance (mm).
pub const LENGTH_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Material reaches the nominal edge.
    Tab,
    /// Notch one thickness deep.
    Slot,
}

impl SegmentKind {
    pub fn opposite(self) -> Self {
        match self {
            SegmentKind::Tab => SegmentKind::Slot,
            SegmentKind::Slot => SegmentKind::Tab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSegment {
    pub kind: SegmentKind,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointProfile {
    edge_length: f64,
    thickness: f64,
    tab_count: usize,
    starts_with_tab: bool,
    segments: Vec<JointSegment>,
}

impl JointProfile {
    /// Lay out `tab_count` alternating segments along an edge.
    pub fn build(
        edge_length: f64,
        thickness: f64,
        tab_count: usize,
        starts_with_tab: bool,
        settings: &JointSettings,
    ) -> Result<Self, JointError> {
        if !edge_length.is_finite() || edge_length <= 0.0 {
            return Err(JointError::InvalidInput(format!(
                "edge length must be positive, got {}",
                edge_length
            )));
        }
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(JointError::InvalidInput(format!(
                "thickness must be positive, got {}",
                thickness
            )));
        }
        if tab_count < 3 {
            return Err(JointError::TooFewTeeth { tab_count });
        }
        if thickness >= edge_length {
            return Err(JointError::ThicknessExceedsEdge {
                edge_length,
                thickness,
            });
        }

        let grid = settings.tooth_grid_mm;
        let base = (edge_length / tab_count as f64 / grid).floor() * grid;
        if base < settings.min_tooth_width_mm {
            return Err(JointError::TeethTooNarrow {
                edge_length,
                tab_count,
                min_tooth_width: settings.min_tooth_width_mm,
            });
        }

        let end = (edge_length - (tab_count - 2) as f64 * base) / 2.0;
        // End segments carry the corner, which eats one thickness.
        if end <= thickness {
            return Err(JointError::ThicknessExceedsEdge {
                edge_length,
                thickness,
            });
        }

        let first = if starts_with_tab {
            SegmentKind::Tab
        } else {
            SegmentKind::Slot
        };
        let segments = (0..tab_count)
            .map(|i| JointSegment {
                kind: if i % 2 == 0 { first } else { first.opposite() },
                length: if i == 0 || i == tab_count - 1 {
                    end
                } else {
                    base
                },
            })
            .collect();

        Ok(Self {
            edge_length,
            thickness,
            tab_count,
            starts_with_tab,
            segments,
        })
    }

    /// Pick the segment count for an edge.
    ///
    /// Prefers teeth `finger_multiple * thickness` wide and always returns a
    /// count of the form `4k + 3`, so the middle segment of a tab-first edge
    /// is a slot.
    pub fn tooth_count_for(
        edge_length: f64,
        thickness: f64,
        settings: &JointSettings,
    ) -> Result<usize, JointError> {
        if !edge_length.is_finite() || edge_length <= 0.0 {
            return Err(JointError::InvalidInput(format!(
                "edge length must be positive, got {}",
                edge_length
            )));
        }
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(JointError::InvalidInput(format!(
                "thickness must be positive, got {}",
                thickness
            )));
        }

        let target = (settings.finger_multiple * thickness).max(settings.min_tooth_width_mm);
        let max_count = (edge_length / target).floor() as usize;
        if max_count >= 3 {
            return Ok(max_count - (max_count + 1) % 4);
        }

        if edge_length / 3.0 >= settings.min_tooth_width_mm {
            Ok(3)
        } else {
            Err(JointError::TeethTooNarrow {
                edge_length,
                tab_count: 3,
                min_tooth_width: settings.min_tooth_width_mm,
            })
        }
    }

    /// Build the profile for an edge with an automatically chosen count.
    pub fn for_edge(
        edge_length: f64,
        thickness: f64,
        starts_with_tab: bool,
        settings: &JointSettings,
    ) -> Result<Self, JointError> {
        let count = Self::tooth_count_for(edge_length, thickness, settings)?;
        Self::build(edge_length, thickness, count, starts_with_tab, settings)
    }

    /// The profile of the edge that mates with this one.
    pub fn complement(&self) -> Self {
        Self {
            starts_with_tab: !self.starts_with_tab,
            segments: self
                .segments
                .iter()
                .map(|s| JointSegment {
                    kind: s.kind.opposite(),
                    length: s.length,
                })
                .collect(),
            ..*self
        }
    }

    pub fn mates_with(&self, other: &JointProfile) -> bool {
        (self.edge_length - other.edge_length).abs() <= LENGTH_TOLERANCE
            && (self.thickness - other.thickness).abs() <= LENGTH_TOLERANCE
            && self.tab_count == other.tab_count
            && self.starts_with_tab != other.starts_with_tab
            && self
                .boundaries()
                .iter()
                .zip(other.boundaries())
                .all(|(a, b)| (a - b).abs() <= LENGTH_TOLERANCE)
    }

    /// Cumulative segment boundaries, from 0 to the edge length.
    pub fn boundaries(&self) -> Vec<f64> {
        let mut positions = Vec::with_capacity(self.segments.len() + 1);
        let mut at = 0.0;
        positions.push(at);
        for segment in &self.segments {
            at += segment.length;
            positions.push(at);
        }
        positions
    }

    /// Segments with their nominal start and end along the edge.
    pub fn spans(&self) -> impl Iterator<Item = (SegmentKind, f64, f64)> + '_ {
        let mut at = 0.0;
        self.segments.iter().map(move |s| {
            let start = at;
            at += s.length;
            (s.kind, start, at)
        })
    }

    /// Kind of segment covering a position along the edge.
    pub fn kind_at(&self, along: f64) -> SegmentKind {
        self.spans()
            .find(|&(_, _, end)| along < end)
            .map(|(kind, _, _)| kind)
            .unwrap_or_else(|| self.last_kind())
    }

    pub fn first_kind(&self) -> SegmentKind {
        self.segments[0].kind
    }

    pub fn last_kind(&self) -> SegmentKind {
        self.segments[self.segments.len() - 1].kind
    }

    pub fn segments(&self) -> &[JointSegment] {
        &self.segments
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn tab_count(&self) -> usize {
        self.tab_count
    }

    pub fn starts_with_tab(&self) -> bool {
        self.starts_with_tab
    }
}
