//! Per-face lookup table.
//!
//! Which edges carry fingers (and with which parity), where the fastener
//! hardware goes and which faces receive divider slots. Walls own the
//! vertical corners (front/back tabs first, left/right slots first), the
//! bottom and lid mate slot-first with every wall.

use pencilbox_core::{EdgeSide, PanelId};
use pencilbox_settings::LidStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeJoint {
    /// Straight edge on the nominal boundary.
    Plain,
    Fingers { starts_with_tab: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fastener {
    None,
    /// Shaft slot and nut pocket at the edge midpoint.
    TSlot,
    /// Clearance hole half a thickness in from the edge midpoint.
    ScrewHole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLayout {
    pub joint: EdgeJoint,
    pub fastener: Fastener,
}

impl EdgeLayout {
    const fn new(joint: EdgeJoint, fastener: Fastener) -> Self {
        Self { joint, fastener }
    }
}

/// Which box dimensions span a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSize {
    LengthByHeight,
    WidthByHeight,
    LengthByWidth,
}

impl FaceSize {
    /// Face width and height in mm.
    pub fn resolve(self, length: f64, width: f64, height: f64) -> (f64, f64) {
        match self {
            FaceSize::LengthByHeight => (length, height),
            FaceSize::WidthByHeight => (width, height),
            FaceSize::LengthByWidth => (length, width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    pub size: FaceSize,
    /// Indexed by [`EdgeSide::index`].
    pub edges: [EdgeLayout; 4],
    pub divider_slots: bool,
}

const TAB_FIRST: EdgeJoint = EdgeJoint::Fingers {
    starts_with_tab: true,
};
const SLOT_FIRST: EdgeJoint = EdgeJoint::Fingers {
    starts_with_tab: false,
};

impl FaceLayout {
    pub fn for_panel(id: PanelId, lid: LidStyle) -> Self {
        let wall_top = match lid {
            LidStyle::Jointed => TAB_FIRST,
            LidStyle::Loose => EdgeJoint::Plain,
        };

        match id {
            PanelId::Front | PanelId::Back => Self {
                size: FaceSize::LengthByHeight,
                edges: [
                    EdgeLayout::new(wall_top, Fastener::None),
                    EdgeLayout::new(TAB_FIRST, Fastener::TSlot),
                    EdgeLayout::new(TAB_FIRST, Fastener::TSlot),
                    EdgeLayout::new(TAB_FIRST, Fastener::TSlot),
                ],
                divider_slots: true,
            },
            PanelId::Left | PanelId::Right => Self {
                size: FaceSize::WidthByHeight,
                edges: [
                    EdgeLayout::new(wall_top, Fastener::None),
                    EdgeLayout::new(SLOT_FIRST, Fastener::ScrewHole),
                    EdgeLayout::new(TAB_FIRST, Fastener::TSlot),
                    EdgeLayout::new(SLOT_FIRST, Fastener::ScrewHole),
                ],
                divider_slots: false,
            },
            PanelId::Bottom => Self {
                size: FaceSize::LengthByWidth,
                edges: [EdgeLayout::new(SLOT_FIRST, Fastener::ScrewHole); 4],
                divider_slots: false,
            },
            PanelId::Lid => {
                let joint = match lid {
                    LidStyle::Jointed => SLOT_FIRST,
                    LidStyle::Loose => EdgeJoint::Plain,
                };
                Self {
                    size: FaceSize::LengthByWidth,
                    edges: [EdgeLayout::new(joint, Fastener::None); 4],
                    divider_slots: false,
                }
            }
        }
    }

    pub fn edge(&self, side: EdgeSide) -> EdgeLayout {
        self.edges[side.index()]
    }
}
