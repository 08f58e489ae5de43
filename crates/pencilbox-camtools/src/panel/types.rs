use pencilbox_core::{inches_to_mm, Path, PanelId, Rect, Size};
use serde::{Deserialize, Serialize};

/// Outside box dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Left to right span of the front wall
    pub length: f64,
    /// Front to back depth
    pub width: f64,
    /// Bottom to top
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn length_mm(&self) -> f64 {
        inches_to_mm(self.length)
    }

    pub fn width_mm(&self) -> f64 {
        inches_to_mm(self.width)
    }

    pub fn height_mm(&self) -> f64 {
        inches_to_mm(self.height)
    }
}

/// What gets engraved on a wall.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    #[default]
    None,
    Text(String),
    Fractal,
}

impl Decoration {
    pub fn is_none(&self) -> bool {
        matches!(self, Decoration::None)
    }
}

/// One decoration per wall. Bottom and lid are never decorated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallDecorations {
    pub front: Decoration,
    pub back: Decoration,
    pub left: Decoration,
    pub right: Decoration,
}

static UNDECORATED: Decoration = Decoration::None;

impl WallDecorations {
    pub fn get(&self, panel: PanelId) -> &Decoration {
        match panel {
            PanelId::Front => &self.front,
            PanelId::Back => &self.back,
            PanelId::Left => &self.left,
            PanelId::Right => &self.right,
            PanelId::Bottom | PanelId::Lid => &UNDECORATED,
        }
    }

    /// Returns `false` when `panel` cannot carry a decoration.
    pub fn set(&mut self, panel: PanelId, decoration: Decoration) -> bool {
        let slot = match panel {
            PanelId::Front => &mut self.front,
            PanelId::Back => &mut self.back,
            PanelId::Left => &mut self.left,
            PanelId::Right => &mut self.right,
            PanelId::Bottom | PanelId::Lid => return false,
        };
        *slot = decoration;
        true
    }
}

/// Everything needed to generate one box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRequest {
    pub dimensions: Dimensions,
    #[serde(default)]
    pub decorations: WallDecorations,
    /// Number of interior dividers (0 to 2)
    #[serde(default)]
    pub dividers: u8,
}

impl BoxRequest {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            decorations: WallDecorations::default(),
            dividers: 0,
        }
    }

    pub fn with_dividers(mut self, dividers: u8) -> Self {
        self.dividers = dividers;
        self
    }

    pub fn with_decoration(mut self, panel: PanelId, decoration: Decoration) -> Self {
        self.decorations.set(panel, decoration);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoutKind {
    /// Screw shaft channel of a T-slot
    ShaftSlot,
    /// Captive nut pocket of a T-slot
    NutPocket,
    /// Screw clearance hole
    ScrewHole,
    /// Slot receiving a divider
    DividerSlot,
}

impl CutoutKind {
    /// Cutouts drawn on the T-slot layer.
    pub fn is_fastener(self) -> bool {
        !matches!(self, CutoutKind::DividerSlot)
    }
}

/// Closed interior cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub kind: CutoutKind,
    pub path: Path,
}

impl Cutout {
    pub fn new(kind: CutoutKind, path: Path) -> Self {
        Self { kind, path }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        self.path.bounding_box()
    }
}

/// A finished face in local coordinates.
///
/// The origin is the top-left corner of `bounds`, y grows downward. Bounds
/// include the kerf allowance and are what the packer places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub outline: Path,
    pub cutouts: Vec<Cutout>,
    pub engravings: Vec<Path>,
    pub bounds: Size,
}

impl Panel {
    pub fn cutouts_of(&self, kind: CutoutKind) -> impl Iterator<Item = &Cutout> + '_ {
        self.cutouts.iter().filter(move |c| c.kind == kind)
    }
}
