//! Panel and edge identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six faces of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Front,
    Back,
    Left,
    Right,
    Bottom,
    Lid,
}

impl PanelId {
    /// All faces in production order.
    pub const ALL: [PanelId; 6] = [
        PanelId::Front,
        PanelId::Back,
        PanelId::Left,
        PanelId::Right,
        PanelId::Bottom,
        PanelId::Lid,
    ];

    /// The four decorated walls.
    pub const WALLS: [PanelId; 4] = [PanelId::Front, PanelId::Back, PanelId::Left, PanelId::Right];

    pub fn name(self) -> &'static str {
        match self {
            PanelId::Front => "front",
            PanelId::Back => "back",
            PanelId::Left => "left",
            PanelId::Right => "right",
            PanelId::Bottom => "bottom",
            PanelId::Lid => "lid",
        }
    }

    /// Whether this face is one of the four upright walls.
    pub fn is_wall(self) -> bool {
        !matches!(self, PanelId::Bottom | PanelId::Lid)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Edge of a panel, in clockwise walking order starting at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl EdgeSide {
    pub const ALL: [EdgeSide; 4] = [EdgeSide::Top, EdgeSide::Right, EdgeSide::Bottom, EdgeSide::Left];

    /// Index in walking order.
    pub fn index(self) -> usize {
        match self {
            EdgeSide::Top => 0,
            EdgeSide::Right => 1,
            EdgeSide::Bottom => 2,
            EdgeSide::Left => 3,
        }
    }

    pub fn next(self) -> EdgeSide {
        EdgeSide::ALL[(self.index() + 1) % 4]
    }

    pub fn previous(self) -> EdgeSide {
        EdgeSide::ALL[(self.index() + 3) % 4]
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeSide::Top => "top",
            EdgeSide::Right => "right",
            EdgeSide::Bottom => "bottom",
            EdgeSide::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_order_and_walls() {
        assert_eq!(PanelId::ALL.len(), 6);
        assert_eq!(PanelId::ALL[0], PanelId::Front);
        assert_eq!(PanelId::ALL[5], PanelId::Lid);
        assert!(PanelId::WALLS.iter().all(|p| p.is_wall()));
        assert!(!PanelId::Bottom.is_wall());
        assert!(!PanelId::Lid.is_wall());
    }

    #[test]
    fn test_edge_walk_wraps() {
        assert_eq!(EdgeSide::Left.next(), EdgeSide::Top);
        assert_eq!(EdgeSide::Top.previous(), EdgeSide::Left);
        assert_eq!(EdgeSide::Right.next(), EdgeSide::Bottom);
    }

    #[test]
    fn test_panel_id_serde_lowercase() {
        let json = serde_json::to_string(&PanelId::Lid).unwrap();
        assert_eq!(json, "\"lid\"");
        let back: PanelId = serde_json::from_str("\"back\"").unwrap();
        assert_eq!(back, PanelId::Back);
    }
}
