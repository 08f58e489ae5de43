//! Shelf Packer
//!
//! Greedy shelf packing of panel bounding boxes onto fixed-size sheets.
//! Panels are placed strictly in input order, left to right along a shelf;
//! a new shelf opens below the tallest panel of the previous one. Every
//! panel keeps a fixed gap to its right and below it. The shelf wrap is
//! decided on the unturned bounds; a panel still too wide for the sheet is
//! then turned by 90 degrees at the start of the new shelf. One that is too
//! tall for an empty sheet is turned if that helps, otherwise the box does
//! not fit.

use crate::panel::Panel;
use pencilbox_core::{PackingError, PackingFailure, PanelId, Point, Rect, Size};
use pencilbox_settings::SheetSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    None,
    /// Turned by 90 degrees.
    Quarter,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
        }
    }
}

/// A panel positioned on a sheet.
#[derive(Debug, Clone, Copy)]
pub struct PlacedPanel<'a> {
    pub panel: &'a Panel,
    /// Top-left corner of the footprint on its sheet
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    /// Zero-based sheet index
    pub sheet: usize,
}

impl<'a> PlacedPanel<'a> {
    /// Bounds after rotation.
    pub fn footprint(&self) -> Size {
        match self.rotation {
            Rotation::None => self.panel.bounds,
            Rotation::Quarter => self.panel.bounds.rotated(),
        }
    }

    /// Footprint on the sheet.
    pub fn rect(&self) -> Rect {
        let size = self.footprint();
        Rect::new(self.x, self.y, size.width, size.height)
    }

    /// Map a point from panel coordinates to sheet coordinates.
    ///
    /// A quarter turn sends `(x, y)` to `(h - y, x)`, which keeps the
    /// turned panel in the positive quadrant.
    pub fn to_sheet(&self, p: Point) -> Point {
        let turned = match self.rotation {
            Rotation::None => p,
            Rotation::Quarter => Point::new(self.panel.bounds.height - p.y, p.x),
        };
        turned.translate(self.x, self.y)
    }
}

/// Serialisable summary of one placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub panel: PanelId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Rotation,
    pub sheet: usize,
}

impl From<&PlacedPanel<'_>> for PlacementRecord {
    fn from(placed: &PlacedPanel<'_>) -> Self {
        let size = placed.footprint();
        Self {
            panel: placed.panel.id,
            x: placed.x,
            y: placed.y,
            width: size.width,
            height: size.height,
            rotation: placed.rotation,
            sheet: placed.sheet,
        }
    }
}

/// The result of packing.
#[derive(Debug, Clone)]
pub struct SheetLayout<'a> {
    pub sheet: Size,
    pub gap: f64,
    pub placements: Vec<PlacedPanel<'a>>,
    pub sheet_count: usize,
}

impl<'a> SheetLayout<'a> {
    pub fn records(&self) -> Vec<PlacementRecord> {
        self.placements.iter().map(PlacementRecord::from).collect()
    }
}

/// Cursor over the current sheet and shelf.
#[derive(Debug, Clone, Copy)]
struct ShelfCursor {
    sheet: usize,
    x: f64,
    y: f64,
    shelf_height: f64,
    on_shelf: usize,
    on_sheet: usize,
    gap: f64,
}

impl ShelfCursor {
    fn new(gap: f64) -> Self {
        Self {
            sheet: 0,
            x: 0.0,
            y: 0.0,
            shelf_height: 0.0,
            on_shelf: 0,
            on_sheet: 0,
            gap,
        }
    }

    fn place(&mut self, size: Size) -> (f64, f64) {
        let position = (self.x, self.y);
        self.x += size.width + self.gap;
        self.shelf_height = self.shelf_height.max(size.height);
        self.on_shelf += 1;
        self.on_sheet += 1;
        position
    }

    fn next_row(&mut self) {
        self.y += self.shelf_height + self.gap;
        self.x = 0.0;
        self.shelf_height = 0.0;
        self.on_shelf = 0;
    }

    fn next_sheet(&mut self) {
        *self = Self {
            sheet: self.sheet + 1,
            ..Self::new(self.gap)
        };
    }
}

#[derive(Debug, Clone)]
pub struct ShelfPacker {
    sheet: Size,
    gap: f64,
    max_sheets: usize,
}

impl ShelfPacker {
    pub fn new(settings: &SheetSettings) -> Self {
        Self {
            sheet: Size::new(settings.width_mm, settings.height_mm),
            gap: settings.gap_mm,
            max_sheets: settings.max_sheets.max(1),
        }
    }

    /// Place every panel, in order, or report the first one that cannot go anywhere.
    pub fn pack<'a>(&self, panels: &'a [Panel]) -> Result<SheetLayout<'a>, PackingError> {
        let mut cursor = ShelfCursor::new(self.gap);
        let mut placements = Vec::with_capacity(panels.len());

        for panel in panels {
            let placed = self.place(panel, &mut cursor)?;
            tracing::debug!(
                "Placed {} panel at ({:.2}, {:.2}) on sheet {} rotated {} deg",
                panel.id,
                placed.x,
                placed.y,
                placed.sheet,
                placed.rotation.degrees()
            );
            placements.push(placed);
        }

        let sheet_count = placements.iter().map(|p| p.sheet + 1).max().unwrap_or(0);
        Ok(SheetLayout {
            sheet: self.sheet,
            gap: self.gap,
            placements,
            sheet_count,
        })
    }

    fn place<'a>(
        &self,
        panel: &'a Panel,
        cursor: &mut ShelfCursor,
    ) -> Result<PlacedPanel<'a>, PackingError> {
        let gap = self.gap;
        let (sheet_w, sheet_h) = (self.sheet.width, self.sheet.height);

        loop {
            let mut size = panel.bounds;
            let mut rotation = Rotation::None;

            if cursor.on_shelf > 0 && cursor.x + size.width + gap > sheet_w {
                cursor.next_row();
            }

            // A panel this wide always starts its own shelf
            if size.width + gap > sheet_w {
                size = size.rotated();
                rotation = Rotation::Quarter;
                if size.width + gap > sheet_w {
                    return Err(self.failure(panel, PackingFailure::TooWide, size, cursor));
                }
            }

            if cursor.y + size.height + gap > sheet_h {
                if cursor.on_sheet > 0 {
                    if cursor.sheet + 1 >= self.max_sheets {
                        return Err(self.failure(panel, PackingFailure::SheetLimit, size, cursor));
                    }
                    cursor.next_sheet();
                    continue;
                }

                let turned = size.rotated();
                if rotation == Rotation::None
                    && turned.width + gap <= sheet_w
                    && turned.height + gap <= sheet_h
                {
                    size = turned;
                    rotation = Rotation::Quarter;
                } else {
                    return Err(self.failure(panel, PackingFailure::TooTall, size, cursor));
                }
            }

            let (x, y) = cursor.place(size);
            return Ok(PlacedPanel {
                panel,
                x,
                y,
                rotation,
                sheet: cursor.sheet,
            });
        }
    }

    fn failure(
        &self,
        panel: &Panel,
        reason: PackingFailure,
        size: Size,
        cursor: &ShelfCursor,
    ) -> PackingError {
        let error = PackingError {
            panel: panel.id,
            reason,
            required: Size::new(size.width + self.gap, size.height + self.gap),
            available: self.sheet,
            sheet: cursor.sheet,
        };
        tracing::warn!("{}", error);
        error
    }
}
