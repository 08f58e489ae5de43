//! SVG Emitter
//!
//! Serialises a packed layout as an SVG document in millimetres with four
//! Inkscape layers, always in this order: engravings, T-slots, divider
//! slots, outlines. Laser software runs layers top to bottom, so interior
//! work is done before a part is cut free. Coordinates are printed with a
//! fixed precision, so identical layouts give byte-identical documents.

use crate::packer::{PlacedPanel, SheetLayout};
use crate::panel::{CutoutKind, Panel};
use pencilbox_core::{Error, Path, Result};
use pencilbox_settings::{OutputSettings, SheetSettings};

/// Layer ids in output order.
pub const LAYERS: [&str; 4] = ["engravings", "tslots", "divider_slots", "outlines"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Engravings,
    TSlots,
    DividerSlots,
    Outlines,
}

impl Layer {
    const ALL: [Layer; 4] = [
        Layer::Engravings,
        Layer::TSlots,
        Layer::DividerSlots,
        Layer::Outlines,
    ];

    fn id(self) -> &'static str {
        match self {
            Layer::Engravings => LAYERS[0],
            Layer::TSlots => LAYERS[1],
            Layer::DividerSlots => LAYERS[2],
            Layer::Outlines => LAYERS[3],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Layer::Engravings => "Engravings",
            Layer::TSlots => "T-Slots",
            Layer::DividerSlots => "Divider Slots",
            Layer::Outlines => "Outlines",
        }
    }

    /// Paths of `panel` that belong on this layer.
    fn paths(self, panel: &Panel) -> Vec<&Path> {
        match self {
            Layer::Engravings => panel.engravings.iter().collect(),
            Layer::TSlots => panel
                .cutouts
                .iter()
                .filter(|c| c.kind.is_fastener())
                .map(|c| &c.path)
                .collect(),
            Layer::DividerSlots => panel
                .cutouts
                .iter()
                .filter(|c| c.kind == CutoutKind::DividerSlot)
                .map(|c| &c.path)
                .collect(),
            Layer::Outlines => vec![&panel.outline],
        }
    }
}

/// Fixed three-decimal formatting without negative zero.
fn num(value: f64) -> String {
    let value = if value.abs() < 5e-4 { 0.0 } else { value };
    format!("{:.3}", value)
}

pub struct SvgEmitter<'a> {
    sheet: &'a SheetSettings,
    output: &'a OutputSettings,
}

impl<'a> SvgEmitter<'a> {
    pub fn new(sheet: &'a SheetSettings, output: &'a OutputSettings) -> Self {
        Self { sheet, output }
    }

    /// Vertical offset of a sheet in the drawing.
    fn sheet_offset(&self, sheet: usize) -> f64 {
        sheet as f64 * (self.sheet.height_mm + self.sheet.sheet_spacing_mm)
    }

    pub fn emit(&self, layout: &SheetLayout<'_>) -> Result<String> {
        for placed in &layout.placements {
            validate(placed)?;
        }

        let sheets = layout.sheet_count.max(1);
        let width = self.sheet.width_mm;
        let height = sheets as f64 * self.sheet.height_mm
            + (sheets - 1) as f64 * self.sheet.sheet_spacing_mm;

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\" \
             width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(width),
            h = num(height)
        ));

        for layer in Layer::ALL {
            let stroke = match layer {
                Layer::Engravings => &self.output.engrave_color,
                _ => &self.output.cut_color,
            };
            svg.push_str(&format!(
                "  <g id=\"{}\" inkscape:groupmode=\"layer\" inkscape:label=\"{}\" \
                 fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">\n",
                layer.id(),
                layer.label(),
                stroke,
                num(self.output.stroke_width_mm)
            ));
            for placed in &layout.placements {
                for path in layer.paths(placed.panel) {
                    svg.push_str(&format!(
                        "    <path data-panel=\"{}\" d=\"{}\"/>\n",
                        placed.panel.id,
                        self.path_data(placed, path)
                    ));
                }
            }
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        tracing::debug!(
            "Emitted SVG with {} placements on {} sheet(s), {} bytes",
            layout.placements.len(),
            sheets,
            svg.len()
        );
        Ok(svg)
    }

    fn path_data(&self, placed: &PlacedPanel<'_>, path: &Path) -> String {
        let offset = self.sheet_offset(placed.sheet);
        let mut d = String::new();
        for (i, &p) in path.points.iter().enumerate() {
            let q = placed.to_sheet(p);
            if i > 0 {
                d.push(' ');
            }
            d.push_str(&format!(
                "{} {} {}",
                if i == 0 { "M" } else { "L" },
                num(q.x),
                num(q.y + offset)
            ));
        }
        if path.closed {
            d.push_str(" Z");
        }
        d
    }
}

fn validate(placed: &PlacedPanel<'_>) -> Result<()> {
    let panel = placed.panel;
    let invariant = |what: String| -> Result<()> {
        Err(Error::Invariant(format!("{} panel: {}", panel.id, what)))
    };

    if !(placed.x.is_finite() && placed.y.is_finite()) {
        return invariant("placement is not finite".to_string());
    }
    if !panel.outline.closed || panel.outline.len() < 3 {
        return invariant(format!(
            "outline must be closed with at least 3 points, has {}",
            panel.outline.len()
        ));
    }
    if !panel.outline.is_finite() {
        return invariant("outline has non-finite coordinates".to_string());
    }
    for cutout in &panel.cutouts {
        if !cutout.path.closed || cutout.path.len() < 3 || !cutout.path.is_finite() {
            return invariant(format!("malformed {:?} cutout", cutout.kind));
        }
    }
    for path in &panel.engravings {
        if path.len() < 2 || !path.is_finite() {
            return invariant("malformed engraving path".to_string());
        }
    }
    Ok(())
}
