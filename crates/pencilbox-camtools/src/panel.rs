//! Panel Builder
//!
//! Builds the six faces of the box from one parametrised routine driven by
//! the [`faces`] lookup table. Each face gets its finger-jointed outline,
//! fastener cutouts, divider slots (front/back) and an optional engraving.
//! Tooth counts depend only on edge length, so every pair of mating edges
//! receives identical profiles with opposite parity.

pub mod faces;
mod outline;
pub mod types;

pub use faces::{EdgeJoint, EdgeLayout, FaceLayout, FaceSize, Fastener};
pub use types::{BoxRequest, Cutout, CutoutKind, Decoration, Dimensions, Panel, WallDecorations};

use crate::engraving::{
    engraving_zone, fit_contours, widest_free_span, LineSegment, SierpinskiSegments, TextOutliner,
};
use crate::joint::JointProfile;
use outline::{
    divider_slot_rect, screw_hole, t_slot, top_edge_floor, trace_outline, EdgeFrame,
};
use pencilbox_core::{inches_to_mm, EdgeSide, GeometryError, PanelId, Path, Rect, Size};
use pencilbox_settings::Config;

/// Most dividers a box can hold.
pub const MAX_DIVIDERS: u8 = 2;

pub struct PanelBuilder<'a> {
    config: &'a Config,
}

impl<'a> PanelBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build all six panels in the order front, back, left, right, bottom, lid.
    pub fn build_all(
        &self,
        request: &BoxRequest,
        outliner: &dyn TextOutliner,
    ) -> Result<Vec<Panel>, GeometryError> {
        PanelId::ALL
            .iter()
            .map(|&id| {
                self.build(
                    id,
                    &request.dimensions,
                    request.decorations.get(id),
                    request.dividers,
                    outliner,
                )
            })
            .collect()
    }

    pub fn build(
        &self,
        id: PanelId,
        dimensions: &Dimensions,
        decoration: &Decoration,
        divider_count: u8,
        outliner: &dyn TextOutliner,
    ) -> Result<Panel, GeometryError> {
        if divider_count > MAX_DIVIDERS {
            return Err(GeometryError::TooManyDividers(divider_count));
        }
        let (length, width, height) = self.check_dimensions(dimensions)?;

        let thickness = self.config.material.thickness_mm;
        let kerf = self.config.material.kerf_mm;
        let layout = FaceLayout::for_panel(id, self.config.assembly.lid);
        let (w, h) = layout.size.resolve(length, width, height);

        let mut profiles: [Option<JointProfile>; 4] = [None, None, None, None];
        for side in EdgeSide::ALL {
            if let EdgeJoint::Fingers { starts_with_tab } = layout.edge(side).joint {
                let edge_length = EdgeFrame::new(side, w, h).length();
                let profile = JointProfile::for_edge(
                    edge_length,
                    thickness,
                    starts_with_tab,
                    &self.config.joints,
                )
                .map_err(|source| GeometryError::Joint {
                    panel: id,
                    edge: side,
                    source,
                })?;
                profiles[side.index()] = Some(profile);
            }
        }
        let outline = trace_outline(w, h, thickness, kerf, &profiles);

        let hardware = &self.config.hardware;
        let mut cutouts = Vec::new();
        for side in EdgeSide::ALL {
            let frame = EdgeFrame::new(side, w, h);
            match layout.edge(side).fastener {
                Fastener::TSlot => cutouts.extend(t_slot(&frame, hardware, thickness, kerf)),
                Fastener::ScrewHole => {
                    cutouts.push(screw_hole(&frame, hardware, thickness, kerf))
                }
                Fastener::None => {}
            }
        }

        if layout.divider_slots {
            let top = profiles[EdgeSide::Top.index()].as_ref();
            self.add_divider_slots(id, w, h, divider_count, top, &mut cutouts)?;
        }

        let engravings = if id.is_wall() {
            self.engrave(id, w, h, decoration, &cutouts, outliner)?
        } else {
            if !decoration.is_none() {
                tracing::warn!("{} panel cannot be decorated; ignoring", id);
            }
            Vec::new()
        };

        // Shift so the kerf-inflated outline starts at the origin
        let half_kerf = kerf / 2.0;
        let panel = Panel {
            id,
            outline: outline.translated(half_kerf, half_kerf),
            cutouts: cutouts
                .into_iter()
                .map(|c| Cutout::new(c.kind, c.path.translated(half_kerf, half_kerf)))
                .collect(),
            engravings: engravings
                .iter()
                .map(|p| p.translated(half_kerf, half_kerf))
                .collect(),
            bounds: Size::new(w + kerf, h + kerf),
        };

        tracing::debug!(
            "Built {} panel: {:.2} x {:.2} mm, {} outline points, {} cutouts, {} engraving paths",
            id,
            panel.bounds.width,
            panel.bounds.height,
            panel.outline.len(),
            panel.cutouts.len(),
            panel.engravings.len()
        );
        Ok(panel)
    }

    /// Validate the dimensions and convert them to mm.
    fn check_dimensions(&self, dimensions: &Dimensions) -> Result<(f64, f64, f64), GeometryError> {
        let thickness = self.config.material.thickness_mm;
        for (name, inches) in [
            ("length", dimensions.length),
            ("width", dimensions.width),
            ("height", dimensions.height),
        ] {
            let value_mm = inches_to_mm(inches);
            if !inches.is_finite() || inches <= 0.0 {
                return Err(GeometryError::InvalidDimensions {
                    dimension: name,
                    value_mm,
                    reason: "must be a positive number".to_string(),
                });
            }
            if value_mm <= 2.0 * thickness {
                return Err(GeometryError::InvalidDimensions {
                    dimension: name,
                    value_mm,
                    reason: format!(
                        "must exceed twice the material thickness ({:.2}mm)",
                        2.0 * thickness
                    ),
                });
            }
        }
        Ok((
            dimensions.length_mm(),
            dimensions.width_mm(),
            dimensions.height_mm(),
        ))
    }

    /// Evenly spaced slots at k/(n+1) of the panel length.
    ///
    /// Each slot starts one clearance below the top joint and keeps the
    /// same clearance above the bottom joint.
    fn add_divider_slots(
        &self,
        id: PanelId,
        width: f64,
        height: f64,
        count: u8,
        top_profile: Option<&JointProfile>,
        cutouts: &mut Vec<Cutout>,
    ) -> Result<(), GeometryError> {
        if count == 0 {
            return Ok(());
        }

        let thickness = self.config.material.thickness_mm;
        let kerf = self.config.material.kerf_mm;
        let clearance = self.config.hardware.divider_clearance_mm;

        let top = thickness + clearance;
        let depth = height / 2.0;
        let available = height - 2.0 * thickness - 2.0 * clearance;
        if depth > available {
            return Err(GeometryError::DividerTooDeep {
                panel: id,
                depth_mm: depth,
                available_mm: available,
            });
        }

        let fasteners: Vec<Rect> = cutouts
            .iter()
            .filter(|c| c.kind.is_fastener())
            .filter_map(Cutout::bounding_box)
            .collect();

        let spacing = width / (count as f64 + 1.0);
        for divider in 1..=count as usize {
            let center_x = spacing * divider as f64;
            let slot = divider_slot_rect(center_x, top, thickness, kerf, depth);

            let floor = top_edge_floor(top_profile, width, thickness, kerf, slot.x, slot.max_x());
            let bridge = slot.y - floor;
            if bridge < kerf {
                return Err(GeometryError::DividerBridge {
                    panel: id,
                    divider,
                    bridge_mm: bridge,
                    kerf_mm: kerf,
                });
            }

            let guard = slot.inflate(clearance);
            if fasteners.iter().any(|r| r.intersects(&guard)) {
                return Err(GeometryError::DividerCollision {
                    panel: id,
                    divider,
                    position_mm: center_x,
                });
            }
            cutouts.push(Cutout::new(CutoutKind::DividerSlot, Path::rect(&slot)));
        }
        Ok(())
    }

    fn engrave(
        &self,
        id: PanelId,
        width: f64,
        height: f64,
        decoration: &Decoration,
        cutouts: &[Cutout],
        outliner: &dyn TextOutliner,
    ) -> Result<Vec<Path>, GeometryError> {
        match decoration {
            Decoration::None => return Ok(Vec::new()),
            Decoration::Text(text) if text.trim().is_empty() => {
                return Err(GeometryError::EmptyText { panel: id })
            }
            _ => {}
        }

        let settings = &self.config.engraving;
        let margin = settings.margin_mm;
        let Some(zone) = engraving_zone(
            width,
            height,
            self.config.material.thickness_mm,
            &self.config.hardware,
            margin,
        ) else {
            tracing::warn!("{} panel: no room to engrave, skipping decoration", id);
            return Ok(Vec::new());
        };

        let blocked: Vec<(f64, f64)> = cutouts
            .iter()
            .filter(|c| c.kind == CutoutKind::DividerSlot)
            .filter_map(Cutout::bounding_box)
            .map(|r| (r.x - margin, r.max_x() + margin))
            .collect();
        let Some(span) = widest_free_span(zone, &blocked) else {
            tracing::warn!("{} panel: dividers leave no room to engrave", id);
            return Ok(Vec::new());
        };

        match decoration {
            Decoration::Text(text) => {
                let contours =
                    outliner
                        .outline(text)
                        .map_err(|e| GeometryError::TextOutline {
                            panel: id,
                            reason: e.to_string(),
                        })?;
                let paths = fit_contours(
                    &contours,
                    span,
                    settings.text_width_fraction,
                    settings.text_height_fraction,
                )
                .ok_or_else(|| GeometryError::TextOutline {
                    panel: id,
                    reason: format!("no outline produced for '{}'", text),
                })?;
                tracing::debug!("{} panel: engraved '{}' as {} contours", id, text, paths.len());
                Ok(paths)
            }
            Decoration::Fractal => {
                let Some(segments) = SierpinskiSegments::fitted(
                    span,
                    settings.min_fractal_edge_mm,
                    settings.max_fractal_depth,
                ) else {
                    tracing::warn!("{} panel: too small for a fractal, skipping decoration", id);
                    return Ok(Vec::new());
                };

                let keepouts: Vec<Rect> = cutouts
                    .iter()
                    .filter_map(Cutout::bounding_box)
                    .map(|r| r.inflate(margin / 2.0))
                    .collect();
                let depth = segments.depth();
                let paths: Vec<Path> = segments
                    .filter(|s| {
                        let bbox = s.bounding_box();
                        !keepouts.iter().any(|k| k.intersects(&bbox))
                    })
                    .map(LineSegment::into_path)
                    .collect();
                tracing::debug!(
                    "{} panel: Sierpinski depth {} with {} segments",
                    id,
                    depth,
                    paths.len()
                );
                Ok(paths)
            }
            Decoration::None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engraving::NoTextOutliner;
    use pencilbox_core::JointError;

    fn dims() -> Dimensions {
        Dimensions::new(6.0, 4.0, 5.0)
    }

    #[test]
    fn test_front_bounds_include_kerf() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let front = builder
            .build(PanelId::Front, &dims(), &Decoration::None, 0, &NoTextOutliner)
            .unwrap();
        assert!((front.bounds.width - 152.5).abs() < 1e-9);
        assert!((front.bounds.height - 127.1).abs() < 1e-9);
        let bbox = front.outline.bounding_box().unwrap();
        assert!(bbox.x.abs() < 1e-9 && bbox.y.abs() < 1e-9);
        assert!((bbox.width - front.bounds.width).abs() < 1e-9);
        assert!((bbox.height - front.bounds.height).abs() < 1e-9);
    }

    #[test]
    fn test_fastener_counts() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let build = |id| {
            builder
                .build(id, &dims(), &Decoration::None, 0, &NoTextOutliner)
                .unwrap()
        };

        let front = build(PanelId::Front);
        assert_eq!(front.cutouts_of(CutoutKind::ShaftSlot).count(), 3);
        assert_eq!(front.cutouts_of(CutoutKind::NutPocket).count(), 3);
        assert_eq!(front.cutouts_of(CutoutKind::ScrewHole).count(), 0);

        let left = build(PanelId::Left);
        assert_eq!(left.cutouts_of(CutoutKind::ShaftSlot).count(), 1);
        assert_eq!(left.cutouts_of(CutoutKind::ScrewHole).count(), 2);

        let bottom = build(PanelId::Bottom);
        assert_eq!(bottom.cutouts_of(CutoutKind::ScrewHole).count(), 4);

        let lid = build(PanelId::Lid);
        assert!(lid.cutouts.is_empty());
    }

    #[test]
    fn test_too_many_dividers() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let err = builder
            .build(PanelId::Front, &dims(), &Decoration::None, 3, &NoTextOutliner)
            .unwrap_err();
        assert_eq!(err, GeometryError::TooManyDividers(3));
    }

    #[test]
    fn test_invalid_dimensions() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let err = builder
            .build(
                PanelId::Front,
                &Dimensions::new(-1.0, 4.0, 5.0),
                &Decoration::None,
                0,
                &NoTextOutliner,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidDimensions {
                dimension: "length",
                ..
            }
        ));

        let err = builder
            .build(
                PanelId::Left,
                &Dimensions::new(6.0, 0.2, 5.0),
                &Decoration::None,
                0,
                &NoTextOutliner,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidDimensions {
                dimension: "width",
                ..
            }
        ));
    }

    #[test]
    fn test_short_edge_reports_joint_error() {
        let mut config = Config::default();
        config.material.thickness_mm = 6.0;
        let builder = PanelBuilder::new(&config);
        // 0.5in = 12.7mm: passes the 2t check but cannot hold three teeth
        let err = builder
            .build(
                PanelId::Left,
                &Dimensions::new(6.0, 0.5, 5.0),
                &Decoration::None,
                0,
                &NoTextOutliner,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::Joint {
                panel: PanelId::Left,
                edge: EdgeSide::Top,
                source: JointError::ThicknessExceedsEdge { .. } | JointError::TeethTooNarrow { .. },
            }
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let err = builder
            .build(
                PanelId::Back,
                &dims(),
                &Decoration::Text("   ".into()),
                0,
                &NoTextOutliner,
            )
            .unwrap_err();
        assert_eq!(err, GeometryError::EmptyText { panel: PanelId::Back });
    }

    #[test]
    fn test_outliner_failure_is_reported() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let err = builder
            .build(
                PanelId::Front,
                &dims(),
                &Decoration::Text("PENCILS".into()),
                0,
                &NoTextOutliner,
            )
            .unwrap_err();
        assert!(matches!(err, GeometryError::TextOutline { panel: PanelId::Front, .. }));
    }

    #[test]
    fn test_decoration_on_bottom_is_ignored() {
        let config = Config::default();
        let builder = PanelBuilder::new(&config);
        let bottom = builder
            .build(PanelId::Bottom, &dims(), &Decoration::Fractal, 0, &NoTextOutliner)
            .unwrap();
        assert!(bottom.engravings.is_empty());
    }
}
