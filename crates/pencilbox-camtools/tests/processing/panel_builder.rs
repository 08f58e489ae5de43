use pencilbox_camtools::engraving::TextOutlineError;
use pencilbox_camtools::{
    BoxRequest, CutoutKind, Decoration, Dimensions, NoTextOutliner, Panel, PanelBuilder,
    TextOutliner,
};
use pencilbox_core::{GeometryError, PanelId, Path, Point, Rect};
use pencilbox_settings::{Config, LidStyle};

/// Returns a single wide rectangle for any text.
struct BlockOutliner;

impl TextOutliner for BlockOutliner {
    fn outline(&self, _text: &str) -> Result<Vec<Path>, TextOutlineError> {
        Ok(vec![Path::rect(&Rect::new(0.0, 0.0, 400.0, 100.0))])
    }
}

fn segment_box(a: Point, b: Point) -> (f64, f64, f64, f64) {
    (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Outlines are rectilinear, so two edges meet exactly when their boxes do.
fn assert_simple_rectilinear(panel: &Panel) {
    let points = &panel.outline.points;
    let n = points.len();
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        assert!(
            (a.x - b.x).abs() < 1e-9 || (a.y - b.y).abs() < 1e-9,
            "{} panel has a diagonal edge",
            panel.id
        );
    }
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (ax0, ay0, ax1, ay1) = segment_box(points[i], points[(i + 1) % n]);
            let (bx0, by0, bx1, by1) = segment_box(points[j], points[(j + 1) % n]);
            let touch = ax0 <= bx1 + 1e-7 && bx0 <= ax1 + 1e-7 && ay0 <= by1 + 1e-7 && by0 <= ay1 + 1e-7;
            assert!(!touch, "{} panel outline edges {} and {} meet", panel.id, i, j);
        }
    }
}

fn default_request() -> BoxRequest {
    BoxRequest::new(Dimensions::new(6.0, 4.0, 5.0))
}

#[test]
fn test_six_closed_simple_outlines() {
    let config = Config::default();
    let panels = PanelBuilder::new(&config)
        .build_all(&default_request(), &NoTextOutliner)
        .unwrap();
    let ids: Vec<PanelId> = panels.iter().map(|p| p.id).collect();
    assert_eq!(ids, PanelId::ALL.to_vec());
    for panel in &panels {
        assert!(panel.outline.closed);
        assert!(panel.outline.len() >= 4);
        assert_simple_rectilinear(panel);
    }
}

#[test]
fn test_loose_lid_is_plain_rectangle() {
    let mut config = Config::default();
    config.assembly.lid = LidStyle::Loose;
    let panels = PanelBuilder::new(&config)
        .build_all(&default_request(), &NoTextOutliner)
        .unwrap();
    let lid = &panels[5];
    assert_eq!(lid.outline.len(), 4);
    for panel in &panels {
        assert_simple_rectilinear(panel);
    }
}

#[test]
fn test_cutouts_lie_inside_outline_bounds() {
    let config = Config::default();
    let request = default_request().with_dividers(2);
    let panels = PanelBuilder::new(&config)
        .build_all(&request, &NoTextOutliner)
        .unwrap();
    for panel in &panels {
        let bounds = Rect::new(0.0, 0.0, panel.bounds.width, panel.bounds.height);
        for cutout in &panel.cutouts {
            let bbox = cutout.bounding_box().unwrap();
            assert!(bounds.contains_rect(&bbox), "{} {:?}", panel.id, cutout.kind);
        }
    }
}

#[test]
fn test_divider_slots_evenly_spaced() {
    let config = Config::default();
    let half_kerf = config.material.kerf_mm / 2.0;
    for count in 1..=2u8 {
        let request = default_request().with_dividers(count);
        let panels = PanelBuilder::new(&config)
            .build_all(&request, &NoTextOutliner)
            .unwrap();
        for panel in &panels {
            let slots: Vec<Rect> = panel
                .cutouts_of(CutoutKind::DividerSlot)
                .filter_map(|c| c.bounding_box())
                .collect();
            if matches!(panel.id, PanelId::Front | PanelId::Back) {
                assert_eq!(slots.len(), count as usize);
                let length = request.dimensions.length_mm();
                for (k, slot) in slots.iter().enumerate() {
                    let expected = length * (k + 1) as f64 / (count as f64 + 1.0) + half_kerf;
                    assert!((slot.center().x - expected).abs() < 1e-9);
                    assert!((slot.width - (config.material.thickness_mm - config.material.kerf_mm)).abs() < 1e-9);
                }
            } else {
                assert!(slots.is_empty());
            }
        }
    }
}

#[test]
fn test_divider_collides_with_bottom_t_slot() {
    let config = Config::default();
    let request = BoxRequest::new(Dimensions::new(6.0, 4.0, 1.0)).with_dividers(1);
    let err = PanelBuilder::new(&config)
        .build_all(&request, &NoTextOutliner)
        .unwrap_err();
    assert!(matches!(
        err,
        GeometryError::DividerCollision {
            panel: PanelId::Front,
            divider: 1,
            ..
        }
    ));
}

/// Deepest horizontal outline edge above `slot` that overlaps it in x.
fn top_edge_floor_over(panel: &Panel, slot: &Rect) -> f64 {
    let points = &panel.outline.points;
    let n = points.len();
    (0..n)
        .map(|i| (points[i], points[(i + 1) % n]))
        .filter(|(a, b)| (a.y - b.y).abs() < 1e-9 && a.y < slot.y)
        .filter(|(a, b)| a.x.min(b.x) < slot.max_x() && a.x.max(b.x) > slot.x)
        .map(|(a, _)| a.y)
        .fold(f64::NEG_INFINITY, f64::max)
}

#[test]
fn test_divider_slots_keep_a_kerf_below_the_top_edge() {
    let config = Config::default();
    let kerf = config.material.kerf_mm;
    for count in 1..=2u8 {
        let request = default_request().with_dividers(count);
        let panels = PanelBuilder::new(&config)
            .build_all(&request, &NoTextOutliner)
            .unwrap();
        for panel in panels.iter().filter(|p| matches!(p.id, PanelId::Front | PanelId::Back)) {
            for slot in panel
                .cutouts_of(CutoutKind::DividerSlot)
                .filter_map(|c| c.bounding_box())
            {
                let floor = top_edge_floor_over(panel, &slot);
                assert!(floor.is_finite());
                assert!(
                    slot.y - floor >= kerf - 1e-9,
                    "{} panel, {} divider(s): {:.3}mm below the top edge",
                    panel.id,
                    count,
                    slot.y - floor
                );
            }
        }
    }
}

#[test]
fn test_divider_slot_without_clearance_is_rejected() {
    let mut config = Config::default();
    config.hardware.divider_clearance_mm = 0.0;
    // One divider lands under the middle notch of the top edge
    let request = default_request().with_dividers(1);
    let err = PanelBuilder::new(&config)
        .build_all(&request, &NoTextOutliner)
        .unwrap_err();
    match err {
        GeometryError::DividerBridge {
            panel,
            divider,
            bridge_mm,
            kerf_mm,
        } => {
            assert_eq!(panel, PanelId::Front);
            assert_eq!(divider, 1);
            assert!(bridge_mm < kerf_mm);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fractal_avoids_cutouts() {
    let config = Config::default();
    let request = default_request()
        .with_dividers(1)
        .with_decoration(PanelId::Front, Decoration::Fractal);
    let panels = PanelBuilder::new(&config)
        .build_all(&request, &NoTextOutliner)
        .unwrap();
    let front = &panels[0];
    assert!(!front.engravings.is_empty());
    let cutouts: Vec<Rect> = front.cutouts.iter().filter_map(|c| c.bounding_box()).collect();
    for path in &front.engravings {
        assert_eq!(path.len(), 2);
        assert!(!path.closed);
        let bbox = path.bounding_box().unwrap();
        assert!(cutouts.iter().all(|c| !c.intersects(&bbox)));
    }
    assert!(panels[1].engravings.is_empty());
}

#[test]
fn test_text_is_fitted_into_zone() {
    let config = Config::default();
    let request = default_request().with_decoration(PanelId::Front, Decoration::Text("PENS".into()));
    let panels = PanelBuilder::new(&config)
        .build_all(&request, &BlockOutliner)
        .unwrap();
    let front = &panels[0];
    let bbox = front.engravings[0].bounding_box().unwrap();

    // Zone spans 15.5..136.9 mm across; text takes three quarters of it
    let zone_width = 152.4 - 2.0 * (3.0 + 6.5 + 6.0);
    assert!((bbox.width - zone_width * 0.75).abs() < 1e-6);
    assert!((bbox.center().x - (76.2 + 0.05)).abs() < 1e-6);
}

#[test]
fn test_text_moves_beside_divider() {
    let config = Config::default();
    let request = default_request()
        .with_dividers(1)
        .with_decoration(PanelId::Back, Decoration::Text("PENS".into()));
    let panels = PanelBuilder::new(&config)
        .build_all(&request, &BlockOutliner)
        .unwrap();
    let back = &panels[1];
    let bbox = back.engravings[0].bounding_box().unwrap();
    let slot = back
        .cutouts_of(CutoutKind::DividerSlot)
        .next()
        .and_then(|c| c.bounding_box())
        .unwrap();
    // Both free spans are equal, the left one wins
    assert!(bbox.max_x() < slot.x);
    assert!(!bbox.intersects(&slot));
}
