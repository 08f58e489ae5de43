use pencilbox_camtools::{
    BoxGenerator, BoxRequest, CutoutKind, Dimensions, NoTextOutliner, LAYERS,
};
use pencilbox_core::{Error, PackingFailure, PanelId};
use pencilbox_settings::Config;

fn quarter_inch_config() -> Config {
    let mut config = Config::default();
    config.material.thickness_mm = 6.35;
    config
}

/// Body of one layer group.
fn layer<'a>(svg: &'a str, id: &str) -> &'a str {
    let start = svg.find(&format!("<g id=\"{}\"", id)).unwrap();
    let end = start + svg[start..].find("</g>").unwrap();
    &svg[start..end]
}

#[test]
fn test_plain_box_fits_one_sheet() {
    let generator = BoxGenerator::new(quarter_inch_config());
    let request = BoxRequest::new(Dimensions::new(6.0, 4.0, 5.0));
    let generated = generator.generate(&request, &NoTextOutliner).unwrap();

    assert_eq!(generated.panels.len(), 6);
    assert_eq!(generated.sheet_count, 1);
    assert!(generated.placements.iter().all(|p| p.sheet == 0));

    let svg = &generated.svg;
    for id in LAYERS {
        assert_eq!(svg.matches(&format!("<g id=\"{}\"", id)).count(), 1);
    }
    let outlines = layer(svg, "outlines");
    assert_eq!(outlines.matches("<path").count(), 6);
    assert_eq!(outlines.matches(" Z\"").count(), 6);
    assert_eq!(layer(svg, "divider_slots").matches("<path").count(), 0);
    assert_eq!(layer(svg, "engravings").matches("<path").count(), 0);
}

#[test]
fn test_two_dividers_on_front_and_back() {
    let generator = BoxGenerator::new(quarter_inch_config());
    let request = BoxRequest::new(Dimensions::new(6.0, 4.0, 5.0)).with_dividers(2);
    let generated = generator.generate(&request, &NoTextOutliner).unwrap();

    let half_kerf = generator.config().material.kerf_mm / 2.0;
    for panel in &generated.panels {
        let centres: Vec<f64> = panel
            .cutouts_of(CutoutKind::DividerSlot)
            .filter_map(|c| c.bounding_box())
            .map(|r| r.center().x - half_kerf)
            .collect();
        match panel.id {
            PanelId::Front | PanelId::Back => {
                assert_eq!(centres.len(), 2);
                assert!((centres[0] - 152.4 / 3.0).abs() < 1e-9);
                assert!((centres[1] - 152.4 * 2.0 / 3.0).abs() < 1e-9);
            }
            _ => assert!(centres.is_empty()),
        }
    }
    let slots = layer(&generated.svg, "divider_slots");
    assert_eq!(slots.matches("data-panel=\"front\"").count(), 2);
    assert_eq!(slots.matches("data-panel=\"back\"").count(), 2);
}

#[test]
fn test_long_box_reports_offending_panel() {
    let generator = BoxGenerator::new(quarter_inch_config());
    let request = BoxRequest::new(Dimensions::new(30.0, 4.0, 5.0));
    match generator.generate(&request, &NoTextOutliner) {
        Err(Error::Packing(err)) => {
            assert_eq!(err.panel, PanelId::Front);
            assert_eq!(err.reason, PackingFailure::TooTall);
            assert!(err.required.height > err.available.height);
        }
        other => panic!("expected a packing error, got {:?}", other.map(|g| g.sheet_count)),
    }
}

#[test]
fn test_output_is_byte_identical() {
    let generator = BoxGenerator::new(Config::default());
    let request = BoxRequest::new(Dimensions::new(7.5, 3.25, 4.0))
        .with_dividers(1)
        .with_decoration(PanelId::Left, pencilbox_camtools::Decoration::Fractal);
    let first = generator.generate(&request, &NoTextOutliner).unwrap();
    let second = generator.generate(&request, &NoTextOutliner).unwrap();
    assert_eq!(first.svg, second.svg);
    assert_eq!(first.placements, second.placements);
}
