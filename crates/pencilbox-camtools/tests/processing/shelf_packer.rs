use pencilbox_camtools::{Panel, ShelfPacker};
use pencilbox_core::{PackingFailure, PanelId, Path, Rect, Size};
use pencilbox_settings::SheetSettings;
use proptest::prelude::*;

fn block(id: PanelId, width: f64, height: f64) -> Panel {
    Panel {
        id,
        outline: Path::rect(&Rect::new(0.0, 0.0, width, height)),
        cutouts: Vec::new(),
        engravings: Vec::new(),
        bounds: Size::new(width, height),
    }
}

fn settings(max_sheets: usize) -> SheetSettings {
    SheetSettings {
        max_sheets,
        ..SheetSettings::default()
    }
}

proptest! {
    #[test]
    fn placements_stay_on_sheet_without_overlap(
        sizes in prop::collection::vec((5.0f64..350.0, 5.0f64..350.0), 1..8),
        max_sheets in 1usize..4,
    ) {
        let panels: Vec<Panel> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| block(PanelId::ALL[i % 6], w, h))
            .collect();
        let sheet = settings(max_sheets);
        let packer = ShelfPacker::new(&sheet);

        match packer.pack(&panels) {
            Ok(layout) => {
                prop_assert_eq!(layout.placements.len(), panels.len());
                prop_assert!(layout.sheet_count <= max_sheets);
                let inflated: Vec<(usize, Rect)> = layout
                    .placements
                    .iter()
                    .map(|p| {
                        // Shrink slightly so shelf neighbours that touch do not count
                        let r = p.rect();
                        let gap = layout.gap - 1e-7;
                        (p.sheet, Rect::new(r.x, r.y, r.width + gap, r.height + gap))
                    })
                    .collect();
                for (sheet_index, rect) in &inflated {
                    prop_assert!(*sheet_index < layout.sheet_count);
                    prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
                    prop_assert!(rect.max_x() <= sheet.width_mm + 1e-6);
                    prop_assert!(rect.max_y() <= sheet.height_mm + 1e-6);
                }
                for i in 0..inflated.len() {
                    for j in (i + 1)..inflated.len() {
                        if inflated[i].0 == inflated[j].0 {
                            prop_assert!(!inflated[i].1.intersects(&inflated[j].1));
                        }
                    }
                }
            }
            Err(err) => match err.reason {
                PackingFailure::TooWide => prop_assert!(err.required.width > err.available.width),
                PackingFailure::TooTall => prop_assert!(err.required.height > err.available.height),
                PackingFailure::SheetLimit => prop_assert!(err.sheet + 1 >= max_sheets),
            },
        }
    }

    #[test]
    fn packing_is_deterministic(
        sizes in prop::collection::vec((5.0f64..200.0, 5.0f64..200.0), 1..6),
    ) {
        let panels: Vec<Panel> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| block(PanelId::ALL[i % 6], w, h))
            .collect();
        let packer = ShelfPacker::new(&settings(3));
        let first = packer.pack(&panels).map(|l| l.records());
        let second = packer.pack(&panels).map(|l| l.records());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_oversize_panel_is_named() {
    let panels = vec![
        block(PanelId::Front, 100.0, 100.0),
        block(PanelId::Back, 500.0, 500.0),
    ];
    let err = ShelfPacker::new(&settings(1)).pack(&panels).unwrap_err();
    assert_eq!(err.panel, PanelId::Back);
    assert_eq!(err.reason, PackingFailure::TooWide);
    assert_eq!(err.available, Size::new(457.2, 304.8));
}
