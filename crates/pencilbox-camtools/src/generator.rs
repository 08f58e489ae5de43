//! Box Generator
//!
//! Runs the whole pipeline for one request: build the six panels, pack
//! them onto sheets, then serialise the drawing. Nothing is emitted unless
//! every earlier stage succeeded.

use crate::engraving::TextOutliner;
use crate::packer::{PlacementRecord, ShelfPacker};
use crate::panel::{BoxRequest, Panel, PanelBuilder};
use crate::svg::SvgEmitter;
use pencilbox_core::Result;
use pencilbox_settings::Config;
use tracing::info;

/// Everything produced for one box.
#[derive(Debug, Clone)]
pub struct GeneratedBox {
    pub panels: Vec<Panel>,
    pub placements: Vec<PlacementRecord>,
    pub sheet_count: usize,
    pub svg: String,
}

#[derive(Debug, Clone, Default)]
pub struct BoxGenerator {
    config: Config,
}

impl BoxGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generate(
        &self,
        request: &BoxRequest,
        outliner: &dyn TextOutliner,
    ) -> Result<GeneratedBox> {
        let d = &request.dimensions;
        info!(
            "Generating box {} x {} x {} in with {} divider(s)",
            d.length, d.width, d.height, request.dividers
        );

        let panels = PanelBuilder::new(&self.config).build_all(request, outliner)?;
        info!("Built {} panels", panels.len());

        let layout = ShelfPacker::new(&self.config.sheet).pack(&panels)?;
        info!("Packed panels onto {} sheet(s)", layout.sheet_count);

        let svg = SvgEmitter::new(&self.config.sheet, &self.config.output).emit(&layout)?;
        let placements = layout.records();
        let sheet_count = layout.sheet_count;

        Ok(GeneratedBox {
            panels,
            placements,
            sheet_count,
            svg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engraving::NoTextOutliner;
    use crate::panel::Dimensions;
    use pencilbox_core::{Error, PackingFailure, PanelId};

    #[test]
    fn test_generate_default_box() {
        let generator = BoxGenerator::default();
        let request = BoxRequest::new(Dimensions::new(6.0, 4.0, 5.0));
        let generated = generator.generate(&request, &NoTextOutliner).unwrap();
        assert_eq!(generated.panels.len(), 6);
        assert_eq!(generated.placements.len(), 6);
        assert_eq!(generated.sheet_count, 1);
        assert!(generated.svg.starts_with("<?xml"));
    }

    #[test]
    fn test_packing_failure_stops_pipeline() {
        let generator = BoxGenerator::default();
        let request = BoxRequest::new(Dimensions::new(30.0, 4.0, 5.0));
        let err = generator.generate(&request, &NoTextOutliner).unwrap_err();
        assert!(err.is_fit_failure());
        match err {
            Error::Packing(e) => {
                assert_eq!(e.panel, PanelId::Front);
                assert_eq!(e.reason, PackingFailure::TooTall);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
