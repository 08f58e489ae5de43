//! # Pencilbox
//!
//! Generates laser-cut pencil boxes: six finger-jointed panels with
//! T-slot fasteners, optional divider slots and wall engravings, packed
//! onto sheets and written as a layered SVG drawing.
//!
//! ## Architecture
//!
//! Pencilbox is organized as a workspace with multiple crates:
//!
//! 1. **pencilbox-core** - Geometry primitives, panel identifiers, units, errors
//! 2. **pencilbox-settings** - Configuration sections, file formats, validation
//! 3. **pencilbox-camtools** - Joints, panel builder, engraving, packing, SVG
//! 4. **pencilbox** - Command-line binary that integrates all crates

pub mod cli;

pub use pencilbox_camtools::{
    BoxGenerator, BoxRequest, Decoration, Dimensions, GeneratedBox, PlacementRecord,
};
pub use pencilbox_core::{Error, GeometryError, PackingError, PanelId, Result};
pub use pencilbox_settings::Config;

pub use cli::LogFormat;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for other tools
/// - RUST_LOG environment variable support (INFO by default)
/// - Human-readable or JSON lines
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init()?,
    }

    Ok(())
}
