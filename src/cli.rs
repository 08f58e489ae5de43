//! Command-line front end.
//!
//! Turns flags (or a job file plus flags) into a [`BoxRequest`] and a
//! [`Config`], runs the generator and writes the drawing. Files are only
//! written once the whole pipeline has succeeded.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pencilbox_camtools::{
    BoxGenerator, BoxRequest, Decoration, Dimensions, FontOutliner, GeneratedBox,
    NoTextOutliner, TextOutliner,
};
use pencilbox_core::units::{format_length, get_unit_label, parse_length};
use pencilbox_core::{mm_to_inches, MeasurementSystem, PanelId};
use pencilbox_settings::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exit code when the box does not fit on the allowed sheets.
pub const EXIT_DOES_NOT_FIT: i32 = 2;
/// Exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Units {
    #[default]
    Inches,
    Mm,
}

impl Units {
    fn system(self) -> MeasurementSystem {
        match self {
            Units::Inches => MeasurementSystem::Imperial,
            Units::Mm => MeasurementSystem::Metric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pencilbox",
    about = "Generate a laser-cut, finger-jointed pencil box as a layered SVG",
    version
)]
pub struct Cli {
    /// Outside length (left to right along the front wall)
    #[arg(long, required_unless_present = "job")]
    pub length: Option<String>,

    /// Outside width (front to back)
    #[arg(long, required_unless_present = "job")]
    pub width: Option<String>,

    /// Outside height (bottom to top)
    #[arg(long, required_unless_present = "job")]
    pub height: Option<String>,

    /// Units for --length, --width and --height; fractions like "5 1/2" work in inches
    #[arg(long, value_enum, default_value_t = Units::Inches)]
    pub units: Units,

    /// Number of dividers (0, 1 or 2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub dividers: Option<u8>,

    #[arg(long = "front-text", conflicts_with = "front_fractal")]
    pub front_text: Option<String>,
    #[arg(long = "back-text", conflicts_with = "back_fractal")]
    pub back_text: Option<String>,
    #[arg(long = "left-text", conflicts_with = "left_fractal")]
    pub left_text: Option<String>,
    #[arg(long = "right-text", conflicts_with = "right_fractal")]
    pub right_text: Option<String>,

    #[arg(long = "front-fractal")]
    pub front_fractal: bool,
    #[arg(long = "back-fractal")]
    pub back_fractal: bool,
    #[arg(long = "left-fractal")]
    pub left_fractal: bool,
    #[arg(long = "right-fractal")]
    pub right_fractal: bool,

    /// Box request as a JSON or TOML file; flags given alongside override it
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Configuration file (defaults to the user config if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Material thickness in mm
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Laser kerf in mm
    #[arg(long)]
    pub kerf: Option<f64>,

    /// Output SVG file
    #[arg(long, default_value = "pencil_holder.svg")]
    pub output: PathBuf,

    /// Write a JSON report of panel placements
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Save the effective configuration to this file
    #[arg(long = "save-config")]
    pub save_config: Option<PathBuf>,

    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Load a [`BoxRequest`] from a `.json` or `.toml` job file.
pub fn load_job(path: &Path) -> Result<BoxRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let request = match extension {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON job file {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML job file {}", path.display()))?,
        other => bail!("Unsupported job file format: '{}'", other),
    };
    Ok(request)
}

impl Cli {
    fn parse_dimension(&self, name: &str, value: &str) -> Result<f64> {
        let mm = parse_length(value, self.units.system())
            .map_err(|e| anyhow::anyhow!("Invalid --{} '{}': {}", name, value, e))?;
        Ok(mm_to_inches(mm))
    }

    /// Combine the job file (if any) with command-line flags.
    pub fn request(&self) -> Result<BoxRequest> {
        let mut request = match &self.job {
            Some(path) => load_job(path)?,
            None => BoxRequest::new(Dimensions::new(0.0, 0.0, 0.0)),
        };

        if let Some(value) = &self.length {
            request.dimensions.length = self.parse_dimension("length", value)?;
        }
        if let Some(value) = &self.width {
            request.dimensions.width = self.parse_dimension("width", value)?;
        }
        if let Some(value) = &self.height {
            request.dimensions.height = self.parse_dimension("height", value)?;
        }
        if let Some(dividers) = self.dividers {
            request.dividers = dividers;
        }

        let walls = [
            (PanelId::Front, &self.front_text, self.front_fractal),
            (PanelId::Back, &self.back_text, self.back_fractal),
            (PanelId::Left, &self.left_text, self.left_fractal),
            (PanelId::Right, &self.right_text, self.right_fractal),
        ];
        for (wall, text, fractal) in walls {
            let decoration = match (text, fractal) {
                (Some(_), true) => bail!("{} wall cannot have both text and a fractal", wall),
                (Some(text), false) => Decoration::Text(text.clone()),
                (None, true) => Decoration::Fractal,
                (None, false) => continue,
            };
            request.decorations.set(wall, decoration);
        }

        Ok(request)
    }

    /// Load the configuration and apply command-line overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(thickness) = self.thickness {
            config.material.thickness_mm = thickness;
        }
        if let Some(kerf) = self.kerf {
            config.material.kerf_mm = kerf;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn has_text(request: &BoxRequest) -> bool {
    PanelId::WALLS
        .iter()
        .any(|&wall| matches!(request.decorations.get(wall), Decoration::Text(_)))
}

/// Run one generation and write the requested files.
pub fn run(cli: &Cli) -> Result<GeneratedBox> {
    let config = cli.config()?;
    let request = cli.request()?;

    if let Some(path) = &cli.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save configuration to {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    let font;
    let outliner: &dyn TextOutliner = if has_text(&request) {
        let engraving = &config.engraving;
        font = FontOutliner::from_system(&engraving.font_family, engraving.curve_tolerance)
            .context("Text engraving needs a usable system font")?;
        &font
    } else {
        &NoTextOutliner
    };

    let generated = BoxGenerator::new(config).generate(&request, outliner)?;

    fs::write(&cli.output, &generated.svg)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    if let Some(path) = &cli.layout {
        let report = serde_json::to_string_pretty(&generated.placements)?;
        fs::write(path, report).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let system = cli.units.system();
    let unit = get_unit_label(system);
    let d = &request.dimensions;
    info!(
        "Wrote {}: {} x {} x {} {} box, {} panels on {} sheet(s)",
        cli.output.display(),
        format_length(d.length_mm(), system),
        format_length(d.width_mm(), system),
        format_length(d.height_mm(), system),
        unit,
        generated.panels.len(),
        generated.sheet_count
    );
    Ok(generated)
}

/// Process exit code for a failed run.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<pencilbox_core::Error>() {
        Some(e) if e.is_fit_failure() => EXIT_DOES_NOT_FIT,
        _ => EXIT_FAILURE,
    }
}
