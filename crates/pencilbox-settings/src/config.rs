//! Configuration management
//!
//! Every constant used by the generator lives here and is threaded through
//! the pipeline explicitly. Sections default individually, so a config file
//! only needs to mention the values it changes.

use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sheet material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Material thickness in mm
    pub thickness_mm: f64,
    /// Width of material removed by the beam in mm
    pub kerf_mm: f64,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            thickness_mm: 3.0,
            kerf_mm: 0.1,
        }
    }
}

/// Finger joint sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointSettings {
    /// Preferred tooth width as a multiple of the thickness
    pub finger_multiple: f64,
    /// Narrowest acceptable tooth in mm
    pub min_tooth_width_mm: f64,
    /// Tooth widths are rounded down to this grid in mm
    pub tooth_grid_mm: f64,
}

impl Default for JointSettings {
    fn default() -> Self {
        Self {
            finger_multiple: 2.0,
            min_tooth_width_mm: 3.0,
            tooth_grid_mm: 0.01,
        }
    }
}

/// Screw and captive-nut hardware (T-slots and matching holes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareSettings {
    pub shaft_width_mm: f64,
    /// Shaft length measured inward from the notch floor
    pub shaft_length_mm: f64,
    pub nut_width_mm: f64,
    pub nut_depth_mm: f64,
    /// Distance from the notch floor to the near side of the nut pocket
    pub nut_offset_mm: f64,
    pub hole_diameter_mm: f64,
    /// Vertices used to approximate a screw hole
    pub hole_segments: usize,
    /// Minimum material between a divider slot and a T-slot
    pub divider_clearance_mm: f64,
}

impl Default for HardwareSettings {
    fn default() -> Self {
        Self {
            shaft_width_mm: 2.2,
            shaft_length_mm: 6.5,
            nut_width_mm: 4.7,
            nut_depth_mm: 1.5,
            nut_offset_mm: 2.5,
            hole_diameter_mm: 2.2,
            hole_segments: 24,
            divider_clearance_mm: 1.0,
        }
    }
}

/// Stock sheet and packing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// Sheet width in mm (18 in)
    pub width_mm: f64,
    /// Sheet height in mm (12 in)
    pub height_mm: f64,
    /// Gap kept after every panel in mm
    pub gap_mm: f64,
    /// Number of sheets the packer may open
    pub max_sheets: usize,
    /// Vertical space between stacked sheets in the drawing, in mm
    pub sheet_spacing_mm: f64,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            width_mm: 457.2,
            height_mm: 304.8,
            gap_mm: 2.0,
            max_sheets: 1,
            sheet_spacing_mm: 10.0,
        }
    }
}

/// Text and fractal engraving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngravingSettings {
    /// Clear border between the engraving and any cut, in mm
    pub margin_mm: f64,
    /// Fraction of the engraving zone width text may use
    pub text_width_fraction: f64,
    /// Fraction of the engraving zone height text may use
    pub text_height_fraction: f64,
    /// Font family looked up in the system font database
    pub font_family: String,
    /// Maximum deviation when flattening glyph curves, in font units
    pub curve_tolerance: f64,
    /// Smallest leaf triangle side of the fractal, in mm
    pub min_fractal_edge_mm: f64,
    pub max_fractal_depth: u32,
}

impl Default for EngravingSettings {
    fn default() -> Self {
        Self {
            margin_mm: 6.0,
            text_width_fraction: 0.75,
            text_height_fraction: 0.5,
            font_family: "Sans".to_string(),
            curve_tolerance: 0.5,
            min_fractal_edge_mm: 2.0,
            max_fractal_depth: 6,
        }
    }
}

/// SVG styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Stroke for through cuts
    pub cut_color: String,
    /// Stroke for surface engravings
    pub engrave_color: String,
    /// Hairline stroke width in mm
    pub stroke_width_mm: f64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            cut_color: "#ff0000".to_string(),
            engrave_color: "#0000ff".to_string(),
            stroke_width_mm: 0.1,
        }
    }
}

/// How the lid attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LidStyle {
    /// Finger-jointed to the top edges of the walls
    #[default]
    Jointed,
    /// Plain rectangle resting on plain wall tops
    Loose,
}

impl std::fmt::Display for LidStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LidStyle::Jointed => write!(f, "jointed"),
            LidStyle::Loose => write!(f, "loose"),
        }
    }
}

/// Box assembly options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblySettings {
    pub lid: LidStyle,
}

/// Complete generator configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub material: MaterialSettings,
    pub joints: JointSettings,
    pub hardware: HardwareSettings,
    pub sheet: SheetSettings,
    pub engraving: EngravingSettings,
    pub output: OutputSettings,
    pub assembly: AssemblySettings,
}

/// Default config location: `<config_dir>/pencilbox/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("pencilbox").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(format!(
            "{} (config file must be .json or .toml)",
            path.display()
        ))),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Load an explicit file, else the default location if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load_from_file(&default_path),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::warn!("{}; using built-in defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let m = &self.material;
        positive("material.thickness_mm", m.thickness_mm)?;
        if m.thickness_mm > 50.0 {
            return Err(SettingsError::invalid(
                "material.thickness_mm",
                "must not exceed 50mm",
            ));
        }
        non_negative("material.kerf_mm", m.kerf_mm)?;
        if m.kerf_mm >= m.thickness_mm {
            return Err(SettingsError::invalid(
                "material.kerf_mm",
                "must be smaller than the material thickness",
            ));
        }

        let j = &self.joints;
        positive("joints.finger_multiple", j.finger_multiple)?;
        positive("joints.min_tooth_width_mm", j.min_tooth_width_mm)?;
        positive("joints.tooth_grid_mm", j.tooth_grid_mm)?;
        if j.min_tooth_width_mm <= m.kerf_mm {
            return Err(SettingsError::invalid(
                "joints.min_tooth_width_mm",
                "must be wider than the kerf",
            ));
        }

        let h = &self.hardware;
        positive("hardware.shaft_width_mm", h.shaft_width_mm)?;
        positive("hardware.shaft_length_mm", h.shaft_length_mm)?;
        positive("hardware.nut_width_mm", h.nut_width_mm)?;
        positive("hardware.nut_depth_mm", h.nut_depth_mm)?;
        non_negative("hardware.nut_offset_mm", h.nut_offset_mm)?;
        positive("hardware.hole_diameter_mm", h.hole_diameter_mm)?;
        non_negative("hardware.divider_clearance_mm", h.divider_clearance_mm)?;
        if h.nut_offset_mm + h.nut_depth_mm > h.shaft_length_mm {
            return Err(SettingsError::invalid(
                "hardware.nut_offset_mm",
                "nut pocket must lie within the shaft",
            ));
        }
        for (key, value) in [
            ("hardware.shaft_width_mm", h.shaft_width_mm),
            ("hardware.nut_width_mm", h.nut_width_mm),
            ("hardware.nut_depth_mm", h.nut_depth_mm),
            ("hardware.hole_diameter_mm", h.hole_diameter_mm),
        ] {
            if value <= m.kerf_mm {
                return Err(SettingsError::invalid(key, "must be larger than the kerf"));
            }
        }
        if h.hole_segments < 8 {
            return Err(SettingsError::invalid(
                "hardware.hole_segments",
                "at least 8 segments are required",
            ));
        }

        let s = &self.sheet;
        positive("sheet.width_mm", s.width_mm)?;
        positive("sheet.height_mm", s.height_mm)?;
        non_negative("sheet.gap_mm", s.gap_mm)?;
        non_negative("sheet.sheet_spacing_mm", s.sheet_spacing_mm)?;
        if s.max_sheets == 0 {
            return Err(SettingsError::invalid(
                "sheet.max_sheets",
                "at least one sheet is required",
            ));
        }

        let e = &self.engraving;
        non_negative("engraving.margin_mm", e.margin_mm)?;
        fraction("engraving.text_width_fraction", e.text_width_fraction)?;
        fraction("engraving.text_height_fraction", e.text_height_fraction)?;
        positive("engraving.curve_tolerance", e.curve_tolerance)?;
        positive("engraving.min_fractal_edge_mm", e.min_fractal_edge_mm)?;
        if e.max_fractal_depth > 10 {
            return Err(SettingsError::invalid(
                "engraving.max_fractal_depth",
                "must be 10 or less",
            ));
        }
        if e.font_family.trim().is_empty() {
            return Err(SettingsError::invalid(
                "engraving.font_family",
                "must not be empty",
            ));
        }

        positive("output.stroke_width_mm", self.output.stroke_width_mm)?;

        Ok(())
    }
}

fn positive(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
    }
}

fn non_negative(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be >= 0, got {}", value)))
    }
}

fn fraction(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("must be in (0, 1], got {}", value),
        ))
    }
}
