//! Pencilbox Settings Crate
//!
//! Holds every tunable of the generator (material, joints, hardware, sheet,
//! engraving and output style) and handles loading, saving and validating it.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AssemblySettings, Config, EngravingSettings, HardwareSettings,
    JointSettings, LidStyle, MaterialSettings, OutputSettings, SheetSettings,
};
pub use error::{Result, SettingsError};
