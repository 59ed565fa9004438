//! Settings file parsing and validation

pub mod settings;

pub use settings::{
    ColorOption, DEFAULT_RULES_FILE, GuardMeta, OutputConfig, OutputFormat, SETTINGS_FILE,
    Settings,
};
