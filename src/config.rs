use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{export::ExportFormat, qr::ErrorCorrection};

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_esc_quit")]
    pub esc_quit: bool,

    #[serde(default)]
    pub qr: QrConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub keys: Keys,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QrConfig {
    /// Minimum edge of exported images, in pixels
    #[serde(default = "default_qr_size")]
    pub size: u32,

    #[serde(default)]
    pub error_correction: ErrorCorrection,

    #[serde(default = "default_true")]
    pub quiet_zone: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,

    #[serde(default)]
    pub format: ExportFormat,

    /// Print the passphrase under the code in PDF exports
    #[serde(default = "default_true")]
    pub include_password: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Keys {
    #[serde(default = "default_toggle_theme")]
    pub toggle_theme: char,

    #[serde(default = "default_toggle_password")]
    pub toggle_password: char,

    #[serde(default = "default_export_png")]
    pub export_png: char,

    #[serde(default = "default_export_svg")]
    pub export_svg: char,

    #[serde(default = "default_export_pdf")]
    pub export_pdf: char,

    #[serde(default = "default_copy_payload")]
    pub copy_payload: char,

    #[serde(default = "default_copy_command")]
    pub copy_command: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            esc_quit: default_esc_quit(),
            qr: QrConfig::default(),
            export: ExportConfig::default(),
            keys: Keys::default(),
        }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            size: default_qr_size(),
            error_correction: ErrorCorrection::default(),
            quiet_zone: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            format: ExportFormat::default(),
            include_password: true,
        }
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            toggle_theme: default_toggle_theme(),
            toggle_password: default_toggle_password(),
            export_png: default_export_png(),
            export_svg: default_export_svg(),
            export_pdf: default_export_pdf(),
            copy_payload: default_copy_payload(),
            copy_command: default_copy_command(),
        }
    }
}

fn default_esc_quit() -> bool {
    true
}

fn default_true() -> bool {
    true
}

fn default_qr_size() -> u32 {
    400
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_toggle_theme() -> char {
    't'
}

fn default_toggle_password() -> char {
    's'
}

fn default_export_png() -> char {
    'i'
}

fn default_export_svg() -> char {
    'v'
}

fn default_export_pdf() -> char {
    'p'
}

fn default_copy_payload() -> char {
    'y'
}

fn default_copy_command() -> char {
    'c'
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wifiqr").join("config.toml"))
    }

    /// Load the user configuration. A missing file is not an error.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}
