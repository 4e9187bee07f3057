use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tui_qrcode::Colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,
    pub accent: Color,
    pub field: Color,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    #[serde(default)]
    theme: Theme,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Reset,
                dim: Color::Gray,
                accent: Color::Green,
                field: Color::DarkGray,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                dim: Color::DarkGray,
                accent: Color::Blue,
                field: Color::Gray,
            },
        }
    }

    pub fn qr_colors(&self) -> Colors {
        match self {
            Theme::Dark => Colors::Inverted,
            Theme::Light => Colors::Normal,
        }
    }

    pub fn state_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("wifiqr").join("state.toml"))
    }

    /// Read the saved theme, falling back to the default on any problem
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Theme::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<State>(&content) {
                Ok(state) => state.theme,
                Err(e) => {
                    log::warn!("Ignoring invalid state file {}: {}", path.display(), e);
                    Theme::default()
                }
            },
            Err(_) => Theme::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string(&State { theme: *self })?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
