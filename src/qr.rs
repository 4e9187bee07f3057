use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{
    EcLevel, QrCode,
    render::{svg, unicode},
};
use serde::Deserialize;
use std::io::Cursor;

use crate::{credential::NetworkCredential, payload::wifi_string};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    #[serde(rename = "L", alias = "l")]
    Low,
    #[default]
    #[serde(rename = "M", alias = "m")]
    Medium,
    #[serde(rename = "Q", alias = "q")]
    Quartile,
    #[serde(rename = "H", alias = "h")]
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(value: ErrorCorrection) -> Self {
        match value {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// A rendered join code together with the payload it encodes
#[derive(Clone)]
pub struct WifiCode {
    pub payload: String,
    pub code: QrCode,
    modules: Vec<bool>,
}

impl WifiCode {
    pub fn new(credential: &NetworkCredential, level: ErrorCorrection) -> Result<Self> {
        Self::from_payload(wifi_string(credential), level)
    }

    pub fn from_payload(payload: String, level: ErrorCorrection) -> Result<Self> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())
            .context("Failed to generate QR code")?;
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Ok(Self {
            payload,
            code,
            modules,
        })
    }

    /// Number of modules per side, without quiet zone
    pub fn width(&self) -> usize {
        self.code.width()
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        let width = self.width();
        x < width && y < width && self.modules[y * width + x]
    }

    pub fn to_png(&self, size: u32, quiet_zone: bool) -> Result<Vec<u8>> {
        let image = self
            .code
            .render::<Luma<u8>>()
            .min_dimensions(size, size)
            .quiet_zone(quiet_zone)
            .build();

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .context("Failed to encode PNG")?;

        Ok(bytes)
    }

    pub fn to_svg(&self, size: u32, quiet_zone: bool) -> String {
        self.code
            .render()
            .min_dimensions(size, size)
            .quiet_zone(quiet_zone)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }

    /// Half-block rendering for a dark terminal background
    pub fn to_terminal(&self, quiet_zone: bool) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(quiet_zone)
            .build()
    }
}
