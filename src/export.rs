use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use strum::Display;
use thiserror::Error;

use crate::{config::Config, credential::NetworkCredential, pdf::PdfDocument, qr::WifiCode};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown export format: {0} (expected png, svg or pdf)")]
pub struct UnknownFormat(pub String);

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(UnknownFormat(value.to_string())),
        }
    }
}

/// `<ssid>-wifi.<ext>` with anything but `[A-Za-z0-9_-]` replaced
pub fn file_name(ssid: &str, format: ExportFormat) -> String {
    let stem: String = ssid
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.chars().all(|c| c == '_') {
        format!("wifi.{}", format.extension())
    } else {
        format!("{}-wifi.{}", stem, format.extension())
    }
}

pub fn render(
    code: &WifiCode,
    credential: &NetworkCredential,
    format: ExportFormat,
    config: &Config,
) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Png => code.to_png(config.qr.size, config.qr.quiet_zone)?,
        ExportFormat::Svg => code
            .to_svg(config.qr.size, config.qr.quiet_zone)
            .into_bytes(),
        ExportFormat::Pdf => {
            let subtitle = credential
                .password
                .as_ref()
                .filter(|_| config.export.include_password)
                .map(|p| format!("Password: {p}"));
            PdfDocument {
                title: &credential.ssid,
                subtitle: subtitle.as_deref(),
                code,
            }
            .render()
        }
    };
    Ok(bytes)
}

/// Write the code to `target`, or to the configured export directory under
/// the default file name. Returns the written path.
pub fn export(
    code: &WifiCode,
    credential: &NetworkCredential,
    format: ExportFormat,
    target: Option<&Path>,
    config: &Config,
) -> Result<PathBuf> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => config
            .export
            .directory
            .join(file_name(&credential.ssid, format)),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let bytes = render(code, credential, format, config)?;
    fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Exported {} code to {}", format, path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{credential::Security, qr::ErrorCorrection};

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(file_name("HomeNet", ExportFormat::Png), "HomeNet-wifi.png");
        assert_eq!(
            file_name("My Net/5G", ExportFormat::Pdf),
            "My_Net_5G-wifi.pdf"
        );
        assert_eq!(file_name("..", ExportFormat::Svg), "wifi.svg");
    }

    #[test]
    fn formats_parse_from_names_and_paths() {
        assert_eq!("PDF".parse(), Ok(ExportFormat::Pdf));
        assert_eq!(
            "gif".parse::<ExportFormat>(),
            Err(UnknownFormat("gif".to_string()))
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("/tmp/code.svg")),
            Some(ExportFormat::Svg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("/tmp/code")), None);
        assert_eq!(ExportFormat::Png.to_string(), "png");
    }

    #[test]
    fn exports_into_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.directory = dir.path().join("nested");

        let cred =
            NetworkCredential::new(Security::Wpa, "HomeNet", Some("secret1".into()), false)
                .unwrap();
        let code = WifiCode::new(&cred, ErrorCorrection::Medium).unwrap();

        let path = export(&code, &cred, ExportFormat::Pdf, None, &config).unwrap();
        assert_eq!(path, dir.path().join("nested").join("HomeNet-wifi.pdf"));

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(String::from_utf8_lossy(&bytes).contains("(Password: secret1)"));
    }

    #[test]
    fn pdf_can_omit_password() {
        let mut config = Config::default();
        config.export.include_password = false;

        let cred =
            NetworkCredential::new(Security::Wpa, "HomeNet", Some("secret1".into()), false)
                .unwrap();
        let code = WifiCode::new(&cred, ErrorCorrection::Medium).unwrap();

        let bytes = render(&code, &cred, ExportFormat::Pdf, &config).unwrap();
        assert!(!String::from_utf8_lossy(&bytes).contains("secret1"));
    }
}
