use std::str::FromStr;

use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Network name can not be empty")]
    EmptySsid,

    #[error("Unknown security type: {0}")]
    UnknownSecurity(String),
}

/// Authentication type as understood by QR scanners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Security {
    #[default]
    #[strum(to_string = "WPA")]
    Wpa,
    #[strum(to_string = "WEP")]
    Wep,
    #[strum(to_string = "nopass")]
    NoPass,
}

impl Security {
    pub fn requires_password(&self) -> bool {
        !matches!(self, Security::NoPass)
    }

    pub fn next(self) -> Self {
        let all: Vec<Security> = Security::iter().collect();
        let pos = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all: Vec<Security> = Security::iter().collect();
        let pos = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(pos + all.len() - 1) % all.len()]
    }
}

impl FromStr for Security {
    type Err = CredentialError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa3" | "sae" => Ok(Security::Wpa),
            "wep" => Ok(Security::Wep),
            "nopass" | "open" | "none" => Ok(Security::NoPass),
            _ => Err(CredentialError::UnknownSecurity(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkCredential {
    pub security: Security,
    pub ssid: String,
    pub password: Option<String>,
    pub hidden: bool,
}

impl NetworkCredential {
    /// Build a credential, refusing an empty network name.
    ///
    /// An empty password is stored as `None`. For `nopass` networks any
    /// password is dropped.
    pub fn new(
        security: Security,
        ssid: impl Into<String>,
        password: Option<String>,
        hidden: bool,
    ) -> Result<Self, CredentialError> {
        let ssid = ssid.into();
        if ssid.trim().is_empty() {
            return Err(CredentialError::EmptySsid);
        }

        let password = match security {
            Security::NoPass => None,
            _ => password.filter(|p| !p.is_empty()),
        };

        Ok(Self {
            security,
            ssid,
            password,
            hidden,
        })
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}
