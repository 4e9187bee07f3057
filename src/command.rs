use std::fmt;

use crate::credential::{NetworkCredential, Security};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Os {
    pub fn detect() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            _ => Os::Other,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "Linux"),
            Os::MacOs => write!(f, "macOS"),
            Os::Windows => write!(f, "Windows"),
            Os::Other => write!(f, "unknown"),
        }
    }
}

/// Shell command that joins the same network from this machine. Only ever
/// displayed or copied.
pub fn join_command(credential: &NetworkCredential, os: Os) -> Option<String> {
    match os {
        Os::Linux => {
            let mut command = format!(
                "nmcli device wifi connect {}",
                shell_quote(&credential.ssid)
            );
            if credential.security != Security::NoPass {
                command.push_str(" password ");
                command.push_str(&shell_quote(credential.password()));
            }
            if credential.hidden {
                command.push_str(" hidden yes");
            }
            Some(command)
        }
        Os::MacOs => {
            let mut command = format!(
                "networksetup -setairportnetwork en0 {}",
                shell_quote(&credential.ssid)
            );
            if credential.security != Security::NoPass {
                command.push(' ');
                command.push_str(&shell_quote(credential.password()));
            }
            Some(command)
        }
        Os::Windows => Some(format!(
            "netsh wlan connect name=\"{}\"",
            credential.ssid.replace('"', "")
        )),
        Os::Other => None,
    }
}

/// POSIX single-quote quoting
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
