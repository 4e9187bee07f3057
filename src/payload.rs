use log::debug;

use crate::credential::NetworkCredential;

const RESERVED: [char; 5] = ['\\', ';', ',', '"', ':'];

/// Backslash-escape the characters reserved by the WIFI: grammar
pub fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Serialize a credential as `WIFI:T:<security>;S:<ssid>;P:<password>;H:<hidden>;;`
pub fn wifi_string(credential: &NetworkCredential) -> String {
    let message = format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        credential.security,
        escape_field(&credential.ssid),
        escape_field(credential.password()),
        credential.hidden
    );

    debug!(
        "Built WIFI payload for {} ({}, hidden: {})",
        credential.ssid, credential.security, credential.hidden
    );

    message
}
