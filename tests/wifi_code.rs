use wifiqr::{
    config::Config,
    credential::{CredentialError, NetworkCredential, Security},
    export::{self, ExportFormat},
    payload::wifi_string,
    qr::{ErrorCorrection, WifiCode},
    query::QueryParams,
};

fn credential(security: Security, ssid: &str, password: &str, hidden: bool) -> NetworkCredential {
    NetworkCredential::new(security, ssid, Some(password.to_string()), hidden).unwrap()
}

#[test]
fn payload_follows_wifi_grammar() {
    let cases = [
        (Security::Wpa, "HomeNet", "secret1", false),
        (Security::Wep, "Office 2.4", "0123456789", true),
        (Security::Wpa, "ünïcødé", "pässwörd", false),
    ];

    for (security, ssid, password, hidden) in cases {
        let cred = credential(security, ssid, password, hidden);
        assert_eq!(
            wifi_string(&cred),
            format!("WIFI:T:{security};S:{ssid};P:{password};H:{hidden};;")
        );
    }
}

#[test]
fn reference_network() {
    let cred = credential(Security::Wpa, "HomeNet", "secret1", false);
    assert_eq!(wifi_string(&cred), "WIFI:T:WPA;S:HomeNet;P:secret1;H:false;;");
}

#[test]
fn url_path_rejects_empty_name() {
    let params = QueryParams::parse("https://example.org/?security=WPA&ssid=&password=x");
    assert!(!params.should_auto_render());
    assert_eq!(params.credential(), Err(CredentialError::EmptySsid));
}

#[test]
fn url_with_empty_password_shows_form() {
    let params = QueryParams::parse("https://example.org/?security=WPA&ssid=Home&password=");
    assert!(!params.should_auto_render());
}

#[test]
fn url_credential_round_trips_into_png() {
    let params = QueryParams::parse("security=WPA&ssid=Home%3BNet&password=p%3Aw&hidden=1");
    let cred = params.credential().unwrap();
    let code = WifiCode::new(&cred, ErrorCorrection::High).unwrap();

    assert_eq!(code.payload, r"WIFI:T:WPA;S:Home\;Net;P:p\:w;H:true;;");

    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.export.directory = dir.path().to_path_buf();
    config.qr.size = 300;

    let path = export::export(&code, &cred, ExportFormat::Png, None, &config).unwrap();
    assert_eq!(path.file_name().unwrap(), "Home_Net-wifi.png");

    let image = image::open(&path).unwrap();
    assert!(image.width() >= 300);
}
