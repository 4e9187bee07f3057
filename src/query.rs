use url::{Url, form_urlencoded};

use crate::credential::{CredentialError, NetworkCredential, Security};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub security: Option<String>,
    pub ssid: Option<String>,
    pub password: Option<String>,
    pub hidden: bool,
}

impl QueryParams {
    /// Accepts a full URL or a bare query string, with or without the leading `?`
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        match Url::parse(input) {
            Ok(url) => Self::from_pairs(url.query_pairs()),
            Err(_) => {
                let query = input.strip_prefix('?').unwrap_or(input);
                Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
            }
        }
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "security" => params.security = Some(value.into_owned()),
                "ssid" => params.ssid = Some(value.into_owned()),
                "password" => params.password = Some(value.into_owned()),
                "hidden" => {
                    params.hidden = value.eq_ignore_ascii_case("true") || value == "1";
                }
                _ => {}
            }
        }
        params
    }

    /// Values from `other` take precedence over those already set. Empty
    /// values count as not supplied.
    pub fn merge(self, other: QueryParams) -> Self {
        Self {
            security: supplied(other.security).or(self.security),
            ssid: supplied(other.ssid).or(self.ssid),
            password: supplied(other.password).or(self.password),
            hidden: self.hidden || other.hidden,
        }
    }

    /// The code is rendered straight away only when every field needed to
    /// join the network was supplied with a value.
    pub fn should_auto_render(&self) -> bool {
        [&self.security, &self.ssid, &self.password]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// An empty security value means none was chosen
    pub fn security(&self) -> Result<Option<Security>, CredentialError> {
        self.security
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .transpose()
    }

    pub fn credential(&self) -> Result<NetworkCredential, CredentialError> {
        let security = self.security()?.unwrap_or_default();
        NetworkCredential::new(
            security,
            self.ssid.clone().unwrap_or_default(),
            self.password.clone(),
            self.hidden,
        )
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_url() {
        let params = QueryParams::parse(
            "https://example.org/wifi/?security=WPA&ssid=Home%20Net&password=s%3Bcret&hidden=true",
        );
        assert_eq!(params.security.as_deref(), Some("WPA"));
        assert_eq!(params.ssid.as_deref(), Some("Home Net"));
        assert_eq!(params.password.as_deref(), Some("s;cret"));
        assert!(params.hidden);
        assert!(params.should_auto_render());
    }

    #[test]
    fn parses_bare_query() {
        let params = QueryParams::parse("?ssid=Attic&hidden=false&utm_source=x");
        assert_eq!(params.ssid.as_deref(), Some("Attic"));
        assert!(!params.hidden);
        assert!(!params.should_auto_render());

        let params = QueryParams::parse("ssid=Cafe+Guest&security=nopass");
        assert_eq!(params.ssid.as_deref(), Some("Cafe Guest"));
        assert_eq!(params.security(), Ok(Some(Security::NoPass)));
    }

    #[test]
    fn credential_requires_ssid() {
        let params = QueryParams::parse("security=WPA&password=x");
        assert_eq!(params.credential(), Err(CredentialError::EmptySsid));
    }

    #[test]
    fn merge_prefers_later_values() {
        let url = QueryParams::parse("security=WEP&ssid=FromUrl&password=abc");
        let flags = QueryParams {
            ssid: Some("FromFlag".into()),
            hidden: true,
            ..Default::default()
        };
        let merged = url.merge(flags);
        assert_eq!(merged.security.as_deref(), Some("WEP"));
        assert_eq!(merged.ssid.as_deref(), Some("FromFlag"));
        assert_eq!(merged.password.as_deref(), Some("abc"));
        assert!(merged.hidden);
    }

    #[test]
    fn empty_values_do_not_auto_render() {
        let params = QueryParams::parse("security=WPA&ssid=Home&password=");
        assert!(!params.should_auto_render());

        let params = QueryParams::parse("security=WPA&ssid=&password=secret1");
        assert!(!params.should_auto_render());
    }

    #[test]
    fn empty_security_keeps_password() {
        let params = QueryParams::parse("security=&ssid=Home&password=secret1");
        assert!(!params.should_auto_render());
        assert_eq!(params.security(), Ok(None));

        let cred = params.credential().unwrap();
        assert_eq!(cred.security, Security::Wpa);
        assert_eq!(cred.password(), "secret1");
    }

    #[test]
    fn empty_flags_do_not_override_url() {
        let url = QueryParams::parse("security=WEP&ssid=Attic&password=abcde");
        let flags = QueryParams {
            security: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(url.clone().merge(flags), url);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(QueryParams::parse(""), QueryParams::default());
        assert_eq!(
            QueryParams::parse("https://example.org/"),
            QueryParams::default()
        );
    }
}
