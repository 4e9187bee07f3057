use anyhow::{Context, Result};
use clap::ArgMatches;
use std::{io::Write, path::PathBuf};

use crate::{
    command::{Os, join_command},
    config::Config,
    export::{self, ExportFormat},
    query::QueryParams,
    qr::WifiCode,
};

#[derive(Debug, Default)]
pub struct Options {
    pub values: QueryParams,
    /// URL supplied every field needed to join the network
    pub auto_render: bool,
    pub output: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub print: bool,
    pub command: bool,
    pub payload: bool,
    pub config_path: Option<PathBuf>,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let from_url = matches
            .get_one::<String>("url")
            .map(|url| QueryParams::parse(url))
            .unwrap_or_default();
        let auto_render = from_url.should_auto_render();

        let from_flags = QueryParams {
            security: matches.get_one::<String>("security").cloned(),
            ssid: matches.get_one::<String>("ssid").cloned(),
            password: matches.get_one::<String>("password").cloned(),
            hidden: matches.get_flag("hidden"),
        };

        let format = matches
            .get_one::<String>("format")
            .map(|f| f.parse::<ExportFormat>())
            .transpose()?;

        Ok(Self {
            values: from_url.merge(from_flags),
            auto_render,
            output: matches.get_one::<PathBuf>("output").cloned(),
            format,
            print: matches.get_flag("print"),
            command: matches.get_flag("command"),
            payload: matches.get_flag("payload"),
            config_path: matches.get_one::<PathBuf>("config").cloned(),
        })
    }

    pub fn is_headless(&self) -> bool {
        self.output.is_some() || self.format.is_some() || self.print || self.command || self.payload
    }

    fn export_format(&self, config: &Config) -> ExportFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(ExportFormat::from_path))
            .unwrap_or(config.export.format)
    }
}

pub fn run(options: &Options, config: &Config, os: Os, out: &mut impl Write) -> Result<()> {
    let credential = options.values.credential()?;
    let code = WifiCode::new(&credential, config.qr.error_correction)?;

    if options.payload {
        writeln!(out, "{}", code.payload)?;
    }

    if options.print {
        writeln!(out, "{}", code.to_terminal(config.qr.quiet_zone))?;
    }

    if options.command {
        let command = join_command(&credential, os)
            .with_context(|| format!("No join command available on {}", os))?;
        writeln!(out, "{}", command)?;
    }

    if options.output.is_some() || options.format.is_some() {
        let format = options.export_format(config);
        let path = export::export(
            &code,
            &credential,
            format,
            options.output.as_deref(),
            config,
        )?;
        writeln!(out, "Saved {}", path.display())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::cli;

    fn options(args: &[&str]) -> Options {
        let mut argv = vec!["wifiqr"];
        argv.extend_from_slice(args);
        Options::from_matches(&cli().get_matches_from(argv)).unwrap()
    }

    fn run_to_string(options: &Options, config: &Config) -> Result<String> {
        let mut out = Vec::new();
        run(options, config, Os::Linux, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn flags_override_url() {
        let opts = options(&[
            "--url",
            "https://example.org/?security=WEP&ssid=Url&password=abcde",
            "--ssid",
            "Flag",
        ]);
        assert!(opts.auto_render);
        assert!(!opts.is_headless());
        assert_eq!(opts.values.ssid.as_deref(), Some("Flag"));
        assert_eq!(opts.values.security.as_deref(), Some("WEP"));
    }

    #[test]
    fn incomplete_url_does_not_auto_render() {
        let opts = options(&["--url", "ssid=Attic&security=WPA"]);
        assert!(!opts.auto_render);
    }

    #[test]
    fn prints_payload_and_command() {
        let opts = options(&["-s", "HomeNet", "-p", "secret1", "--payload", "--command"]);
        assert!(opts.is_headless());

        let output = run_to_string(&opts, &Config::default()).unwrap();
        assert_eq!(
            output,
            "WIFI:T:WPA;S:HomeNet;P:secret1;H:false;;\n\
             nmcli device wifi connect 'HomeNet' password 'secret1'\n"
        );
    }

    #[test]
    fn missing_ssid_fails_before_anything_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("code.png");
        let opts = options(&["-p", "secret1", "--payload", "-o", target.to_str().unwrap()]);

        let err = run_to_string(&opts, &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Network name can not be empty");
        assert!(!target.exists());
    }

    #[test]
    fn format_follows_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("code.svg");
        let opts = options(&["-s", "HomeNet", "-o", target.to_str().unwrap()]);

        run_to_string(&opts, &Config::default()).unwrap();
        let svg = std::fs::read_to_string(&target).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn format_alone_uses_export_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.directory = dir.path().to_path_buf();

        let opts = options(&["-s", "Home Net", "-t", "nopass", "--format", "pdf"]);
        let output = run_to_string(&opts, &config).unwrap();

        let expected = dir.path().join("Home_Net-wifi.pdf");
        assert!(expected.exists());
        assert_eq!(output, format!("Saved {}\n", expected.display()));
    }
}
