use clap::{Command, arg, crate_version, value_parser};
use std::path::PathBuf;

pub fn cli() -> Command {
    Command::new("wifiqr")
        .about("Generate QR codes that join a WiFi network")
        .version(crate_version!())
        .arg(
            arg!(--security <security>)
                .short('t')
                .required(false)
                .help("Security type: WPA, WEP or nopass"),
        )
        .arg(
            arg!(--ssid <ssid>)
                .short('s')
                .required(false)
                .help("Network name"),
        )
        .arg(
            arg!(--password <password>)
                .short('p')
                .required(false)
                .help("Network passphrase"),
        )
        .arg(arg!(--hidden).help("The network does not broadcast its name"))
        .arg(
            arg!(--url <url>)
                .short('u')
                .required(false)
                .help("URL or query string carrying security, ssid, password and hidden"),
        )
        .arg(
            arg!(--output <file>)
                .short('o')
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Write the code to this file and exit"),
        )
        .arg(
            arg!(--format <format>)
                .short('f')
                .required(false)
                .value_parser(["png", "svg", "pdf"])
                .help("Export format, guessed from --output when omitted"),
        )
        .arg(arg!(--print).help("Print the code to the terminal and exit"))
        .arg(arg!(--command).help("Print a shell command that joins the network and exit"))
        .arg(arg!(--payload).help("Print the WIFI: string and exit"))
        .arg(
            arg!(--config <file>)
                .short('c')
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file"),
        )
}
