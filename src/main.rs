// Network Preferences - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Network Preferences
//!
//! The IP settings panel of a network preferences application, driven from
//! the command line.
//!
//! This is the main entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

mod application;
mod dbus_client;
mod models;
mod network_utils;
mod parser;
mod services;
mod storage;
mod ui;
mod writer;

use application::CliOptions;
use models::InterfaceMode;
use ui::FieldId;

/// Human-readable application name.
pub const APP_NAME: &str = "Network Preferences";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
}

/// Print help information and exit.
fn print_help() {
    println!("Usage: {} [OPTIONS] <interface>", env::args().next().unwrap_or_else(|| "netprefs".to_string()));
    println!();
    println!("View and edit the IPv4 settings of a network interface.");
    println!();
    println!("Options:");
    println!("  -h, --help                Show this help message and exit");
    println!("  -v, --version             Show version information and exit");
    println!("  -d, --debug               Enable debug logging");
    println!("  -l, --list                List network interfaces and exit");
    println!("      --show                Print the current settings as JSON");
    println!("      --config <path>       Use this configuration file");
    println!("      --settings-dir <path> Use this common settings directory");
    println!("      --mode <mode>         static, dhcp or disabled");
    println!("      --ip <address>        IP address");
    println!("      --netmask <address>   Netmask");
    println!("      --gateway <address>   Gateway");
    println!("      --dns1 <address>      Primary DNS server");
    println!("      --dns2 <address>      Secondary DNS server");
    println!("      --domain <name>       DNS search domain");
    println!("      --network <ssid>      Wireless network (\"\" for none)");
    println!("      --apply               Validate and save the settings");
    println!("      --revert              Discard the edits given");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG                  Set log level (trace, debug, info, warn, error)");
    println!("  NETPREFS_SETTINGS_DIR     Override the common settings directory");
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Run(CliOptions),
}

fn field_for_option(option: &str) -> Option<FieldId> {
    match option {
        "--ip" => Some(FieldId::Ip),
        "--netmask" => Some(FieldId::Netmask),
        "--gateway" => Some(FieldId::Gateway),
        "--dns1" => Some(FieldId::PrimaryDns),
        "--dns2" => Some(FieldId::SecondaryDns),
        "--domain" => Some(FieldId::Domain),
        _ => None,
    }
}

/// Parse command-line arguments (without the program name).
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| -> Result<String, String> {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Option '{}' requires a value", name))
        };

        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-d" | "--debug" => options.debug = true,
            "-l" | "--list" => options.list = true,
            "--show" => options.show = true,
            "--apply" => options.apply = true,
            "--revert" => options.revert = true,
            "--config" => options.config_path = Some(PathBuf::from(value(arg.as_str())?)),
            "--settings-dir" => options.settings_dir = Some(PathBuf::from(value(arg.as_str())?)),
            "--mode" => {
                let mode = value(arg.as_str())?;
                options.mode = Some(
                    InterfaceMode::from_name(&mode)
                        .ok_or_else(|| format!("Unknown mode: {}", mode))?,
                );
            }
            "--network" => {
                let network = value(arg.as_str())?;
                options.network = Some(if network.is_empty() { None } else { Some(network) });
            }
            option if field_for_option(option).is_some() => {
                if let Some(field) = field_for_option(option) {
                    let text = value(option)?;
                    options.edits.push((field, text));
                }
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            interface => {
                if options.interface.is_some() {
                    return Err(format!("Unexpected argument: {}", interface));
                }
                options.interface = Some(interface.to_string());
            }
        }
    }

    Ok(Command::Run(options))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            print_version();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(options)) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Try '--help' for more information.");
            return ExitCode::from(application::EXIT_USAGE);
        }
    };

    let config = match application::load_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(application::EXIT_FAILURE);
        }
    };

    // Initialize logging with appropriate level
    let log_level = if options.debug {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let directive: tracing_subscriber::filter::Directive = log_level
        .parse()
        .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        )
        .init();

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    application::run(&options, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_edits() {
        let command = parse_args(&args(&[
            "eth0", "--mode", "static", "--ip", "10.0.0.2", "--dns2", "1.1.1.1", "--apply",
        ]))
        .unwrap();

        let Command::Run(options) = command else {
            panic!("expected run command");
        };
        assert_eq!(options.interface.as_deref(), Some("eth0"));
        assert_eq!(options.mode, Some(InterfaceMode::Static));
        assert_eq!(
            options.edits,
            vec![
                (FieldId::Ip, "10.0.0.2".to_string()),
                (FieldId::SecondaryDns, "1.1.1.1".to_string()),
            ]
        );
        assert!(options.apply);
    }

    #[test]
    fn test_parse_network_clear() {
        let Ok(Command::Run(options)) = parse_args(&args(&["wlan0", "--network", ""])) else {
            panic!("expected run command");
        };
        assert_eq!(options.network, Some(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--ip"])).is_err());
        assert!(parse_args(&args(&["--mode", "bridge", "eth0"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
        assert!(parse_args(&args(&["eth0", "eth1"])).is_err());
        assert_eq!(parse_args(&args(&["-v"])), Ok(Command::Version));
    }
}
