// Network Preferences - Application
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Command-line front end wiring the IP settings panel together.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dbus_client::NetworkManagerClient;
use crate::models::{AppConfig, InterfaceMode, Result, ServiceBackend};
use crate::network_utils;
use crate::services::{NetworkService, NmcliService};
use crate::storage::{FixedSettingsDirectory, SettingsDirectory, SettingsStore, SystemSettingsDirectory};
use crate::ui::{Action, FieldId, IpSettingsPanel, MemoryForm, Outcome};
use crate::writer::{ConfigurationWriter, InterfaceWrite};

/// Exit code on success.
pub const EXIT_OK: u8 = 0;

/// Exit code when a field failed validation.
pub const EXIT_INVALID: u8 = 1;

/// Exit code when settings were saved but a step reported an error.
pub const EXIT_WARNINGS: u8 = 2;

/// Exit code when the panel could not be set up.
pub const EXIT_FAILURE: u8 = 3;

/// Exit code for usage errors.
pub const EXIT_USAGE: u8 = 64;

/// Options collected from the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub interface: Option<String>,
    pub config_path: Option<PathBuf>,
    pub settings_dir: Option<PathBuf>,
    pub debug: bool,
    pub list: bool,
    pub show: bool,
    pub apply: bool,
    pub revert: bool,
    pub mode: Option<InterfaceMode>,
    pub edits: Vec<(FieldId, String)>,
    /// `Some(None)` clears the wireless network.
    pub network: Option<Option<String>>,
}

impl CliOptions {
    fn has_edits(&self) -> bool {
        self.mode.is_some() || self.network.is_some() || !self.edits.is_empty()
    }
}

/// Load the application configuration named by the options.
pub fn load_config(options: &CliOptions) -> Result<AppConfig> {
    let path = options.config_path.clone().or_else(AppConfig::default_path);
    AppConfig::load_or_default(path.as_deref())
}

/// Build the auto-configuration backend selected in the config.
pub fn network_service(backend: ServiceBackend) -> Arc<dyn NetworkService> {
    match backend {
        ServiceBackend::Dbus => Arc::new(NetworkManagerClient::new()),
        ServiceBackend::Nmcli => Arc::new(NmcliService::new()),
    }
}

/// Run the front end.
pub fn run(options: &CliOptions, config: &AppConfig) -> ExitCode {
    ExitCode::from(run_status(options, config))
}

fn run_status(options: &CliOptions, config: &AppConfig) -> u8 {
    if options.list {
        list_interfaces();
        return EXIT_OK;
    }

    let Some(interface) = options.interface.as_deref() else {
        eprintln!("No interface given.");
        eprintln!("Try '--help' for more information.");
        return EXIT_USAGE;
    };

    match run_panel(options, config, interface) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            EXIT_FAILURE
        }
    }
}

fn list_interfaces() {
    for interface in network_utils::detect_interfaces() {
        println!(
            "{}\t{}\t{}",
            interface.name,
            interface.kind.display_name(),
            if interface.is_connected { "up" } else { "down" }
        );
    }
}

fn build_panel(
    options: &CliOptions,
    config: &AppConfig,
    interface: &str,
) -> Result<IpSettingsPanel<MemoryForm>> {
    let directory: Arc<dyn SettingsDirectory> = match &options.settings_dir {
        Some(dir) => Arc::new(FixedSettingsDirectory(dir.clone())),
        None => Arc::new(SystemSettingsDirectory::from_config(config)),
    };
    info!(
        "Using settings directory {:?}",
        directory.common_settings_directory()?
    );

    let store = SettingsStore::new(directory.clone());
    let writer = ConfigurationWriter::new(directory, config.application_name.clone());
    let service = network_service(config.service_backend);
    debug!("Auto-configuration backend: {}", config.service_backend.as_str());

    let mut form = MemoryForm::new();
    if store.is_wireless(interface) {
        form.set_networks(network_utils::detect_wifi_networks());
    }

    IpSettingsPanel::open(form, interface, store, writer, service)
}

fn run_panel(options: &CliOptions, config: &AppConfig, interface: &str) -> Result<u8> {
    let mut panel = build_panel(options, config, interface)?;

    if options.show {
        println!("{}", serde_json::to_string_pretty(panel.settings())?);
    }

    if let Some(mode) = options.mode {
        panel.dispatch(Action::ModeChanged(mode));
    }
    if let Some(network) = &options.network {
        if !panel.form().networks().is_empty() {
            if let Some(name) = network {
                if !panel.form().networks().contains(name) {
                    warn!("Wireless network '{}' is not in range", name);
                }
            }
        }
        panel.dispatch(Action::NetworkSelected(network.clone()));
    }
    for (field, text) in &options.edits {
        panel.dispatch(Action::FieldEdited(*field, text.clone()));
    }

    if options.revert {
        panel.dispatch(Action::RevertRequested);
    }

    if !options.apply {
        if options.has_edits() && !options.revert {
            eprintln!("Edits were not applied; pass --apply to save them.");
        }
        return Ok(EXIT_OK);
    }

    let outcome = panel.dispatch(Action::ApplyRequested);
    for alert in panel.form_mut().take_alerts() {
        eprintln!("{}", alert);
    }

    let code = match outcome {
        Outcome::Applied(report) => {
            if let Ok(path) = &report.resolver {
                println!("{} saved.", path.display());
            }
            match &report.interfaces {
                Ok(InterfaceWrite::Written(path)) => println!("{} saved.", path.display()),
                Ok(InterfaceWrite::Removed { path, existed: true }) => {
                    println!("{} removed, {} uses defaults.", path.display(), interface)
                }
                _ => {}
            }
            if report.is_clean() {
                EXIT_OK
            } else {
                EXIT_WARNINGS
            }
        }
        Outcome::Invalid { .. } => {
            eprintln!("{}", panel.form().error_text());
            EXIT_INVALID
        }
        Outcome::Handled | Outcome::Ignored | Outcome::Busy => EXIT_OK,
    };
    Ok(code)
}
