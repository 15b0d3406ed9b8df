// Network Preferences - Configuration Writer
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Serialization of interface settings to the resolver file and the
//! interfaces file.
//!
//! Both files are replaced as a whole. The two writes are independent: a
//! failure writing one leaves the other as it was written.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{Error, InterfaceMode, Result, Settings, INTERFACES_NAME, RESOLV_CONF_NAME};
use crate::storage::SettingsDirectory;

/// What `write_interface_config` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceWrite {
    /// The interface block was written to this file.
    Written(PathBuf),
    /// The interface is fully default; the file was removed if it existed.
    Removed { path: PathBuf, existed: bool },
}

/// Writes interface settings to the network configuration files.
#[derive(Clone)]
pub struct ConfigurationWriter {
    directory: Arc<dyn SettingsDirectory>,
    application_name: String,
}

impl ConfigurationWriter {
    pub fn new(directory: Arc<dyn SettingsDirectory>, application_name: impl Into<String>) -> Self {
        Self {
            directory,
            application_name: application_name.into(),
        }
    }

    /// Render the resolver file for `settings`.
    pub fn render_resolver_config(&self, settings: &Settings) -> String {
        let mut content = format!("# Generated by {}\n", self.application_name);

        for server in settings.name_servers.iter().filter(|s| !s.is_empty()) {
            let _ = writeln!(content, "nameserver\t{}", server);
        }
        if !settings.domain.is_empty() {
            let _ = writeln!(content, "domain\t{}", settings.domain);
        }

        content
    }

    /// Write `<settings-dir>/network/resolv.conf`.
    pub fn write_resolver_config(&self, settings: &Settings) -> Result<PathBuf> {
        let path = self.directory.network_file(RESOLV_CONF_NAME, true)?;
        let content = self.render_resolver_config(settings);

        replace_file(&path, &content)?;
        info!("{} saved.", path.display());
        Ok(path)
    }

    /// Write `<settings-dir>/network/interfaces`, or remove it when the
    /// interface needs no customization (DHCP without a wireless network).
    pub fn write_interface_config(&self, settings: &Settings) -> Result<InterfaceWrite> {
        let path = self.directory.network_file(INTERFACES_NAME, true)?;

        if settings.is_fully_default() {
            let existed = match fs::remove_file(&path) {
                Ok(()) => true,
                Err(e) if e.kind() == ErrorKind::NotFound => false,
                Err(e) => {
                    error!("Failed to remove {}: {}", path.display(), e);
                    return Err(Error::write_failed(&path, &e));
                }
            };
            debug!(
                "{} uses defaults, {} removed (existed: {})",
                settings.name(),
                path.display(),
                existed
            );
            return Ok(InterfaceWrite::Removed { path, existed });
        }

        replace_file(&path, &render_interface_config(settings))?;
        info!("{} saved.", path.display());
        Ok(InterfaceWrite::Written(path))
    }
}

/// Render the interface block for `settings`.
pub fn render_interface_config(settings: &Settings) -> String {
    let mut content = format!("interface {} {{\n", settings.name());

    match settings.mode {
        InterfaceMode::Disabled => content.push_str("\tdisabled\ttrue\n"),
        InterfaceMode::Static => {
            content.push_str("\taddress {\n");
            content.push_str("\t\tfamily\tinet\n");
            let _ = writeln!(content, "\t\taddress\t{}", settings.ip);
            let _ = writeln!(content, "\t\tgateway\t{}", settings.gateway);
            let _ = writeln!(content, "\t\tmask\t{}", settings.netmask);
            content.push_str("\t}\n");
        }
        InterfaceMode::Dhcp => {}
    }

    if settings.wireless_network != "" {
        let _ = writeln!(content, "\tnetwork\t{}", settings.wireless_network);
    }
    content.push_str("}\n\n");

    content
}

/// Truncate-and-replace `path` with `content`.
fn replace_file(path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        error!("failed to open {} for writing: {}", path.display(), e);
        Error::write_failed(path, &e)
    })?;

    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| {
            error!("failed to write {}: {}", path.display(), e);
            Error::write_failed(path, &e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::storage::{FixedSettingsDirectory, SettingsStore};

    fn writer_in(dir: &Path) -> ConfigurationWriter {
        ConfigurationWriter::new(
            Arc::new(FixedSettingsDirectory(dir.to_path_buf())),
            "Network Preferences",
        )
    }

    fn static_settings() -> Settings {
        let mut settings = Settings::new("eth0");
        settings.mode = InterfaceMode::Static;
        settings.ip = "192.168.1.10".into();
        settings.netmask = "255.255.255.0".into();
        settings
    }

    #[test]
    fn test_static_interface_block() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());

        let result = writer.write_interface_config(&static_settings()).unwrap();
        let path = dir.path().join("network").join("interfaces");
        assert_eq!(result, InterfaceWrite::Written(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "interface eth0 {\n\taddress {\n\t\tfamily\tinet\n\t\taddress\t192.168.1.10\n\t\tgateway\t\n\t\tmask\t255.255.255.0\n\t}\n}\n\n"
        );
    }

    #[test]
    fn test_disabled_and_wireless_blocks() {
        let mut settings = Settings::new("wlan0");
        settings.mode = InterfaceMode::Disabled;
        settings.ip = "10.0.0.1".into();
        settings.wireless_network = "Home".into();
        assert_eq!(
            render_interface_config(&settings),
            "interface wlan0 {\n\tdisabled\ttrue\n\tnetwork\tHome\n}\n\n"
        );

        settings.mode = InterfaceMode::Dhcp;
        assert_eq!(
            render_interface_config(&settings),
            "interface wlan0 {\n\tnetwork\tHome\n}\n\n"
        );
    }

    #[test]
    fn test_dhcp_without_network_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        writer.write_interface_config(&static_settings()).unwrap();

        let path = dir.path().join("network").join("interfaces");
        assert!(path.exists());

        let dhcp = Settings::new("eth0");
        let result = writer.write_interface_config(&dhcp).unwrap();
        assert_eq!(
            result,
            InterfaceWrite::Removed {
                path: path.clone(),
                existed: true
            }
        );
        assert!(!path.exists());

        let again = writer.write_interface_config(&dhcp).unwrap();
        assert_eq!(again, InterfaceWrite::Removed { path, existed: false });
    }

    #[test]
    fn test_resolver_config_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());

        let mut settings = Settings::new("eth0");
        settings.name_servers = vec!["8.8.8.8".into(), "8.8.4.4".into()];
        settings.domain = "example.com".into();

        let path = writer.write_resolver_config(&settings).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let (comment, body) = content.split_once('\n').unwrap();
        assert_eq!(comment, "# Generated by Network Preferences");
        assert_eq!(
            body,
            "nameserver\t8.8.8.8\nnameserver\t8.8.4.4\ndomain\texample.com\n"
        );
    }

    #[test]
    fn test_resolver_skips_empty_entries_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());

        let mut settings = Settings::new("eth0");
        settings.name_servers = vec!["1.1.1.1".into(), "9.9.9.9".into()];
        settings.domain = "corp.example".into();
        writer.write_resolver_config(&settings).unwrap();

        settings.name_servers = vec![String::new(), "9.9.9.9".into()];
        settings.domain.clear();
        let path = writer.write_resolver_config(&settings).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "# Generated by Network Preferences\nnameserver\t9.9.9.9\n"
        );
    }

    #[test]
    fn test_unwritable_target_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("network");
        // A directory where the file should be makes the open fail.
        fs::create_dir_all(network.join("resolv.conf")).unwrap();

        let writer = writer_in(dir.path());
        let err = writer.write_resolver_config(&Settings::new("eth0")).unwrap_err();
        match err {
            Error::ConfigWriteFailed { path, reason } => {
                assert_eq!(path, network.join("resolv.conf"));
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_write_read_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        let store = SettingsStore::new(writer.directory.clone());

        let mut settings = static_settings();
        settings.gateway = "192.168.1.1".into();
        settings.name_servers = vec!["8.8.8.8".into(), "8.8.4.4".into()];
        settings.domain = "example.com".into();

        writer.write_resolver_config(&settings).unwrap();
        writer.write_interface_config(&settings).unwrap();
        let first_interfaces = fs::read_to_string(dir.path().join("network/interfaces")).unwrap();
        let first_resolver = fs::read_to_string(dir.path().join("network/resolv.conf")).unwrap();

        let loaded = store.load("eth0").unwrap();
        assert_eq!(loaded, settings);

        writer.write_resolver_config(&loaded).unwrap();
        writer.write_interface_config(&loaded).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("network/interfaces")).unwrap(),
            first_interfaces
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("network/resolv.conf")).unwrap(),
            first_resolver
        );

        let blocks = parser::parse_interfaces(&first_interfaces).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_round_trip_keeps_edge_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        let store = SettingsStore::new(writer.directory.clone());

        let mut settings = Settings::new("wlan0");
        settings.wireless_network = "Cafe Wifi ".into();
        settings.name_servers = vec!["9.9.9.9".into()];
        settings.domain = "corp.example ".into();

        writer.write_resolver_config(&settings).unwrap();
        writer.write_interface_config(&settings).unwrap();
        let first_interfaces = fs::read_to_string(dir.path().join("network/interfaces")).unwrap();
        assert_eq!(first_interfaces, "interface wlan0 {\n\tnetwork\tCafe Wifi \n}\n\n");

        let loaded = store.load("wlan0").unwrap();
        assert_eq!(loaded.wireless_network, "Cafe Wifi ");
        assert_eq!(loaded.domain, "corp.example ");

        writer.write_interface_config(&loaded).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("network/interfaces")).unwrap(),
            first_interfaces
        );
    }
}
