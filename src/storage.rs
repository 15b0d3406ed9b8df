// Network Preferences - Settings Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Settings directory resolution and loading of interface settings.
//!
//! Handles:
//! - Resolving the common settings directory (injectable for tests)
//! - Creating the `network/` subdirectory on demand
//! - Loading the current settings of an interface from disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::{
    AppConfig, Error, Result, Settings, INTERFACES_NAME, NETWORK_DIR_NAME, RESOLV_CONF_NAME,
};
use crate::network_utils;
use crate::parser;

/// Environment variable overriding the configured settings directory.
pub const SETTINGS_DIR_ENV: &str = "NETPREFS_SETTINGS_DIR";

/// Resolves the directory the network configuration files live under.
pub trait SettingsDirectory {
    /// The common settings directory.
    fn common_settings_directory(&self) -> Result<PathBuf>;

    /// `<common>/network`, created (mode 0755) when `create` is set.
    fn network_directory(&self, create: bool) -> Result<PathBuf> {
        let path = self.common_settings_directory()?.join(NETWORK_DIR_NAME);
        if create {
            fs::create_dir_all(&path).map_err(|e| Error::write_failed(&path, &e))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o755));
            }
        }
        Ok(path)
    }

    /// Path of a file inside the network directory.
    fn network_file(&self, name: &str, create: bool) -> Result<PathBuf> {
        Ok(self.network_directory(create)?.join(name))
    }
}

/// Settings directory taken from the environment or the application config.
#[derive(Debug, Clone)]
pub struct SystemSettingsDirectory {
    configured: PathBuf,
}

impl SystemSettingsDirectory {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            configured: config.settings_dir.clone(),
        }
    }
}

impl SettingsDirectory for SystemSettingsDirectory {
    fn common_settings_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(SETTINGS_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if self.configured.as_os_str().is_empty() {
            return Err(Error::DirectoryNotFound);
        }
        Ok(self.configured.clone())
    }
}

/// A fixed settings directory, e.g. from `--settings-dir` or a test.
#[derive(Debug, Clone)]
pub struct FixedSettingsDirectory(pub PathBuf);

impl SettingsDirectory for FixedSettingsDirectory {
    fn common_settings_directory(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Loads interface settings from the files in the settings directory.
#[derive(Clone)]
pub struct SettingsStore {
    directory: Arc<dyn SettingsDirectory>,
    sysfs_root: PathBuf,
}

impl SettingsStore {
    pub fn new(directory: Arc<dyn SettingsDirectory>) -> Self {
        Self {
            directory,
            sysfs_root: PathBuf::from(network_utils::SYSFS_NET),
        }
    }

    /// Use a different sysfs root for device detection.
    #[allow(dead_code)]
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Load the current settings of interface `name`.
    ///
    /// Missing files mean system defaults: DHCP, no DNS override.
    pub fn load(&self, name: &str) -> Result<Settings> {
        let mut settings = Settings::new(name);

        let interfaces_path = self.directory.network_file(INTERFACES_NAME, false)?;
        if let Some(content) = read_optional(&interfaces_path)? {
            let blocks = parser::parse_interfaces(&content)?;
            match blocks.iter().find(|block| block.name == name) {
                Some(block) => block.apply_to(&mut settings),
                None => debug!("No block for {} in {:?}", name, interfaces_path),
            }
        }

        let resolver_path = self.directory.network_file(RESOLV_CONF_NAME, false)?;
        if let Some(content) = read_optional(&resolver_path)? {
            parser::parse_resolver_config(&content).apply_to(&mut settings);
        }

        info!("Loaded settings for {} ({})", name, settings.mode.as_str());
        Ok(settings)
    }

    /// Whether the device `name` is a wireless adapter.
    pub fn is_wireless(&self, name: &str) -> bool {
        network_utils::is_wireless_interface_in(&self.sysfs_root, name)
    }
}

/// Read a file, treating a missing file as `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Err(Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterfaceMode;

    fn store_in(dir: &Path) -> SettingsStore {
        SettingsStore::new(Arc::new(FixedSettingsDirectory(dir.to_path_buf())))
            .with_sysfs_root(dir.join("sys"))
    }

    #[test]
    fn test_network_directory_created_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FixedSettingsDirectory(dir.path().to_path_buf());

        let first = provider.network_directory(true).unwrap();
        let second = provider.network_directory(true).unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
        assert_eq!(first, dir.path().join("network"));
    }

    #[test]
    fn test_network_directory_not_created_on_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FixedSettingsDirectory(dir.path().to_path_buf());
        let path = provider.network_file("interfaces", false).unwrap();
        assert_eq!(path, dir.path().join("network").join("interfaces"));
        assert!(!dir.path().join("network").exists());
    }

    #[test]
    fn test_empty_configured_directory_is_unresolved() {
        let config = AppConfig {
            settings_dir: PathBuf::new(),
            ..AppConfig::default()
        };
        let provider = SystemSettingsDirectory::from_config(&config);
        if std::env::var_os(SETTINGS_DIR_ENV).is_none() {
            assert!(matches!(
                provider.common_settings_directory(),
                Err(Error::DirectoryNotFound)
            ));
        }
    }

    #[test]
    fn test_load_missing_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(dir.path()).load("eth0").unwrap();
        assert_eq!(settings, Settings::new("eth0"));
    }

    #[test]
    fn test_load_static_settings() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("network");
        fs::create_dir_all(&network).unwrap();
        fs::write(
            network.join("interfaces"),
            "interface eth1 {\n\tdisabled\ttrue\n}\n\ninterface eth0 {\n\taddress {\n\t\tfamily\tinet\n\t\taddress\t10.0.0.5\n\t\tgateway\t10.0.0.1\n\t\tmask\t255.0.0.0\n\t}\n}\n\n",
        )
        .unwrap();
        fs::write(
            network.join("resolv.conf"),
            "# Generated by Network Preferences\nnameserver\t1.1.1.1\ndomain\tlan\n",
        )
        .unwrap();

        let store = store_in(dir.path());
        let settings = store.load("eth0").unwrap();
        assert_eq!(settings.mode, InterfaceMode::Static);
        assert_eq!(settings.ip, "10.0.0.5");
        assert_eq!(settings.gateway, "10.0.0.1");
        assert_eq!(settings.netmask, "255.0.0.0");
        assert_eq!(settings.name_servers, vec!["1.1.1.1"]);
        assert_eq!(settings.domain, "lan");

        assert!(store.load("eth1").unwrap().is_disabled());
    }

    #[test]
    fn test_load_malformed_interfaces_fails() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("network");
        fs::create_dir_all(&network).unwrap();
        fs::write(network.join("interfaces"), "interface eth0 {\n").unwrap();

        assert!(matches!(
            store_in(dir.path()).load("eth0"),
            Err(Error::ConfigParseFailed(_))
        ));
    }

    #[test]
    fn test_is_wireless_uses_sysfs_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys").join("radio0").join("wireless")).unwrap();
        fs::create_dir_all(dir.path().join("sys").join("eth0")).unwrap();

        let store = store_in(dir.path());
        assert!(store.is_wireless("radio0"));
        assert!(!store.is_wireless("eth0"));
    }
}
