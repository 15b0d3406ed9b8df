// Network Preferences - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Backend used to trigger live auto-configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceBackend {
    /// NetworkManager over the system D-Bus.
    #[default]
    Dbus,
    /// The `nmcli` command line tool.
    Nmcli,
}

impl ServiceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dbus => "dbus",
            Self::Nmcli => "nmcli",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Common settings directory; `network/` is created below it.
    #[serde(default = "default_settings_dir")]
    pub settings_dir: PathBuf,

    /// Name written into the generated-by comment of resolv.conf.
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Auto-configuration backend.
    #[serde(default)]
    pub service_backend: ServiceBackend,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_settings_dir() -> PathBuf {
    PathBuf::from("/etc/netprefs")
}

fn default_application_name() -> String {
    crate::APP_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_dir: default_settings_dir(),
            application_name: default_application_name(),
            service_backend: ServiceBackend::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(super::CONFIG_DIR_NAME).join("settings.toml"))
    }

    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, super::Error> {
        match path {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    #[allow(dead_code)]
    pub fn save_to_file(&self, path: &Path) -> Result<(), super::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("service_backend = \"nmcli\"\n").unwrap();
        assert_eq!(config.service_backend, ServiceBackend::Nmcli);
        assert_eq!(config.settings_dir, PathBuf::from("/etc/netprefs"));
        assert_eq!(config.application_name, crate::APP_NAME);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let config = AppConfig {
            settings_dir: dir.path().to_path_buf(),
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.settings_dir, dir.path());
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.service_backend, ServiceBackend::Dbus);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.service_backend, ServiceBackend::Dbus);
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "service_backend = 3").unwrap();
        assert!(matches!(
            AppConfig::load_from_file(&path),
            Err(crate::models::Error::ConfigParseFailed(_))
        ));
    }
}
