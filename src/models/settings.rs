// Network Preferences - Interface Settings
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The settings record edited by the IP settings panel.

use serde::{Deserialize, Serialize};

/// How an interface obtains its IPv4 configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceMode {
    /// Fixed address, netmask and gateway.
    Static,
    /// Address obtained automatically.
    #[default]
    Dhcp,
    /// Interface switched off.
    Disabled,
}

impl InterfaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dhcp => "dhcp",
            Self::Disabled => "disabled",
        }
    }

    /// Parse a mode name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "static" => Some(Self::Static),
            "dhcp" | "auto" => Some(Self::Dhcp),
            "disabled" | "off" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// IPv4 settings of a single network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Interface name (e.g., "eth0", "wlan0").
    name: String,
    /// Configuration mode.
    pub mode: InterfaceMode,
    /// Address for static mode.
    #[serde(default)]
    pub ip: String,
    /// Netmask for static mode.
    #[serde(default)]
    pub netmask: String,
    /// Default gateway for static mode.
    #[serde(default)]
    pub gateway: String,
    /// DNS servers, primary first.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// DNS search domain.
    #[serde(default)]
    pub domain: String,
    /// Selected wireless network. Empty means none.
    #[serde(default)]
    pub wireless_network: String,
}

impl Settings {
    /// Create default (DHCP, no customization) settings for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: InterfaceMode::Dhcp,
            ip: String::new(),
            netmask: String::new(),
            gateway: String::new(),
            name_servers: Vec::new(),
            domain: String::new(),
            wireless_network: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn auto_configure(&self) -> bool {
        self.mode == InterfaceMode::Dhcp
    }

    #[allow(dead_code)]
    pub fn is_disabled(&self) -> bool {
        self.mode == InterfaceMode::Disabled
    }

    /// Primary DNS server, or "" when unset.
    pub fn primary_name_server(&self) -> &str {
        self.name_servers.first().map(String::as_str).unwrap_or("")
    }

    /// Secondary DNS server, or "" when unset.
    pub fn secondary_name_server(&self) -> &str {
        self.name_servers.get(1).map(String::as_str).unwrap_or("")
    }

    /// Set the wireless network; `None` clears the selection.
    pub fn set_wireless_network(&mut self, network: Option<&str>) {
        self.wireless_network = network.unwrap_or_default().to_string();
    }

    /// Whether nothing about this interface differs from system defaults.
    pub fn is_fully_default(&self) -> bool {
        self.auto_configure() && self.wireless_network == ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_settings_are_default() {
        let settings = Settings::new("eth0");
        assert_eq!(settings.name(), "eth0");
        assert!(settings.auto_configure());
        assert!(!settings.is_disabled());
        assert!(settings.is_fully_default());
        assert_eq!(settings.primary_name_server(), "");
    }

    #[test]
    fn test_mode_flags() {
        let mut settings = Settings::new("eth0");
        settings.mode = InterfaceMode::Disabled;
        assert!(settings.is_disabled());
        assert!(!settings.auto_configure());
        assert!(!settings.is_fully_default());

        settings.mode = InterfaceMode::Static;
        assert!(!settings.is_disabled());
        assert!(!settings.auto_configure());
    }

    #[test]
    fn test_wireless_network_keeps_dhcp_customized() {
        let mut settings = Settings::new("wlan0");
        settings.set_wireless_network(Some("Home"));
        assert!(!settings.is_fully_default());

        settings.set_wireless_network(None);
        assert_eq!(settings.wireless_network, "");
        assert!(settings.is_fully_default());
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(InterfaceMode::from_name("Static"), Some(InterfaceMode::Static));
        assert_eq!(InterfaceMode::from_name("dhcp"), Some(InterfaceMode::Dhcp));
        assert_eq!(InterfaceMode::from_name("disabled"), Some(InterfaceMode::Disabled));
        assert_eq!(InterfaceMode::from_name("bridge"), None);
    }
}
