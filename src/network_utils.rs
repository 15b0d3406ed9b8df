// Network Preferences - Network Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network interface detection and utilities.
//!
//! This module detects network interfaces through the Linux sysfs interface
//! and lists visible wireless networks through nmcli.

use std::fs;
use std::path::Path;

/// Location of the network devices in sysfs.
pub const SYSFS_NET: &str = "/sys/class/net";

/// Kind of network device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Ethernet,
    Wifi,
    Virtual,
    Other,
}

impl InterfaceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::Wifi => "Wi-Fi",
            Self::Virtual => "Virtual",
            Self::Other => "Network",
        }
    }
}

/// A detected network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub kind: InterfaceKind,
    pub is_connected: bool,
}

/// Detect all network interfaces on the system, loopback excluded.
pub fn detect_interfaces() -> Vec<InterfaceInfo> {
    detect_interfaces_in(Path::new(SYSFS_NET))
}

/// Detect network interfaces below a sysfs-style directory.
pub fn detect_interfaces_in(root: &Path) -> Vec<InterfaceInfo> {
    let mut interfaces = Vec::new();

    if let Ok(entries) = fs::read_dir(root) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name == "lo" {
                continue;
            }

            let kind = determine_kind(&entry.path(), &name);

            let is_connected = fs::read_to_string(entry.path().join("operstate"))
                .map(|state| state.trim() == "up")
                .unwrap_or(false);

            interfaces.push(InterfaceInfo {
                name,
                kind,
                is_connected,
            });
        }
    }

    interfaces.sort_by(|a, b| natural_sort_key(&a.name).cmp(&natural_sort_key(&b.name)));
    interfaces
}

/// Whether `name` is a wireless device, looked up below `root`.
pub fn is_wireless_interface_in(root: &Path, name: &str) -> bool {
    determine_kind(&root.join(name), name) == InterfaceKind::Wifi
}

fn determine_kind(path: &Path, name: &str) -> InterfaceKind {
    if path.join("wireless").exists() {
        return InterfaceKind::Wifi;
    }

    if let Ok(uevent) = fs::read_to_string(path.join("uevent")) {
        if uevent.contains("DEVTYPE=wlan") {
            return InterfaceKind::Wifi;
        }
    }

    if name.starts_with("wl") || name.starts_with("wifi") {
        return InterfaceKind::Wifi;
    }

    if is_virtual_interface(name) {
        return InterfaceKind::Virtual;
    }

    if name.starts_with("en") || name.starts_with("eth") {
        return InterfaceKind::Ethernet;
    }

    InterfaceKind::Other
}

fn is_virtual_interface(name: &str) -> bool {
    ["veth", "br", "virbr", "docker", "vnet", "tun", "tap", "bond", "team", "vlan"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || name.contains("podman")
}

/// Generate a sort key that sorts numbers naturally.
fn natural_sort_key(s: &str) -> (String, u32) {
    let mut prefix = String::new();
    let mut num_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            num_str.push(c);
        } else if num_str.is_empty() {
            prefix.push(c);
        }
    }

    (prefix, num_str.parse().unwrap_or(0))
}

/// Detect visible wireless networks (SSIDs) for the network menu.
///
/// Uses nmcli; an empty list is returned when scanning is not possible.
pub fn detect_wifi_networks() -> Vec<String> {
    let output = std::process::Command::new("nmcli")
        .args(["-t", "-f", "SSID", "device", "wifi", "list"])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            parse_ssid_list(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            tracing::debug!("nmcli wifi list exited with {}", output.status);
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("nmcli not available: {}", e);
            Vec::new()
        }
    }
}

fn parse_ssid_list(stdout: &str) -> Vec<String> {
    let mut networks: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "--")
        .map(str::to_string)
        .collect();
    networks.sort();
    networks.dedup();
    networks
}
