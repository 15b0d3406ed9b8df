// Network Preferences - Configuration Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Readers for the interfaces file and the resolver file.
//!
//! The interfaces file is a brace-delimited block per interface:
//!
//! ```text
//! interface eth0 {
//!     address {
//!         family  inet
//!         address 192.168.1.10
//!         gateway 192.168.1.1
//!         mask    255.255.255.0
//!     }
//!     network HomeWifi
//! }
//! ```

use crate::models::{Error, InterfaceMode, Result, Settings};

/// `address { ... }` section of an interface block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBlock {
    pub family: String,
    pub address: String,
    pub gateway: String,
    pub mask: String,
}

/// One `interface <name> { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceBlock {
    pub name: String,
    pub disabled: bool,
    pub address: Option<AddressBlock>,
    pub network: Option<String>,
}

impl InterfaceBlock {
    /// Copy this block into `settings`, replacing mode and address fields.
    pub fn apply_to(&self, settings: &mut Settings) {
        settings.ip.clear();
        settings.netmask.clear();
        settings.gateway.clear();

        settings.mode = if self.disabled {
            InterfaceMode::Disabled
        } else if self.address.is_some() {
            InterfaceMode::Static
        } else {
            InterfaceMode::Dhcp
        };

        if let Some(address) = &self.address {
            if !address.family.is_empty() && address.family != "inet" {
                tracing::debug!("{}: unexpected address family '{}'", self.name, address.family);
            }
            settings.ip = address.address.clone();
            settings.netmask = address.mask.clone();
            settings.gateway = address.gateway.clone();
        }

        settings.set_wireless_network(self.network.as_deref());
    }
}

/// Contents of a resolver file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub name_servers: Vec<String>,
    pub domain: String,
}

impl ResolverConfig {
    pub fn apply_to(&self, settings: &mut Settings) {
        settings.name_servers = self.name_servers.clone();
        settings.domain = self.domain.clone();
    }
}

/// Split `key<TAB>value`, keeping the value exactly as written.
///
/// Hand-edited lines separated by spaces are accepted too; there the
/// separating run of spaces is dropped. A missing value is returned as "".
fn split_directive(line: &str) -> (&str, &str) {
    if let Some((key, value)) = line.split_once('\t') {
        return (key, value);
    }
    match line.split_once(' ') {
        Some((key, value)) => (key, value.trim_start_matches(' ')),
        None => (line, ""),
    }
}

/// Whether a directive value opens a nested block.
fn opens_block(value: &str) -> bool {
    value.trim_end().ends_with('{')
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Top,
    Interface,
    Address,
    /// Unknown nested block inside an interface, with its brace depth.
    Skipped(usize),
}

/// Parse the contents of an interfaces file.
pub fn parse_interfaces(content: &str) -> Result<Vec<InterfaceBlock>> {
    let mut blocks = Vec::new();
    let mut section = Section::Top;
    let mut current = InterfaceBlock::default();
    let mut address = AddressBlock::default();

    for (index, raw) in content.lines().enumerate() {
        // Only indentation is insignificant; values keep trailing spaces.
        let line = raw.trim_start();
        let bare = line.trim_end();
        if bare.is_empty() || bare.starts_with('#') {
            continue;
        }
        let line_no = index + 1;

        match section {
            Section::Top => {
                let (key, rest) = split_directive(bare);
                let name = rest.strip_suffix('{').map(str::trim);
                match (key, name) {
                    ("interface", Some(name)) if !name.is_empty() => {
                        current = InterfaceBlock {
                            name: name.to_string(),
                            ..InterfaceBlock::default()
                        };
                        section = Section::Interface;
                    }
                    _ => {
                        return Err(Error::ConfigParseFailed(format!(
                            "line {}: expected 'interface <name> {{', found '{}'",
                            line_no, bare
                        )));
                    }
                }
            }
            Section::Interface => {
                if bare == "}" {
                    blocks.push(std::mem::take(&mut current));
                    section = Section::Top;
                    continue;
                }
                let (key, value) = split_directive(line);
                match key {
                    "disabled" => current.disabled = value.trim_end() == "true",
                    "network" => current.network = Some(value.to_string()),
                    "address" if value.trim_end() == "{" => {
                        address = AddressBlock::default();
                        section = Section::Address;
                    }
                    _ if opens_block(value) => {
                        tracing::debug!("Skipping unknown block '{}' on line {}", key, line_no);
                        section = Section::Skipped(1);
                    }
                    _ => {
                        tracing::debug!("Ignoring unknown interface key '{}' on line {}", key, line_no);
                    }
                }
            }
            Section::Skipped(depth) => {
                if bare == "}" {
                    section = if depth == 1 {
                        Section::Interface
                    } else {
                        Section::Skipped(depth - 1)
                    };
                } else if opens_block(bare) {
                    section = Section::Skipped(depth + 1);
                }
            }
            Section::Address => {
                if bare == "}" {
                    current.address = Some(std::mem::take(&mut address));
                    section = Section::Interface;
                    continue;
                }
                let (key, value) = split_directive(bare);
                match key {
                    "family" => address.family = value.to_string(),
                    "address" => address.address = value.to_string(),
                    "gateway" => address.gateway = value.to_string(),
                    "mask" => address.mask = value.to_string(),
                    _ => {
                        tracing::debug!("Ignoring unknown address key '{}' on line {}", key, line_no);
                    }
                }
            }
        }
    }

    if section != Section::Top {
        return Err(Error::ConfigParseFailed(
            "unexpected end of file: missing '}'".to_string(),
        ));
    }

    Ok(blocks)
}

/// Parse the contents of a resolver file.
///
/// Name servers keep their order; the last `domain` line wins.
pub fn parse_resolver_config(content: &str) -> ResolverConfig {
    let mut config = ResolverConfig::default();

    for raw in content.lines() {
        let line = raw.trim_start();
        if line.trim_end().is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        match split_directive(line) {
            ("nameserver", value) if !value.trim().is_empty() => {
                config.name_servers.push(value.trim().to_string());
            }
            ("domain", value) => config.domain = value.to_string(),
            _ => {}
        }
    }

    config
}
