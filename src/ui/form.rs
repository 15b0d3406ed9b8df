// Network Preferences - Form Boundary
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The form the IP settings panel drives.
//!
//! A toolkit view implements [`Form`]; the panel only reads and writes named
//! fields through it. [`MemoryForm`] keeps everything in memory and backs the
//! command-line front end.

use std::collections::HashMap;

use crate::models::InterfaceMode;

/// Text fields of the IP settings form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Ip,
    Netmask,
    Gateway,
    PrimaryDns,
    SecondaryDns,
    Domain,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        Self::Ip,
        Self::Netmask,
        Self::Gateway,
        Self::PrimaryDns,
        Self::SecondaryDns,
        Self::Domain,
    ];

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ip => "IP address:",
            Self::Netmask => "Netmask:",
            Self::Gateway => "Gateway:",
            Self::PrimaryDns => "DNS #1:",
            Self::SecondaryDns => "DNS #2:",
            Self::Domain => "Domain:",
        }
    }
}

/// Operations the panel needs from a form.
pub trait Form {
    fn text(&self, field: FieldId) -> String;
    fn set_text(&mut self, field: FieldId, text: &str);

    fn is_enabled(&self, field: FieldId) -> bool;
    fn set_enabled(&mut self, field: FieldId, enabled: bool);

    /// Mode currently marked in the mode menu.
    fn mode(&self) -> InterfaceMode;
    fn set_mode(&mut self, mode: InterfaceMode);

    /// The network menu is only shown for wireless devices.
    fn is_network_menu_visible(&self) -> bool;
    fn set_network_menu_visible(&mut self, visible: bool);

    /// Marked wireless network; `None` when the "none" entry is marked.
    fn selected_network(&self) -> Option<String>;
    fn select_network(&mut self, network: Option<&str>);

    fn set_error_text(&mut self, text: &str);
    fn focus(&mut self, field: FieldId);

    fn set_apply_enabled(&mut self, enabled: bool);
    fn set_revert_enabled(&mut self, enabled: bool);

    /// Show a modal message to the user.
    fn alert(&mut self, message: &str);
}

/// In-memory form.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    texts: HashMap<FieldId, String>,
    enabled: HashMap<FieldId, bool>,
    mode: InterfaceMode,
    network_menu_visible: bool,
    networks: Vec<String>,
    selected_network: Option<String>,
    error_text: String,
    focused: Option<FieldId>,
    apply_enabled: bool,
    revert_enabled: bool,
    alerts: Vec<String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the network menu with the visible wireless networks.
    pub fn set_networks(&mut self, networks: Vec<String>) {
        self.networks = networks;
    }

    pub fn networks(&self) -> &[String] {
        &self.networks
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    #[allow(dead_code)]
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    #[allow(dead_code)]
    pub fn is_apply_enabled(&self) -> bool {
        self.apply_enabled
    }

    #[allow(dead_code)]
    pub fn is_revert_enabled(&self) -> bool {
        self.revert_enabled
    }

    #[allow(dead_code)]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Remove and return the alerts shown so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl Form for MemoryForm {
    fn text(&self, field: FieldId) -> String {
        self.texts.get(&field).cloned().unwrap_or_default()
    }

    fn set_text(&mut self, field: FieldId, text: &str) {
        self.texts.insert(field, text.to_string());
    }

    fn is_enabled(&self, field: FieldId) -> bool {
        self.enabled.get(&field).copied().unwrap_or(true)
    }

    fn set_enabled(&mut self, field: FieldId, enabled: bool) {
        self.enabled.insert(field, enabled);
    }

    fn mode(&self) -> InterfaceMode {
        self.mode
    }

    fn set_mode(&mut self, mode: InterfaceMode) {
        self.mode = mode;
    }

    fn is_network_menu_visible(&self) -> bool {
        self.network_menu_visible
    }

    fn set_network_menu_visible(&mut self, visible: bool) {
        self.network_menu_visible = visible;
    }

    fn selected_network(&self) -> Option<String> {
        self.selected_network.clone()
    }

    fn select_network(&mut self, network: Option<&str>) {
        self.selected_network = network.map(str::to_string);
    }

    fn set_error_text(&mut self, text: &str) {
        self.error_text = text.to_string();
    }

    fn focus(&mut self, field: FieldId) {
        self.focused = Some(field);
    }

    fn set_apply_enabled(&mut self, enabled: bool) {
        self.apply_enabled = enabled;
    }

    fn set_revert_enabled(&mut self, enabled: bool) {
        self.revert_enabled = enabled;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
