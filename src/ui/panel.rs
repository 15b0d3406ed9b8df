// Network Preferences - IP Settings Panel
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The IP settings panel: event dispatch, validation gate, and the
//! Apply / Revert cycle.
//!
//! The panel owns the [`Settings`] record of one interface. Edits live in the
//! form until Apply copies them into the record and persists it; Revert shows
//! the record again, discarding whatever the form holds.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::form::{FieldId, Form};
use crate::models::{validation, Error, InterfaceMode, Result, Settings};
use crate::services::{trigger_auto_configure, NetworkService};
use crate::storage::SettingsStore;
use crate::writer::{ConfigurationWriter, InterfaceWrite};

/// Fields that must hold an address when in use.
const REQUIRED_FIELDS: [FieldId; 2] = [FieldId::Ip, FieldId::Netmask];

/// Fields that may be left empty.
const OPTIONAL_FIELDS: [FieldId; 3] = [FieldId::Gateway, FieldId::PrimaryDns, FieldId::SecondaryDns];

/// User actions routed to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ApplyRequested,
    RevertRequested,
    ModeChanged(InterfaceMode),
    /// `None` selects the "no network" entry.
    NetworkSelected(Option<String>),
    FieldEdited(FieldId, String),
    /// Settings of `interface` changed outside the panel.
    #[allow(dead_code)]
    ExternalSettingsChanged { interface: String },
}

/// Where the panel is in the Apply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Editing,
    Saving,
    Saved,
}

/// Result of each step of a save. Every step runs regardless of the others.
#[derive(Debug)]
pub struct ApplyReport {
    pub resolver: Result<PathBuf>,
    pub interfaces: Result<InterfaceWrite>,
    /// `None` unless the interface is in DHCP mode.
    pub auto_configure: Option<Result<()>>,
}

impl ApplyReport {
    /// Whether every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.resolver.is_ok()
            && self.interfaces.is_ok()
            && self.auto_configure.as_ref().map_or(true, |r| r.is_ok())
    }
}

/// What handling an action did.
#[derive(Debug)]
pub enum Outcome {
    Handled,
    /// The action did not concern this panel.
    Ignored,
    /// A save is in progress.
    Busy,
    /// Validation failed; nothing was written.
    Invalid { field: FieldId, error: Error },
    Applied(ApplyReport),
}

/// Settings panel for one network interface.
pub struct IpSettingsPanel<F: Form> {
    form: F,
    settings: Settings,
    store: SettingsStore,
    writer: ConfigurationWriter,
    service: Arc<dyn NetworkService>,
    state: PanelState,
}

impl<F: Form> IpSettingsPanel<F> {
    /// Create a panel showing `settings`.
    pub fn new(
        form: F,
        settings: Settings,
        store: SettingsStore,
        writer: ConfigurationWriter,
        service: Arc<dyn NetworkService>,
    ) -> Self {
        let mut panel = Self {
            form,
            settings,
            store,
            writer,
            service,
            state: PanelState::Editing,
        };
        panel.form.set_apply_enabled(false);
        panel.form.set_revert_enabled(false);
        panel.show_configuration();
        panel
    }

    /// Create a panel for `interface`, loading its current settings.
    pub fn open(
        form: F,
        interface: &str,
        store: SettingsStore,
        writer: ConfigurationWriter,
        service: Arc<dyn NetworkService>,
    ) -> Result<Self> {
        let settings = store.load(interface)?;
        Ok(Self::new(form, settings, store, writer, service))
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// The last loaded or applied settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[allow(dead_code)]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Handle a user action.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        debug!("Dispatching {:?}", action);
        match action {
            Action::ApplyRequested => self.apply(),
            Action::RevertRequested => {
                self.show_configuration();
                self.form.set_error_text("");
                self.form.set_revert_enabled(false);
                self.state = PanelState::Editing;
                Outcome::Handled
            }
            Action::ModeChanged(mode) => {
                self.form.set_mode(mode);
                self.selection_changed()
            }
            Action::NetworkSelected(network) => {
                self.form.select_network(network.as_deref());
                self.selection_changed()
            }
            Action::FieldEdited(field, text) => {
                self.form.set_text(field, &text);
                self.form.set_error_text("");
                self.form.set_apply_enabled(true);
                self.state = PanelState::Editing;
                Outcome::Handled
            }
            Action::ExternalSettingsChanged { interface } => self.reload(&interface),
        }
    }

    /// Fill the form from the settings record.
    pub fn show_configuration(&mut self) {
        for field in FieldId::ALL {
            self.form.set_text(field, "");
        }

        self.form.set_mode(self.settings.mode);

        let wireless = self.store.is_wireless(self.settings.name());
        self.form.set_network_menu_visible(wireless);
        if wireless {
            let network = self.settings.wireless_network.as_str();
            self.form
                .select_network(if network.is_empty() { None } else { Some(network) });
        }

        self.form.set_text(FieldId::Ip, &self.settings.ip);
        self.form.set_text(FieldId::Gateway, &self.settings.gateway);
        self.form.set_text(FieldId::Netmask, &self.settings.netmask);
        if self.settings.name_servers.len() >= 2 {
            self.form
                .set_text(FieldId::SecondaryDns, self.settings.secondary_name_server());
        }
        if !self.settings.name_servers.is_empty() {
            self.form
                .set_text(FieldId::PrimaryDns, self.settings.primary_name_server());
        }
        self.form.set_text(FieldId::Domain, &self.settings.domain);

        self.enable_text_controls(self.settings.mode == InterfaceMode::Static);
    }

    fn selection_changed(&mut self) -> Outcome {
        self.enable_text_controls(self.form.mode() == InterfaceMode::Static);
        self.form.set_apply_enabled(true);
        self.form.set_revert_enabled(true);
        self.state = PanelState::Editing;
        Outcome::Handled
    }

    fn enable_text_controls(&mut self, enable: bool) {
        for field in FieldId::ALL {
            self.form.set_enabled(field, enable);
        }
    }

    fn reload(&mut self, interface: &str) -> Outcome {
        if interface != self.settings.name() {
            return Outcome::Ignored;
        }

        match self.store.load(interface) {
            Ok(settings) => self.settings = settings,
            Err(e) => warn!("Failed to reload settings of {}: {}", interface, e),
        }
        self.show_configuration();
        Outcome::Handled
    }

    fn apply(&mut self) -> Outcome {
        // Only reachable when a form dispatches Apply from inside a save.
        if self.state == PanelState::Saving {
            return Outcome::Busy;
        }

        if let Err((field, error)) = self.validate_form() {
            warn!("{}", error);
            self.form.focus(field);
            self.form.set_error_text(&error.to_string());
            self.state = PanelState::Editing;
            return Outcome::Invalid { field, error };
        }

        self.state = PanelState::Saving;
        let report = self.save_configuration();
        self.state = PanelState::Saved;

        info!(
            "Settings of {} applied{}",
            self.settings.name(),
            if report.is_clean() { "" } else { " with errors" }
        );
        Outcome::Applied(report)
    }

    /// Check the enabled address fields, stopping at the first failure.
    fn validate_form(&self) -> std::result::Result<(), (FieldId, Error)> {
        for field in REQUIRED_FIELDS {
            if self.form.is_enabled(field) {
                validation::validate_field(field.label(), &self.form.text(field))
                    .map_err(|e| (field, e))?;
            }
        }
        for field in OPTIONAL_FIELDS {
            if self.form.is_enabled(field) {
                validation::validate_optional_field(field.label(), &self.form.text(field))
                    .map_err(|e| (field, e))?;
            }
        }
        Ok(())
    }

    fn apply_controls_to_configuration(&mut self) {
        let form = &self.form;

        self.settings.ip = form.text(FieldId::Ip);
        self.settings.netmask = form.text(FieldId::Netmask);
        self.settings.gateway = form.text(FieldId::Gateway);

        if form.is_network_menu_visible() {
            self.settings
                .set_wireless_network(form.selected_network().as_deref());
        }

        self.settings.mode = form.mode();

        self.settings.name_servers = vec![form.text(FieldId::PrimaryDns), form.text(FieldId::SecondaryDns)];
        self.settings.domain = form.text(FieldId::Domain);

        self.form.set_apply_enabled(false);
        self.form.set_revert_enabled(true);
    }

    fn save_configuration(&mut self) -> ApplyReport {
        self.apply_controls_to_configuration();

        // Resolver failures only reach the log.
        let resolver = self.writer.write_resolver_config(&self.settings);
        if let Err(e) = &resolver {
            error!("Failed to save DNS configuration: {}", e);
        }

        let interfaces = self.writer.write_interface_config(&self.settings);
        if let Err(e) = &interfaces {
            error!("Failed to save interface configuration: {}", e);
            self.form.alert(&e.to_string());
        }

        let auto_configure = if self.settings.auto_configure() {
            let result = trigger_auto_configure(self.service.as_ref(), self.settings.name());
            if let Err(e) = &result {
                self.form.alert(&e.to_string());
            }
            Some(result)
        } else {
            None
        };

        ApplyReport {
            resolver,
            interfaces,
            auto_configure,
        }
    }
}
