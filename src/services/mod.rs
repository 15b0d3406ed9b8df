// Network Preferences - Network Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Live network reconfiguration.
//!
//! This module contains the backends that can ask the system network
//! service to auto-configure an interface:
//! - NetworkManager over the system D-Bus (see `dbus_client`)
//! - The `nmcli` command line tool

pub mod autoconfig;

pub use autoconfig::{trigger_auto_configure, AddressFamily, NetworkService, NmcliService};
