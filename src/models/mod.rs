// Network Preferences - Shared Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Shared Models
//!
//! Types shared by the panel, the configuration writer and the network
//! service backends:
//!
//! - **Settings**: IPv4 settings of one interface
//! - **Validation**: dotted-quad address checks for form fields
//! - **Config**: application configuration (TOML)
//! - **Error**: shared error types

pub mod config;
pub mod error;
pub mod settings;
pub mod validation;

pub use config::{AppConfig, ServiceBackend};
pub use error::{Error, Result};
pub use settings::{InterfaceMode, Settings};

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "netprefs";

/// Subdirectory of the common settings directory holding network files.
pub const NETWORK_DIR_NAME: &str = "network";

/// File name of the resolver configuration.
pub const RESOLV_CONF_NAME: &str = "resolv.conf";

/// File name of the interfaces configuration.
pub const INTERFACES_NAME: &str = "interfaces";
