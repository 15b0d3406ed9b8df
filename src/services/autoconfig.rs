// Network Preferences - Auto-Configuration Service
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Triggering DHCP auto-configuration of an interface.

use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, info, warn};

use crate::models::{Error, Result};

/// Address family to auto-configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Inet,
    #[allow(dead_code)]
    Inet6,
}

impl AddressFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inet => "inet",
            Self::Inet6 => "inet6",
        }
    }
}

/// A system service able to negotiate addresses for an interface.
///
/// Implementations return `Error::ServiceUnavailable` when the backing
/// service cannot be reached and `Error::AutoConfigureFailed` for any other
/// failure. Calls have live side effects and are not idempotent.
pub trait NetworkService {
    fn auto_configure(&self, interface: &str, family: AddressFamily) -> Result<()>;
}

/// Ask `service` to auto-configure IPv4 on `interface`.
pub fn trigger_auto_configure(service: &dyn NetworkService, interface: &str) -> Result<()> {
    info!("Requesting auto-configuration of {}", interface);
    let result = service.auto_configure(interface, AddressFamily::Inet);
    match &result {
        Ok(()) => info!("Auto-configuration of {} started", interface),
        Err(e) if e.is_service_unavailable() => warn!("Network service is not running"),
        Err(e) => warn!("Auto-configuration of {} failed: {}", interface, e),
    }
    result
}

/// Backend driving NetworkManager through `nmcli`.
#[derive(Debug, Clone)]
pub struct NmcliService {
    program: String,
}

impl NmcliService {
    pub fn new() -> Self {
        Self {
            program: "nmcli".to_string(),
        }
    }

    /// Use a different executable, e.g. a wrapper script.
    #[allow(dead_code)]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NmcliService {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkService for NmcliService {
    fn auto_configure(&self, interface: &str, family: AddressFamily) -> Result<()> {
        if family == AddressFamily::Inet6 {
            debug!("nmcli activates both address families on {}", interface);
        }

        let output = Command::new(&self.program)
            .args(["device", "connect", interface])
            .output();

        match output {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(classify_nmcli_failure(&String::from_utf8_lossy(
                &output.stderr,
            ))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found: {}", self.program, e);
                Err(Error::ServiceUnavailable)
            }
            Err(e) => Err(Error::AutoConfigureFailed(e.to_string())),
        }
    }
}

/// Map nmcli's error output to a service error.
fn classify_nmcli_failure(stderr: &str) -> Error {
    let message = stderr.trim();
    if message.contains("NetworkManager is not running")
        || message.contains("Could not create NMClient object")
    {
        return Error::ServiceUnavailable;
    }

    let reason = message.strip_prefix("Error: ").unwrap_or(message);
    if reason.is_empty() {
        Error::AutoConfigureFailed("unknown error".to_string())
    } else {
        Error::AutoConfigureFailed(reason.to_string())
    }
}
