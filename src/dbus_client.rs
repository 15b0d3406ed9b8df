// Network Preferences - D-Bus Client
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! NetworkManager D-Bus client used to auto-configure an interface.

use tracing::{debug, error, info};
use zbus::zvariant::{ObjectPath, OwnedObjectPath};
use zbus::Connection;

use crate::models::{Error, Result};
use crate::services::{AddressFamily, NetworkService};

/// NetworkManager bus name.
pub const NM_SERVICE_NAME: &str = "org.freedesktop.NetworkManager";

/// NetworkManager object path.
pub const NM_OBJECT_PATH: &str = "/org/freedesktop/NetworkManager";

/// NetworkManager main interface.
pub const NM_INTERFACE: &str = "org.freedesktop.NetworkManager";

/// D-Bus errors meaning nobody serves the NetworkManager name.
const UNAVAILABLE_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.NoServer",
    "org.freedesktop.DBus.Error.Spawn.ServiceNotFound",
];

/// Client for the NetworkManager daemon on the system bus.
#[derive(Debug, Clone, Default)]
pub struct NetworkManagerClient;

impl NetworkManagerClient {
    pub fn new() -> Self {
        Self
    }

    /// Activate the best available connection on `interface`.
    pub async fn activate_device(&self, interface: &str) -> Result<()> {
        let conn = Connection::system().await.map_err(|e| {
            error!("Failed to connect to system D-Bus: {}", e);
            Error::ServiceUnavailable
        })?;
        debug!("Connected to system D-Bus");

        let device: OwnedObjectPath = conn
            .call_method(
                Some(NM_SERVICE_NAME),
                NM_OBJECT_PATH,
                Some(NM_INTERFACE),
                "GetDeviceByIpIface",
                &(interface,),
            )
            .await
            .and_then(|reply| reply.body().deserialize())
            .map_err(classify_error)?;
        debug!("{} is device {}", interface, device.as_str());

        // "/" lets NetworkManager pick the connection and the specific object.
        let any = ObjectPath::from_static_str_unchecked("/");
        let active: OwnedObjectPath = conn
            .call_method(
                Some(NM_SERVICE_NAME),
                NM_OBJECT_PATH,
                Some(NM_INTERFACE),
                "ActivateConnection",
                &(&any, &device, &any),
            )
            .await
            .and_then(|reply| reply.body().deserialize())
            .map_err(classify_error)?;

        info!("Activated {} as {}", interface, active.as_str());
        Ok(())
    }
}

impl NetworkService for NetworkManagerClient {
    fn auto_configure(&self, interface: &str, family: AddressFamily) -> Result<()> {
        debug!("Auto-configuring {} ({})", interface, family.as_str());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::AutoConfigureFailed(e.to_string()))?;

        runtime.block_on(self.activate_device(interface))
    }
}

/// Map a zbus error from a NetworkManager call to a service error.
fn classify_error(err: zbus::Error) -> Error {
    match &err {
        zbus::Error::MethodError(name, detail, _) => {
            if UNAVAILABLE_ERRORS.contains(&name.as_str()) {
                Error::ServiceUnavailable
            } else {
                Error::AutoConfigureFailed(detail.clone().unwrap_or_else(|| name.to_string()))
            }
        }
        zbus::Error::FDO(fdo) => match fdo.as_ref() {
            zbus::fdo::Error::ServiceUnknown(_) | zbus::fdo::Error::NameHasNoOwner(_) => {
                Error::ServiceUnavailable
            }
            other => Error::AutoConfigureFailed(other.to_string()),
        },
        zbus::Error::InputOutput(_) | zbus::Error::Address(_) => Error::ServiceUnavailable,
        _ => Error::AutoConfigureFailed(err.to_string()),
    }
}
