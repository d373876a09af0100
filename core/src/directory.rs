// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Adapter Directory
//!
//! Builds and owns the current snapshot of every network service the
//! configuration utility knows about. A refresh is all-or-nothing at the
//! listing level and best-effort per service: losing one adapter's detail
//! reads degrades that adapter's fields, never the whole snapshot. The
//! snapshot is replaced whole; readers never see a half-built collection.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::task::JoinHandle;

use tether_common::models::adapter::{LinkStatus, NetworkAdapter};
use tether_common::{debug, error, info};

use crate::client::{CommandError, ConfigCommands};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("could not list network services: {0}")]
    Services(#[source] CommandError),
    #[error("could not read the service order: {0}")]
    DeviceMap(#[source] CommandError),
}

/// Process-wide view of the machine's network adapters.
pub struct AdapterDirectory {
    client: Arc<dyn ConfigCommands>,
    snapshot: RwLock<Vec<NetworkAdapter>>,
}

impl AdapterDirectory {
    pub fn new(client: Arc<dyn ConfigCommands>) -> Self {
        Self {
            client,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Rebuilds the snapshot from scratch.
    ///
    /// The service list and the service-to-device map are the two reads
    /// that must succeed; everything after them is per-service enrichment
    /// running as one task per service. Results are awaited in listing
    /// order, so the snapshot order is stable no matter which task
    /// finishes first.
    pub async fn refresh(&self) -> Result<Vec<NetworkAdapter>, DirectoryError> {
        let services = self
            .client
            .list_services()
            .await
            .map_err(DirectoryError::Services)?;
        let mut devices = self
            .client
            .list_service_device_map()
            .await
            .map_err(DirectoryError::DeviceMap)?;

        // Services missing from the order listing sometimes still show up
        // as hardware ports under the same name. Best effort; the service
        // name itself remains the identifier of last resort.
        match self.client.list_hardware_ports().await {
            Ok(ports) => {
                for port in ports {
                    devices.entry(port.name).or_insert(port.device);
                }
            }
            Err(e) => debug!(verbosity = 1, "Hardware port listing failed: {e}"),
        }

        info!(verbosity = 1, "Refreshing {} services", services.len());

        let handles: Vec<JoinHandle<NetworkAdapter>> = services
            .iter()
            .map(|service| {
                let client = Arc::clone(&self.client);
                let service = service.clone();
                let device = devices.get(&service).cloned();
                tokio::spawn(async move { enrich(client, service, device).await })
            })
            .collect();

        let mut adapters = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(adapter) => adapters.push(adapter),
                Err(e) => error!("Adapter enrichment task panicked: {e}"),
            }
        }

        *self.snapshot.write().unwrap() = adapters.clone();
        Ok(adapters)
    }

    /// Clone of the last successful refresh; empty before the first one.
    pub fn snapshot(&self) -> Vec<NetworkAdapter> {
        self.snapshot.read().unwrap().clone()
    }

    /// Adapters whose link was up at the last refresh. A pure filter over
    /// the snapshot; staleness is bounded by the caller's refresh cadence.
    pub fn connected_adapters(&self) -> Vec<NetworkAdapter> {
        self.snapshot
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.link == LinkStatus::Connected)
            .cloned()
            .collect()
    }

    /// Looks one adapter up by service name in the snapshot.
    pub fn find(&self, service: &str) -> Option<NetworkAdapter> {
        self.snapshot
            .read()
            .unwrap()
            .iter()
            .find(|a| a.service_name == service)
            .cloned()
    }
}

/// Collects one service's detail fields, degrading each to absent on
/// failure.
async fn enrich(
    client: Arc<dyn ConfigCommands>,
    service: String,
    device: Option<String>,
) -> NetworkAdapter {
    let mut adapter = NetworkAdapter::new(service, device);

    match client.ip_configuration(&adapter.service_name).await {
        Ok(mut config) => {
            match client.dns_servers(&adapter.service_name).await {
                Ok(servers) => config.dns_servers = servers,
                Err(e) => debug!(
                    verbosity = 1,
                    "DNS read failed for {}: {e}", adapter.service_name
                ),
            }
            adapter.config = Some(config);
        }
        Err(e) => debug!(
            verbosity = 1,
            "Configuration read failed for {}: {e}", adapter.service_name
        ),
    }

    let Some(device) = adapter.device.clone() else {
        return adapter;
    };

    match client.hardware_address(&device).await {
        Ok(mac) => adapter.hardware_address = mac,
        Err(e) => debug!(verbosity = 1, "MAC read failed for {device}: {e}"),
    }

    adapter.link = match client.link_active(&device).await {
        Ok(true) => LinkStatus::Connected,
        Ok(false) => LinkStatus::Disconnected,
        Err(e) => {
            debug!(verbosity = 1, "Link probe failed for {device}: {e}");
            LinkStatus::Unknown
        }
    };

    if adapter.is_wifi() {
        match client.current_wifi_network(&device).await {
            Ok(ssid) => adapter.wifi_network = ssid,
            Err(e) => debug!(verbosity = 1, "SSID read failed for {device}: {e}"),
        }
    }

    adapter
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
