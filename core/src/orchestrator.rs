// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration Orchestrator
//!
//! Applies configuration changes and owns the per-service backup map that
//! makes them reversible. The contract: every mutating entry point first
//! captures the outgoing configuration (best effort), the mutation itself
//! funnels through one shared path, and the directory is refreshed before
//! returning so callers observe the new state.
//!
//! Concurrent changes to two different services are independent. Two
//! concurrent changes to the same service are the caller's problem to
//! serialize; the map itself stays consistent either way.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use tether_common::models::backup::ConfigBackup;
use tether_common::models::ipconfig::{IpConfiguration, IpMethod};
use tether_common::{error, info, success, warn};

use crate::client::{CommandError, ConfigCommands};
use crate::directory::{AdapterDirectory, DirectoryError};

/// Public resolvers applied when a manual switch arrives with no DNS
/// servers; a manual interface must never be left resolver-less.
pub const FALLBACK_DNS: [&str; 2] = ["8.8.8.8", "1.1.1.1"];

#[derive(Debug, Error)]
pub enum NetworkError {
    /// Rejected before any subprocess ran.
    #[error("invalid configuration: missing {missing}")]
    InvalidConfiguration { missing: &'static str },
    #[error("no backup exists for service `{service}`")]
    NoBackupFound { service: String },
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub struct ConfigurationOrchestrator {
    client: Arc<dyn ConfigCommands>,
    directory: Arc<AdapterDirectory>,
    backups: Mutex<HashMap<String, ConfigBackup>>,
}

impl ConfigurationOrchestrator {
    pub fn new(client: Arc<dyn ConfigCommands>, directory: Arc<AdapterDirectory>) -> Self {
        Self {
            client,
            directory,
            backups: Mutex::new(HashMap::new()),
        }
    }

    /// Applies `config` to a service: validate, back up, mutate, refresh.
    ///
    /// Validation runs before anything touches a subprocess, so a caller
    /// holding an incomplete manual config gets the error without the
    /// system being queried at all.
    pub async fn apply_configuration(
        &self,
        config: &IpConfiguration,
        service: &str,
    ) -> Result<(), NetworkError> {
        validate(config)?;

        info!("Applying {} configuration to {service}", config.method);
        self.backup(service).await;
        self.push_configuration(config, service).await?;
        self.directory.refresh().await?;

        success!("{service} now uses {}", config.method);
        Ok(())
    }

    /// Single-adapter convenience: back up and lease an address again.
    pub async fn switch_to_dhcp(&self, service: &str) -> Result<(), NetworkError> {
        self.apply_configuration(&IpConfiguration::dhcp(), service)
            .await
    }

    /// Replays the service's backed-up configuration, then consumes the
    /// backup. With no backup on file this fails before any mutation.
    pub async fn restore_from_backup(&self, service: &str) -> Result<(), NetworkError> {
        let backup = self
            .backups
            .lock()
            .unwrap()
            .get(service)
            .cloned()
            .ok_or_else(|| NetworkError::NoBackupFound {
                service: service.to_string(),
            })?;

        info!(
            "Restoring {service} to its earlier {} configuration",
            backup.config.method
        );
        self.push_configuration(&backup.config, service).await?;

        // Consumed only once the replay stuck; a failed restore keeps the
        // backup around for another attempt.
        self.backups.lock().unwrap().remove(service);
        self.directory.refresh().await?;

        success!("{service} restored");
        Ok(())
    }

    /// Escape hatch: force a service back onto DHCP regardless of its
    /// current state. Takes a best-effort backup like every other
    /// mutation, but requires nothing to exist beforehand.
    pub async fn emergency_reset_to_dhcp(&self, service: &str) -> Result<(), NetworkError> {
        warn!("Emergency reset: {service} goes back to DHCP");
        self.backup(service).await;
        self.push_configuration(&IpConfiguration::dhcp(), service)
            .await?;
        self.directory.refresh().await?;
        Ok(())
    }

    /// Resets every adapter currently in manual mode back to DHCP.
    ///
    /// This is the hook the network-change watcher invokes when the
    /// auto-revert policy is on. Per-adapter failures are logged and the
    /// sweep continues; the return value is the number actually reset.
    pub async fn reset_manual_adapters_to_dhcp(&self) -> usize {
        let adapters = match self.directory.refresh().await {
            Ok(adapters) => adapters,
            Err(e) => {
                error!("Could not list adapters for the DHCP sweep: {e}");
                return 0;
            }
        };

        let mut reset = 0;
        for adapter in adapters {
            let manual = adapter
                .config
                .as_ref()
                .is_some_and(|c| c.method == IpMethod::Manual);
            if !manual {
                continue;
            }

            match self.emergency_reset_to_dhcp(&adapter.service_name).await {
                Ok(()) => {
                    success!("{} reset to DHCP", adapter.service_name);
                    reset += 1;
                }
                Err(e) => error!("Could not reset {}: {e}", adapter.service_name),
            }
        }
        reset
    }

    /// Whether a backup currently exists for the service.
    pub fn has_backup(&self, service: &str) -> bool {
        self.backups.lock().unwrap().contains_key(service)
    }

    /// Captures the current configuration into the backup map.
    ///
    /// Best effort on purpose: losing the ability to undo is preferable to
    /// blocking the change the user asked for, so a failed capture is
    /// logged and swallowed right here.
    async fn backup(&self, service: &str) {
        match self.capture(service).await {
            Ok(backup) => {
                self.backups
                    .lock()
                    .unwrap()
                    .insert(service.to_string(), backup);
            }
            Err(e) => warn!("Could not back up {service} before changing it: {e}"),
        }
    }

    async fn capture(&self, service: &str) -> Result<ConfigBackup, CommandError> {
        let mut config = self.client.ip_configuration(service).await?;
        config.dns_servers = self.client.dns_servers(service).await?;
        Ok(ConfigBackup::new(service, config))
    }

    /// The one mutation path. Every flow (apply, restore, resets) funnels
    /// through here so DNS handling cannot drift between them.
    async fn push_configuration(
        &self,
        config: &IpConfiguration,
        service: &str,
    ) -> Result<(), NetworkError> {
        match config.method {
            IpMethod::Dhcp => {
                self.client.set_dhcp(service).await?;
                // Always set DNS explicitly. A plain DHCP switch carries an
                // empty list and clears any stale manual entry that would
                // shadow the leased servers; a replayed backup carries the
                // captured list.
                self.client
                    .set_dns_servers(service, &config.dns_servers)
                    .await?;
            }
            IpMethod::Manual => {
                let (address, mask, router) = config
                    .manual_fields()
                    .map_err(|missing| NetworkError::InvalidConfiguration { missing })?;
                self.client
                    .set_manual(service, address, mask, router)
                    .await?;

                let servers: Vec<String> = if config.dns_servers.is_empty() {
                    FALLBACK_DNS.iter().map(|s| s.to_string()).collect()
                } else {
                    config.dns_servers.clone()
                };
                self.client.set_dns_servers(service, &servers).await?;
            }
            IpMethod::Off => {
                return Err(NetworkError::InvalidConfiguration {
                    missing: "a supported method (dhcp or manual)",
                });
            }
        }
        Ok(())
    }
}

fn validate(config: &IpConfiguration) -> Result<(), NetworkError> {
    match config.method {
        IpMethod::Dhcp => Ok(()),
        IpMethod::Manual => config
            .manual_fields()
            .map(|_| ())
            .map_err(|missing| NetworkError::InvalidConfiguration { missing }),
        IpMethod::Off => Err(NetworkError::InvalidConfiguration {
            missing: "a supported method (dhcp or manual)",
        }),
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
