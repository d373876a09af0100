// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration Utility Client
//!
//! Typed operations over the system utilities. The rest of the workspace
//! talks to the [`ConfigCommands`] trait and never sees a line of utility
//! output; all scraping lives in [`parse`] as pure functions. Queries run
//! unprivileged, mutations pick their path through the privilege gate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use tether_common::debug;
use tether_common::models::ipconfig::IpConfiguration;

use crate::command::{ExecError, Output, Runner};
use crate::privilege::PrivilegeGate;

mod parse;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub const NETWORKSETUP: &str = "/usr/sbin/networksetup";
pub const IFCONFIG: &str = "/sbin/ifconfig";
pub const ROUTE: &str = "/sbin/route";

/// Sentinel `networksetup` takes for "no DNS servers at all". Omitting the
/// call would read as "leave them alone", which is a different thing.
pub const DNS_CLEAR_SENTINEL: &str = "Empty";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// The subprocess ran and exited non-zero; the combined output rides
    /// along for diagnosis.
    #[error("`{program} {}` failed with code {code}: {output}", args.join(" "))]
    Failed {
        program: String,
        args: Vec<String>,
        code: i32,
        output: String,
    },
}

/// One block of `-listallhardwareports` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwarePort {
    pub name: String,
    pub device: String,
    pub ethernet_address: Option<String>,
}

/// The system's current default route, from `route -n get default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRoute {
    pub gateway: String,
    pub interface: String,
}

/// Typed query and mutation surface of the configuration utility.
///
/// This is the seam the directory, orchestrator and monitor depend on;
/// tests substitute a scripted implementation here instead of faking
/// subprocess transcripts everywhere.
#[async_trait]
pub trait ConfigCommands: Send + Sync {
    async fn list_services(&self) -> Result<Vec<String>, CommandError>;
    async fn list_service_device_map(&self) -> Result<HashMap<String, String>, CommandError>;
    async fn list_hardware_ports(&self) -> Result<Vec<HardwarePort>, CommandError>;
    async fn ip_configuration(&self, service: &str) -> Result<IpConfiguration, CommandError>;
    async fn dns_servers(&self, service: &str) -> Result<Vec<String>, CommandError>;
    async fn hardware_address(&self, device: &str) -> Result<Option<String>, CommandError>;
    async fn link_active(&self, device: &str) -> Result<bool, CommandError>;
    async fn current_wifi_network(&self, device: &str) -> Result<Option<String>, CommandError>;
    async fn default_route(&self) -> Result<Option<DefaultRoute>, CommandError>;

    async fn set_dhcp(&self, service: &str) -> Result<(), CommandError>;
    async fn set_manual(
        &self,
        service: &str,
        ip: &str,
        mask: &str,
        router: &str,
    ) -> Result<(), CommandError>;
    async fn set_dns_servers(&self, service: &str, servers: &[String]) -> Result<(), CommandError>;
}

/// The real client, driving `networksetup` and friends.
#[derive(Clone)]
pub struct NetworkSetupClient {
    runner: Arc<dyn Runner>,
    gate: PrivilegeGate,
}

impl NetworkSetupClient {
    pub fn new(runner: Arc<dyn Runner>, gate: PrivilegeGate) -> Self {
        Self { runner, gate }
    }

    async fn query(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let args = own(args);
        let output = self.runner.run(program, &args).await?;
        if output.success() {
            Ok(output.text)
        } else {
            Err(failed(program, args, output))
        }
    }

    /// Runs one mutating `networksetup` subcommand through the grant-aware
    /// execution path.
    async fn mutate(&self, args: &[&str]) -> Result<(), CommandError> {
        let args = own(args);
        let (program, wrapped) = self.gate.wrap(NETWORKSETUP, &args);
        debug!(verbosity = 1, "mutation path: {program}");

        let output = self.runner.run(&program, &wrapped).await?;
        if output.success() {
            Ok(())
        } else {
            Err(failed(&program, wrapped, output))
        }
    }
}

fn own(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn failed(program: &str, args: Vec<String>, output: Output) -> CommandError {
    CommandError::Failed {
        program: program.to_string(),
        args,
        code: output.code,
        output: output.text,
    }
}

#[async_trait]
impl ConfigCommands for NetworkSetupClient {
    async fn list_services(&self) -> Result<Vec<String>, CommandError> {
        let text = self
            .query(NETWORKSETUP, &["-listallnetworkservices"])
            .await?;
        Ok(parse::service_list(&text))
    }

    async fn list_service_device_map(&self) -> Result<HashMap<String, String>, CommandError> {
        let text = self
            .query(NETWORKSETUP, &["-listnetworkserviceorder"])
            .await?;
        Ok(parse::service_order(&text)
            .into_iter()
            .filter_map(|(service, device)| Some((service, device?)))
            .collect())
    }

    async fn list_hardware_ports(&self) -> Result<Vec<HardwarePort>, CommandError> {
        let text = self.query(NETWORKSETUP, &["-listallhardwareports"]).await?;
        Ok(parse::hardware_ports(&text))
    }

    async fn ip_configuration(&self, service: &str) -> Result<IpConfiguration, CommandError> {
        let text = self.query(NETWORKSETUP, &["-getinfo", service]).await?;
        Ok(parse::ip_configuration(&text))
    }

    async fn dns_servers(&self, service: &str) -> Result<Vec<String>, CommandError> {
        let text = self
            .query(NETWORKSETUP, &["-getdnsservers", service])
            .await?;
        Ok(parse::dns_servers(&text))
    }

    async fn hardware_address(&self, device: &str) -> Result<Option<String>, CommandError> {
        let text = self
            .query(NETWORKSETUP, &["-getmacaddress", device])
            .await?;
        Ok(parse::hardware_address(&text))
    }

    /// Physical link state comes from `ifconfig`, not the configuration
    /// utility; the latter does not report it.
    async fn link_active(&self, device: &str) -> Result<bool, CommandError> {
        let text = self.query(IFCONFIG, &[device]).await?;
        Ok(parse::link_active(&text))
    }

    async fn current_wifi_network(&self, device: &str) -> Result<Option<String>, CommandError> {
        let text = self
            .query(NETWORKSETUP, &["-getairportnetwork", device])
            .await?;
        Ok(parse::wifi_network(&text))
    }

    async fn default_route(&self) -> Result<Option<DefaultRoute>, CommandError> {
        let args = own(&["-n", "get", "default"]);
        let output = self.runner.run(ROUTE, &args).await?;
        // No default route makes `route` exit non-zero; that is an answer,
        // not an error.
        if !output.success() {
            return Ok(None);
        }
        Ok(parse::default_route(&output.text))
    }

    async fn set_dhcp(&self, service: &str) -> Result<(), CommandError> {
        self.mutate(&["-setdhcp", service]).await
    }

    async fn set_manual(
        &self,
        service: &str,
        ip: &str,
        mask: &str,
        router: &str,
    ) -> Result<(), CommandError> {
        self.mutate(&["-setmanual", service, ip, mask, router])
            .await
    }

    async fn set_dns_servers(&self, service: &str, servers: &[String]) -> Result<(), CommandError> {
        let mut args = vec!["-setdnsservers", service];
        if servers.is_empty() {
            args.push(DNS_CLEAR_SENTINEL);
        } else {
            args.extend(servers.iter().map(String::as_str));
        }
        self.mutate(&args).await
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
