// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Scripted stand-in for the configuration utility.
//!
//! [`FakeClient`] keeps a tiny simulated system: a service table that
//! mutations actually modify, so apply/restore flows can be asserted end
//! to end, plus a call log for tests that care about the exact command
//! sequence. Shared by the unit tests here and the integration-test crate
//! (via the `testing` feature).

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use tether_common::models::ipconfig::IpConfiguration;

use super::{CommandError, ConfigCommands, DefaultRoute, HardwarePort, NETWORKSETUP};

/// One recorded trait call, queries included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListServices,
    ListServiceDeviceMap,
    ListHardwarePorts,
    IpConfiguration { service: String },
    DnsServers { service: String },
    HardwareAddress { device: String },
    LinkActive { device: String },
    CurrentWifiNetwork { device: String },
    DefaultRoute,
    SetDhcp { service: String },
    SetManual { service: String, ip: String, mask: String, router: String },
    SetDnsServers { service: String, servers: Vec<String> },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::SetDhcp { .. } | Call::SetManual { .. } | Call::SetDnsServers { .. }
        )
    }
}

#[derive(Default)]
struct FakeState {
    services: Vec<(String, Option<String>)>,
    configs: HashMap<String, IpConfiguration>,
    links: HashMap<String, bool>,
    macs: HashMap<String, String>,
    wifi: HashMap<String, String>,
    route: Option<DefaultRoute>,
    fail_listings: bool,
    fail_info: HashSet<String>,
    fail_mutations: bool,
}

#[derive(Default)]
pub struct FakeClient {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(self, name: &str, device: Option<&str>) -> Self {
        self.state
            .lock()
            .unwrap()
            .services
            .push((name.to_string(), device.map(str::to_string)));
        self
    }

    pub fn with_config(self, service: &str, config: IpConfiguration) -> Self {
        self.state
            .lock()
            .unwrap()
            .configs
            .insert(service.to_string(), config);
        self
    }

    pub fn with_link(self, device: &str, active: bool) -> Self {
        self.state
            .lock()
            .unwrap()
            .links
            .insert(device.to_string(), active);
        self
    }

    pub fn with_mac(self, device: &str, mac: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .macs
            .insert(device.to_string(), mac.to_string());
        self
    }

    pub fn with_wifi_network(self, device: &str, ssid: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .wifi
            .insert(device.to_string(), ssid.to_string());
        self
    }

    pub fn with_route(self, gateway: &str, interface: &str) -> Self {
        self.state.lock().unwrap().route = Some(DefaultRoute {
            gateway: gateway.to_string(),
            interface: interface.to_string(),
        });
        self
    }

    /// Makes the top-level listings fail, aborting any refresh.
    pub fn failing_listings(self) -> Self {
        self.state.lock().unwrap().fail_listings = true;
        self
    }

    /// Makes detail reads for one service fail while the rest keep working.
    pub fn failing_info_for(self, service: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_info
            .insert(service.to_string());
        self
    }

    pub fn failing_mutations(self) -> Self {
        self.state.lock().unwrap().fail_mutations = true;
        self
    }

    /// Flips mutations into failure mode on an already-shared fake, for
    /// tests that need a working phase followed by a broken one.
    pub fn start_failing_mutations(&self) {
        self.state.lock().unwrap().fail_mutations = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// The service's configuration as the simulated system currently
    /// holds it.
    pub fn current_config(&self, service: &str) -> Option<IpConfiguration> {
        self.state.lock().unwrap().configs.get(service).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(&self, detail: &str) -> CommandError {
        CommandError::Failed {
            program: NETWORKSETUP.to_string(),
            args: Vec::new(),
            code: 1,
            output: format!("scripted failure: {detail}"),
        }
    }
}

#[async_trait]
impl ConfigCommands for FakeClient {
    async fn list_services(&self) -> Result<Vec<String>, CommandError> {
        self.record(Call::ListServices);
        let state = self.state.lock().unwrap();
        if state.fail_listings {
            return Err(self.scripted_failure("list services"));
        }
        Ok(state.services.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn list_service_device_map(&self) -> Result<HashMap<String, String>, CommandError> {
        self.record(Call::ListServiceDeviceMap);
        let state = self.state.lock().unwrap();
        if state.fail_listings {
            return Err(self.scripted_failure("service order"));
        }
        Ok(state
            .services
            .iter()
            .filter_map(|(name, device)| Some((name.clone(), device.clone()?)))
            .collect())
    }

    async fn list_hardware_ports(&self) -> Result<Vec<HardwarePort>, CommandError> {
        self.record(Call::ListHardwarePorts);
        let state = self.state.lock().unwrap();
        Ok(state
            .services
            .iter()
            .filter_map(|(name, device)| {
                let device = device.clone()?;
                let ethernet_address = state.macs.get(&device).cloned();
                Some(HardwarePort {
                    name: name.clone(),
                    device,
                    ethernet_address,
                })
            })
            .collect())
    }

    async fn ip_configuration(&self, service: &str) -> Result<IpConfiguration, CommandError> {
        self.record(Call::IpConfiguration {
            service: service.to_string(),
        });
        let state = self.state.lock().unwrap();
        if state.fail_info.contains(service) {
            return Err(self.scripted_failure("getinfo"));
        }
        // The real `-getinfo` does not report DNS; that is a separate call.
        let mut config = state.configs.get(service).cloned().unwrap_or_default();
        config.dns_servers = Vec::new();
        Ok(config)
    }

    async fn dns_servers(&self, service: &str) -> Result<Vec<String>, CommandError> {
        self.record(Call::DnsServers {
            service: service.to_string(),
        });
        let state = self.state.lock().unwrap();
        if state.fail_info.contains(service) {
            return Err(self.scripted_failure("getdnsservers"));
        }
        Ok(state
            .configs
            .get(service)
            .map(|c| c.dns_servers.clone())
            .unwrap_or_default())
    }

    async fn hardware_address(&self, device: &str) -> Result<Option<String>, CommandError> {
        self.record(Call::HardwareAddress {
            device: device.to_string(),
        });
        Ok(self.state.lock().unwrap().macs.get(device).cloned())
    }

    async fn link_active(&self, device: &str) -> Result<bool, CommandError> {
        self.record(Call::LinkActive {
            device: device.to_string(),
        });
        let state = self.state.lock().unwrap();
        match state.links.get(device) {
            Some(active) => Ok(*active),
            None => Err(self.scripted_failure("ifconfig")),
        }
    }

    async fn current_wifi_network(&self, device: &str) -> Result<Option<String>, CommandError> {
        self.record(Call::CurrentWifiNetwork {
            device: device.to_string(),
        });
        Ok(self.state.lock().unwrap().wifi.get(device).cloned())
    }

    async fn default_route(&self) -> Result<Option<DefaultRoute>, CommandError> {
        self.record(Call::DefaultRoute);
        Ok(self.state.lock().unwrap().route.clone())
    }

    async fn set_dhcp(&self, service: &str) -> Result<(), CommandError> {
        self.record(Call::SetDhcp {
            service: service.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(self.scripted_failure("setdhcp"));
        }
        let config = state.configs.entry(service.to_string()).or_default();
        // A DHCP switch drops the static triple but, like the real
        // utility, leaves any manual DNS servers standing.
        *config = IpConfiguration {
            dns_servers: config.dns_servers.clone(),
            ..IpConfiguration::dhcp()
        };
        Ok(())
    }

    async fn set_manual(
        &self,
        service: &str,
        ip: &str,
        mask: &str,
        router: &str,
    ) -> Result<(), CommandError> {
        self.record(Call::SetManual {
            service: service.to_string(),
            ip: ip.to_string(),
            mask: mask.to_string(),
            router: router.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(self.scripted_failure("setmanual"));
        }
        let config = state.configs.entry(service.to_string()).or_default();
        *config = IpConfiguration {
            dns_servers: config.dns_servers.clone(),
            ..IpConfiguration::manual(ip, mask, router)
        };
        Ok(())
    }

    async fn set_dns_servers(&self, service: &str, servers: &[String]) -> Result<(), CommandError> {
        self.record(Call::SetDnsServers {
            service: service.to_string(),
            servers: servers.to_vec(),
        });
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(self.scripted_failure("setdnsservers"));
        }
        state
            .configs
            .entry(service.to_string())
            .or_default()
            .dns_servers = servers.to_vec();
        Ok(())
    }
}
