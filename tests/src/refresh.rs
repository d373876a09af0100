// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

//! A directory refresh driven through the real client and parsers, with the
//! subprocess layer replaced by canned utility transcripts. This is the
//! closest the suite gets to the live system without touching it.

use async_trait::async_trait;
use std::sync::Arc;

use tether_common::models::adapter::{AdapterKind, LinkStatus};
use tether_common::models::ipconfig::IpMethod;
use tether_core::client::{IFCONFIG, NETWORKSETUP, NetworkSetupClient};
use tether_core::command::{ExecError, Output, Runner};
use tether_core::directory::AdapterDirectory;
use tether_core::privilege::PrivilegeGate;

/// Answers every query with a transcript captured from a three-service
/// machine: Wi-Fi on DHCP with a joined network, a manually configured
/// Thunderbolt link that is unplugged, and a disabled Bluetooth service.
struct CannedSystem;

#[async_trait]
impl Runner for CannedSystem {
    async fn run(&self, program: &str, args: &[String]) -> Result<Output, ExecError> {
        let first = args.first().map(String::as_str).unwrap_or_default();
        let second = args.get(1).map(String::as_str).unwrap_or_default();

        let text: &str = match (program, first, second) {
            (NETWORKSETUP, "-listallnetworkservices", _) => {
                "An asterisk (*) denotes that a network service is disabled.\n\
                 Wi-Fi\n\
                 Thunderbolt Ethernet\n\
                 *Bluetooth PAN\n"
            }
            (NETWORKSETUP, "-listnetworkserviceorder", _) => {
                "An asterisk (*) denotes that a network service is disabled.\n\
                 (1) Wi-Fi\n\
                 (Hardware Port: Wi-Fi, Device: en0)\n\
                 \n\
                 (2) Thunderbolt Ethernet\n\
                 (Hardware Port: Thunderbolt Ethernet, Device: en5)\n\
                 \n\
                 (*) Bluetooth PAN\n\
                 (Hardware Port: Bluetooth PAN, Device: en7)\n"
            }
            (NETWORKSETUP, "-listallhardwareports", _) => {
                "Hardware Port: Wi-Fi\n\
                 Device: en0\n\
                 Ethernet Address: f0:18:98:0a:0b:0c\n\
                 \n\
                 Hardware Port: Thunderbolt Ethernet\n\
                 Device: en5\n\
                 Ethernet Address: f0:18:98:0a:0b:0d\n"
            }
            (NETWORKSETUP, "-getinfo", "Wi-Fi") => {
                "DHCP Configuration\n\
                 IP address: 192.168.1.50\n\
                 Subnet mask: 255.255.255.0\n\
                 Router: 192.168.1.1\n\
                 Client ID:\n\
                 IPv6: Automatic\n\
                 IPv6 IP address: none\n\
                 IPv6 Router: none\n\
                 Wi-Fi ID: f0:18:98:0a:0b:0c\n"
            }
            (NETWORKSETUP, "-getinfo", "Thunderbolt Ethernet") => {
                "Manual Configuration\n\
                 IP address: 10.0.0.40\n\
                 Subnet mask: 255.255.255.0\n\
                 Router: 10.0.0.1\n\
                 IPv6: Automatic\n\
                 IPv6 IP address: none\n\
                 IPv6 Router: none\n"
            }
            (NETWORKSETUP, "-getinfo", "Bluetooth PAN") => "DHCP Configuration\n",
            (NETWORKSETUP, "-getdnsservers", "Thunderbolt Ethernet") => "10.0.0.53\n",
            (NETWORKSETUP, "-getdnsservers", service) => {
                return Ok(ok(&format!(
                    "There aren't any DNS Servers set on {service}.\n"
                )));
            }
            (NETWORKSETUP, "-getmacaddress", "en0") => {
                "Ethernet Address: f0:18:98:0a:0b:0c (Device: en0)\n"
            }
            (NETWORKSETUP, "-getmacaddress", "en5") => {
                "Ethernet Address: f0:18:98:0a:0b:0d (Device: en5)\n"
            }
            (NETWORKSETUP, "-getmacaddress", _) => "Ethernet Address: N/A (Device: en7)\n",
            (NETWORKSETUP, "-getairportnetwork", "en0") => {
                "Current Wi-Fi Network: HomeNet\n"
            }
            (IFCONFIG, "en0", _) => {
                "en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500\n\
                 \tinet 192.168.1.50 netmask 0xffffff00 broadcast 192.168.1.255\n\
                 \tstatus: active\n"
            }
            (IFCONFIG, _, _) => {
                "en5: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500\n\
                 \tstatus: inactive\n"
            }
            _ => {
                return Ok(Output {
                    text: format!("unexpected command: {program} {}", args.join(" ")),
                    code: 1,
                });
            }
        };

        Ok(ok(text))
    }
}

fn ok(text: &str) -> Output {
    Output {
        text: text.to_string(),
        code: 0,
    }
}

fn directory() -> AdapterDirectory {
    let runner: Arc<dyn Runner> = Arc::new(CannedSystem);
    let gate = PrivilegeGate::new(runner.clone());
    let client = Arc::new(NetworkSetupClient::new(runner, gate));
    AdapterDirectory::new(client)
}

#[tokio::test]
async fn a_refresh_reconstructs_the_machine_from_transcripts() -> anyhow::Result<()> {
    let directory = directory();
    let adapters = directory.refresh().await?;

    assert_eq!(adapters.len(), 3);

    let wifi = &adapters[0];
    assert_eq!(wifi.id, "en0");
    assert_eq!(wifi.service_name, "Wi-Fi");
    assert_eq!(wifi.kind, AdapterKind::Wifi);
    assert_eq!(wifi.link, LinkStatus::Connected);
    assert_eq!(wifi.hardware_address.as_deref(), Some("f0:18:98:0a:0b:0c"));
    assert_eq!(wifi.wifi_network.as_deref(), Some("HomeNet"));
    let wifi_config = wifi.config.as_ref().expect("Wi-Fi config");
    assert_eq!(wifi_config.method, IpMethod::Dhcp);
    assert_eq!(wifi_config.address.as_deref(), Some("192.168.1.50"));
    assert!(wifi_config.dns_servers.is_empty());
    assert_eq!(wifi_config.ipv6.method.as_deref(), Some("Automatic"));
    assert_eq!(wifi_config.ipv6.address, None);

    let thunderbolt = &adapters[1];
    assert_eq!(thunderbolt.id, "en5");
    assert_eq!(thunderbolt.kind, AdapterKind::Thunderbolt);
    assert_eq!(thunderbolt.link, LinkStatus::Disconnected);
    let tb_config = thunderbolt.config.as_ref().expect("Thunderbolt config");
    assert_eq!(tb_config.method, IpMethod::Manual);
    assert_eq!(tb_config.address.as_deref(), Some("10.0.0.40"));
    assert_eq!(tb_config.router.as_deref(), Some("10.0.0.1"));
    assert_eq!(tb_config.dns_servers, vec!["10.0.0.53".to_string()]);

    // Disabled services still get a record; N/A reads as no address.
    let bluetooth = &adapters[2];
    assert_eq!(bluetooth.service_name, "Bluetooth PAN");
    assert_eq!(bluetooth.id, "en7");
    assert_eq!(bluetooth.hardware_address, None);
    assert_eq!(bluetooth.wifi_network, None);
    Ok(())
}

#[tokio::test]
async fn connected_filter_reflects_the_transcript_snapshot() -> anyhow::Result<()> {
    let directory = directory();
    directory.refresh().await?;

    let connected = directory.connected_adapters();
    assert_eq!(connected.len(), 1);
    assert_eq!(connected[0].service_name, "Wi-Fi");
    Ok(())
}
