// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Scrapers for the line-oriented output of the system utilities.
//!
//! Every function here is total: a line that matches no expected pattern is
//! skipped, never an error. The utilities interleave annotations, blank
//! lines and section trailers with the data, and their exact layout shifts
//! between OS releases, so tolerance is the contract.

use tether_common::models::ipconfig::{IpConfiguration, IpMethod};

use super::{DefaultRoute, HardwarePort};

/// Parses `-listallnetworkservices`.
///
/// Expected shape:
/// ```text
/// An asterisk (*) denotes that a network service is disabled.
/// Wi-Fi
/// *Bluetooth PAN
/// ```
/// The leading `*` marks a disabled service; the name is kept either way.
pub fn service_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("An asterisk"))
        .map(|line| line.trim_start_matches('*').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses `-listnetworkserviceorder` into ordered (service, device) pairs.
///
/// Expected shape, two lines per service:
/// ```text
/// (1) Wi-Fi
/// (Hardware Port: Wi-Fi, Device: en0)
///
/// (*) VPN (L2TP)
/// (Hardware Port: L2TP, Device: )
/// ```
/// A `(*)` index means disabled; the device field may be empty.
pub fn service_order(text: &str) -> Vec<(String, Option<String>)> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(service) = order_entry(line) else {
            continue;
        };
        let device = lines
            .get(i + 1)
            .and_then(|next| port_line_device(next))
            .flatten();
        entries.push((service, device));
    }
    entries
}

/// `(1) Wi-Fi` / `(*) Bluetooth PAN` → the service name.
fn order_entry(line: &str) -> Option<String> {
    let line = line.trim();
    let rest = line.strip_prefix('(')?;
    let close = rest.find(')')?;
    let index = &rest[..close];
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit() || c == '*') {
        return None;
    }
    let name = rest[close + 1..].trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// `(Hardware Port: Wi-Fi, Device: en0)` → `Some(Some("en0"))`;
/// an empty device field → `Some(None)`; anything else → `None`.
fn port_line_device(line: &str) -> Option<Option<String>> {
    let line = line.trim();
    let inner = line.strip_prefix("(Hardware Port:")?.strip_suffix(')')?;
    let (_, device) = inner.split_once("Device:")?;
    let device = device.trim();
    Some((!device.is_empty()).then(|| device.to_string()))
}

/// Parses `-listallhardwareports`.
///
/// Blocks of three lines separated by blanks, with a VLAN section trailing:
/// ```text
/// Hardware Port: Wi-Fi
/// Device: en0
/// Ethernet Address: f0:18:98:0a:0b:0c
/// ```
pub fn hardware_ports(text: &str) -> Vec<HardwarePort> {
    let mut ports = Vec::new();
    let mut name: Option<String> = None;
    let mut device: Option<String> = None;
    let mut address: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(n) = line.strip_prefix("Hardware Port:") {
            flush_port(&mut ports, name.take(), device.take(), address.take());
            name = Some(n.trim().to_string());
        } else if let Some(d) = line.strip_prefix("Device:") {
            let d = d.trim();
            device = (!d.is_empty()).then(|| d.to_string());
        } else if let Some(a) = line.strip_prefix("Ethernet Address:") {
            address = mac_token(a);
        }
    }
    flush_port(&mut ports, name, device, address);
    ports
}

fn flush_port(
    ports: &mut Vec<HardwarePort>,
    name: Option<String>,
    device: Option<String>,
    address: Option<String>,
) {
    if let (Some(name), Some(device)) = (name, device) {
        ports.push(HardwarePort {
            name,
            device,
            ethernet_address: address,
        });
    }
}

/// Parses `-getinfo <service>`.
///
/// ```text
/// DHCP Configuration
/// IP address: 192.168.1.50
/// Subnet mask: 255.255.255.0
/// Router: 192.168.1.1
/// IPv6: Automatic
/// IPv6 IP address: none
/// IPv6 Router: none
/// ```
/// The method marker line decides dhcp vs manual; absent markers leave the
/// default (dhcp). Literal `none` and empty values read as absent.
pub fn ip_configuration(text: &str) -> IpConfiguration {
    let mut config = IpConfiguration::default();

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("DHCP Configuration") {
            config.method = IpMethod::Dhcp;
        } else if line.starts_with("Manual Configuration") {
            config.method = IpMethod::Manual;
        } else if let Some(v) = line.strip_prefix("IP address:") {
            config.address = value(v);
        } else if let Some(v) = line.strip_prefix("Subnet mask:") {
            config.subnet_mask = value(v);
        } else if let Some(v) = line.strip_prefix("Router:") {
            config.router = value(v);
        } else if let Some(v) = line.strip_prefix("IPv6 IP address:") {
            config.ipv6.address = value(v);
        } else if let Some(v) = line.strip_prefix("IPv6 Router:") {
            config.ipv6.router = value(v);
        } else if let Some(v) = line.strip_prefix("IPv6:") {
            config.ipv6.method = value(v);
        }
    }
    config
}

fn value(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty() && !raw.eq_ignore_ascii_case("none")).then(|| raw.to_string())
}

/// Parses `-getdnsservers <service>`: one server per line, or a sentence
/// saying none are set. Lines with spaces are messages, not servers.
pub fn dns_servers(text: &str) -> Vec<String> {
    if text.contains("aren't any DNS Servers") {
        return Vec::new();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(' '))
        .map(str::to_string)
        .collect()
}

/// Parses `-getmacaddress <device>`:
/// `Ethernet Address: f0:18:98:0a:0b:0c (Device: en0)`. `N/A` means the
/// device has no hardware address.
pub fn hardware_address(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.trim().strip_prefix("Ethernet Address:"))
        .and_then(mac_token)
}

fn mac_token(raw: &str) -> Option<String> {
    let token = raw.trim().split_whitespace().next()?;
    if token.eq_ignore_ascii_case("n/a") || token == "(null)" {
        None
    } else {
        Some(token.to_string())
    }
}

/// Scans an `ifconfig <device>` dump for the active-status token.
pub fn link_active(text: &str) -> bool {
    text.contains("status: active")
}

/// Parses `-getairportnetwork <device>`. The "not associated" sentence has
/// no recognized prefix and falls through to `None`.
pub fn wifi_network(text: &str) -> Option<String> {
    const PREFIXES: [&str; 2] = ["Current Wi-Fi Network:", "Current AirPort Network:"];

    for line in text.lines() {
        let line = line.trim();
        for prefix in PREFIXES {
            if let Some(name) = line.strip_prefix(prefix) {
                let name = name.trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }
    None
}

/// Parses `route -n get default`:
/// ```text
///    route to: default
///     gateway: 192.168.1.1
///   interface: en0
/// ```
/// Both the gateway and interface lines must be present.
pub fn default_route(text: &str) -> Option<DefaultRoute> {
    let mut gateway = None;
    let mut interface = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(v) = line.strip_prefix("gateway:") {
            gateway = value(v);
        } else if let Some(v) = line.strip_prefix("interface:") {
            interface = value(v);
        }
    }

    Some(DefaultRoute {
        gateway: gateway?,
        interface: interface?,
    })
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_list_strips_the_header_and_disabled_markers() {
        let text = "An asterisk (*) denotes that a network service is disabled.\n\
                    iPhone USB\n\
                    Wi-Fi\n\
                    *Bluetooth PAN\n\
                    Thunderbolt Bridge\n";
        assert_eq!(
            service_list(text),
            vec!["iPhone USB", "Wi-Fi", "Bluetooth PAN", "Thunderbolt Bridge"]
        );
    }

    #[test]
    fn service_list_of_garbage_is_empty() {
        assert_eq!(service_list(""), Vec::<String>::new());
        assert_eq!(
            service_list("An asterisk (*) denotes that a network service is disabled.\n\n"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn service_order_pairs_names_with_devices() {
        let text = "An asterisk (*) denotes that a network service is disabled.\n\
                    (1) iPhone USB\n\
                    (Hardware Port: iPhone USB, Device: en3)\n\
                    \n\
                    (2) Wi-Fi\n\
                    (Hardware Port: Wi-Fi, Device: en0)\n\
                    \n\
                    (*) Bluetooth PAN\n\
                    (Hardware Port: Bluetooth PAN, Device: en4)\n";

        assert_eq!(
            service_order(text),
            vec![
                ("iPhone USB".to_string(), Some("en3".to_string())),
                ("Wi-Fi".to_string(), Some("en0".to_string())),
                ("Bluetooth PAN".to_string(), Some("en4".to_string())),
            ]
        );
    }

    #[test]
    fn service_order_keeps_services_without_a_device() {
        let text = "(3) VPN (L2TP)\n(Hardware Port: L2TP, Device: )\n";
        assert_eq!(service_order(text), vec![("VPN (L2TP)".to_string(), None)]);
    }

    #[test]
    fn service_order_skips_lines_that_match_nothing() {
        let text = "some banner\n(not an index) Thing\n(12 unbalanced\n(4) Real Service\n";
        assert_eq!(
            service_order(text),
            vec![("Real Service".to_string(), None)]
        );
    }

    #[test]
    fn hardware_ports_reads_blocks_and_ignores_the_vlan_trailer() {
        let text = "Hardware Port: Wi-Fi\n\
                    Device: en0\n\
                    Ethernet Address: f0:18:98:0a:0b:0c\n\
                    \n\
                    Hardware Port: Thunderbolt 1\n\
                    Device: en1\n\
                    Ethernet Address: N/A\n\
                    \n\
                    VLAN Configurations\n\
                    ===================\n";

        let ports = hardware_ports(text);
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name, "Wi-Fi");
        assert_eq!(ports[0].device, "en0");
        assert_eq!(ports[0].ethernet_address.as_deref(), Some("f0:18:98:0a:0b:0c"));
        assert_eq!(ports[1].name, "Thunderbolt 1");
        assert_eq!(ports[1].ethernet_address, None);
    }

    #[test]
    fn ip_configuration_reads_a_dhcp_lease() {
        let text = "DHCP Configuration\n\
                    IP address: 192.168.1.50\n\
                    Subnet mask: 255.255.255.0\n\
                    Router: 192.168.1.1\n\
                    Client ID: \n\
                    IPv6: Automatic\n\
                    IPv6 IP address: none\n\
                    IPv6 Router: none\n\
                    Wi-Fi ID: f0:18:98:0a:0b:0c\n";

        let config = ip_configuration(text);
        assert_eq!(config.method, IpMethod::Dhcp);
        assert_eq!(config.address.as_deref(), Some("192.168.1.50"));
        assert_eq!(config.subnet_mask.as_deref(), Some("255.255.255.0"));
        assert_eq!(config.router.as_deref(), Some("192.168.1.1"));
        assert_eq!(config.ipv6.method.as_deref(), Some("Automatic"));
        assert_eq!(config.ipv6.address, None);
        assert_eq!(config.ipv6.router, None);
    }

    #[test]
    fn ip_configuration_reads_a_manual_assignment() {
        let text = "Manual Configuration\n\
                    IP address: 10.0.1.40\n\
                    Subnet mask: 255.255.255.0\n\
                    Router: 10.0.1.1\n";

        let config = ip_configuration(text);
        assert_eq!(config.method, IpMethod::Manual);
        assert_eq!(config.address.as_deref(), Some("10.0.1.40"));
    }

    #[test]
    fn ip_configuration_without_markers_defaults_to_dhcp() {
        let config = ip_configuration("IP address: 172.16.0.9\n");
        assert_eq!(config.method, IpMethod::Dhcp);
        assert_eq!(config.address.as_deref(), Some("172.16.0.9"));
    }

    #[test]
    fn dns_servers_reads_one_per_line() {
        assert_eq!(
            dns_servers("8.8.8.8\n1.1.1.1\n"),
            vec!["8.8.8.8", "1.1.1.1"]
        );
    }

    #[test]
    fn dns_servers_treats_the_none_set_message_as_empty() {
        let text = "There aren't any DNS Servers set on Wi-Fi.\n";
        assert_eq!(dns_servers(text), Vec::<String>::new());
    }

    #[test]
    fn hardware_address_reads_the_mac_and_tolerates_na() {
        let text = "Ethernet Address: f0:18:98:0a:0b:0c (Device: en0)\n";
        assert_eq!(hardware_address(text).as_deref(), Some("f0:18:98:0a:0b:0c"));

        assert_eq!(hardware_address("Ethernet Address: N/A (Device: en7)\n"), None);
        assert_eq!(hardware_address("nonsense\n"), None);
    }

    #[test]
    fn link_active_matches_only_the_active_token() {
        let active = "en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500\n\
                      \tstatus: active\n";
        let inactive = "en5: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500\n\
                        \tstatus: inactive\n";

        assert!(link_active(active));
        assert!(!link_active(inactive));
        assert!(!link_active("lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST>\n"));
    }

    #[test]
    fn wifi_network_reads_the_ssid() {
        assert_eq!(
            wifi_network("Current Wi-Fi Network: HomeNet\n").as_deref(),
            Some("HomeNet")
        );
        assert_eq!(
            wifi_network("Current AirPort Network: Legacy Net\n").as_deref(),
            Some("Legacy Net")
        );
        assert_eq!(
            wifi_network("You are not associated with an AirPort network.\n"),
            None
        );
    }

    #[test]
    fn default_route_needs_both_fields() {
        let text = "   route to: default\n\
                    destination: default\n\
                    \x20      mask: default\n\
                    \x20   gateway: 192.168.1.1\n\
                    \x20 interface: en0\n\
                    \x20     flags: <UP,GATEWAY,DONE,STATIC,PRCLO>\n";

        assert_eq!(
            default_route(text),
            Some(DefaultRoute {
                gateway: "192.168.1.1".to_string(),
                interface: "en0".to_string(),
            })
        );

        assert_eq!(default_route("gateway: 192.168.1.1\n"), None);
        assert_eq!(default_route(""), None);
    }
}
