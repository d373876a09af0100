// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use tether_common::models::adapter::{LinkStatus, NetworkAdapter};
use tether_common::models::ipconfig::{IpConfiguration, IpMethod};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Plain-text glyph for a link state. Kept separate from the coloring so
/// head lines can measure the text before styling it.
pub fn link_glyph(link: LinkStatus) -> &'static str {
    match link {
        LinkStatus::Connected => "●",
        LinkStatus::Disconnected => "○",
        LinkStatus::Connecting | LinkStatus::Unknown => "◌",
    }
}

pub fn colorize_link(text: String, link: LinkStatus) -> ColoredString {
    match link {
        LinkStatus::Connected => text.green().bold(),
        LinkStatus::Disconnected => text.color(colors::SEPARATOR),
        LinkStatus::Connecting => text.yellow(),
        LinkStatus::Unknown => text.color(colors::SEPARATOR).dimmed(),
    }
}

pub fn method_to_detail(config: &IpConfiguration) -> Detail {
    let value: ColoredString = match config.method {
        IpMethod::Dhcp => "DHCP".color(colors::SECONDARY),
        IpMethod::Manual => "Manual".yellow().bold(),
        IpMethod::Off => "Off".color(colors::SEPARATOR),
    };
    ("Method".to_string(), value)
}

/// The IPv4 triple, one row per populated field.
pub fn address_details(config: &IpConfiguration) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    if let Some(address) = &config.address {
        details.push((
            "IPv4".to_string(),
            address.to_string().color(colors::IPV4_ADDR),
        ));
    }
    if let Some(mask) = &config.subnet_mask {
        details.push((
            "Subnet".to_string(),
            mask.to_string().color(colors::IPV4_PREFIX),
        ));
    }
    if let Some(router) = &config.router {
        details.push((
            "Router".to_string(),
            router.to_string().color(colors::IPV4_ADDR),
        ));
    }

    details
}

pub fn dns_to_detail(config: &IpConfiguration) -> Option<Detail> {
    if config.dns_servers.is_empty() {
        return None;
    }
    let joined = config.dns_servers.join(", ");
    Some(("DNS".to_string(), joined.color(colors::IPV4_ADDR)))
}

pub fn ipv6_to_detail(config: &IpConfiguration) -> Option<Detail> {
    let address = config.ipv6.address.as_ref()?;
    Some((
        "IPv6".to_string(),
        address.to_string().color(colors::IPV6_ADDR),
    ))
}

pub fn mac_to_detail(mac_opt: &Option<String>) -> Option<Detail> {
    mac_opt
        .as_ref()
        .map(|mac| ("MAC".to_string(), mac.to_string().color(colors::MAC_ADDR)))
}

pub fn wifi_to_detail(ssid_opt: &Option<String>) -> Option<Detail> {
    ssid_opt
        .as_ref()
        .map(|ssid| ("Network".to_string(), ssid.to_string().color(colors::SSID)))
}

/// Everything known about one adapter, in display order.
pub fn adapter_details(adapter: &NetworkAdapter) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    details.push((
        "Kind".to_string(),
        adapter.kind.display_name().color(colors::TEXT_DEFAULT),
    ));

    if let Some(config) = &adapter.config {
        details.push(method_to_detail(config));
        details.extend(address_details(config));

        if let Some(dns) = dns_to_detail(config) {
            details.push(dns);
        }
        if let Some(ipv6) = ipv6_to_detail(config) {
            details.push(ipv6);
        }
    }

    if let Some(wifi) = wifi_to_detail(&adapter.wifi_network) {
        details.push(wifi);
    }
    if let Some(mac) = mac_to_detail(&adapter.hardware_address) {
        details.push(mac);
    }

    details
}
