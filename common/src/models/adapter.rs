// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Network Adapter Model
//!
//! A [`NetworkAdapter`] is one configurable network service as the system
//! configuration utility sees it: a user-visible service name, the BSD
//! device that backs it, and whatever detail enrichment managed to collect.
//! Enrichment is best effort, so every field beyond the two names is
//! optional and a partially-populated adapter is a normal sight, not a bug.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ipconfig::IpConfiguration;

/// Coarse adapter category, derived from the service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Wifi,
    Ethernet,
    Thunderbolt,
    Usb,
    Vpn,
    Other,
}

impl AdapterKind {
    /// Classifies a service by name.
    ///
    /// Composite names like "Thunderbolt Ethernet" or "USB 10/100/1000 LAN"
    /// match the more specific marker, so the checks run most-specific
    /// first and plain Ethernet is the late catch-all.
    pub fn from_service_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        if lowered.contains("wi-fi") || lowered.contains("wifi") || lowered.contains("airport") {
            Self::Wifi
        } else if lowered.contains("thunderbolt") {
            Self::Thunderbolt
        } else if lowered.contains("usb") {
            Self::Usb
        } else if lowered.contains("vpn") {
            Self::Vpn
        } else if lowered.contains("ethernet") || lowered.contains("lan") {
            Self::Ethernet
        } else {
            Self::Other
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Wifi => "Wi-Fi",
            Self::Ethernet => "Ethernet",
            Self::Thunderbolt => "Thunderbolt",
            Self::Usb => "USB",
            Self::Vpn => "VPN",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Link state of the backing device, probed via `ifconfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Connected,
    Disconnected,
    /// Mid-association; never produced by the probe, set by callers that
    /// overlay live state while a change is in flight.
    Connecting,
    /// The probe failed or the service has no backing device.
    #[default]
    Unknown,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One network service with its enrichment results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAdapter {
    /// Stable identifier: the BSD device name (`en0`), falling back to the
    /// service name for services without a device.
    pub id: String,
    /// User-visible service name (`Wi-Fi`), the key every configuration
    /// command takes.
    pub service_name: String,
    /// BSD device backing the service, when one exists.
    pub device: Option<String>,
    pub kind: AdapterKind,
    pub hardware_address: Option<String>,
    pub link: LinkStatus,
    /// Current IP configuration; `None` when the detail read failed.
    pub config: Option<IpConfiguration>,
    /// SSID the service is joined to. Only ever set for Wi-Fi adapters.
    pub wifi_network: Option<String>,
}

impl NetworkAdapter {
    pub fn new(service_name: impl Into<String>, device: Option<String>) -> Self {
        let service_name = service_name.into();
        let device = device.filter(|d| !d.is_empty());
        let id = device.clone().unwrap_or_else(|| service_name.clone());
        let kind = AdapterKind::from_service_name(&service_name);
        Self {
            id,
            service_name,
            device,
            kind,
            hardware_address: None,
            link: LinkStatus::Unknown,
            config: None,
            wifi_network: None,
        }
    }

    pub fn with_hardware_address(mut self, address: Option<String>) -> Self {
        self.hardware_address = address;
        self
    }

    pub fn with_link(mut self, link: LinkStatus) -> Self {
        self.link = link;
        self
    }

    pub fn with_config(mut self, config: Option<IpConfiguration>) -> Self {
        self.config = config;
        self
    }

    pub fn with_wifi_network(mut self, network: Option<String>) -> Self {
        self.wifi_network = network;
        self
    }

    pub fn is_wifi(&self) -> bool {
        self.kind == AdapterKind::Wifi
    }

    /// The address currently on the wire, regardless of how it got there.
    pub fn current_address(&self) -> Option<&str> {
        self.config.as_ref()?.address.as_deref()
    }
}

impl fmt::Display for NetworkAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.device {
            Some(device) => write!(f, "{} ({device})", self.service_name),
            None => write!(f, "{}", self.service_name),
        }
    }
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
    fn classifies_common_service_names() {
        assert_eq!(AdapterKind::from_service_name("Wi-Fi"), AdapterKind::Wifi);
        assert_eq!(AdapterKind::from_service_name("AirPort"), AdapterKind::Wifi);
        assert_eq!(
            AdapterKind::from_service_name("Ethernet"),
            AdapterKind::Ethernet
        );
        assert_eq!(
            AdapterKind::from_service_name("Thunderbolt Ethernet"),
            AdapterKind::Thunderbolt
        );
        assert_eq!(
            AdapterKind::from_service_name("USB 10/100/1000 LAN"),
            AdapterKind::Usb
        );
        assert_eq!(
            AdapterKind::from_service_name("Tailscale VPN"),
            AdapterKind::Vpn
        );
        assert_eq!(
            AdapterKind::from_service_name("iPhone USB"),
            AdapterKind::Usb
        );
        assert_eq!(
            AdapterKind::from_service_name("Bluetooth PAN"),
            AdapterKind::Other
        );
    }

    #[test]
    fn id_prefers_device_over_service_name() {
        let adapter = NetworkAdapter::new("Wi-Fi", Some("en0".into()));
        assert_eq!(adapter.id, "en0");

        let adapter = NetworkAdapter::new("Back to My Mac", None);
        assert_eq!(adapter.id, "Back to My Mac");

        // An empty device string counts as no device at all.
        let adapter = NetworkAdapter::new("VPN (L2TP)", Some(String::new()));
        assert_eq!(adapter.id, "VPN (L2TP)");
        assert!(adapter.device.is_none());
    }

    #[test]
    fn display_includes_device_when_present() {
        let adapter = NetworkAdapter::new("Wi-Fi", Some("en0".into()));
        assert_eq!(adapter.to_string(), "Wi-Fi (en0)");

        let adapter = NetworkAdapter::new("VPN (IPSec)", None);
        assert_eq!(adapter.to_string(), "VPN (IPSec)");
    }

    #[test]
    fn current_address_reads_through_config() {
        let adapter = NetworkAdapter::new("Ethernet", Some("en5".into()));
        assert_eq!(adapter.current_address(), None);

        let adapter = adapter.with_config(Some(IpConfiguration::manual(
            "10.0.0.2",
            "255.255.255.0",
            "10.0.0.1",
        )));
        assert_eq!(adapter.current_address(), Some("10.0.0.2"));
    }
}
