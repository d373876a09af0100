// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # IP Configuration Model
//!
//! Describes how an adapter gets its IPv4 address: leased via DHCP or
//! assigned manually. Address fields stay raw strings on purpose; they are
//! scraped from (and fed back into) the configuration utility verbatim, and
//! the utility is the authority on what it accepts. The IPv6 block is
//! carried through without any validation at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The IPv4 assignment method of an adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpMethod {
    /// Address leased from a DHCP server.
    #[default]
    Dhcp,
    /// Statically assigned address/mask/router.
    Manual,
    /// IPv4 disabled on the service.
    Off,
}

impl fmt::Display for IpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dhcp => write!(f, "DHCP"),
            Self::Manual => write!(f, "Manual"),
            Self::Off => write!(f, "Off"),
        }
    }
}

/// Raw IPv6 fields as reported by the configuration utility.
///
/// Passed through untouched; nothing in this workspace interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6Configuration {
    pub method: Option<String>,
    pub address: Option<String>,
    pub router: Option<String>,
}

impl Ipv6Configuration {
    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.address.is_none() && self.router.is_none()
    }
}

/// A full per-service IP configuration, as read from or written to the
/// configuration utility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub method: IpMethod,

    /// Dotted-quad IPv4 address. Present when `method` is `Manual`, or read
    /// back from a live lease when `Dhcp`.
    pub address: Option<String>,
    pub subnet_mask: Option<String>,
    pub router: Option<String>,

    /// DNS servers configured on the service. Empty means "none set"
    /// (DHCP-provided servers do not show up here).
    pub dns_servers: Vec<String>,

    pub ipv6: Ipv6Configuration,
}

impl IpConfiguration {
    /// A plain DHCP configuration with no DNS overrides.
    pub fn dhcp() -> Self {
        Self::default()
    }

    /// A manual configuration with the three mandatory fields set.
    pub fn manual(
        address: impl Into<String>,
        subnet_mask: impl Into<String>,
        router: impl Into<String>,
    ) -> Self {
        Self {
            method: IpMethod::Manual,
            address: Some(address.into()),
            subnet_mask: Some(subnet_mask.into()),
            router: Some(router.into()),
            dns_servers: Vec::new(),
            ipv6: Ipv6Configuration::default(),
        }
    }

    pub fn with_dns(mut self, servers: Vec<String>) -> Self {
        self.dns_servers = servers;
        self
    }

    /// Returns the manual address triple, or the name of the first field
    /// that is missing or empty.
    ///
    /// A manual switch must never reach the configuration utility with a
    /// hole in it; absence is an input error, not a silent default.
    pub fn manual_fields(&self) -> Result<(&str, &str, &str), &'static str> {
        let address = non_empty(&self.address).ok_or("address")?;
        let subnet_mask = non_empty(&self.subnet_mask).ok_or("subnet mask")?;
        let router = non_empty(&self.router).ok_or("router")?;
        Ok((address, subnet_mask, router))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
