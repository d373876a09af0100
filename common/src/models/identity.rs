// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Network Identity Model
//!
//! A compact fingerprint of "which network am I on right now". Two
//! identities comparing unequal is what the change monitor treats as a
//! network switch; the fingerprint is deliberately coarse so a DHCP lease
//! renewal on the same network does not register as a change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The network a machine is attached to, reduced to a comparable token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum NetworkIdentity {
    /// Joined to a wireless network; the SSID names it.
    Wifi { ssid: String },
    /// On a wired (or otherwise unnamed) network; the default route names it.
    Wired { interface: String, gateway: String },
}

impl NetworkIdentity {
    pub fn wifi(ssid: impl Into<String>) -> Self {
        Self::Wifi { ssid: ssid.into() }
    }

    pub fn wired(interface: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self::Wired {
            interface: interface.into(),
            gateway: gateway.into(),
        }
    }
}

impl fmt::Display for NetworkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wifi { ssid } => write!(f, "wifi:{ssid}"),
            Self::Wired { interface, gateway } => write!(f, "{interface}@{gateway}"),
        }
    }
}
