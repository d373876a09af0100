// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use pnet::datalink::{self, NetworkInterface};

use crate::debug;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface is the loopback device.
    IsLoopback,
    /// The interface carries no addresses at all.
    NoAddress,
}

/// Checks whether an interface could plausibly carry traffic to a network.
pub fn is_viable(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.ips.is_empty() {
        return Err(ViabilityError::NoAddress);
    }

    Ok(())
}

/// Reachability gate: true when at least one viable interface exists.
///
/// This answers "are we attached to some network" without naming it; the
/// change monitor uses it to decide whether identity sampling is worth
/// doing at all.
pub fn has_network_path() -> bool {
    let satisfied = datalink::interfaces()
        .iter()
        .any(|i| is_viable(i).is_ok());

    if !satisfied {
        debug!(verbosity = 2, "No viable interface; path not satisfied");
    }
    satisfied
}

/// Name of the interface most likely carrying the default route, when the
/// routing table cannot be asked directly. Wired-style `en*` names win over
/// everything else; ties break by listing order.
pub fn primary_interface_name() -> Option<String> {
    select_primary(&datalink::interfaces()).map(|i| i.name.clone())
}

fn select_primary(interfaces: &[NetworkInterface]) -> Option<&NetworkInterface> {
    let viable: Vec<&NetworkInterface> = interfaces
        .iter()
        .filter(|i| is_viable(i).is_ok())
        .collect();

    viable
        .iter()
        .find(|i| i.name.starts_with("en"))
        .or_else(|| viable.first())
        .copied()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
