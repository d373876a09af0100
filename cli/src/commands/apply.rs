// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use tether_common::models::ipconfig::IpConfiguration;

use crate::commands;
use crate::terminal::{format, print, print::Print};
use crate::tprint;

/// Pushes a configuration onto a service: static when an address was given,
/// DHCP otherwise. The previous configuration is backed up in-process before
/// the switch, so a failed experiment inside one invocation is reversible.
pub async fn apply(
    service: &str,
    ip: Option<&str>,
    subnet: Option<&str>,
    router: Option<&str>,
    dns: &[String],
) -> anyhow::Result<()> {
    let backend = commands::connect();
    let orchestrator = backend.orchestrator();

    // clap ties --subnet and --router to --ip, but the orchestrator still
    // validates the triple itself and names whichever field is missing.
    let config = match ip {
        Some(ip) => IpConfiguration::manual(
            ip,
            subnet.unwrap_or_default(),
            router.unwrap_or_default(),
        )
        .with_dns(dns.to_vec()),
        None => IpConfiguration::dhcp(),
    };

    Print::header("applying configuration");
    orchestrator.apply_configuration(&config, service).await?;

    if let Some(adapter) = backend.directory.find(service) {
        tprint!();
        print::tree_head(0, &adapter.to_string());
        print::as_tree(format::adapter_details(&adapter));
    }

    Ok(())
}
