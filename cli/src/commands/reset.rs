// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::bail;
use tether_common::{success, warn};

use crate::commands;
use crate::terminal::print::Print;

/// Forces services back onto DHCP. The escape hatch for a static address
/// that no longer fits the network the machine landed on.
pub async fn reset(service: Option<&str>, all_manual: bool) -> anyhow::Result<()> {
    let backend = commands::connect();
    let orchestrator = backend.orchestrator();

    Print::header("dhcp reset");

    if all_manual {
        let count = orchestrator.reset_manual_adapters_to_dhcp().await;
        match count {
            0 => warn!("No adapters were in manual mode; nothing to reset"),
            n => success!("{n} adapter(s) back on DHCP"),
        }
        return Ok(());
    }

    // clap enforces this already; kept for callers going through the lib.
    let Some(service) = service else {
        bail!("a service name is required unless --all-manual is given");
    };

    orchestrator.emergency_reset_to_dhcp(service).await?;
    success!("{service} is back on DHCP with cleared DNS overrides");
    Ok(())
}
