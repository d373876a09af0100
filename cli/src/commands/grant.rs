// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use tether_common::{info, success};

use crate::commands;
use crate::terminal::print::Print;

/// Installs the scoped allow-rule behind a single admin prompt. From then
/// on every configuration change runs without asking for a password.
pub async fn grant() -> anyhow::Result<()> {
    let backend = commands::connect();

    Print::header("privilege grant");

    if backend.gate.is_granted() {
        success!("Already granted; configuration changes run without prompts");
        return Ok(());
    }

    info!("One admin prompt follows; afterwards changes run silently");
    backend.gate.perform_one_time_setup().await?;
    Ok(())
}
