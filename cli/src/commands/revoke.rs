// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use tether_common::{info, success};

use crate::commands;
use crate::terminal::print::Print;

/// Removes the passwordless allow-rule. Configuration changes keep working
/// afterwards, each behind its own admin prompt.
pub async fn revoke() -> anyhow::Result<()> {
    let backend = commands::connect();

    Print::header("privilege revoke");

    if !backend.gate.is_granted() {
        info!("No grant installed; nothing to revoke");
        return Ok(());
    }

    backend.gate.revoke().await?;
    success!("Changes will prompt for a password again");
    Ok(())
}
