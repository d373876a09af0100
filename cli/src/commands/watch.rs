// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use async_trait::async_trait;

use tether_common::config::Config;
use tether_common::models::identity::NetworkIdentity;
use tether_common::{info, success, warn};
use tether_core::monitor::{ChangeHandler, LiveIdentitySource, NetworkChangeMonitor};
use tether_core::orchestrator::ConfigurationOrchestrator;

use crate::commands;
use crate::terminal::print::Print;

/// Runs the network-change monitor in the foreground until Ctrl-C.
///
/// The monitor only signals; what happens on a change is decided here.
/// Without `--auto-revert` each switch is merely announced. With it, every
/// adapter sitting on a manual address is swept back onto DHCP, on the
/// theory that a static address from the old network is useless on the new
/// one.
pub async fn watch(cfg: &Config) -> anyhow::Result<()> {
    let backend = commands::connect();

    Print::header("network watch");

    let source = Arc::new(LiveIdentitySource::new(backend.client.clone()));
    let handler: Arc<dyn ChangeHandler> = if cfg.auto_revert {
        warn!("Auto-revert is on: manual adapters reset to DHCP after each change");
        Arc::new(AutoRevertHandler {
            orchestrator: Arc::new(backend.orchestrator()),
        })
    } else {
        Arc::new(AnnouncingHandler)
    };

    let monitor = Arc::new(NetworkChangeMonitor::new(
        source,
        handler,
        cfg.poll_interval,
    ));
    monitor.start();
    info!(
        "Sampling every {:?}; press Ctrl-C to stop",
        cfg.poll_interval
    );

    tokio::signal::ctrl_c().await?;
    monitor.stop();

    success!("{} network change(s) observed", monitor.changes_seen());
    Ok(())
}

/// Reports a change and leaves the configuration alone.
struct AnnouncingHandler;

#[async_trait]
impl ChangeHandler for AnnouncingHandler {
    async fn on_network_change(&self, previous: &NetworkIdentity, current: &NetworkIdentity) {
        info!("Now on {current} (was {previous})");
    }
}

/// The opted-in recovery policy: sweep manual adapters back onto DHCP.
/// Per-adapter failures are logged inside the sweep, never raised.
struct AutoRevertHandler {
    orchestrator: Arc<ConfigurationOrchestrator>,
}

#[async_trait]
impl ChangeHandler for AutoRevertHandler {
    async fn on_network_change(&self, previous: &NetworkIdentity, current: &NetworkIdentity) {
        info!("Now on {current} (was {previous}); checking for manual adapters");
        let reset = self.orchestrator.reset_manual_adapters_to_dhcp().await;
        if reset == 0 {
            info!("No manual adapters to revert");
        }
    }
}
