// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

//! The auto-revert policy end to end: a network switch observed by the
//! monitor triggers the orchestrator sweep, and only adapters in manual
//! mode get touched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tether_common::models::identity::NetworkIdentity;
use tether_common::models::ipconfig::{IpConfiguration, IpMethod};
use tether_core::client::testing::FakeClient;
use tether_core::directory::AdapterDirectory;
use tether_core::monitor::{ChangeHandler, NetworkChangeMonitor};
use tether_core::orchestrator::ConfigurationOrchestrator;

/// Stand-in for the CLI's opted-in policy handler.
struct RevertPolicy {
    orchestrator: Arc<ConfigurationOrchestrator>,
}

#[async_trait]
impl ChangeHandler for RevertPolicy {
    async fn on_network_change(&self, _previous: &NetworkIdentity, _current: &NetworkIdentity) {
        self.orchestrator.reset_manual_adapters_to_dhcp().await;
    }
}

struct Rig {
    client: Arc<FakeClient>,
    monitor: Arc<NetworkChangeMonitor>,
}

fn rig() -> Rig {
    let client = Arc::new(
        FakeClient::new()
            .with_service("Wi-Fi", Some("en0"))
            .with_service("Ethernet", Some("en5"))
            .with_config(
                "Wi-Fi",
                IpConfiguration::manual("192.168.1.50", "255.255.255.0", "192.168.1.1"),
            )
            .with_config("Ethernet", IpConfiguration::dhcp())
            .with_link("en0", true)
            .with_link("en5", true),
    );
    let directory = Arc::new(AdapterDirectory::new(client.clone()));
    let orchestrator = Arc::new(ConfigurationOrchestrator::new(
        client.clone(),
        directory.clone(),
    ));

    // The identity source is irrelevant here; samples are fed by hand.
    struct NoSource;
    #[async_trait]
    impl tether_core::monitor::IdentitySource for NoSource {
        async fn current_identity(&self) -> Option<NetworkIdentity> {
            None
        }
    }

    let monitor = Arc::new(NetworkChangeMonitor::new(
        Arc::new(NoSource),
        Arc::new(RevertPolicy { orchestrator }),
        Duration::from_millis(10),
    ));

    Rig { client, monitor }
}

#[tokio::test]
async fn a_network_switch_reverts_manual_adapters_to_dhcp() {
    let rig = rig();

    rig.monitor.observe(Some(NetworkIdentity::wifi("Home"))).await;
    rig.monitor.observe(Some(NetworkIdentity::wifi("Home"))).await;
    rig.monitor.observe(Some(NetworkIdentity::wifi("Cafe"))).await;

    assert_eq!(rig.monitor.changes_seen(), 1);
    assert_eq!(
        rig.client.current_config("Wi-Fi").unwrap().method,
        IpMethod::Dhcp
    );
    // Ethernet was already on DHCP and saw no mutation at all.
    assert_eq!(
        rig.client.current_config("Ethernet").unwrap().method,
        IpMethod::Dhcp
    );
    let touched_ethernet = rig
        .client
        .mutation_calls()
        .iter()
        .any(|c| format!("{c:?}").contains("Ethernet"));
    assert!(!touched_ethernet);
}

#[tokio::test]
async fn rejoining_the_same_network_after_a_gap_reverts_nothing() {
    let rig = rig();

    rig.monitor.observe(Some(NetworkIdentity::wifi("Home"))).await;
    rig.monitor.observe(None).await;
    rig.monitor.observe(Some(NetworkIdentity::wifi("Home"))).await;

    assert_eq!(rig.monitor.changes_seen(), 0);
    assert!(rig.client.mutation_calls().is_empty());
    assert_eq!(
        rig.client.current_config("Wi-Fi").unwrap().method,
        IpMethod::Manual
    );
}
