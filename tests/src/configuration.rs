// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

//! Apply, restore and reset flows driven end to end: orchestrator and
//! directory over one shared scripted client, asserting what the simulated
//! system ends up holding rather than single-component behavior.

use std::sync::Arc;

use tether_common::models::adapter::LinkStatus;
use tether_common::models::ipconfig::{IpConfiguration, IpMethod};
use tether_core::client::testing::{Call, FakeClient};
use tether_core::directory::AdapterDirectory;
use tether_core::orchestrator::{ConfigurationOrchestrator, FALLBACK_DNS, NetworkError};

struct Rig {
    client: Arc<FakeClient>,
    directory: Arc<AdapterDirectory>,
    orchestrator: ConfigurationOrchestrator,
}

fn rig(client: FakeClient) -> Rig {
    let client = Arc::new(client);
    let directory = Arc::new(AdapterDirectory::new(client.clone()));
    let orchestrator = ConfigurationOrchestrator::new(client.clone(), directory.clone());
    Rig {
        client,
        directory,
        orchestrator,
    }
}

fn office() -> FakeClient {
    FakeClient::new()
        .with_service("Wi-Fi", Some("en0"))
        .with_service("Ethernet", Some("en5"))
        .with_config("Wi-Fi", IpConfiguration::dhcp())
        .with_config(
            "Ethernet",
            IpConfiguration::manual("10.0.0.40", "255.255.255.0", "10.0.0.1")
                .with_dns(vec!["10.0.0.53".to_string()]),
        )
        .with_link("en0", true)
        .with_link("en5", true)
}

#[tokio::test]
async fn a_manual_apply_is_visible_through_the_directory() -> anyhow::Result<()> {
    let rig = rig(office());

    let config = IpConfiguration::manual("192.168.1.50", "255.255.255.0", "192.168.1.1");
    rig.orchestrator.apply_configuration(&config, "Wi-Fi").await?;

    // The orchestrator refreshed; no extra refresh needed to observe.
    let adapter = rig.directory.find("Wi-Fi").expect("Wi-Fi in snapshot");
    let applied = adapter.config.expect("config enriched");
    assert_eq!(applied.method, IpMethod::Manual);
    assert_eq!(applied.address.as_deref(), Some("192.168.1.50"));
    assert_eq!(
        applied.dns_servers,
        FALLBACK_DNS.map(String::from).to_vec()
    );
    assert_eq!(adapter.link, LinkStatus::Connected);
    Ok(())
}

#[tokio::test]
async fn backups_for_different_services_are_independent() -> anyhow::Result<()> {
    let rig = rig(office());

    rig.orchestrator
        .apply_configuration(
            &IpConfiguration::manual("192.168.1.50", "255.255.255.0", "192.168.1.1"),
            "Wi-Fi",
        )
        .await?;
    rig.orchestrator.switch_to_dhcp("Ethernet").await?;

    // Restoring one service leaves the other's change and backup alone.
    rig.orchestrator.restore_from_backup("Ethernet").await?;

    let ethernet = rig.client.current_config("Ethernet").unwrap();
    assert_eq!(ethernet.method, IpMethod::Manual);
    assert_eq!(ethernet.address.as_deref(), Some("10.0.0.40"));
    assert_eq!(ethernet.dns_servers, vec!["10.0.0.53".to_string()]);

    let wifi = rig.client.current_config("Wi-Fi").unwrap();
    assert_eq!(wifi.method, IpMethod::Manual);
    assert_eq!(wifi.address.as_deref(), Some("192.168.1.50"));
    assert!(rig.orchestrator.has_backup("Wi-Fi"));
    Ok(())
}

#[tokio::test]
async fn an_emergency_reset_is_still_restorable() -> anyhow::Result<()> {
    let rig = rig(office());

    rig.orchestrator.emergency_reset_to_dhcp("Ethernet").await?;
    assert_eq!(
        rig.client.current_config("Ethernet").unwrap().method,
        IpMethod::Dhcp
    );

    // The reset captured a best-effort backup on the way in.
    rig.orchestrator.restore_from_backup("Ethernet").await?;
    let restored = rig.client.current_config("Ethernet").unwrap();
    assert_eq!(restored.method, IpMethod::Manual);
    assert_eq!(restored.address.as_deref(), Some("10.0.0.40"));

    let again = rig.orchestrator.restore_from_backup("Ethernet").await;
    assert!(matches!(again, Err(NetworkError::NoBackupFound { .. })));
    Ok(())
}

#[tokio::test]
async fn the_sweep_leaves_dhcp_and_unreadable_services_alone() -> anyhow::Result<()> {
    let rig = rig(office().with_service("VPN (L2TP)", None).failing_info_for("VPN (L2TP)"));

    let reset = rig.orchestrator.reset_manual_adapters_to_dhcp().await;

    // Only Ethernet was manual; the VPN's unreadable config degrades to
    // absent and is skipped rather than guessed at.
    assert_eq!(reset, 1);
    assert_eq!(
        rig.client.current_config("Ethernet").unwrap().method,
        IpMethod::Dhcp
    );
    let dhcp_sets = rig
        .client
        .mutation_calls()
        .iter()
        .filter(|c| matches!(c, Call::SetDhcp { .. }))
        .count();
    assert_eq!(dhcp_sets, 1);
    Ok(())
}
