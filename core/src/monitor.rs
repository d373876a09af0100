// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Network Change Monitor
//!
//! Polls the machine's network identity and fires a handler when it lands
//! on a different network than before. Identity is the joined Wi-Fi SSID
//! when there is one, otherwise the default route's interface/gateway pair;
//! no viable interface means no identity at all.
//!
//! An identity gap (captive portal negotiation, DHCP renewal, lid close)
//! clears the remembered identity instead of firing, so flapping on and off
//! the same network never counts as a change.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use tether_common::models::identity::NetworkIdentity;
use tether_common::{debug, info, interface};

use crate::client::ConfigCommands;

/// Where identity samples come from. The live implementation shells out;
/// tests script a timeline.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn current_identity(&self) -> Option<NetworkIdentity>;
}

/// Invoked once per observed network switch, outside any monitor lock.
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    async fn on_network_change(&self, previous: &NetworkIdentity, current: &NetworkIdentity);
}

/// Local-stack facts the identity probe needs that do not come from a
/// subprocess, bundled so tests can script them.
#[derive(Debug, Clone)]
pub struct LinkProbe {
    pub has_path: bool,
    pub primary_device: Option<String>,
}

fn live_link_probe() -> LinkProbe {
    LinkProbe {
        has_path: interface::has_network_path(),
        primary_device: interface::primary_interface_name(),
    }
}

/// Samples the real machine: link state from the local interface table,
/// SSID and routing from the configuration utilities.
pub struct LiveIdentitySource {
    client: Arc<dyn ConfigCommands>,
    probe: fn() -> LinkProbe,
}

impl LiveIdentitySource {
    pub fn new(client: Arc<dyn ConfigCommands>) -> Self {
        Self::with_link_probe(client, live_link_probe)
    }

    pub fn with_link_probe(client: Arc<dyn ConfigCommands>, probe: fn() -> LinkProbe) -> Self {
        Self { client, probe }
    }
}

#[async_trait]
impl IdentitySource for LiveIdentitySource {
    async fn current_identity(&self) -> Option<NetworkIdentity> {
        let probe = (self.probe)();
        if !probe.has_path {
            return None;
        }

        // A command failure here reads as "no route known"; the next poll
        // gets another chance.
        let route = self.client.default_route().await.ok().flatten();

        // An SSID names the network more precisely than a gateway pair, so
        // Wi-Fi wins when the routed device (or the best local guess at it)
        // is associated.
        let device = route
            .as_ref()
            .map(|r| r.interface.clone())
            .or(probe.primary_device);
        if let Some(device) = device {
            if let Ok(Some(ssid)) = self.client.current_wifi_network(&device).await {
                return Some(NetworkIdentity::wifi(ssid));
            }
        }

        route.map(|r| NetworkIdentity::wired(r.interface, r.gateway))
    }
}

#[derive(Default)]
struct WatchState {
    last: Option<NetworkIdentity>,
    changes: u64,
}

pub struct NetworkChangeMonitor {
    source: Arc<dyn IdentitySource>,
    handler: Arc<dyn ChangeHandler>,
    poll_interval: Duration,
    state: Mutex<WatchState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl NetworkChangeMonitor {
    pub fn new(
        source: Arc<dyn IdentitySource>,
        handler: Arc<dyn ChangeHandler>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            handler,
            poll_interval,
            state: Mutex::new(WatchState::default()),
            task: Mutex::new(None),
        }
    }

    /// Spawns the polling loop. Calling this while a loop is already
    /// running is a no-op.
    pub fn start(self: &Arc<Self>) {
        let mut task = self.task.lock().unwrap();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            debug!("Network watch already running");
            return;
        }

        info!(
            "Watching for network changes every {:?}",
            self.poll_interval
        );
        let monitor = Arc::clone(self);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.poll_interval);
            loop {
                ticker.tick().await;
                let sample = monitor.source.current_identity().await;
                monitor.observe(sample).await;
            }
        }));
    }

    pub fn stop(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
            info!("Network watch stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Feeds one identity sample through the transition logic.
    ///
    /// The first identity after a gap primes the memory without firing;
    /// only a direct switch from one identity to a different one counts as
    /// a change. The handler runs after the state lock is released.
    pub async fn observe(&self, sample: Option<NetworkIdentity>) {
        let transition = {
            let mut state = self.state.lock().unwrap();
            match sample {
                None => {
                    if state.last.take().is_some() {
                        debug!("Network path lost; identity cleared");
                    }
                    None
                }
                Some(current) => {
                    let previous = state.last.replace(current.clone());
                    match previous {
                        Some(previous) if previous != current => {
                            state.changes += 1;
                            Some((previous, current))
                        }
                        _ => None,
                    }
                }
            }
        };

        if let Some((previous, current)) = transition {
            info!("Network changed: {previous} -> {current}");
            self.handler.on_network_change(&previous, &current).await;
        }
    }

    /// How many network switches this monitor has seen since creation.
    pub fn changes_seen(&self) -> u64 {
        self.state.lock().unwrap().changes
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
