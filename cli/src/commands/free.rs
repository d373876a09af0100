// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use colored::*;
use tracing::info_span;

use tether_common::{success, warn};
use tether_core::probe::{self, PingProber, Prober};

use crate::commands;
use crate::terminal::spinner::SpinnerGuard;
use crate::terminal::{colors, print, print::Print};

/// Scans the service's subnet for an address nothing answers on. Probing a
/// /24 can take a while, so a spinner reports progress along the way.
pub async fn free(service: &str) -> anyhow::Result<()> {
    let backend = commands::connect();

    Print::header("free address probe");

    let probed = Arc::new(AtomicU32::new(0));
    let prober = CountingProber {
        inner: PingProber::new(backend.runner.clone()),
        probed: probed.clone(),
    };

    let _guard: SpinnerGuard = run_spinner(probed.clone());

    let found = probe::find_free_address(backend.client.as_ref(), &prober, service).await?;
    let total = probed.load(Ordering::Relaxed);

    match found {
        Some(address) => {
            success!("Found a free address after {total} probe(s)");
            print::GLOBAL_KEY_WIDTH.set(10);
            print::aligned_line("Address", address.to_string().color(colors::IPV4_ADDR));
        }
        None => warn!("All {total} probed address(es) on {service}'s subnet answered"),
    }
    Ok(())
}

fn run_spinner(probed: Arc<AtomicU32>) -> SpinnerGuard {
    let span = info_span!("free", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), move || {
        let count = probed.load(Ordering::Relaxed).to_string().green().bold();
        format!("Probed {} candidates so far...", count)
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}

/// Wraps the real prober with a counter the spinner reads.
struct CountingProber {
    inner: PingProber,
    probed: Arc<AtomicU32>,
}

#[async_trait]
impl Prober for CountingProber {
    async fn responds(&self, address: Ipv4Addr) -> bool {
        self.probed.fetch_add(1, Ordering::Relaxed);
        self.inner.responds(address).await
    }
}
