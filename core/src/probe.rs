// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Free Address Probe
//!
//! Finds an unclaimed IPv4 address on the local subnet by pinging
//! candidates until one stays silent. The scan starts high in the host
//! range and wraps around, so candidates sit away from the low addresses a
//! DHCP server hands out first.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use tether_common::models::range::HostRange;
use tether_common::{debug, info};

use crate::client::ConfigCommands;
use crate::command::{Runner, run_bounded};

pub const PING: &str = "/sbin/ping";

/// Hard ceiling on one probe, over and above ping's own reply timeout. A
/// probe past this is dropped and its target treated as silent.
const PROBE_LIMIT: Duration = Duration::from_secs(1);

/// Answers "is something already using this address".
#[async_trait]
pub trait Prober: Send + Sync {
    async fn responds(&self, address: Ipv4Addr) -> bool;
}

/// Probes with one quiet ICMP echo per candidate.
pub struct PingProber {
    runner: Arc<dyn Runner>,
}

impl PingProber {
    pub fn new(runner: Arc<dyn Runner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn responds(&self, address: Ipv4Addr) -> bool {
        let args: Vec<String> = ["-c", "1", "-W", "300", "-n", "-q", &address.to_string()]
            .iter()
            .map(|s| s.to_string())
            .collect();

        // Silence in any form reads as "nobody there": a timeout, a failed
        // spawn, and a non-zero exit all leave the address claimable.
        match run_bounded(self.runner.as_ref(), PING, &args, PROBE_LIMIT).await {
            Ok(Some(output)) => output.success(),
            Ok(None) => false,
            Err(e) => {
                debug!(verbosity = 1, "Probe of {address} failed: {e}");
                false
            }
        }
    }
}

/// Walks the host range from `start` to the end, wraps to the range start,
/// and returns the first address nothing answered for. Every candidate is
/// probed at most once.
pub async fn find_available(
    range: &HostRange,
    start: Ipv4Addr,
    prober: &dyn Prober,
) -> Option<Ipv4Addr> {
    if range.is_empty() {
        return None;
    }
    let start = if range.contains(&start) {
        start
    } else {
        range.start_addr
    };

    let start_u32 = u32::from(start);
    let high = (start_u32..=u32::from(range.end_addr)).map(Ipv4Addr::from);
    let wrapped = (u32::from(range.start_addr)..start_u32).map(Ipv4Addr::from);

    for candidate in high.chain(wrapped) {
        if !prober.responds(candidate).await {
            return Some(candidate);
        }
        debug!(verbosity = 1, "{candidate} answered, moving on");
    }
    None
}

/// Derives the service's subnet from its current configuration and scans it
/// for a free address. `Ok(None)` means the whole range answered (or the
/// subnet has no usable hosts to begin with).
pub async fn find_free_address(
    client: &dyn ConfigCommands,
    prober: &dyn Prober,
    service: &str,
) -> Result<Option<Ipv4Addr>> {
    let config = client.ip_configuration(service).await?;
    let (Some(address), Some(mask)) = (config.address.as_deref(), config.subnet_mask.as_deref())
    else {
        bail!("{service} has no IPv4 address and subnet mask to derive a range from");
    };

    let ip: Ipv4Addr = address
        .parse()
        .with_context(|| format!("{service} reports an unparseable address `{address}`"))?;
    let mask: Ipv4Addr = mask
        .parse()
        .with_context(|| format!("{service} reports an unparseable subnet mask `{mask}`"))?;

    let Some(range) = HostRange::usable(ip, mask) else {
        info!("{service}'s subnet {ip}/{mask} has no usable hosts");
        return Ok(None);
    };

    info!(
        "Scanning {} candidates between {} and {}",
        range.len(),
        range.start_addr,
        range.end_addr
    );
    Ok(find_available(&range, range.search_start(), prober).await)
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use crate::client::testing::FakeClient;
    use crate::command::{ExecError, Output};
    use tether_common::models::ipconfig::IpConfiguration;

    struct ScriptedProber {
        taken: HashSet<Ipv4Addr>,
        probed: Mutex<Vec<Ipv4Addr>>,
    }

    impl ScriptedProber {
        fn with_taken(addresses: &[&str]) -> Self {
            Self {
                taken: addresses.iter().map(|a| a.parse().unwrap()).collect(),
                probed: Mutex::new(Vec::new()),
            }
        }

        fn everything_taken(range: &HostRange) -> Self {
            Self {
                taken: range.to_iter().collect(),
                probed: Mutex::new(Vec::new()),
            }
        }

        fn probed(&self) -> Vec<Ipv4Addr> {
            self.probed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn responds(&self, address: Ipv4Addr) -> bool {
            self.probed.lock().unwrap().push(address);
            self.taken.contains(&address)
        }
    }

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn scan_wraps_and_visits_every_candidate_once() {
        let range = HostRange::new(ip("10.0.0.1"), ip("10.0.0.6"));
        let prober = ScriptedProber::everything_taken(&range);

        let found = find_available(&range, ip("10.0.0.5"), &prober).await;

        assert_eq!(found, None);
        let expected: Vec<Ipv4Addr> = ["10.0.0.5", "10.0.0.6", "10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]
            .iter()
            .map(|s| ip(s))
            .collect();
        assert_eq!(prober.probed(), expected);
    }

    #[tokio::test]
    async fn scan_stops_at_the_first_silent_address() {
        let range = HostRange::new(ip("10.0.0.1"), ip("10.0.0.6"));
        let prober =
            ScriptedProber::with_taken(&["10.0.0.5", "10.0.0.6", "10.0.0.1", "10.0.0.3"]);

        let found = find_available(&range, ip("10.0.0.5"), &prober).await;

        // First silence sits behind the wrap point.
        assert_eq!(found, Some(ip("10.0.0.2")));
        assert_eq!(
            prober.probed(),
            vec![ip("10.0.0.5"), ip("10.0.0.6"), ip("10.0.0.1"), ip("10.0.0.2")]
        );
    }

    #[tokio::test]
    async fn a_start_outside_the_range_falls_back_to_its_beginning() {
        let range = HostRange::new(ip("10.0.0.1"), ip("10.0.0.3"));
        let prober = ScriptedProber::with_taken(&[]);

        let found = find_available(&range, ip("192.168.9.9"), &prober).await;

        assert_eq!(found, Some(ip("10.0.0.1")));
    }

    #[tokio::test]
    async fn free_address_lookup_starts_high_in_the_subnet() {
        let mut config = IpConfiguration::dhcp();
        config.address = Some("192.168.1.50".to_string());
        config.subnet_mask = Some("255.255.255.0".to_string());

        let fake = FakeClient::new()
            .with_service("Wi-Fi", Some("en0"))
            .with_config("Wi-Fi", config);
        let prober = ScriptedProber::with_taken(&[]);

        let found = find_free_address(&fake, &prober, "Wi-Fi").await.unwrap();

        assert_eq!(found, Some(ip("192.168.1.204")));
    }

    #[tokio::test]
    async fn free_address_lookup_needs_an_address_and_mask() {
        let fake = FakeClient::new()
            .with_service("Wi-Fi", Some("en0"))
            .with_config("Wi-Fi", IpConfiguration::dhcp());
        let prober = ScriptedProber::with_taken(&[]);

        let result = find_free_address(&fake, &prober, "Wi-Fi").await;

        assert!(result.is_err());
        assert!(prober.probed().is_empty());
    }

    #[tokio::test]
    async fn a_hostless_subnet_yields_nothing() {
        let mut config = IpConfiguration::dhcp();
        config.address = Some("10.0.0.1".to_string());
        config.subnet_mask = Some("255.255.255.255".to_string());

        let fake = FakeClient::new()
            .with_service("Wi-Fi", Some("en0"))
            .with_config("Wi-Fi", config);
        let prober = ScriptedProber::with_taken(&[]);

        let found = find_free_address(&fake, &prober, "Wi-Fi").await.unwrap();

        assert_eq!(found, None);
        assert!(prober.probed().is_empty());
    }

    struct FixedRunner {
        code: i32,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl FixedRunner {
        fn exiting(code: i32) -> Self {
            Self {
                code,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Runner for FixedRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<Output, ExecError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(Output {
                text: String::new(),
                code: self.code,
            })
        }
    }

    #[tokio::test]
    async fn ping_prober_reads_exit_zero_as_a_response() {
        let runner = Arc::new(FixedRunner::exiting(0));
        let prober = PingProber::new(runner.clone());

        assert!(prober.responds(ip("192.168.1.10")).await);

        let calls = runner.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, PING);
        assert_eq!(
            args,
            &vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                "300".to_string(),
                "-n".to_string(),
                "-q".to_string(),
                "192.168.1.10".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn ping_prober_reads_any_failure_as_silence() {
        let unreachable = PingProber::new(Arc::new(FixedRunner::exiting(2)));
        assert!(!unreachable.responds(ip("192.168.1.10")).await);

        struct BrokenRunner;
        #[async_trait]
        impl Runner for BrokenRunner {
            async fn run(&self, program: &str, _args: &[String]) -> Result<Output, ExecError> {
                Err(ExecError::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            }
        }

        let broken = PingProber::new(Arc::new(BrokenRunner));
        assert!(!broken.responds(ip("192.168.1.10")).await);
    }
}
