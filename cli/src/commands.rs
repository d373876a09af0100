// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! It serves as the single source of truth for the application's command-line interface.
//! While the *execution* logic for each command resides in its own submodule (e.g., `apply.rs`),
//! the *definition* of the arguments, flags, and help text is centralized here.
//!
//! ## Architectural Role
//!
//! This module performs two key architectural functions:
//!
//! 1.  **Input Normalization**: It uses `clap` to validate user inputs, making sure that necessary
//!     arguments are present and types are correct (e.g., a static address always arrives with its
//!     subnet mask and router) before the application attempts to run.
//! 2.  **State Translation**: via the `From<&CommandLine> for Config` implementation, it
//!     decouples the external interface (CLI flags) from the internal application state (`Config`).
//!     This allows the core libraries to remain agnostic of the user interface layer.
//!
//! ## Structure
//!
//! The CLI is structured hierarchically:
//!
//! * [`CommandLine`]: The top-level struct containing global flags applicable to the entire process
//!   (logging, formatting, verbosity).
//! * [`Commands`]: An enum representing the specific operation mode. Since these are mutually
//!   exclusive, the type system ensures the application cannot be in two states (e.g., "Apply"
//!   and "Reset") simultaneously.

pub mod apply;
pub mod free;
pub mod grant;
pub mod list;
pub mod reset;
pub mod revoke;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tether_common::config::Config;
use tether_core::client::NetworkSetupClient;
use tether_core::command::{Runner, SystemRunner};
use tether_core::directory::AdapterDirectory;
use tether_core::orchestrator::ConfigurationOrchestrator;
use tether_core::privilege::PrivilegeGate;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "macOS network configuration without the System Settings maze.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Emit machine-readable JSON where a command supports it
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Reduce UI visual density (-q: reduce styling, -qq: raw output)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs, -vv: subprocess traces)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display network services and their current configuration
    #[command(alias = "ls")]
    List,

    /// Apply a static or DHCP configuration to a service
    #[command(alias = "a")]
    Apply {
        /// Network service to configure, e.g. "Wi-Fi"
        #[arg(value_name = "SERVICE")]
        service: String,

        /// Static IPv4 address; omit to switch the service to DHCP
        #[arg(long = "ip", value_name = "ADDRESS", requires = "subnet", requires = "router")]
        ip: Option<String>,

        /// Subnet mask for the static address
        #[arg(long = "subnet", value_name = "MASK", requires = "ip")]
        subnet: Option<String>,

        /// Gateway for the static address
        #[arg(long = "router", value_name = "GATEWAY", requires = "ip")]
        router: Option<String>,

        /// DNS servers; a static switch without any falls back to public resolvers
        #[arg(long = "dns", value_name = "SERVER", num_args(1..))]
        dns: Vec<String>,
    },

    /// Force services back onto DHCP
    #[command(alias = "r")]
    Reset {
        /// Service to reset
        #[arg(value_name = "SERVICE", required_unless_present = "all_manual")]
        service: Option<String>,

        /// Sweep instead: reset every service currently in manual mode
        #[arg(long = "all-manual", conflicts_with = "service")]
        all_manual: bool,
    },

    /// Probe the service's subnet for an unclaimed IPv4 address
    #[command(alias = "f")]
    Free {
        /// Service whose subnet is scanned, e.g. "Wi-Fi"
        #[arg(value_name = "SERVICE")]
        service: String,
    },

    /// Authorize passwordless configuration changes (one admin prompt)
    Grant,

    /// Remove the passwordless authorization again
    Revoke,

    /// Watch for network changes as they happen
    #[command(alias = "w")]
    Watch {
        /// Reset manual adapters to DHCP after each network change
        #[arg(long = "auto-revert")]
        auto_revert: bool,

        /// Seconds between identity samples
        #[arg(long = "interval", value_name = "SECONDS", default_value_t = 2)]
        interval: u64,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        let (auto_revert, poll_interval) = match &cmd.command {
            Commands::Watch {
                auto_revert,
                interval,
            } => (*auto_revert, Duration::from_secs((*interval).max(1))),
            _ => (false, Config::default().poll_interval),
        };

        Self {
            no_banner: cmd.no_banner,
            json: cmd.json,
            quiet: cmd.quiet,
            auto_revert,
            poll_interval,
        }
    }
}

/// The live service stack every command drives: one runner, one client
/// wired through the privilege gate, one adapter directory over it.
pub struct Backend {
    pub runner: Arc<dyn Runner>,
    pub gate: PrivilegeGate,
    pub client: Arc<NetworkSetupClient>,
    pub directory: Arc<AdapterDirectory>,
}

impl Backend {
    /// Mutation service over the shared client and directory. Backups live
    /// inside the returned orchestrator, so one per command invocation.
    pub fn orchestrator(&self) -> ConfigurationOrchestrator {
        ConfigurationOrchestrator::new(self.client.clone(), self.directory.clone())
    }
}

pub fn connect() -> Backend {
    let runner: Arc<dyn Runner> = Arc::new(SystemRunner);
    let gate = PrivilegeGate::new(runner.clone());
    let client = Arc::new(NetworkSetupClient::new(runner.clone(), gate.clone()));
    let directory = Arc::new(AdapterDirectory::new(client.clone()));

    Backend {
        runner,
        gate,
        client,
        directory,
    }
}
