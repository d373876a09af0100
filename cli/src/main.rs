// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Tether CLI Entry Point
//!
//! The binary entry point for Tether.
//!
//! This module is responsible for bootstrapping the application runtime and managing the
//! global lifecycle of the process. It isolates the command-line interface layer from the
//! core library logic.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: The `#[tokio::main]` attribute initializes the asynchronous
//!     runtime, setting up the thread pool and I/O drivers required for non-blocking operations.
//! 2.  **Global State Setup**: Initializes the `tracing` subscriber for logging and configures
//!     terminal output modes (verbosity, quiet mode, banners).
//! 3.  **Configuration Mapping**: Converts raw command-line arguments (parsed via `clap`) into
//!     the internal `Config` struct used by the core libraries.
//! 4.  **Command Dispatch**: Routes execution to the appropriate module in `commands/`.
//! 5.  **Error Boundary**: Acts as the top-level error handler. Any errors propagated up from
//!     subcommands are caught here, logged to the error stream, and converted into a
//!     non-zero `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use tether_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, apply, free, grant, list, reset, revoke, watch},
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let command_line = CommandLine::parse_args();
    spinner::init_logging(command_line.verbosity);

    let cfg = Config::from(&command_line);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &command_line.command {
        Commands::List => list::list(&cfg).await,
        Commands::Apply {
            service,
            ip,
            subnet,
            router,
            dns,
        } => apply::apply(service, ip.as_deref(), subnet.as_deref(), router.as_deref(), dns).await,
        Commands::Reset {
            service,
            all_manual,
        } => reset::reset(service.as_deref(), *all_manual).await,
        Commands::Free { service } => free::free(service).await,
        Commands::Grant => grant::grant().await,
        Commands::Revoke => revoke::revoke().await,
        Commands::Watch { .. } => watch::watch(&cfg).await,
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
