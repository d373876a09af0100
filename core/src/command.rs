// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Subprocess Execution
//!
//! Everything this tool learns about the system comes out of external
//! utilities, so every higher layer funnels through the [`Runner`] trait
//! defined here. [`SystemRunner`] is the real implementation; tests swap in
//! scripted fakes. One child process per call, awaited to termination, no
//! retries. The only bounded variant is [`run_bounded`], used by the
//! reachability probe.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

use tether_common::debug;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` produced output that is not valid UTF-8")]
    Decode { program: String },
}

/// What a finished child process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Combined stdout and stderr, stdout first. The system utilities
    /// scatter diagnostics across both streams, and callers want the whole
    /// transcript for parsing and for error reports alike.
    pub text: String,
    /// Exit code; -1 when the process died to a signal.
    pub code: i32,
}

impl Output {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// The seam between this tool and the programs it drives.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<Output, ExecError>;
}

/// Runs real subprocesses through the tokio process machinery.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl Runner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Output, ExecError> {
        debug!(verbosity = 2, "exec: {program} {}", args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut text = decode(program, output.stdout)?;
        text.push_str(&decode(program, output.stderr)?);

        Ok(Output {
            text,
            code: output.status.code().unwrap_or(-1),
        })
    }
}

fn decode(program: &str, bytes: Vec<u8>) -> Result<String, ExecError> {
    String::from_utf8(bytes).map_err(|_| ExecError::Decode {
        program: program.to_string(),
    })
}

/// Runs a command under a hard deadline; `None` means the deadline hit.
///
/// Dropping the unfinished future kills the child, so a hung probe target
/// cannot pin a process on us.
pub async fn run_bounded(
    runner: &dyn Runner,
    program: &str,
    args: &[String],
    limit: Duration,
) -> Result<Option<Output>, ExecError> {
    match timeout(limit, runner.run(program, args)).await {
        Ok(result) => result.map(Some),
        Err(_elapsed) => {
            debug!(verbosity = 2, "{program} exceeded {limit:?}, dropped");
            Ok(None)
        }
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
