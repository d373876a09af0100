// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Privilege Delegation
//!
//! Configuration mutations need root. Prompting for a password on every
//! single change is unbearable, so the gate trades one interactive
//! elevation for a scoped allow-rule: a sudoers fragment granting the
//! current user password-less execution of the configuration utility and
//! nothing else. The rule's file is also the grant flag; its existence is
//! the whole state machine.
//!
//! Another process can remove the rule mid-flight. That race is accepted:
//! the silent path then fails with a command error and the user retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use is_root::is_root;
use thiserror::Error;

use tether_common::utils::shell;
use tether_common::{debug, info, success};

use crate::client::NETWORKSETUP;
use crate::command::{ExecError, Runner};

const SUDOERS_DIR: &str = "/etc/sudoers.d";
const OSASCRIPT: &str = "/usr/bin/osascript";

#[derive(Debug, Error)]
pub enum SetupError {
    /// The user cancelled the elevation dialog or the OS refused it.
    #[error("elevation was denied: {output}")]
    Denied { output: String },
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Yes/no view of the grant, for callers that render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantState {
    Granted,
    NotGranted,
}

/// Checks and manages the one-time privilege grant.
///
/// Cheap to clone; long-lived. The grant itself lives on disk and is shared
/// by every instance pointing at the same marker.
#[derive(Clone)]
pub struct PrivilegeGate {
    runner: Arc<dyn Runner>,
    marker: PathBuf,
    user: String,
    root_check: fn() -> bool,
}

impl PrivilegeGate {
    pub fn new(runner: Arc<dyn Runner>) -> Self {
        let user = current_user();
        let marker = Path::new(SUDOERS_DIR).join(format!("tether-{user}"));
        Self {
            runner,
            marker,
            user,
            root_check: is_root,
        }
    }

    /// Same gate, different marker location. Tests point this at a tempdir.
    pub fn with_marker(runner: Arc<dyn Runner>, marker: PathBuf) -> Self {
        Self {
            runner,
            marker,
            user: current_user(),
            root_check: is_root,
        }
    }

    /// Replaces the effective-uid check, pinning `wrap` to one execution
    /// path regardless of who runs the process.
    pub fn with_root_check(mut self, root_check: fn() -> bool) -> Self {
        self.root_check = root_check;
        self
    }

    /// Marker-file presence; no subprocess, safe to call per-render.
    pub fn is_granted(&self) -> bool {
        self.marker.exists()
    }

    pub fn state(&self) -> GrantState {
        if self.is_granted() {
            GrantState::Granted
        } else {
            GrantState::NotGranted
        }
    }

    /// Writes the scoped allow-rule through a single interactive elevation.
    ///
    /// No-op when the grant already exists. On denial the caller keeps
    /// working; every mutation then goes through the per-call prompt.
    pub async fn perform_one_time_setup(&self) -> Result<(), SetupError> {
        if self.is_granted() {
            debug!("Privilege grant already present at {:?}", self.marker);
            return Ok(());
        }

        info!("Requesting one-time privilege grant for {}", self.user);

        let rule = format!("{} ALL=(root) NOPASSWD: {}", self.user, NETWORKSETUP);
        let marker = self.marker.display();
        let script = format!(
            "printf '%s\\n' {rule} > {marker} && chmod 440 {marker}",
            rule = shell::quote(&rule),
            marker = shell::quote(&marker.to_string()),
        );

        self.run_elevated(&script).await?;
        success!("Privilege grant installed at {marker}");
        Ok(())
    }

    /// Removes the allow-rule through another interactive elevation.
    pub async fn revoke(&self) -> Result<(), SetupError> {
        if !self.is_granted() {
            debug!("No privilege grant to revoke");
            return Ok(());
        }

        let script = format!("rm -f {}", shell::quote(&self.marker.display().to_string()));
        self.run_elevated(&script).await?;
        success!("Privilege grant removed");
        Ok(())
    }

    /// Chooses the execution path for one privileged command.
    ///
    /// Root runs it directly, a granted user goes through non-interactive
    /// sudo, everyone else gets the elevation dialog with the command
    /// flattened into a quoted shell string.
    pub fn wrap(&self, program: &str, args: &[String]) -> (String, Vec<String>) {
        self.wrap_for((self.root_check)(), program, args)
    }

    fn wrap_for(&self, already_root: bool, program: &str, args: &[String]) -> (String, Vec<String>) {
        if already_root {
            return (program.to_string(), args.to_vec());
        }

        if self.is_granted() {
            let mut sudo_args = Vec::with_capacity(args.len() + 2);
            sudo_args.push("-n".to_string());
            sudo_args.push(program.to_string());
            sudo_args.extend(args.iter().cloned());
            return ("sudo".to_string(), sudo_args);
        }

        (
            OSASCRIPT.to_string(),
            elevation_args(&shell::quote_command(program, args)),
        )
    }

    async fn run_elevated(&self, script: &str) -> Result<(), SetupError> {
        let args = elevation_args(script);
        let output = self.runner.run(OSASCRIPT, &args).await?;

        if output.success() {
            Ok(())
        } else {
            Err(SetupError::Denied {
                output: output.text,
            })
        }
    }
}

/// Builds the `osascript` arguments that run one shell command behind the
/// interactive administrator prompt.
fn elevation_args(script: &str) -> Vec<String> {
    vec![
        "-e".to_string(),
        format!(
            "do shell script \"{}\" with administrator privileges",
            applescript_escape(script)
        ),
    ]
}

/// Escapes a string for embedding in an AppleScript double-quoted literal.
fn applescript_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn current_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
