// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Shell Quoting
//!
//! When a privileged command has to travel through an interactive elevation
//! dialog it gets flattened into a single shell command string. Service
//! names are user-controlled text ("Pete's Wi-Fi") and flow into that
//! string, so every argument is quoted, no exceptions.

/// Wraps one argument in POSIX single quotes.
///
/// Single quotes are the only shell context with no further expansion;
/// embedded quotes close, escape, and reopen (`'` becomes `'\''`).
pub fn quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Joins a program and its arguments into one shell-safe command line.
pub fn quote_command(program: &str, args: &[String]) -> String {
    let mut line = quote(program);
    for arg in args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
