// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use crate::terminal::colors;
use crate::tprint;

const LOGO: &str = r#"
▄▄▄█████▓▓█████▄▄▄█████▓ ██░ ██ ▓█████  ██▀███
▓  ██▒ ▓▒▓█   ▀▓  ██▒ ▓▒▓██░ ██▒▓█   ▀ ▓██ ▒ ██▒
▒ ▓██░ ▒░▒███  ▒ ▓██░ ▒░▒██▀▀██░▒███   ▓██ ░▄█ ▒
░ ▓██▓ ░ ▒▓█  ▄░ ▓██▓ ░ ░▓█ ░██ ▒▓█  ▄ ▒██▀▀█▄
  ▒██▒ ░ ░▒████▒ ▒██▒ ░ ░▓█▒░██▓░▒████▒░██▓ ▒██▒
  ▒ ░░   ░░ ▒░ ░ ▒ ░░    ▒ ░░▒░▒░░ ▒░ ░░ ▒▓ ░▒▓░
"#;

/// One empty list deserves more than a log line.
pub const NO_SERVICES: &str = r#"
      ( no network services answered )
"#;

pub fn print() {
    for line in LOGO.lines().skip(1) {
        tprint!("{}", line.color(colors::PRIMARY).dimmed());
    }
}
