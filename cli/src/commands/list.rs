// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use unicode_width::UnicodeWidthStr;

use tether_common::config::Config;
use tether_common::models::adapter::{LinkStatus, NetworkAdapter};

use crate::terminal::print::{self, Print, TOTAL_WIDTH};
use crate::terminal::{colors, format};
use crate::{commands, tprint};

pub async fn list(cfg: &Config) -> anyhow::Result<()> {
    let backend = commands::connect();
    let adapters = backend.directory.refresh().await?;

    if cfg.json {
        tprint!("{}", serde_json::to_string_pretty(&adapters)?);
        return Ok(());
    }

    if adapters.is_empty() {
        Print::no_services();
        return Ok(());
    }

    Print::header("network services");

    if cfg.quiet >= 2 {
        print_raw(&adapters);
        return Ok(());
    }

    print_overview(&adapters);
    tprint!();
    print_adapter_trees(&adapters);
    Ok(())
}

/// Strictly data, one adapter per line, for pipes and scripts.
fn print_raw(adapters: &[NetworkAdapter]) {
    for adapter in adapters {
        tprint!("{}", raw_row(adapter));
    }
}

/// One tab-separated row; absent fields render as `-`.
fn raw_row(adapter: &NetworkAdapter) -> String {
    let method = adapter
        .config
        .as_ref()
        .map(|c| c.method.to_string())
        .unwrap_or_else(|| String::from("-"));
    let address = adapter.current_address().unwrap_or("-");
    format!(
        "{}\t{}\t{}\t{}",
        adapter.service_name,
        adapter.device.as_deref().unwrap_or("-"),
        method,
        address
    )
}

fn print_overview(adapters: &[NetworkAdapter]) {
    let connected = adapters
        .iter()
        .filter(|a| a.link == LinkStatus::Connected)
        .count();
    let hostname = sys_info::hostname().unwrap_or_else(|_| String::from("this machine"));

    print::print_status(format!(
        "{} services on {}, {} with an active link",
        adapters.len(),
        hostname,
        connected
    ));
}

fn print_adapter_trees(adapters: &[NetworkAdapter]) {
    for (idx, adapter) in adapters.iter().enumerate() {
        print_adapter_head(idx, adapter);
        print::as_tree(format::adapter_details(adapter));

        if idx + 1 != adapters.len() {
            tprint!();
        }
    }
}

fn print_adapter_head(idx: usize, adapter: &NetworkAdapter) {
    let status_text: String = format!("{} {}", format::link_glyph(adapter.link), adapter.link);
    let status_width: usize = status_text.width();

    let block_width: usize = 20;
    let local_pad: usize = block_width.saturating_sub(status_width);
    let right_part: String = format!("{}{}", " ".repeat(local_pad), status_text);

    let left_part: String = format!("[{}] {}", idx, adapter);

    let used_width: usize = left_part.width() + block_width;

    let padding_len: usize = TOTAL_WIDTH.saturating_sub(used_width + 1);
    let padding: String = " ".repeat(padding_len);

    tprint!(
        "{} {}{}{}",
        format!("[{}]", idx.to_string().color(colors::ACCENT)).color(colors::SEPARATOR),
        adapter.to_string().color(colors::PRIMARY),
        padding,
        format::colorize_link(right_part, adapter.link)
    );
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
