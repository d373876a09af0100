// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Event Formatter
//!
//! Renders tracing events as glyph-prefixed terminal lines. Events are
//! collected into an [`EventLine`] first and written in one go, so a line
//! either appears whole or not at all; the spinner layer redraws over
//! partial writes otherwise. Events on the `tether::print` target bypass
//! the glyph treatment and go out raw.

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

pub struct TetherFormatter {
    pub max_verbosity: u8,
}

impl<S, N> FormatEvent<S, N> for TetherFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut line = EventLine::default();
        event.record(&mut line);

        if event.metadata().target() == "tether::print" {
            // Raw passthrough; only newline normalization for the
            // indicatif-managed terminal.
            return write!(writer, "{}\r\n", line.raw.replace('\n', "\r\n"));
        }

        if line.verbosity > self.max_verbosity {
            return Ok(());
        }

        let glyph = glyph_for(*event.metadata().level(), line.status.as_deref());
        write!(writer, "{} {}", glyph.painted(), line.message)?;
        for (name, value) in &line.fields {
            write!(writer, " {}={}", name.italic(), value)?;
        }
        write!(writer, "\r\n")
    }
}

/// The level marker in front of a line and how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    text: &'static str,
    paint: fn(ColoredString) -> ColoredString,
}

impl Glyph {
    fn painted(&self) -> ColoredString {
        (self.paint)(self.text.into())
    }
}

/// Maps a level (and the `status` field for INFO) to its marker.
fn glyph_for(level: Level, status: Option<&str>) -> Glyph {
    let (text, paint): (&'static str, fn(ColoredString) -> ColoredString) = match level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO if status == Some("info") => ("[»]", |s| s.cyan().bold()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    };
    Glyph { text, paint }
}

/// Everything one event contributes to its output line.
///
/// `status` and `verbosity` are routing metadata from the logging macros
/// and never rendered as fields; anything else recorded on the event ends
/// up in `fields` verbatim.
#[derive(Default)]
struct EventLine {
    message: String,
    raw: String,
    status: Option<String>,
    verbosity: u8,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventLine {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "raw_msg" => self.raw = format!("{value:?}"),
            "status" | "verbosity" => {}
            name => self.fields.push((name, format!("{value:?}"))),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "status" => self.status = Some(value.to_string()),
            "raw_msg" => self.raw = value.to_string(),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "verbosity" {
            self.verbosity = value as u8;
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "verbosity" {
            self.verbosity = value as u8;
        } else {
            self.record_debug(field, &value);
        }
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_follow_the_level() {
        assert_eq!(glyph_for(Level::TRACE, None).text, "[ ]");
        assert_eq!(glyph_for(Level::DEBUG, None).text, "[?]");
        assert_eq!(glyph_for(Level::WARN, None).text, "[*]");
        assert_eq!(glyph_for(Level::ERROR, None).text, "[-]");
    }

    #[test]
    fn the_status_field_splits_info_into_two_glyphs() {
        assert_eq!(glyph_for(Level::INFO, None).text, "[+]");
        assert_eq!(glyph_for(Level::INFO, Some("success")).text, "[+]");
        assert_eq!(glyph_for(Level::INFO, Some("info")).text, "[»]");
    }
}
