// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration Backup Model
//!
//! Snapshot of a service's IP configuration taken right before it is
//! modified, so the change can be rolled back later. Backups live only in
//! process memory; once the process exits, restore falls back to DHCP.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::ipconfig::IpConfiguration;

/// A point-in-time copy of one service's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigBackup {
    /// Service the snapshot belongs to.
    pub service_name: String,
    /// Configuration as it was before the change.
    pub config: IpConfiguration,
    /// When the snapshot was taken.
    pub taken_at: SystemTime,
}

impl ConfigBackup {
    pub fn new(service_name: impl Into<String>, config: IpConfiguration) -> Self {
        Self {
            service_name: service_name.into(),
            config,
            taken_at: SystemTime::now(),
        }
    }
}
