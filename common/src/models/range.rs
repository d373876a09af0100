// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::debug;

/// An inclusive range of usable IPv4 host addresses on one subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostRange {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl HostRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        let s_u32 = u32::from(start);
        let e_u32 = u32::from(end);

        if s_u32 <= e_u32 {
            Self {
                start_addr: start,
                end_addr: end,
            }
        } else {
            debug!(verbosity = 1, "{start} > {end}. Reversing order.");
            Self {
                start_addr: end,
                end_addr: start,
            }
        }
    }

    /// Computes the usable host range of the subnet containing `ip`.
    ///
    /// Plain u32 math: network = ip & mask, broadcast = network | !mask, and
    /// the usable hosts sit strictly between the two. Returns `None` when the
    /// mask leaves no room for hosts (/31, /32, or a degenerate mask). Works
    /// for non-contiguous masks too; the utility accepts them, so we do.
    pub fn usable(ip: Ipv4Addr, mask: Ipv4Addr) -> Option<Self> {
        let ip_u32 = u32::from(ip);
        let mask_u32 = u32::from(mask);

        let network = ip_u32 & mask_u32;
        let broadcast = network | !mask_u32;

        if broadcast.saturating_sub(network) < 2 {
            debug!(verbosity = 1, "{ip}/{mask} has no usable hosts");
            return None;
        }

        Some(Self {
            start_addr: Ipv4Addr::from(network + 1),
            end_addr: Ipv4Addr::from(broadcast - 1),
        })
    }

    /// Where a free-address scan should begin: 80% of the way through the
    /// range. DHCP pools conventionally grow from the low end, so starting
    /// high keeps probed candidates away from addresses the server is about
    /// to lease out.
    pub fn search_start(&self) -> Ipv4Addr {
        let start = u32::from(self.start_addr);
        let offset = (u64::from(self.len()) * 4 / 5) as u32;
        Ipv4Addr::from(start + offset.min(self.len().saturating_sub(1)))
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        let ip_u32: u32 = (*ip).into();
        ip_u32 >= start && ip_u32 <= end
    }

    pub fn len(&self) -> u32 {
        let s_u32: u32 = u32::from(self.start_addr);
        let e_u32: u32 = u32::from(self.end_addr);

        if e_u32 >= s_u32 {
            (e_u32 - s_u32) + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/*
++++++++++++++++++++++++++++++++++++++++++++++++++
+                     TESTS                      +
++++++++++++++++++++++++++++++++++++++++++++++++++
*/
