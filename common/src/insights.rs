// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Internal tool-specific operational guidance.
const TOOL_TIPS: &[&str] = &[
    "`tether grant` trades one admin prompt for passwordless changes",
    "`tether free` starts high in the subnet, away from the DHCP pool",
    "Pass -v to see every command run on your behalf",
    "`tether watch --auto-revert` undoes manual IPs when you change networks",
    "Settings applied here survive reboots; `tether reset` undoes them",
    "The -q flag strips the chrome, -qq leaves raw data only",
];

/// Technical facts and networking trivia.
const TECH_TRIVIA: &[&str] = &[
    "DHCP's predecessor BOOTP needed a reboot to apply a lease",
    "1.1.1.1 is actually owned by APNIC, not Cloudflare",
    "The 169.254/16 range means 'nobody leased me an address'",
    "An SSID can legally contain emoji; most UIs disagree",
];

/// Industry jokes and developer humor.
const DEV_HUMOR: &[&str] = &[
    "It's not DNS. There's no way it's DNS. It was DNS",
    "Static IPs: because some machines fear change",
    "The network works on my machine though",
    "Captive portals: the airlock between you and the internet",
];

/// Generates a randomized list of UI messages.
///
/// Every slot in the resulting list has a 50% probability of being an
/// operational tip and a 50% probability of being flavor text (trivia/humor),
/// provided both pools still have remaining items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = TOOL_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = TECH_TRIVIA
        .iter()
        .chain(DEV_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let total_len = tips.len() + flavor.len();
    let mut output = Vec::with_capacity(total_len);

    while !tips.is_empty() && !flavor.is_empty() {
        let pick_tip = rng.random_bool(0.5);
        if pick_tip {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}
