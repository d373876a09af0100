// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Cross-component scenarios driven through scripted fakes. No test here
//! spawns a real subprocess or touches the live system configuration.

mod configuration;
mod refresh;
mod watch;
