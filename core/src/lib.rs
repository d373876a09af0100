// Copyright (c) 2026 Hollowline and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

pub mod client;
pub mod command;
pub mod directory;
pub mod monitor;
pub mod orchestrator;
pub mod privilege;
pub mod probe;
