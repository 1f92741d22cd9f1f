// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability implementations for real interface chips.
//!
//! Only built for ARM targets; host builds use the fakes in the tests.

pub mod lpc11u35;
