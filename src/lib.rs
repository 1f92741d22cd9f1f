// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware-facing layer of the debug probe interface firmware.
//!
//! This crate identifies the board the firmware was built for (`bsp`) and
//! drives the interface chip's fixed pins (`gpio`): configuration jumpers,
//! activity LEDs and the reset-forward button, including the escape hatch
//! into the ROM bootloader (`isp`).
//!
//! Hardware access goes through small capabilities (`regs::Registers`,
//! `isp::Processor`, `embedded_hal::delay::DelayNs`) so the logic can be
//! exercised on the host. The real implementations live in `hic`.

#![cfg_attr(not(test), no_std)]

mod logging;

pub mod board;
pub mod bsp;
pub mod gpio;
#[cfg(target_arch = "arm")]
pub mod hic;
pub mod isp;
pub mod pins;
pub mod regs;
pub mod romapi;
pub mod target;
