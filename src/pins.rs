// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pin assignments of the interface chip.
//!
//! The table is fixed at build time and applied once by `Gpio::configure`.
//! Nothing here is re-derived at runtime.

use static_assertions::const_assert;

use crate::regs::Reg;

/// Number of configuration jumper inputs.
pub const CONFIG_PIN_COUNT: usize = 12;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// IOCON MODE field.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    Inactive = 0,
    Down = 1,
    Up = 2,
    Repeater = 3,
}

/// One physical pin: where it is and how it is wired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinConfig {
    pub port: u8,
    pub bit: u8,
    pub direction: Direction,
    /// IOCON FUNC field; selects GPIO on this pin.
    pub function: u8,
    pub pull: Pull,
}

impl PinConfig {
    pub const fn input(port: u8, bit: u8, function: u8, pull: Pull) -> Self {
        Self { port, bit, direction: Direction::Input, function, pull }
    }

    pub const fn output(port: u8, bit: u8, function: u8) -> Self {
        Self {
            port,
            bit,
            direction: Direction::Output,
            function,
            pull: Pull::Inactive,
        }
    }

    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }

    pub const fn iocon(&self) -> Reg {
        Reg::Iocon { port: self.port, bit: self.bit }
    }

    /// Bits OR'd into the pin's IOCON word at init. Bits already set by the
    /// reset value (notably digital mode on analog-capable pins) survive.
    pub const fn iocon_init(&self) -> u32 {
        self.function as u32 | (self.pull as u32) << 3
    }

    const fn same_pin(&self, other: &PinConfig) -> bool {
        self.port == other.port && self.bit == other.bit
    }
}

/// All pins the GPIO driver owns.
#[derive(Debug)]
pub struct PinTable {
    /// Configuration jumpers, in bit order of `Gpio::read_configuration_pins`.
    pub config: [PinConfig; CONFIG_PIN_COUNT],
    /// Probe activity LED, active low.
    pub probe_led: PinConfig,
    /// Serial activity LED, active low.
    pub serial_led: PinConfig,
    /// Reset-forward button, active low, with an RC filter on the board.
    pub reset_button: PinConfig,
}

impl PinTable {
    const PIN_COUNT: usize = CONFIG_PIN_COUNT + 3;

    const fn all(&self) -> [PinConfig; Self::PIN_COUNT] {
        let mut pins = [self.probe_led; Self::PIN_COUNT];
        let mut i = 0;
        while i < CONFIG_PIN_COUNT {
            pins[i] = self.config[i];
            i += 1;
        }
        pins[CONFIG_PIN_COUNT + 1] = self.serial_led;
        pins[CONFIG_PIN_COUNT + 2] = self.reset_button;
        pins
    }

    /// True if every entry names a real pin and no two entries share one.
    pub const fn is_disjoint(&self) -> bool {
        let pins = self.all();
        let mut i = 0;
        while i < pins.len() {
            if pins[i].port > 1 || pins[i].bit > 31 {
                return false;
            }
            let mut j = i + 1;
            while j < pins.len() {
                if pins[i].same_pin(&pins[j]) {
                    return false;
                }
                j += 1;
            }
            i += 1;
        }
        true
    }
}

/// Wiring of the LPC11U35 interface chip.
pub const LPC11U35_PINS: PinTable = PinTable {
    config: [
        PinConfig::input(1, 13, 0, Pull::Up),
        PinConfig::input(1, 14, 0, Pull::Up),
        PinConfig::input(1, 15, 0, Pull::Up),
        PinConfig::input(1, 16, 0, Pull::Up),
        PinConfig::input(1, 19, 0, Pull::Up),
        PinConfig::input(1, 20, 0, Pull::Up),
        PinConfig::input(1, 21, 0, Pull::Up),
        PinConfig::input(1, 22, 0, Pull::Up),
        PinConfig::input(1, 23, 0, Pull::Up),
        PinConfig::input(1, 24, 0, Pull::Up),
        PinConfig::input(1, 25, 0, Pull::Up),
        PinConfig::input(1, 26, 0, Pull::Up),
    ],
    probe_led: PinConfig::output(0, 21, 0),
    // PIO0_11 defaults to TDI; FUNC 1 is GPIO.
    serial_led: PinConfig::output(0, 11, 1),
    reset_button: PinConfig::input(0, 1, 0, Pull::Up),
};

const_assert!(LPC11U35_PINS.is_disjoint());
