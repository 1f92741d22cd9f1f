// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPIO driver for the interface chip.
//!
//! Owns the pins in `PinTable`: the configuration jumpers, the two activity
//! LEDs, and the reset-forward button. The button is the interesting one.
//! Its edges are turned into reset commands for the target, and if it is
//! held while we boot we hand the chip to the ROM bootloader instead of
//! running.
//!
//! There is no software debounce. The board has an RC filter on the button,
//! and callers poll slowly enough that consecutive samples see a settled
//! level.

use embedded_hal::delay::DelayNs;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::isp::{self, Processor};
use crate::logging::{log_info, log_trace};
use crate::pins::{Direction, PinConfig, PinTable};
use crate::regs::{ahbclk, Reg, Registers};
use crate::target::{TargetControl, TargetState};

/// Time for the button's filter capacitor to charge after power-up. Sampling
/// earlier reads a pressed button that isn't.
pub const RESET_SETTLE_US: u32 = 1_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    Probe,
    Serial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    Deasserted,
    Asserted,
}

/// Configuration pins that can be read individually, by id.
#[repr(u8)]
#[derive(Copy, Clone, Debug, FromPrimitive, PartialEq, Eq)]
pub enum ConfigPin {
    Dt01 = 0,
    Cfg1 = 1,
    Cfg2 = 2,
    Cfg3 = 3,
}

/// Edge detector for the reset-forward button.
///
/// Remembers whether the button was pressed at the previous sample and
/// reports the target state to request when that changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetForward {
    pressed: bool,
}

impl ResetForward {
    /// Starts out released.
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    /// Records a new sample. Returns the command to forward if the sample
    /// differs from the previous one, `None` otherwise.
    pub fn update(&mut self, pressed_now: bool) -> Option<TargetState> {
        if pressed_now == self.pressed {
            return None;
        }
        self.pressed = pressed_now;
        if pressed_now {
            Some(TargetState::ResetHold)
        } else {
            Some(TargetState::ResetRun)
        }
    }
}

pub struct Gpio<R, D> {
    regs: R,
    delay: D,
    pins: &'static PinTable,
    reset_forward: ResetForward,
}

impl<R: Registers, D: DelayNs> Gpio<R, D> {
    pub fn new(regs: R, delay: D, pins: &'static PinTable) -> Self {
        Self {
            regs,
            delay,
            pins,
            reset_forward: ResetForward::new(),
        }
    }

    /// Boot-time setup. Call exactly once, before anything else in here.
    ///
    /// Programs the pins, waits for the reset button's filter to settle and
    /// takes the first sample. If the button is held, this does not return:
    /// the chip is handed to the ROM bootloader through `cpu`.
    pub fn initialize<T, C>(&mut self, target: &mut T, cpu: &mut C)
    where
        T: TargetControl,
        C: Processor,
    {
        self.configure();

        // Give the cap on the reset button time to charge.
        self.delay.delay_us(RESET_SETTLE_US);

        if !self.poll_reset_button(target) {
            isp::reinvoke_isp(&mut self.regs, cpu);
        }
    }

    /// Applies the pin table: clocks, IOCON, directions and LED levels.
    pub fn configure(&mut self) {
        let pins = self.pins;

        self.regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::GPIO | ahbclk::IOCON);

        for pin in &pins.config {
            self.configure_pin(*pin);
        }
        self.configure_pin(pins.probe_led);
        self.configure_pin(pins.serial_led);
        self.configure_pin(pins.reset_button);

        self.regs.modify(Reg::SysAhbClkCtrl, |v| {
            v | ahbclk::PINT | ahbclk::GROUP0INT | ahbclk::GROUP1INT
        });

        log_trace!("gpio configured");
    }

    /// Programs one pin as its table entry declares. Outputs have their latch
    /// set before the direction flips, so active-low loads start off.
    fn configure_pin(&mut self, pin: PinConfig) {
        self.regs.modify(pin.iocon(), |v| v | pin.iocon_init());
        match pin.direction {
            Direction::Input => {
                self.regs.modify(Reg::GpioDir(pin.port), |v| v & !pin.mask());
            }
            Direction::Output => {
                self.regs.write(Reg::GpioSet(pin.port), pin.mask());
                self.regs.modify(Reg::GpioDir(pin.port), |v| v | pin.mask());
            }
        }
    }

    pub fn set_indicator(&mut self, which: Indicator, state: LedState) {
        let led = match which {
            Indicator::Probe => self.pins.probe_led,
            Indicator::Serial => self.pins.serial_led,
        };
        log_trace!("indicator {} -> {}", which, state);
        match state {
            LedState::Deasserted => self.regs.write(Reg::GpioSet(led.port), led.mask()),
            LedState::Asserted => self.regs.write(Reg::GpioClr(led.port), led.mask()),
        }
    }

    fn is_high(&mut self, pin: PinConfig) -> bool {
        self.regs.read(Reg::GpioPin(pin.port)) & pin.mask() != 0
    }

    /// Instantaneous levels of all configuration pins; bit `i` is pin `i`,
    /// set when high.
    pub fn read_configuration_pins(&mut self) -> u16 {
        let pins = self.pins;
        let mut levels = 0;
        for (i, pin) in pins.config.iter().enumerate() {
            if self.is_high(*pin) {
                levels |= 1 << i;
            }
        }
        levels
    }

    /// Level (0 or 1) of the configuration pin with the given `ConfigPin`
    /// id. Unknown ids read as 0 without touching the hardware, so 0 is
    /// ambiguous; only pass ids you know.
    pub fn read_configuration_pin(&mut self, id: u8) -> u8 {
        match ConfigPin::from_u8(id) {
            Some(pin) => self.is_high(self.pins.config[pin as usize]) as u8,
            None => 0,
        }
    }

    /// Samples the reset button and forwards any change to `target`:
    /// pressing holds the target in reset, releasing lets it run. Repeated
    /// samples at the same level send nothing, so other reset sources
    /// (programming, serial break) are left alone.
    ///
    /// Returns `true` when the button is *not* pressed. The boot path relies
    /// on this polarity.
    pub fn poll_reset_button<T: TargetControl>(&mut self, target: &mut T) -> bool {
        // Active low.
        let pressed = !self.is_high(self.pins.reset_button);

        if let Some(state) = self.reset_forward.update(pressed) {
            log_info!("reset button edge, forwarding {}", state);
            target.set_state(state);
        }

        !pressed
    }

    /// Request from target control to forward a reset from some other source.
    /// Deliberately does nothing: forwarding is driven by the button alone,
    /// and acting here would drive the reset line twice.
    pub fn forward_reset(&mut self, assert: bool) {
        log_trace!("ignoring forward_reset({})", assert);
    }
}
