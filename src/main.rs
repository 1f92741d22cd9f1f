// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![no_std]
#![no_main]

use core::sync::atomic::{compiler_fence, Ordering};

use cortex_m_rt::{entry, exception, ExceptionFrame};
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;

use hiclink::bsp::BOARD_INFO;
use hiclink::gpio::{Gpio, Indicator, LedState};
use hiclink::hic::lpc11u35::{AsmDelay, Cpu, Mmio, SYSTEM_CLOCK_HZ};
use hiclink::pins::{PinConfig, LPC11U35_PINS};
use hiclink::regs::{ahbclk, Reg, Registers};
use hiclink::target::{TargetControl, TargetState};

/// How often the foreground loop samples the reset button.
const POLL_INTERVAL_MS: u32 = 10;

/// The target's nRESET line.
const TARGET_NRESET: PinConfig = PinConfig::output(0, 2, 0);

/// Drives the target's nRESET pin open-drain style: output low to hold,
/// input (pulled up on the target side) to run. Stands in for the SWD
/// engine's reset handling.
struct NResetLine {
    regs: Mmio,
    pin: PinConfig,
}

impl NResetLine {
    fn new(mut regs: Mmio, pin: PinConfig) -> Self {
        regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::GPIO | ahbclk::IOCON);
        regs.modify(pin.iocon(), |v| v | pin.iocon_init());
        // Output latch low, so switching to output pulls the line down.
        regs.write(Reg::GpioClr(pin.port), pin.mask());
        regs.modify(Reg::GpioDir(pin.port), |v| v & !pin.mask());
        Self { regs, pin }
    }
}

impl TargetControl for NResetLine {
    fn set_state(&mut self, state: TargetState) {
        let (port, mask) = (self.pin.port, self.pin.mask());
        match state {
            TargetState::ResetHold => self.regs.modify(Reg::GpioDir(port), |v| v | mask),
            TargetState::ResetRun => self.regs.modify(Reg::GpioDir(port), |v| v & !mask),
        }
    }
}

#[entry]
fn main() -> ! {
    // Safety: This is sound as long as (1) `steal` only happens once, and (2)
    // none of the correctness of the rest of the code relies on peripherals
    // being uniquely held. The first part we ensure by putting this at the
    // top of `main`. The two `Mmio`s touch disjoint bits except for the
    // clock enables, which both only ever set.
    let cp = unsafe { cortex_m::Peripherals::steal() };
    let mut cpu = Cpu::new(cp.NVIC, cp.SYST);
    let mut target = NResetLine::new(unsafe { Mmio::steal() }, TARGET_NRESET);
    let mut gpio = Gpio::new(
        unsafe { Mmio::steal() },
        AsmDelay::new(SYSTEM_CLOCK_HZ),
        &LPC11U35_PINS,
    );

    // May not return: button held at boot means ISP.
    gpio.initialize(&mut target, &mut cpu);

    defmt::info!(
        "{=str} ({=str}) up, config pins {=u16:#x}",
        BOARD_INFO.daplink_drive_name,
        BOARD_INFO.board_id,
        gpio.read_configuration_pins(),
    );

    let mut delay = AsmDelay::new(SYSTEM_CLOCK_HZ);
    loop {
        // `true` means released.
        let led = if gpio.poll_reset_button(&mut target) {
            LedState::Deasserted
        } else {
            LedState::Asserted
        };
        gpio.set_indicator(Indicator::Probe, led);

        delay.delay_ms(POLL_INTERVAL_MS);
    }
}

#[panic_handler]
fn panic_handler(_: &core::panic::PanicInfo) -> ! {
    // We use a BKPT instruction to wake any attached debugger. If no debugger
    // is attached, BKPT escalates into a HardFault, falling to the handler
    // below. This way we can reuse its fault indication code.
    loop {
        cortex_m::asm::bkpt();
    }
}

#[exception]
unsafe fn HardFault(_ef: &ExceptionFrame) -> ! {
    // Safety: we're not racing anyone by definition since we're handling a
    // HardFault. So we win.
    let mut regs = unsafe { Mmio::steal() };
    // Turn on the probe LED. It's active low; the latch may still be high if
    // we faulted before anything touched it.
    let led = LPC11U35_PINS.probe_led;
    regs.write(Reg::GpioClr(led.port), led.mask());
    regs.modify(Reg::GpioDir(led.port), |v| v | led.mask());

    // Spin -- don't use BKPT here because if no debugger is attached it'll
    // escalate to another HardFault and lock the processor.
    loop {
        // This is enough to force LLVM to compile the infinite loop as
        // something other than a UDF, but not enough to generate instructions.
        compiler_fence(Ordering::SeqCst);
    }
}
