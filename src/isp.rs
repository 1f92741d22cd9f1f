// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Re-entry into the ROM's USB ISP bootloader.
//!
//! This is the recovery path for a board whose interface firmware is missing
//! or broken: hold the reset button while plugging in, and the chip comes up
//! as the ROM's mass-storage bootloader instead of running us. There is no
//! way back from here. Failures show up as a hung chip, not as an error.

use crate::logging::log_warn;
use crate::regs::{ahbclk, Reg, Registers};
use crate::romapi::{self, IapCommand, COMMAND_WORDS};

/// Value of the mass-storage state word meaning "no valid application, start
/// from scratch".
pub const MSD_STATE_RESET: u32 = 0;

/// Processor-level operations needed to leave the application for good.
pub trait Processor {
    /// Stops SysTick and masks and unpends every NVIC line, so that nothing
    /// can fire once the stack is gone.
    fn disable_interrupts(&mut self);

    /// Stores `command` in the IAP command table. The table must not live on
    /// the stack, since the stack is discarded before the ROM reads it.
    fn load_command(&mut self, command: &[u32; COMMAND_WORDS]);

    /// Resets the main stack pointer to the value in the vector table at
    /// address 0 and calls the IAP entry point with the loaded command table.
    ///
    /// # Safety
    ///
    /// This abandons the current stack. Nothing may run between the stack
    /// pointer write and the ROM call, so both happen in one place, and the
    /// caller's frame is dead on entry. Interrupts must already be disabled
    /// and the clocks set up as the ROM expects (see `reinvoke_isp`).
    unsafe fn enter_rom(&mut self) -> !;
}

/// Hands the chip over to the ROM bootloader.
///
/// The order of the steps below is what the ROM needs. In particular the
/// bootloader does not reconfigure the AHB divider or any of the clocks it
/// uses, so we must leave them the way it expects.
pub fn reinvoke_isp<R: Registers, C: Processor>(regs: &mut R, cpu: &mut C) -> ! {
    log_warn!("reset button held at boot, entering ISP");

    cpu.disable_interrupts();

    // The ROM's USB stack, its timer, GPIO and IOCON all need clocks.
    regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::USB);
    regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::CT32B1);
    regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::GPIO);
    regs.modify(Reg::SysAhbClkCtrl, |v| v | ahbclk::IOCON);

    // AHB clock divider back to 1:1.
    regs.write(Reg::SysAhbClkDiv, 1);

    cpu.load_command(&romapi::command_table(IapCommand::ReinvokeIsp));

    // Makes the storage state machine start over the next time the
    // application runs. Has no effect on the jump itself.
    regs.write(Reg::MsdState, MSD_STATE_RESET);

    // Safety: interrupts are off and the clocks are as the ROM wants them.
    // We never come back, so losing the stack is fine.
    unsafe { cpu.enter_rom() }
}
