// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! NXP LPC11U35 (Cortex-M0).

use core::ptr;

use cortex_m::peripheral::{NVIC, SYST};
use embedded_hal::delay::DelayNs;

use crate::isp::Processor;
use crate::regs::{Reg, Registers};
use crate::romapi::{COMMAND_WORDS, IAP_ENTRY, RESULT_WORDS};

/// Core clock once the USB PLL is running.
pub const SYSTEM_CLOCK_HZ: u32 = 48_000_000;

/// Volatile access to the chip's registers at their fixed addresses.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// The registers in `Reg` are shared chip state. Callers holding more
    /// than one `Mmio` must make sure they don't fight over the same bits.
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl Registers for Mmio {
    fn read(&mut self, reg: Reg) -> u32 {
        // Safety: every `Reg` maps to an aligned, always-present word.
        unsafe { ptr::read_volatile(reg.address() as *const u32) }
    }

    fn write(&mut self, reg: Reg, value: u32) {
        // Safety: as above.
        unsafe { ptr::write_volatile(reg.address() as *mut u32, value) }
    }
}

// The IAP tables. These must be statics: by the time the ROM reads them our
// stack has been thrown away.
static mut IAP_COMMAND: [u32; COMMAND_WORDS] = [0; COMMAND_WORDS];
static mut IAP_RESULT: [u32; RESULT_WORDS] = [0; RESULT_WORDS];

pub struct Cpu {
    nvic: NVIC,
    syst: SYST,
}

impl Cpu {
    pub fn new(nvic: NVIC, syst: SYST) -> Self {
        Self { nvic, syst }
    }
}

impl Processor for Cpu {
    fn disable_interrupts(&mut self) {
        self.syst.disable_interrupt();
        self.syst.disable_counter();

        // The M0 has 32 external interrupt lines, so a single ICER/ICPR word
        // covers all of them.
        //
        // Safety: masking interrupts cannot break any of our invariants.
        unsafe {
            self.nvic.icer[0].write(0xffff_ffff);
            self.nvic.icpr[0].write(0xffff_ffff);
        }
    }

    fn load_command(&mut self, command: &[u32; COMMAND_WORDS]) {
        // Safety: single execution context and interrupts are off; nobody
        // else touches the table.
        unsafe { ptr::write_volatile(ptr::addr_of_mut!(IAP_COMMAND), *command) }
    }

    unsafe fn enter_rom(&mut self) -> ! {
        // These are values, not references into our frame, so they survive
        // the stack switch in registers.
        let command = ptr::addr_of!(IAP_COMMAND) as u32;
        let result = ptr::addr_of_mut!(IAP_RESULT) as u32;

        core::arch::asm!(
            "
                @ Usage of registers established by the parameters below:
                @ r0 = IAP command table
                @ r1 = IAP result table
                @ r2 = IAP entry point

                @ Reload the main stack pointer from word 0 of the vector
                @ table, as after a power-on reset. Our stack is gone after
                @ this; nothing may touch it.
                movs r3, #0
                ldr r3, [r3]
                msr MSP, r3

                @ Into the ROM. Reinvoke ISP does not come back; if it does
                @ anyway, there is nothing sensible left to do but spin.
                blx r2
            1:  b 1b
            ",
            in("r0") command,
            in("r1") result,
            in("r2") IAP_ENTRY,
            options(noreturn),
        )
    }
}

/// Busy-wait delay counted in core clock cycles.
pub struct AsmDelay {
    hz: u32,
}

impl AsmDelay {
    pub const fn new(hz: u32) -> Self {
        Self { hz }
    }
}

impl DelayNs for AsmDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (u64::from(ns) * u64::from(self.hz)).div_ceil(1_000_000_000);
        cortex_m::asm::delay(cycles as u32);
    }
}
