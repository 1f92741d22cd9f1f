// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named hardware registers and the capability used to access them.
//!
//! Drivers in this crate never dereference addresses themselves. They go
//! through a `Registers` implementation, which on the chip is a thin volatile
//! MMIO shim (`hic::lpc11u35::Mmio`) and in tests is an in-memory fake.

/// LPC11U35 peripheral base addresses.
pub const SYSCON_BASE: usize = 0x4004_8000;
pub const IOCON_BASE: usize = 0x4004_4000;
pub const GPIO_BASE: usize = 0x5000_0000;

/// RAM word shared with the mass-storage state machine. Writing
/// `MSD_STATE_RESET` here makes it start over the next time the interface
/// firmware runs.
pub const MSD_STATE_ADDR: usize = 0x1000_0054;

/// Bits of SYSAHBCLKCTRL.
pub mod ahbclk {
    pub const GPIO: u32 = 1 << 6;
    pub const CT32B1: u32 = 1 << 10;
    pub const USB: u32 = 1 << 14;
    pub const IOCON: u32 = 1 << 16;
    pub const PINT: u32 = 1 << 19;
    pub const GROUP0INT: u32 = 1 << 23;
    pub const GROUP1INT: u32 = 1 << 24;
}

/// Registers this crate touches. GPIO registers are indexed by port.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    SysAhbClkDiv,
    SysAhbClkCtrl,
    /// Pin configuration word for `PIO<port>_<bit>`.
    Iocon { port: u8, bit: u8 },
    GpioDir(u8),
    GpioPin(u8),
    GpioSet(u8),
    GpioClr(u8),
    MsdState,
}

impl Reg {
    /// Memory-mapped address of the register.
    pub const fn address(self) -> usize {
        match self {
            Reg::SysAhbClkDiv => SYSCON_BASE + 0x078,
            Reg::SysAhbClkCtrl => SYSCON_BASE + 0x080,
            Reg::Iocon { port: 0, bit } => IOCON_BASE + 4 * bit as usize,
            Reg::Iocon { port: _, bit } => IOCON_BASE + 0x60 + 4 * bit as usize,
            Reg::GpioDir(port) => GPIO_BASE + 0x2000 + 4 * port as usize,
            Reg::GpioPin(port) => GPIO_BASE + 0x2100 + 4 * port as usize,
            Reg::GpioSet(port) => GPIO_BASE + 0x2200 + 4 * port as usize,
            Reg::GpioClr(port) => GPIO_BASE + 0x2280 + 4 * port as usize,
            Reg::MsdState => MSD_STATE_ADDR,
        }
    }
}

/// Typed access to the registers above.
pub trait Registers {
    fn read(&mut self, reg: Reg) -> u32;

    fn write(&mut self, reg: Reg, value: u32);

    /// Read-modify-write.
    fn modify(&mut self, reg: Reg, f: impl FnOnce(u32) -> u32) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}
