// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordering of the ROM hand-off.

mod common;

use common::{enters_rom, FakeCpu, FakeRegisters, Log, Op};
use hiclink::isp::{reinvoke_isp, MSD_STATE_RESET};
use hiclink::regs::{ahbclk, Reg};

fn run() -> (Log, FakeRegisters) {
    let log = Log::default();
    let mut regs = FakeRegisters::new(&log);
    let mut cpu = FakeCpu::new(&log);
    let handle = regs.clone();
    assert!(enters_rom(|| {
        reinvoke_isp(&mut regs, &mut cpu);
    }));
    (log, handle)
}

#[test]
fn steps_happen_in_order() {
    let (log, _) = run();

    let irq_off = log.position(|op| *op == Op::DisableInterrupts).unwrap();
    let last_clock = log
        .rposition(|op| matches!(op, Op::Write(Reg::SysAhbClkCtrl, _)))
        .unwrap();
    let divider = log.position(|op| *op == Op::Write(Reg::SysAhbClkDiv, 1)).unwrap();
    let command = log
        .position(|op| matches!(op, Op::LoadCommand(_)))
        .unwrap();
    let sentinel = log
        .position(|op| *op == Op::Write(Reg::MsdState, MSD_STATE_RESET))
        .unwrap();
    let rom = log.position(|op| *op == Op::EnterRom).unwrap();

    assert!(irq_off < last_clock);
    assert!(last_clock < divider);
    assert!(divider < command);
    assert!(command < sentinel);
    assert!(sentinel < rom);
    assert_eq!(rom, log.ops().len() - 1);
}

#[test]
fn interrupts_go_first() {
    let (log, _) = run();
    assert_eq!(log.ops().first(), Some(&Op::DisableInterrupts));
}

#[test]
fn clocks_the_rom_needs_are_on() {
    let (_, regs) = run();
    let clocks = regs.value(Reg::SysAhbClkCtrl);
    for bit in [ahbclk::USB, ahbclk::CT32B1, ahbclk::GPIO, ahbclk::IOCON] {
        assert_ne!(clocks & bit, 0, "clock bit {bit:#x} off");
    }
    assert_eq!(regs.value(Reg::SysAhbClkDiv), 1);
}

#[test]
fn clock_enables_preserve_other_bits() {
    let log = Log::default();
    let mut regs = FakeRegisters::new(&log);
    let mut cpu = FakeCpu::new(&log);
    let handle = regs.clone();
    // Pretend the application had the SSP0 clock (bit 11) running.
    hiclink::regs::Registers::write(&mut regs, Reg::SysAhbClkCtrl, 1 << 11);

    assert!(enters_rom(|| {
        reinvoke_isp(&mut regs, &mut cpu);
    }));
    assert_ne!(handle.value(Reg::SysAhbClkCtrl) & (1 << 11), 0);
}

#[test]
fn command_is_reinvoke_isp() {
    let (log, _) = run();
    let commands: Vec<_> = log
        .ops()
        .into_iter()
        .filter(|op| matches!(op, Op::LoadCommand(_)))
        .collect();
    assert_eq!(commands, vec![Op::LoadCommand([57, 0, 0, 0, 0])]);
}

#[test]
fn storage_state_word_is_reset() {
    let (log, regs) = run();
    assert!(log.writes().contains(&(Reg::MsdState, MSD_STATE_RESET)));
    assert_eq!(regs.value(Reg::MsdState), MSD_STATE_RESET);
}
