// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory stand-ins for the hardware capabilities.
//!
//! Every fake appends to one shared `Log`, so tests can check the order in
//! which registers, delays, the processor and target control were touched.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use hiclink::isp::Processor;
use hiclink::pins::PinConfig;
use hiclink::regs::{Reg, Registers};
use hiclink::romapi::COMMAND_WORDS;
use hiclink::target::{TargetControl, TargetState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Read(Reg),
    Write(Reg, u32),
    DelayNs(u32),
    DisableInterrupts,
    LoadCommand([u32; COMMAND_WORDS]),
    EnterRom,
    Target(TargetState),
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Op>>>);

impl Log {
    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Index of the first op matching `f`.
    pub fn position(&self, f: impl Fn(&Op) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(f)
    }

    /// Index of the last op matching `f`.
    pub fn rposition(&self, f: impl Fn(&Op) -> bool) -> Option<usize> {
        self.0.borrow().iter().rposition(f)
    }

    pub fn targets(&self) -> Vec<TargetState> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Target(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(Reg, u32)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Write(r, v) => Some((*r, *v)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Default)]
struct Chip {
    /// Register contents by address. Unwritten registers read as 0.
    mem: HashMap<usize, u32>,
    /// GPIO output latches by port, as driven through SET/CLR.
    latch: HashMap<u8, u32>,
}

/// Register file backed by a map, with programmable input levels.
#[derive(Clone)]
pub struct FakeRegisters {
    log: Log,
    chip: Rc<RefCell<Chip>>,
}

impl FakeRegisters {
    /// All inputs start high: jumpers open, button released.
    pub fn new(log: &Log) -> Self {
        let regs = Self {
            log: log.clone(),
            chip: Rc::default(),
        };
        {
            let mut chip = regs.chip.borrow_mut();
            chip.mem.insert(Reg::GpioPin(0).address(), u32::MAX);
            chip.mem.insert(Reg::GpioPin(1).address(), u32::MAX);
        }
        regs
    }

    pub fn set_level(&self, pin: PinConfig, high: bool) {
        let mut chip = self.chip.borrow_mut();
        let word = chip.mem.entry(Reg::GpioPin(pin.port).address()).or_default();
        if high {
            *word |= pin.mask();
        } else {
            *word &= !pin.mask();
        }
    }

    pub fn value(&self, reg: Reg) -> u32 {
        self.chip.borrow().mem.get(&reg.address()).copied().unwrap_or(0)
    }

    /// Level the output latch drives on `pin`.
    pub fn output_high(&self, pin: PinConfig) -> bool {
        let chip = self.chip.borrow();
        chip.latch.get(&pin.port).copied().unwrap_or(0) & pin.mask() != 0
    }
}

impl Registers for FakeRegisters {
    fn read(&mut self, reg: Reg) -> u32 {
        self.log.push(Op::Read(reg));
        self.value(reg)
    }

    fn write(&mut self, reg: Reg, value: u32) {
        self.log.push(Op::Write(reg, value));
        let mut chip = self.chip.borrow_mut();
        match reg {
            Reg::GpioSet(port) => *chip.latch.entry(port).or_default() |= value,
            Reg::GpioClr(port) => *chip.latch.entry(port).or_default() &= !value,
            _ => {
                chip.mem.insert(reg.address(), value);
            }
        }
    }
}

/// Delay that returns at once and logs how long it was asked to wait.
pub struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Op::DelayNs(ns));
    }
}

pub struct RecordingTarget {
    log: Log,
}

impl RecordingTarget {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl TargetControl for RecordingTarget {
    fn set_state(&mut self, state: TargetState) {
        self.log.push(Op::Target(state));
    }
}

/// Processor whose ROM entry logs and panics instead of jumping.
pub struct FakeCpu {
    log: Log,
}

pub const ROM_ENTERED: &str = "entered ROM";

impl FakeCpu {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl Processor for FakeCpu {
    fn disable_interrupts(&mut self) {
        self.log.push(Op::DisableInterrupts);
    }

    fn load_command(&mut self, command: &[u32; COMMAND_WORDS]) {
        self.log.push(Op::LoadCommand(*command));
    }

    unsafe fn enter_rom(&mut self) -> ! {
        self.log.push(Op::EnterRom);
        panic!("{}", ROM_ENTERED);
    }
}

/// Runs `f`, returning true if it ended by entering the ROM.
pub fn enters_rom(f: impl FnOnce()) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => false,
        Err(payload) => match payload.downcast_ref::<String>() {
            Some(msg) if msg == ROM_ENTERED => true,
            _ => panic::resume_unwind(payload),
        },
    }
}
