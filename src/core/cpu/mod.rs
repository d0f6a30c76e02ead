// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::core::bitfield::PackedRegister;
use crate::core::config::{CpuConfig, UnknownOpcodePolicy};
use crate::core::memory::{physical_address, Bus, Segment};
use crate::core::timing::Clock;

/// CPU (MIPS R3000A / R3051) emulation implementation
///
/// # Specifications
/// - Architecture: MIPS I (32-bit)
/// - Clock frequency: 33.8688 MHz
/// - Registers: 32 general-purpose registers + HI/LO + COP0
/// - 4KB instruction cache, enabled through the cache control register
///
/// # Pipeline Model
///
/// Every call to [`tick`](CPU::tick) runs one instruction:
///
/// 1. Record `current_pc` (used for exception reporting)
/// 2. Fetch through the instruction cache and advance PC by 4
/// 3. Promote branch/load effects decided last tick to "active"
/// 4. Execute (or take a pending interrupt)
/// 5. Commit the active branch target to PC
/// 6. Commit the active delayed load to the register file
/// 7. Charge one cycle
///
/// # Example
/// ```
/// use psxcore::core::cpu::CPU;
///
/// let mut cpu = CPU::new();
/// cpu.reset();
/// assert_eq!(cpu.reg(0), 0); // r0 is always 0
/// assert_eq!(cpu.pc(), 0xBFC00000);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31)
    ///
    /// r0 is hardwired to always return 0
    regs: [u32; 32],

    /// Address of the next instruction to fetch
    pc: u32,

    /// Address of the instruction currently executing
    current_pc: u32,

    /// HI register (multiplication/division result upper 32 bits)
    hi: u32,

    /// LO register (multiplication/division result lower 32 bits)
    lo: u32,

    /// Coprocessor 0 (System Control Unit)
    cop0: COP0,

    /// Branch delay slot: target PC decided by a branch or jump
    branch_delay: DelaySlot<u32>,

    /// Load delay slot: register write decided by a load
    load_delay: DelaySlot<LoadDelay>,

    /// Cache control register (0xFFFE0130)
    cache_control: CacheControl,

    /// Instruction cache
    icache: InstructionCache,

    /// Handling of undecoded opcodes
    unknown_opcode: UnknownOpcodePolicy,

    /// Current instruction (for debugging and exception logging)
    current_instruction: u32,
}

// Module declarations
mod access;
mod cop0;
mod decode;
mod delay;
pub mod icache;
mod instructions;
#[cfg(test)]
mod tests;

// Re-exports
pub use cop0::{Cause, ExceptionCause, Status};
use cop0::COP0;
pub use delay::{DelaySlot, LoadDelay};
pub use icache::{CacheControl, InstructionCache};

impl CPU {
    /// Reset vector (BIOS entry point)
    pub const RESET_VECTOR: u32 = 0xBFC0_0000;

    /// General exception vector (SR.BEV = 0)
    pub const EXCEPTION_VECTOR: u32 = 0x8000_0080;

    /// Bootstrap exception vector (SR.BEV = 1)
    pub const BOOT_EXCEPTION_VECTOR: u32 = 0xBFC0_0180;

    /// Create a new CPU instance with initial state
    ///
    /// The CPU is initialized with the following state:
    /// - All general purpose registers, HI and LO: 0
    /// - PC: 0xBFC00000 (BIOS entry point)
    /// - COP0: all registers 0 except PRId (0x00000002)
    /// - Instruction cache: disabled and empty
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(&CpuConfig::default())
    }

    /// Create a CPU using the given configuration
    pub fn with_config(config: &CpuConfig) -> Self {
        Self {
            regs: [0u32; 32],
            pc: Self::RESET_VECTOR,
            current_pc: Self::RESET_VECTOR,
            hi: 0,
            lo: 0,
            cop0: COP0::new(),
            branch_delay: DelaySlot::new(),
            load_delay: DelaySlot::new(),
            cache_control: CacheControl::empty(),
            icache: InstructionCache::new(),
            unknown_opcode: config.unknown_opcode,
            current_instruction: 0,
        }
    }

    /// Reset CPU to initial state
    ///
    /// Clears the register file, COP0, both delay slots, the cache control
    /// register and the instruction cache. This mimics the behavior of
    /// power-on or hardware reset.
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(5, 42);
    /// cpu.reset();
    /// assert_eq!(cpu.reg(5), 0);
    /// ```
    pub fn reset(&mut self) {
        self.regs = [0u32; 32];
        self.pc = Self::RESET_VECTOR;
        self.current_pc = Self::RESET_VECTOR;
        self.hi = 0;
        self.lo = 0;
        self.cop0.reset();
        self.branch_delay.clear();
        self.load_delay.clear();
        self.cache_control = CacheControl::empty();
        self.icache.clear();
        self.current_instruction = 0;
    }

    /// Read from general purpose register
    ///
    /// # Arguments
    /// - `index`: Register number (0-31)
    ///
    /// # Returns
    /// Register value. r0 always returns 0.
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0); // r0 is always 0
    /// ```
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        if index == 0 {
            0
        } else {
            self.regs[(index & 0x1F) as usize]
        }
    }

    /// Write to general purpose register
    ///
    /// A direct write wins over a delayed load to the same register that
    /// is due this cycle: the delayed value is discarded.
    ///
    /// # Arguments
    /// - `index`: Register number (0-31)
    /// - `value`: Value to write
    ///
    /// # Note
    /// Writes to r0 are ignored (r0 is always 0).
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(1, 0x12345678);
    /// assert_eq!(cpu.reg(1), 0x12345678);
    ///
    /// // Writes to r0 are ignored
    /// cpu.set_reg(0, 0xDEADBEEF);
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u32) {
        if matches!(self.load_delay.current(), Some(delay) if delay.reg == index) {
            self.load_delay.cancel_current();
        }
        if index != 0 {
            self.regs[(index & 0x1F) as usize] = value;
        }
    }

    /// Write to register with load delay
    ///
    /// The result of a load becomes visible one instruction late. If the
    /// load that is due this cycle targets the same register it is
    /// superseded; otherwise it is committed immediately so that it is not
    /// lost. The new value is then latched for the next cycle.
    ///
    /// Loads into r0 are never latched.
    ///
    /// # Arguments
    /// - `index`: Target register number (0-31)
    /// - `value`: Value to load
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg_delayed(3, 100);
    /// // At this point, r3 does not yet have the value
    /// assert_eq!(cpu.reg(3), 0);
    /// ```
    pub fn set_reg_delayed(&mut self, index: u8, value: u32) {
        if let Some(active) = self.load_delay.take_current() {
            if active.reg != index {
                self.regs[active.reg as usize] = active.value;
            }
        }

        if index != 0 {
            self.load_delay.schedule(LoadDelay {
                reg: index & 0x1F,
                value,
            });
        }
    }

    /// Schedule a jump to `target` after the delay slot
    ///
    /// If a branch is already active for this cycle (a branch in a branch
    /// delay slot) the newest decision wins and the active one is dropped.
    pub(in crate::core::cpu) fn branch(&mut self, target: u32) {
        if let Some(dropped) = self.branch_delay.current() {
            log::warn!(
                "Branch in delay slot at PC=0x{:08X}: dropping target 0x{:08X} for 0x{:08X}",
                self.current_pc,
                dropped,
                target
            );
            self.branch_delay.cancel_current();
        }
        self.branch_delay.schedule(target);
    }

    /// Execute one instruction
    ///
    /// Runs one full fetch/execute/commit cycle. Errors from the bus never
    /// escape: a failed fetch raises a bus error on instruction fetch
    /// (IBE) and a failed data access raises a bus error on data (DBE).
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory bus for instruction fetches and data accesses
    /// * `clock` - Receives the fetch cost plus one cycle per tick
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::cpu::CPU;
    /// use psxcore::core::memory::{Bus, Ram};
    /// use psxcore::core::timing::CycleCounter;
    ///
    /// let mut cpu = CPU::new();
    /// let mut ram = Ram::new(0x100);
    /// let mut clock = CycleCounter::new();
    ///
    /// ram.write32(0, 0x24010005).unwrap(); // addiu r1, r0, 5
    /// cpu.set_pc(0);
    /// cpu.tick(&mut ram, &mut clock);
    ///
    /// assert_eq!(cpu.reg(1), 5);
    /// assert_eq!(clock.cycles(), 5); // uncached fetch (4) + tick (1)
    /// ```
    pub fn tick<B: Bus + ?Sized, C: Clock + ?Sized>(&mut self, bus: &mut B, clock: &mut C) {
        self.current_pc = self.pc;

        let fetched = self.fetch(bus);
        self.pc = self.pc.wrapping_add(4);

        // Decisions made last cycle take effect this cycle
        self.branch_delay.advance();
        self.load_delay.advance();

        match fetched {
            Ok(fetch) => {
                clock.consume(fetch.cycles);
                self.current_instruction = fetch.word;

                if self.cop0.interrupt_pending() {
                    self.exception(ExceptionCause::Interrupt);
                } else if let Err(e) = self.execute_instruction(bus) {
                    log::warn!(
                        "Data bus error at PC=0x{:08X} (instruction 0x{:08X}): {}",
                        self.current_pc,
                        self.current_instruction,
                        e
                    );
                    self.exception(ExceptionCause::BusErrorData);
                }
            }
            Err(cause) => {
                self.current_instruction = 0;
                self.exception(cause);
            }
        }

        if let Some(target) = self.branch_delay.take_current() {
            self.pc = target;
        }

        if let Some(load) = self.load_delay.take_current() {
            self.regs[load.reg as usize] = load.value;
        }

        clock.consume(1);
    }

    /// Fetch the instruction at PC
    ///
    /// The instruction cache takes part only when IS1 is set in the cache
    /// control register and PC lies in a cached segment (KUSEG/KSEG0).
    fn fetch<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
    ) -> std::result::Result<icache::Fetch, ExceptionCause> {
        let pc = self.pc;
        if pc & 0x3 != 0 {
            self.cop0.regs[COP0::BADA] = pc;
            return Err(ExceptionCause::AddressErrorLoad);
        }

        let cached = self.cache_control.contains(CacheControl::IS1)
            && matches!(Segment::of(pc), Segment::Kuseg | Segment::Kseg0);

        self.icache
            .fetch(bus, physical_address(pc), cached)
            .map_err(|e| {
                log::warn!("Instruction fetch failed at 0x{:08X}: {}", pc, e);
                ExceptionCause::BusErrorInstruction
            })
    }

    /// Raise a CPU exception
    ///
    /// Records the cause and whether the faulting instruction sat in a
    /// branch delay slot (CAUSE.BD), sets EPC to the faulting instruction
    /// (or to the branch before it when in a delay slot), pushes the SR
    /// KU/IE mode stack and jumps to the exception vector selected by
    /// SR.BEV. Any in-flight branch is discarded; delayed loads are not.
    ///
    /// # Arguments
    ///
    /// * `cause` - Exception code stored in CAUSE.ExcCode
    pub fn exception(&mut self, cause: ExceptionCause) {
        let in_delay_slot = self.branch_delay.current().is_some();

        // Push KU/IE (c→p, p→o) and enter kernel with interrupts disabled
        let mut status = self.cop0.status();
        let mode = status.field(Status::MODE_STACK);
        status.set_field(Status::MODE_STACK, mode << 2);
        self.cop0.set_status(status);

        let mut cause_reg = self.cop0.cause();
        cause_reg.set_field(Cause::EXC_CODE, cause as u32);
        cause_reg.set_flag(Cause::BD, in_delay_slot);
        self.cop0.set_cause(cause_reg);

        let epc = if in_delay_slot {
            self.current_pc.wrapping_sub(4)
        } else {
            self.current_pc
        };
        self.cop0.regs[COP0::EPC] = epc;

        let handler = if status.flag(Status::BEV) {
            Self::BOOT_EXCEPTION_VECTOR
        } else {
            Self::EXCEPTION_VECTOR
        };

        log::debug!(
            "EXCEPTION: cause={:?}, EPC=0x{:08X}, handler=0x{:08X}, in_delay={}, instruction=0x{:08X}",
            cause,
            epc,
            handler,
            in_delay_slot,
            self.current_instruction
        );

        self.pc = handler;
        self.branch_delay.clear();
    }

    /// Raise an address error, recording the offending address in BadA
    pub(in crate::core::cpu) fn address_error(&mut self, cause: ExceptionCause, address: u32) {
        self.cop0.regs[COP0::BADA] = address;
        self.exception(cause);
    }

    /// Raise a coprocessor unusable exception for unit `cop`
    pub(in crate::core::cpu) fn coprocessor_unusable(&mut self, cop: u8) {
        let mut cause = self.cop0.cause();
        cause.set_field(Cause::CE, cop as u32);
        self.cop0.set_cause(cause);
        self.exception(ExceptionCause::CoprocessorUnusable);
    }

    /// Drive the hardware interrupt request lines
    ///
    /// `lines` holds the six external request lines in bits 0-5; they are
    /// mirrored into CAUSE.IP (bits 10-15). Whether an interrupt is taken
    /// is decided at the start of the next [`tick`](CPU::tick).
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_interrupt_lines(0b000100);
    /// assert_eq!(cpu.cop0_reg(13) & 0xFC00, 0x1000);
    /// ```
    pub fn set_interrupt_lines(&mut self, lines: u32) {
        let mut cause = self.cop0.cause();
        cause.set_field(Cause::IP, lines);
        self.cop0.set_cause(cause);
    }

    /// Check if the instruction executing this cycle sits in a branch delay slot
    pub fn in_delay_slot(&self) -> bool {
        self.branch_delay.current().is_some()
    }

    /// Get current PC value (address of the next fetch)
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Redirect execution to `pc`, discarding any in-flight branch
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.branch_delay.clear();
    }

    /// Address of the instruction executed by the last tick
    pub fn current_pc(&self) -> u32 {
        self.current_pc
    }

    /// Raw word of the instruction executed by the last tick
    pub fn current_instruction(&self) -> u32 {
        self.current_instruction
    }

    /// HI register
    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// LO register
    pub fn lo(&self) -> u32 {
        self.lo
    }

    /// Read a COP0 register slot (0-63)
    pub fn cop0_reg(&self, index: usize) -> u32 {
        self.cop0.regs[index % COP0::REGISTER_COUNT]
    }

    /// Write a COP0 register slot with MTC0 semantics
    pub fn set_cop0_reg(&mut self, index: usize, value: u32) {
        self.cop0.write(index % COP0::REGISTER_COUNT, value);
    }

    /// Current cache control register value
    pub fn cache_control(&self) -> CacheControl {
        self.cache_control
    }

    /// Instruction cache state
    pub fn icache(&self) -> &InstructionCache {
        &self.icache
    }

    /// Delayed load that will commit at the end of the next tick, if any
    pub fn pending_load(&self) -> Option<LoadDelay> {
        self.load_delay.next()
    }

    /// Branch target that will be committed at the end of the next tick, if any
    pub fn pending_branch(&self) -> Option<u32> {
        self.branch_delay.next()
    }

    /// Handle an opcode the decoder does not recognise
    fn unknown_instruction(&mut self, kind: &str, code: u32) {
        log::warn!(
            "Unknown {} 0x{:02X} (instruction 0x{:08X}) at PC=0x{:08X}",
            kind,
            code,
            self.current_instruction,
            self.current_pc
        );
        if self.unknown_opcode == UnknownOpcodePolicy::ReservedInstruction {
            self.exception(ExceptionCause::ReservedInstruction);
        }
    }

    /// Dump all CPU registers for debugging
    ///
    /// Prints a formatted dump of all CPU state including:
    /// - Program counter (PC) and current PC
    /// - HI and LO registers
    /// - All 32 general-purpose registers
    /// - COP0 status registers (SR, CAUSE, EPC)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// cpu.dump_registers(); // Print all register values
    /// ```
    pub fn dump_registers(&self) {
        println!("CPU Registers:");
        println!(
            "PC: 0x{:08X}  Current PC: 0x{:08X}",
            self.pc, self.current_pc
        );
        println!("HI: 0x{:08X}  LO: 0x{:08X}", self.hi, self.lo);
        println!();

        for i in 0..32 {
            if i % 4 == 0 && i > 0 {
                println!();
            }
            print!("r{:2}: 0x{:08X}  ", i, self.reg(i));
        }
        println!("\n");

        println!("COP0 Registers:");
        println!("SR:    0x{:08X}", self.cop0.regs[COP0::SR]);
        println!("CAUSE: 0x{:08X}", self.cop0.regs[COP0::CAUSE]);
        println!("EPC:   0x{:08X}", self.cop0.regs[COP0::EPC]);
        println!("BADA:  0x{:08X}", self.cop0.regs[COP0::BADA]);
        println!("PRID:  0x{:08X}", self.cop0.regs[COP0::PRID]);
        println!("CACHE: 0x{:08X}", self.cache_control.bits());
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}
