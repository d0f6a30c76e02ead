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

/// Coprocessor 0 (System Control)
///
/// COP0 is the system control unit responsible for exception handling,
/// status management and the debug/breakpoint registers. It exposes 64
/// register slots; only the ones with an associated constant carry meaning,
/// the rest are plain storage.
pub(super) struct COP0 {
    /// COP0 registers (64 slots)
    pub(super) regs: [u32; 64],
}

impl COP0 {
    /// Number of register slots
    pub const REGISTER_COUNT: usize = 64;
    /// Breakpoint PC
    pub const BPC: usize = 3;
    /// Breakpoint Data Address
    pub const BDA: usize = 5;
    /// Target Address
    pub const TAR: usize = 6;
    /// Debug and Cache Invalidate Control
    pub const DCIC: usize = 7;
    /// Bad Virtual Address
    pub const BADA: usize = 8;
    /// Data Address Mask
    pub const BDAM: usize = 9;
    /// PC Mask
    pub const BPCM: usize = 11;
    /// Status Register
    pub const SR: usize = 12;
    /// Cause Register
    pub const CAUSE: usize = 13;
    /// Exception PC
    pub const EPC: usize = 14;
    /// Processor ID
    pub const PRID: usize = 15;

    /// R3000A processor revision identifier
    const PRID_VALUE: u32 = 0x0000_0002;

    /// Create a new COP0 instance
    ///
    /// # Returns
    /// Initialized COP0 instance with reset values
    pub(super) fn new() -> Self {
        let mut cop0 = Self {
            regs: [0u32; Self::REGISTER_COUNT],
        };
        cop0.reset();
        cop0
    }

    /// Reset COP0 registers to initial state
    ///
    /// Every slot is cleared except the read-only processor ID.
    pub(super) fn reset(&mut self) {
        self.regs = [0u32; Self::REGISTER_COUNT];
        self.regs[Self::PRID] = Self::PRID_VALUE;
    }

    /// Typed view of the Status Register
    #[inline(always)]
    pub(super) fn status(&self) -> Status {
        Status::from_bits_retain(self.regs[Self::SR])
    }

    #[inline(always)]
    pub(super) fn set_status(&mut self, status: Status) {
        self.regs[Self::SR] = status.bits();
    }

    /// Typed view of the Cause Register
    #[inline(always)]
    pub(super) fn cause(&self) -> Cause {
        Cause::from_bits_retain(self.regs[Self::CAUSE])
    }

    #[inline(always)]
    pub(super) fn set_cause(&mut self, cause: Cause) {
        self.regs[Self::CAUSE] = cause.bits();
    }

    /// Register write as performed by MTC0
    ///
    /// PRId is read-only and only the two software interrupt bits of CAUSE
    /// are writable. All other slots take the value as-is.
    pub(super) fn write(&mut self, index: usize, value: u32) {
        match index {
            Self::PRID => {
                log::debug!("Ignoring write to PRId: 0x{:08X}", value);
            }
            Self::CAUSE => {
                let writable = Cause::SW.bits();
                let cause = self.regs[Self::CAUSE];
                self.regs[Self::CAUSE] = (cause & !writable) | (value & writable);
            }
            _ => self.regs[index % Self::REGISTER_COUNT] = value,
        }
    }

    /// Interrupt request check
    ///
    /// True when interrupts are globally enabled (IEc) and at least one
    /// pending request (software or hardware) is unmasked.
    pub(super) fn interrupt_pending(&self) -> bool {
        let status = self.status();
        let pending = self.regs[Self::CAUSE] & Cause::INTERRUPTS.bits();
        let mask = status.bits() & Status::INTERRUPT_MASK.bits();
        status.flag(Status::IEC) && (pending & mask) != 0
    }
}

bitflags::bitflags! {
    /// COP0 Status Register (SR) layout
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        /// Interrupt Enable (current)
        const IEC = 1 << 0;
        /// Kernel/User mode (current)
        const KUC = 1 << 1;
        /// Interrupt Enable (previous)
        const IEP = 1 << 2;
        /// Kernel/User mode (previous)
        const KUP = 1 << 3;
        /// Interrupt Enable (old)
        const IEO = 1 << 4;
        /// Kernel/User mode (old)
        const KUO = 1 << 5;
        /// The three KU/IE pairs, pushed on exception and popped by RFE
        const MODE_STACK = 0x3F;
        /// Software interrupt mask
        const SW_MASK = 0b11 << 8;
        /// Hardware interrupt mask
        const INTR_MASK = 0x3F << 10;
        /// Full interrupt mask (software + hardware)
        const INTERRUPT_MASK = 0xFF << 8;
        /// Isolate Cache
        const ISC = 1 << 16;
        /// Parity Zero
        const PZ = 1 << 18;
        /// Parity Error
        const PE = 1 << 20;
        /// TLB Shutdown
        const TS = 1 << 21;
        /// Bootstrap Exception Vectors
        const BEV = 1 << 22;
        /// Coprocessor Usability (Cu0-Cu3)
        const CU = 0xF << 28;
        /// COP2 (GTE) usable
        const CU2 = 1 << 30;
    }
}

bitflags::bitflags! {
    /// COP0 Cause Register layout
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cause: u32 {
        /// Exception Code
        const EXC_CODE = 0x1F << 2;
        /// Software interrupt requests
        const SW = 0b11 << 8;
        /// Hardware interrupts pending
        const IP = 0x3F << 10;
        /// Software + hardware requests
        const INTERRUPTS = 0xFF << 8;
        /// Coprocessor Error (unit number)
        const CE = 0b11 << 28;
        /// Branch Taken
        const BT = 1 << 30;
        /// Branch Delay
        const BD = 1 << 31;
    }
}

/// Exception cause codes for MIPS R3000A
///
/// These correspond to the exception codes stored in the CAUSE register
/// when a CPU exception occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExceptionCause {
    /// Interrupt (external or internal)
    Interrupt = 0,
    /// Address error on load or instruction fetch
    AddressErrorLoad = 4,
    /// Address error on store
    AddressErrorStore = 5,
    /// Bus error on instruction fetch
    BusErrorInstruction = 6,
    /// Bus error on data access
    BusErrorData = 7,
    /// Syscall instruction executed
    Syscall = 8,
    /// Breakpoint instruction executed
    Breakpoint = 9,
    /// Reserved or illegal instruction
    ReservedInstruction = 10,
    /// Coprocessor unusable
    CoprocessorUnusable = 11,
    /// Arithmetic overflow
    Overflow = 12,
}
