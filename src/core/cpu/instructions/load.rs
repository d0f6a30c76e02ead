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

use super::super::decode::{decode_i_type, sign_extend_imm};
use super::super::{ExceptionCause, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Load Instructions ===
    //
    // Every load goes through the load delay slot: the value becomes
    // visible to the instruction after next.

    /// Effective address `rs + sign_extend(offset)` and target register
    #[inline(always)]
    fn load_operands(&self, instruction: u32) -> (u32, u8) {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        (self.reg(rs).wrapping_add(sign_extend_imm(imm)), rt)
    }

    /// LW: Load Word (32-bit)
    ///
    /// Loads a 32-bit word from memory with load delay slot.
    /// The address must be 4-byte aligned.
    ///
    /// Format: lw rt, offset(rs)
    /// Operation: rt = memory[rs + sign_extend(offset)]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    /// * `bus` - Memory bus for reading
    ///
    /// # Returns
    ///
    /// Ok(()) on success (AddressErrorLoad is raised internally on
    /// misalignment), or the bus error of the read
    pub(in crate::core::cpu) fn op_lw<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);

        if addr & 0x3 != 0 {
            self.address_error(ExceptionCause::AddressErrorLoad, addr);
            return Ok(());
        }

        let value = self.read32(bus, addr)?;
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LH: Load Halfword (16-bit, sign-extended, 2-byte aligned)
    pub(in crate::core::cpu) fn op_lh<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);

        if addr & 0x1 != 0 {
            self.address_error(ExceptionCause::AddressErrorLoad, addr);
            return Ok(());
        }

        let value = self.read16(bus, addr)? as i16 as i32 as u32;
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LHU: Load Halfword Unsigned (16-bit, zero-extended, 2-byte aligned)
    pub(in crate::core::cpu) fn op_lhu<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);

        if addr & 0x1 != 0 {
            self.address_error(ExceptionCause::AddressErrorLoad, addr);
            return Ok(());
        }

        let value = self.read16(bus, addr)? as u32;
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LB: Load Byte (sign-extended)
    pub(in crate::core::cpu) fn op_lb<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);
        let value = self.read8(bus, addr)? as i8 as i32 as u32;
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LBU: Load Byte Unsigned
    pub(in crate::core::cpu) fn op_lbu<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);
        let value = self.read8(bus, addr)? as u32;
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// Register value an unaligned load merges into
    ///
    /// LWL/LWR see the result of a load to the same register that is
    /// still in its delay slot, which is what lets an `lwl`/`lwr` pair
    /// assemble one word without a NOP in between.
    fn unaligned_merge_base(&self, rt: u8) -> u32 {
        match self.load_delay.current() {
            Some(delay) if delay.reg == rt => delay.value,
            _ => self.reg(rt),
        }
    }

    /// LWL: Load Word Left
    ///
    /// Loads the most significant bytes of an unaligned word into the
    /// upper part of rt (little-endian).
    ///
    /// | addr & 3 | Result                          |
    /// |----------|---------------------------------|
    /// | 0        | (rt & 0x00FFFFFF) \| (mem << 24) |
    /// | 1        | (rt & 0x0000FFFF) \| (mem << 16) |
    /// | 2        | (rt & 0x000000FF) \| (mem << 8)  |
    /// | 3        | mem                             |
    pub(in crate::core::cpu) fn op_lwl<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);
        let current = self.unaligned_merge_base(rt);
        let word = self.read32(bus, addr & !0x3)?;

        let value = match addr & 0x3 {
            0 => (current & 0x00FF_FFFF) | (word << 24),
            1 => (current & 0x0000_FFFF) | (word << 16),
            2 => (current & 0x0000_00FF) | (word << 8),
            _ => word,
        };

        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// LWR: Load Word Right
    ///
    /// Loads the least significant bytes of an unaligned word into the
    /// lower part of rt (little-endian).
    ///
    /// | addr & 3 | Result                          |
    /// |----------|---------------------------------|
    /// | 0        | mem                             |
    /// | 1        | (rt & 0xFF000000) \| (mem >> 8)  |
    /// | 2        | (rt & 0xFFFF0000) \| (mem >> 16) |
    /// | 3        | (rt & 0xFFFFFF00) \| (mem >> 24) |
    pub(in crate::core::cpu) fn op_lwr<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, rt) = self.load_operands(instruction);
        let current = self.unaligned_merge_base(rt);
        let word = self.read32(bus, addr & !0x3)?;

        let value = match addr & 0x3 {
            0 => word,
            1 => (current & 0xFF00_0000) | (word >> 8),
            2 => (current & 0xFFFF_0000) | (word >> 16),
            _ => (current & 0xFFFF_FF00) | (word >> 24),
        };

        self.set_reg_delayed(rt, value);
        Ok(())
    }
}
