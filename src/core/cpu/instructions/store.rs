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
    // === Store Instructions ===

    /// Effective address `rs + sign_extend(offset)` and the value of rt
    #[inline(always)]
    fn store_operands(&self, instruction: u32) -> (u32, u32) {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        (self.reg(rs).wrapping_add(sign_extend_imm(imm)), self.reg(rt))
    }

    /// SW: Store Word
    ///
    /// Format: sw rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt
    ///
    /// # Returns
    ///
    /// Ok(()) on success (AddressErrorStore is raised internally on
    /// misalignment), or the bus error of the write
    pub(in crate::core::cpu) fn op_sw<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, value) = self.store_operands(instruction);

        if addr & 0x3 != 0 {
            self.address_error(ExceptionCause::AddressErrorStore, addr);
            return Ok(());
        }

        self.write32(bus, addr, value)
    }

    /// SH: Store Halfword (2-byte aligned)
    pub(in crate::core::cpu) fn op_sh<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, value) = self.store_operands(instruction);

        if addr & 0x1 != 0 {
            self.address_error(ExceptionCause::AddressErrorStore, addr);
            return Ok(());
        }

        self.write16(bus, addr, value as u16)
    }

    /// SB: Store Byte
    pub(in crate::core::cpu) fn op_sb<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, value) = self.store_operands(instruction);
        self.write8(bus, addr, value as u8)
    }

    /// SWL: Store Word Left
    ///
    /// Stores the most significant bytes of rt into the aligned word
    /// containing `addr`, read-modify-write.
    pub(in crate::core::cpu) fn op_swl<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, value) = self.store_operands(instruction);
        let aligned = addr & !0x3;
        let mem = self.read32(bus, aligned)?;

        let merged = match addr & 0x3 {
            0 => (mem & 0xFFFF_FF00) | (value >> 24),
            1 => (mem & 0xFFFF_0000) | (value >> 16),
            2 => (mem & 0xFF00_0000) | (value >> 8),
            _ => value,
        };

        self.write32(bus, aligned, merged)
    }

    /// SWR: Store Word Right
    ///
    /// Stores the least significant bytes of rt into the aligned word
    /// containing `addr`, read-modify-write.
    pub(in crate::core::cpu) fn op_swr<B: Bus + ?Sized>(
        &mut self,
        instruction: u32,
        bus: &mut B,
    ) -> Result<()> {
        let (addr, value) = self.store_operands(instruction);
        let aligned = addr & !0x3;
        let mem = self.read32(bus, aligned)?;

        let merged = match addr & 0x3 {
            0 => value,
            1 => (mem & 0x0000_00FF) | (value << 8),
            2 => (mem & 0x0000_FFFF) | (value << 16),
            _ => (mem & 0x00FF_FFFF) | (value << 24),
        };

        self.write32(bus, aligned, merged)
    }
}
