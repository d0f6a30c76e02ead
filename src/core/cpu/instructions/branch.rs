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
use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Branch Instructions ===

    /// Target of a PC-relative branch
    ///
    /// While an instruction executes, `self.pc` already holds the address
    /// of its delay slot (B + 4), which is the base of the offset.
    #[inline(always)]
    fn branch_target(&self, imm: u16) -> u32 {
        self.pc.wrapping_add(sign_extend_imm(imm) << 2)
    }

    /// Handle BCONDZ instructions (opcode 0x01)
    ///
    /// BCONDZ instructions include BLTZ, BGEZ, BLTZAL, and BGEZAL.
    /// The rt field determines which specific branch instruction it is:
    ///
    /// - Bit 0: BGEZ (1) vs BLTZ (0)
    /// - Bits 4-1 == 0b1000: link variant
    ///
    /// The link variants write the return address whether or not the
    /// branch is taken.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    pub(in crate::core::cpu) fn execute_bcondz(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);

        let is_bgez = (rt & 0x01) != 0;
        let is_link = (rt & 0x1E) == 0x10;

        let test = (self.reg(rs) as i32) >= 0;
        let should_branch = if is_bgez { test } else { !test };

        if is_link {
            self.set_reg(31, self.pc.wrapping_add(4));
        }

        if should_branch {
            self.branch(self.branch_target(imm));
        }

        Ok(())
    }

    /// BEQ: Branch on Equal
    ///
    /// Format: beq rs, rt, offset
    /// Operation: if (rs == rt) PC = PC + 4 + (sign_extend(offset) << 2)
    pub(in crate::core::cpu) fn op_beq(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        if self.reg(rs) == self.reg(rt) {
            self.branch(self.branch_target(imm));
        }
        Ok(())
    }

    /// BNE: Branch on Not Equal
    pub(in crate::core::cpu) fn op_bne(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        if self.reg(rs) != self.reg(rt) {
            self.branch(self.branch_target(imm));
        }
        Ok(())
    }

    /// BLEZ: Branch on Less Than or Equal to Zero (signed)
    pub(in crate::core::cpu) fn op_blez(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, imm) = decode_i_type(instruction);
        if (self.reg(rs) as i32) <= 0 {
            self.branch(self.branch_target(imm));
        }
        Ok(())
    }

    /// BGTZ: Branch on Greater Than Zero (signed)
    pub(in crate::core::cpu) fn op_bgtz(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, imm) = decode_i_type(instruction);
        if (self.reg(rs) as i32) > 0 {
            self.branch(self.branch_target(imm));
        }
        Ok(())
    }
}
