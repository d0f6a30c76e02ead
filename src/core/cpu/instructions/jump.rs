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

use super::super::decode::decode_j_type;
use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Jump Instructions ===
    //
    // The return address of the linking forms is the instruction after the
    // delay slot, i.e. `self.pc + 4` during execution.

    /// J: Jump
    ///
    /// Format: j target
    /// Operation: PC = (PC & 0xF0000000) | (target << 2)
    ///
    /// The upper 4 bits come from the delay slot address.
    pub(in crate::core::cpu) fn op_j(&mut self, instruction: u32) -> Result<()> {
        let (_, target) = decode_j_type(instruction);
        self.branch((self.pc & 0xF000_0000) | (target << 2));
        Ok(())
    }

    /// JAL: Jump And Link (r31 = return address)
    pub(in crate::core::cpu) fn op_jal(&mut self, instruction: u32) -> Result<()> {
        let (_, target) = decode_j_type(instruction);
        self.set_reg(31, self.pc.wrapping_add(4));
        self.branch((self.pc & 0xF000_0000) | (target << 2));
        Ok(())
    }

    /// JR: Jump Register
    pub(in crate::core::cpu) fn op_jr(&mut self, rs: u8) -> Result<()> {
        self.branch(self.reg(rs));
        Ok(())
    }

    /// JALR: Jump And Link Register
    ///
    /// The target is read before the link register is written, so
    /// `jalr r31, r31` jumps to the old r31.
    pub(in crate::core::cpu) fn op_jalr(&mut self, rs: u8, rd: u8) -> Result<()> {
        let target = self.reg(rs);
        self.set_reg(rd, self.pc.wrapping_add(4));
        self.branch(target);
        Ok(())
    }
}
