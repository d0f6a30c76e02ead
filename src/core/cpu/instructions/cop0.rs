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

//! Coprocessor 0 (System Control) instructions

use super::super::cop0::Status;
use super::super::decode::decode_r_type;
use super::CPU;
use crate::core::bitfield::{bits, PackedRegister};
use crate::core::error::Result;

impl CPU {
    /// Handle COP0 instructions (opcode 0x10)
    ///
    /// The sub-opcode lives in bits [25:21]; when bit 25 is set the
    /// instruction is a coprocessor operation selected by the function
    /// field (only RFE exists on the R3000A).
    pub(in crate::core::cpu) fn execute_cop0(&mut self, instruction: u32) -> Result<()> {
        let sub_op = bits(instruction, 21, 5);

        match sub_op {
            0x00 | 0x02 => self.op_mfc0(instruction), // MFC0 / CFC0
            0x04 | 0x06 => self.op_mtc0(instruction), // MTC0 / CTC0
            0x10..=0x1F => match bits(instruction, 0, 6) {
                0x10 => self.op_rfe(instruction), // RFE
                funct => {
                    self.unknown_instruction("COP0 function", funct);
                    Ok(())
                }
            },
            _ => {
                self.unknown_instruction("COP0 sub-opcode", sub_op);
                Ok(())
            }
        }
    }

    /// MFC0: Move From Coprocessor 0
    ///
    /// Format: mfc0 rt, rd
    /// Operation: rt = cop0[rd] (through the load delay slot)
    pub(in crate::core::cpu) fn op_mfc0(&mut self, instruction: u32) -> Result<()> {
        let (_, rt, rd, _, _) = decode_r_type(instruction);
        let value = self.cop0.regs[rd as usize];
        self.set_reg_delayed(rt, value);
        Ok(())
    }

    /// MTC0: Move To Coprocessor 0
    ///
    /// Format: mtc0 rt, rd
    /// Operation: cop0[rd] = rt (PRId is read-only, only CAUSE.Sw is writable)
    pub(in crate::core::cpu) fn op_mtc0(&mut self, instruction: u32) -> Result<()> {
        let (_, rt, rd, _, _) = decode_r_type(instruction);
        let value = self.reg(rt);
        self.cop0.write(rd as usize, value);
        Ok(())
    }

    /// RFE: Return From Exception
    ///
    /// Pops the KU/IE mode stack (o→p, p→c). The old pair is preserved.
    pub(in crate::core::cpu) fn op_rfe(&mut self, _instruction: u32) -> Result<()> {
        let mut status = self.cop0.status();
        let mode = status.field(Status::MODE_STACK);
        status.set_field(Status::MODE_STACK, (mode & 0x30) | (mode >> 2));
        self.cop0.set_status(status);
        Ok(())
    }
}
