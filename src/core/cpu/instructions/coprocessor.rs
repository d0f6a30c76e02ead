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

//! COP1-COP3 and coprocessor load/store instructions
//!
//! Only COP0 and COP2 (the GTE) exist on this chipset. COP1 and COP3
//! always raise Coprocessor Unusable. COP2 raises it while SR.Cu2 is clear;
//! once enabled its operations are logged and skipped since the geometry
//! engine is not part of this core.

use super::super::cop0::Status;
use super::super::decode::coprocessor;
use super::CPU;
use crate::core::bitfield::PackedRegister;
use crate::core::error::Result;

impl CPU {
    /// Check coprocessor usability, raising the exception if needed
    ///
    /// # Returns
    ///
    /// `true` if the coprocessor may execute the instruction.
    fn coprocessor_usable(&mut self, cop: u8) -> bool {
        let usable = cop == 2 && self.cop0.status().flag(Status::CU2);
        if !usable {
            self.coprocessor_unusable(cop);
        }
        usable
    }

    /// COP1-COP3 operations (opcodes 0x11-0x13)
    pub(in crate::core::cpu) fn op_cop(&mut self, instruction: u32) -> Result<()> {
        let cop = coprocessor(instruction);
        if self.coprocessor_usable(cop) {
            log::trace!(
                "Skipping COP{} instruction 0x{:08X} at PC=0x{:08X}",
                cop,
                instruction,
                self.current_pc
            );
        }
        Ok(())
    }

    /// LWC0-LWC3 (opcodes 0x30-0x33)
    pub(in crate::core::cpu) fn op_lwc(&mut self, instruction: u32) -> Result<()> {
        let cop = coprocessor(instruction);
        if self.coprocessor_usable(cop) {
            log::trace!("Skipping LWC{} at PC=0x{:08X}", cop, self.current_pc);
        }
        Ok(())
    }

    /// SWC0-SWC3 (opcodes 0x38-0x3B)
    pub(in crate::core::cpu) fn op_swc(&mut self, instruction: u32) -> Result<()> {
        let cop = coprocessor(instruction);
        if self.coprocessor_usable(cop) {
            log::trace!("Skipping SWC{} at PC=0x{:08X}", cop, self.current_pc);
        }
        Ok(())
    }
}
