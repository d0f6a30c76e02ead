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

use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Multiply/Divide Instructions ===
    //
    // Results land in HI/LO immediately. Division never traps; the
    // R3000A produces fixed results for a zero divisor and for
    // 0x80000000 / -1.

    /// Store a 64-bit product as HI:LO
    #[inline(always)]
    fn set_hi_lo(&mut self, product: u64) {
        self.hi = (product >> 32) as u32;
        self.lo = product as u32;
    }

    /// MULT: signed 32x32 -> 64 multiply
    pub(in crate::core::cpu) fn op_mult(&mut self, rs: u8, rt: u8) -> Result<()> {
        let a = self.reg(rs) as i32 as i64;
        let b = self.reg(rt) as i32 as i64;
        self.set_hi_lo((a * b) as u64);
        Ok(())
    }

    /// MULTU: unsigned 32x32 -> 64 multiply
    pub(in crate::core::cpu) fn op_multu(&mut self, rs: u8, rt: u8) -> Result<()> {
        let a = self.reg(rs) as u64;
        let b = self.reg(rt) as u64;
        self.set_hi_lo(a * b);
        Ok(())
    }

    /// DIV: signed divide, LO = quotient, HI = remainder
    ///
    /// | Case              | LO                          | HI        |
    /// |-------------------|-----------------------------|-----------|
    /// | n / 0, n >= 0     | 0xFFFFFFFF                  | n         |
    /// | n / 0, n < 0      | 1                           | n         |
    /// | 0x80000000 / -1   | 0x80000000                  | 0         |
    pub(in crate::core::cpu) fn op_div(&mut self, rs: u8, rt: u8) -> Result<()> {
        let n = self.reg(rs) as i32;
        let d = self.reg(rt) as i32;

        if d == 0 {
            self.lo = if n >= 0 { 0xFFFF_FFFF } else { 1 };
            self.hi = n as u32;
        } else if n == i32::MIN && d == -1 {
            self.lo = i32::MIN as u32;
            self.hi = 0;
        } else {
            self.lo = (n / d) as u32;
            self.hi = (n % d) as u32;
        }
        Ok(())
    }

    /// DIVU: unsigned divide; division by zero gives LO = 0xFFFFFFFF, HI = n
    pub(in crate::core::cpu) fn op_divu(&mut self, rs: u8, rt: u8) -> Result<()> {
        let n = self.reg(rs);
        let d = self.reg(rt);

        if d == 0 {
            self.lo = 0xFFFF_FFFF;
            self.hi = n;
        } else {
            self.lo = n / d;
            self.hi = n % d;
        }
        Ok(())
    }

    pub(in crate::core::cpu) fn op_mfhi(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.hi);
        Ok(())
    }

    pub(in crate::core::cpu) fn op_mflo(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.lo);
        Ok(())
    }

    pub(in crate::core::cpu) fn op_mthi(&mut self, rs: u8) -> Result<()> {
        self.hi = self.reg(rs);
        Ok(())
    }

    pub(in crate::core::cpu) fn op_mtlo(&mut self, rs: u8) -> Result<()> {
        self.lo = self.reg(rs);
        Ok(())
    }
}
