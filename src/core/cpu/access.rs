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

//! Data accesses issued by load/store instructions
//!
//! Every access is translated to a physical address first. The cache
//! control register lives on the CPU side and is serviced here before the
//! bus is involved. While SR.IsC (isolate cache) is set, stores never reach
//! the bus: they either fill instruction cache storage or, in tag test
//! mode, invalidate the addressed line.

use super::cop0::Status;
use super::{CacheControl, CPU};
use crate::core::bitfield::PackedRegister;
use crate::core::error::Result;
use crate::core::memory::{physical_address, Bus};

impl CPU {
    pub(in crate::core::cpu) fn read8<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
    ) -> Result<u8> {
        let physical = physical_address(address);
        if physical == CacheControl::ADDRESS {
            return Ok(self.cache_control.bits() as u8);
        }
        bus.read8(physical)
    }

    pub(in crate::core::cpu) fn read16<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
    ) -> Result<u16> {
        let physical = physical_address(address);
        if physical == CacheControl::ADDRESS {
            return Ok(self.cache_control.bits() as u16);
        }
        bus.read16(physical)
    }

    pub(in crate::core::cpu) fn read32<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
    ) -> Result<u32> {
        let physical = physical_address(address);
        if physical == CacheControl::ADDRESS {
            return Ok(self.cache_control.bits());
        }
        bus.read32(physical)
    }

    pub(in crate::core::cpu) fn write8<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
        value: u8,
    ) -> Result<()> {
        let physical = physical_address(address);
        if self.intercept_write(physical, value as u32) {
            return Ok(());
        }
        bus.write8(physical, value)
    }

    pub(in crate::core::cpu) fn write16<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
        value: u16,
    ) -> Result<()> {
        let physical = physical_address(address);
        if self.intercept_write(physical, value as u32) {
            return Ok(());
        }
        bus.write16(physical, value)
    }

    pub(in crate::core::cpu) fn write32<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
        value: u32,
    ) -> Result<()> {
        let physical = physical_address(address);
        if self.intercept_write(physical, value) {
            return Ok(());
        }
        bus.write32(physical, value)
    }

    /// Handle stores that never reach the bus
    ///
    /// # Returns
    ///
    /// `true` if the store was consumed by the cache control register or by
    /// the isolated instruction cache.
    fn intercept_write(&mut self, physical: u32, value: u32) -> bool {
        if physical == CacheControl::ADDRESS {
            self.cache_control = CacheControl::from_bits_retain(value);
            log::debug!("Cache control = 0x{:08X}", value);
            return true;
        }

        if !self.cop0.status().flag(Status::ISC) {
            return false;
        }

        if self.cache_control.contains(CacheControl::TAG) {
            self.icache.invalidate_line(physical);
        } else {
            self.icache.fill_word(physical, value);
        }
        true
    }
}
