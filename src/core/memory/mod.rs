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

//! Memory bus interface and address translation
//!
//! The CPU never talks to devices directly. It translates its virtual
//! address to a physical one and hands the access to a [`Bus`]
//! implementation, which routes it to RAM, ROM or a device register.
//!
//! # Address Segments
//!
//! | Segment | Range                     | Cached | Translation          |
//! |---------|---------------------------|--------|----------------------|
//! | KUSEG   | 0x00000000-0x7FFFFFFF     | yes    | strip top 3 bits     |
//! | KSEG0   | 0x80000000-0x9FFFFFFF     | yes    | strip top 3 bits     |
//! | KSEG1   | 0xA0000000-0xBFFFFFFF     | no     | strip top 3 bits     |
//! | KSEG2   | 0xC0000000-0xFFFFFFFF     | no     | none (passed as-is)  |
//!
//! # Example
//!
//! ```
//! use psxcore::core::memory::{physical_address, Segment};
//!
//! assert_eq!(physical_address(0xBFC00000), 0x1FC00000);
//! assert_eq!(physical_address(0xFFFE0130), 0xFFFE0130);
//! assert_eq!(Segment::of(0xA0000000), Segment::Kseg1);
//! ```

use crate::core::error::Result;

mod ram;
#[cfg(test)]
mod tests;

pub use ram::Ram;

/// Memory access interface consumed by the CPU
///
/// All addresses are physical. Reads take `&mut self` because device
/// registers may have read side effects. An `Err` from any method is
/// reported to the running program as a bus-error exception.
pub trait Bus {
    /// Read an 8-bit value
    fn read8(&mut self, address: u32) -> Result<u8>;

    /// Read a 16-bit value
    fn read16(&mut self, address: u32) -> Result<u16>;

    /// Read a 32-bit value
    fn read32(&mut self, address: u32) -> Result<u32>;

    /// Write an 8-bit value
    fn write8(&mut self, address: u32, value: u8) -> Result<()>;

    /// Write a 16-bit value
    fn write16(&mut self, address: u32, value: u16) -> Result<()>;

    /// Write a 32-bit value
    fn write32(&mut self, address: u32, value: u32) -> Result<()>;
}

/// MIPS address segment of a virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// User segment (cached)
    Kuseg,
    /// Kernel segment 0 (cached mirror of physical memory)
    Kseg0,
    /// Kernel segment 1 (uncached mirror of physical memory)
    Kseg1,
    /// Kernel segment 2 (untranslated, holds the cache control register)
    Kseg2,
}

impl Segment {
    /// Start of KSEG0
    pub const KSEG0_START: u32 = 0x8000_0000;
    /// Start of KSEG1
    pub const KSEG1_START: u32 = 0xA000_0000;
    /// Start of KSEG2
    pub const KSEG2_START: u32 = 0xC000_0000;

    /// Classify a virtual address
    #[inline(always)]
    pub fn of(address: u32) -> Self {
        match address {
            0x0000_0000..=0x7FFF_FFFF => Segment::Kuseg,
            0x8000_0000..=0x9FFF_FFFF => Segment::Kseg0,
            0xA000_0000..=0xBFFF_FFFF => Segment::Kseg1,
            _ => Segment::Kseg2,
        }
    }
}

/// Translate a virtual address to its physical form
///
/// The top 3 bits are stripped so that KUSEG, KSEG0 and KSEG1 all collapse
/// onto one 512MB physical span. KSEG2 addresses pass through untouched.
#[inline(always)]
pub fn physical_address(address: u32) -> u32 {
    if address >= Segment::KSEG2_START {
        address
    } else {
        address & 0x1FFF_FFFF
    }
}
