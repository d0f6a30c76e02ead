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

//! Packed register helpers
//!
//! Hardware registers on both the CPU and GPU side are 32-bit words with
//! fixed bit layouts. Each layout is declared once with `bitflags!`, where a
//! multi-bit field is simply a flag whose mask covers several contiguous bits:
//!
//! ```
//! use psxcore::core::bitfield::PackedRegister;
//!
//! bitflags::bitflags! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     struct Example: u32 {
//!         const ENABLE = 1 << 0;
//!         const MODE   = 0b111 << 4;
//!     }
//! }
//!
//! let mut reg = Example::empty();
//! reg.set_field(Example::MODE, 5);
//! assert_eq!(reg.field(Example::MODE), 5);
//! assert_eq!(reg.bits(), 0x50);
//! ```
//!
//! Command words that never live in a register (vertex, color and texture
//! coordinate words) are decoded with [`bits`] and [`sign_extend`].

use bitflags::Flags;

/// Named-field access for `bitflags` types backed by a `u32`
///
/// The mask passed to [`field`](PackedRegister::field) and
/// [`set_field`](PackedRegister::set_field) must be contiguous.
pub trait PackedRegister: Flags<Bits = u32> + Copy {
    /// Read the value of a multi-bit field, shifted down to bit 0
    #[inline(always)]
    fn field(&self, mask: Self) -> u32 {
        let mask = mask.bits();
        (self.bits() & mask) >> mask.trailing_zeros()
    }

    /// Replace a multi-bit field; excess high bits of `value` are discarded
    #[inline(always)]
    fn set_field(&mut self, mask: Self, value: u32) {
        let mask = mask.bits();
        let shifted = value.wrapping_shl(mask.trailing_zeros()) & mask;
        *self = Self::from_bits_retain((self.bits() & !mask) | shifted);
    }

    /// Read a single-bit field as a boolean
    #[inline(always)]
    fn flag(&self, mask: Self) -> bool {
        self.bits() & mask.bits() != 0
    }

    /// Set or clear a single-bit field
    #[inline(always)]
    fn set_flag(&mut self, mask: Self, value: bool) {
        let bits = if value {
            self.bits() | mask.bits()
        } else {
            self.bits() & !mask.bits()
        };
        *self = Self::from_bits_retain(bits);
    }
}

impl<T: Flags<Bits = u32> + Copy> PackedRegister for T {}

/// Extract `width` bits of `word` starting at bit `lo`
///
/// # Example
///
/// ```
/// use psxcore::core::bitfield::bits;
///
/// assert_eq!(bits(0xAB00_0000, 24, 8), 0xAB);
/// ```
#[inline(always)]
pub const fn bits(word: u32, lo: u32, width: u32) -> u32 {
    (word >> lo) & ((1u32 << width) - 1)
}

/// Sign-extend the low `width` bits of `value`
///
/// # Example
///
/// ```
/// use psxcore::core::bitfield::sign_extend;
///
/// assert_eq!(sign_extend(0x7FF, 11), -1);
/// assert_eq!(sign_extend(0x3FF, 11), 1023);
/// ```
#[inline(always)]
pub const fn sign_extend(value: u32, width: u32) -> i32 {
    let shift = 32 - width;
    ((value << shift) as i32) >> shift
}
