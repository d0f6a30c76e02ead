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

//! Instruction cache for the R3051 CPU
//!
//! This module implements the 4KB direct-mapped instruction cache of the
//! R3051 together with its refill timing model.
//!
//! # Hardware Specifications
//!
//! - **Size**: 4KB (256 cache lines × 4 words)
//! - **Organization**: Direct-mapped, one tag per line, one valid bit per word
//! - **Refill**: from the missed word to the end of its line
//!
//! # Cache Organization
//!
//! ```text
//! Physical address format (32 bits):
//! [31:12] Tag        - Identifies which memory block a line holds
//! [11:4]  Line index - Selects cache line (0-255)
//! [3:2]   Word index - Selects word within the line (0-3)
//! [1:0]   Alignment  - Always 00 for instruction fetches
//! ```
//!
//! # Timing
//!
//! | Access            | Cycles                                  |
//! |-------------------|-----------------------------------------|
//! | Uncached fetch    | 4                                       |
//! | Cache hit         | 0                                       |
//! | Cache miss        | 1 per refilled word + 3                 |
//!
//! # Example
//!
//! ```
//! use psxcore::core::cpu::icache::InstructionCache;
//! use psxcore::core::memory::{Bus, Ram};
//!
//! let mut ram = Ram::new(0x100);
//! ram.write32(0x10, 0x3C080000).unwrap(); // lui r8, 0x0000
//!
//! let mut cache = InstructionCache::new();
//!
//! // Miss on word 0: refill 4 words (4 cycles) + 3 cycle penalty
//! let miss = cache.fetch(&mut ram, 0x10, true).unwrap();
//! assert_eq!((miss.word, miss.cycles), (0x3C080000, 7));
//!
//! // Hit: no extra cost
//! let hit = cache.fetch(&mut ram, 0x10, true).unwrap();
//! assert_eq!((hit.word, hit.cycles), (0x3C080000, 0));
//! ```

use crate::core::error::Result;
use crate::core::memory::Bus;

/// Result of an instruction fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fetch {
    /// Instruction word
    pub word: u32,
    /// Cycles consumed by the fetch itself
    pub cycles: u32,
}

/// A cached instruction word
#[derive(Debug, Clone, Copy, Default)]
struct CachedWord {
    value: u32,
    valid: bool,
}

/// A single cache line
///
/// Holds one tag for the whole line and a valid bit per word. A word is
/// only trustworthy when the tag matches and its own valid bit is set.
#[derive(Debug, Clone, Copy, Default)]
struct CacheLine {
    /// Address tag (bits [31:12])
    tag: u32,
    /// Instruction words
    words: [CachedWord; InstructionCache::WORDS_PER_LINE],
}

/// Direct-mapped instruction cache
pub struct InstructionCache {
    /// Cache lines (256 entries)
    lines: Vec<CacheLine>,
}

impl InstructionCache {
    /// Number of cache lines
    pub const LINE_COUNT: usize = 256;

    /// Instruction words per cache line
    pub const WORDS_PER_LINE: usize = 4;

    /// Cost of an uncached instruction fetch
    pub const UNCACHED_FETCH_CYCLES: u32 = 4;

    /// Cost of each word read while refilling a line
    pub const REFILL_WORD_CYCLES: u32 = 1;

    /// Fixed penalty added to every miss
    pub const MISS_PENALTY_CYCLES: u32 = 3;

    /// Create a new instruction cache with every word invalid
    pub fn new() -> Self {
        Self {
            lines: vec![CacheLine::default(); Self::LINE_COUNT],
        }
    }

    /// Word index within the line (bits [3:2])
    #[inline(always)]
    fn word_index(address: u32) -> usize {
        ((address >> 2) & 0x3) as usize
    }

    /// Cache line index (bits [11:4])
    #[inline(always)]
    fn line_index(address: u32) -> usize {
        ((address >> 4) & 0xFF) as usize
    }

    /// Tag (bits [31:12])
    #[inline(always)]
    fn tag(address: u32) -> u32 {
        address >> 12
    }

    /// Fetch an instruction word
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory bus used for uncached reads and refills
    /// * `address` - Physical address of the instruction
    /// * `cached` - Whether the cache takes part in this fetch
    ///
    /// # Returns
    ///
    /// The instruction word and the cycles the fetch consumed. When `cached`
    /// is false the cache is neither consulted nor modified.
    ///
    /// # Errors
    ///
    /// Propagates bus errors. A refill that fails part-way leaves the whole
    /// line invalid.
    pub fn fetch<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        address: u32,
        cached: bool,
    ) -> Result<Fetch> {
        if !cached {
            let word = bus.read32(address)?;
            return Ok(Fetch {
                word,
                cycles: Self::UNCACHED_FETCH_CYCLES,
            });
        }

        if let Some(word) = self.lookup(address) {
            return Ok(Fetch { word, cycles: 0 });
        }

        self.refill(bus, address)
    }

    /// Look up a word without side effects
    ///
    /// # Returns
    ///
    /// - `Some(instruction)` if the tag matches and the word is valid
    /// - `None` on a miss
    #[inline(always)]
    pub fn lookup(&self, address: u32) -> Option<u32> {
        let line = &self.lines[Self::line_index(address)];
        let word = &line.words[Self::word_index(address)];
        if line.tag == Self::tag(address) && word.valid {
            Some(word.value)
        } else {
            None
        }
    }

    /// Miss path: refill from the requested word to the end of the line
    fn refill<B: Bus + ?Sized>(&mut self, bus: &mut B, address: u32) -> Result<Fetch> {
        let index = Self::word_index(address);
        let line_index = Self::line_index(address);
        let base = address & !0xF;

        // Words before the requested one now belong to a different block
        for word in &mut self.lines[line_index].words[..index] {
            word.valid = false;
        }

        let mut cycles = 0;
        for i in index..Self::WORDS_PER_LINE {
            let word_address = base + (i as u32) * 4;
            match bus.read32(word_address) {
                Ok(value) => {
                    self.lines[line_index].words[i] = CachedWord { value, valid: true };
                    cycles += Self::REFILL_WORD_CYCLES;
                }
                Err(e) => {
                    self.invalidate_line(address);
                    return Err(e);
                }
            }
        }

        let line = &mut self.lines[line_index];
        line.tag = Self::tag(address);

        log::trace!(
            "I-cache refill line {} from 0x{:08X} ({} words)",
            line_index,
            address,
            Self::WORDS_PER_LINE - index
        );

        Ok(Fetch {
            word: line.words[index].value,
            cycles: cycles + Self::MISS_PENALTY_CYCLES,
        })
    }

    /// Store a word directly into cache storage (isolated-cache fill mode)
    ///
    /// Only the data is written; the tag and valid bits are left alone.
    pub fn fill_word(&mut self, address: u32, value: u32) {
        let line = &mut self.lines[Self::line_index(address)];
        line.words[Self::word_index(address)].value = value;
    }

    /// Invalidate every word of the line selected by `address`
    /// (isolated-cache tag-test mode)
    pub fn invalidate_line(&mut self, address: u32) {
        for word in &mut self.lines[Self::line_index(address)].words {
            word.valid = false;
        }
    }

    /// Invalidate all cache lines
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            *line = CacheLine::default();
        }
    }

    /// Number of valid cached words
    pub fn valid_words(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.words.iter())
            .filter(|word| word.valid)
            .count()
    }

    /// Check if no word is valid
    pub fn is_empty(&self) -> bool {
        self.valid_words() == 0
    }
}

impl Default for InstructionCache {
    fn default() -> Self {
        Self::new()
    }
}

bitflags::bitflags! {
    /// Cache control register (0xFFFE0130) layout
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CacheControl: u32 {
        /// Lock Mode
        const LOCK = 1 << 0;
        /// Invalidate Mode
        const INV = 1 << 1;
        /// Tag Test Mode
        const TAG = 1 << 2;
        /// Scratchpad RAM
        const RAM = 1 << 3;
        /// D-Cache Refill Size
        const DBLKSZ = 0b11 << 4;
        /// Enable D-Cache
        const DS = 1 << 7;
        /// I-Cache Refill Size
        const IBLKSZ = 0b11 << 8;
        /// Enable I-Cache Set 0
        const IS0 = 1 << 10;
        /// Enable I-Cache Set 1
        const IS1 = 1 << 11;
        /// Interrupt Polarity
        const INTP = 1 << 12;
        /// Enable Read Priority
        const RDPRI = 1 << 13;
        /// No Wait State
        const NOPAD = 1 << 14;
        /// Enable Bus Grant
        const BGNT = 1 << 15;
        /// Enable Load Scheduling
        const LDSCH = 1 << 16;
        /// No Streaming
        const NOSTR = 1 << 17;
    }
}

impl CacheControl {
    /// Physical (KSEG2) address of the register
    pub const ADDRESS: u32 = 0xFFFE_0130;
}
