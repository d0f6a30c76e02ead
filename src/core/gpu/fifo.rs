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

//! GP0 command FIFO
//!
//! A fixed-capacity circular queue of command words. Opcodes and their
//! argument words are stored undifferentiated; the opcode of the command at
//! the head is read from the oldest queued word.

/// Circular buffer of GP0 words
///
/// # Example
///
/// ```
/// use psxcore::core::gpu::CommandFifo;
///
/// let mut fifo = CommandFifo::new();
/// assert!(fifo.enqueue(0x2000_00FF));
/// assert!(fifo.enqueue(0x000A_000A));
/// assert_eq!(fifo.peek_opcode(), Some(0x20));
///
/// // Not enough words: nothing is removed
/// assert_eq!(fifo.dequeue::<3>(), None);
/// assert_eq!(fifo.len(), 2);
///
/// assert_eq!(fifo.dequeue::<2>(), Some([0x2000_00FF, 0x000A_000A]));
/// assert!(fifo.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CommandFifo {
    /// Word storage
    data: [u32; CommandFifo::CAPACITY],
    /// Slot the next enqueued word goes to
    pos: usize,
    /// Number of queued words
    len: usize,
}

impl CommandFifo {
    /// FIFO depth in words
    pub const CAPACITY: usize = 16;

    /// Create an empty FIFO
    pub fn new() -> Self {
        Self {
            data: [0; Self::CAPACITY],
            pos: 0,
            len: 0,
        }
    }

    /// Number of queued words
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    /// Drop every queued word
    pub fn clear(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// Index of the oldest queued word
    #[inline(always)]
    fn head(&self) -> usize {
        (self.pos + Self::CAPACITY - self.len) % Self::CAPACITY
    }

    /// Append a word
    ///
    /// # Returns
    ///
    /// `false` if the FIFO is full; the word is dropped and no state changes.
    pub fn enqueue(&mut self, word: u32) -> bool {
        if self.is_full() {
            return false;
        }

        self.data[self.pos] = word;
        self.pos = (self.pos + 1) % Self::CAPACITY;
        self.len += 1;
        true
    }

    /// Remove the `N` oldest words
    ///
    /// Either exactly `N` words are removed and returned in queue order, or
    /// (when fewer than `N` are queued) nothing is removed.
    pub fn dequeue<const N: usize>(&mut self) -> Option<[u32; N]> {
        if self.len < N {
            return None;
        }

        let mut words = [0u32; N];
        for word in words.iter_mut() {
            *word = self.data[self.head()];
            self.len -= 1;
        }
        Some(words)
    }

    /// Oldest queued word, without removing it
    #[inline(always)]
    pub fn front(&self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(self.data[self.head()])
        }
    }

    /// Opcode (bits 24-31) of the oldest queued word
    #[inline(always)]
    pub fn peek_opcode(&self) -> Option<u8> {
        self.front().map(|word| (word >> 24) as u8)
    }
}

impl Default for CommandFifo {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress of the GP0 command at the head of the FIFO
///
/// A command stays in progress across dispatcher runs until all of its
/// words have arrived and been consumed. `remaining_words` is used by
/// streaming commands (CPU→VRAM copy) and is zero until the command
/// header has been decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandProgress {
    /// A command has been captured and not yet completed
    pub in_progress: bool,
    /// Opcode of the captured command
    pub opcode: u8,
    /// Data words still expected by a streaming command
    pub remaining_words: u32,
    /// Words taken so far by a command that is being discarded
    pub words_consumed: u32,
}

impl CommandProgress {
    /// Capture a new command
    pub fn start(&mut self, opcode: u8) {
        self.in_progress = true;
        self.opcode = opcode;
        self.remaining_words = 0;
        self.words_consumed = 0;
    }

    /// Mark the captured command as complete
    pub fn complete(&mut self) {
        self.in_progress = false;
        self.remaining_words = 0;
        self.words_consumed = 0;
    }
}
