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

//! Cycle accounting
//!
//! The scheduler that drives ticking lives outside the core. Components only
//! need to report how many cycles an operation took, which they do through
//! the [`Clock`] trait:
//!
//! - A CPU tick charges 1 cycle plus whatever the instruction fetch cost
//!   (4 for an uncached fetch, 1 per refilled word + 3 on a cache miss).
//! - Each GPU DMA word charges 1 cycle.
//!
//! # Example
//!
//! ```
//! use psxcore::core::timing::{Clock, CycleCounter};
//!
//! let mut clock = CycleCounter::new();
//! clock.consume(4);
//! clock.consume(1);
//! assert_eq!(clock.cycles(), 5);
//! ```

/// Global tick counter type (absolute time in CPU cycles since reset)
pub type GlobalTicks = u64;

/// Sink for consumed CPU cycles
pub trait Clock {
    /// Charge `cycles` to the shared clock
    fn consume(&mut self, cycles: u32);
}

/// Simple running cycle total
///
/// Used by [`System`](crate::core::system::System) as its clock and by tests
/// to observe the timing model.
#[derive(Debug, Default, Clone)]
pub struct CycleCounter {
    /// Cycles consumed since the last reset
    total: GlobalTicks,
}

impl CycleCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self { total: 0 }
    }

    /// Total cycles consumed since creation or the last reset
    #[inline(always)]
    pub fn cycles(&self) -> GlobalTicks {
        self.total
    }

    /// Reset the counter to zero
    pub fn reset(&mut self) {
        self.total = 0;
    }
}

impl Clock for CycleCounter {
    #[inline(always)]
    fn consume(&mut self, cycles: u32) {
        self.total += cycles as GlobalTicks;
    }
}
