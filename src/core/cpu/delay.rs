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

//! Two-stage delay latch
//!
//! Both delay-slot mechanisms of the R3000A share the same shape: an effect
//! decided while executing instruction N becomes visible only after
//! instruction N+1 has executed. [`DelaySlot`] models this as a queue of
//! length one with two named stages:
//!
//! - `next`: decided during the current tick, takes effect next tick
//! - `current`: decided during the previous tick, takes effect at the end
//!   of this tick
//!
//! Every tick calls [`advance`](DelaySlot::advance) once before execution
//! and [`take_current`](DelaySlot::take_current) once after it, so an effect
//! can never skip or repeat a stage.
//!
//! # Example
//!
//! ```
//! use psxcore::core::cpu::DelaySlot;
//!
//! let mut slot = DelaySlot::new();
//! slot.schedule(0x8000_0100u32);
//! assert_eq!(slot.take_current(), None); // decided this tick
//!
//! slot.advance();                        // next tick begins
//! assert_eq!(slot.take_current(), Some(0x8000_0100));
//! ```

/// One-entry delay queue with `next` and `current` stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySlot<T> {
    next: Option<T>,
    current: Option<T>,
}

impl<T: Copy> DelaySlot<T> {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            next: None,
            current: None,
        }
    }

    /// Schedule an effect for the next tick
    ///
    /// # Returns
    ///
    /// The effect previously scheduled in the same tick, if any.
    pub fn schedule(&mut self, value: T) -> Option<T> {
        self.next.replace(value)
    }

    /// Move the `next` stage into `current`
    ///
    /// # Returns
    ///
    /// The stale `current` effect if one was never taken.
    pub fn advance(&mut self) -> Option<T> {
        std::mem::replace(&mut self.current, self.next.take())
    }

    /// Effect due at the end of this tick
    #[inline(always)]
    pub fn current(&self) -> Option<T> {
        self.current
    }

    /// Effect decided during this tick
    #[inline(always)]
    pub fn next(&self) -> Option<T> {
        self.next
    }

    /// Remove and return the effect due at the end of this tick
    #[inline(always)]
    pub fn take_current(&mut self) -> Option<T> {
        self.current.take()
    }

    /// Drop the effect due at the end of this tick
    #[inline(always)]
    pub fn cancel_current(&mut self) {
        self.current = None;
    }

    /// Whether any effect is in flight
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.current.is_none()
    }

    /// Drop both stages
    pub fn clear(&mut self) {
        self.next = None;
        self.current = None;
    }
}

impl<T: Copy> Default for DelaySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Register write held back by the load delay slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadDelay {
    /// Target register (never 0)
    pub reg: u8,
    /// Value to load
    pub value: u32,
}
