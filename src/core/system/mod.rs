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

//! System integration
//!
//! Ties the CPU, the system bus and the cycle counter together into a
//! runnable machine.

mod bus;
#[cfg(test)]
mod tests;

pub use bus::{MemoryRegion, SystemBus};

use std::path::Path;

use super::config::CoreConfig;
use super::cpu::CPU;
use super::error::{EmulatorError, Result};
use super::gpu::GPU;
use super::memory::physical_address;
use super::timing::{CycleCounter, GlobalTicks};

/// PlayStation System
///
/// # Components
/// - CPU: MIPS R3000A processor with instruction cache
/// - Bus: RAM, scratchpad, BIOS and the GPU ports
/// - Clock: running cycle total
///
/// # Example
///
/// ```
/// use psxcore::core::system::System;
///
/// let mut system = System::new();
///
/// // addiu r1, r0, 5
/// system.load_program(&0x2401_0005u32.to_le_bytes(), 0x8001_0000).unwrap();
/// system.set_pc(0x8001_0000);
/// system.step();
///
/// assert_eq!(system.cpu().reg(1), 5);
/// assert_eq!(system.pc(), 0x8001_0004);
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: SystemBus,
    /// Cycles consumed since reset
    clock: CycleCounter,
}

impl System {
    /// Create a system with default configuration
    pub fn new() -> Self {
        Self::with_config(&CoreConfig::default())
    }

    /// Create a system using the given configuration
    pub fn with_config(config: &CoreConfig) -> Self {
        log::debug!("System: creating components ({:?})", config);
        Self {
            cpu: CPU::with_config(&config.cpu),
            bus: SystemBus::with_config(&config.gpu),
            clock: CycleCounter::new(),
        }
    }

    /// Load a 512KB BIOS image from a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.load_bios("SCPH1001.BIN").unwrap();
    /// ```
    pub fn load_bios<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.bus.load_bios(path)
    }

    /// Copy a program image into main RAM
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw little-endian program image
    /// * `address` - Virtual load address (KUSEG, KSEG0 or KSEG1)
    ///
    /// # Errors
    ///
    /// - [`EmulatorError::InvalidMemoryAccess`] if `address` is not in RAM
    /// - [`EmulatorError::ProgramTooLarge`] if the image runs past 2MB
    pub fn load_program(&mut self, bytes: &[u8], address: u32) -> Result<()> {
        let physical = physical_address(address);
        if physical as usize >= SystemBus::RAM_SIZE {
            return Err(EmulatorError::InvalidMemoryAccess { address });
        }

        self.bus.load_program(physical, bytes)?;
        log::info!(
            "Loaded {} byte program at 0x{:08X}",
            bytes.len(),
            address
        );
        Ok(())
    }

    /// Set the address of the next instruction
    pub fn set_pc(&mut self, pc: u32) {
        self.cpu.set_pc(pc);
    }

    /// Reset the system to initial state
    ///
    /// Resets the CPU, clears RAM and scratchpad, resets the GPU registers
    /// and zeroes the cycle counter. The BIOS image is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.clock.reset();
    }

    /// Execute one CPU tick
    ///
    /// # Returns
    ///
    /// Number of cycles the tick consumed
    pub fn step(&mut self) -> u32 {
        let before = self.clock.cycles();
        self.cpu.tick(&mut self.bus, &mut self.clock);
        (self.clock.cycles() - before) as u32
    }

    /// Execute `ticks` CPU ticks
    ///
    /// # Returns
    ///
    /// Total cycles consumed
    pub fn run(&mut self, ticks: u64) -> GlobalTicks {
        let before = self.clock.cycles();
        for _ in 0..ticks {
            self.step();
        }
        let consumed = self.clock.cycles() - before;
        log::debug!(
            "Ran {} ticks ({} cycles), PC=0x{:08X}",
            ticks,
            consumed,
            self.cpu.pc()
        );
        consumed
    }

    /// Address of the next instruction
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Cycles consumed since reset
    pub fn cycles(&self) -> GlobalTicks {
        self.clock.cycles()
    }

    /// CPU
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Mutable CPU
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// System bus
    pub fn bus(&self) -> &SystemBus {
        &self.bus
    }

    /// Mutable system bus
    pub fn bus_mut(&mut self) -> &mut SystemBus {
        &mut self.bus
    }

    /// GPU
    pub fn gpu(&self) -> &GPU {
        self.bus.gpu()
    }

    /// Mutable GPU
    pub fn gpu_mut(&mut self) -> &mut GPU {
        self.bus.gpu_mut()
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
