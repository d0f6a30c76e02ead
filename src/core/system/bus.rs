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

//! System memory map
//!
//! [`SystemBus`] routes physical addresses coming from the CPU to main RAM,
//! the scratchpad, the BIOS ROM and the GPU register ports.
//!
//! # Physical Memory Map
//!
//! | Range                     | Region                                  |
//! |---------------------------|-----------------------------------------|
//! | 0x00000000-0x007FFFFF     | Main RAM (2MB, mirrored four times)     |
//! | 0x1F800000-0x1F8003FF     | Scratchpad (1KB)                        |
//! | 0x1F801810-0x1F801817     | GPU ports (GP0/GPUREAD, GP1/GPUSTAT)    |
//! | 0x1F801000-0x1F802FFF     | Other I/O (reads 0, writes ignored)     |
//! | 0x1FC00000-0x1FC7FFFF     | BIOS ROM (512KB, writes ignored)        |
//!
//! Everything else is a bus error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::config::GpuConfig;
use crate::core::error::{EmulatorError, Result};
use crate::core::gpu::GPU;
use crate::core::memory::{Bus, Ram};

/// Memory region identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegion {
    /// Main RAM, including its mirrors
    Ram,
    /// Scratchpad (1KB)
    Scratchpad,
    /// GPU register ports
    Gpu,
    /// I/O ports without a device behind them
    Io,
    /// BIOS ROM
    Bios,
    /// Unmapped region
    Unmapped,
}

/// Bus of the assembled console
pub struct SystemBus {
    /// Main RAM
    ram: Ram,
    /// Scratchpad (data cache used as fast RAM)
    scratchpad: Ram,
    /// BIOS ROM image
    bios: Ram,
    /// GPU
    gpu: GPU,
}

impl SystemBus {
    /// RAM size (2MB)
    pub const RAM_SIZE: usize = 2 * 1024 * 1024;

    /// Scratchpad size (1KB)
    pub const SCRATCHPAD_SIZE: usize = 1024;

    /// BIOS size (512KB)
    pub const BIOS_SIZE: usize = 512 * 1024;

    /// RAM physical address range (including mirrors)
    const RAM_START: u32 = 0x0000_0000;
    const RAM_END: u32 = 0x007F_FFFF;

    /// Scratchpad physical address range
    const SCRATCHPAD_START: u32 = 0x1F80_0000;
    const SCRATCHPAD_END: u32 = 0x1F80_03FF;

    /// GPU ports physical address range
    const GPU_START: u32 = 0x1F80_1810;
    const GPU_END: u32 = 0x1F80_1817;

    /// I/O ports physical address range
    const IO_START: u32 = 0x1F80_1000;
    const IO_END: u32 = 0x1F80_2FFF;

    /// BIOS ROM physical address range
    const BIOS_START: u32 = 0x1FC0_0000;
    const BIOS_END: u32 = 0x1FC7_FFFF;

    /// Create a bus with zeroed memories and a freshly reset GPU
    pub fn new() -> Self {
        Self::with_config(&GpuConfig::default())
    }

    /// Create a bus whose GPU uses the given options
    pub fn with_config(config: &GpuConfig) -> Self {
        Self {
            ram: Ram::new(Self::RAM_SIZE),
            scratchpad: Ram::new(Self::SCRATCHPAD_SIZE),
            bios: Ram::new(Self::BIOS_SIZE),
            gpu: GPU::with_config(config),
        }
    }

    /// Reset the bus to initial state
    ///
    /// Clears RAM and scratchpad and resets the GPU. The BIOS image is
    /// kept, as is VRAM.
    pub fn reset(&mut self) {
        self.ram.clear();
        self.scratchpad.clear();
        self.gpu.reset();
    }

    /// Load a BIOS image from a file
    ///
    /// # Errors
    ///
    /// - [`EmulatorError::BiosNotFound`] if the file cannot be opened
    /// - [`EmulatorError::InvalidBiosSize`] if it is not exactly 512KB
    /// - [`EmulatorError::Io`] if reading fails
    pub fn load_bios<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|_| EmulatorError::BiosNotFound(path.display().to_string()))?;

        let size = file.metadata()?.len();
        if size != Self::BIOS_SIZE as u64 {
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: size as usize,
            });
        }

        let mut image = vec![0u8; Self::BIOS_SIZE];
        file.read_exact(&mut image)?;
        self.bios.load(0, &image)?;

        log::info!("Loaded BIOS from {}", path.display());
        Ok(())
    }

    /// Copy a program image into main RAM
    ///
    /// `address` is physical and must lie in the first 2MB.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::ProgramTooLarge`] if the image runs past the
    /// end of RAM.
    pub fn load_program(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        self.ram.load(address, bytes)
    }

    /// Identify the region that contains a physical address
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::system::{MemoryRegion, SystemBus};
    ///
    /// assert_eq!(SystemBus::identify_region(0x0060_0000), MemoryRegion::Ram);
    /// assert_eq!(SystemBus::identify_region(0x1F80_1814), MemoryRegion::Gpu);
    /// assert_eq!(SystemBus::identify_region(0x1F80_1070), MemoryRegion::Io);
    /// assert_eq!(SystemBus::identify_region(0x1F00_0000), MemoryRegion::Unmapped);
    /// ```
    pub fn identify_region(address: u32) -> MemoryRegion {
        if (Self::RAM_START..=Self::RAM_END).contains(&address) {
            MemoryRegion::Ram
        } else if (Self::SCRATCHPAD_START..=Self::SCRATCHPAD_END).contains(&address) {
            MemoryRegion::Scratchpad
        } else if (Self::GPU_START..=Self::GPU_END).contains(&address) {
            MemoryRegion::Gpu
        } else if (Self::IO_START..=Self::IO_END).contains(&address) {
            MemoryRegion::Io
        } else if (Self::BIOS_START..=Self::BIOS_END).contains(&address) {
            MemoryRegion::Bios
        } else {
            MemoryRegion::Unmapped
        }
    }

    /// Main RAM
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// GPU
    pub fn gpu(&self) -> &GPU {
        &self.gpu
    }

    /// Mutable GPU
    pub fn gpu_mut(&mut self) -> &mut GPU {
        &mut self.gpu
    }

    /// Offset of a RAM address inside the 2MB array
    #[inline(always)]
    fn ram_offset(address: u32) -> u32 {
        address & (Self::RAM_SIZE as u32 - 1)
    }

    /// Read a GPU register for an access of any width
    ///
    /// Narrow reads return the addressed part of the 32-bit register.
    fn read_gpu(&mut self, address: u32) -> u32 {
        let port = address - Self::GPU_START;
        let value = self.gpu.read(port & !0x3);
        value >> ((port & 0x3) * 8)
    }

    /// Write a GPU register; only full-width stores reach the GPU
    fn write_gpu(&mut self, address: u32, value: u32, width: u32) {
        if width != 4 {
            log::warn!(
                "Ignoring {}-bit GPU write at 0x{:08X} = 0x{:08X}",
                width * 8,
                address,
                value
            );
            return;
        }
        self.gpu.write(address - Self::GPU_START, value);
    }

    fn unmapped(address: u32) -> EmulatorError {
        log::debug!("Unmapped physical access at 0x{:08X}", address);
        EmulatorError::InvalidMemoryAccess { address }
    }
}

impl Bus for SystemBus {
    fn read8(&mut self, address: u32) -> Result<u8> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.read8(Self::ram_offset(address)),
            MemoryRegion::Scratchpad => self.scratchpad.read8(address - Self::SCRATCHPAD_START),
            MemoryRegion::Bios => self.bios.read8(address - Self::BIOS_START),
            MemoryRegion::Gpu => Ok(self.read_gpu(address) as u8),
            MemoryRegion::Io => {
                log::trace!("I/O read8 at 0x{:08X} -> 0", address);
                Ok(0)
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }

    fn read16(&mut self, address: u32) -> Result<u16> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.read16(Self::ram_offset(address)),
            MemoryRegion::Scratchpad => self.scratchpad.read16(address - Self::SCRATCHPAD_START),
            MemoryRegion::Bios => self.bios.read16(address - Self::BIOS_START),
            MemoryRegion::Gpu => Ok(self.read_gpu(address) as u16),
            MemoryRegion::Io => {
                log::trace!("I/O read16 at 0x{:08X} -> 0", address);
                Ok(0)
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }

    fn read32(&mut self, address: u32) -> Result<u32> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.read32(Self::ram_offset(address)),
            MemoryRegion::Scratchpad => self.scratchpad.read32(address - Self::SCRATCHPAD_START),
            MemoryRegion::Bios => self.bios.read32(address - Self::BIOS_START),
            MemoryRegion::Gpu => Ok(self.read_gpu(address)),
            MemoryRegion::Io => {
                log::trace!("I/O read32 at 0x{:08X} -> 0", address);
                Ok(0)
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }

    fn write8(&mut self, address: u32, value: u8) -> Result<()> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.write8(Self::ram_offset(address), value),
            MemoryRegion::Scratchpad => {
                self.scratchpad.write8(address - Self::SCRATCHPAD_START, value)
            }
            MemoryRegion::Gpu => {
                self.write_gpu(address, value as u32, 1);
                Ok(())
            }
            MemoryRegion::Bios | MemoryRegion::Io => {
                log::trace!("Ignored write8 at 0x{:08X} = 0x{:02X}", address, value);
                Ok(())
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }

    fn write16(&mut self, address: u32, value: u16) -> Result<()> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.write16(Self::ram_offset(address), value),
            MemoryRegion::Scratchpad => {
                self.scratchpad.write16(address - Self::SCRATCHPAD_START, value)
            }
            MemoryRegion::Gpu => {
                self.write_gpu(address, value as u32, 2);
                Ok(())
            }
            MemoryRegion::Bios | MemoryRegion::Io => {
                log::trace!("Ignored write16 at 0x{:08X} = 0x{:04X}", address, value);
                Ok(())
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }

    fn write32(&mut self, address: u32, value: u32) -> Result<()> {
        match Self::identify_region(address) {
            MemoryRegion::Ram => self.ram.write32(Self::ram_offset(address), value),
            MemoryRegion::Scratchpad => {
                self.scratchpad.write32(address - Self::SCRATCHPAD_START, value)
            }
            MemoryRegion::Gpu => {
                self.write_gpu(address, value, 4);
                Ok(())
            }
            MemoryRegion::Bios | MemoryRegion::Io => {
                log::trace!("Ignored write32 at 0x{:08X} = 0x{:08X}", address, value);
                Ok(())
            }
            MemoryRegion::Unmapped => Err(Self::unmapped(address)),
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
