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

use super::Bus;
use crate::core::error::{EmulatorError, Result};

/// Flat little-endian memory starting at physical address 0
///
/// Accesses beyond the end of the array fail with
/// [`EmulatorError::InvalidMemoryAccess`], which the CPU reports as a bus
/// error. `Ram` is also the main RAM backing store of the full system.
///
/// # Example
///
/// ```
/// use psxcore::core::memory::{Bus, Ram};
///
/// let mut ram = Ram::new(16);
/// ram.write32(4, 0x12345678).unwrap();
/// assert_eq!(ram.read8(4).unwrap(), 0x78);
/// assert_eq!(ram.read16(6).unwrap(), 0x1234);
/// assert!(ram.read32(16).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create zero-filled memory of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the memory has zero size
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw byte view
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy `bytes` into memory starting at `address`
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::ProgramTooLarge`] if the image does not fit.
    pub fn load(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        let start = address as usize;
        let end = start
            .checked_add(bytes.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(EmulatorError::ProgramTooLarge {
                address,
                size: bytes.len(),
            })?;
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Fill the whole memory with zeroes
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Bounds-checked byte range for an access of `size` bytes
    #[inline(always)]
    fn range(&self, address: u32, size: usize) -> Result<std::ops::Range<usize>> {
        let start = address as usize;
        match start.checked_add(size) {
            Some(end) if end <= self.data.len() => Ok(start..end),
            _ => Err(EmulatorError::InvalidMemoryAccess { address }),
        }
    }
}

impl Bus for Ram {
    fn read8(&mut self, address: u32) -> Result<u8> {
        let range = self.range(address, 1)?;
        Ok(self.data[range.start])
    }

    fn read16(&mut self, address: u32) -> Result<u16> {
        let range = self.range(address, 2)?;
        let bytes = [self.data[range.start], self.data[range.start + 1]];
        Ok(u16::from_le_bytes(bytes))
    }

    fn read32(&mut self, address: u32) -> Result<u32> {
        let range = self.range(address, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[range]);
        Ok(u32::from_le_bytes(bytes))
    }

    fn write8(&mut self, address: u32, value: u8) -> Result<()> {
        let range = self.range(address, 1)?;
        self.data[range.start] = value;
        Ok(())
    }

    fn write16(&mut self, address: u32, value: u16) -> Result<()> {
        let range = self.range(address, 2)?;
        self.data[range].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write32(&mut self, address: u32, value: u32) -> Result<()> {
        let range = self.range(address, 4)?;
        self.data[range].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}
