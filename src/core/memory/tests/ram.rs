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

use super::super::*;
use crate::core::error::EmulatorError;

#[test]
fn test_little_endian_layout() {
    let mut ram = Ram::new(8);
    ram.write32(0, 0x12345678).unwrap();

    assert_eq!(ram.as_bytes()[..4], [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(ram.read16(0).unwrap(), 0x5678);
    assert_eq!(ram.read16(2).unwrap(), 0x1234);
    assert_eq!(ram.read8(3).unwrap(), 0x12);
}

#[test]
fn test_partial_writes() {
    let mut ram = Ram::new(8);
    ram.write32(0, 0xFFFFFFFF).unwrap();
    ram.write8(1, 0x00).unwrap();
    ram.write16(2, 0xABCD).unwrap();

    assert_eq!(ram.read32(0).unwrap(), 0xABCD00FF);
}

#[test]
fn test_out_of_range_access_fails() {
    let mut ram = Ram::new(8);

    assert!(matches!(
        ram.read32(6),
        Err(EmulatorError::InvalidMemoryAccess { address: 6 })
    ));
    assert!(ram.write8(8, 0).is_err());
    assert!(ram.read16(u32::MAX).is_err());

    // Nothing was written by the failed store
    assert!(ram.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_load_image() {
    let mut ram = Ram::new(16);
    ram.load(4, &[1, 2, 3, 4]).unwrap();
    assert_eq!(ram.read32(4).unwrap(), 0x04030201);

    assert!(matches!(
        ram.load(14, &[0; 4]),
        Err(EmulatorError::ProgramTooLarge { address: 14, size: 4 })
    ));

    ram.clear();
    assert_eq!(ram.read32(4).unwrap(), 0);
}
