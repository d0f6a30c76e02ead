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

//! System bus memory map tests

use super::super::*;
use crate::core::error::EmulatorError;
use crate::core::memory::Bus;

#[test]
fn test_region_identification() {
    assert_eq!(SystemBus::identify_region(0x0000_0000), MemoryRegion::Ram);
    assert_eq!(SystemBus::identify_region(0x007F_FFFF), MemoryRegion::Ram);
    assert_eq!(SystemBus::identify_region(0x0080_0000), MemoryRegion::Unmapped);
    assert_eq!(SystemBus::identify_region(0x1F80_0000), MemoryRegion::Scratchpad);
    assert_eq!(SystemBus::identify_region(0x1F80_0400), MemoryRegion::Unmapped);
    assert_eq!(SystemBus::identify_region(0x1F80_1000), MemoryRegion::Io);
    assert_eq!(SystemBus::identify_region(0x1F80_1810), MemoryRegion::Gpu);
    assert_eq!(SystemBus::identify_region(0x1F80_1817), MemoryRegion::Gpu);
    assert_eq!(SystemBus::identify_region(0x1F80_1818), MemoryRegion::Io);
    assert_eq!(SystemBus::identify_region(0x1F80_2FFF), MemoryRegion::Io);
    assert_eq!(SystemBus::identify_region(0x1FC0_0000), MemoryRegion::Bios);
    assert_eq!(SystemBus::identify_region(0x1FC8_0000), MemoryRegion::Unmapped);
    assert_eq!(SystemBus::identify_region(0xFFFE_0130), MemoryRegion::Unmapped);
}

#[test]
fn test_ram_read_write() {
    let mut bus = SystemBus::new();

    bus.write32(0x0000_1000, 0x1234_5678).unwrap();
    assert_eq!(bus.read32(0x0000_1000).unwrap(), 0x1234_5678);
    assert_eq!(bus.read16(0x0000_1002).unwrap(), 0x1234);
    assert_eq!(bus.read8(0x0000_1000).unwrap(), 0x78);
}

#[test]
fn test_ram_mirrors() {
    let mut bus = SystemBus::new();
    bus.write32(0x0000_0040, 0xCAFE_BABE).unwrap();

    for mirror in [0x0020_0040, 0x0040_0040, 0x0060_0040] {
        assert_eq!(bus.read32(mirror).unwrap(), 0xCAFE_BABE);
    }

    bus.write8(0x0060_0041, 0x00).unwrap();
    assert_eq!(bus.read32(0x0000_0040).unwrap(), 0xCAFE_00BE);
}

#[test]
fn test_scratchpad() {
    let mut bus = SystemBus::new();

    bus.write32(0x1F80_0000, 0xDEAD_BEEF).unwrap();
    bus.write16(0x1F80_03FE, 0x4242).unwrap();

    assert_eq!(bus.read32(0x1F80_0000).unwrap(), 0xDEAD_BEEF);
    assert_eq!(bus.read16(0x1F80_03FE).unwrap(), 0x4242);
    // Scratchpad is separate from RAM
    assert_eq!(bus.read32(0x0000_0000).unwrap(), 0);
}

#[test]
fn test_io_reads_zero_and_ignores_writes() {
    let mut bus = SystemBus::new();

    bus.write32(0x1F80_1070, 0xFFFF_FFFF).unwrap();
    bus.write16(0x1F80_1C00, 0xFFFF).unwrap();
    bus.write8(0x1F80_2041, 0xFF).unwrap();

    assert_eq!(bus.read32(0x1F80_1070).unwrap(), 0);
    assert_eq!(bus.read16(0x1F80_1C00).unwrap(), 0);
    assert_eq!(bus.read8(0x1F80_2041).unwrap(), 0);
}

#[test]
fn test_bios_is_read_only() {
    let mut bus = SystemBus::new();

    bus.write32(0x1FC0_0000, 0x1234_5678).unwrap();
    assert_eq!(bus.read32(0x1FC0_0000).unwrap(), 0);
}

#[test]
fn test_unmapped_access_is_bus_error() {
    let mut bus = SystemBus::new();

    assert!(matches!(
        bus.read32(0x1F00_0000),
        Err(EmulatorError::InvalidMemoryAccess {
            address: 0x1F00_0000
        })
    ));
    assert!(bus.write32(0x0080_0000, 0).is_err());
    assert!(bus.read8(0x1FA0_0000).is_err());
    assert!(bus.write16(0x2000_0000, 0).is_err());
}

#[test]
fn test_load_program_into_ram() {
    let mut bus = SystemBus::new();
    bus.load_program(0x100, &[0x11, 0x22, 0x33, 0x44]).unwrap();

    assert_eq!(bus.read32(0x100).unwrap(), 0x4433_2211);
    assert!(bus.load_program(0x001F_FFFE, &[0; 4]).is_err());
}

#[test]
fn test_reset_clears_ram_and_scratchpad() {
    let mut bus = SystemBus::new();
    bus.write32(0x0000_0010, 1).unwrap();
    bus.write32(0x1F80_0010, 2).unwrap();
    bus.gpu_mut().write_gp1(0x0300_0000);

    bus.reset();

    assert_eq!(bus.read32(0x0000_0010).unwrap(), 0);
    assert_eq!(bus.read32(0x1F80_0010).unwrap(), 0);
    assert_eq!(bus.gpu().status(), 0x1C80_2000);
}
