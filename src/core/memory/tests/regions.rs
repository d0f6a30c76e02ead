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

#[test]
fn test_address_translation() {
    // KUSEG
    assert_eq!(physical_address(0x00001234), 0x00001234);

    // KSEG0
    assert_eq!(physical_address(0x80001234), 0x00001234);

    // KSEG1
    assert_eq!(physical_address(0xA0001234), 0x00001234);

    // KUSEG upper half folds down as well
    assert_eq!(physical_address(0x7FC00000), 0x1FC00000);
}

#[test]
fn test_kseg2_is_untranslated() {
    assert_eq!(physical_address(0xC0000000), 0xC0000000);
    assert_eq!(physical_address(0xFFFE0130), 0xFFFE0130);
}

#[test]
fn test_segment_boundaries() {
    assert_eq!(Segment::of(0x00000000), Segment::Kuseg);
    assert_eq!(Segment::of(0x7FFFFFFF), Segment::Kuseg);
    assert_eq!(Segment::of(0x80000000), Segment::Kseg0);
    assert_eq!(Segment::of(0x9FFFFFFF), Segment::Kseg0);
    assert_eq!(Segment::of(0xA0000000), Segment::Kseg1);
    assert_eq!(Segment::of(0xBFFFFFFF), Segment::Kseg1);
    assert_eq!(Segment::of(0xC0000000), Segment::Kseg2);
    assert_eq!(Segment::of(0xFFFFFFFF), Segment::Kseg2);
}

#[test]
fn test_segment_mirroring_through_ram() {
    let mut ram = Ram::new(0x2000);

    // Write via KUSEG
    ram.write32(physical_address(0x00001000), 0xAAAAAAAA).unwrap();

    // Read via KSEG0 and KSEG1
    assert_eq!(ram.read32(physical_address(0x80001000)).unwrap(), 0xAAAAAAAA);
    assert_eq!(ram.read32(physical_address(0xA0001000)).unwrap(), 0xAAAAAAAA);
}
