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

//! Cycle accounting per tick
//!
//! - Uncached fetch: 4 + 1
//! - Cache hit: 0 + 1
//! - Cache miss: refilled words + 3 + 1

use super::super::*;
use super::helpers::*;

#[test]
fn test_uncached_tick_cost() {
    let (mut cpu, mut ram, mut clock) = setup(&[NOP; 4]);

    run(&mut cpu, &mut ram, &mut clock, 1);
    assert_eq!(clock.cycles(), 5);

    run(&mut cpu, &mut ram, &mut clock, 3);
    assert_eq!(clock.cycles(), 20);
}

#[test]
fn test_cached_line_costs() {
    let (mut cpu, mut ram, mut clock) = setup(&[NOP; 8]);
    cpu.cache_control = CacheControl::IS1;

    // Miss on word 0: 4 words + 3 + 1
    run(&mut cpu, &mut ram, &mut clock, 1);
    assert_eq!(clock.cycles(), 8);

    // Rest of the line hits
    run(&mut cpu, &mut ram, &mut clock, 3);
    assert_eq!(clock.cycles(), 11);

    // Next line misses again
    run(&mut cpu, &mut ram, &mut clock, 1);
    assert_eq!(clock.cycles(), 19);
}

#[test]
fn test_loop_runs_from_cache() {
    let (mut cpu, mut ram, mut clock) = setup(&[
        addiu(1, 1, 1), // 0x00
        beq(0, 0, -2),  // 0x04: back to 0x00
        NOP,            // 0x08
    ]);
    cpu.cache_control = CacheControl::IS1;

    // First pass: one miss refilling the whole line, then hits
    run(&mut cpu, &mut ram, &mut clock, 3);
    assert_eq!(clock.cycles(), 8 + 1 + 1);

    clock.reset();
    run(&mut cpu, &mut ram, &mut clock, 30);
    assert_eq!(clock.cycles(), 30);
    assert_eq!(cpu.reg(1), 11);
}

#[test]
fn test_kseg1_ignores_cache_enable() {
    let (mut cpu, mut ram, mut clock) = setup(&[NOP; 2]);
    cpu.cache_control = CacheControl::IS1;
    cpu.set_pc(0xA000_0000);

    run(&mut cpu, &mut ram, &mut clock, 2);
    assert_eq!(clock.cycles(), 10);
    assert!(cpu.icache().is_empty());
}

#[test]
fn test_failed_fetch_costs_one_cycle() {
    let (mut cpu, mut ram, mut clock) = setup(&[]);
    cpu.set_pc(RAM_SIZE as u32);

    run(&mut cpu, &mut ram, &mut clock, 1);
    assert_eq!(clock.cycles(), 1);
}
