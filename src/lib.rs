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

//! PlayStation CPU/GPU core library
//!
//! This library provides the timing-sensitive heart of a PlayStation emulator:
//! the R3051 (MIPS R3000A) pipeline with its branch/load delay slots,
//! instruction cache and COP0 exceptions, plus the GPU command FIFO and
//! software rasterizer.
//!
//! # Example
//!
//! ```
//! use psxcore::core::cpu::CPU;
//! use psxcore::core::memory::Ram;
//! use psxcore::core::timing::CycleCounter;
//!
//! let mut cpu = CPU::new();
//! let mut ram = Ram::new(0x1000);
//! let mut clock = CycleCounter::new();
//!
//! cpu.set_pc(0x0000_0000);
//! cpu.tick(&mut ram, &mut clock); // nop
//! assert_eq!(cpu.pc(), 0x0000_0004);
//! ```

pub mod core;
