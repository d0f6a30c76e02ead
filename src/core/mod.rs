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

//! Core emulation components
//!
//! This module contains the hardware emulation components:
//! - CPU (R3051 / MIPS R3000A) with instruction cache
//! - GPU (command FIFO, register state, rasterizer)
//! - Bus and clock collaborator interfaces
//! - System integration

pub mod bitfield;
pub mod config;
pub mod cpu;
pub mod error;
pub mod gpu;
pub mod memory;
pub mod system;
pub mod timing;

// Re-export commonly used types
pub use config::CoreConfig;
pub use cpu::CPU;
pub use error::{EmulatorError, GpuError, Result};
pub use gpu::GPU;
pub use memory::{Bus, Ram};
pub use system::System;
pub use timing::{Clock, CycleCounter};
