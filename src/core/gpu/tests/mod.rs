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

//! GPU module tests
//!
//! Tests are organized into the following modules:
//! - `basic`: Initialization, reset, register ports and DMA access
//! - `fifo`: Command FIFO and dispatcher behavior
//! - `gp0_commands`: Drawing settings and VRAM transfers
//! - `gp1_commands`: GP1 control commands
//! - `rendering`: Polygon rasterization, clipping, masking, blending
//! - `texture`: Texture sampling and texture blending
//! - `vram`: VRAM addressing and host uploads

mod helpers;

mod basic;
