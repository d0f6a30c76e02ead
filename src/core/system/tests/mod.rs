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

//! System module tests
//!
//! - `basic`: construction, reset and accessors
//! - `bus`: physical memory map of the system bus
//! - `bios`: BIOS image loading
//! - `execution`: programs running on the assembled machine
//! - `gpu_integration`: GPU ports reached through the bus and the CPU

mod basic;
mod bus;
mod execution;
mod helpers;
