// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Memory Tests
//!
//! - `regions`: Segment classification and virtual to physical translation
//! - `ram`: Flat RAM bus reads, writes, bounds and image loading

mod ram;
mod regions;
