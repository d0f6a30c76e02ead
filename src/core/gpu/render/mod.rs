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

//! Software Rasterizer
//!
//! Converts polygon commands into VRAM pixels with a scanline algorithm:
//!
//! 1. Sort the triangle vertices by Y
//! 2. Split it at the middle vertex into a flat-bottom and a flat-top half
//! 3. Walk each half one scanline at a time, interpolating color and
//!    texture coordinates along both edges
//! 4. Fill each span, running every pixel through the clip, mask,
//!    texture and blend stages
//!
//! Edge attributes are interpolated by the distance from the anchor vertex
//! divided by the edge length rather than by a plain Y ratio. Output
//! therefore matches the hardware pixel for pixel on the cases that depend
//! on this, at the cost of some precision.
//!
//! # References
//!
//! - [PSX-SPX: GPU Rendering](http://problemkaputt.de/psx-spx.htm#gpurenderstatecommands)

mod line;
mod pixel;
mod texture;
mod triangle;
