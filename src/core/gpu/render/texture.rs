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

//! Texture sampling
//!
//! Texture pages, CLUTs and texels all live in VRAM. 4-bit and 8-bit
//! textures pack several palette indices per halfword, lowest bits first.

use crate::core::gpu::{TextureDepth, TextureParams, GPU};

impl GPU {
    /// Fetch the raw 16-bit texel for a texture coordinate
    ///
    /// The texture window is applied to (u, v) before addressing. Page and
    /// CLUT addresses wrap inside VRAM.
    pub(in crate::core::gpu) fn sample_texture(
        &self,
        texture: &TextureParams,
        u: u8,
        v: u8,
    ) -> u16 {
        let (u, v) = self.texture_window.apply(u, v);
        let (u, v) = (u as u16, v as u16);
        let row = texture.page_y + v;

        match texture.depth {
            TextureDepth::T4Bit => {
                let data = self.read_vram(texture.page_x + u / 4, row);
                let index = (data >> ((u % 4) * 4)) & 0xF;
                self.read_vram(texture.clut.x + index, texture.clut.y)
            }
            TextureDepth::T8Bit => {
                let data = self.read_vram(texture.page_x + u / 2, row);
                let index = (data >> ((u % 2) * 8)) & 0xFF;
                self.read_vram(texture.clut.x + index, texture.clut.y)
            }
            TextureDepth::T15Bit => self.read_vram(texture.page_x + u, row),
        }
    }
}
