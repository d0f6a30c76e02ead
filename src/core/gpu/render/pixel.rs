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

//! Per-pixel pipeline: offset, clip, mask test, texturing, blending

use crate::core::bitfield::PackedRegister;
use crate::core::gpu::{Color, GpuStat, RenderParams, SemiTransparency, GPU};

/// VRAM mask bit
const MASK_BIT: u16 = 0x8000;

impl GPU {
    /// Draw a single pixel
    ///
    /// Stages, in order:
    /// 1. Add the drawing offset
    /// 2. Discard if outside the drawing area (inclusive bounds)
    /// 3. Discard if mask checking is on and the target's mask bit is set
    /// 4. Texture: sample, discard on texel 0, go opaque if the texel's STP
    ///    bit is clear, blend with the vertex color unless raw
    /// 5. Semi-transparency (additive only)
    /// 6. Write the 5-5-5 color with the mask bit from GP0(E6h)
    pub(in crate::core::gpu) fn draw_pixel(
        &mut self,
        x: i16,
        y: i16,
        color: Color,
        u: u8,
        v: u8,
        params: &RenderParams,
    ) {
        let x = x as i32 + self.draw_offset.x as i32;
        let y = y as i32 + self.draw_offset.y as i32;

        if !self.draw_area.contains(x, y) {
            return;
        }

        let (x, y) = (x as u16, y as u16);
        let existing = self.read_vram(x, y);

        if self.stat.flag(GpuStat::CHECK_MASK) && existing & MASK_BIT != 0 {
            return;
        }

        let mut color = color;
        let mut opaque = params.opaque;

        if let Some(texture) = &params.texture {
            let texel = self.sample_texture(texture, u, v);
            if texel == 0 {
                return;
            }
            if texel & MASK_BIT == 0 {
                opaque = true;
            }

            let texel_color = Color::from_rgb15(texel);
            color = if texture.raw {
                texel_color
            } else {
                color.modulate(texel_color)
            };
        }

        if !opaque {
            color = Self::blend(params.semi_transparency, Color::from_rgb15(existing), color);
        }

        let mask = if self.stat.flag(GpuStat::SET_MASK) {
            MASK_BIT
        } else {
            0
        };
        self.write_vram(x, y, color.to_rgb15() | mask);
    }

    /// Combine a new pixel with the one already in VRAM
    ///
    /// Only the additive mode is applied; the other modes draw the new
    /// pixel unchanged.
    fn blend(mode: SemiTransparency, back: Color, front: Color) -> Color {
        match mode {
            SemiTransparency::Add => back.saturating_add(front),
            SemiTransparency::Half | SemiTransparency::Subtract | SemiTransparency::Quarter => {
                front
            }
        }
    }
}
