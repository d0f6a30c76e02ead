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

//! GPU primitive type definitions
//!
//! Decoders for the fields packed into GP0 command words (colors, vertices,
//! texture coordinates, CLUT and texture page attributes) and the render
//! parameters handed to the rasterizer.
//!
//! # Command Word Layouts
//!
//! ```text
//! Color:    [31:24] opcode  [23:16] blue   [15:8] green  [7:0] red
//! Vertex:   [26:16] Y (signed 11-bit)      [10:0] X (signed 11-bit)
//! Texcoord: [31:16] CLUT or texpage        [15:8] V      [7:0] U
//! ```

use super::registers::{SemiTransparency, TextureDepth};
use crate::core::bitfield::{bits, sign_extend};

/// A 24-bit RGB color used in GPU commands
///
/// Converted to 15-bit for VRAM storage. VRAM pixels keep blue in bits
/// 0-4, green in bits 5-9, red in bits 10-14 and the mask bit in bit 15.
///
/// # Examples
///
/// ```
/// use psxcore::core::gpu::Color;
///
/// let color = Color::from_u32(0x00FF_8040);
/// assert_eq!((color.r, color.g, color.b), (0x40, 0x80, 0xFF));
///
/// let red = Color { r: 0xFF, g: 0, b: 0 };
/// assert_eq!(red.to_rgb15(), 0x7C00);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Decode the color held in bits 0-23 of a command word
    #[inline(always)]
    pub fn from_u32(value: u32) -> Self {
        Self {
            r: bits(value, 0, 8) as u8,
            g: bits(value, 8, 8) as u8,
            b: bits(value, 16, 8) as u8,
        }
    }

    /// Expand a 15-bit VRAM pixel to 8 bits per channel (low 3 bits zero)
    #[inline(always)]
    pub fn from_rgb15(pixel: u16) -> Self {
        Self {
            r: (((pixel >> 10) & 0x1F) << 3) as u8,
            g: (((pixel >> 5) & 0x1F) << 3) as u8,
            b: ((pixel & 0x1F) << 3) as u8,
        }
    }

    /// Pack into a 15-bit VRAM pixel, discarding the low 3 bits of each
    /// channel (bit 15 is left clear)
    #[inline(always)]
    pub fn to_rgb15(&self) -> u16 {
        let r = (self.r >> 3) as u16;
        let g = (self.g >> 3) as u16;
        let b = (self.b >> 3) as u16;
        (r << 10) | (g << 5) | b
    }

    /// Texture blending: `texel * self / 0x80` per channel, clamped to 255
    ///
    /// A channel value of 0x80 leaves the texel unchanged; larger values
    /// brighten it.
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::gpu::Color;
    ///
    /// let texel = Color { r: 0xF8, g: 0x40, b: 0x00 };
    /// let tint = Color { r: 0x80, g: 0x40, b: 0xFF };
    /// assert_eq!(tint.modulate(texel), Color { r: 0xF8, g: 0x20, b: 0x00 });
    /// ```
    #[inline(always)]
    pub fn modulate(&self, texel: Color) -> Color {
        let channel = |t: u8, c: u8| -> u8 { ((t as u16 * c as u16) / 0x80).min(0xFF) as u8 };
        Color {
            r: channel(texel.r, self.r),
            g: channel(texel.g, self.g),
            b: channel(texel.b, self.b),
        }
    }

    /// Per-channel saturating sum
    #[inline(always)]
    pub fn saturating_add(&self, other: Color) -> Color {
        Color {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }

    /// Interpolate from `self` to `other` by factor `f`
    ///
    /// Each channel is computed in `f32` and truncated.
    #[inline(always)]
    pub fn lerp(&self, other: Color, f: f32) -> Color {
        Color {
            r: lerp_u8(self.r, other.r, f),
            g: lerp_u8(self.g, other.g, f),
            b: lerp_u8(self.b, other.b, f),
        }
    }
}

/// Interpolate between two 8-bit values, truncating the result
#[inline(always)]
pub fn lerp_u8(a: u8, b: u8, f: f32) -> u8 {
    (a as f32 + f * (b as f32 - a as f32)) as u8
}

/// A 2D vertex position decoded from a command word
///
/// # Example
///
/// ```
/// use psxcore::core::gpu::Vertex;
///
/// let vertex = Vertex::from_u32(0x07FF_0014);
/// assert_eq!((vertex.x, vertex.y), (20, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vertex {
    /// X coordinate (signed 11-bit)
    pub x: i16,
    /// Y coordinate (signed 11-bit)
    pub y: i16,
}

impl Vertex {
    /// Decode X from bits 0-10 and Y from bits 16-26, sign-extended
    #[inline(always)]
    pub fn from_u32(value: u32) -> Self {
        Self {
            x: sign_extend(bits(value, 0, 11), 11) as i16,
            y: sign_extend(bits(value, 16, 11), 11) as i16,
        }
    }
}

/// Texture coordinate pair from bits 0-15 of a command word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexCoord {
    /// U coordinate (0-255)
    pub u: u8,
    /// V coordinate (0-255)
    pub v: u8,
}

impl TexCoord {
    #[inline(always)]
    pub fn from_u32(value: u32) -> Self {
        Self {
            u: bits(value, 0, 8) as u8,
            v: bits(value, 8, 8) as u8,
        }
    }
}

/// Texture page attribute (bits 16-31 of the second texcoord word)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexPage {
    /// Raw 16-bit attribute, laid out like GP0(E1h) bits 0-15
    pub raw: u16,
}

impl TexPage {
    #[inline(always)]
    pub fn from_u32(value: u32) -> Self {
        Self {
            raw: (value >> 16) as u16,
        }
    }

    /// Page base X in pixels (N×64)
    pub fn base_x(&self) -> u16 {
        (self.raw & 0xF) * 64
    }

    /// Page base Y in pixels (N×256)
    pub fn base_y(&self) -> u16 {
        ((self.raw >> 4) & 0x1) * 256
    }

    /// Semi-transparency mode requested by the page
    pub fn semi_transparency(&self) -> SemiTransparency {
        SemiTransparency::from_bits((self.raw >> 5) as u32)
    }
}

/// CLUT position (bits 16-31 of the first texcoord word)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clut {
    /// X position in pixels (N×16)
    pub x: u16,
    /// Y position in pixels
    pub y: u16,
}

impl Clut {
    #[inline(always)]
    pub fn from_u32(value: u32) -> Self {
        Self {
            x: bits(value, 16, 6) as u16 * 16,
            y: bits(value, 22, 9) as u16,
        }
    }
}

/// Texture source of a textured primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// Texture page origin in VRAM
    pub page_x: u16,
    pub page_y: u16,
    /// Palette origin in VRAM
    pub clut: Clut,
    /// Texel format
    pub depth: TextureDepth,
    /// Raw texture (no blending with the vertex color)
    pub raw: bool,
}

/// Per-primitive render state handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderParams {
    /// Opaque drawing; semi-transparent primitives use `semi_transparency`
    pub opaque: bool,
    /// Blend function for semi-transparent pixels
    pub semi_transparency: SemiTransparency,
    /// Texture source, `None` for untextured primitives
    pub texture: Option<TextureParams>,
}

impl RenderParams {
    /// Untextured primitive
    pub fn flat(opaque: bool, semi_transparency: SemiTransparency) -> Self {
        Self {
            opaque,
            semi_transparency,
            texture: None,
        }
    }
}

/// Triangle corner carrying every interpolated attribute
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriangleVertex {
    pub x: i16,
    pub y: i16,
    pub color: Color,
    pub u: u8,
    pub v: u8,
}

impl TriangleVertex {
    /// Corner without texture coordinates
    pub fn new(vertex: Vertex, color: Color) -> Self {
        Self {
            x: vertex.x,
            y: vertex.y,
            color,
            u: 0,
            v: 0,
        }
    }

    /// Textured corner
    pub fn textured(vertex: Vertex, color: Color, texcoord: TexCoord) -> Self {
        Self {
            x: vertex.x,
            y: vertex.y,
            color,
            u: texcoord.u,
            v: texcoord.v,
        }
    }
}

/// One horizontal run of pixels, `x1` inclusive to `x2` exclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub x1: i16,
    pub x2: i16,
    pub y: i16,
    pub c1: Color,
    pub c2: Color,
    pub u1: u8,
    pub u2: u8,
    pub v: u8,
}
