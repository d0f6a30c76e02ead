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

//! GP0 polygon drawing commands
//!
//! Each handler dequeues its full argument block at once, so a polygon is
//! never drawn from a partial command. Quads are drawn as the two
//! triangles (v1, v2, v3) and (v2, v3, v4).
//!
//! Opcode bit 1 selects semi-transparency and bit 0 (textured polygons
//! only) selects raw texturing without color blending.

use crate::core::gpu::{
    Clut, Color, RenderParams, TexCoord, TexPage, TextureParams, TriangleVertex, Vertex, GPU,
};

impl GPU {
    /// Whether the captured opcode draws opaque pixels
    fn polygon_is_opaque(&self) -> bool {
        self.progress.opcode & 0x02 == 0
    }

    /// Render state of an untextured polygon
    ///
    /// Semi-transparent polygons take their blend mode from GPUSTAT.
    fn untextured_params(&self) -> RenderParams {
        RenderParams::flat(self.polygon_is_opaque(), self.stat.semi_transparency())
    }

    /// Render state of a textured polygon
    ///
    /// The polygon's texpage attribute is latched into GPUSTAT first, so the
    /// texel depth comes from the page that was just set.
    fn textured_params(&mut self, palette_word: u32, texpage_word: u32) -> RenderParams {
        let page = TexPage::from_u32(texpage_word);
        self.apply_texpage(page.raw);

        RenderParams {
            opaque: self.polygon_is_opaque(),
            semi_transparency: page.semi_transparency(),
            texture: Some(TextureParams {
                page_x: page.base_x(),
                page_y: page.base_y(),
                clut: Clut::from_u32(palette_word),
                depth: self.stat.texture_depth(),
                raw: self.progress.opcode & 0x01 != 0,
            }),
        }
    }

    /// GP0(20h/22h): Monochrome three-point polygon
    ///
    /// ```text
    /// Word 0: Command + Color
    /// Word 1-3: Vertex 1-3
    /// ```
    pub(in crate::core::gpu) fn gp0_monochrome_triangle(&mut self) {
        let Some(words) = self.fifo.dequeue::<4>() else {
            return;
        };

        let color = Color::from_u32(words[0]);
        let params = self.untextured_params();
        let vertices = [words[1], words[2], words[3]]
            .map(|word| TriangleVertex::new(Vertex::from_u32(word), color));

        self.draw_triangle(vertices, &params);
        self.progress.complete();
    }

    /// GP0(28h/2Ah): Monochrome four-point polygon
    ///
    /// ```text
    /// Word 0: Command + Color
    /// Word 1-4: Vertex 1-4
    /// ```
    pub(in crate::core::gpu) fn gp0_monochrome_quad(&mut self) {
        let Some(words) = self.fifo.dequeue::<5>() else {
            return;
        };

        let color = Color::from_u32(words[0]);
        let params = self.untextured_params();
        let vertices = [words[1], words[2], words[3], words[4]]
            .map(|word| TriangleVertex::new(Vertex::from_u32(word), color));

        self.draw_quad(vertices, &params);
        self.progress.complete();
    }

    /// GP0(24h-27h): Textured three-point polygon
    ///
    /// ```text
    /// Word 0: Command + Color
    /// Word 1: Vertex 1
    /// Word 2: Texcoord 1 + Palette (CLUT)
    /// Word 3: Vertex 2
    /// Word 4: Texcoord 2 + Texpage
    /// Word 5: Vertex 3
    /// Word 6: Texcoord 3
    /// ```
    pub(in crate::core::gpu) fn gp0_textured_triangle(&mut self) {
        let Some(words) = self.fifo.dequeue::<7>() else {
            return;
        };

        let color = Color::from_u32(words[0]);
        let params = self.textured_params(words[2], words[4]);
        let vertices = [(words[1], words[2]), (words[3], words[4]), (words[5], words[6])].map(
            |(vertex, texcoord)| {
                TriangleVertex::textured(
                    Vertex::from_u32(vertex),
                    color,
                    TexCoord::from_u32(texcoord),
                )
            },
        );

        self.draw_triangle(vertices, &params);
        self.progress.complete();
    }

    /// GP0(2Ch-2Fh): Textured four-point polygon
    ///
    /// Same layout as the three-point form, followed by
    /// Vertex 4 (word 7) and Texcoord 4 (word 8).
    pub(in crate::core::gpu) fn gp0_textured_quad(&mut self) {
        let Some(words) = self.fifo.dequeue::<9>() else {
            return;
        };

        let color = Color::from_u32(words[0]);
        let params = self.textured_params(words[2], words[4]);
        let vertices = [
            (words[1], words[2]),
            (words[3], words[4]),
            (words[5], words[6]),
            (words[7], words[8]),
        ]
        .map(|(vertex, texcoord)| {
            TriangleVertex::textured(Vertex::from_u32(vertex), color, TexCoord::from_u32(texcoord))
        });

        self.draw_quad(vertices, &params);
        self.progress.complete();
    }

    /// GP0(30h/32h): Gouraud-shaded three-point polygon
    ///
    /// ```text
    /// Word 0: Command + Color 1
    /// Word 1: Vertex 1
    /// Word 2: Color 2
    /// Word 3: Vertex 2
    /// Word 4: Color 3
    /// Word 5: Vertex 3
    /// ```
    pub(in crate::core::gpu) fn gp0_shaded_triangle(&mut self) {
        let Some(words) = self.fifo.dequeue::<6>() else {
            return;
        };

        let params = self.untextured_params();
        let vertices = [(words[0], words[1]), (words[2], words[3]), (words[4], words[5])]
            .map(|(color, vertex)| {
                TriangleVertex::new(Vertex::from_u32(vertex), Color::from_u32(color))
            });

        self.draw_triangle(vertices, &params);
        self.progress.complete();
    }

    /// GP0(38h/3Ah): Gouraud-shaded four-point polygon
    ///
    /// Color/vertex pairs for all four corners (8 words).
    pub(in crate::core::gpu) fn gp0_shaded_quad(&mut self) {
        let Some(words) = self.fifo.dequeue::<8>() else {
            return;
        };

        let params = self.untextured_params();
        let vertices = [
            (words[0], words[1]),
            (words[2], words[3]),
            (words[4], words[5]),
            (words[6], words[7]),
        ]
        .map(|(color, vertex)| TriangleVertex::new(Vertex::from_u32(vertex), Color::from_u32(color)));

        self.draw_quad(vertices, &params);
        self.progress.complete();
    }

    /// Draw a quad as the triangles (v1, v2, v3) and (v2, v3, v4)
    fn draw_quad(&mut self, vertices: [TriangleVertex; 4], params: &RenderParams) {
        let [v1, v2, v3, v4] = vertices;
        self.draw_triangle([v1, v2, v3], params);
        self.draw_triangle([v2, v3, v4], params);
    }
}
