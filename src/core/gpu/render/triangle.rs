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

//! Triangle setup and edge walking

use crate::core::gpu::{lerp_u8, RenderParams, Span, TriangleVertex, GPU};

/// Euclidean length of the vector (dx, dy)
#[inline(always)]
fn distance(dx: f32, dy: f32) -> f32 {
    (dx * dx + dy * dy).sqrt()
}

impl GPU {
    /// Rasterize a triangle
    ///
    /// The vertices may arrive in any order. Each covered pixel goes through
    /// [`draw_pixel`](GPU::draw_pixel), so clipping and masking happen per
    /// pixel.
    pub(in crate::core::gpu) fn draw_triangle(
        &mut self,
        vertices: [TriangleVertex; 3],
        params: &RenderParams,
    ) {
        let mut v = vertices;

        log::trace!(
            "Triangle ({}, {}) ({}, {}) ({}, {}) opaque={} textured={}",
            v[0].x,
            v[0].y,
            v[1].x,
            v[1].y,
            v[2].x,
            v[2].y,
            params.opaque,
            params.texture.is_some()
        );

        // Three compare-and-swaps sort by ascending Y
        if v[1].y < v[0].y {
            v.swap(0, 1);
        }
        if v[2].y < v[0].y {
            v.swap(0, 2);
        }
        if v[2].y < v[1].y {
            v.swap(1, 2);
        }

        if v[1].y == v[2].y {
            self.draw_flat_bottom(v, params);
            return;
        }
        if v[0].y == v[1].y {
            self.draw_flat_top(v, params);
            return;
        }

        // Split on the long edge at the middle vertex's Y
        let f = (v[1].y - v[0].y) as f32 / (v[2].y - v[0].y) as f32;
        let split = TriangleVertex {
            x: (v[0].x as f32 + f * (v[2].x as f32 - v[0].x as f32)) as i16,
            y: v[1].y,
            color: v[0].color.lerp(v[2].color, f),
            u: lerp_u8(v[0].u, v[2].u, f),
            v: lerp_u8(v[0].v, v[2].v, f),
        };

        self.draw_flat_bottom([v[0], v[1], split], params);
        self.draw_flat_top([v[1], split, v[2]], params);
    }

    /// Fill a triangle whose two lower vertices share a Y coordinate
    ///
    /// Scanlines run from the apex down to, but not including, the base.
    fn draw_flat_bottom(&mut self, mut v: [TriangleVertex; 3], params: &RenderParams) {
        if v[2].x < v[1].x {
            v.swap(1, 2);
        }
        let [apex, left, right] = v;

        let left_inc = (left.x - apex.x) as f32 / (left.y - apex.y) as f32;
        let right_inc = (right.x - apex.x) as f32 / (right.y - apex.y) as f32;
        let left_len = distance((left.x - apex.x) as f32, (left.y - apex.y) as f32);
        let right_len = distance((right.x - apex.x) as f32, (right.y - apex.y) as f32);

        let mut left_x = apex.x as f32;
        let mut right_x = apex.x as f32;

        for y in apex.y..left.y {
            let x1 = (left_x + 0.5) as i16;
            let x2 = (right_x + 0.5) as i16;
            let dy = (apex.y - y) as f32;

            let f1 = distance(apex.x as f32 - x1 as f32, dy) / left_len;
            let f2 = distance(apex.x as f32 - x2 as f32, dy) / right_len;
            let fv = (y - apex.y) as f32 / (left.y - apex.y) as f32;

            let span = Span {
                x1,
                x2,
                y,
                c1: apex.color.lerp(left.color, f1),
                c2: apex.color.lerp(right.color, f2),
                u1: lerp_u8(apex.u, left.u, f1),
                u2: lerp_u8(apex.u, right.u, f2),
                v: lerp_u8(apex.v, left.v, fv),
            };

            left_x += left_inc;
            right_x += right_inc;

            self.draw_span(&span, params);
        }
    }

    /// Fill a triangle whose two upper vertices share a Y coordinate
    ///
    /// Scanlines run from the bottom vertex up to and including the top edge.
    fn draw_flat_top(&mut self, mut v: [TriangleVertex; 3], params: &RenderParams) {
        if v[1].x < v[0].x {
            v.swap(0, 1);
        }
        let [left, right, bottom] = v;

        let left_inc = (left.x - bottom.x) as f32 / (left.y - bottom.y) as f32;
        let right_inc = (right.x - bottom.x) as f32 / (right.y - bottom.y) as f32;
        let left_len = distance((bottom.x - left.x) as f32, (bottom.y - left.y) as f32);
        let right_len = distance((bottom.x - right.x) as f32, (bottom.y - right.y) as f32);

        let mut left_x = bottom.x as f32;
        let mut right_x = bottom.x as f32;

        for y in (left.y..=bottom.y).rev() {
            let x1 = (left_x + 0.5) as i16;
            let x2 = (right_x + 0.5) as i16;
            let dy = (bottom.y - y) as f32;

            let f1 = distance(bottom.x as f32 - x1 as f32, dy) / left_len;
            let f2 = distance(bottom.x as f32 - x2 as f32, dy) / right_len;
            let fv = (y - left.y) as f32 / (bottom.y - left.y) as f32;

            let span = Span {
                x1,
                x2,
                y,
                c1: bottom.color.lerp(left.color, f1),
                c2: bottom.color.lerp(right.color, f2),
                u1: lerp_u8(bottom.u, left.u, f1),
                u2: lerp_u8(bottom.u, right.u, f2),
                v: lerp_u8(left.v, bottom.v, fv),
            };

            left_x -= left_inc;
            right_x -= right_inc;

            self.draw_span(&span, params);
        }
    }
}
