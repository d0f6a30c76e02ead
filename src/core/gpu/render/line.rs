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

//! Span filling

use crate::core::gpu::{lerp_u8, RenderParams, Span, GPU};

impl GPU {
    /// Draw one scanline span
    ///
    /// Pixels run from `x1` (inclusive) to `x2` (exclusive); color and U
    /// are interpolated linearly across the span. An empty or reversed span
    /// draws nothing.
    pub(in crate::core::gpu) fn draw_span(&mut self, span: &Span, params: &RenderParams) {
        let width = (span.x2 as i32 - span.x1 as i32) as f32;

        for x in span.x1..span.x2 {
            let f = (x as i32 - span.x1 as i32) as f32 / width;
            let color = span.c1.lerp(span.c2, f);
            let u = lerp_u8(span.u1, span.u2, f);

            self.draw_pixel(x, span.y, color, u, span.v, params);
        }
    }
}
