// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::collections::VecDeque;

use crate::{
    numeric::scalar::Scalar,
    operations::triangulation::{Edge2, FaceHandle, Triangulation2},
};

/// Per-face annotations of the projected triangulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceInfo {
    /// Mesh half-edge standing for edge `i` of the face, once known.
    pub e: [Option<usize>; 3],
    pub is_external: bool,
}

impl FaceInfo {
    pub fn table(slots: usize) -> Vec<FaceInfo> {
        vec![FaceInfo::default(); slots]
    }
}

/// Flood fill from the infinite face, stopping at constrained edges.
/// Faces never reached keep `is_external == false`.
pub fn mark_exterior_faces<T: Scalar, Tr: Triangulation2<T>>(cdt: &Tr, info: &mut [FaceInfo]) {
    let Some(seed) = cdt.incident_face(cdt.infinite_vertex()) else {
        return;
    };
    let mut queue: VecDeque<FaceHandle> = VecDeque::new();
    queue.push_back(seed);

    while let Some(fh) = queue.pop_front() {
        if info[fh].is_external {
            continue;
        }
        info[fh].is_external = true;
        for i in 0..3 {
            if !cdt.is_constrained(Edge2 { face: fh, index: i }) {
                queue.push_back(cdt.neighbor(fh, i));
            }
        }
    }
}
