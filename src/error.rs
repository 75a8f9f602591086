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

use thiserror::Error;

/// Expected per-face failures of the triangulation engine.
///
/// None of these leave the mesh modified.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TriangulationError {
    #[error("face {0} has a null normal")]
    DegenerateNormal(usize),

    #[error("projected triangulation of face {0} does not match its boundary")]
    InconsistentTriangulation(usize),

    #[error("face {0} does not exist or was removed")]
    NotAFace(usize),
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("vertex index {index} out of range ({count} vertices)")]
    InvalidVertexIndex { index: usize, count: usize },

    #[error("degenerate face: {0}")]
    DegenerateFace(String),

    #[error("edge ({0}, {1}) is already bound to a face")]
    NonManifoldEdge(usize, usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OFF: {0}")]
    Parse(String),
}
