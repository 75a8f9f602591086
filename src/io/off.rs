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

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::MeshError,
    geometry::{point::Point3, spatial_element::SpatialElement},
    mesh::basic_types::Mesh,
    numeric::scalar::{RefArith, Scalar},
};

/// Write a polygon mesh to OFF.
/// Format:
///   OFF
///   <numVertices> <numFaces> 0
///   x y z
///   ...
///   k i j k ...   (zero-based indices)
pub fn write_off<T: Scalar, P: AsRef<Path>>(mesh: &Mesh<T, 3>, path: P) -> Result<(), MeshError>
where
    for<'a> &'a T: RefArith<T>,
{
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_off_to(mesh, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn write_off_to<T: Scalar, W: Write>(mesh: &Mesh<T, 3>, out: &mut W) -> Result<(), MeshError>
where
    for<'a> &'a T: RefArith<T>,
{
    writeln!(out, "OFF")?;
    writeln!(out, "{} {} 0", mesh.vertices.len(), mesh.face_count())?;

    for (vi, v) in mesh.vertices.iter().enumerate() {
        let mut coords = [0.0f64; 3];
        for (k, c) in v.position.iter().enumerate() {
            coords[k] = c.to_f64().ok_or_else(|| {
                MeshError::Parse(format!("vertex {} has no f64 representation", vi))
            })?;
        }
        writeln!(out, "{} {} {}", coords[0], coords[1], coords[2])?;
    }

    for f in mesh.live_faces() {
        let vs = mesh.face_vertices(f);
        write!(out, "{}", vs.len())?;
        for v in vs {
            write!(out, " {}", v)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Read a polygon mesh from an OFF file.
pub fn read_off<T: Scalar, P: AsRef<Path>>(path: P) -> Result<Mesh<T, 3>, MeshError>
where
    for<'a> &'a T: RefArith<T>,
{
    let file = File::open(path)?;
    read_off_from(BufReader::new(file))
}

/// Read a polygon mesh from OFF text.
/// Supports:
///   OFF
///   <V> <F> <E>
///   V lines of "x y z"
///   F lines of "k i j k [ ... ]", any k >= 3
/// Anything after `#` on a line is ignored.
pub fn read_off_from<T: Scalar, R: BufRead>(reader: R) -> Result<Mesh<T, 3>, MeshError>
where
    for<'a> &'a T: RefArith<T>,
{
    let toks = tokenize(reader)?;
    let mut it = toks.iter().map(String::as_str);

    let header = it
        .next()
        .ok_or_else(|| MeshError::Parse("empty file".to_string()))?;
    if header != "OFF" {
        return Err(MeshError::Parse(format!("expected 'OFF', got '{}'", header)));
    }

    let vcount: usize = parse_next(&mut it, "vertex count")?;
    let fcount: usize = parse_next(&mut it, "face count")?;
    let _ecount: usize = parse_next(&mut it, "edge count")?;

    let mut mesh = Mesh::new();
    for _ in 0..vcount {
        let x: f64 = parse_next(&mut it, "vertex x")?;
        let y: f64 = parse_next(&mut it, "vertex y")?;
        let z: f64 = parse_next(&mut it, "vertex z")?;
        mesh.add_vertex(Point3::<T>::from_vals([x, y, z]));
    }

    let mut poly = Vec::new();
    for _ in 0..fcount {
        let k: usize = parse_next(&mut it, "face vertex count")?;
        poly.clear();
        for _ in 0..k {
            let v: usize = parse_next(&mut it, "face index")?;
            poly.push(v);
        }
        mesh.add_face(&poly)?;
    }

    mesh.build_boundary_loops();
    Ok(mesh)
}

// non-empty, non-comment tokens across lines
fn tokenize<R: BufRead>(r: R) -> Result<Vec<String>, MeshError> {
    let mut toks = Vec::new();
    for line in r.lines() {
        let l = line?;
        let trimmed = l.split('#').next().unwrap_or("").trim();
        toks.extend(trimmed.split_whitespace().map(str::to_string));
    }
    Ok(toks)
}

fn parse_next<'a, V: std::str::FromStr>(
    it: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<V, MeshError> {
    let tok = it
        .next()
        .ok_or_else(|| MeshError::Parse(format!("missing {}", what)))?;
    tok.parse()
        .map_err(|_| MeshError::Parse(format!("bad {} '{}'", what, tok)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::float::F64;

    const PENTAGON_AND_SQUARE: &str = "OFF
# two faces sharing the edge 1-2
6 2 0
0 0 0
1 0 0
1 1 0   # trailing comment
0.5 1.5 0
0 1 0
2 0.5 0
5 0 1 2 3 4
3 1 5 2
";

    #[test]
    fn reads_polygons_and_comments() {
        let mesh = read_off_from::<F64, _>(PENTAGON_AND_SQUARE.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face_degree(0), 5);
        assert_eq!(mesh.face_vertices(0).to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(mesh.edge_count(), 7);
        mesh.validate_connectivity();
    }

    #[test]
    fn rejects_bad_header_and_indices() {
        assert!(matches!(
            read_off_from::<F64, _>("PLY\n".as_bytes()),
            Err(MeshError::Parse(_))
        ));
        assert!(matches!(
            read_off_from::<F64, _>("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n".as_bytes()),
            Err(MeshError::InvalidVertexIndex { index: 7, count: 3 })
        ));
        assert!(matches!(
            read_off_from::<F64, _>("OFF\n3 1 0\n0 0 0\n1 0 0\n".as_bytes()),
            Err(MeshError::Parse(_))
        ));
    }

    #[test]
    fn write_then_read_keeps_faces() {
        let mesh = read_off_from::<F64, _>(PENTAGON_AND_SQUARE.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_off_to(&mesh, &mut buf).unwrap();
        let back = read_off_from::<F64, _>(buf.as_slice()).unwrap();

        assert_eq!(back.vertices.len(), mesh.vertices.len());
        for f in mesh.live_faces() {
            assert_eq!(back.face_vertices(f), mesh.face_vertices(f));
        }
    }
}
