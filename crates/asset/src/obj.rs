//! OBJ geometry parser: positions, normals, texture coordinates, polygon
//! faces and `usemtl` material groups.

use std::{
    collections::HashMap,
    io::{self, BufRead},
};

use crate::{
    error::{LoadError, LoadResult},
    material::DEFAULT_MATERIAL,
    mesh::{MeshVertex, SubMesh},
};

/// Result of a geometry pass, before materials are attached.
#[derive(Clone, Debug, Default)]
pub struct ObjGeometry {
    /// Last `mtllib` path seen, as written in the file.
    pub mtllib: Option<String>,
    /// Distinct material names in first-use order; `SubMesh::material` indexes this.
    pub material_names: Vec<String>,
    pub vertices: Vec<MeshVertex>,
    pub sub_meshes: Vec<SubMesh>,
}

/// Parse OBJ geometry from a [`BufRead`] implementation.
pub fn parse_obj<R: BufRead>(reader: R) -> LoadResult<ObjGeometry> {
    let mut builder = GeometryBuilder::default();

    for (line_no, line) in lossy_lines(reader).enumerate() {
        let line = line.map_err(|e| LoadError::read(line_no, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "mtllib" => {
                let path = rest_of_line(trimmed, tag);
                if path.is_empty() {
                    return Err(LoadError::malformed(line_no, "mtllib without a path"));
                }
                builder.mtllib = Some(path.to_owned());
            }
            "usemtl" => {
                let name = rest_of_line(trimmed, tag);
                if name.is_empty() {
                    return Err(LoadError::malformed(line_no, "usemtl without a name"));
                }
                builder.open_sub_mesh(name);
            }
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                builder.positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                builder.texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                builder.normals.push([nx, ny, nz]);
            }
            "f" => builder.push_face(parts, line_no)?,
            other => {
                // o/g/s/vp/l and friends carry nothing we assemble.
                log::debug!("Ignoring OBJ directive '{}' on line {}", other, line_no + 1);
            }
        }
    }

    Ok(builder.finish())
}

/// Convenience helper to parse an OBJ string literal.
pub fn parse_obj_str(contents: &str) -> LoadResult<ObjGeometry> {
    parse_obj(io::Cursor::new(contents))
}

/// One `p/t/n` reference, already 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceRef {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct GeometryBuilder {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    face: Vec<FaceRef>,

    mtllib: Option<String>,
    material_names: Vec<String>,
    material_lookup: HashMap<String, usize>,
    vertices: Vec<MeshVertex>,
    sub_meshes: Vec<SubMesh>,
}

impl GeometryBuilder {
    /// Every `usemtl` starts a fresh group, even for a name seen before.
    fn open_sub_mesh(&mut self, name: &str) {
        let material = match self.material_lookup.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.material_names.len();
                self.material_names.push(name.to_owned());
                self.material_lookup.insert(name.to_owned(), idx);
                idx
            }
        };
        self.sub_meshes.push(SubMesh::new(material));
    }

    fn current_sub_mesh(&mut self) -> &mut SubMesh {
        if self.sub_meshes.is_empty() {
            log::debug!("Face before any usemtl; using material '{}'", DEFAULT_MATERIAL);
            self.open_sub_mesh(DEFAULT_MATERIAL);
        }
        let last = self.sub_meshes.len() - 1;
        &mut self.sub_meshes[last]
    }

    fn push_face<'a>(
        &mut self,
        tokens: impl Iterator<Item = &'a str>,
        line_no: usize,
    ) -> LoadResult<()> {
        self.face.clear();
        for token in tokens {
            let face_ref = parse_face_vertex(
                token,
                self.positions.len(),
                self.texcoords.len(),
                self.normals.len(),
                line_no,
            )?;
            self.face.push(face_ref);
        }

        if self.face.len() < 3 {
            log::warn!(
                "Skipping face with {} vertices on line {}",
                self.face.len(),
                line_no + 1
            );
            return Ok(());
        }

        let count = self.face.len();
        let base = u32::try_from(self.vertices.len())
            .ok()
            .filter(|base| base.checked_add(count as u32).is_some())
            .ok_or_else(|| {
                LoadError::malformed(line_no, format!("too many vertices in OBJ (>{})", u32::MAX))
            })?;

        for face_ref in &self.face {
            let position = self.positions[face_ref.position];
            let uv = face_ref
                .texcoord
                .map(|i| self.texcoords[i])
                .unwrap_or([0.0, 0.0]);
            let normal = face_ref
                .normal
                .map(|i| self.normals[i])
                .unwrap_or(MeshVertex::DEFAULT_NORMAL);
            self.vertices.push(MeshVertex::new(position, normal, uv));
        }

        // Triangulate fan
        let sub_mesh = self.current_sub_mesh();
        for i in 0..(count as u32 - 2) {
            sub_mesh.indices.extend([base, base + i + 1, base + i + 2]);
        }
        Ok(())
    }

    fn finish(self) -> ObjGeometry {
        ObjGeometry {
            mtllib: self.mtllib,
            material_names: self.material_names,
            vertices: self.vertices,
            sub_meshes: self.sub_meshes,
        }
    }
}

/// Everything after the directive token, trimmed. Keeps names with spaces intact.
/// Like [`BufRead::lines`], but invalid UTF-8 becomes U+FFFD instead of an
/// error. Exporters routinely write Latin-1 material names.
pub(crate) fn lossy_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    })
}

pub(crate) fn rest_of_line<'a>(line: &'a str, tag: &str) -> &'a str {
    line[tag.len()..].trim()
}

pub(crate) fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> LoadResult<f32> {
    let token =
        value.ok_or_else(|| LoadError::malformed(line_no, format!("missing {}", what)))?;
    token.parse::<f32>().map_err(|e| {
        LoadError::malformed(line_no, format!("failed to parse {} '{}': {}", what, token, e))
    })
}

fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
    line_no: usize,
) -> LoadResult<FaceRef> {
    let mut split = token.split('/');
    let pos = split.next().filter(|p| !p.is_empty()).ok_or_else(|| {
        LoadError::malformed(line_no, format!("malformed face element '{}'", token))
    })?;
    let position = resolve_index(pos, pos_count, line_no)?;

    let texcoord = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count, line_no)?),
        _ => None,
    };

    let normal = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, line_no)?),
        _ => None,
    };

    Ok(FaceRef {
        position,
        texcoord,
        normal,
    })
}

/// Turn a 1-based (or negative, end-relative) OBJ index into a checked 0-based one.
fn resolve_index(token: &str, len: usize, line_no: usize) -> LoadResult<usize> {
    let raw = token.parse::<i64>().map_err(|_| {
        LoadError::malformed(line_no, format!("invalid index '{}'", token))
    })?;
    if raw == 0 {
        return Err(LoadError::malformed(line_no, "OBJ indices are 1-based; found 0"));
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };

    if idx < 0 || idx as usize >= len {
        return Err(LoadError::malformed(
            line_no,
            format!("index {} resolved out of bounds (len={})", raw, len),
        ));
    }

    Ok(idx as usize)
}
