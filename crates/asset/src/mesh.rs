//! CPU-side mesh representation used by loaders.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{
    bounds::{Aabb, Normalization},
    material::Material,
};

/// Vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Normal used when a face reference omits one.
    pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Single-material indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Triangles sharing one material. `indices.len()` is always a multiple of 3.
#[derive(Clone, Debug, PartialEq)]
pub struct SubMesh {
    /// Index into [`Mesh::materials`].
    pub material: usize,
    pub indices: Vec<u32>,
}

impl SubMesh {
    pub fn new(material: usize) -> Self {
        Self {
            material,
            indices: Vec::new(),
        }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index buffer contents for upload.
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// A loaded model: one shared vertex buffer, per-material index lists and
/// the material table. Immutable once the loader hands it out.
#[derive(Debug, Default)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    sub_meshes: Vec<SubMesh>,
    materials: Vec<Material>,
    bounds: Aabb,
    normalization: Option<Normalization>,
}

impl Mesh {
    pub(crate) fn from_parts(
        vertices: Vec<MeshVertex>,
        sub_meshes: Vec<SubMesh>,
        materials: Vec<Material>,
        bounds: Aabb,
        normalization: Option<Normalization>,
    ) -> Self {
        Self {
            vertices,
            sub_meshes,
            materials,
            bounds,
            normalization,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    #[inline]
    pub fn sub_meshes(&self) -> &[SubMesh] {
        &self.sub_meshes
    }

    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material bound to `sub_mesh`.
    #[inline]
    pub fn material_of(&self, sub_mesh: &SubMesh) -> &Material {
        &self.materials[sub_mesh.material]
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.sub_meshes.iter().map(SubMesh::triangle_count).sum()
    }

    #[inline]
    pub fn num_sub_meshes(&self) -> usize {
        self.sub_meshes.len()
    }

    /// Bounding box of the source positions, before normalization.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.bounds.extent()
    }

    /// The transform applied to positions, or `None` if they are untouched.
    #[inline]
    pub fn normalization(&self) -> Option<Normalization> {
        self.normalization
    }

    /// Vertex buffer contents for upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn info(&self) -> MeshInfo<'_> {
        MeshInfo { mesh: self }
    }
}

/// Human-readable model summary, one fact per line.
pub struct MeshInfo<'a> {
    mesh: &'a Mesh,
}

impl fmt::Display for MeshInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.mesh;
        writeln!(f, "# Vertices: {}", mesh.num_vertices())?;
        writeln!(f, "# Triangles: {}", mesh.num_triangles())?;
        writeln!(f, "Total {} submeshes loaded", mesh.num_sub_meshes())?;
        for (i, sub) in mesh.sub_meshes.iter().enumerate() {
            writeln!(
                f,
                "SubMesh {} with material '{}': {} triangles",
                i,
                mesh.material_of(sub).name,
                sub.triangle_count()
            )?;
        }
        let c = mesh.center();
        let e = mesh.extent();
        writeln!(f, "Model center: {}, {}, {}", c.x, c.y, c.z)?;
        write!(f, "Model extent: {} x {} x {}", e.x, e.y, e.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sub_meshes() -> Mesh {
        let vertices = vec![MeshVertex::default(); 5];
        let mut a = SubMesh::new(0);
        a.indices.extend([0, 1, 2, 0, 2, 3]);
        let mut b = SubMesh::new(1);
        b.indices.extend([2, 3, 4]);
        Mesh::from_parts(
            vertices,
            vec![a, b],
            vec![Material::new("Body"), Material::new("Eyes")],
            Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)),
            None,
        )
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn triangle_count_sums_sub_meshes() {
        let mesh = two_sub_meshes();
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_sub_meshes(), 2);
        assert_eq!(mesh.num_triangles(), 3);
        assert_eq!(mesh.material_of(&mesh.sub_meshes()[1]).name, "Eyes");
    }

    #[test]
    fn byte_views_match_buffer_sizes() {
        let mesh = two_sub_meshes();
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(mesh.vertex_bytes().len(), 5 * 32);
        assert_eq!(mesh.sub_meshes()[0].index_bytes().len(), 6 * 4);
    }

    #[test]
    fn info_lists_every_sub_mesh() {
        let text = two_sub_meshes().info().to_string();
        assert!(text.contains("# Vertices: 5"));
        assert!(text.contains("# Triangles: 3"));
        assert!(text.contains("SubMesh 0 with material 'Body': 2 triangles"));
        assert!(text.contains("SubMesh 1 with material 'Eyes': 1 triangles"));
        assert!(text.contains("Model center: 1, 0.5, 0.5"));
        assert!(text.ends_with("Model extent: 2 x 1 x 1"));
    }
}
