//! Procedural UV sphere used as skybox geometry.

use std::f32::consts::{PI, TAU};

use crate::mesh::{MeshData, MeshVertex};

pub const SKYBOX_SLICES: u32 = 36;
pub const SKYBOX_STACKS: u32 = 18;
pub const SKYBOX_RADIUS: f32 = 50.0;

/// Latitude/longitude sphere centered at the origin, seen from inside:
/// normals point toward the center and `uv` maps an equirectangular panorama.
///
/// `slices` and `stacks` are clamped to at least 3 and 2.
pub fn uv_sphere(slices: u32, stacks: u32, radius: f32) -> MeshData {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let ring = slices + 1;

    let mut vertices = Vec::with_capacity((ring * (stacks + 1)) as usize);
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let phi = u * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let dir = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(MeshVertex::new(
                [dir[0] * radius, dir[1] * radius, dir[2] * radius],
                [-dir[0], -dir[1], -dir[2]],
                [u, 1.0 - v],
            ));
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * ring + j;
            let b = a + ring;
            indices.extend([a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    MeshData::new(vertices, indices)
}

/// Sphere with the default skybox resolution.
pub fn skybox_sphere() -> MeshData {
    uv_sphere(SKYBOX_SLICES, SKYBOX_STACKS, SKYBOX_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_resolution() {
        let mesh = uv_sphere(8, 4, 1.0);
        assert_eq!(mesh.vertices.len(), 9 * 5);
        assert_eq!(mesh.triangle_count(), 8 * 4 * 2);
        assert!(mesh.is_valid());
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn vertices_lie_on_radius_with_inward_normals() {
        let mesh = skybox_sphere();
        for v in &mesh.vertices {
            let p = v.position();
            assert!((p.length() - SKYBOX_RADIUS).abs() < 1e-3);
            let n = glam::Vec3::from_array(v.normal);
            assert!((n + p / SKYBOX_RADIUS).length() < 1e-5);
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn resolution_is_clamped() {
        let mesh = uv_sphere(0, 0, 2.0);
        assert_eq!(mesh.triangle_count(), 3 * 2 * 2);
    }
}
