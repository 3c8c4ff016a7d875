//! Model loading: OBJ geometry + companion MTL + diffuse textures.
//!
//! A model named `Name` lives at `<root>/Name/Name.obj`; `mtllib` and
//! `map_Kd` paths are relative to that directory.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    bounds::{Aabb, Normalization},
    error::{LoadError, LoadResult},
    material::Material,
    mesh::{Mesh, MeshVertex},
    mtl::parse_mtl,
    obj::{ObjGeometry, parse_obj},
    texture::TextureData,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Recenter at the origin and scale the largest extent to 1.
    pub normalize: bool,
    /// Decode `map_Kd` images. Paths are resolved either way.
    pub load_textures: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            load_textures: true,
        }
    }
}

/// `<models_root>/<model>/<model>.obj`
pub fn model_obj_path(models_root: impl AsRef<Path>, model: &str) -> PathBuf {
    models_root
        .as_ref()
        .join(model)
        .join(format!("{}.obj", model))
}

/// Load a model by name from a models directory.
pub fn load_model(
    models_root: impl AsRef<Path>,
    model: &str,
    options: LoadOptions,
) -> LoadResult<Mesh> {
    log::info!("Loading model '{}'", model);
    load_obj_with_materials(model_obj_path(models_root, model), options)
}

/// Load an OBJ file and the MTL file it references.
///
/// Nothing is returned on failure; a half-assembled mesh never escapes.
pub fn load_obj_with_materials(path: impl AsRef<Path>, options: LoadOptions) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::GeometryOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let ObjGeometry {
        mtllib,
        material_names,
        mut vertices,
        sub_meshes,
    } = parse_obj(BufReader::new(file))?;

    let bounds = Aabb::from_points(vertices.iter().map(MeshVertex::position));
    let normalization = if options.normalize {
        normalize_vertices(&mut vertices, &bounds)
    } else {
        None
    };

    let mut materials: Vec<Material> = material_names.into_iter().map(Material::new).collect();
    match mtllib {
        Some(rel) => {
            let mtl_path = dir.join(rel);
            let file = File::open(&mtl_path).map_err(|source| LoadError::MaterialOpen {
                path: mtl_path.clone(),
                source,
            })?;
            parse_mtl(BufReader::new(file), &mut materials)?;
            resolve_textures(&dir, &mut materials, options.load_textures);
        }
        None => log::warn!(
            "{} has no mtllib; materials keep default coefficients",
            path.display()
        ),
    }

    let mesh = Mesh::from_parts(vertices, sub_meshes, materials, bounds, normalization);
    log::info!(
        "Loaded {}: {} vertices, {} triangles, {} submeshes",
        path.display(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.num_sub_meshes()
    );
    Ok(mesh)
}

/// Recenter and isotropically rescale `vertices` to a unit bounding box.
/// A degenerate `bounds` leaves them untouched and returns `None`.
pub fn normalize_vertices(vertices: &mut [MeshVertex], bounds: &Aabb) -> Option<Normalization> {
    let Some(normalization) = Normalization::for_bounds(bounds) else {
        log::warn!("Degenerate bounding box; skipping normalization");
        return None;
    };

    for vertex in vertices.iter_mut() {
        vertex.position = normalization.apply(vertex.position()).to_array();
    }
    Some(normalization)
}

fn resolve_textures(dir: &Path, materials: &mut [Material], decode: bool) {
    for material in materials.iter_mut() {
        let Some(rel) = material.map_kd_path.take() else {
            continue;
        };
        let full = dir.join(rel);
        if decode {
            match TextureData::load(&full) {
                Ok(texture) => material.map_kd = Some(texture),
                Err(e) => log::warn!("Material '{}': {:#}", material.name, e),
            }
        }
        material.map_kd_path = Some(full);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::obj::parse_obj_str;

    fn bounds_of(vertices: &[MeshVertex]) -> Aabb {
        Aabb::from_points(vertices.iter().map(MeshVertex::position))
    }

    #[test]
    fn model_path_layout() {
        let p = model_obj_path("models", "TexCube");
        assert_eq!(p, Path::new("models").join("TexCube").join("TexCube.obj"));
    }

    #[test]
    fn normalized_box_is_unit_and_centered() {
        let geo = parse_obj_str(
            "v -3 1 2\nv 5 2 3\nv 1 -1 4\nv 0 0 2.5\nusemtl A\nf 1 2 3 4\n",
        )
        .expect("parse");
        let mut vertices = geo.vertices;
        let before = bounds_of(&vertices);
        let n = normalize_vertices(&mut vertices, &before).expect("non-degenerate");
        assert!((n.scale - 1.0 / 8.0).abs() < 1e-6);

        let after = bounds_of(&vertices);
        assert!((after.max_extent() - 1.0).abs() < 1e-5);
        assert!(after.center().length() < 1e-5);
        // Aspect ratio survives.
        let ratio_before = before.extent() / before.max_extent();
        assert!((after.extent() - ratio_before).length() < 1e-5);
    }

    #[test]
    fn degenerate_box_leaves_positions_unchanged() {
        let mut vertices = vec![MeshVertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.0; 2]); 3];
        let bounds = bounds_of(&vertices);
        assert!(normalize_vertices(&mut vertices, &bounds).is_none());
        assert!(vertices.iter().all(|v| v.position() == Vec3::new(1.0, 2.0, 3.0)));
    }
}
