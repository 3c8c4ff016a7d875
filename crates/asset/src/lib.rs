//! Asset loading/parsers (meshes, materials, textures).
//! OBJ geometry with per-material submeshes, MTL Phong materials,
//! RGBA8 textures and procedural skybox geometry.

pub mod bounds;
pub mod error;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod sphere;
pub mod texture;

pub use bounds::{Aabb, Normalization};
pub use error::{LoadError, LoadResult};
pub use loader::{LoadOptions, load_model, load_obj_with_materials, model_obj_path};
pub use material::Material;
pub use mesh::{Mesh, MeshData, MeshVertex, SubMesh};
pub use texture::TextureData;
