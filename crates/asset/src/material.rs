//! Phong material parameters attached to submeshes.

use std::path::PathBuf;

use crate::texture::TextureData;

/// Name used for faces that appear before any `usemtl`.
pub const DEFAULT_MATERIAL: &str = "default";

/// Phong reflectance coefficients plus an optional diffuse texture.
/// Unset coefficients stay at zero.
#[derive(Clone, Debug, Default)]
pub struct Material {
    pub name: String,
    pub ka: [f32; 3],
    pub kd: [f32; 3],
    pub ks: [f32; 3],
    pub ns: f32,
    /// `map_Kd` resolved against the model directory.
    pub map_kd_path: Option<PathBuf>,
    /// Decoded diffuse texture, if texture loading was enabled and succeeded.
    pub map_kd: Option<TextureData>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn has_diffuse_texture(&self) -> bool {
        self.map_kd.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_material_has_zero_coefficients() {
        let m = Material::new("Foo");
        assert_eq!(m.name, "Foo");
        assert_eq!(m.ka, [0.0; 3]);
        assert_eq!(m.kd, [0.0; 3]);
        assert_eq!(m.ks, [0.0; 3]);
        assert_eq!(m.ns, 0.0);
        assert!(!m.has_diffuse_texture());
    }
}
