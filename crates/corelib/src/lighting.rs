//! CPU evaluation of the Phong reflection model.
//! Mirrors what the shading pass computes per fragment; used for previews
//! and to pin down the lighting math in tests.

use crate::{
    Vec3,
    light::{DirectionalLight, PointLight, SpotLight},
};

/// Reflectance of the surface being lit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongSurface {
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub ns: f32,
}

/// Everything that lights the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSet {
    pub ambient: Vec3,
    pub directional: Option<DirectionalLight>,
    pub point: Option<PointLight>,
    pub spot: Option<SpotLight>,
}

impl Default for LightSet {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            directional: None,
            point: None,
            spot: None,
        }
    }
}

/// Below this squared distance a positional light is treated as touching the surface.
const MIN_DIST_SQ: f32 = 1e-4;

/// Outgoing color at `position` with surface `normal`, seen from `eye`.
pub fn shade(
    surface: &PhongSurface,
    lights: &LightSet,
    position: Vec3,
    normal: Vec3,
    eye: Vec3,
) -> Vec3 {
    let n = normal.normalize_or_zero();
    let v = (eye - position).normalize_or_zero();

    let mut color = surface.ka * lights.ambient;

    if let Some(light) = &lights.directional {
        let l = (-light.direction).normalize_or_zero();
        color += reflect_light(surface, n, l, v) * light.radiance;
    }

    if let Some(light) = &lights.point {
        let (l, attenuation) = toward_light(light.position, position);
        color += reflect_light(surface, n, l, v) * light.intensity * attenuation;
    }

    if let Some(light) = &lights.spot {
        let (l, attenuation) = toward_light(light.position, position);
        let cone = light.falloff(-l);
        if cone > 0.0 {
            color += reflect_light(surface, n, l, v) * light.intensity * attenuation * cone;
        }
    }

    color
}

/// Unit vector from `position` to the light and its inverse-square attenuation.
fn toward_light(light_pos: Vec3, position: Vec3) -> (Vec3, f32) {
    let delta = light_pos - position;
    let dist_sq = delta.length_squared().max(MIN_DIST_SQ);
    (delta.normalize_or_zero(), 1.0 / dist_sq)
}

/// Diffuse + specular weight for unit light direction `l`.
fn reflect_light(surface: &PhongSurface, n: Vec3, l: Vec3, v: Vec3) -> Vec3 {
    let n_dot_l = n.dot(l);
    if n_dot_l <= 0.0 {
        return Vec3::ZERO;
    }
    let r = 2.0 * n_dot_l * n - l;
    let specular = r.dot(v).max(0.0).powf(surface.ns);
    surface.kd * n_dot_l + surface.ks * specular
}
