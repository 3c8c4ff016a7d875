//! Light sources for Phong shading.

use crate::{Vec3, vec3};

/// Screen-space direction for nudging a positional light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDir {
    #[inline]
    fn offset(self, step: f32) -> Vec3 {
        match self {
            MoveDir::Left => vec3(-step, 0.0, 0.0),
            MoveDir::Right => vec3(step, 0.0, 0.0),
            MoveDir::Up => vec3(0.0, step, 0.0),
            MoveDir::Down => vec3(0.0, -step, 0.0),
        }
    }
}

/// Light infinitely far away; `direction` points from the light into the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub radiance: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, radiance: Vec3) -> Self {
        Self {
            direction,
            radiance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Vec3) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn translate(&mut self, dir: MoveDir, step: f32) {
        self.position += dir.offset(step);
    }

    /// Color used to draw the light gizmo.
    pub fn vis_color(&self) -> Vec3 {
        self.intensity.normalize_or_zero()
    }
}

/// Point light restricted to a cone. Angles are in degrees: full intensity
/// inside `cutoff_start_deg`, fading to zero at `total_width_deg`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub intensity: Vec3,
    pub direction: Vec3,
    pub cutoff_start_deg: f32,
    pub total_width_deg: f32,
}

impl SpotLight {
    pub fn new(
        position: Vec3,
        intensity: Vec3,
        direction: Vec3,
        cutoff_start_deg: f32,
        total_width_deg: f32,
    ) -> Self {
        Self {
            position,
            intensity,
            direction,
            cutoff_start_deg,
            total_width_deg,
        }
    }

    pub fn translate(&mut self, dir: MoveDir, step: f32) {
        self.position += dir.offset(step);
    }

    pub fn vis_color(&self) -> Vec3 {
        self.intensity.normalize_or_zero()
    }

    /// Cone attenuation for a light-to-point direction `to_point` (normalized).
    pub fn falloff(&self, to_point: Vec3) -> f32 {
        let cos_angle = to_point.dot(self.direction.normalize_or_zero());
        let cos_start = self.cutoff_start_deg.to_radians().cos();
        let cos_width = self.total_width_deg.to_radians().cos();
        if cos_angle >= cos_start {
            1.0
        } else if cos_angle <= cos_width || cos_start <= cos_width {
            0.0
        } else {
            (cos_angle - cos_width) / (cos_start - cos_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_moves_in_steps() {
        let mut light = PointLight::new(vec3(0.8, 0.0, 0.8), Vec3::splat(0.1));
        light.translate(MoveDir::Left, 0.2);
        light.translate(MoveDir::Up, 0.2);
        light.translate(MoveDir::Up, 0.2);
        assert!((light.position - vec3(0.6, 0.4, 0.8)).length() < 1e-6);
    }

    #[test]
    fn vis_color_is_normalized_intensity() {
        let light = SpotLight::new(Vec3::ZERO, Vec3::splat(0.3), Vec3::NEG_Y, 30.0, 45.0);
        let c = light.vis_color();
        assert!((c.length() - 1.0).abs() < 1e-6);
        assert!((c.x - c.y).abs() < 1e-6);
    }

    #[test]
    fn spot_falloff_bands() {
        let light = SpotLight::new(Vec3::ZERO, Vec3::ONE, Vec3::NEG_Y, 30.0, 45.0);
        assert_eq!(light.falloff(Vec3::NEG_Y), 1.0);

        let at = |deg: f32| {
            let r = deg.to_radians();
            vec3(r.sin(), -r.cos(), 0.0)
        };
        assert_eq!(light.falloff(at(20.0)), 1.0);
        let mid = light.falloff(at(37.5));
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(light.falloff(at(60.0)), 0.0);
        assert_eq!(light.falloff(Vec3::Y), 0.0);
    }
}
