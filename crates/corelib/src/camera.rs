use crate::{Mat4, Vec3, vec3};

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    pub const DEFAULT_EYE: Vec3 = vec3(0.0, 1.0, 5.0);
    pub const DEFAULT_FOV_Y_DEG: f32 = 30.0;
    pub const DEFAULT_Z_NEAR: f32 = 0.1;
    pub const DEFAULT_Z_FAR: f32 = 1000.0;

    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_deg: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_deg,
            z_near,
            z_far,
            aspect,
        }
    }

    /// Camera at (0, 1, 5) looking at the origin, 30° vertical field of view.
    pub fn with_defaults(aspect: f32) -> Self {
        Self::new_perspective(
            Self::DEFAULT_EYE,
            Vec3::ZERO,
            Vec3::Y,
            Self::DEFAULT_FOV_Y_DEG,
            Self::DEFAULT_Z_NEAR,
            Self::DEFAULT_Z_FAR,
            aspect,
        )
    }

    pub fn update_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
    }

    pub fn update_projection(&mut self, fov_y_deg: f32, aspect: f32, z_near: f32, z_far: f32) {
        self.fov_y_deg = fov_y_deg;
        self.aspect = aspect;
        self.z_near = z_near;
        self.z_far = z_far;
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (clip z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_deg.to_radians(),
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
