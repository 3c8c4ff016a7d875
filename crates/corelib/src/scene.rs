//! Scene context: camera, lights, model/skybox orientation and render toggles.
//! Owned by the application; input is fed in as [`SceneCommand`]s.

use crate::{
    Vec3,
    camera::Camera,
    light::{DirectionalLight, MoveDir, PointLight, SpotLight},
    lighting::LightSet,
    transform::Transform,
    vec3,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolygonMode {
    Point,
    Line,
    #[default]
    Fill,
}

/// Continuous rotation about +Y, advanced once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub angle_deg: f32,
    pub rotating: bool,
    pub clockwise: bool,
}

impl Spin {
    pub const fn paused(angle_deg: f32) -> Self {
        Self {
            angle_deg,
            rotating: false,
            clockwise: true,
        }
    }

    fn advance(&mut self, step_deg: f32) {
        if !self.rotating {
            return;
        }
        if self.clockwise {
            self.angle_deg += step_deg;
        } else {
            self.angle_deg -= step_deg;
        }
    }
}

/// Discrete scene edits (what the key bindings map to).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    SetPolygonMode(PolygonMode),
    MovePointLight(MoveDir),
    MoveSpotLight(MoveDir),
    ToggleModelRotation,
    ToggleSkyboxRotation,
    /// Ignored while the model is paused.
    ReverseModelRotation,
    /// Ignored while the skybox is paused.
    ReverseSkyboxRotation,
    Resize { width: u32, height: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub lights: LightSet,
    pub model_scale: f32,
    pub model_spin: Spin,
    pub skybox_tilt_deg: f32,
    pub skybox_spin: Spin,
    pub polygon_mode: PolygonMode,
    pub viewport: (u32, u32),
    pub clear_color: [f32; 4],
}

impl Scene {
    pub const ROTATION_STEP_DEG: f32 = 0.005;
    pub const LIGHT_MOVE_STEP: f32 = 0.2;

    /// Default setup: a directional key light, a spot light above the
    /// model, dim ambient, camera at (0, 1, 5).
    pub fn new(width: u32, height: u32) -> Self {
        let viewport = (width.max(1), height.max(1));
        let lights = LightSet {
            ambient: Vec3::splat(0.2),
            directional: Some(DirectionalLight::new(Vec3::NEG_Z, Vec3::splat(0.6))),
            point: None,
            spot: Some(SpotLight::new(
                vec3(0.0, 1.0, 1.0),
                Vec3::splat(0.3),
                vec3(0.0, -1.0, -1.0),
                30.0,
                45.0,
            )),
        };
        Self {
            camera: Camera::with_defaults(viewport.0 as f32 / viewport.1 as f32),
            lights,
            model_scale: 1.5,
            model_spin: Spin::paused(0.0),
            skybox_tilt_deg: -3.0,
            skybox_spin: Spin::paused(249.0),
            polygon_mode: PolygonMode::Fill,
            viewport,
            clear_color: [0.44, 0.57, 0.75, 1.0],
        }
    }

    /// Default point light at (0.8, 0, 0.8); off unless added.
    pub fn with_point_light(mut self) -> Self {
        self.lights.point = Some(PointLight::new(vec3(0.8, 0.0, 0.8), Vec3::splat(0.1)));
        self
    }

    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetPolygonMode(mode) => {
                log::debug!("Polygon mode: {:?}", mode);
                self.polygon_mode = mode;
            }
            SceneCommand::MovePointLight(dir) => {
                if let Some(light) = self.lights.point.as_mut() {
                    light.translate(dir, Self::LIGHT_MOVE_STEP);
                }
            }
            SceneCommand::MoveSpotLight(dir) => {
                if let Some(light) = self.lights.spot.as_mut() {
                    light.translate(dir, Self::LIGHT_MOVE_STEP);
                }
            }
            SceneCommand::ToggleModelRotation => {
                self.model_spin.rotating = !self.model_spin.rotating;
                log::info!("Model rotation: {}", running(self.model_spin.rotating));
            }
            SceneCommand::ToggleSkyboxRotation => {
                self.skybox_spin.rotating = !self.skybox_spin.rotating;
                log::info!("Skybox rotation: {}", running(self.skybox_spin.rotating));
            }
            SceneCommand::ReverseModelRotation => {
                if self.model_spin.rotating {
                    self.model_spin.clockwise = !self.model_spin.clockwise;
                    log::info!("Model rotation dir.: {}", direction(self.model_spin.clockwise));
                }
            }
            SceneCommand::ReverseSkyboxRotation => {
                if self.skybox_spin.rotating {
                    self.skybox_spin.clockwise = !self.skybox_spin.clockwise;
                    log::info!("Skybox rotation dir.: {}", direction(self.skybox_spin.clockwise));
                }
            }
            SceneCommand::Resize { width, height } => self.resize(width, height),
        }
    }

    /// One frame of animation.
    pub fn advance(&mut self) {
        self.model_spin.advance(Self::ROTATION_STEP_DEG);
        self.skybox_spin.advance(Self::ROTATION_STEP_DEG);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        let aspect = self.aspect();
        let cam = self.camera;
        self.camera
            .update_projection(cam.fov_y_deg, aspect, cam.z_near, cam.z_far);
        log::debug!("Viewport resized to {}x{}", self.viewport.0, self.viewport.1);
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    /// World transform of the loaded model.
    pub fn model_transform(&self) -> Transform {
        Transform::from_trs(
            Vec3::ZERO,
            vec3(0.0, self.model_spin.angle_deg.to_radians(), 0.0),
            Vec3::splat(self.model_scale),
        )
    }

    pub fn skybox_transform(&self) -> Transform {
        Transform::from_trs(
            Vec3::ZERO,
            vec3(
                self.skybox_tilt_deg.to_radians(),
                self.skybox_spin.angle_deg.to_radians(),
                0.0,
            ),
            Vec3::ONE,
        )
    }
}

fn running(on: bool) -> &'static str {
    if on { "rotate" } else { "pause" }
}

fn direction(clockwise: bool) -> &'static str {
    if clockwise { "clockwise" } else { "counterclockwise" }
}
