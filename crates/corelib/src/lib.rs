//! Core types: math re-exports, Transform, Camera, lights and the scene context.

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod light;
pub mod lighting;
pub mod scene;
pub mod transform;
