//! Entry point for Phongview.
//! Loads the configured model and skybox into a scene and reports what was loaded.

mod config;
mod viewer;

use anyhow::Result;
use corelib::scene::SceneCommand;

use crate::{config::AppConfig, viewer::Viewer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    log::info!(
        "Starting Phongview. Model: {}, skybox: {}, normalize={}, textures={}, point_light={}, frames={}, window_size={}x{}",
        config.model,
        config.skybox,
        config.load_options.normalize,
        config.load_options.load_textures,
        config.point_light,
        config.frames,
        config.width,
        config.height
    );

    let model = config.model.clone();
    let skybox = config.skybox.clone();
    let frames = config.frames;
    let mut viewer = Viewer::new(config);

    if let Err(e) = viewer.set_skybox(&skybox) {
        log::warn!("{:#}", e);
    }
    viewer.load_model(&model)?;

    if frames > 0 {
        viewer.handle(SceneCommand::ToggleModelRotation);
        for _ in 0..frames {
            viewer.tick();
        }
        log::info!(
            "Simulated {} frames, model angle {:.3}°",
            frames,
            viewer.scene().model_spin.angle_deg
        );
    }
    viewer.log_model_info();

    if let Some(mesh) = viewer.mesh() {
        let index_bytes: usize = mesh.sub_meshes().iter().map(|s| s.index_bytes().len()).sum();
        log::info!(
            "Buffers ready: {} vertex bytes, {} index bytes",
            mesh.vertex_bytes().len(),
            index_bytes
        );
    }

    let scene = viewer.scene();
    log::info!(
        "Camera at {:?} looking at {:?}, fovy={}°, aspect={:.3}",
        scene.camera.eye,
        scene.camera.target,
        scene.camera.fov_y_deg,
        scene.camera.aspect
    );
    if let Some(sky) = viewer.skybox() {
        log::info!(
            "Skybox '{}': {} triangles, {}x{} texture",
            sky.name,
            sky.geometry.triangle_count(),
            sky.texture.width,
            sky.texture.height
        );
    }

    log::info!("Done. Bye!");
    Ok(())
}
