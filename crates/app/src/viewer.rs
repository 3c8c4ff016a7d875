//! Application object: owns the scene context, the loaded model and the skybox.

use anyhow::{Context, Result};
use asset::{Mesh, MeshData, SubMesh, TextureData, sphere};
use corelib::{
    Vec3,
    lighting::{PhongSurface, shade},
    scene::{Scene, SceneCommand},
};

use crate::config::AppConfig;

pub struct Skybox {
    pub name: String,
    pub geometry: MeshData,
    pub texture: TextureData,
}

pub struct Viewer {
    config: AppConfig,
    scene: Scene,
    mesh: Option<Mesh>,
    skybox: Option<Skybox>,
}

impl Viewer {
    pub fn new(config: AppConfig) -> Self {
        let mut scene = Scene::new(config.width, config.height);
        if config.point_light {
            scene = scene.with_point_light();
        }
        Self {
            config,
            scene,
            mesh: None,
            skybox: None,
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    #[inline]
    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn handle(&mut self, command: SceneCommand) {
        self.scene.apply(command);
    }

    pub fn tick(&mut self) {
        self.scene.advance();
    }

    /// Swap in another model. The current one stays if loading fails.
    pub fn load_model(&mut self, name: &str) -> Result<()> {
        let mesh = asset::load_model(&self.config.models_root, name, self.config.load_options)
            .with_context(|| format!("Failed to load model '{}'", name))?;
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Swap in another skybox panorama. The current one stays if loading fails.
    pub fn set_skybox(&mut self, name: &str) -> Result<()> {
        log::info!("Skybox background: {}", name);
        let path = self.config.textures_root.join(name);
        let texture = TextureData::load(&path)
            .with_context(|| format!("Failed to load skybox '{}'", name))?;
        self.skybox = Some(Skybox {
            name: name.to_string(),
            geometry: sphere::skybox_sphere(),
            texture,
        });
        Ok(())
    }

    pub fn log_model_info(&self) {
        let Some(mesh) = &self.mesh else {
            log::info!("No model loaded");
            return;
        };
        for line in mesh.info().to_string().lines() {
            log::info!("{}", line);
        }
        for (name, color) in self.material_previews() {
            log::info!(
                "Material '{}' preview: ({:.3}, {:.3}, {:.3})",
                name,
                color.x,
                color.y,
                color.z
            );
        }
    }

    /// Lit color of the first vertex of every submesh under the current scene.
    pub fn material_previews(&self) -> Vec<(String, Vec3)> {
        let Some(mesh) = &self.mesh else {
            return Vec::new();
        };
        mesh.sub_meshes()
            .iter()
            .filter_map(|sub| {
                let color = preview_color(&self.scene, mesh, sub)?;
                Some((mesh.material_of(sub).name.clone(), color))
            })
            .collect()
    }
}

fn preview_color(scene: &Scene, mesh: &Mesh, sub: &SubMesh) -> Option<Vec3> {
    let first = *sub.indices.first()?;
    let vertex = mesh.vertices()[first as usize];
    let material = mesh.material_of(sub);

    let model = scene.model_transform();
    let position = model.matrix().transform_point3(vertex.position());
    let normal = model.normal_matrix() * Vec3::from_array(vertex.normal);

    let mut kd = Vec3::from_array(material.kd);
    if let Some(texture) = &material.map_kd {
        let [r, g, b, _] = texture.sample_nearest(vertex.uv[0], vertex.uv[1]);
        kd *= Vec3::new(r as f32, g as f32, b as f32) / 255.0;
    }

    let surface = PhongSurface {
        ka: Vec3::from_array(material.ka),
        kd,
        ks: Vec3::from_array(material.ks),
        ns: material.ns,
    };
    Some(shade(&surface, &scene.lights, position, normal, scene.camera.eye))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("phongview-app-{}-{}", std::process::id(), tag));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).expect("create temp root");
        root
    }

    fn viewer_for(root: PathBuf) -> Viewer {
        Viewer::new(AppConfig {
            models_root: root.clone(),
            textures_root: root,
            ..AppConfig::default()
        })
    }

    #[test]
    fn failed_load_keeps_previous_model() {
        let root = temp_root("keep");
        let dir = root.join("Tri");
        fs::create_dir_all(&dir).expect("model dir");
        fs::write(
            dir.join("Tri.obj"),
            "mtllib Tri.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nusemtl Red\nf 1//1 2//1 3//1\n",
        )
        .expect("write obj");
        fs::write(dir.join("Tri.mtl"), "newmtl Red\nKa 1 0 0\nKd 1 0 0\n").expect("write mtl");

        let mut viewer = viewer_for(root);
        viewer.load_model("Tri").expect("load Tri");
        assert!(viewer.load_model("Missing").is_err());
        assert_eq!(viewer.mesh().map(Mesh::num_triangles), Some(1));

        let previews = viewer.material_previews();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].0, "Red");
        let c = previews[0].1;
        assert!(c.x > 0.2, "red channel lit: {:?}", c);
        assert_eq!(c.y, 0.0);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn missing_skybox_is_an_error() {
        let mut viewer = viewer_for(temp_root("sky"));
        assert!(viewer.set_skybox("nope.png").is_err());
        assert!(viewer.skybox().is_none());
    }

    #[test]
    fn commands_reach_the_scene() {
        let mut viewer = viewer_for(temp_root("cmd"));
        viewer.handle(SceneCommand::ToggleModelRotation);
        viewer.tick();
        assert!(viewer.scene().model_spin.angle_deg > 0.0);
    }

    #[test]
    fn point_light_flag_reaches_the_scene() {
        let viewer = Viewer::new(AppConfig {
            point_light: true,
            ..AppConfig::default()
        });
        assert!(viewer.scene().lights.point.is_some());
        assert!(viewer_for(temp_root("no-point")).scene().lights.point.is_none());
    }
}
