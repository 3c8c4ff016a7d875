//! Command-line configuration: `--key=value` flags, unknown values fall back
//! to defaults with a warning.

use std::path::PathBuf;

use asset::LoadOptions;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub models_root: PathBuf,
    pub textures_root: PathBuf,
    pub model: String,
    pub skybox: String,
    pub load_options: LoadOptions,
    /// Add the point light to the default directional light.
    pub point_light: bool,
    /// Frames of model rotation simulated before the report.
    pub frames: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_root: PathBuf::from("./TestModels_HW3"),
            textures_root: PathBuf::from("./TestTextures_HW3"),
            model: "AnyaForger".to_string(),
            skybox: "ntpu_EECSBuilding.png".to_string(),
            load_options: LoadOptions::default(),
            point_light: false,
            frames: 0,
            width: 600,
            height: 600,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--models-root=") {
                cfg.models_root = PathBuf::from(v);
            } else if let Some(v) = arg.strip_prefix("--textures-root=") {
                cfg.textures_root = PathBuf::from(v);
            } else if let Some(v) = arg.strip_prefix("--model=") {
                cfg.model = v.to_string();
            } else if let Some(v) = arg.strip_prefix("--skybox=") {
                cfg.skybox = v.to_string();
            } else if arg == "--normalize" {
                cfg.load_options.normalize = true;
            } else if arg == "--no-normalize" {
                cfg.load_options.normalize = false;
            } else if let Some(v) = arg.strip_prefix("--normalize=") {
                cfg.load_options.normalize = parse_switch(v, "--normalize", true);
            } else if arg == "--textures" {
                cfg.load_options.load_textures = true;
            } else if arg == "--no-textures" {
                cfg.load_options.load_textures = false;
            } else if let Some(v) = arg.strip_prefix("--textures=") {
                cfg.load_options.load_textures = parse_switch(v, "--textures", true);
            } else if arg == "--point-light" {
                cfg.point_light = true;
            } else if let Some(v) = arg.strip_prefix("--point-light=") {
                cfg.point_light = parse_switch(v, "--point-light", false);
            } else if let Some(v) = arg.strip_prefix("--frames=") {
                match v.parse::<u32>() {
                    Ok(n) => cfg.frames = n,
                    Err(_) => log::warn!("Invalid --frames value '{}', using {}", v, cfg.frames),
                }
            } else if let Some(v) = arg.strip_prefix("--size=") {
                if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                    if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                        w = Some(pw);
                        h = Some(ph);
                    }
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(pw) = v.parse::<u32>() {
                    w = Some(pw);
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(ph) = v.parse::<u32>() {
                    h = Some(ph);
                }
            } else {
                log::warn!("Ignoring unknown argument '{}'", arg);
            }
        }

        cfg.width = w.unwrap_or(cfg.width).max(1);
        cfg.height = h.unwrap_or(cfg.height).max(1);
        cfg
    }
}

fn parse_switch(val: &str, flag: &str, default: bool) -> bool {
    match val.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => true,
        "0" | "false" | "off" | "no" => false,
        other => {
            log::warn!("Unknown value '{}' for {}, using {}", other, flag, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_gives_defaults() {
        let cfg = AppConfig::from_args(Vec::<String>::new());
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.load_options.normalize);
        assert_eq!((cfg.width, cfg.height), (600, 600));
    }

    #[test]
    fn paths_and_names() {
        let cfg = AppConfig::from_args([
            "--models-root=/data/models",
            "--textures-root=/data/tex",
            "--model=TexCube",
            "--skybox=veranda_2k.png",
        ]);
        assert_eq!(cfg.models_root, PathBuf::from("/data/models"));
        assert_eq!(cfg.textures_root, PathBuf::from("/data/tex"));
        assert_eq!(cfg.model, "TexCube");
        assert_eq!(cfg.skybox, "veranda_2k.png");
    }

    #[test]
    fn switches() {
        let cfg = AppConfig::from_args(["--no-normalize", "--textures=off"]);
        assert!(!cfg.load_options.normalize);
        assert!(!cfg.load_options.load_textures);

        let cfg = AppConfig::from_args(["--normalize=maybe", "--no-textures", "--textures"]);
        assert!(cfg.load_options.normalize);
        assert!(cfg.load_options.load_textures);
    }

    #[test]
    fn window_size() {
        let cfg = AppConfig::from_args(["--size=1280X720"]);
        assert_eq!((cfg.width, cfg.height), (1280, 720));

        let cfg = AppConfig::from_args(["--width=0", "--height=300", "--size=bogus"]);
        assert_eq!((cfg.width, cfg.height), (1, 300));
    }

    #[test]
    fn lighting_and_animation() {
        let cfg = AppConfig::from_args(["--point-light", "--frames=90"]);
        assert!(cfg.point_light);
        assert_eq!(cfg.frames, 90);

        let cfg = AppConfig::from_args(["--point-light=off", "--frames=-3"]);
        assert!(!cfg.point_light);
        assert_eq!(cfg.frames, 0);
    }
}
