use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("error parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Reads a TOML file. A missing file yields the defaults.
pub fn load_toml<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found, using default configuration", path.display());
            return Ok(T::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub shaders: ShaderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub fullscreen: bool,
    pub vsync: bool,
    pub icon: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "The X-CUBE 2D Game Engine".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            fullscreen: false,
            vsync: true,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub target_fps: u32,
}

impl FrameConfig {
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.target_fps.max(1)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig { target_fps: 60 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub spotlight_vertex: String,
    pub spotlight_fragment: String,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        ShaderConfig {
            spotlight_vertex: "backend/shaders/spotlight.vert".to_string(),
            spotlight_fragment: "backend/shaders/spotlight.frag".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub radius: f32,
    pub intensity: f32,
    pub color: [f32; 4],
    pub dithering: f32,
    pub ambient: [f32; 4],
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        SpotlightConfig {
            radius: 800.0,
            intensity: 2.0,
            color: [0.9, 0.9, 1.0, 1.0],
            dithering: 1.0,
            ambient: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: EngineConfig = toml::from_str(
            r#"
            [window]
            title = "demo"
            width = 1024
            "#,
        )
        .unwrap();
        assert_eq!(cfg.window.title, "demo");
        assert_eq!(cfg.window.width, 1024);
        assert_eq!(cfg.window.height, 600);
        assert_eq!(cfg.frame.target_fps, 60);
        assert_eq!(cfg.shaders.spotlight_fragment, "backend/shaders/spotlight.frag");
    }

    #[test]
    fn frame_delay_from_fps() {
        assert_eq!(FrameConfig { target_fps: 60 }.frame_delay_ms(), 16);
        assert_eq!(FrameConfig { target_fps: 0 }.frame_delay_ms(), 1000);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg: SpotlightConfig = load_toml("this/file/does/not/exist.toml").unwrap();
        assert_eq!(cfg.radius, 800.0);
        assert_eq!(cfg.ambient, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let name = format!("xcube-bad-config-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "[window\nwidth = ").unwrap();
        let res: Result<EngineConfig, _> = load_toml(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(res, Err(ConfigError::Parse { .. })));
    }
}
