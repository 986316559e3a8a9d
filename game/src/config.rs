use backend::config::{EngineConfig, SpotlightConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub spotlight: SpotlightConfig,
    pub assets: AssetsConfig,
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub background: String,
    pub background_normal: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            background: "game/res/tex/background.ppm".to_string(),
            background_normal: "game/res/tex/background_norm.ppm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub count: usize,
    // keys spawn in [0, area_w) x [0, area_h)
    pub area_w: f32,
    pub area_h: f32,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            count: 5,
            area_w: 750.0,
            area_h: 550.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
        let cfg: GameConfig = backend::config::load_toml(path).unwrap();
        assert_eq!(cfg.keys.count, 5);
        assert_eq!(cfg.engine.frame.target_fps, 60);
        assert_eq!(cfg.spotlight.radius, 800.0);
        assert!(cfg.assets.background.ends_with("background.ppm"));
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: GameConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.keys.count, 5);
        assert_eq!(cfg.engine.window.title, "The X-CUBE 2D Game Engine");
    }
}
