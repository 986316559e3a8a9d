mod config;
mod game;

use anyhow::Context;
use config::GameConfig;
use game::SpotlightGame;

const DEFAULT_CONFIG: &str = "game/config.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg: GameConfig = backend::config::load_toml(&config_path)
        .with_context(|| format!("loading {config_path}"))?;

    let mut game = SpotlightGame::new(&cfg).context("Game initialization failure")?;
    game.run();
    Ok(())
}
