use anyhow::Context;
use nebula::{NebulaApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig::default();
    log::info!("Loading assets from {}", config.asset_dir.display());

    let app = NebulaApp::new(config).context("failed to start")?;
    app.run().context("renderer stopped")?;
    Ok(())
}
