pub mod app;
pub mod gameplay;
pub mod util;
pub mod window;

use anyhow::{Context, Result};
use app::AppController;
use gameplay::CameraDesc;
use winit::event_loop::EventLoop;

/// Environment variable pointing at an optional TOML camera config.
const CONFIG_ENV_VAR: &str = "FLY_CAMERA_CONFIG";

fn load_camera_desc() -> Result<CameraDesc> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => CameraDesc::load(&path)
            .with_context(|| format!("{} = {}", CONFIG_ENV_VAR, path.to_string_lossy())),
        None => Ok(CameraDesc::default()),
    }
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let camera_desc = load_camera_desc()?;
    log::debug!("Camera config: {:?}", camera_desc);

    let mut app = AppController::new(camera_desc);
    let event_loop = EventLoop::builder()
        .build()
        .context("Failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("Event loop exited with error")?;

    log::info!("Application exited successfully");
    Ok(())
}
