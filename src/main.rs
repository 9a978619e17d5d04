use anyhow::Result;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pose_coach::config::Config;
use pose_coach::feedback::feedback_channel;
use pose_coach::server::{self, AppState};
use pose_coach::stream::StreamDriver;

const CONFIG_PATH: &str = "pose_coach.toml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("pose-coach {}", env!("GIT_VERSION"));

    let config = Config::load_or_default(CONFIG_PATH);
    info!(
        "camera {} ({}x{} requested), model {}, frame_skip {}",
        config.camera.index,
        config.camera.width,
        config.camera.height,
        config.analysis.model_path,
        config.analysis.frame_skip,
    );

    let (feedback_tx, feedback_rx) = feedback_channel();
    let (frame_tx, frame_rx) = watch::channel(None);

    // Open the camera and load the model up front so startup failures are
    // reported before the server binds.
    let driver = StreamDriver::new(&config, feedback_tx, frame_tx)?;
    let (width, height) = driver.resolution();
    info!("camera opened at {}x{}", width, height);

    // opencv and ort are blocking, the driver gets its own OS thread
    std::thread::spawn(move || driver.run());

    let state = AppState {
        feedback: feedback_rx,
        frames: frame_rx,
    };
    server::serve(&config.server.listen_addr, state).await
}
