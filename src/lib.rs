pub mod analysis;
pub mod camera;
pub mod config;
pub mod feedback;
pub mod overlay;
pub mod pose;
pub mod server;
pub mod stream;
