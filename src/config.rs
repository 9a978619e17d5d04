use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラデバイス番号
    #[serde(default = "default_camera_index")]
    pub index: i32,
    /// キャプチャ幅（ピクセル）
    #[serde(default = "default_width")]
    pub width: u32,
    /// キャプチャ高さ（ピクセル）
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// ONNXモデルのパス
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// 姿勢検出を実行するフレーム間隔
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u64,
    /// 角度平滑化ウィンドウのサンプル数
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    /// ランドマーク可視性の最小信頼度
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// HTTP待ち受けアドレス
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// JPEG品質 (0-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: i32,
}

fn default_camera_index() -> i32 { 0 }
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_model_path() -> String { "models/movenet_lightning.onnx".to_string() }
fn default_frame_skip() -> u64 { 3 }
fn default_smoothing_window() -> usize { 10 }
fn default_min_visibility() -> f32 { 0.5 }
fn default_listen_addr() -> String { "0.0.0.0:5000".to_string() }
fn default_jpeg_quality() -> i32 { 80 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: default_camera_index(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            frame_skip: default_frame_skip(),
            smoothing_window: default_smoothing_window(),
            min_visibility: default_min_visibility(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルが無ければデフォルト値を使う
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.camera.height, 480);
        assert_eq!(config.analysis.frame_skip, 3);
        assert_eq!(config.analysis.smoothing_window, 10);
        assert_eq!(config.analysis.min_visibility, 0.5);
        assert_eq!(config.server.jpeg_quality, 80);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            index = 2

            [server]
            listen_addr = "127.0.0.1:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.index, 2);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.server.jpeg_quality, 80);
    }
}
