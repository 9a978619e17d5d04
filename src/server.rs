use std::convert::Infallible;

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::feedback::Feedback;

pub const MULTIPART_BOUNDARY: &str = "frame";

/// Read-only view of the driver's channels, shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub feedback: watch::Receiver<Feedback>,
    pub frames: watch::Receiver<Option<Bytes>>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/video_feed", get(video_feed))
        .route("/feedback", get(feedback))
        .route("/version", get(version))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> &'static str {
    "Pose Coach backend running"
}

async fn version() -> &'static str {
    env!("GIT_VERSION")
}

/// Snapshot of the latest feedback record.
async fn feedback(State(state): State<AppState>) -> Json<Feedback> {
    Json(state.feedback.borrow().clone())
}

/// MJPEG stream: one multipart chunk per published frame. Ends when the
/// driver drops the frame sender (camera disconnect).
async fn video_feed(State(state): State<AppState>) -> Response {
    let stream = WatchStream::new(state.frames.clone()).filter_map(|frame| async move {
        frame.map(|jpeg| Ok::<_, Infallible>(multipart_chunk(&jpeg)))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/x-mixed-replace; boundary={}", MULTIPART_BOUNDARY),
        )
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .unwrap()
}

/// One multipart part: boundary marker, JPEG content type, blank line,
/// payload, trailing CRLF.
pub fn multipart_chunk(jpeg: &[u8]) -> Bytes {
    let mut part = Vec::with_capacity(jpeg.len() + 64);
    part.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    Bytes::from(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_chunk_framing() {
        let chunk = multipart_chunk(b"JPEGDATA");
        assert_eq!(
            chunk.as_ref(),
            b"--frame\r\nContent-Type: image/jpeg\r\n\r\nJPEGDATA\r\n"
        );
    }

    #[test]
    fn test_multipart_chunk_empty_payload() {
        let chunk = multipart_chunk(b"");
        assert_eq!(chunk.as_ref(), b"--frame\r\nContent-Type: image/jpeg\r\n\r\n\r\n");
    }
}
