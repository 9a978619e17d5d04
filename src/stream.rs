use anyhow::Result;
use bytes::Bytes;
use opencv::{
    core::{Mat, Vector},
    imgcodecs, imgproc,
    prelude::*,
};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::analysis::{classify, sample_pose, AngleWindow, JointCoordinates};
use crate::camera::Camera;
use crate::config::Config;
use crate::feedback::Feedback;
use crate::overlay;
use crate::pose::{preprocess_frame, PoseDetector};

/// Camera/detect/encode loop.
///
/// Owns the camera and the detector; both are released when `run` returns.
/// Every frame is encoded and published, detection runs only on frame-skip
/// boundaries. Angles are smoothed over trailing windows and the joint
/// coordinates of the last successful sample are cached so skipped and
/// low-confidence frames redraw the previous overlay.
pub struct StreamDriver {
    camera: Camera,
    detector: PoseDetector,
    frame_skip: u64,
    min_visibility: f32,
    jpeg_quality: i32,
    frame_count: u64,
    back_window: AngleWindow,
    leg_window: AngleWindow,
    last_coords: Option<JointCoordinates>,
    feedback_tx: watch::Sender<Feedback>,
    frame_tx: watch::Sender<Option<Bytes>>,
}

impl StreamDriver {
    pub fn new(
        config: &Config,
        feedback_tx: watch::Sender<Feedback>,
        frame_tx: watch::Sender<Option<Bytes>>,
    ) -> Result<Self> {
        anyhow::ensure!(config.analysis.frame_skip > 0, "frame_skip must be > 0");
        anyhow::ensure!(
            config.analysis.smoothing_window > 0,
            "smoothing_window must be > 0"
        );

        let camera = Camera::open(&config.camera)?;
        let detector = PoseDetector::new(&config.analysis.model_path)?;

        Ok(Self {
            camera,
            detector,
            frame_skip: config.analysis.frame_skip,
            min_visibility: config.analysis.min_visibility,
            jpeg_quality: config.server.jpeg_quality,
            frame_count: 0,
            back_window: AngleWindow::new(config.analysis.smoothing_window),
            leg_window: AngleWindow::new(config.analysis.smoothing_window),
            last_coords: None,
            feedback_tx,
            frame_tx,
        })
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.camera.resolution()
    }

    /// Runs until frame capture fails. Dropping the senders on return ends
    /// every subscribed video stream.
    pub fn run(mut self) {
        info!("stream driver started");
        loop {
            let frame = match self.camera.read_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!("camera read failed, stopping stream: {e:#}");
                    break;
                }
            };

            if let Err(e) = self.process_frame(frame) {
                debug!("frame dropped: {e:#}");
            }
        }
        info!("stream driver stopped, camera released");
    }

    fn process_frame(&mut self, mut frame: Mat) -> Result<()> {
        self.frame_count += 1;

        if self.frame_count % self.frame_skip == 0 {
            // soft failure: keep the prior feedback and coordinates
            if let Err(e) = self.detect_and_analyze(&mut frame) {
                debug!("pose analysis skipped: {e:#}");
            }
        }

        if let Some(coords) = self.last_coords {
            let feedback = self.feedback_tx.borrow().clone();
            overlay::draw_feedback(&mut frame, &coords, &feedback)?;
        }

        let jpeg = encode_jpeg(&frame, self.jpeg_quality)?;
        self.frame_tx.send_replace(Some(jpeg));
        Ok(())
    }

    fn detect_and_analyze(&mut self, frame: &mut Mat) -> Result<()> {
        let input = preprocess_frame(frame)?;
        let pose = self.detector.detect(input)?;

        overlay::draw_skeleton(frame, &pose, self.min_visibility)?;

        let width = frame.cols() as u32;
        let height = frame.rows() as u32;
        if let Some(sample) = sample_pose(&pose, width, height, self.min_visibility) {
            self.back_window.push(sample.back_angle);
            self.leg_window.push(sample.leg_angle);

            let back = self.back_window.mean();
            let leg = self.leg_window.mean();
            let assessment = classify(back, leg);

            self.feedback_tx
                .send_replace(Feedback::from_assessment(back, leg, assessment));
            self.last_coords = Some(sample.coords);
        }

        Ok(())
    }
}

/// Encodes a BGR frame as JPEG. BGRA input is converted first, imencode
/// expects 3 channels.
pub fn encode_jpeg(frame: &Mat, quality: i32) -> Result<Bytes> {
    let params = Vector::from_iter([imgcodecs::IMWRITE_JPEG_QUALITY, quality]);
    let mut buf: Vector<u8> = Vector::new();

    let mat = if frame.channels() == 4 {
        let mut bgr = Mat::default();
        imgproc::cvt_color_def(frame, &mut bgr, imgproc::COLOR_BGRA2BGR)?;
        bgr
    } else {
        frame.clone()
    };

    imgcodecs::imencode(".jpg", &mat, &mut buf, &params)?;
    Ok(Bytes::from(buf.to_vec()))
}
