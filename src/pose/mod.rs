pub mod detector;
pub mod landmark;
pub mod preprocess;

pub use detector::PoseDetector;
pub use landmark::{Landmark, LandmarkIndex, PoseLandmarks};
pub use preprocess::preprocess_frame;
