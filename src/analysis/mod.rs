pub mod angle;
pub mod classify;
pub mod sampler;
pub mod smooth;

pub use angle::joint_angle;
pub use classify::{classify, Assessment};
pub use sampler::{sample_pose, JointCoordinates, PoseSample};
pub use smooth::AngleWindow;
