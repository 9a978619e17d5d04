use crate::pose::{LandmarkIndex, PoseLandmarks};

use super::angle::joint_angle;

/// Pixel coordinates of the four left-side joints used for analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointCoordinates {
    pub shoulder: (i32, i32),
    pub hip: (i32, i32),
    pub knee: (i32, i32),
    pub ankle: (i32, i32),
}

/// One analyzed frame: the two raw joint angles plus the coordinates
/// needed to redraw the overlay on later frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// shoulder-hip-knee angle, degrees
    pub back_angle: f64,
    /// hip-knee-ankle angle, degrees
    pub leg_angle: f64,
    pub coords: JointCoordinates,
}

/// Extracts the left shoulder/hip/knee/ankle from a detection result and
/// computes the back and leg angles in pixel space.
///
/// Returns None when any of the four landmarks falls below
/// `min_visibility` (inclusive gate). The caller keeps its prior feedback
/// in that case.
pub fn sample_pose(
    pose: &PoseLandmarks,
    width: u32,
    height: u32,
    min_visibility: f32,
) -> Option<PoseSample> {
    let shoulder = pose.get(LandmarkIndex::LeftShoulder);
    let hip = pose.get(LandmarkIndex::LeftHip);
    let knee = pose.get(LandmarkIndex::LeftKnee);
    let ankle = pose.get(LandmarkIndex::LeftAnkle);

    let all_visible = [shoulder, hip, knee, ankle]
        .iter()
        .all(|lm| lm.visible(min_visibility));
    if !all_visible {
        return None;
    }

    let coords = JointCoordinates {
        shoulder: shoulder.to_pixel(width, height),
        hip: hip.to_pixel(width, height),
        knee: knee.to_pixel(width, height),
        ankle: ankle.to_pixel(width, height),
    };

    Some(PoseSample {
        back_angle: joint_angle(coords.shoulder, coords.hip, coords.knee),
        leg_angle: joint_angle(coords.hip, coords.knee, coords.ankle),
        coords,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkIndex, PoseLandmarks};

    /// Upright pose: vertical back, straight leg, all joints on one line.
    fn upright_pose(confidence: f32) -> PoseLandmarks {
        let mut pose = PoseLandmarks::default();
        pose.landmarks[LandmarkIndex::LeftShoulder as usize] =
            Landmark::new(0.5, 0.2, confidence);
        pose.landmarks[LandmarkIndex::LeftHip as usize] = Landmark::new(0.5, 0.4, confidence);
        pose.landmarks[LandmarkIndex::LeftKnee as usize] = Landmark::new(0.5, 0.6, confidence);
        pose.landmarks[LandmarkIndex::LeftAnkle as usize] = Landmark::new(0.5, 0.8, confidence);
        pose
    }

    #[test]
    fn test_sample_at_gate_threshold() {
        let pose = upright_pose(0.5);
        assert!(sample_pose(&pose, 640, 480, 0.5).is_some());
    }

    #[test]
    fn test_no_sample_below_gate() {
        let mut pose = upright_pose(0.9);
        pose.landmarks[LandmarkIndex::LeftKnee as usize].confidence = 0.49;
        assert!(sample_pose(&pose, 640, 480, 0.5).is_none());
    }

    #[test]
    fn test_pixel_coordinates() {
        let pose = upright_pose(0.9);
        let sample = sample_pose(&pose, 640, 480, 0.5).unwrap();
        assert_eq!(sample.coords.shoulder, (320, 96));
        assert_eq!(sample.coords.hip, (320, 192));
        assert_eq!(sample.coords.knee, (320, 288));
        assert_eq!(sample.coords.ankle, (320, 384));
    }

    #[test]
    fn test_straight_body_angles() {
        let pose = upright_pose(0.9);
        let sample = sample_pose(&pose, 640, 480, 0.5).unwrap();
        assert!((sample.back_angle - 180.0).abs() < 1e-9);
        assert!((sample.leg_angle - 180.0).abs() < 1e-9);
    }
}
