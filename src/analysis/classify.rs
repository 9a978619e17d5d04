use std::ops::RangeInclusive;

/// Back angle range considered correct, degrees.
pub const BACK_RANGE: RangeInclusive<f64> = 80.0..=100.0;
/// Leg angle range considered correct, degrees.
pub const LEG_RANGE: RangeInclusive<f64> = 150.0..=180.0;

pub const MSG_CORRECT: &str = "Excellent. Hold the pose.";
pub const MSG_ADJUST: &str = "Adjust posture";

/// Result of one posture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub accuracy: i32,
    pub message: &'static str,
}

/// Classifies smoothed back and leg angles. Pure function, no state.
pub fn classify(back_angle: f64, leg_angle: f64) -> Assessment {
    let correct = BACK_RANGE.contains(&back_angle) && LEG_RANGE.contains(&leg_angle);
    if correct {
        Assessment {
            accuracy: 100,
            message: MSG_CORRECT,
        }
    } else {
        Assessment {
            accuracy: 70,
            message: MSG_ADJUST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_pose() {
        let a = classify(90.0, 170.0);
        assert_eq!(a.accuracy, 100);
        assert_eq!(a.message, "Excellent. Hold the pose.");
    }

    #[test]
    fn test_bent_back() {
        let a = classify(60.0, 170.0);
        assert_eq!(a.accuracy, 70);
        assert_eq!(a.message, "Adjust posture");
    }

    #[test]
    fn test_bent_leg() {
        let a = classify(90.0, 120.0);
        assert_eq!(a.accuracy, 70);
    }

    #[test]
    fn test_boundaries_inclusive() {
        assert_eq!(classify(80.0, 150.0).accuracy, 100);
        assert_eq!(classify(100.0, 180.0).accuracy, 100);
        assert_eq!(classify(79.9, 170.0).accuracy, 70);
        assert_eq!(classify(100.1, 170.0).accuracy, 70);
        assert_eq!(classify(90.0, 149.9).accuracy, 70);
    }
}
