use serde::Serialize;
use tokio::sync::watch;

use crate::analysis::Assessment;

pub const MSG_WAITING: &str = "Waiting for pose";

/// Latest posture feedback, served as JSON by the feedback route.
///
/// Written by the stream driver only; HTTP handlers read snapshots from a
/// watch receiver, so a read never observes a half-written record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub back_angle: i32,
    pub leg_angle: i32,
    pub accuracy: i32,
    pub message: String,
}

impl Feedback {
    /// Placeholder served before the first analyzed frame.
    pub fn waiting() -> Self {
        Self {
            back_angle: 0,
            leg_angle: 0,
            accuracy: 0,
            message: MSG_WAITING.to_string(),
        }
    }

    /// Feedback for one analyzed frame: smoothed angles plus the
    /// classification result.
    pub fn from_assessment(back_angle: f64, leg_angle: f64, assessment: Assessment) -> Self {
        Self {
            back_angle: back_angle as i32,
            leg_angle: leg_angle as i32,
            accuracy: assessment.accuracy,
            message: assessment.message.to_string(),
        }
    }
}

/// Single-writer feedback cell. The driver keeps the sender, the HTTP
/// layer clones the receiver.
pub fn feedback_channel() -> (watch::Sender<Feedback>, watch::Receiver<Feedback>) {
    watch::channel(Feedback::waiting())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;

    #[test]
    fn test_waiting_placeholder() {
        let fb = Feedback::waiting();
        assert_eq!(fb.back_angle, 0);
        assert_eq!(fb.leg_angle, 0);
        assert_eq!(fb.accuracy, 0);
        assert_eq!(fb.message, "Waiting for pose");
    }

    #[test]
    fn test_from_assessment_truncates_angles() {
        let fb = Feedback::from_assessment(90.7, 169.2, classify(90.7, 169.2));
        assert_eq!(fb.back_angle, 90);
        assert_eq!(fb.leg_angle, 169);
        assert_eq!(fb.accuracy, 100);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(Feedback::waiting()).unwrap();
        assert_eq!(json["back_angle"], 0);
        assert_eq!(json["leg_angle"], 0);
        assert_eq!(json["accuracy"], 0);
        assert_eq!(json["message"], "Waiting for pose");
    }

    #[test]
    fn test_channel_initial_value() {
        let (_tx, rx) = feedback_channel();
        assert_eq!(*rx.borrow(), Feedback::waiting());
    }
}
