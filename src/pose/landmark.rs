/// MoveNet の 17 ランドマークインデックス
///
/// MediaPipeのLEFT_SHOULDER等に相当する部位はこの並びで参照する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl LandmarkIndex {
    pub const COUNT: usize = 17;
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 可視性の信頼度スコア (0.0〜1.0)
    pub confidence: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// 信頼度が閾値以上か
    pub fn visible(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }

    /// ピクセル座標に変換（切り捨て）
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        let px = (self.x * width as f32) as i32;
        let py = (self.y * height as f32) as i32;
        (px, py)
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            confidence: 0.0,
        }
    }
}

/// 1フレーム分の検出結果（17ランドマーク）
#[derive(Debug, Clone)]
pub struct PoseLandmarks {
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl PoseLandmarks {
    pub fn new(landmarks: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self { landmarks }
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }
}

impl Default for PoseLandmarks {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LandmarkIndex::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_visible() {
        let lm = Landmark::new(0.5, 0.5, 0.7);
        assert!(lm.visible(0.5));
        assert!(!lm.visible(0.8));
    }

    #[test]
    fn test_visible_threshold_inclusive() {
        let lm = Landmark::new(0.5, 0.5, 0.5);
        assert!(lm.visible(0.5));
        let lm = Landmark::new(0.5, 0.5, 0.49);
        assert!(!lm.visible(0.5));
    }

    #[test]
    fn test_to_pixel_truncates() {
        let lm = Landmark::new(0.5, 0.25, 1.0);
        assert_eq!(lm.to_pixel(640, 480), (320, 120));
        // 0.999 * 640 = 639.36 -> 639
        let lm = Landmark::new(0.999, 0.999, 1.0);
        assert_eq!(lm.to_pixel(640, 480), (639, 479));
    }

    #[test]
    fn test_pose_landmarks_get() {
        let mut landmarks = [Landmark::default(); LandmarkIndex::COUNT];
        landmarks[LandmarkIndex::LeftHip as usize] = Landmark::new(0.4, 0.6, 0.9);

        let pose = PoseLandmarks::new(landmarks);
        let hip = pose.get(LandmarkIndex::LeftHip);
        assert_eq!(hip.x, 0.4);
        assert_eq!(hip.y, 0.6);
        assert_eq!(hip.confidence, 0.9);
    }
}
