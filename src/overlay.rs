use anyhow::Result;
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc,
    prelude::*,
};

use crate::analysis::JointCoordinates;
use crate::feedback::Feedback;
use crate::pose::{LandmarkIndex, PoseLandmarks};

/// 骨格の接続定義 (開始ランドマーク, 終了ランドマーク)
pub const SKELETON_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 16] = [
    // 顔
    (LandmarkIndex::LeftEar, LandmarkIndex::LeftEye),
    (LandmarkIndex::LeftEye, LandmarkIndex::Nose),
    (LandmarkIndex::Nose, LandmarkIndex::RightEye),
    (LandmarkIndex::RightEye, LandmarkIndex::RightEar),
    // 上半身
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftElbow),
    (LandmarkIndex::LeftElbow, LandmarkIndex::LeftWrist),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightElbow),
    (LandmarkIndex::RightElbow, LandmarkIndex::RightWrist),
    // 胴体
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftHip),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightHip),
    (LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
    // 下半身
    (LandmarkIndex::LeftHip, LandmarkIndex::LeftKnee),
    (LandmarkIndex::LeftKnee, LandmarkIndex::LeftAnkle),
    (LandmarkIndex::RightHip, LandmarkIndex::RightKnee),
    (LandmarkIndex::RightKnee, LandmarkIndex::RightAnkle),
];

// BGR
fn skeleton_color() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

fn back_color() -> Scalar {
    Scalar::new(0.0, 255.0, 255.0, 0.0)
}

fn leg_color() -> Scalar {
    Scalar::new(255.0, 255.0, 0.0, 0.0)
}

/// 可視性閾値を満たす接続のみ骨格線を描画
pub fn draw_skeleton(frame: &mut Mat, pose: &PoseLandmarks, min_visibility: f32) -> Result<()> {
    let width = frame.cols() as u32;
    let height = frame.rows() as u32;

    for (from, to) in SKELETON_CONNECTIONS {
        let a = pose.get(from);
        let b = pose.get(to);
        if !a.visible(min_visibility) || !b.visible(min_visibility) {
            continue;
        }
        let (ax, ay) = a.to_pixel(width, height);
        let (bx, by) = b.to_pixel(width, height);
        imgproc::line(
            frame,
            Point::new(ax, ay),
            Point::new(bx, by),
            skeleton_color(),
            2,
            imgproc::LINE_AA,
            0,
        )?;
    }

    for landmark in &pose.landmarks {
        if !landmark.visible(min_visibility) {
            continue;
        }
        let (x, y) = landmark.to_pixel(width, height);
        imgproc::circle(
            frame,
            Point::new(x, y),
            3,
            skeleton_color(),
            imgproc::FILLED,
            imgproc::LINE_AA,
            0,
        )?;
    }

    Ok(())
}

/// 関節角を2本の線とラベルで描画（ラベルは外側2点の中点）
fn draw_angle(
    frame: &mut Mat,
    p1: (i32, i32),
    p2: (i32, i32),
    p3: (i32, i32),
    angle: i32,
    label: &str,
    color: Scalar,
) -> Result<()> {
    imgproc::line(
        frame,
        Point::new(p1.0, p1.1),
        Point::new(p2.0, p2.1),
        color,
        2,
        imgproc::LINE_AA,
        0,
    )?;
    imgproc::line(
        frame,
        Point::new(p2.0, p2.1),
        Point::new(p3.0, p3.1),
        color,
        2,
        imgproc::LINE_AA,
        0,
    )?;

    let mid = Point::new((p1.0 + p3.0) / 2, (p1.1 + p3.1) / 2);
    imgproc::put_text(
        frame,
        &format!("{}: {}", label, angle),
        mid,
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.6,
        color,
        2,
        imgproc::LINE_AA,
        false,
    )?;

    Ok(())
}

/// 背中と脚の角度、および判定メッセージを描画
///
/// 座標はサンプル取得時のキャッシュ。スキップフレームでもそのまま再描画する。
pub fn draw_feedback(frame: &mut Mat, coords: &JointCoordinates, feedback: &Feedback) -> Result<()> {
    draw_angle(
        frame,
        coords.shoulder,
        coords.hip,
        coords.knee,
        feedback.back_angle,
        "Back",
        back_color(),
    )?;
    draw_angle(
        frame,
        coords.hip,
        coords.knee,
        coords.ankle,
        feedback.leg_angle,
        "Leg",
        leg_color(),
    )?;

    let message_color = if feedback.accuracy == 100 {
        Scalar::new(0.0, 255.0, 0.0, 0.0)
    } else {
        Scalar::new(0.0, 0.0, 255.0, 0.0)
    };
    imgproc::put_text(
        frame,
        &feedback.message,
        Point::new(20, 40),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.8,
        message_color,
        2,
        imgproc::LINE_AA,
        false,
    )?;

    Ok(())
}
