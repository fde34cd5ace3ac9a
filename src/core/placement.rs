// Hand-placement verification for chest compressions
//
// Classifies whether the rescuer's wrists sit over the chest center, from
// the body landmarks of a single frame. Stateless; every frame is evaluated
// on its own with no smoothing across frames.

use crate::models::pose::{BodyLandmark, Keypoint, PoseFrame};

/// Maximum wrist-to-chest-center distance (normalized units) for a good
/// placement. Tuned empirically for an adult torso framed by a front-facing
/// camera at arm's length.
pub const PLACEMENT_THRESHOLD: f32 = 0.15;

/// Derived torso reference point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChestCenter {
    pub x: f32,
    pub y: f32,
}

/// The six landmarks the classifier consumes
const REQUIRED_LANDMARKS: [BodyLandmark; 6] = [
    BodyLandmark::LeftWrist,
    BodyLandmark::RightWrist,
    BodyLandmark::LeftShoulder,
    BodyLandmark::RightShoulder,
    BodyLandmark::LeftHip,
    BodyLandmark::RightHip,
];

/// Chest center as the mean of the four shoulder/hip landmarks
///
/// Returns `None` when any of the four is absent or non-finite.
pub fn chest_center(frame: &PoseFrame, min_confidence: f32) -> Option<ChestCenter> {
    let left_shoulder = finite_landmark(frame, BodyLandmark::LeftShoulder, min_confidence)?;
    let right_shoulder = finite_landmark(frame, BodyLandmark::RightShoulder, min_confidence)?;
    let left_hip = finite_landmark(frame, BodyLandmark::LeftHip, min_confidence)?;
    let right_hip = finite_landmark(frame, BodyLandmark::RightHip, min_confidence)?;

    Some(ChestCenter {
        x: (left_shoulder.x + right_shoulder.x + left_hip.x + right_hip.x) / 4.0,
        y: (left_shoulder.y + right_shoulder.y + left_hip.y + right_hip.y) / 4.0,
    })
}

/// Evaluate hand placement for one frame
///
/// `None` means no verdict is possible for this frame (a required landmark
/// is absent or non-finite) and is distinct from `Some(false)`.
/// `Some(true)` means both wrists lie strictly within
/// [`PLACEMENT_THRESHOLD`] of the chest center.
pub fn evaluate(frame: &PoseFrame, min_confidence: f32) -> Option<bool> {
    evaluate_with_threshold(frame, min_confidence, PLACEMENT_THRESHOLD)
}

/// Same as [`evaluate`] with a caller-supplied distance threshold
pub fn evaluate_with_threshold(
    frame: &PoseFrame,
    min_confidence: f32,
    threshold: f32,
) -> Option<bool> {
    for landmark in REQUIRED_LANDMARKS {
        finite_landmark(frame, landmark, min_confidence)?;
    }

    let center = chest_center(frame, min_confidence)?;
    let left_wrist = finite_landmark(frame, BodyLandmark::LeftWrist, min_confidence)?;
    let right_wrist = finite_landmark(frame, BodyLandmark::RightWrist, min_confidence)?;

    let left_distance = distance(left_wrist, center);
    let right_distance = distance(right_wrist, center);

    Some(left_distance < threshold && right_distance < threshold)
}

fn finite_landmark(
    frame: &PoseFrame,
    which: BodyLandmark,
    min_confidence: f32,
) -> Option<Keypoint> {
    frame.landmark(which, min_confidence).filter(Keypoint::is_finite)
}

fn distance(point: Keypoint, center: ChestCenter) -> f32 {
    ((point.x - center.x).powi(2) + (point.y - center.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::BODY_LANDMARK_COUNT;

    fn frame_with(points: &[(BodyLandmark, f32, f32)]) -> PoseFrame {
        // Unlisted landmarks get zero confidence so they read as absent
        let mut keypoints = vec![Keypoint::new(0.0, 0.0, 0.0); BODY_LANDMARK_COUNT];
        for (landmark, x, y) in points {
            keypoints[landmark.index()] = Keypoint::new(*x, *y, 1.0);
        }
        PoseFrame {
            timestamp: 0,
            keypoints: Some(keypoints),
            processing_time_ms: 0,
        }
    }

    fn torso() -> Vec<(BodyLandmark, f32, f32)> {
        vec![
            (BodyLandmark::LeftShoulder, 0.4, 0.3),
            (BodyLandmark::RightShoulder, 0.6, 0.3),
            (BodyLandmark::LeftHip, 0.4, 0.6),
            (BodyLandmark::RightHip, 0.6, 0.6),
        ]
    }

    #[test]
    fn test_chest_center_is_mean_of_torso_points() {
        let frame = frame_with(&torso());
        let center = chest_center(&frame, 0.5).unwrap();
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!((center.y - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_wrists_on_chest_center_is_good() {
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5, 0.45));
        points.push((BodyLandmark::RightWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), Some(true));
    }

    #[test]
    fn test_wrists_far_from_chest_is_bad() {
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.1, 0.1));
        points.push((BodyLandmark::RightWrist, 0.9, 0.9));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), Some(false));
    }

    #[test]
    fn test_one_wrist_off_is_bad() {
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5, 0.45));
        points.push((BodyLandmark::RightWrist, 0.9, 0.9));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), Some(false));
    }

    #[test]
    fn test_threshold_is_strict() {
        // Wrist exactly at the threshold distance must not pass
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5 + PLACEMENT_THRESHOLD, 0.45));
        points.push((BodyLandmark::RightWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), Some(false));

        // Just inside passes
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5 + PLACEMENT_THRESHOLD - 0.001, 0.45));
        points.push((BodyLandmark::RightWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), Some(true));
    }

    #[test]
    fn test_missing_landmark_gives_no_verdict() {
        // No wrists at all
        let frame = frame_with(&torso());
        assert_eq!(evaluate(&frame, 0.5), None);

        // One wrist missing
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), None);

        // Torso point missing
        let mut points = torso();
        points.remove(0);
        points.push((BodyLandmark::LeftWrist, 0.5, 0.45));
        points.push((BodyLandmark::RightWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), None);
    }

    #[test]
    fn test_empty_frame_gives_no_verdict() {
        let frame = PoseFrame::empty(0);
        assert_eq!(evaluate(&frame, 0.5), None);
    }

    #[test]
    fn test_non_finite_coordinate_gives_no_verdict() {
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, f32::NAN, 0.45));
        points.push((BodyLandmark::RightWrist, 0.5, 0.45));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), None);
    }

    #[test]
    fn test_reflection_invariance() {
        // Mirroring the body around x = 0.5 with left/right labels swapped
        // must not change the verdict
        let build = |mirror: bool| {
            let flip = |x: f32| if mirror { 1.0 - x } else { x };
            let (ls, rs) = if mirror {
                (BodyLandmark::RightShoulder, BodyLandmark::LeftShoulder)
            } else {
                (BodyLandmark::LeftShoulder, BodyLandmark::RightShoulder)
            };
            let (lh, rh) = if mirror {
                (BodyLandmark::RightHip, BodyLandmark::LeftHip)
            } else {
                (BodyLandmark::LeftHip, BodyLandmark::RightHip)
            };
            let (lw, rw) = if mirror {
                (BodyLandmark::RightWrist, BodyLandmark::LeftWrist)
            } else {
                (BodyLandmark::LeftWrist, BodyLandmark::RightWrist)
            };
            frame_with(&[
                (ls, flip(0.35), 0.3),
                (rs, flip(0.62), 0.31),
                (lh, flip(0.38), 0.61),
                (rh, flip(0.63), 0.6),
                (lw, flip(0.48), 0.44),
                (rw, flip(0.53), 0.47),
            ])
        };

        assert_eq!(evaluate(&build(false), 0.5), evaluate(&build(true), 0.5));
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut points = torso();
        points.push((BodyLandmark::LeftWrist, 0.5, 0.45));
        points.push((BodyLandmark::RightWrist, 0.52, 0.43));
        let frame = frame_with(&points);
        assert_eq!(evaluate(&frame, 0.5), evaluate(&frame, 0.5));
    }
}
