//! Built-in poses. All share the same proportions; only the hip anchor and the
//! angles differ.

use crate::pose::{normalize_degrees, Pose, Vec2};

struct Limbs {
    torso: f64,
    head: f64,
    left_arm: [f64; 3],
    right_arm: [f64; 3],
    left_leg: [f64; 3],
    right_leg: [f64; 3],
}

fn build(hip: Vec2, limbs: Limbs) -> Pose {
    let n = normalize_degrees;
    Pose {
        hip,
        torso_angle: n(limbs.torso),
        head_angle: n(limbs.head),
        left_shoulder_angle: 180.0,
        right_shoulder_angle: 0.0,
        left_upper_arm_angle: n(limbs.left_arm[0]),
        left_lower_arm_angle: n(limbs.left_arm[1]),
        left_hand_angle: n(limbs.left_arm[2]),
        right_upper_arm_angle: n(limbs.right_arm[0]),
        right_lower_arm_angle: n(limbs.right_arm[1]),
        right_hand_angle: n(limbs.right_arm[2]),
        left_hip_angle: 180.0,
        right_hip_angle: 0.0,
        left_upper_leg_angle: n(limbs.left_leg[0]),
        left_lower_leg_angle: n(limbs.left_leg[1]),
        left_foot_angle: n(limbs.left_leg[2]),
        right_upper_leg_angle: n(limbs.right_leg[0]),
        right_lower_leg_angle: n(limbs.right_leg[1]),
        right_foot_angle: n(limbs.right_leg[2]),

        torso_length: 80.0,
        neck_length: 30.0,
        head_radius: 15.0,
        left_shoulder_length: 30.0,
        right_shoulder_length: 30.0,
        left_hip_length: 15.0,
        right_hip_length: 15.0,
        left_upper_arm_length: 50.0,
        left_lower_arm_length: 45.0,
        left_hand_length: 25.0,
        right_upper_arm_length: 50.0,
        right_lower_arm_length: 45.0,
        right_hand_length: 25.0,
        left_upper_leg_length: 60.0,
        left_lower_leg_length: 55.0,
        left_foot_length: 30.0,
        right_upper_leg_length: 60.0,
        right_lower_leg_length: 55.0,
        right_foot_length: 30.0,
        scale: 1.0,
    }
}

/// Upright rest pose at `(x, y)`; the live pose of a new session.
pub fn standing_at(x: f64, y: f64) -> Pose {
    build(
        Vec2::new(x, y),
        Limbs {
            torso: 0.0,
            head: 0.0,
            left_arm: [200.0, 240.0, 270.0],
            right_arm: [340.0, 300.0, 270.0],
            left_leg: [250.0, 260.0, 180.0],
            right_leg: [290.0, 280.0, 0.0],
        },
    )
}

pub fn standing() -> Pose {
    standing_at(300.0, 200.0)
}

pub fn walking() -> Pose {
    build(
        Vec2::new(300.0, 200.0),
        Limbs {
            torso: 5.0,
            head: -5.0,
            left_arm: [210.0, 240.0, 270.0],
            right_arm: [330.0, 300.0, 270.0],
            left_leg: [240.0, 210.0, 180.0],
            right_leg: [300.0, 330.0, 0.0],
        },
    )
}

pub fn sitting() -> Pose {
    build(
        Vec2::new(300.0, 280.0),
        Limbs {
            torso: 0.0,
            head: 0.0,
            left_arm: [240.0, 270.0, 270.0],
            right_arm: [300.0, 270.0, 270.0],
            left_leg: [180.0, 135.0, 90.0],
            right_leg: [0.0, 45.0, 90.0],
        },
    )
}

/// Mid-stride lean with asymmetric arms.
pub fn dynamic_action() -> Pose {
    build(
        Vec2::new(300.0, 220.0),
        Limbs {
            torso: 354.39095320527827,
            head: 352.87072944940746,
            left_arm: [227.20426038742943, 257.20426038742943, 284.64143851653336],
            right_arm: [280.7885736848833, 301.379839753169, 327.5129185251943],
            left_leg: [260.2112248374124, 250.08344947540064, 359.7070980008438],
            right_leg: [289.87786972207, 274.8168901202079, 359.2944873428671],
        },
    )
}
