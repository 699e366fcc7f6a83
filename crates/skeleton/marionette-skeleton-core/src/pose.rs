//! Angle-based pose model.
//!
//! A [`Pose`] is a fixed record: one hip anchor, one stored angle per rotating
//! joint, one length per bone and a uniform `scale`. [`AngleAttr`] and
//! [`LengthAttr`] address those fields by name so the joint hierarchy can map a
//! joint onto a field without string keys.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::PoseError;

/// 2D point / vector in canvas space (y grows downward).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Wrap degrees into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which is
/// folded back to 0.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Stored angle attributes of a [`Pose`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleAttr {
    Torso,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftHip,
    RightHip,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

impl AngleAttr {
    pub const ALL: [AngleAttr; 18] = [
        AngleAttr::Torso,
        AngleAttr::Head,
        AngleAttr::LeftShoulder,
        AngleAttr::RightShoulder,
        AngleAttr::LeftUpperArm,
        AngleAttr::LeftLowerArm,
        AngleAttr::LeftHand,
        AngleAttr::RightUpperArm,
        AngleAttr::RightLowerArm,
        AngleAttr::RightHand,
        AngleAttr::LeftHip,
        AngleAttr::RightHip,
        AngleAttr::LeftUpperLeg,
        AngleAttr::LeftLowerLeg,
        AngleAttr::LeftFoot,
        AngleAttr::RightUpperLeg,
        AngleAttr::RightLowerLeg,
        AngleAttr::RightFoot,
    ];

    /// JSON key used by pose and animation files.
    pub const fn key(self) -> &'static str {
        match self {
            AngleAttr::Torso => "torsoAngle",
            AngleAttr::Head => "headAngle",
            AngleAttr::LeftShoulder => "leftShoulderAngle",
            AngleAttr::RightShoulder => "rightShoulderAngle",
            AngleAttr::LeftUpperArm => "leftUpperArmAngle",
            AngleAttr::LeftLowerArm => "leftLowerArmAngle",
            AngleAttr::LeftHand => "leftHandAngle",
            AngleAttr::RightUpperArm => "rightUpperArmAngle",
            AngleAttr::RightLowerArm => "rightLowerArmAngle",
            AngleAttr::RightHand => "rightHandAngle",
            AngleAttr::LeftHip => "leftHipAngle",
            AngleAttr::RightHip => "rightHipAngle",
            AngleAttr::LeftUpperLeg => "leftUpperLegAngle",
            AngleAttr::LeftLowerLeg => "leftLowerLegAngle",
            AngleAttr::LeftFoot => "leftFootAngle",
            AngleAttr::RightUpperLeg => "rightUpperLegAngle",
            AngleAttr::RightLowerLeg => "rightLowerLegAngle",
            AngleAttr::RightFoot => "rightFootAngle",
        }
    }
}

/// Bone length attributes of a [`Pose`] (head radius included).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthAttr {
    Torso,
    Neck,
    HeadRadius,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

impl LengthAttr {
    pub const ALL: [LengthAttr; 19] = [
        LengthAttr::Torso,
        LengthAttr::Neck,
        LengthAttr::HeadRadius,
        LengthAttr::LeftShoulder,
        LengthAttr::RightShoulder,
        LengthAttr::LeftHip,
        LengthAttr::RightHip,
        LengthAttr::LeftUpperArm,
        LengthAttr::LeftLowerArm,
        LengthAttr::LeftHand,
        LengthAttr::RightUpperArm,
        LengthAttr::RightLowerArm,
        LengthAttr::RightHand,
        LengthAttr::LeftUpperLeg,
        LengthAttr::LeftLowerLeg,
        LengthAttr::LeftFoot,
        LengthAttr::RightUpperLeg,
        LengthAttr::RightLowerLeg,
        LengthAttr::RightFoot,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            LengthAttr::Torso => "torsoLength",
            LengthAttr::Neck => "neckLength",
            LengthAttr::HeadRadius => "headRadius",
            LengthAttr::LeftShoulder => "leftShoulderLength",
            LengthAttr::RightShoulder => "rightShoulderLength",
            LengthAttr::LeftHip => "leftHipLength",
            LengthAttr::RightHip => "rightHipLength",
            LengthAttr::LeftUpperArm => "leftUpperArmLength",
            LengthAttr::LeftLowerArm => "leftLowerArmLength",
            LengthAttr::LeftHand => "leftHandLength",
            LengthAttr::RightUpperArm => "rightUpperArmLength",
            LengthAttr::RightLowerArm => "rightLowerArmLength",
            LengthAttr::RightHand => "rightHandLength",
            LengthAttr::LeftUpperLeg => "leftUpperLegLength",
            LengthAttr::LeftLowerLeg => "leftLowerLegLength",
            LengthAttr::LeftFoot => "leftFootLength",
            LengthAttr::RightUpperLeg => "rightUpperLegLength",
            LengthAttr::RightLowerLeg => "rightLowerLegLength",
            LengthAttr::RightFoot => "rightFootLength",
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Complete skeletal state at one instant.
///
/// Angles are stored in degrees and read through the hierarchy's offset
/// convention (torso and head store `world - 90`). Lengths are unscaled; `scale`
/// multiplies every length at resolution time but never the hip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub hip: Vec2,

    pub torso_angle: f64,
    pub head_angle: f64,
    pub left_shoulder_angle: f64,
    pub right_shoulder_angle: f64,
    pub left_upper_arm_angle: f64,
    pub left_lower_arm_angle: f64,
    pub left_hand_angle: f64,
    pub right_upper_arm_angle: f64,
    pub right_lower_arm_angle: f64,
    pub right_hand_angle: f64,
    pub left_hip_angle: f64,
    pub right_hip_angle: f64,
    pub left_upper_leg_angle: f64,
    pub left_lower_leg_angle: f64,
    pub left_foot_angle: f64,
    pub right_upper_leg_angle: f64,
    pub right_lower_leg_angle: f64,
    pub right_foot_angle: f64,

    pub torso_length: f64,
    pub neck_length: f64,
    pub head_radius: f64,
    pub left_shoulder_length: f64,
    pub right_shoulder_length: f64,
    pub left_hip_length: f64,
    pub right_hip_length: f64,
    pub left_upper_arm_length: f64,
    pub left_lower_arm_length: f64,
    pub left_hand_length: f64,
    pub right_upper_arm_length: f64,
    pub right_lower_arm_length: f64,
    pub right_hand_length: f64,
    pub left_upper_leg_length: f64,
    pub left_lower_leg_length: f64,
    pub left_foot_length: f64,
    pub right_upper_leg_length: f64,
    pub right_lower_leg_length: f64,
    pub right_foot_length: f64,

    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Pose {
    #[inline]
    pub fn angle(&self, attr: AngleAttr) -> f64 {
        match attr {
            AngleAttr::Torso => self.torso_angle,
            AngleAttr::Head => self.head_angle,
            AngleAttr::LeftShoulder => self.left_shoulder_angle,
            AngleAttr::RightShoulder => self.right_shoulder_angle,
            AngleAttr::LeftUpperArm => self.left_upper_arm_angle,
            AngleAttr::LeftLowerArm => self.left_lower_arm_angle,
            AngleAttr::LeftHand => self.left_hand_angle,
            AngleAttr::RightUpperArm => self.right_upper_arm_angle,
            AngleAttr::RightLowerArm => self.right_lower_arm_angle,
            AngleAttr::RightHand => self.right_hand_angle,
            AngleAttr::LeftHip => self.left_hip_angle,
            AngleAttr::RightHip => self.right_hip_angle,
            AngleAttr::LeftUpperLeg => self.left_upper_leg_angle,
            AngleAttr::LeftLowerLeg => self.left_lower_leg_angle,
            AngleAttr::LeftFoot => self.left_foot_angle,
            AngleAttr::RightUpperLeg => self.right_upper_leg_angle,
            AngleAttr::RightLowerLeg => self.right_lower_leg_angle,
            AngleAttr::RightFoot => self.right_foot_angle,
        }
    }

    #[inline]
    pub fn angle_mut(&mut self, attr: AngleAttr) -> &mut f64 {
        match attr {
            AngleAttr::Torso => &mut self.torso_angle,
            AngleAttr::Head => &mut self.head_angle,
            AngleAttr::LeftShoulder => &mut self.left_shoulder_angle,
            AngleAttr::RightShoulder => &mut self.right_shoulder_angle,
            AngleAttr::LeftUpperArm => &mut self.left_upper_arm_angle,
            AngleAttr::LeftLowerArm => &mut self.left_lower_arm_angle,
            AngleAttr::LeftHand => &mut self.left_hand_angle,
            AngleAttr::RightUpperArm => &mut self.right_upper_arm_angle,
            AngleAttr::RightLowerArm => &mut self.right_lower_arm_angle,
            AngleAttr::RightHand => &mut self.right_hand_angle,
            AngleAttr::LeftHip => &mut self.left_hip_angle,
            AngleAttr::RightHip => &mut self.right_hip_angle,
            AngleAttr::LeftUpperLeg => &mut self.left_upper_leg_angle,
            AngleAttr::LeftLowerLeg => &mut self.left_lower_leg_angle,
            AngleAttr::LeftFoot => &mut self.left_foot_angle,
            AngleAttr::RightUpperLeg => &mut self.right_upper_leg_angle,
            AngleAttr::RightLowerLeg => &mut self.right_lower_leg_angle,
            AngleAttr::RightFoot => &mut self.right_foot_angle,
        }
    }

    #[inline]
    pub fn set_angle(&mut self, attr: AngleAttr, degrees: f64) {
        *self.angle_mut(attr) = degrees;
    }

    #[inline]
    pub fn length(&self, attr: LengthAttr) -> f64 {
        match attr {
            LengthAttr::Torso => self.torso_length,
            LengthAttr::Neck => self.neck_length,
            LengthAttr::HeadRadius => self.head_radius,
            LengthAttr::LeftShoulder => self.left_shoulder_length,
            LengthAttr::RightShoulder => self.right_shoulder_length,
            LengthAttr::LeftHip => self.left_hip_length,
            LengthAttr::RightHip => self.right_hip_length,
            LengthAttr::LeftUpperArm => self.left_upper_arm_length,
            LengthAttr::LeftLowerArm => self.left_lower_arm_length,
            LengthAttr::LeftHand => self.left_hand_length,
            LengthAttr::RightUpperArm => self.right_upper_arm_length,
            LengthAttr::RightLowerArm => self.right_lower_arm_length,
            LengthAttr::RightHand => self.right_hand_length,
            LengthAttr::LeftUpperLeg => self.left_upper_leg_length,
            LengthAttr::LeftLowerLeg => self.left_lower_leg_length,
            LengthAttr::LeftFoot => self.left_foot_length,
            LengthAttr::RightUpperLeg => self.right_upper_leg_length,
            LengthAttr::RightLowerLeg => self.right_lower_leg_length,
            LengthAttr::RightFoot => self.right_foot_length,
        }
    }

    #[inline]
    pub fn length_mut(&mut self, attr: LengthAttr) -> &mut f64 {
        match attr {
            LengthAttr::Torso => &mut self.torso_length,
            LengthAttr::Neck => &mut self.neck_length,
            LengthAttr::HeadRadius => &mut self.head_radius,
            LengthAttr::LeftShoulder => &mut self.left_shoulder_length,
            LengthAttr::RightShoulder => &mut self.right_shoulder_length,
            LengthAttr::LeftHip => &mut self.left_hip_length,
            LengthAttr::RightHip => &mut self.right_hip_length,
            LengthAttr::LeftUpperArm => &mut self.left_upper_arm_length,
            LengthAttr::LeftLowerArm => &mut self.left_lower_arm_length,
            LengthAttr::LeftHand => &mut self.left_hand_length,
            LengthAttr::RightUpperArm => &mut self.right_upper_arm_length,
            LengthAttr::RightLowerArm => &mut self.right_lower_arm_length,
            LengthAttr::RightHand => &mut self.right_hand_length,
            LengthAttr::LeftUpperLeg => &mut self.left_upper_leg_length,
            LengthAttr::LeftLowerLeg => &mut self.left_lower_leg_length,
            LengthAttr::LeftFoot => &mut self.left_foot_length,
            LengthAttr::RightUpperLeg => &mut self.right_upper_leg_length,
            LengthAttr::RightLowerLeg => &mut self.right_lower_leg_length,
            LengthAttr::RightFoot => &mut self.right_foot_length,
        }
    }

    /// Set a bone length, rejecting negative or non-finite values.
    pub fn set_length(&mut self, attr: LengthAttr, value: f64) -> Result<(), PoseError> {
        if !value.is_finite() || value < 0.0 {
            return Err(PoseError::InvalidPoseShape {
                field: attr.key().to_string(),
                reason: format!("length must be a finite value >= 0 (got {value})"),
            });
        }
        *self.length_mut(attr) = value;
        Ok(())
    }

    /// Check every attribute is a finite number and every length/scale is non-negative.
    pub fn validate(&self) -> Result<(), PoseError> {
        if !self.hip.is_finite() {
            return Err(PoseError::invalid("hip", "coordinates must be finite"));
        }
        for attr in AngleAttr::ALL {
            if !self.angle(attr).is_finite() {
                return Err(PoseError::invalid(attr.key(), "angle must be finite"));
            }
        }
        for attr in LengthAttr::ALL {
            let v = self.length(attr);
            if !v.is_finite() || v < 0.0 {
                return Err(PoseError::invalid(
                    attr.key(),
                    "length must be a finite value >= 0",
                ));
            }
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(PoseError::invalid("scale", "scale must be a finite value >= 0"));
        }
        Ok(())
    }
}
