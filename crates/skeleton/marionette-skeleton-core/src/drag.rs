//! Pointer-driven editing: hit-test a joint, then turn pointer motion into
//! either an IK solve or a direct angle edit followed by propagation.

use crate::config::Settings;
use crate::error::PoseError;
use crate::fk::{self, direction_angle, stored_angle};
use crate::ik::solve_chain;
use crate::joints::{ChainName, Joint};
use crate::pose::{Pose, Vec2};
use crate::propagate::propagate;

/// IK chain a dragged joint drives, if any. Shoulder-level and hip-level joints
/// are always edited directly.
pub fn chain_for_drag(joint: Joint) -> Option<ChainName> {
    use Joint as J;
    match joint {
        J::Head => Some(ChainName::Head),
        J::LeftUpperArm | J::LeftLowerArm | J::LeftHand => Some(ChainName::LeftArm),
        J::RightUpperArm | J::RightLowerArm | J::RightHand => Some(ChainName::RightArm),
        J::LeftUpperLeg | J::LeftLowerLeg | J::LeftFoot => Some(ChainName::LeftLeg),
        J::RightUpperLeg | J::RightLowerLeg | J::RightFoot => Some(ChainName::RightLeg),
        _ => None,
    }
}

/// State captured when a drag gesture starts.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub joint: Joint,
    /// Pose at gesture start; propagation is always computed against it.
    pub start_pose: Pose,
    /// Pointer minus joint position at grab time.
    pub grab_offset: Vec2,
}

impl DragSession {
    /// Hit-test `point` against `pose`. `Ok(None)` when nothing is under the
    /// pointer.
    pub fn begin(
        pose: &Pose,
        point: Vec2,
        settings: &Settings,
    ) -> Result<Option<DragSession>, PoseError> {
        let coords = fk::resolve(pose, 1.0)?;
        let Some(joint) = fk::joint_at(&coords, point, settings.hit_tolerance) else {
            return Ok(None);
        };
        log::debug!("drag: grabbed {joint}");
        Ok(Some(DragSession {
            joint,
            start_pose: pose.clone(),
            grab_offset: point - coords[joint],
        }))
    }

    /// Pose produced by moving the pointer to `pointer`, starting from `pose`.
    pub fn drag_to(
        &self,
        pose: &Pose,
        pointer: Vec2,
        settings: &Settings,
    ) -> Result<Pose, PoseError> {
        if settings.use_ik {
            if let Some(chain) = chain_for_drag(self.joint) {
                // Validate up front so a broken pose is reported, not silently kept.
                pose.validate()?;
                return Ok(solve_chain(pointer, chain, pose, &settings.excluded_joints));
            }
        }

        let target = pointer - self.grab_offset;
        let mut next = pose.clone();
        let Some(info) = self.joint.info() else {
            next.hip = target;
            return Ok(next);
        };

        let coords = fk::resolve(&next, 1.0)?;
        let world = direction_angle(coords[info.origin()], target);
        next.set_angle(info.angle, stored_angle(world, info.needs_offset));
        propagate(
            &mut next,
            self.joint,
            &self.start_pose,
            settings.constraint_mode,
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::propagate::ConstraintMode;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn chain_mapping() {
        assert_eq!(chain_for_drag(Joint::Head), Some(ChainName::Head));
        assert_eq!(chain_for_drag(Joint::LeftLowerArm), Some(ChainName::LeftArm));
        assert_eq!(chain_for_drag(Joint::RightFoot), Some(ChainName::RightLeg));
        assert_eq!(chain_for_drag(Joint::Shoulder), None);
        assert_eq!(chain_for_drag(Joint::Neck), None);
        assert_eq!(chain_for_drag(Joint::LeftHip), None);
    }

    #[test]
    fn begin_misses_empty_space() {
        let s = Settings::default();
        let miss = DragSession::begin(&presets::standing(), Vec2::new(-50.0, -50.0), &s).unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn hip_drag_translates_with_grab_offset() {
        let s = Settings::default();
        let pose = presets::standing();
        let drag = DragSession::begin(&pose, Vec2::new(303.0, 204.0), &s)
            .unwrap()
            .unwrap();
        assert_eq!(drag.joint, Joint::Hip);
        let out = drag.drag_to(&pose, Vec2::new(403.0, 104.0), &s).unwrap();
        approx(out.hip.x, 400.0, 1e-9);
        approx(out.hip.y, 100.0, 1e-9);
        assert_eq!(out.torso_angle, pose.torso_angle);
    }

    #[test]
    fn absolute_shoulder_drag_keeps_descendants() {
        let s = Settings {
            constraint_mode: ConstraintMode::Absolute,
            ..Settings::default()
        };
        let pose = presets::standing();
        let drag = DragSession::begin(&pose, Vec2::new(300.0, 120.0), &s)
            .unwrap()
            .unwrap();
        assert_eq!(drag.joint, Joint::Shoulder);
        let out = drag.drag_to(&pose, Vec2::new(200.0, 200.0), &s).unwrap();
        approx(out.torso_angle, 90.0, 1e-9);
        assert_eq!(out.head_angle, pose.head_angle);
        assert_eq!(out.left_shoulder_angle, pose.left_shoulder_angle);
        assert_eq!(out.left_hand_angle, pose.left_hand_angle);
        assert_eq!(out.right_upper_arm_angle, pose.right_upper_arm_angle);
        assert_eq!(out.left_upper_leg_angle, pose.left_upper_leg_angle);
    }

    #[test]
    fn direct_hand_drag_without_ik() {
        let s = Settings {
            use_ik: false,
            ..Settings::default()
        };
        let pose = presets::standing();
        let coords = fk::resolve(&pose, 1.0).unwrap();
        let hand = coords[Joint::LeftHand];
        let drag = DragSession::begin(&pose, hand, &s).unwrap().unwrap();
        assert_eq!(drag.joint, Joint::LeftHand);
        // Pull the hand straight out to the left of the lower arm.
        let lower = coords[Joint::LeftLowerArm];
        let out = drag
            .drag_to(&pose, lower + Vec2::new(-40.0, 0.0), &s)
            .unwrap();
        approx(out.left_hand_angle, 180.0, 1e-9);
        assert_eq!(out.left_lower_arm_angle, pose.left_lower_arm_angle);
    }

    #[test]
    fn ik_drag_moves_effector_toward_pointer() {
        let s = Settings::default();
        let pose = presets::standing();
        let coords = fk::resolve(&pose, 1.0).unwrap();
        let drag = DragSession::begin(&pose, coords[Joint::LeftHand], &s)
            .unwrap()
            .unwrap();
        let target = coords[Joint::LeftHand] + Vec2::new(-10.0, -10.0);
        let out = drag.drag_to(&pose, target, &s).unwrap();
        let moved = fk::resolve(&out, 1.0).unwrap();
        assert!(moved[Joint::LeftHand].distance(target) < 0.01);
        assert_eq!(moved[Joint::Hip], coords[Joint::Hip]);
    }
}
