//! Constraint propagation after a direct (non-IK) angle edit.
//!
//! The working pose is mutated in place through a unique borrow for the whole
//! gesture; `original` is the pose captured when the gesture started. The result
//! depends only on `original` and the current angle of the changed joint, so
//! re-running propagation on every pointer move never accumulates error.

use serde::{Deserialize, Serialize};

use crate::fk::{stored_angle, world_angle};
use crate::joints::Joint;
use crate::pose::{normalize_degrees, Pose};

/// How descendants react when their parent is rotated directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintMode {
    /// Children keep their angle relative to the parent and swing with it.
    #[default]
    Relative,
    /// Children keep their pre-drag world angle.
    Absolute,
}

/// Update every descendant of `changed` in `pose`. `changed` itself and joints
/// outside its subtree are never written.
pub fn propagate(pose: &mut Pose, changed: Joint, original: &Pose, mode: ConstraintMode) {
    let parent_info = changed.info();

    for (child, info) in changed.children() {
        // Head under neck: same attribute, already authoritative.
        let shared = parent_info.is_some_and(|p| p.angle == info.angle);
        if !shared {
            let next = match (mode, parent_info) {
                (ConstraintMode::Relative, Some(p)) => {
                    // World-space on both sides so offset joints (torso → neck)
                    // are not corrected twice.
                    let parent_before = world_angle(original.angle(p.angle), p.needs_offset);
                    let child_before = world_angle(original.angle(info.angle), info.needs_offset);
                    let relative = normalize_degrees(child_before - parent_before);
                    let parent_now = world_angle(pose.angle(p.angle), p.needs_offset);
                    stored_angle(parent_now + relative, info.needs_offset)
                }
                // The hip has no angle, so its children have nothing to follow.
                _ => original.angle(info.angle),
            };
            pose.set_angle(info.angle, next);
        }
        propagate(pose, child, original, mode);
    }
}
