//! Timeline data model.

use marionette_skeleton_core::Pose;
use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;

/// One stored pose on the timeline. The pose is an owned copy; editing the live
/// pose never reaches it except through an explicit sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: KeyframeId,
    /// Milliseconds from the start of the timeline.
    pub time: u32,
    pub pose: Pose,
}

impl Keyframe {
    pub fn new(time: u32, pose: Pose) -> Self {
        Self {
            id: KeyframeId::generate(),
            time,
            pose,
        }
    }
}

/// Whole-millisecond keyframe time from a playhead or file value. Negative
/// values clamp to 0.
#[inline]
pub fn to_ms(time: f64) -> u32 {
    if time.is_nan() || time <= 0.0 {
        0
    } else {
        // `as` saturates at u32::MAX.
        time.round() as u32
    }
}
