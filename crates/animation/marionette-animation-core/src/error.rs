use marionette_skeleton_core::PoseError;
use thiserror::Error;

use crate::ids::KeyframeId;

/// Rejected timeline edits. The timeline is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("a keyframe already exists within the separation threshold of {time} ms")]
    KeyframeCollision { time: u32 },
    #[error("no keyframe is selected to insert relative to")]
    MissingSelection,
    #[error("unknown keyframe '{0}'")]
    UnknownKeyframe(KeyframeId),
}

/// Failures loading or saving an animation file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("keyframe '{id}' pose rejected: {source}")]
    KeyframePose { id: String, source: PoseError },
    #[error("animation json error: {0}")]
    Parse(String),
    #[error("duplicate keyframe id '{0}'")]
    DuplicateId(String),
    #[error("keyframes '{first}' and '{second}' collide near {time} ms")]
    Collision {
        first: String,
        second: String,
        time: u32,
    },
}
