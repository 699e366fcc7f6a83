//! Core configuration for marionette-animation-core.

use marionette_skeleton_core::Easing;
use serde::{Deserialize, Serialize};

use crate::playback::LoopMode;

/// Timeline and playback tuning. Every field has a default, so partial JSON
/// documents deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Two keyframes closer than this (ms) collide.
    pub min_separation_ms: u32,
    /// Duration of a fresh or reset timeline.
    pub default_duration_ms: u32,
    /// How far past the last keyframe a fallback insert lands when the
    /// duration leaves no room.
    pub extend_step_ms: u32,

    /// Playback frame cap (frames per second).
    pub frame_rate: f64,
    pub loop_mode: LoopMode,
    /// Curve applied between bracketing keyframes when scrubbing.
    pub easing: Easing,
    /// Playhead milliseconds advanced per wall-clock millisecond.
    pub playback_speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_separation_ms: 10,
            default_duration_ms: 5000,
            extend_step_ms: 1000,
            frame_rate: 60.0,
            loop_mode: LoopMode::Once,
            easing: Easing::Linear,
            playback_speed: 1.0,
        }
    }
}
