use marionette_skeleton_core::{pose_from_value, POSE_FILE_VERSION};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::{to_ms, Keyframe};
use crate::error::LoadError;
use crate::ids::KeyframeId;
use crate::timeline::Timeline;

/// Parse an animation file (`{ version, animationDuration, keyframes }`) into a
/// [`Timeline`].
///
/// Notes:
/// - Every keyframe pose is loaded strictly; the first missing or non-numeric
///   attribute fails the whole document.
/// - Fractional keyframe times are rounded to whole milliseconds; negative times
///   clamp to 0.
/// - `animationDuration` defaults to `cfg.default_duration_ms` when absent and is
///   raised to the latest keyframe.
pub fn parse_stored_animation_json(s: &str, cfg: &Config) -> Result<Timeline, LoadError> {
    let sa: StoredAnimation =
        serde_json::from_str(s).map_err(|e| LoadError::Parse(e.to_string()))?;
    if let Some(version) = sa.version.as_deref() {
        if version != POSE_FILE_VERSION {
            log::debug!("animation file version {version} (writer is {POSE_FILE_VERSION})");
        }
    }

    let mut keyframes = Vec::with_capacity(sa.keyframes.len());
    for sk in sa.keyframes {
        let pose = pose_from_value(&sk.pose).map_err(|source| LoadError::KeyframePose {
            id: sk.id.clone(),
            source,
        })?;
        keyframes.push(Keyframe {
            id: KeyframeId(sk.id),
            time: to_ms(sk.time),
            pose,
        });
    }

    let duration = sa
        .animation_duration
        .map(to_ms)
        .unwrap_or(cfg.default_duration_ms);
    let timeline = Timeline::from_parts(keyframes, duration, cfg)?;
    log::debug!(
        "loaded animation: {} keyframes, {} ms",
        timeline.len(),
        timeline.duration()
    );
    Ok(timeline)
}

/// Serialize a timeline into a pretty-printed animation file.
pub fn stored_animation_json(timeline: &Timeline) -> Result<String, LoadError> {
    serde_json::to_string_pretty(&StoredAnimationOut {
        version: POSE_FILE_VERSION,
        animation_duration: timeline.duration(),
        keyframes: timeline.keyframes(),
    })
    .map_err(|e| LoadError::Parse(e.to_string()))
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredAnimation {
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "animationDuration", default)]
    animation_duration: Option<f64>,
    keyframes: Vec<StoredKeyframe>,
}

#[derive(Debug, Deserialize)]
struct StoredKeyframe {
    id: String,
    time: f64,
    pose: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct StoredAnimationOut<'a> {
    version: &'static str,
    #[serde(rename = "animationDuration")]
    animation_duration: u32,
    keyframes: &'a [Keyframe],
}
