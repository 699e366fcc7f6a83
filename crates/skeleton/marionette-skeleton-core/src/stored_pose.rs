//! Pose file loading and saving.
//!
//! Loading is strict: every angle and length attribute plus `hip` must be present
//! and numeric, and the first offending key is reported by name. `scale` defaults
//! to 1 when absent. Angles are normalized to `[0, 360)` on the way in, so older
//! files storing e.g. `-5` load as `355`. [`merge_pose_json`] is the opt-in lenient path for partial
//! documents.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PoseError;
use crate::pose::{normalize_degrees, AngleAttr, LengthAttr, Pose, Vec2};

/// Version string written into saved pose and animation files.
pub const POSE_FILE_VERSION: &str = "1.2.0";

/// On-disk wrapper: `{ "version": "1.2.0", "pose": { ... } }`.
#[derive(Debug, Serialize)]
pub struct PoseFile<'a> {
    pub version: &'static str,
    pub pose: &'a Pose,
}

fn number(obj: &Map<String, Value>, key: &str) -> Result<f64, PoseError> {
    match obj.get(key) {
        None => Err(PoseError::invalid(key, "is missing")),
        Some(v) => v
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| PoseError::invalid(key, "is not a finite number")),
    }
}

/// Build a pose from a JSON object, checking every attribute.
pub fn pose_from_value(value: &Value) -> Result<Pose, PoseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| PoseError::invalid("pose", "is not an object"))?;

    let hip = obj
        .get("hip")
        .ok_or_else(|| PoseError::invalid("hip", "is missing"))?
        .as_object()
        .ok_or_else(|| PoseError::invalid("hip", "is not an object"))?;
    let hip = Vec2::new(number(hip, "x")?, number(hip, "y")?);

    // Seed from the derived shape; every field is overwritten below.
    let mut pose = crate::presets::standing_at(hip.x, hip.y);
    for attr in AngleAttr::ALL {
        pose.set_angle(attr, normalize_degrees(number(obj, attr.key())?));
    }
    for attr in LengthAttr::ALL {
        pose.set_length(attr, number(obj, attr.key())?)?;
    }
    pose.scale = match obj.get("scale") {
        None | Some(Value::Null) => 1.0,
        Some(_) => number(obj, "scale")?,
    };
    pose.validate()?;
    Ok(pose)
}

/// Parse a `{ version, pose }` document.
pub fn parse_pose_file(s: &str) -> Result<Pose, PoseError> {
    let doc: Value = serde_json::from_str(s).map_err(|e| PoseError::Json(e.to_string()))?;
    if let Some(version) = doc.get("version").and_then(Value::as_str) {
        if version != POSE_FILE_VERSION {
            log::debug!("pose file version {version} (writer is {POSE_FILE_VERSION})");
        }
    }
    let pose = doc
        .get("pose")
        .ok_or_else(|| PoseError::invalid("pose", "is missing"))?;
    pose_from_value(pose)
}

/// Serialize `pose` into a pretty-printed pose file.
pub fn pose_file_json(pose: &Pose) -> Result<String, PoseError> {
    serde_json::to_string_pretty(&PoseFile {
        version: POSE_FILE_VERSION,
        pose,
    })
    .map_err(|e| PoseError::Json(e.to_string()))
}

/// Shallow-merge a partial pose object onto `base`, then validate the result.
///
/// Accepts either a bare pose object or a `{ pose }` wrapper. Unknown keys are
/// ignored.
pub fn merge_pose_json(base: &Pose, s: &str) -> Result<Pose, PoseError> {
    let doc: Value = serde_json::from_str(s).map_err(|e| PoseError::Json(e.to_string()))?;
    let partial = doc.get("pose").unwrap_or(&doc);
    let partial = partial
        .as_object()
        .ok_or_else(|| PoseError::invalid("pose", "is not an object"))?;

    let mut merged = match serde_json::to_value(base) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(PoseError::invalid("pose", "base did not serialize to an object")),
        Err(e) => return Err(PoseError::Json(e.to_string())),
    };
    for (key, value) in partial {
        if merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        } else {
            log::debug!("merge_pose_json: ignoring unknown key '{key}'");
        }
    }
    pose_from_value(&Value::Object(merged))
}
