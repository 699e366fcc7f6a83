//! Pose blending and easing curves.

use serde::{Deserialize, Serialize};

use crate::pose::{normalize_degrees, AngleAttr, LengthAttr, Pose, Vec2};

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Shortest-arc blend between two angles in degrees, normalized to `[0, 360)`.
/// Endpoints reproduce the inputs exactly when they are already in range.
#[inline]
pub fn interpolate_angle(a: f64, b: f64, t: f64) -> f64 {
    let mut diff = b - a;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    normalize_degrees(a + diff * t)
}

/// Blend every attribute of two poses. `t` is not clamped.
pub fn interpolate(a: &Pose, b: &Pose, t: f64) -> Pose {
    let mut out = a.clone();
    out.hip = Vec2::new(lerp(a.hip.x, b.hip.x, t), lerp(a.hip.y, b.hip.y, t));
    for attr in AngleAttr::ALL {
        out.set_angle(attr, interpolate_angle(a.angle(attr), b.angle(attr), t));
    }
    for attr in LengthAttr::ALL {
        *out.length_mut(attr) = lerp(a.length(attr), b.length(attr), t);
    }
    out.scale = lerp(a.scale, b.scale, t);
    out
}

/// Timing curve applied to the blend factor before interpolating.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    (t - 1.0) * u * u + 1.0
                }
            }
        }
    }
}
