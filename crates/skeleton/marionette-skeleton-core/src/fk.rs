//! Forward kinematics: stored angles + bone lengths → canvas coordinates.
//!
//! Canvas convention: angles are counter-clockwise from +x in degrees, and the
//! y axis is flipped (up is negative y).

use serde::Serialize;

use crate::error::PoseError;
use crate::joints::{topological_order, Joint, Placement};
use crate::pose::{normalize_degrees, Pose, Vec2};

/// Offset of length `distance` along `angle_deg` in canvas space.
#[inline]
pub fn offset(angle_deg: f64, distance: f64) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(distance * rad.cos(), -distance * rad.sin())
}

/// World-facing angle of a stored attribute.
#[inline]
pub fn world_angle(stored: f64, needs_offset: bool) -> f64 {
    if needs_offset {
        stored + 90.0
    } else {
        stored
    }
}

/// Stored attribute value for a world-facing angle, normalized to `[0, 360)`.
#[inline]
pub fn stored_angle(world: f64, needs_offset: bool) -> f64 {
    if needs_offset {
        normalize_degrees(world - 90.0)
    } else {
        normalize_degrees(world)
    }
}

/// World angle of the direction `from → to`, in `[0, 360)`.
#[inline]
pub fn direction_angle(from: Vec2, to: Vec2) -> f64 {
    let dx = to.x - from.x;
    let dy = -(to.y - from.y);
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Resolved coordinate for every joint of one pose.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PoseCoordinates {
    points: [Vec2; Joint::COUNT],
}

impl PoseCoordinates {
    #[inline]
    pub fn get(&self, joint: Joint) -> Vec2 {
        self.points[joint.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, Vec2)> + '_ {
        Joint::ALL.iter().map(move |j| (*j, self.points[j.index()]))
    }
}

impl std::ops::Index<Joint> for PoseCoordinates {
    type Output = Vec2;
    fn index(&self, joint: Joint) -> &Vec2 {
        &self.points[joint.index()]
    }
}

/// Resolve every joint coordinate. `scale` multiplies `pose.scale`; the hip is
/// never scaled.
///
/// Fails with [`PoseError::InvalidPoseShape`] when any attribute is non-finite or
/// a length is negative.
pub fn resolve(pose: &Pose, scale: f64) -> Result<PoseCoordinates, PoseError> {
    pose.validate()?;
    let total_scale = scale * pose.scale;
    if !total_scale.is_finite() {
        return Err(PoseError::InvalidPoseShape {
            field: "scale".into(),
            reason: format!("resolution scale {scale} is not finite"),
        });
    }

    let mut points = [Vec2::ZERO; Joint::COUNT];
    points[Joint::Hip.index()] = pose.hip;

    for joint in topological_order().iter().skip(1) {
        let Some(info) = joint.info() else { continue };
        let distance = match info.placement {
            Placement::Bone(len) => pose.length(len),
            Placement::BeyondNeck => pose.neck_length + pose.head_radius,
        };
        let angle = world_angle(pose.angle(info.angle), info.needs_offset);
        points[joint.index()] =
            points[info.origin().index()] + offset(angle, distance * total_scale);
    }

    Ok(PoseCoordinates { points })
}

/// First joint (hierarchy order) within `tolerance` of `point`.
pub fn joint_at(coords: &PoseCoordinates, point: Vec2, tolerance: f64) -> Option<Joint> {
    coords
        .iter()
        .find(|(_, p)| p.distance(point) <= tolerance)
        .map(|(j, _)| j)
}
