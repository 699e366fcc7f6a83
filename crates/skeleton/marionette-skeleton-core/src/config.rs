//! Interaction settings for the editing path.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::joints::Joint;
use crate::propagate::ConstraintMode;

/// Settings consulted by every drag/edit operation. Passed explicitly; there is
/// no global state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub constraint_mode: ConstraintMode,
    /// Solve limb chains with IK when an end joint is dragged.
    pub use_ik: bool,
    /// Joints the IK solver must treat as fixed pivots.
    pub excluded_joints: HashSet<Joint>,
    /// Hit-test radius in canvas pixels.
    pub hit_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            constraint_mode: ConstraintMode::Relative,
            use_ik: true,
            excluded_joints: HashSet::new(),
            hit_tolerance: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"constraintMode":"absolute","excludedJoints":["leftLowerArm"]}"#)
                .unwrap();
        assert_eq!(s.constraint_mode, ConstraintMode::Absolute);
        assert!(s.use_ik);
        assert!(s.excluded_joints.contains(&Joint::LeftLowerArm));
        assert_eq!(s.hit_tolerance, 15.0);
    }
}
