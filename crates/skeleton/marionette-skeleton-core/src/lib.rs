//! Marionette Skeleton Core
//!
//! Angle-based 2D stick-figure model: the static joint hierarchy, forward
//! kinematics, constraint propagation for direct edits, a two-pass reaching IK
//! solver, pose interpolation and pose-file persistence. Engine-agnostic and
//! synchronous; hosts own rendering and input.

pub mod config;
pub mod drag;
pub mod error;
pub mod fk;
pub mod ik;
pub mod interp;
pub mod joints;
pub mod pose;
pub mod presets;
pub mod propagate;
pub mod stored_pose;

// Re-exports for consumers (timeline, hosts)
pub use config::Settings;
pub use drag::{chain_for_drag, DragSession};
pub use error::PoseError;
pub use fk::{joint_at, resolve, PoseCoordinates};
pub use ik::{solve_chain, solve_ik};
pub use interp::{interpolate, interpolate_angle, lerp, Easing};
pub use joints::{topological_order, validate_hierarchy, ChainName, Joint, JointInfo};
pub use pose::{normalize_degrees, AngleAttr, LengthAttr, Pose, Vec2};
pub use propagate::{propagate, ConstraintMode};
pub use stored_pose::{
    merge_pose_json, parse_pose_file, pose_file_json, pose_from_value, POSE_FILE_VERSION,
};
