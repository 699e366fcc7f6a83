use thiserror::Error;

/// Errors raised by pose resolution, validation and pose-file loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// A pose attribute is missing, non-numeric or out of range. Callers should
    /// refuse to render or apply the pose.
    #[error("invalid pose shape: '{field}' {reason}")]
    InvalidPoseShape { field: String, reason: String },
    /// An IK chain resolves to fewer than two joints.
    #[error("degenerate IK chain: {len} resolvable joint(s), need at least 2")]
    DegenerateChain { len: usize },
    /// The static joint table does not form a tree rooted at the hip.
    #[error("joint hierarchy is not a tree: '{0}' never reaches the hip")]
    BrokenHierarchy(&'static str),
    #[error("pose json error: {0}")]
    Json(String),
}

impl PoseError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        PoseError::InvalidPoseShape {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
