//! Keyframe identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque keyframe id. Generated ids look like `keyframe_<uuid>`; ids read from
/// files are kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeId(pub String);

impl KeyframeId {
    pub fn generate() -> Self {
        KeyframeId(format!("keyframe_{}", Uuid::new_v4().simple()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyframeId {
    fn from(s: &str) -> Self {
        KeyframeId(s.to_string())
    }
}

impl From<String> for KeyframeId {
    fn from(s: String) -> Self {
        KeyframeId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let a = KeyframeId::generate();
        let b = KeyframeId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("keyframe_"));
        assert_eq!(serde_json::to_string(&KeyframeId::from("k1")).unwrap(), "\"k1\"");
    }
}
