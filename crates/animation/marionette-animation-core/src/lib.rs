//! Marionette Animation Core
//!
//! Keyframe timeline over marionette poses: collision-aware keyframe edits,
//! eased scrubbing, a frame-capped playback clock, animation-file persistence
//! and the [`Session`] that ties a live pose, its timeline and pointer drags
//! together.

pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod playback;
pub mod session;
pub mod stored_animation;
pub mod timeline;

// Re-exports for consumers (hosts, adapters)
pub use config::Config;
pub use data::Keyframe;
pub use error::{LoadError, TimelineError};
pub use ids::KeyframeId;
pub use marionette_skeleton_core::{Easing, Pose, Settings};
pub use playback::{LoopMode, Playback};
pub use session::Session;
pub use stored_animation::{parse_stored_animation_json, stored_animation_json};
pub use timeline::Timeline;
