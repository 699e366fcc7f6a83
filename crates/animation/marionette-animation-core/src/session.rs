//! Editing session: the live pose, its timeline, the playback clock and the
//! active drag, composed behind one owner.
//!
//! Every edit to the live pose (drag, manual set, bone length) is written back
//! into the selected keyframe. Playback and scrubbing replace the live pose
//! without touching keyframes.

use marionette_skeleton_core::{
    parse_pose_file, pose_file_json, resolve, DragSession, Joint, LengthAttr, Pose,
    PoseCoordinates, PoseError, Settings, Vec2,
};

use crate::config::Config;
use crate::error::{LoadError, TimelineError};
use crate::ids::KeyframeId;
use crate::playback::Playback;
use crate::stored_animation::{parse_stored_animation_json, stored_animation_json};
use crate::timeline::Timeline;

#[derive(Clone, Debug)]
pub struct Session {
    live: Pose,
    timeline: Timeline,
    playback: Playback,
    settings: Settings,
    drag: Option<DragSession>,
    cfg: Config,
}

impl Session {
    pub fn new(pose: Pose, settings: Settings, cfg: Config) -> Self {
        Self {
            timeline: Timeline::new(&pose, &cfg),
            playback: Playback::new(cfg.loop_mode, cfg.frame_rate, cfg.playback_speed),
            live: pose,
            settings,
            drag: None,
            cfg,
        }
    }

    pub fn live(&self) -> &Pose {
        &self.live
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn coordinates(&self) -> Result<PoseCoordinates, PoseError> {
        resolve(&self.live, 1.0)
    }

    fn commit(&mut self, pose: Pose) {
        self.live = pose;
        self.timeline.sync_selected_pose(&self.live);
    }

    // ----- drag -----

    /// Hit-test and start a drag. Returns the grabbed joint.
    pub fn begin_drag(&mut self, point: Vec2) -> Result<Option<Joint>, PoseError> {
        self.drag = DragSession::begin(&self.live, point, &self.settings)?;
        Ok(self.drag.as_ref().map(|d| d.joint))
    }

    /// Apply pointer motion. `Ok(false)` when no drag is active.
    pub fn drag_to(&mut self, point: Vec2) -> Result<bool, PoseError> {
        let Some(drag) = self.drag.as_ref() else {
            return Ok(false);
        };
        let next = drag.drag_to(&self.live, point, &self.settings)?;
        self.commit(next);
        Ok(true)
    }

    pub fn end_drag(&mut self) -> Option<Joint> {
        self.drag.take().map(|d| d.joint)
    }

    pub fn dragged_joint(&self) -> Option<Joint> {
        self.drag.as_ref().map(|d| d.joint)
    }

    // ----- direct edits -----

    /// Replace the live pose after validating it.
    pub fn set_pose(&mut self, pose: Pose) -> Result<(), PoseError> {
        pose.validate()?;
        self.commit(pose);
        Ok(())
    }

    pub fn set_length(&mut self, attr: LengthAttr, value: f64) -> Result<(), PoseError> {
        let mut next = self.live.clone();
        next.set_length(attr, value)?;
        self.commit(next);
        Ok(())
    }

    // ----- timeline -----

    fn show(&mut self, t: f64) -> bool {
        match self.timeline.scrub(t) {
            Some(pose) => {
                self.live = pose;
                true
            }
            None => false,
        }
    }

    /// Move the playhead to `t` and show the pose there.
    pub fn scrub_to(&mut self, t: f64) -> bool {
        self.playback.seek(t);
        self.show(self.playback.time_ms())
    }

    pub fn add_keyframe(&mut self, t: f64) -> Result<(u32, KeyframeId), TimelineError> {
        let (time, id) = self.timeline.add_keyframe(t, &self.live)?;
        self.playback.seek(f64::from(time));
        Ok((time, id))
    }

    pub fn move_keyframe(&mut self, id: &KeyframeId, t: f64) -> Result<u32, TimelineError> {
        let time = self.timeline.move_keyframe(id, t)?;
        self.scrub_to(f64::from(time));
        Ok(time)
    }

    /// Select a keyframe and snap the live pose to its stored pose exactly.
    pub fn select_keyframe(&mut self, id: &KeyframeId) -> Result<(), TimelineError> {
        let kf = self.timeline.select_keyframe(id)?;
        let (time, pose) = (kf.time, kf.pose.clone());
        self.live = pose;
        self.playback.seek(f64::from(time));
        Ok(())
    }

    pub fn delete_keyframe(&mut self, id: &KeyframeId) -> Result<(), TimelineError> {
        self.timeline.delete_keyframe(id)?;
        Ok(())
    }

    /// Single keyframe at 0 holding the live pose; playback rewinds.
    pub fn reset_timeline(&mut self) {
        self.timeline.reset(&self.live);
        self.playback.stop();
    }

    // ----- playback -----

    pub fn play(&mut self) {
        self.playback.play(self.timeline.duration());
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn stop(&mut self) {
        self.playback.stop();
        self.show(0.0);
    }

    pub fn toggle_playback(&mut self) {
        self.playback.toggle(self.timeline.duration());
    }

    pub fn seek(&mut self, t: f64) {
        self.scrub_to(t);
    }

    /// Per-frame callback. Returns the admitted playhead time, if any.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        let t = self.playback.tick(now_ms, self.timeline.duration())?;
        self.show(t);
        Some(t)
    }

    // ----- persistence -----

    pub fn load_pose(&mut self, json: &str) -> Result<(), PoseError> {
        let pose = parse_pose_file(json)?;
        self.commit(pose);
        Ok(())
    }

    pub fn save_pose(&self) -> Result<String, PoseError> {
        pose_file_json(&self.live)
    }

    /// Replace the timeline. Playback stops and the live pose snaps to the first
    /// keyframe.
    pub fn load_animation(&mut self, json: &str) -> Result<(), LoadError> {
        let timeline = parse_stored_animation_json(json, &self.cfg)?;
        self.timeline = timeline;
        self.drag = None;
        self.playback.stop();
        if let Some(kf) = self.timeline.selected_keyframe() {
            self.live = kf.pose.clone();
        }
        Ok(())
    }

    pub fn save_animation(&self) -> Result<String, LoadError> {
        stored_animation_json(&self.timeline)
    }
}
