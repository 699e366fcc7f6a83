//! Keyframe timeline: ordered pose snapshots, scrubbing and collision-aware edits.

use marionette_skeleton_core::{interpolate, Pose};

use crate::config::Config;
use crate::data::{to_ms, Keyframe};
use crate::error::{LoadError, TimelineError};
use crate::ids::KeyframeId;

/// Keyframes sorted by time, no two closer than `min_separation_ms`, and a
/// duration at or beyond the latest one.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
    duration: u32,
    selected: Option<KeyframeId>,
    cfg: Config,
}

impl Timeline {
    /// Fresh timeline: one keyframe at 0 holding `live`, selected.
    pub fn new(live: &Pose, cfg: &Config) -> Self {
        let first = Keyframe::new(0, live.clone());
        Self {
            selected: Some(first.id.clone()),
            keyframes: vec![first],
            duration: cfg.default_duration_ms,
            cfg: cfg.clone(),
        }
    }

    /// Timeline with no keyframes (scrubbing yields nothing).
    pub fn empty(cfg: &Config) -> Self {
        Self {
            keyframes: Vec::new(),
            duration: cfg.default_duration_ms,
            selected: None,
            cfg: cfg.clone(),
        }
    }

    /// Build from loaded keyframes: sort, reject duplicate ids and collisions,
    /// raise `duration` to the latest keyframe. The first keyframe is selected.
    pub fn from_parts(
        mut keyframes: Vec<Keyframe>,
        duration: u32,
        cfg: &Config,
    ) -> Result<Self, LoadError> {
        {
            let mut seen = hashbrown::HashSet::with_capacity(keyframes.len());
            for kf in &keyframes {
                if !seen.insert(kf.id.as_str()) {
                    return Err(LoadError::DuplicateId(kf.id.0.clone()));
                }
            }
        }
        keyframes.sort_by_key(|k| k.time);
        for pair in keyframes.windows(2) {
            if pair[1].time - pair[0].time < cfg.min_separation_ms {
                return Err(LoadError::Collision {
                    first: pair[0].id.0.clone(),
                    second: pair[1].id.0.clone(),
                    time: pair[1].time,
                });
            }
        }
        let latest = keyframes.last().map(|k| k.time).unwrap_or(0);
        Ok(Self {
            selected: keyframes.first().map(|k| k.id.clone()),
            keyframes,
            duration: duration.max(latest),
            cfg: cfg.clone(),
        })
    }

    // ----- accessors -----

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn selected(&self) -> Option<&KeyframeId> {
        self.selected.as_ref()
    }

    pub fn selected_keyframe(&self) -> Option<&Keyframe> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| &k.id == id)
    }

    fn index_of(&self, id: &KeyframeId) -> Result<usize, TimelineError> {
        self.keyframes
            .iter()
            .position(|k| &k.id == id)
            .ok_or_else(|| TimelineError::UnknownKeyframe(id.clone()))
    }

    /// Any keyframe other than `except` within the separation threshold of `time`.
    fn collides(&self, time: u32, except: Option<&KeyframeId>) -> bool {
        self.keyframes
            .iter()
            .filter(|k| Some(&k.id) != except)
            .any(|k| k.time.abs_diff(time) < self.cfg.min_separation_ms)
    }

    fn insert_sorted(&mut self, kf: Keyframe) {
        let at = self.keyframes.partition_point(|k| k.time <= kf.time);
        self.keyframes.insert(at, kf);
    }

    // ----- reads -----

    /// Pose at playhead `t` (ms). Never mutates.
    ///
    /// Interpolates (through the configured easing) between the latest keyframe
    /// at or before `t` and the earliest at or after it. Outside the keyframe
    /// range, or with a single keyframe, the nearest keyframe's pose is returned
    /// exactly. `None` only when the timeline is empty.
    pub fn scrub(&self, t: f64) -> Option<Pose> {
        match self.keyframes.as_slice() {
            [] => None,
            [only] => Some(only.pose.clone()),
            kfs => {
                let prev = kfs.iter().rev().find(|k| f64::from(k.time) <= t);
                let next = kfs.iter().find(|k| f64::from(k.time) >= t);
                match (prev, next) {
                    (Some(p), Some(n)) if p.id != n.id && n.time > p.time => {
                        let span = f64::from(n.time - p.time);
                        let progress = (t - f64::from(p.time)) / span;
                        Some(interpolate(
                            &p.pose,
                            &n.pose,
                            self.cfg.easing.apply(progress),
                        ))
                    }
                    (Some(k), _) | (None, Some(k)) => Some(k.pose.clone()),
                    (None, None) => None,
                }
            }
        }
    }

    /// Keyframes strictly before and strictly after `t`, nearest first.
    pub fn neighbors(&self, t: f64) -> (Option<&Keyframe>, Option<&Keyframe>) {
        let prev = self.keyframes.iter().rev().find(|k| f64::from(k.time) < t);
        let next = self.keyframes.iter().find(|k| f64::from(k.time) > t);
        (prev, next)
    }

    // ----- edits -----

    /// Insert a copy of `live` at `time`, or relative to the selection when
    /// `time` is already taken. The new keyframe becomes selected.
    pub fn add_keyframe(
        &mut self,
        time: f64,
        live: &Pose,
    ) -> Result<(u32, KeyframeId), TimelineError> {
        let requested = to_ms(time);
        let time = if !self.collides(requested, None) {
            requested
        } else {
            match self.relative_insert_time() {
                Ok(t) if !self.collides(t, None) => t,
                Ok(t) => {
                    log::warn!("add_keyframe: computed time {t} ms collides with an existing keyframe");
                    return Err(TimelineError::KeyframeCollision { time: t });
                }
                Err(err) => {
                    log::warn!("add_keyframe: {err}");
                    return Err(err);
                }
            }
        };

        let kf = Keyframe::new(time, live.clone());
        let id = kf.id.clone();
        self.insert_sorted(kf);
        if time > self.duration {
            self.duration = time;
        }
        self.selected = Some(id.clone());
        log::debug!("add_keyframe: {id} at {time} ms (duration {} ms)", self.duration);
        Ok((time, id))
    }

    /// Fallback insert time next to the selected keyframe.
    fn relative_insert_time(&self) -> Result<u32, TimelineError> {
        let id = self.selected.as_ref().ok_or(TimelineError::MissingSelection)?;
        let idx = self
            .keyframes
            .iter()
            .position(|k| &k.id == id)
            .ok_or(TimelineError::MissingSelection)?;
        let current = self.keyframes[idx].time;
        Ok(match self.keyframes.get(idx + 1) {
            Some(next) => current + (next.time - current) / 2,
            None if self.duration >= current.saturating_add(self.cfg.min_separation_ms) => {
                self.duration
            }
            None => current.saturating_add(self.cfg.extend_step_ms),
        })
    }

    /// Retime a keyframe. Returns the applied (clamped) time; the caller scrubs
    /// to it.
    pub fn move_keyframe(&mut self, id: &KeyframeId, new_time: f64) -> Result<u32, TimelineError> {
        let idx = self.index_of(id)?;
        let time = to_ms(new_time);
        if self.collides(time, Some(id)) {
            log::warn!("move_keyframe: {id} to {time} ms collides with another keyframe");
            return Err(TimelineError::KeyframeCollision { time });
        }
        let mut kf = self.keyframes.remove(idx);
        kf.time = time;
        self.insert_sorted(kf);
        if time > self.duration {
            self.duration = time;
        }
        log::debug!("move_keyframe: {id} now at {time} ms");
        Ok(time)
    }

    /// Select a keyframe; the caller snaps the live pose to the returned
    /// keyframe's pose.
    pub fn select_keyframe(&mut self, id: &KeyframeId) -> Result<&Keyframe, TimelineError> {
        let idx = self.index_of(id)?;
        self.selected = Some(id.clone());
        Ok(&self.keyframes[idx])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Overwrite the selected keyframe's pose. `false` when nothing is selected.
    pub fn sync_selected_pose(&mut self, pose: &Pose) -> bool {
        let Some(id) = self.selected.as_ref() else {
            return false;
        };
        match self.keyframes.iter_mut().find(|k| &k.id == id) {
            Some(kf) => {
                kf.pose = pose.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a keyframe; clears the selection if it pointed at it. The last
    /// remaining keyframe may be removed.
    pub fn delete_keyframe(&mut self, id: &KeyframeId) -> Result<Keyframe, TimelineError> {
        let idx = self.index_of(id)?;
        let removed = self.keyframes.remove(idx);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        log::debug!("delete_keyframe: {id} ({} left)", self.keyframes.len());
        Ok(removed)
    }

    /// Back to a single selected keyframe at 0 holding `live`, default duration.
    pub fn reset(&mut self, live: &Pose) {
        *self = Timeline::new(live, &self.cfg);
        log::debug!("timeline reset");
    }

    /// Set the duration, never below the latest keyframe. Returns the applied value.
    pub fn set_duration(&mut self, duration_ms: u32) -> u32 {
        let latest = self.keyframes.last().map(|k| k.time).unwrap_or(0);
        self.duration = duration_ms.max(latest);
        self.duration
    }
}
