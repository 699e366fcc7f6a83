//! Frame-capped playback clock.
//!
//! The host calls [`Playback::tick`] from its per-frame callback with a
//! monotonic wall-clock time. The playhead is always derived from an anchor
//! `(wall time, playhead)` captured on the first admitted tick after any
//! play/seek/boundary event, so pausing, resuming and seeking never accumulate
//! drift.

use serde::{Deserialize, Serialize};

/// End-of-range policy.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop at the end, emitting the final time.
    #[default]
    Once,
    /// Wrap to 0.
    Loop,
    /// Reverse direction at each boundary.
    PingPong,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Anchor {
    wall_ms: f64,
    playhead_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    time_ms: f64,
    playing: bool,
    reversing: bool,
    loop_mode: LoopMode,
    frame_rate: f64,
    speed: f64,
    anchor: Option<Anchor>,
    last_frame_ms: Option<f64>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(LoopMode::Once, 60.0, 1.0)
    }
}

impl Playback {
    pub fn new(loop_mode: LoopMode, frame_rate: f64, speed: f64) -> Self {
        let mut pb = Self {
            time_ms: 0.0,
            playing: false,
            reversing: false,
            loop_mode,
            frame_rate: 60.0,
            speed: 1.0,
            anchor: None,
            last_frame_ms: None,
        };
        pb.set_frame_rate(frame_rate);
        pb.set_speed(speed);
        pb
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Start playing. At or past the end, restarts from 0 going forward.
    pub fn play(&mut self, duration_ms: u32) {
        if self.time_ms >= f64::from(duration_ms) {
            self.time_ms = 0.0;
            self.reversing = false;
        }
        self.playing = true;
        self.anchor = None;
        self.last_frame_ms = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.anchor = None;
    }

    /// Pause and rewind to 0.
    pub fn stop(&mut self) {
        self.pause();
        self.time_ms = 0.0;
        self.reversing = false;
    }

    pub fn toggle(&mut self, duration_ms: u32) {
        if self.playing {
            self.pause();
        } else {
            self.play(duration_ms);
        }
    }

    /// Move the playhead. Negative times clamp to 0.
    pub fn seek(&mut self, time_ms: f64) {
        self.time_ms = if time_ms.is_finite() { time_ms.max(0.0) } else { 0.0 };
        self.anchor = None;
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        if mode != LoopMode::PingPong {
            self.reversing = false;
        }
        self.anchor = None;
    }

    /// Ignored (with a warning) unless finite and positive.
    pub fn set_frame_rate(&mut self, fps: f64) {
        if fps.is_finite() && fps > 0.0 {
            self.frame_rate = fps;
            self.anchor = None;
        } else {
            log::warn!("playback: ignoring frame rate {fps}");
        }
    }

    /// Ignored (with a warning) unless finite and positive.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
            self.anchor = None;
        } else {
            log::warn!("playback: ignoring speed {speed}");
        }
    }

    /// Advance to wall time `now_ms`. Returns the playhead to display when a
    /// frame is admitted, `None` when paused or throttled.
    pub fn tick(&mut self, now_ms: f64, duration_ms: u32) -> Option<f64> {
        if !self.playing {
            return None;
        }
        if let Some(last) = self.last_frame_ms {
            if now_ms - last < 1000.0 / self.frame_rate {
                return None;
            }
        }
        self.last_frame_ms = Some(now_ms);

        let end = f64::from(duration_ms);
        let anchor = *self.anchor.get_or_insert(Anchor {
            wall_ms: now_ms,
            playhead_ms: self.time_ms,
        });
        let elapsed = (now_ms - anchor.wall_ms).max(0.0) * self.speed;

        if self.reversing {
            let t = anchor.playhead_ms - elapsed;
            if t > 0.0 {
                self.time_ms = t;
            } else if self.loop_mode == LoopMode::PingPong {
                self.reversing = false;
                self.rebase(now_ms, 0.0);
                log::debug!("playback: ping-pong turn at 0");
            } else {
                self.time_ms = 0.0;
                self.playing = false;
                self.anchor = None;
            }
            return Some(self.time_ms);
        }

        let t = anchor.playhead_ms + elapsed;
        if t < end {
            self.time_ms = t;
            return Some(t);
        }
        match self.loop_mode {
            LoopMode::Once => {
                self.time_ms = end;
                self.playing = false;
                self.anchor = None;
                log::debug!("playback: reached end at {end} ms");
            }
            LoopMode::Loop => {
                self.rebase(now_ms, 0.0);
                log::debug!("playback: looped");
            }
            LoopMode::PingPong => {
                self.reversing = true;
                self.rebase(now_ms, end);
                log::debug!("playback: ping-pong turn at {end} ms");
            }
        }
        Some(self.time_ms)
    }

    fn rebase(&mut self, now_ms: f64, playhead_ms: f64) {
        self.time_ms = playhead_ms;
        self.anchor = Some(Anchor {
            wall_ms: now_ms,
            playhead_ms,
        });
    }
}
