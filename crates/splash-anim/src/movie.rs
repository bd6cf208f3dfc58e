//! Frame playback engine
//!
//! A `Movie` owns a decoded frame sequence and converts elapsed wall-clock
//! time into frame changes. Playback speed starts at native rate and is
//! bumped on every frame change, so each loop plays faster than the one
//! before it. Reaching the end of the last frame stops the movie; the owner
//! decides whether to restart it or tear the splash down.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::frames::Frame;
use crate::gif::AnimError;

/// Per-frame playback acceleration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedRamp {
    /// Percentage points added to the playback speed on every frame change
    pub step_percent: u32,

    /// Upper bound for the playback speed, in percent of native rate
    pub max_percent: u32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            step_percent: 20,
            max_percent: 400,
        }
    }
}

impl SpeedRamp {
    /// A ramp that never changes the playback speed
    pub fn none() -> Self {
        Self {
            step_percent: 0,
            max_percent: 100,
        }
    }

    fn bump(&self, speed_percent: u32) -> u32 {
        (speed_percent + self.step_percent).min(self.max_percent.max(100))
    }
}

/// What happened during a call to [`Movie::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// The displayed frame changed; the texture needs a re-upload
    pub frame_changed: bool,

    /// The final frame of the loop finished displaying
    pub loop_finished: bool,
}

/// Playback state over a decoded frame sequence
pub struct Movie {
    frames: Vec<Frame>,
    current: usize,
    in_frame: Duration,
    speed_percent: u32,
    ramp: SpeedRamp,
    loops_completed: u64,
    finished: bool,
}

impl Movie {
    /// Create a movie from decoded frames
    pub fn new(frames: Vec<Frame>, ramp: SpeedRamp) -> Result<Self, AnimError> {
        if frames.is_empty() {
            return Err(AnimError::Empty);
        }
        Ok(Self {
            frames,
            current: 0,
            in_frame: Duration::ZERO,
            speed_percent: 100,
            ramp,
            loops_completed: 0,
            finished: false,
        })
    }

    /// Advance playback by `dt` of wall-clock time
    ///
    /// Time is scaled by the current playback speed before it is charged
    /// against the current frame's delay. A finished movie does not advance.
    pub fn advance(&mut self, dt: Duration) -> Tick {
        let mut tick = Tick::default();
        if self.finished {
            return tick;
        }

        self.in_frame += dt.mul_f64(self.speed_percent as f64 / 100.0);

        loop {
            let delay = self.frames[self.current].delay;
            if self.in_frame < delay {
                break;
            }
            self.in_frame -= delay;
            tick.frame_changed = true;
            self.speed_percent = self.ramp.bump(self.speed_percent);

            if self.current + 1 == self.frames.len() {
                // End of the loop: stop and report the boundary. Restarting
                // is the owner's call.
                self.current = 0;
                self.in_frame = Duration::ZERO;
                self.loops_completed += 1;
                self.finished = true;
                tick.loop_finished = true;
                break;
            }
            self.current += 1;
        }

        tick
    }

    /// Rewind to the first frame and resume playback
    ///
    /// The ramped-up playback speed carries over, so every restarted loop
    /// runs faster than the previous one.
    pub fn restart(&mut self) {
        self.current = 0;
        self.in_frame = Duration::ZERO;
        self.finished = false;
    }

    /// Wall-clock time until the next frame is due, `None` once finished
    pub fn time_to_next_frame(&self) -> Option<Duration> {
        if self.finished {
            return None;
        }
        let delay = self.frames[self.current].delay;
        let remaining = delay.saturating_sub(self.in_frame);
        Some(remaining.mul_f64(100.0 / self.speed_percent as f64))
    }

    /// The frame currently on display
    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    /// Index of the frame currently on display
    pub fn frame_index(&self) -> usize {
        self.current
    }

    /// Frame dimensions as (width, height)
    pub fn size(&self) -> (u32, u32) {
        self.frames[0].buffer.size()
    }

    /// Current playback speed in percent of native rate
    pub fn speed_percent(&self) -> u32 {
        self.speed_percent
    }

    /// Number of loop boundaries reached so far
    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }

    /// Whether playback stopped at the end of the loop
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameBuffer;

    fn test_frames(count: usize, delay_ms: u64) -> Vec<Frame> {
        (0..count)
            .map(|i| {
                let shade = (i * 40) as u8;
                let buffer = FrameBuffer::new(2, 2, vec![shade; 16]);
                Frame::new(buffer, Duration::from_millis(delay_ms))
            })
            .collect()
    }

    #[test]
    fn test_empty_movie_rejected() {
        assert!(Movie::new(Vec::new(), SpeedRamp::none()).is_err());
    }

    #[test]
    fn test_advance_within_frame() {
        let mut movie = Movie::new(test_frames(3, 100), SpeedRamp::none()).unwrap();
        let tick = movie.advance(Duration::from_millis(50));
        assert_eq!(tick, Tick::default());
        assert_eq!(movie.frame_index(), 0);
    }

    #[test]
    fn test_frame_boundary() {
        let mut movie = Movie::new(test_frames(3, 100), SpeedRamp::none()).unwrap();
        let tick = movie.advance(Duration::from_millis(120));
        assert!(tick.frame_changed);
        assert!(!tick.loop_finished);
        assert_eq!(movie.frame_index(), 1);
    }

    #[test]
    fn test_loop_finish_stops_playback() {
        let mut movie = Movie::new(test_frames(2, 100), SpeedRamp::none()).unwrap();
        let tick = movie.advance(Duration::from_millis(250));
        assert!(tick.loop_finished);
        assert!(movie.is_finished());
        assert_eq!(movie.loops_completed(), 1);

        // A finished movie stays put until restarted.
        let tick = movie.advance(Duration::from_millis(500));
        assert_eq!(tick, Tick::default());

        movie.restart();
        assert!(!movie.is_finished());
        assert_eq!(movie.frame_index(), 0);
    }

    #[test]
    fn test_speed_ramp_accelerates() {
        let ramp = SpeedRamp {
            step_percent: 100,
            max_percent: 800,
        };
        let mut movie = Movie::new(test_frames(3, 100), ramp).unwrap();

        let tick = movie.advance(Duration::from_millis(100));
        assert!(tick.frame_changed);
        assert_eq!(movie.speed_percent(), 200);

        // At 200% speed, 50ms of wall-clock time covers the 100ms frame.
        let tick = movie.advance(Duration::from_millis(50));
        assert!(tick.frame_changed);
        assert_eq!(movie.frame_index(), 2);
    }

    #[test]
    fn test_speed_ramp_cap() {
        let ramp = SpeedRamp {
            step_percent: 300,
            max_percent: 400,
        };
        let mut movie = Movie::new(test_frames(4, 10), ramp).unwrap();
        movie.advance(Duration::from_millis(10));
        movie.advance(Duration::from_millis(10));
        assert_eq!(movie.speed_percent(), 400);
    }

    #[test]
    fn test_speed_persists_across_restart() {
        let ramp = SpeedRamp {
            step_percent: 50,
            max_percent: 400,
        };
        let mut movie = Movie::new(test_frames(2, 100), ramp).unwrap();
        movie.advance(Duration::from_millis(250));
        assert!(movie.is_finished());
        let ramped = movie.speed_percent();
        assert!(ramped > 100);

        movie.restart();
        assert_eq!(movie.speed_percent(), ramped);
    }

    #[test]
    fn test_single_frame_still_loops() {
        let mut movie = Movie::new(test_frames(1, 80), SpeedRamp::none()).unwrap();
        let tick = movie.advance(Duration::from_millis(100));
        assert!(tick.loop_finished);
        assert!(movie.is_finished());
    }

    #[test]
    fn test_time_to_next_frame_scales_with_speed() {
        let ramp = SpeedRamp {
            step_percent: 100,
            max_percent: 400,
        };
        let mut movie = Movie::new(test_frames(3, 100), ramp).unwrap();
        assert_eq!(movie.time_to_next_frame(), Some(Duration::from_millis(100)));

        movie.advance(Duration::from_millis(100));
        assert_eq!(movie.speed_percent(), 200);
        assert_eq!(movie.time_to_next_frame(), Some(Duration::from_millis(50)));

        // Half of the second frame at 200% speed.
        movie.advance(Duration::from_millis(25));
        assert_eq!(movie.time_to_next_frame(), Some(Duration::from_millis(25)));

        assert!(movie.advance(Duration::from_millis(200)).loop_finished);
        assert_eq!(movie.time_to_next_frame(), None);
    }
}
