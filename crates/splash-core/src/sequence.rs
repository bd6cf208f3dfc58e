//! Launch sequencing between the display timer and the animation loop
//!
//! The splash stays up until the minimum display time has elapsed AND the
//! running animation loop has played out, or until the user clicks to skip
//! the wait. The sequencer is a pure state machine fed by the UI loop, so
//! the whole arrangement is testable without a window.

use std::time::Duration;

use tracing::{debug, info};

/// What the splash should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashDirective {
    /// Keep showing the splash
    Continue,

    /// The animation loop ended before the minimum display time; play it again
    RestartAnimation,

    /// Tear the splash down and show the main window
    Launch,
}

/// Tracks the two conditions that gate the launch
pub struct LaunchSequencer {
    min_display: Duration,
    shown_for: Duration,
    min_time_elapsed: bool,
    launched: bool,
}

impl LaunchSequencer {
    /// Create a sequencer that holds the splash for at least `min_display`
    pub fn new(min_display: Duration) -> Self {
        Self {
            min_display,
            shown_for: Duration::ZERO,
            min_time_elapsed: min_display.is_zero(),
            launched: false,
        }
    }

    /// Account for `dt` of on-screen time
    pub fn tick(&mut self, dt: Duration) -> SplashDirective {
        if self.launched {
            return SplashDirective::Continue;
        }
        self.shown_for += dt;
        if !self.min_time_elapsed && self.shown_for >= self.min_display {
            self.min_time_elapsed = true;
            debug!("minimum splash time elapsed after {:?}", self.shown_for);
        }
        SplashDirective::Continue
    }

    /// The animation reached the end of its loop
    ///
    /// Launches if the minimum display time is already behind us, otherwise
    /// asks for the animation to run once more.
    pub fn on_loop_finished(&mut self) -> SplashDirective {
        if self.launched {
            return SplashDirective::Continue;
        }
        if self.min_time_elapsed {
            self.launch()
        } else {
            SplashDirective::RestartAnimation
        }
    }

    /// The user clicked the splash: skip the wait entirely
    pub fn request_skip(&mut self) -> SplashDirective {
        if self.launched {
            return SplashDirective::Continue;
        }
        info!("splash skipped by user after {:?}", self.shown_for);
        self.launch()
    }

    fn launch(&mut self) -> SplashDirective {
        self.launched = true;
        SplashDirective::Launch
    }

    /// How long the splash has been on screen
    pub fn shown_for(&self) -> Duration {
        self.shown_for
    }

    /// Whether the minimum display time is behind us
    pub fn min_time_elapsed(&self) -> bool {
        self.min_time_elapsed
    }

    /// Whether the launch already fired
    pub fn launched(&self) -> bool {
        self.launched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(min_ms: u64) -> LaunchSequencer {
        LaunchSequencer::new(Duration::from_millis(min_ms))
    }

    #[test]
    fn test_loop_before_min_time_restarts() {
        let mut seq = sequencer(3000);
        seq.tick(Duration::from_millis(1000));
        assert_eq!(seq.on_loop_finished(), SplashDirective::RestartAnimation);
        assert!(!seq.launched());
    }

    #[test]
    fn test_loop_after_min_time_launches() {
        let mut seq = sequencer(3000);
        seq.tick(Duration::from_millis(3500));
        assert!(seq.min_time_elapsed());
        assert_eq!(seq.on_loop_finished(), SplashDirective::Launch);
        assert!(seq.launched());
    }

    #[test]
    fn test_min_time_alone_does_not_launch() {
        let mut seq = sequencer(100);
        assert_eq!(seq.tick(Duration::from_millis(500)), SplashDirective::Continue);
        assert!(!seq.launched());
    }

    #[test]
    fn test_skip_launches_immediately() {
        let mut seq = sequencer(3000);
        seq.tick(Duration::from_millis(10));
        assert_eq!(seq.request_skip(), SplashDirective::Launch);
    }

    #[test]
    fn test_launch_fires_only_once() {
        let mut seq = sequencer(0);
        assert_eq!(seq.on_loop_finished(), SplashDirective::Launch);
        assert_eq!(seq.on_loop_finished(), SplashDirective::Continue);
        assert_eq!(seq.request_skip(), SplashDirective::Continue);
        assert_eq!(seq.tick(Duration::from_millis(16)), SplashDirective::Continue);
    }

    #[test]
    fn test_zero_min_display_launches_on_first_loop() {
        let mut seq = sequencer(0);
        assert!(seq.min_time_elapsed());
        assert_eq!(seq.on_loop_finished(), SplashDirective::Launch);
    }

    #[test]
    fn test_shown_for_accumulates() {
        let mut seq = sequencer(1000);
        seq.tick(Duration::from_millis(400));
        seq.tick(Duration::from_millis(400));
        assert_eq!(seq.shown_for(), Duration::from_millis(800));
        assert!(!seq.min_time_elapsed());
        seq.tick(Duration::from_millis(400));
        assert!(seq.min_time_elapsed());
    }
}
