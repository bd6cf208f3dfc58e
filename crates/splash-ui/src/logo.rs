//! Painted fallback logo animation
//!
//! Used when no animated GIF is configured. The logo is drawn with the
//! egui painter every frame, but it still has a fixed cycle length so loop
//! boundaries work the same way they do for a decoded movie: the animation
//! stops at the end of its cycle and the owner restarts it or launches.

use std::f32::consts::TAU;
use std::time::Duration;

use egui::{Color32, Painter, Pos2, Rect, Stroke};
use splash_anim::Tick;

/// Pixel size the logo is designed for, used to size the splash window
pub const NATIVE_SIZE: (u32, u32) = (360, 260);

/// Procedurally painted logo with a fixed loop length
pub struct PulseLogo {
    cycle: Duration,
    in_cycle: Duration,
    finished: bool,
}

impl Default for PulseLogo {
    fn default() -> Self {
        Self::new(Duration::from_millis(2400))
    }
}

impl PulseLogo {
    /// Create a logo animation with the given cycle length
    pub fn new(cycle: Duration) -> Self {
        Self {
            cycle: cycle.max(Duration::from_millis(100)),
            in_cycle: Duration::ZERO,
            finished: false,
        }
    }

    /// Advance the animation clock by `dt`
    pub fn advance(&mut self, dt: Duration) -> Tick {
        if self.finished {
            return Tick::default();
        }
        self.in_cycle += dt;
        if self.in_cycle >= self.cycle {
            self.in_cycle = Duration::ZERO;
            self.finished = true;
            return Tick {
                frame_changed: true,
                loop_finished: true,
            };
        }
        Tick {
            frame_changed: true,
            loop_finished: false,
        }
    }

    /// Rewind to the start of the cycle and resume
    pub fn restart(&mut self) {
        self.in_cycle = Duration::ZERO;
        self.finished = false;
    }

    /// Position within the cycle, 0..1
    pub fn phase(&self) -> f32 {
        self.in_cycle.as_secs_f32() / self.cycle.as_secs_f32()
    }

    /// Whether the cycle has played out
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Paint the logo into `rect`
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let center = rect.center();
        let scale = rect.width().min(rect.height()) * 0.5;
        let phase = self.phase();
        let angle = phase * TAU;

        let core_color = Color32::from_rgb(110, 170, 240);
        let ring_color = Color32::from_rgb(70, 110, 160);
        let satellite_color = Color32::from_rgb(200, 220, 245);

        // Soft glow behind the core, brighter mid-cycle
        let glow = 0.5 + 0.5 * (angle.sin().abs());
        for i in 0..4 {
            let alpha = (18.0 * glow) as u8 / (i + 1) as u8;
            painter.circle_filled(
                center,
                scale * (0.38 + i as f32 * 0.06),
                Color32::from_rgba_premultiplied(20, 40, 70, alpha),
            );
        }

        // Pulsing core
        let core_radius = scale * (0.28 + 0.05 * angle.sin());
        painter.circle_filled(center, core_radius, core_color);
        painter.circle_filled(
            center,
            core_radius * 0.55,
            Color32::from_rgb(160, 200, 250),
        );

        // Orbit ring
        painter.circle_stroke(center, scale * 0.62, Stroke::new(1.5, ring_color));

        // Three satellites sweeping the ring, evenly spaced
        for k in 0..3 {
            let theta = angle + k as f32 * (TAU / 3.0);
            let pos = Pos2::new(
                center.x + scale * 0.62 * theta.cos(),
                center.y + scale * 0.62 * theta.sin(),
            );
            let radius = scale * (0.05 + 0.015 * (angle * 2.0 + k as f32).sin());
            painter.circle_filled(pos, radius, satellite_color);
        }

        // Trailing dots fade out behind the first satellite
        for t in 1u8..5 {
            let theta = angle - t as f32 * 0.18;
            let pos = Pos2::new(
                center.x + scale * 0.62 * theta.cos(),
                center.y + scale * 0.62 * theta.sin(),
            );
            let alpha = 120u8.saturating_sub(t * 28);
            painter.circle_filled(
                pos,
                scale * 0.025,
                Color32::from_rgba_premultiplied(alpha, alpha, alpha, alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progresses() {
        let mut logo = PulseLogo::new(Duration::from_millis(1000));
        assert_eq!(logo.phase(), 0.0);
        logo.advance(Duration::from_millis(250));
        assert!((logo.phase() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_cycle_end_reports_loop() {
        let mut logo = PulseLogo::new(Duration::from_millis(500));
        let tick = logo.advance(Duration::from_millis(600));
        assert!(tick.loop_finished);
        assert!(logo.is_finished());

        // Stays stopped until restarted.
        assert_eq!(logo.advance(Duration::from_millis(100)), Tick::default());
        logo.restart();
        assert!(!logo.is_finished());
        assert_eq!(logo.phase(), 0.0);
    }

    #[test]
    fn test_tiny_cycle_clamped() {
        let logo = PulseLogo::new(Duration::ZERO);
        assert!(logo.cycle >= Duration::from_millis(100));
    }
}
