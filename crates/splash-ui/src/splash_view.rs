//! The splash view
//!
//! Renders the animated logo each frame, reports loop boundaries and
//! clicks to the owner, and keeps repaints scheduled at frame granularity
//! so the animation runs even while the rest of the app is idle.

use std::time::Duration;

use egui::{
    Align2, Color32, ColorImage, Context, FontId, Pos2, Rect, TextureHandle, TextureOptions, Ui,
    Vec2,
};
use splash_anim::{Movie, Tick};
use splash_core::StartupStatus;
use tracing::trace;

use crate::logo::{self, PulseLogo};
use crate::theme;

/// Where the splash frames come from
pub enum LogoSource {
    /// Decoded animated GIF
    Movie(Movie),

    /// Procedurally painted logo
    Painted(PulseLogo),
}

impl LogoSource {
    fn advance(&mut self, dt: Duration) -> Tick {
        match self {
            LogoSource::Movie(movie) => movie.advance(dt),
            LogoSource::Painted(painted) => painted.advance(dt),
        }
    }

    fn restart(&mut self) {
        match self {
            LogoSource::Movie(movie) => movie.restart(),
            LogoSource::Painted(painted) => painted.restart(),
        }
    }

    /// Pixel size of the animation
    pub fn native_size(&self) -> (u32, u32) {
        match self {
            LogoSource::Movie(movie) => movie.size(),
            LogoSource::Painted(_) => logo::NATIVE_SIZE,
        }
    }
}

/// What happened during this frame of the splash
#[derive(Debug, Clone, Copy)]
pub struct SplashResponse {
    /// The user pressed the primary button over the splash
    pub clicked: bool,

    /// Animation progress for this frame
    pub tick: Tick,
}

/// Splash renderer holding the animation source and its GPU texture
pub struct SplashView {
    source: LogoSource,
    texture: Option<TextureHandle>,
}

impl SplashView {
    /// Splash backed by a decoded movie
    pub fn from_movie(movie: Movie) -> Self {
        Self {
            source: LogoSource::Movie(movie),
            texture: None,
        }
    }

    /// Splash backed by the painted fallback logo
    pub fn painted() -> Self {
        Self {
            source: LogoSource::Painted(PulseLogo::default()),
            texture: None,
        }
    }

    /// Pixel size of the animation, for sizing the splash window
    pub fn native_size(&self) -> (u32, u32) {
        self.source.native_size()
    }

    /// Play the animation again from its first frame
    pub fn restart_animation(&mut self) {
        self.source.restart();
    }

    /// Render one frame of the splash
    pub fn show(&mut self, ctx: &Context, status: &StartupStatus) -> SplashResponse {
        // stable_dt is huge on the first frame after a stall; cap it so the
        // animation does not jump a whole loop at once.
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        let tick = self.source.advance(Duration::from_secs_f32(dt));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::splash_backdrop()))
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let native = self.source.native_size();
                let size = fit_size(native, area.size() * 0.9);
                let rect = Rect::from_center_size(area.center(), size);

                match &mut self.source {
                    LogoSource::Movie(movie) => {
                        if self.texture.is_none() || tick.frame_changed {
                            let frame = movie.current_frame();
                            let image = ColorImage::from_rgba_unmultiplied(
                                [frame.buffer.width as usize, frame.buffer.height as usize],
                                &frame.buffer.rgba,
                            );
                            match &mut self.texture {
                                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                                None => {
                                    self.texture = Some(ctx.load_texture(
                                        "splash_frame",
                                        image,
                                        TextureOptions::LINEAR,
                                    ))
                                }
                            }
                        }
                        if let Some(texture) = &self.texture {
                            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                            ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
                        }
                    }
                    LogoSource::Painted(painted) => painted.paint(ui.painter(), rect),
                }

                paint_status(ui, area, status);
            });

        let clicked = ctx.input(|i| i.pointer.primary_clicked());
        if clicked {
            trace!("splash clicked");
        }

        // Keep frames coming even when no input arrives.
        match &self.source {
            LogoSource::Movie(movie) => {
                if let Some(wait) = movie.time_to_next_frame() {
                    ctx.request_repaint_after(wait);
                }
            }
            LogoSource::Painted(_) => ctx.request_repaint(),
        }

        SplashResponse { clicked, tick }
    }
}

/// Draw the startup status line and progress bar along the bottom edge
fn paint_status(ui: &Ui, area: Rect, status: &StartupStatus) {
    let painter = ui.painter();

    if let Some(error) = status.errors.last() {
        painter.text(
            Pos2::new(area.center().x, area.max.y - 36.0),
            Align2::CENTER_BOTTOM,
            error,
            FontId::proportional(11.0),
            Color32::from_rgb(220, 120, 110),
        );
    }

    if !status.message.is_empty() {
        painter.text(
            Pos2::new(area.center().x, area.max.y - 20.0),
            Align2::CENTER_BOTTOM,
            &status.message,
            FontId::proportional(13.0),
            Color32::from_gray(170),
        );
    }

    if let Some(progress) = status.progress {
        let bar_width = area.width() * 0.5;
        let bar = Rect::from_center_size(
            Pos2::new(area.center().x, area.max.y - 10.0),
            Vec2::new(bar_width, 3.0),
        );
        painter.rect_filled(bar, 1.5, Color32::from_gray(45));
        let filled = Rect::from_min_size(bar.min, Vec2::new(bar_width * progress, 3.0));
        painter.rect_filled(filled, 1.5, theme::accent_color());
    }
}

/// Scale `native` pixel dimensions to fit inside `available`, keeping aspect
pub fn fit_size(native: (u32, u32), available: Vec2) -> Vec2 {
    let (width, height) = native;
    if width == 0 || height == 0 || available.x <= 0.0 || available.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / width as f32).min(available.y / height as f32);
    Vec2::new(width as f32 * scale, height as f32 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_size_wide_into_square() {
        let size = fit_size((200, 100), Vec2::new(100.0, 100.0));
        assert_eq!(size, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_fit_size_tall_into_square() {
        let size = fit_size((100, 200), Vec2::new(100.0, 100.0));
        assert_eq!(size, Vec2::new(50.0, 100.0));
    }

    #[test]
    fn test_fit_size_upscales_small_frames() {
        let size = fit_size((10, 10), Vec2::new(80.0, 40.0));
        assert_eq!(size, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_fit_size_degenerate_input() {
        assert_eq!(fit_size((0, 10), Vec2::new(80.0, 40.0)), Vec2::ZERO);
        assert_eq!(fit_size((10, 10), Vec2::new(0.0, 40.0)), Vec2::ZERO);
    }
}
