//! Main application entry point
//!
//! Opens a borderless, always-on-top splash window playing the logo
//! animation while startup tasks build the main-window state on the
//! runtime, then restores window chrome and hands over to the main window.

use std::time::Duration;

use anyhow::Result;
use eframe::egui::{self, Context};
use tracing::{info, warn};

use splash_anim::{gif, Movie};
use splash_core::{
    run_tasks, LaunchSequencer, SplashConfig, SplashDirective, StartupHandle, StatusSink,
};
use splash_ui::{SplashView, Theme};

mod main_window;
mod tasks;

use main_window::MainWindow;

/// Splash-phase state, dropped when the main window takes over
struct SplashState {
    view: SplashView,
    sequencer: LaunchSequencer,
}

/// Main application state
struct SplashApp {
    config: SplashConfig,

    /// Tokio runtime running the startup tasks
    _runtime: tokio::runtime::Runtime,

    /// Progress published by the startup tasks
    status: StatusSink,

    /// Receives the main window once startup work finishes
    startup: StartupHandle<MainWindow>,

    /// Present while the splash is on screen
    splash: Option<SplashState>,

    /// Present once launched
    main: Option<MainWindow>,
}

impl SplashApp {
    fn new(cc: &eframe::CreationContext<'_>, config: SplashConfig, view: SplashView) -> Self {
        splash_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let runtime = tokio::runtime::Runtime::new().unwrap();

        let status = StatusSink::new();
        let task_status = status.clone();
        let window_config = config.window.clone();
        let repaint_ctx = cc.egui_ctx.clone();

        // Build the main window on the runtime while the splash animates.
        let startup = StartupHandle::spawn(
            runtime.handle(),
            async move {
                let startup_tasks = tasks::startup_tasks();
                run_tasks(&startup_tasks, &task_status).await;
                MainWindow::new(window_config, task_status.snapshot())
            },
            move || repaint_ctx.request_repaint(),
        );

        let sequencer = LaunchSequencer::new(config.min_display);

        Self {
            config,
            _runtime: runtime,
            status,
            startup,
            splash: Some(SplashState { view, sequencer }),
            main: None,
        }
    }

    /// Restore normal window chrome for the main window
    fn configure_main_viewport(&self, ctx: &Context) {
        let [width, height] = self.config.window.main_size;
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Resizable(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(egui::WindowLevel::Normal));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(width, height)));
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(
            self.config.window.title.clone(),
        ));
    }
}

impl eframe::App for SplashApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(window) = &mut self.main {
            window.ui(ctx);
            return;
        }

        let Some(splash) = &mut self.splash else {
            return;
        };

        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        splash.sequencer.tick(Duration::from_secs_f32(dt));

        let status = self.status.snapshot();
        let response = splash.view.show(ctx, &status);

        // A click skips the wait; a finished loop consults the gate.
        if response.clicked {
            splash.sequencer.request_skip();
        }
        if response.tick.loop_finished {
            if let SplashDirective::RestartAnimation = splash.sequencer.on_loop_finished() {
                splash.view.restart_animation();
                // The view saw a stopped movie this frame and scheduled no
                // repaint; keep the loop going.
                ctx.request_repaint();
            }
        }

        let launched = splash.sequencer.launched();
        if launched && response.tick.loop_finished && !self.startup.is_ready() {
            // The gate is open but startup work is still running; keep the
            // animation moving instead of freezing on the last frame.
            splash.view.restart_animation();
            ctx.request_repaint();
        }
        let shown_for = splash.sequencer.shown_for();

        if launched {
            if let Some(window) = self.startup.take() {
                info!("launching main window after {:?} of splash", shown_for);
                self.configure_main_viewport(ctx);
                self.splash = None;
                self.main = Some(window);
                ctx.request_repaint();
            }
        }
    }
}

/// Build the splash view from config: a decoded GIF when configured and
/// loadable, the painted logo otherwise
fn build_splash_view(config: &SplashConfig) -> SplashView {
    let Some(path) = &config.logo else {
        return SplashView::painted();
    };

    match gif::load(path).and_then(|frames| Movie::new(frames, config.speed_ramp)) {
        Ok(movie) => SplashView::from_movie(movie),
        Err(e) => {
            warn!("falling back to painted logo, {:?} unusable: {}", path, e);
            SplashView::painted()
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = SplashConfig::load_default()?;
    info!("starting {}", config.window.title);

    let view = build_splash_view(&config);
    let (native_width, native_height) = view.native_size();
    let splash_size = config
        .window
        .splash_size
        .map(|[w, h]| egui::vec2(w, h))
        .unwrap_or_else(|| egui::vec2(native_width as f32, native_height as f32));

    let title = config.window.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(splash_size)
            .with_decorations(false)
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_active(true),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(SplashApp::new(cc, config, view))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run app: {}", e))?;

    Ok(())
}

// Windows-specific: Hide console window in release builds
#[cfg(all(windows, not(debug_assertions)))]
fn hide_console_window() {
    use winapi::um::wincon::GetConsoleWindow;
    use winapi::um::winuser::{ShowWindow, SW_HIDE};

    unsafe {
        let window = GetConsoleWindow();
        if !window.is_null() {
            ShowWindow(window, SW_HIDE);
        }
    }
}

#[cfg(all(windows, not(debug_assertions)))]
#[no_mangle]
pub extern "system" fn mainCRTStartup() {
    hide_console_window();
    std::process::exit(main().map(|_| 0).unwrap_or(1));
}
