//! The main application window shown once the splash gives way

use eframe::egui::{self, Context};
use splash_core::{StartupStatus, WindowConfig};

/// State of the main window, built while the splash is visible
pub struct MainWindow {
    config: WindowConfig,
    startup: StartupStatus,
    show_about: bool,
}

impl MainWindow {
    /// Assemble the main window from the finished startup state
    pub fn new(config: WindowConfig, startup: StartupStatus) -> Self {
        Self {
            config,
            startup,
            show_about: false,
        }
    }

    /// Render the window for this frame
    pub fn ui(&mut self, ctx: &Context) {
        self.menu_bar(ctx);
        self.status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_content(ui);
        });

        if self.show_about {
            let mut open = self.show_about;
            egui::Window::new("About")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.config.title);
                    ui.label("A splash-screen demonstration application.");
                });
            self.show_about = open;
        }
    }

    fn menu_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.startup.errors.is_empty() {
                    ui.label(egui::RichText::new("startup complete").weak());
                } else {
                    ui.colored_label(
                        egui::Color32::from_rgb(220, 120, 110),
                        format!("{} startup step(s) failed", self.startup.errors.len()),
                    );
                }
            });
        });
    }

    fn central_content(&self, ui: &mut egui::Ui) {
        let available_size = ui.available_size();

        // Subtle grid pattern in the background
        let painter = ui.painter();
        let origin = ui.max_rect().min;
        let grid_color = egui::Color32::from_gray(30);
        let grid_spacing = 50.0;

        for i in 0..(available_size.x / grid_spacing) as i32 {
            let x = origin.x + i as f32 * grid_spacing;
            painter.line_segment(
                [
                    egui::pos2(x, origin.y),
                    egui::pos2(x, origin.y + available_size.y),
                ],
                egui::Stroke::new(1.0, grid_color),
            );
        }

        for i in 0..(available_size.y / grid_spacing) as i32 {
            let y = origin.y + i as f32 * grid_spacing;
            painter.line_segment(
                [
                    egui::pos2(origin.x, y),
                    egui::pos2(origin.x + available_size.x, y),
                ],
                egui::Stroke::new(1.0, grid_color),
            );
        }

        ui.vertical_centered(|ui| {
            ui.add_space(available_size.y * 0.3);
            ui.heading(egui::RichText::new(&self.config.title).size(40.0).strong());
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("The main window is up; the splash has done its job.")
                    .size(16.0)
                    .color(egui::Color32::from_gray(180)),
            );

            if !self.startup.errors.is_empty() {
                ui.add_space(24.0);
                for error in &self.startup.errors {
                    ui.colored_label(egui::Color32::from_rgb(220, 120, 110), error);
                }
            }
        });
    }
}
