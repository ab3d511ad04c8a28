use eframe::egui;

use super::render::{draw_background, draw_canvas_bounds, draw_connections, draw_nodes};
use super::DiagramApp;

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = !self.show_help;
            }
            if wants_keyboard {
                return;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.scene.clear_pending();
                self.status = None;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
            {
                self.delete_pending_node();
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", self.view.zoom * 100.0));
                    ui.separator();
                    ui.label(format!("Connections: {}", self.scene.connections().len()));
                    ui.separator();
                    ui.label(format!("Rectangles: {}", self.scene.nodes().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let zoom_delta = (1.0 + scroll_delta * 0.001).clamp(0.8, 1.25);
                        self.view.zoom_about_screen_point(origin, hover_pos, zoom_delta);
                    }
                }
            }

            let pointer_pos = ctx.input(|i| i.pointer.interact_pos());
            let pointer_world = pointer_pos.map(|p| self.view.screen_to_world(origin, p));

            if response.double_clicked() {
                if let Some(world_pos) = pointer_world {
                    self.handle_double_click(world_pos);
                }
            }

            if response.drag_started() {
                let press = ctx.input(|i| i.pointer.press_origin()).or(pointer_pos);
                if let Some(p) = press {
                    self.start_drag(self.view.screen_to_world(origin, p));
                }
            }
            if response.dragged() {
                if let Some(world_pos) = pointer_world {
                    self.continue_drag(world_pos);
                }
            }
            if response.drag_stopped() {
                self.finish_drag();
            }

            let painter = ui.painter_at(rect);
            draw_background(&painter, rect, &self.view, self.grid_size);
            draw_canvas_bounds(&painter, origin, &self.view, &self.scene);
            draw_connections(&painter, origin, &self.view, &self.scene);
            draw_nodes(&painter, origin, &self.view, &self.scene);
        });

        if let Some(message) = self.warning.clone() {
            let mut open = true;
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.warning = None;
                    }
                });
            if !open {
                self.warning = None;
            }
        }

        super::help::draw_help_window(ctx, &mut self.show_help);
    }
}
