use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help")
        .open(open)
        .resizable(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.heading("Mouse");
            ui.separator();
            help_row(ui, "Double-click empty canvas", "Create a rectangle");
            help_row(ui, "Double-click a rectangle", "Select it for a connection");
            help_row(ui, "Double-click a second one", "Connect the two");
            help_row(ui, "Double-click the same one", "Cancel the selection");
            help_row(ui, "Double-click a line", "Delete the connection");
            help_row(ui, "Drag a rectangle", "Move it, overlaps are pushed aside on release");
            help_row(ui, "Scroll wheel", "Zoom in/out");

            ui.add_space(10.0);
            ui.heading("Keyboard");
            ui.separator();
            help_row(ui, "Escape", "Cancel the connection selection");
            help_row(ui, "Delete / Backspace", "Delete the selected rectangle");
            help_row(ui, "F1", "Toggle this window");
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(shortcut).monospace().strong());
        ui.label(description);
    });
}
