mod app;

use tracing_subscriber::{EnvFilter, fmt};

fn main() -> eframe::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rectlink=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 580.0])
            .with_title("Rectangles"),
        ..Default::default()
    };
    eframe::run_native(
        "Rectangles",
        native_options,
        Box::new(|cc| Ok(Box::new(app::DiagramApp::new(cc)))),
    )
}
