use eframe::egui;
use rectlink::model;
use rectlink::scene::{NodeId, Scene};
use tracing::warn;

mod actions;
mod geometry;
mod help;
mod render;
mod settings;
mod update;

#[derive(Clone, Copy, Debug)]
struct View {
    pan_screen: egui::Vec2,
    zoom: f32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            pan_screen: egui::vec2(16.0, 16.0),
            zoom: 1.0,
        }
    }
}

impl View {
    fn world_to_screen(&self, origin: egui::Pos2, world: egui::Pos2) -> egui::Pos2 {
        origin + self.pan_screen + world.to_vec2() * self.zoom
    }

    fn screen_to_world(&self, origin: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        ((screen - origin - self.pan_screen) / self.zoom).to_pos2()
    }

    fn zoom_about_screen_point(
        &mut self,
        origin: egui::Pos2,
        screen_point: egui::Pos2,
        zoom_delta: f32,
    ) {
        let before = self.screen_to_world(origin, screen_point);
        self.zoom = (self.zoom * zoom_delta).clamp(0.25, 4.0);
        let after_screen = self.world_to_screen(origin, before);
        self.pan_screen += screen_point - after_screen;
    }
}

/// Node being dragged and where the pointer grabbed it, relative to its centre.
#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    node: NodeId,
    grab_offset: egui::Vec2,
}

pub struct DiagramApp {
    scene: Scene,
    view: View,
    active_drag: Option<ActiveDrag>,
    warning: Option<String>,
    status: Option<String>,
    grid_size: f32,
    hit_threshold: f32,
    show_help: bool,
}

impl DiagramApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config").join("rectlink.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();
        Self::from_settings(settings)
    }

    fn from_settings(settings: settings::AppSettings) -> Self {
        let scene = Scene::new(settings.scene).unwrap_or_else(|err| {
            warn!(%err, "invalid scene settings, using defaults");
            Scene::default()
        });
        Self {
            scene,
            view: View::default(),
            active_drag: None,
            warning: None,
            status: None,
            grid_size: settings.grid_size,
            hit_threshold: settings.hit_threshold,
            show_help: false,
        }
    }
}

fn to_pos2(p: model::Point) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

fn from_pos2(p: egui::Pos2) -> model::Point {
    model::Point::new(p.x, p.y)
}

fn to_rect(r: model::RectF) -> egui::Rect {
    egui::Rect::from_min_max(to_pos2(r.min), to_pos2(r.max))
}
