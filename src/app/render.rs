use eframe::egui;
use rectlink::scene::{NodeId, Scene};

use super::{View, to_pos2, to_rect};

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, view: &View, grid: f32) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    let grid_color = egui::Color32::from_gray(60);
    let spacing_screen = grid * view.zoom;
    if spacing_screen >= 12.0 {
        let start = rect.min + view.pan_screen;
        let x0 = ((rect.min.x - start.x) / spacing_screen).floor() * spacing_screen + start.x;
        let y0 = ((rect.min.y - start.y) / spacing_screen).floor() * spacing_screen + start.y;
        let mut x = x0;
        while x < rect.max.x {
            painter.line_segment(
                [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
                egui::Stroke::new(1.0, grid_color),
            );
            x += spacing_screen;
        }
        let mut y = y0;
        while y < rect.max.y {
            painter.line_segment(
                [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
                egui::Stroke::new(1.0, grid_color),
            );
            y += spacing_screen;
        }
    }
}

fn screen_rect(origin: egui::Pos2, view: &View, world: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        view.world_to_screen(origin, world.min),
        view.world_to_screen(origin, world.max),
    )
}

pub(super) fn draw_canvas_bounds(painter: &egui::Painter, origin: egui::Pos2, view: &View, scene: &Scene) {
    let r = screen_rect(origin, view, to_rect(scene.bounds()));
    painter.rect_filled(r, 0.0, egui::Color32::from_gray(245));
    painter.rect_stroke(
        r,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
        egui::StrokeKind::Outside,
    );
}

/// Stable pseudo-random fill for a node, spread around the hue circle.
pub(super) fn node_fill(id: NodeId) -> egui::Color32 {
    let hue = (id.0 as f32 * 0.618_034).fract();
    egui::ecolor::Hsva::new(hue, 0.55, 0.9, 1.0).into()
}

pub(super) fn draw_connections(painter: &egui::Painter, origin: egui::Pos2, view: &View, scene: &Scene) {
    let stroke = egui::Stroke::new(3.0 * view.zoom, egui::Color32::BLACK);
    for conn in scene.connections() {
        let seg = conn.segment();
        painter.line_segment(
            [
                view.world_to_screen(origin, to_pos2(seg.start)),
                view.world_to_screen(origin, to_pos2(seg.end)),
            ],
            stroke,
        );
    }
}

pub(super) fn draw_nodes(painter: &egui::Painter, origin: egui::Pos2, view: &View, scene: &Scene) {
    let pending = scene.pending_source();
    for node in scene.nodes() {
        let Some(bounds) = scene.node_bounds(node.id()) else {
            continue;
        };
        let r = screen_rect(origin, view, to_rect(bounds));
        painter.rect_filled(r, 0.0, node_fill(node.id()));
        let stroke = if pending == Some(node.id()) {
            egui::Stroke::new(4.0, egui::Color32::RED)
        } else {
            egui::Stroke::new(1.0, egui::Color32::BLACK)
        };
        painter.rect_stroke(r, 0.0, stroke, egui::StrokeKind::Middle);
    }
}
