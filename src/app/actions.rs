use eframe::egui;
use rectlink::SceneError;
use rectlink::placement::ResolveStatus;
use rectlink::scene::Selection;
use tracing::{debug, warn};

use super::geometry::{nearest_connection, topmost_node};
use super::{ActiveDrag, DiagramApp, from_pos2, to_pos2};

impl DiagramApp {
    /// Double-click: connect via a node, delete a line, or create a node.
    pub(super) fn handle_double_click(&mut self, world_pos: egui::Pos2) {
        if let Some(node) = topmost_node(&self.scene, world_pos) {
            match self.scene.select_for_connection(node) {
                Ok(Selection::Pending(id)) => {
                    self.status = Some(format!("Node {id} selected, double-click another to connect"));
                }
                Ok(Selection::Cleared) => self.status = None,
                Ok(Selection::Connected(conn)) => {
                    self.status = Some(format!("Connection {conn} created"));
                }
                Err(err) => self.status = Some(err.to_string()),
            }
            return;
        }

        let threshold_world = self.hit_threshold / self.view.zoom;
        if let Some(conn) = nearest_connection(&self.scene, world_pos, threshold_world) {
            if let Err(err) = self.scene.delete_connection(conn) {
                self.status = Some(err.to_string());
            }
            return;
        }

        match self.scene.try_create(from_pos2(world_pos)) {
            Ok(_) => {}
            Err(SceneError::OutOfBounds) => {
                self.warning = Some("Not enough room inside the canvas.".to_string());
            }
            Err(SceneError::Overlap { with }) => {
                self.warning = Some(format!("The new rectangle would overlap node {with}."));
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub(super) fn start_drag(&mut self, world_pos: egui::Pos2) {
        let Some(node) = topmost_node(&self.scene, world_pos) else {
            return;
        };
        let Some(center) = self.scene.node(node).map(|n| to_pos2(n.center())) else {
            return;
        };
        if self.scene.begin_drag(node).is_ok() {
            self.active_drag = Some(ActiveDrag {
                node,
                grab_offset: world_pos - center,
            });
        }
    }

    pub(super) fn continue_drag(&mut self, world_pos: egui::Pos2) {
        let Some(drag) = self.active_drag else {
            return;
        };
        let center = world_pos - drag.grab_offset;
        if let Err(err) = self.scene.drag_to(drag.node, from_pos2(center)) {
            debug!(%err, "dragged node vanished");
            self.active_drag = None;
        }
    }

    pub(super) fn finish_drag(&mut self) {
        let Some(drag) = self.active_drag.take() else {
            return;
        };
        match self.scene.end_drag(drag.node) {
            Ok(resolution) if resolution.status == ResolveStatus::Reverted => {
                warn!(
                    node = %drag.node,
                    iterations = resolution.iterations,
                    "no free spot found, node returned to its previous position"
                );
                self.status = Some("No free spot nearby, rectangle moved back".to_string());
            }
            Ok(_) => self.status = None,
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub(super) fn delete_pending_node(&mut self) {
        let Some(node) = self.scene.pending_source() else {
            return;
        };
        if self.active_drag.is_some_and(|d| d.node == node) {
            self.active_drag = None;
        }
        match self.scene.remove_node(node) {
            Ok(()) => self.status = Some(format!("Node {node} deleted")),
            Err(err) => self.status = Some(err.to_string()),
        }
    }
}
