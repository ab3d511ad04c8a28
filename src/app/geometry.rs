use eframe::egui;
use rectlink::scene::{ConnectionId, NodeId, Scene};

use super::{from_pos2, to_pos2};

pub(super) fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len2 = ab.x * ab.x + ab.y * ab.y;
    if ab_len2 <= f32::EPSILON {
        return (p - a).length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / ab_len2;
    let t = t.clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length()
}

/// Most recently created node under `world_pos`.
pub(super) fn topmost_node(scene: &Scene, world_pos: egui::Pos2) -> Option<NodeId> {
    let p = from_pos2(world_pos);
    scene.nodes().iter().rev().find_map(|node| {
        let bounds = scene.node_bounds(node.id())?;
        bounds.contains(p).then_some(node.id())
    })
}

/// Closest connection within `threshold_world` of `world_pos`.
pub(super) fn nearest_connection(
    scene: &Scene,
    world_pos: egui::Pos2,
    threshold_world: f32,
) -> Option<ConnectionId> {
    scene
        .connections()
        .iter()
        .map(|c| {
            let seg = c.segment();
            let d = distance_to_segment(world_pos, to_pos2(seg.start), to_pos2(seg.end));
            (c.id(), d)
        })
        .filter(|(_, d)| *d <= threshold_world)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectlink::model::Point;

    #[test]
    fn distance_clamps_to_segment_ends() {
        let a = egui::pos2(0.0, 0.0);
        let b = egui::pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(egui::pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(egui::pos2(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(egui::pos2(0.0, 2.0), a, a), 2.0);
    }

    #[test]
    fn hit_tests_nodes_and_lines() {
        let mut scene = Scene::default();
        let a = scene.try_create(Point::new(100.0, 100.0)).expect("fits");
        let b = scene.try_create(Point::new(400.0, 300.0)).expect("fits");
        let conn = scene.create_connection(a, b).expect("distinct");

        assert_eq!(topmost_node(&scene, egui::pos2(120.0, 110.0)), Some(a));
        assert_eq!(topmost_node(&scene, egui::pos2(250.0, 200.0)), None);

        // segment runs from (150, 125) to (350, 275)
        assert_eq!(
            nearest_connection(&scene, egui::pos2(250.0, 201.0), 6.0),
            Some(conn)
        );
        assert_eq!(nearest_connection(&scene, egui::pos2(250.0, 240.0), 6.0), None);
    }
}
