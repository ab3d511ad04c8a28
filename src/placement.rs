//! Drag-release placement: moves a node to the nearest in-bounds,
//! overlap-free position by iterative local correction.
//!
//! Boundary violations are corrected exactly in a single translation. Overlaps
//! are corrected greedily by pushing the node flush against whatever it hits.
//! The greedy step can oscillate when a node is hemmed in on several sides, so
//! the loop is capped and an unresolved placement reverts to the fallback.

use tracing::debug;

use crate::model::{Point, RectF, Size};

/// Default cap on correction steps per [`Resolver::resolve`] call.
pub const MAX_ITERATIONS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStatus {
    /// The returned position is in bounds and overlap-free.
    Resolved,
    /// No valid position was reached; the fallback was returned unchanged.
    Reverted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub position: Point,
    pub status: ResolveStatus,
    /// Correction steps taken. Zero when the input was already valid.
    pub iterations: usize,
}

impl Resolution {
    pub fn is_reverted(&self) -> bool {
        self.status == ResolveStatus::Reverted
    }
}

/// Translation that brings `rect` fully inside `bounds`, per axis.
///
/// Zero on an axis where `rect` is already inside. The low edge wins when a
/// box is larger than the bounds on that axis.
pub fn boundary_offset(rect: &RectF, bounds: &RectF) -> (f32, f32) {
    let dx = if rect.min.x < bounds.min.x {
        bounds.min.x - rect.min.x
    } else if rect.max.x > bounds.max.x {
        bounds.max.x - rect.max.x
    } else {
        0.0
    };
    let dy = if rect.min.y < bounds.min.y {
        bounds.min.y - rect.min.y
    } else if rect.max.y > bounds.max.y {
        bounds.max.y - rect.max.y
    } else {
        0.0
    };
    (dx, dy)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolver {
    pub bounds: RectF,
    pub size: Size,
    pub max_iterations: usize,
}

impl Resolver {
    pub fn new(bounds: RectF, size: Size) -> Self {
        Self {
            bounds,
            size,
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn is_valid(&self, rect: &RectF, obstacles: &[RectF]) -> bool {
        self.bounds.contains_rect(rect) && !obstacles.iter().any(|o| o.overlaps(rect))
    }

    /// Corrects `moving` (a node centre) against `obstacles`.
    ///
    /// Returns the corrected centre, or `fallback` untouched if the iteration
    /// cap runs out first. `obstacles` must not include the moving node.
    pub fn resolve(&self, moving: Point, obstacles: &[RectF], fallback: Point) -> Resolution {
        let mut rect = RectF::from_center_size(moving, self.size);
        let mut iterations = 0;

        while !self.is_valid(&rect, obstacles) && iterations < self.max_iterations {
            iterations += 1;

            if !self.bounds.contains_rect(&rect) {
                let (dx, dy) = boundary_offset(&rect, &self.bounds);
                rect = rect.translated(dx, dy);
                continue;
            }

            let hits: Vec<&RectF> = obstacles.iter().filter(|o| o.overlaps(&rect)).collect();
            match hits.as_slice() {
                [] => {}
                [single] => {
                    let (dx, dy) = separate_from_single(&rect, single);
                    rect = rect.translated(dx, dy);
                }
                [first, rest @ ..] => {
                    let combined = rest.iter().fold(**first, |acc, r| acc.union(**r));
                    if let Some((dx, dy)) = self.flush_against(&rect, &combined) {
                        rect = rect.translated(dx, dy);
                    }
                }
            }
        }

        if self.is_valid(&rect, obstacles) {
            let position = rect.center();
            debug!(
                iterations,
                x = position.x,
                y = position.y,
                "placement resolved"
            );
            Resolution {
                position,
                status: ResolveStatus::Resolved,
                iterations,
            }
        } else {
            debug!(iterations, "placement did not converge, reverting");
            Resolution {
                position: fallback,
                status: ResolveStatus::Reverted,
                iterations,
            }
        }
    }

    /// First of right, left, down, up that moves `rect` flush against
    /// `combined` in the right direction and keeps it inside the bounds.
    fn flush_against(&self, rect: &RectF, combined: &RectF) -> Option<(f32, f32)> {
        let move_right = combined.max.x - rect.min.x;
        let move_left = combined.min.x - rect.max.x;
        let move_down = combined.max.y - rect.min.y;
        let move_up = combined.min.y - rect.max.y;

        if move_right >= 0.0 && rect.max.x + move_right <= self.bounds.max.x {
            Some((move_right, 0.0))
        } else if move_left <= 0.0 && rect.min.x + move_left >= self.bounds.min.x {
            Some((move_left, 0.0))
        } else if move_down >= 0.0 && rect.max.y + move_down <= self.bounds.max.y {
            Some((0.0, move_down))
        } else if move_up <= 0.0 && rect.min.y + move_up >= self.bounds.min.y {
            Some((0.0, move_up))
        } else {
            None
        }
    }
}

/// Pushes `rect` out of `obstacle` along the axis of least penetration.
///
/// A strictly wider-than-tall intersection resolves vertically, anything else
/// horizontally. The direction follows the top-left corners: a node whose
/// corner is past the obstacle's moves further away from it, ties move
/// towards the origin.
fn separate_from_single(rect: &RectF, obstacle: &RectF) -> (f32, f32) {
    let Some(overlap) = obstacle.intersection(rect) else {
        return (0.0, 0.0);
    };
    if overlap.width() > overlap.height() {
        if obstacle.min.y < rect.min.y {
            (0.0, overlap.height())
        } else {
            (0.0, -overlap.height())
        }
    } else if obstacle.min.x < rect.min.x {
        (overlap.width(), 0.0)
    } else {
        (-overlap.width(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: Size = Size::new(100.0, 50.0);

    fn canvas(width: f32, height: f32) -> RectF {
        RectF::from_min_max(Point::new(0.0, 0.0), Point::new(width, height))
    }

    fn node_at(x: f32, y: f32) -> RectF {
        RectF::from_center_size(Point::new(x, y), NODE)
    }

    #[test]
    fn valid_input_is_returned_unchanged() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let obstacles = [node_at(100.0, 100.0)];
        let start = Point::new(300.0, 300.0);
        let out = resolver.resolve(start, &obstacles, Point::new(0.0, 0.0));
        assert_eq!(out.position, start);
        assert_eq!(out.status, ResolveStatus::Resolved);
        assert_eq!(out.iterations, 0);
    }

    #[test]
    fn left_overflow_is_corrected_exactly() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        // left edge at -10
        let out = resolver.resolve(Point::new(40.0, 200.0), &[], Point::new(300.0, 300.0));
        assert_eq!(out.position, Point::new(50.0, 200.0));
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn corner_overflow_is_corrected_on_both_axes() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let out = resolver.resolve(Point::new(580.0, 490.0), &[], Point::new(300.0, 300.0));
        assert_eq!(out.position, Point::new(550.0, 475.0));
        assert_eq!(out.status, ResolveStatus::Resolved);
    }

    #[test]
    fn square_single_overlap_resolves_horizontally() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let a = node_at(100.0, 100.0);
        let out = resolver.resolve(Point::new(150.0, 100.0), &[a], Point::new(400.0, 400.0));
        assert_eq!(out.position, Point::new(200.0, 100.0));
        assert!(!RectF::from_center_size(out.position, NODE).overlaps(&a));
    }

    #[test]
    fn wide_single_overlap_resolves_vertically() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let a = node_at(200.0, 200.0);
        // intersection 80 wide, 20 tall, obstacle above
        let out = resolver.resolve(Point::new(220.0, 230.0), &[a], Point::new(400.0, 400.0));
        assert_eq!(out.position, Point::new(220.0, 250.0));
        // obstacle below
        let out = resolver.resolve(Point::new(220.0, 170.0), &[a], Point::new(400.0, 400.0));
        assert_eq!(out.position, Point::new(220.0, 150.0));
    }

    #[test]
    fn tall_single_overlap_moves_away_from_the_obstacle() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let a = node_at(200.0, 200.0);
        // intersection 10 wide, 40 tall, obstacle to the right
        let out = resolver.resolve(Point::new(110.0, 210.0), &[a], Point::new(400.0, 400.0));
        assert_eq!(out.position, Point::new(100.0, 210.0));
    }

    #[test]
    fn multiple_overlaps_prefer_moving_right() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let obstacles = [node_at(100.0, 100.0), node_at(200.0, 100.0)];
        let out = resolver.resolve(Point::new(150.0, 110.0), &obstacles, Point::new(0.0, 0.0));
        assert_eq!(out.position, Point::new(300.0, 110.0));
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn multiple_overlaps_skip_candidates_that_leave_the_canvas() {
        // Right would end at x=350 and left at x=-50, so the node goes down.
        let resolver = Resolver::new(canvas(300.0, 500.0), NODE);
        let obstacles = [node_at(100.0, 100.0), node_at(200.0, 100.0)];
        let out = resolver.resolve(Point::new(150.0, 110.0), &obstacles, Point::new(0.0, 0.0));
        assert_eq!(out.position, Point::new(150.0, 150.0));
    }

    #[test]
    fn boundary_correction_takes_priority_over_overlap() {
        let resolver = Resolver::new(canvas(600.0, 500.0), NODE);
        let obstacles = [node_at(50.0, 300.0)];
        // starts out of bounds on the left while overlapping
        let out = resolver.resolve(Point::new(30.0, 300.0), &obstacles, Point::new(0.0, 0.0));
        assert_eq!(out.status, ResolveStatus::Resolved);
        assert_eq!(out.position, Point::new(50.0, 250.0));
        assert_eq!(out.iterations, 2);
    }

    #[test]
    fn packed_canvas_reverts_to_the_fallback() {
        let resolver = Resolver::new(canvas(300.0, 150.0), NODE);
        let mut obstacles = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                obstacles.push(node_at(50.0 + 100.0 * col as f32, 25.0 + 50.0 * row as f32));
            }
        }
        let fallback = Point::new(42.0, 17.0);
        let out = resolver.resolve(Point::new(160.0, 80.0), &obstacles, fallback);
        assert_eq!(out.position, fallback);
        assert_eq!(out.status, ResolveStatus::Reverted);
        assert_eq!(out.iterations, MAX_ITERATIONS);
    }

    #[test]
    fn iteration_cap_is_configurable() {
        let resolver = Resolver::new(canvas(300.0, 150.0), NODE).with_max_iterations(3);
        let obstacles = [node_at(50.0, 75.0)];
        // One step back inside the canvas, a second one up off the obstacle.
        let out = resolver.resolve(Point::new(30.0, 75.0), &obstacles, Point::new(1.0, 1.0));
        assert_eq!(out.iterations, 2);
        assert_eq!(out.position, Point::new(50.0, 25.0));

        let capped = resolver.with_max_iterations(1);
        let out = capped.resolve(Point::new(30.0, 75.0), &obstacles, Point::new(1.0, 1.0));
        assert!(out.is_reverted());
        assert_eq!(out.position, Point::new(1.0, 1.0));
    }

    #[test]
    fn boundary_offset_is_zero_inside() {
        let bounds = canvas(600.0, 500.0);
        assert_eq!(boundary_offset(&node_at(300.0, 300.0), &bounds), (0.0, 0.0));
        assert_eq!(boundary_offset(&node_at(590.0, 10.0), &bounds), (-40.0, 15.0));
    }
}
