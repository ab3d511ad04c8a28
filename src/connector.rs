use crate::model::{Point, RectF};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub fn of(self, rect: &RectF) -> Point {
        match self {
            Anchor::TopLeft => rect.left_top(),
            Anchor::TopRight => rect.right_top(),
            Anchor::BottomLeft => rect.left_bottom(),
            Anchor::BottomRight => rect.right_bottom(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Corners of `a` and `b` a connector attaches to, picked by the quadrant
/// `b`'s top-left corner lies in relative to `a`'s. Equal coordinates fall
/// into the "not less than" branch.
pub fn anchors(a: &RectF, b: &RectF) -> (Anchor, Anchor) {
    let a_left_of_b = a.min.x < b.min.x;
    let a_above_b = a.min.y < b.min.y;
    match (a_left_of_b, a_above_b) {
        (true, true) => (Anchor::BottomRight, Anchor::TopLeft),
        (true, false) => (Anchor::TopRight, Anchor::BottomLeft),
        (false, true) => (Anchor::BottomLeft, Anchor::TopRight),
        (false, false) => (Anchor::TopLeft, Anchor::BottomRight),
    }
}

pub fn compute_segment(a: &RectF, b: &RectF) -> Segment {
    let (from, to) = anchors(a, b);
    Segment {
        start: from.of(a),
        end: to.of(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;

    fn node_at(x: f32, y: f32) -> RectF {
        RectF::from_center_size(Point::new(x, y), Size::new(100.0, 50.0))
    }

    #[test]
    fn down_right_uses_bottom_right_to_top_left() {
        let a = node_at(0.0, 0.0);
        let b = node_at(200.0, 100.0);
        let seg = compute_segment(&a, &b);
        assert_eq!(seg.start, a.right_bottom());
        assert_eq!(seg.end, b.left_top());
        assert_eq!(seg.start, Point::new(50.0, 25.0));
        assert_eq!(seg.end, Point::new(150.0, 75.0));
    }

    #[test]
    fn up_right_uses_top_right_to_bottom_left() {
        let a = node_at(0.0, 200.0);
        let b = node_at(300.0, 0.0);
        assert_eq!(anchors(&a, &b), (Anchor::TopRight, Anchor::BottomLeft));
        let seg = compute_segment(&a, &b);
        assert_eq!(seg.start, Point::new(50.0, 175.0));
        assert_eq!(seg.end, Point::new(250.0, 25.0));
    }

    #[test]
    fn down_left_uses_bottom_left_to_top_right() {
        let a = node_at(300.0, 0.0);
        let b = node_at(0.0, 200.0);
        assert_eq!(anchors(&a, &b), (Anchor::BottomLeft, Anchor::TopRight));
    }

    #[test]
    fn up_left_uses_top_left_to_bottom_right() {
        let a = node_at(300.0, 200.0);
        let b = node_at(0.0, 0.0);
        assert_eq!(anchors(&a, &b), (Anchor::TopLeft, Anchor::BottomRight));
    }

    #[test]
    fn ties_take_the_not_less_than_branch() {
        let a = node_at(100.0, 0.0);
        let b = node_at(100.0, 200.0);
        assert_eq!(anchors(&a, &b), (Anchor::BottomLeft, Anchor::TopRight));

        let c = node_at(0.0, 100.0);
        let d = node_at(200.0, 100.0);
        assert_eq!(anchors(&c, &d), (Anchor::TopRight, Anchor::BottomLeft));

        assert_eq!(anchors(&a, &a), (Anchor::TopLeft, Anchor::BottomRight));
    }
}
