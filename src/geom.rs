/// Axis-aligned rectangle in logical pixels, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test with open edges: rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Aabb::new(0.0, 0.0, 40.0, 40.0);
        let b = Aabb::new(30.0, 30.0, 20.0, 20.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let wall = Aabb::new(0.0, 0.0, 40.0, 40.0);
        let right = Aabb::new(40.0, 0.0, 30.0, 30.0);
        let below = Aabb::new(5.0, 40.0, 30.0, 30.0);
        assert!(!wall.intersects(&right));
        assert!(!wall.intersects(&below));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(10.0, 10.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
    }
}
