// Integer axis-aligned rectangles

use glam::Vec2;

/// Half-open pixel rectangle: `min` is inclusive, `max` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Create a rectangle from two corners
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from its top-left corner and size
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Sprite-sized box at a world position, shrunk by `inset` on every side
    pub fn inset_box(position: Vec2, width: i32, height: i32, inset: i32) -> Self {
        let x = position.x as i32 + inset;
        let y = position.y as i32 + inset;
        Self::from_origin_size(x, y, width - inset * 2, height - inset * 2)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// A rectangle with no area
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// True when the two rectangles share a non-empty intersection
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_corners() {
        let player = Rect::new(0, 0, 28, 28);
        let enemy = Rect::new(20, 20, 48, 48);
        assert!(player.overlaps(&enemy));
        assert!(enemy.overlaps(&player));
    }

    #[test]
    fn test_disjoint_rects() {
        let player = Rect::new(0, 0, 28, 28);
        let enemy = Rect::new(40, 40, 68, 68);
        assert!(!player.overlaps(&enemy));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 20, 10);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let empty = Rect::new(5, 5, 5, 5);
        let big = Rect::new(0, 0, 100, 100);
        assert!(empty.is_empty());
        assert!(!empty.overlaps(&big));
    }

    #[test]
    fn test_inset_box() {
        let rect = Rect::inset_box(Vec2::new(10.7, 20.2), 32, 32, 2);
        assert_eq!(rect, Rect::new(12, 22, 40, 50));
        assert_eq!(rect.width(), 28);
    }
}
