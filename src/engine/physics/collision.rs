// Hitbox overlap queries

use glam::Vec4;

use crate::core::Rect;

/// Outline colour for the player's hitbox
pub const PLAYER_HITBOX_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.8);
/// Outline colour for an enemy hitbox
pub const ENEMY_HITBOX_COLOR: Vec4 = Vec4::new(1.0, 1.0, 0.0, 0.8);
/// Outline colour for an enemy currently touching the player
pub const CONTACT_HITBOX_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 0.9);

/// Index of the first rectangle that overlaps `target`, in iteration order
pub fn first_overlap<I>(target: &Rect, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    candidates
        .into_iter()
        .position(|candidate| target.overlaps(&candidate))
}

/// Indices of every rectangle that overlaps `target`
pub fn all_overlaps<I>(target: &Rect, candidates: I) -> Vec<usize>
where
    I: IntoIterator<Item = Rect>,
{
    candidates
        .into_iter()
        .enumerate()
        .filter(|(_, candidate)| target.overlaps(candidate))
        .map(|(i, _)| i)
        .collect()
}

/// A hitbox outline for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugRect {
    pub rect: Rect,
    pub color: Vec4,
}

impl DebugRect {
    pub fn new(rect: Rect, color: Vec4) -> Self {
        Self { rect, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> Vec<Rect> {
        vec![
            Rect::new(40, 40, 68, 68),
            Rect::new(20, 20, 48, 48),
            Rect::new(10, 10, 30, 30),
        ]
    }

    #[test]
    fn test_first_overlap_picks_earliest() {
        let player = Rect::new(0, 0, 28, 28);
        assert_eq!(first_overlap(&player, rects()), Some(1));
    }

    #[test]
    fn test_no_overlap() {
        let player = Rect::new(200, 200, 228, 228);
        assert_eq!(first_overlap(&player, rects()), None);
        assert!(all_overlaps(&player, rects()).is_empty());
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let player = Rect::new(0, 0, 20, 20);
        assert_eq!(first_overlap(&player, [Rect::new(20, 0, 40, 20)]), None);
    }

    #[test]
    fn test_all_overlaps() {
        let player = Rect::new(0, 0, 28, 28);
        assert_eq!(all_overlaps(&player, rects()), vec![1, 2]);
    }
}
