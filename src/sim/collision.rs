//! Collision detection for axis-aligned rectangles
//!
//! Every entity is a box in arena space (y grows downward). Overlap tests are
//! strict: boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Boss, Collectible, LaserBeam, ObstaclePair};
use crate::consts::*;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal extents overlap (ignores y)
    pub fn overlaps_columns(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// Flyer is inside the obstacle column but outside its gap
pub fn hits_obstacle(flyer: &Rect, obstacle: &ObstaclePair) -> bool {
    flyer.overlaps_columns(obstacle.x, obstacle.x + OBSTACLE_WIDTH)
        && (flyer.top() < obstacle.gap_top || flyer.bottom() > obstacle.gap_bottom())
}

/// Flyer touches the top or bottom of the arena
pub fn hits_arena_edge(flyer: &Rect) -> bool {
    flyer.top() <= 0.0 || flyer.bottom() >= ARENA_HEIGHT
}

pub fn hits_collectible(flyer: &Rect, collectible: &Collectible) -> bool {
    flyer.intersects(&collectible.rect())
}

/// Flyer touches any of the beams
pub fn hits_laser(flyer: &Rect, lasers: &[LaserBeam]) -> bool {
    lasers.iter().any(|laser| flyer.intersects(&laser.rect()))
}

pub fn hits_boss(flyer: &Rect, boss: &Boss) -> bool {
    boss.is_active() && flyer.intersects(&boss.rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BossPhase, CollectibleKind};

    fn flyer_at(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(FLYER_WIDTH, FLYER_HEIGHT))
    }

    #[test]
    fn test_rect_edges() {
        let rect = flyer_at(150.0, 250.0);
        assert_eq!(rect.left(), 150.0);
        assert_eq!(rect.right(), 150.0 + FLYER_WIDTH);
        assert_eq!(rect.top(), 250.0);
        assert_eq!(rect.bottom(), 250.0 + FLYER_HEIGHT);
        assert!(rect.overlaps_columns(200.0, 250.0));
        assert!(!rect.overlaps_columns(rect.right(), rect.right() + 50.0));
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let overlapping = Rect::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_obstacle_inside_gap_is_safe() {
        let obstacle = ObstaclePair {
            x: 160.0,
            gap_top: 75.0,
        };
        // Fully inside the gap (75..425)
        assert!(!hits_obstacle(&flyer_at(150.0, 200.0), &obstacle));
        // Pokes above the gap
        assert!(hits_obstacle(&flyer_at(150.0, 70.0), &obstacle));
        // Pokes below the gap
        assert!(hits_obstacle(&flyer_at(150.0, 350.0), &obstacle));
    }

    #[test]
    fn test_obstacle_outside_column_is_safe() {
        let obstacle = ObstaclePair {
            x: 500.0,
            gap_top: 75.0,
        };
        assert!(!hits_obstacle(&flyer_at(150.0, 10.0), &obstacle));
        // Right edge exactly at the column's left edge
        assert!(!hits_obstacle(&flyer_at(420.0, 10.0), &obstacle));
        assert!(hits_obstacle(&flyer_at(421.0, 10.0), &obstacle));
    }

    #[test]
    fn test_arena_edges() {
        assert!(hits_arena_edge(&flyer_at(150.0, 0.0)));
        assert!(hits_arena_edge(&flyer_at(150.0, ARENA_HEIGHT - FLYER_HEIGHT)));
        assert!(!hits_arena_edge(&flyer_at(150.0, 0.5)));
        assert!(!hits_arena_edge(&flyer_at(150.0, ARENA_HEIGHT - FLYER_HEIGHT - 0.5)));
    }

    #[test]
    fn test_collectible_overlap() {
        let c = Collectible {
            pos: Vec2::new(200.0, 250.0),
            kind: CollectibleKind::Favorable,
        };
        assert!(hits_collectible(&flyer_at(150.0, 250.0), &c));
        assert!(!hits_collectible(&flyer_at(150.0, 100.0), &c));
    }

    #[test]
    fn test_laser_is_thin_band() {
        let lasers = vec![LaserBeam {
            pos: Vec2::new(100.0, 340.0),
            width: 300.0,
        }];
        // Flyer spans y 250..330: beam at 340..345 is below it
        assert!(!hits_laser(&flyer_at(150.0, 250.0), &lasers));
        // Flyer spans 262..342: overlaps the beam
        assert!(hits_laser(&flyer_at(150.0, 262.0), &lasers));
        // Beam still ahead of the flyer
        let ahead = vec![LaserBeam {
            pos: Vec2::new(240.0, 300.0),
            width: 10.0,
        }];
        assert!(!hits_laser(&flyer_at(150.0, 262.0), &ahead));
    }

    #[test]
    fn test_boss_body_only_while_active() {
        let mut boss = Boss {
            pos: Vec2::new(200.0, 200.0),
            ..Boss::default()
        };
        let flyer = flyer_at(150.0, 250.0);
        assert!(!hits_boss(&flyer, &boss));
        boss.phase = BossPhase::Engaged;
        assert!(hits_boss(&flyer, &boss));
    }
}
