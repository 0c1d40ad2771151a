//! Axis-aligned bounding-box collision detection
//!
//! All gameplay geometry is upright rectangles, so a strict-inequality
//! overlap test is the whole story. Touching edges do not collide.

use super::state::{Obstacle, Player};

/// An axis-aligned box (top-left corner + extent, y grows downward)
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
}

/// Strict overlap test: boxes that merely share an edge are not colliding
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Scan obstacles in spawn order and return the index of the first one
/// overlapping the player, if any. Later overlaps in the same tick need no
/// special handling; the session transition is idempotent.
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_box = player.aabb();
    obstacles
        .iter()
        .position(|obstacle| aabb_overlap(&player_box, &obstacle.aabb()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let player = Aabb::new(0.0, 0.0, 50.0, 50.0);
        assert!(aabb_overlap(&player, &Aabb::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!aabb_overlap(&player, &Aabb::new(100.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let b = Aabb::new(40.0, 40.0, 20.0, 20.0);
        assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 50.0, 50.0);
        // Right edge of `a` exactly meets the left edge of `b`
        let b = Aabb::new(50.0, 0.0, 20.0, 20.0);
        assert!(!aabb_overlap(&a, &b));
    }

    #[test]
    fn test_first_hit_returns_earliest_spawn() {
        let player = Player::default();
        let clear = Obstacle::new(700.0, 30.0);
        // Both of these overlap the grounded player at x=50
        let hit_a = Obstacle::new(60.0, 30.0);
        let hit_b = Obstacle::new(70.0, 30.0);

        let obstacles = vec![clear.clone(), hit_a, hit_b];
        assert_eq!(first_hit(&player, &obstacles), Some(1));
        assert_eq!(first_hit(&player, &[clear]), None);
    }

    #[test]
    fn test_airborne_player_clears_obstacle() {
        let mut player = Player::default();
        // High enough that the player's bottom edge is above the obstacle
        player.pos.y = 200.0;
        let obstacles = vec![Obstacle::new(60.0, 30.0)];
        assert_eq!(first_hit(&player, &obstacles), None);
    }
}
