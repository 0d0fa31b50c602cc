//! Bullet-versus-ship hit tests.
//!
//! A bullet is treated as a single point (its top-left corner).  A hit is
//! that point lying inside the target's box, edges included.  Nothing here
//! tests rectangle-against-rectangle overlap, so a bullet that moves past a
//! thin ship within one tick is not caught.

use crate::entities::{Bullet, EnemyShip, GameObject};

fn upper_left(target: &GameObject, x: f64, y: f64) -> bool {
    target.x <= x && target.y <= y
}

fn upper_right(target: &GameObject, x: f64, y: f64) -> bool {
    target.x + target.width >= x && y >= target.y
}

fn bottom_left(target: &GameObject, x: f64, y: f64) -> bool {
    target.x <= x && y <= target.y + target.height
}

fn bottom_right(target: &GameObject, x: f64, y: f64) -> bool {
    target.x + target.width >= x && y <= target.y + target.height
}

/// True when `bullet`'s point lies within `target`'s box.
pub fn bullet_hits(target: &GameObject, bullet: &GameObject) -> bool {
    let (x, y) = (bullet.x, bullet.y);
    upper_left(target, x, y)
        && upper_right(target, x, y)
        && bottom_left(target, x, y)
        && bottom_right(target, x, y)
}

/// First `(ship index, bullet index)` pair that collides, scanning ships in
/// order and, for each ship, bullets in order.
pub fn first_enemy_hit(ships: &[EnemyShip], bullets: &[Bullet]) -> Option<(usize, usize)> {
    ships.iter().enumerate().find_map(|(si, ship)| {
        bullets
            .iter()
            .position(|b| bullet_hits(&ship.body, &b.body))
            .map(|bi| (si, bi))
    })
}

/// Index of the first bullet inside the player ship, if any.
pub fn first_player_hit(player: &GameObject, bullets: &[Bullet]) -> Option<usize> {
    bullets.iter().position(|b| bullet_hits(player, &b.body))
}
