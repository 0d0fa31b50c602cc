//! Enemy wave construction and the stacked-row ("pyramid") layout.

use crate::canvas::Canvas;
use crate::entities::{EnemyShip, EnemyTier, Level};
use crate::session::PlayField;

/// Horizontal gap between neighbouring ships in a row.
pub const SHIP_SPACING: f64 = 10.0;

const CENTER_OFFSET: f64 = 80.0;
const TIER_THREE_PLACEMENT_OFFSET: f64 = 25.0;

/// Builds the wave for `level`.  Waves are cumulative: level N holds the
/// ships of every tier up to N.
pub fn create_enemy_ships(level: Level) -> Vec<EnemyShip> {
    level
        .tiers()
        .iter()
        .flat_map(|&tier| (0..tier.formation_size()).map(move |_| EnemyShip::new(tier)))
        .collect()
}

/// Top-left corner of the first ship in a tier's row.
pub fn tier_anchor(tier: EnemyTier, field: &PlayField) -> (f64, f64) {
    let (w, h) = (field.width(), field.height());
    match tier {
        EnemyTier::One => (w / 2.0 - CENTER_OFFSET, h - 220.0),
        EnemyTier::Two => (w / 6.5 + CENTER_OFFSET, h - 280.0),
        EnemyTier::Three => (
            w / 10.5 + CENTER_OFFSET - TIER_THREE_PLACEMENT_OFFSET,
            h - 340.0,
        ),
        EnemyTier::Four => (w / 10.3, h - 400.0),
    }
}

/// Lays out every ship whose tier takes part in `level`, one row per tier,
/// attaching sprites for ships that do not have one yet.
pub fn place_as_pyramid(
    ships: &mut [EnemyShip],
    level: Level,
    field: &PlayField,
    canvas: &mut impl Canvas,
) {
    if ships.is_empty() {
        return;
    }
    for &tier in level.tiers() {
        let (anchor_x, row_y) = tier_anchor(tier, field);
        let mut offset = 0.0;
        for ship in ships.iter_mut().filter(|s| s.tier == tier) {
            if ship.body.sprite.is_none() {
                ship.body.attach(canvas);
            }
            ship.body.move_to(canvas, anchor_x + offset, row_y);
            offset += ship.body.width + SHIP_SPACING;
        }
    }
}
