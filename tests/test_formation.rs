use space_pirates::canvas::{Scene, SpriteKind};
use space_pirates::entities::{EnemyShip, EnemyTier, Level};
use space_pirates::formation::{create_enemy_ships, place_as_pyramid, tier_anchor, SHIP_SPACING};
use space_pirates::session::PlayField;

fn field() -> PlayField {
    PlayField::new(640.0, 480.0).unwrap()
}

fn count(ships: &[EnemyShip], tier: EnemyTier) -> usize {
    ships.iter().filter(|s| s.tier == tier).count()
}

// ── create_enemy_ships ────────────────────────────────────────────────────────

#[test]
fn wave_sizes_are_cumulative() {
    assert_eq!(create_enemy_ships(Level::One).len(), 2);
    assert_eq!(create_enemy_ships(Level::Two).len(), 6);
    assert_eq!(create_enemy_ships(Level::Three).len(), 12);
    assert_eq!(create_enemy_ships(Level::Four).len(), 20);
}

#[test]
fn level_four_wave_holds_every_tier() {
    let ships = create_enemy_ships(Level::Four);
    assert_eq!(count(&ships, EnemyTier::One), 2);
    assert_eq!(count(&ships, EnemyTier::Two), 4);
    assert_eq!(count(&ships, EnemyTier::Three), 6);
    assert_eq!(count(&ships, EnemyTier::Four), 8);
}

#[test]
fn level_two_wave_has_no_higher_tiers() {
    let ships = create_enemy_ships(Level::Two);
    assert_eq!(count(&ships, EnemyTier::Three), 0);
    assert_eq!(count(&ships, EnemyTier::Four), 0);
}

// ── place_as_pyramid ──────────────────────────────────────────────────────────

#[test]
fn tier_anchors_on_640_by_480() {
    let f = field();
    assert_eq!(tier_anchor(EnemyTier::One, &f), (240.0, 260.0));
    assert_eq!(tier_anchor(EnemyTier::Two, &f), (640.0 / 6.5 + 80.0, 200.0));
    assert_eq!(tier_anchor(EnemyTier::Three, &f), (640.0 / 10.5 + 80.0 - 25.0, 140.0));
    assert_eq!(tier_anchor(EnemyTier::Four, &f), (640.0 / 10.3, 80.0));
}

#[test]
fn ships_in_a_row_advance_by_width_plus_spacing() {
    let mut scene = Scene::new();
    let mut ships = create_enemy_ships(Level::Four);
    place_as_pyramid(&mut ships, Level::Four, &field(), &mut scene);

    for tier in EnemyTier::ALL {
        let (anchor_x, row_y) = tier_anchor(tier, &field());
        let row: Vec<_> = ships.iter().filter(|s| s.tier == tier).collect();
        for (i, ship) in row.iter().enumerate() {
            let expected_x = anchor_x + i as f64 * (ship.body.width + SHIP_SPACING);
            assert!((ship.body.x - expected_x).abs() < 1e-9, "{tier:?} #{i}");
            assert_eq!(ship.body.y, row_y);
        }
    }
}

#[test]
fn placement_attaches_and_renders_every_ship() {
    let mut scene = Scene::new();
    let mut ships = create_enemy_ships(Level::Two);
    place_as_pyramid(&mut ships, Level::Two, &field(), &mut scene);

    assert_eq!(scene.count(SpriteKind::EnemyShip(EnemyTier::One)), 2);
    assert_eq!(scene.count(SpriteKind::EnemyShip(EnemyTier::Two)), 4);
    for ship in &ships {
        let node = scene.get(ship.body.sprite.unwrap()).unwrap();
        assert_eq!((node.x, node.y), (ship.body.x, ship.body.y));
    }
}

#[test]
fn placement_skips_tiers_above_level() {
    let mut scene = Scene::new();
    let mut ships = create_enemy_ships(Level::Two);
    place_as_pyramid(&mut ships, Level::One, &field(), &mut scene);

    assert_eq!(scene.len(), 2);
    assert!(ships
        .iter()
        .filter(|s| s.tier == EnemyTier::Two)
        .all(|s| s.body.sprite.is_none()));
}

#[test]
fn placement_with_no_ships_is_noop() {
    let mut scene = Scene::new();
    place_as_pyramid(&mut [], Level::Four, &field(), &mut scene);
    assert!(scene.is_empty());
}

#[test]
fn rows_stack_upward_with_higher_tiers() {
    let f = field();
    let rows: Vec<f64> = EnemyTier::ALL.iter().map(|&t| tier_anchor(t, &f).1).collect();
    assert!(rows.windows(2).all(|w| w[0] > w[1]));
}
