use space_pirates::canvas::{Canvas, Scene, SpriteKind};
use space_pirates::entities::*;

#[test]
fn level_numbers_and_progression() {
    assert_eq!(Level::One.number(), 1);
    assert_eq!(Level::Four.number(), 4);
    assert_eq!(Level::One.next(), Some(Level::Two));
    assert_eq!(Level::Three.next(), Some(Level::Four));
    assert_eq!(Level::Four.next(), None);
}

#[test]
fn level_tiers_are_cumulative() {
    assert_eq!(Level::One.tiers(), &[EnemyTier::One]);
    assert_eq!(Level::Three.tiers(), &[EnemyTier::One, EnemyTier::Two, EnemyTier::Three]);
    assert_eq!(Level::Four.tiers(), &EnemyTier::ALL);
}

#[test]
fn tier_scores_and_formation_sizes() {
    let scores: Vec<u32> = EnemyTier::ALL.iter().map(|t| t.score()).collect();
    assert_eq!(scores, vec![100, 200, 300, 400]);
    let sizes: Vec<usize> = EnemyTier::ALL.iter().map(|t| t.formation_size()).collect();
    assert_eq!(sizes, vec![2, 4, 6, 8]);
}

#[test]
fn only_tier_one_is_static() {
    assert!(!EnemyTier::One.animates());
    assert!(EnemyTier::Two.animates());
    assert!(EnemyTier::Three.animates());
    assert!(EnemyTier::Four.animates());
}

#[test]
fn player_ship_has_fixed_size_and_speed() {
    let ship = PlayerShip::new();
    assert_eq!(ship.body.width, PLAYER_SHIP_WIDTH);
    assert_eq!(ship.body.height, PLAYER_SHIP_HEIGHT);
    assert_eq!(ship.body.speed_x, PLAYER_SHIP_SPEED);
    assert_eq!(ship.body.kind, SpriteKind::PlayerShip);
    assert!(ship.body.sprite.is_none());
}

#[test]
fn enemy_ship_size_follows_tier() {
    for tier in EnemyTier::ALL {
        let ship = EnemyShip::new(tier);
        assert_eq!((ship.body.width, ship.body.height), tier.size());
        assert_eq!(ship.body.kind, SpriteKind::EnemyShip(tier));
    }
}

// ── Sprite lifecycle ──────────────────────────────────────────────────────────

#[test]
fn attach_renders_at_current_position() {
    let mut scene = Scene::new();
    let mut bullet = Bullet::at(12.0, 34.0);
    bullet.body.attach(&mut scene);

    let id = bullet.body.sprite.expect("attached");
    let node = scene.get(id).unwrap();
    assert_eq!((node.x, node.y), (12.0, 34.0));
    assert_eq!(node.kind, SpriteKind::Bullet);
}

#[test]
fn move_by_pushes_new_position() {
    let mut scene = Scene::new();
    let mut life = Life::new();
    life.body.attach(&mut scene);
    life.body.move_by(&mut scene, 5.0, -2.0);

    let node = scene.get(life.body.sprite.unwrap()).unwrap();
    assert_eq!((node.x, node.y), (5.0, -2.0));
}

#[test]
fn detach_removes_sprite_once() {
    let mut scene = Scene::new();
    let mut ship = PlayerShip::new();
    ship.body.attach(&mut scene);
    assert_eq!(scene.len(), 1);

    ship.body.detach(&mut scene);
    assert!(scene.is_empty());
    assert!(ship.body.sprite.is_none());

    // Second detach is harmless.
    ship.body.detach(&mut scene);
    assert!(scene.is_empty());
}

#[test]
fn moving_unattached_object_touches_nothing() {
    let mut scene = Scene::new();
    let mut bullet = Bullet::new();
    bullet.body.move_to(&mut scene, 100.0, 100.0);
    assert_eq!((bullet.body.x, bullet.body.y), (100.0, 100.0));
    assert!(scene.is_empty());
}

#[test]
fn stale_ids_do_not_alias_after_clear() {
    let mut scene = Scene::new();
    let first = scene.add(SpriteKind::Bullet);
    scene.clear();
    let second = scene.add(SpriteKind::Bullet);
    assert_ne!(first, second);
    scene.remove(first);
    assert!(scene.contains(second));
}

// ── Animation & text ──────────────────────────────────────────────────────────

#[test]
fn animated_tier_toggles_between_two_frames() {
    let mut scene = Scene::new();
    let mut ship = EnemyShip::new(EnemyTier::Three);
    ship.body.attach(&mut scene);
    let id = ship.body.sprite.unwrap();

    ship.animate(&mut scene);
    assert!(scene.get(id).unwrap().alternate_frame);
    ship.animate(&mut scene);
    assert!(!scene.get(id).unwrap().alternate_frame);
}

#[test]
fn tier_one_never_toggles() {
    let mut scene = Scene::new();
    let mut ship = EnemyShip::new(EnemyTier::One);
    ship.body.attach(&mut scene);
    ship.animate(&mut scene);
    assert!(!scene.get(ship.body.sprite.unwrap()).unwrap().alternate_frame);
}

#[test]
fn text_set_before_attach_is_shown_on_attach() {
    let mut scene = Scene::new();
    let mut block = TextBlock::score_block();
    block.set_text(&mut scene, "Score: 0");
    assert!(scene.is_empty());

    block.attach(&mut scene);
    assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["Score: 0"]);

    block.set_text(&mut scene, "Score: 100");
    assert_eq!(block.text(), "Score: 100");
    assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["Score: 100"]);
}
