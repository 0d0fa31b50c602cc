use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_pirates::canvas::{Scene, SpriteKind};
use space_pirates::entities::{EnemyTier, PLAYER_SHIP_WIDTH};
use space_pirates::manager::{Command, GameManager};
use space_pirates::session::{GamePhase, MAX_PLAYER_BULLETS, STARTING_LIVES};

#[derive(Clone, Copy, Debug)]
enum Step {
    Apply(Command),
    Advance(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => prop::sample::select(vec![
            Command::MoveLeft,
            Command::MoveRight,
            Command::FireBullet,
            Command::StartNextLevel,
            Command::ResetGame,
        ])
        .prop_map(Step::Apply),
        2 => (1u64..500).prop_map(Step::Advance),
    ]
}

fn enemies_on_canvas(scene: &Scene) -> usize {
    EnemyTier::ALL
        .iter()
        .map(|&t| scene.count(SpriteKind::EnemyShip(t)))
        .sum()
}

proptest! {
    #[test]
    fn session_invariants_hold_for_any_input(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..200),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut m: GameManager<Scene> = GameManager::new(640.0, 480.0).unwrap();
        m.initialize_game(Some(Scene::new())).unwrap();

        for step in steps {
            match step {
                Step::Apply(command) => m.apply(command).unwrap(),
                Step::Advance(ms) => m.advance(Duration::from_millis(ms), &mut rng),
            }

            let state = m.state();
            let scene = m.canvas().unwrap();

            prop_assert!(state.player_bullets.len() <= MAX_PLAYER_BULLETS);
            prop_assert!(state.lives.len() <= STARTING_LIVES);
            prop_assert!(state.enemy_ships.len() <= 20);
            prop_assert_eq!(state.score % 100, 0);

            if let Some(ship) = &state.player_ship {
                prop_assert!(ship.body.x >= 0.0);
                prop_assert!(ship.body.x <= 640.0 - PLAYER_SHIP_WIDTH);
            }

            // Every entity has exactly one sprite and nothing else lingers.
            prop_assert_eq!(
                scene.count(SpriteKind::Bullet),
                state.player_bullets.len() + state.enemy_bullets.len()
            );
            prop_assert_eq!(scene.count(SpriteKind::Life), state.lives.len());
            prop_assert_eq!(enemies_on_canvas(scene), state.enemy_ships.len());

            // Timers run exactly while the game is in play.
            prop_assert_eq!(m.scheduler().any_running(), m.phase() == GamePhase::Playing);
            prop_assert_eq!(state.player_ship.is_some(), m.phase() == GamePhase::Playing);
        }
    }
}
