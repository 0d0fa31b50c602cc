//! Session state and the game rules that run on it.
//!
//! [`SessionState`] is the one owned record of a play session: level, score,
//! every entity, and the shared enemy drift.  Each operation takes the
//! canvas explicitly and pushes whatever visual changes it makes; the state
//! never reads anything back from the canvas.

use log::{debug, info, trace};
use rand::Rng;

use crate::canvas::Canvas;
use crate::collision;
use crate::entities::{
    Bullet, EnemyShip, EnemyTier, Level, Life, PlayerShip, TextBlock, ENEMY_SHIP_CENTER_X,
    ENEMY_SHIP_CENTER_Y, PLAYER_SHIP_BOTTOM_OFFSET, PLAYER_SHIP_TIP_X_OFFSET,
    PLAYER_SHIP_TIP_Y_OFFSET,
};
use crate::error::GameError;
use crate::formation;

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const STARTING_LIVES: usize = 3;
pub const MAX_PLAYER_BULLETS: usize = 3;

/// Horizontal distance every enemy moves per tick.
pub const ENEMY_SHIP_SPEED: f64 = 3.0;
/// Ticks the formation drifts one way before the direction flips.
pub const ENEMY_DRIFT_TICKS: u32 = 20;

pub const PLAYER_BULLET_SPEED: f64 = 15.0;
pub const ENEMY_BULLET_SPEED: f64 = 5.0;

const LEVEL_BLOCK_CENTER_OFFSET: f64 = 50.0;
const LIFE_RIGHT_OFFSET: f64 = 75.0;
const LIFE_SPACING: f64 = 25.0;

// ── Play-field ────────────────────────────────────────────────────────────────

/// Fixed size of the area entities move within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayField {
    width: f64,
    height: f64,
}

impl PlayField {
    pub fn new(width: f64, height: f64) -> Result<Self, GameError> {
        for (dimension, value) in [("width", width), ("height", height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::DimensionOutOfRange { dimension, value });
            }
        }
        Ok(PlayField { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

// ── Phase & outcomes ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// `completed` was cleared; the session's level already points at the
    /// next one.
    LevelComplete { completed: Level },
    GameWon,
    GameOver,
}

/// What a main tick ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not in play; nothing happened.
    Skipped,
    Continue,
    LevelComplete(Level),
    GameWon,
    GameOver,
}

impl TickOutcome {
    /// True when the periodic tasks must stop.
    pub fn halts_play(self) -> bool {
        matches!(
            self,
            TickOutcome::LevelComplete(_) | TickOutcome::GameWon | TickOutcome::GameOver
        )
    }
}

/// Side-to-side movement shared by every enemy ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDrift {
    /// Signed distance applied each tick.
    pub step: f64,
    /// Ticks since the last direction change.
    pub ticks: u32,
}

impl Default for EnemyDrift {
    fn default() -> Self {
        EnemyDrift {
            step: ENEMY_SHIP_SPEED,
            ticks: 0,
        }
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SessionState {
    field: PlayField,
    pub level: Level,
    pub score: u32,
    pub phase: GamePhase,
    pub lives: Vec<Life>,
    pub enemy_ships: Vec<EnemyShip>,
    /// Bullets flying up.
    pub player_bullets: Vec<Bullet>,
    /// Bullets flying down.
    pub enemy_bullets: Vec<Bullet>,
    pub player_ship: Option<PlayerShip>,
    pub score_block: Option<TextBlock>,
    pub level_block: Option<TextBlock>,
    pub banner: Option<TextBlock>,
    pub drift: EnemyDrift,
}

impl SessionState {
    /// An empty session at level one.  Nothing is on the field until
    /// [`SessionState::initialize`] runs.
    pub fn new(field: PlayField) -> Self {
        SessionState {
            field,
            level: Level::One,
            score: 0,
            phase: GamePhase::Playing,
            lives: Vec::new(),
            enemy_ships: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            player_ship: None,
            score_block: None,
            level_block: None,
            banner: None,
            drift: EnemyDrift::default(),
        }
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    // ── Setup ─────────────────────────────────────────────────────────────────

    /// Clears the canvas and rebuilds the field for the current level.
    ///
    /// Bullets and enemies are dropped, a fresh player ship and wave are
    /// placed, and the HUD is recreated.  Surviving lives carry over; an
    /// empty life list is refilled.
    pub fn initialize(&mut self, canvas: &mut impl Canvas) {
        canvas.clear();
        for life in &mut self.lives {
            life.body.forget_sprite();
        }
        self.player_ship = None;
        self.score_block = None;
        self.level_block = None;
        self.banner = None;
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.enemy_ships.clear();

        self.create_and_place_player_ship(canvas);
        self.create_enemy_ships(self.level);
        self.place_enemy_ships_as_pyramid(canvas, self.level);
        self.create_and_place_score_block(canvas);
        self.create_and_place_level_block(canvas);
        self.create_and_place_player_lives(canvas);
        self.phase = GamePhase::Playing;
    }

    /// Back to level one with full lives.  The score and the enemy drift
    /// carry over.
    pub fn reset(&mut self, canvas: &mut impl Canvas) {
        self.level = Level::One;
        self.lives.clear();
        self.initialize(canvas);
    }

    /// Appends the wave for `level` to the enemy collection.
    pub fn create_enemy_ships(&mut self, level: Level) {
        self.enemy_ships.extend(formation::create_enemy_ships(level));
    }

    pub fn place_enemy_ships_as_pyramid(&mut self, canvas: &mut impl Canvas, level: Level) {
        formation::place_as_pyramid(&mut self.enemy_ships, level, &self.field, canvas);
    }

    /// Puts a new player ship near the bottom, horizontally centred.
    pub fn create_and_place_player_ship(&mut self, canvas: &mut impl Canvas) {
        let mut ship = PlayerShip::new();
        ship.body.x = self.field.width / 2.0 - ship.body.width / 2.0;
        ship.body.y = self.field.height - ship.body.height - PLAYER_SHIP_BOTTOM_OFFSET;
        ship.body.attach(canvas);
        self.player_ship = Some(ship);
    }

    fn create_and_place_score_block(&mut self, canvas: &mut impl Canvas) {
        let text = format!("Score: {}", self.score);
        self.score_block = Some(text_block(canvas, TextBlock::score_block(), 0.0, 0.0, text));
    }

    fn create_and_place_level_block(&mut self, canvas: &mut impl Canvas) {
        let x = self.field.width / 2.0 - LEVEL_BLOCK_CENTER_OFFSET;
        let text = format!("Level: {}", self.level.number());
        self.level_block = Some(text_block(canvas, TextBlock::score_block(), x, 0.0, text));
    }

    fn create_and_place_player_lives(&mut self, canvas: &mut impl Canvas) {
        if !self.lives.is_empty() {
            for life in &mut self.lives {
                life.body.attach(canvas);
            }
            return;
        }
        let first_x = self.field.width - LIFE_RIGHT_OFFSET;
        for i in 0..STARTING_LIVES {
            let mut life = Life::new();
            life.body.x = first_x + LIFE_SPACING * i as f64;
            life.body.attach(canvas);
            self.lives.push(life);
        }
    }

    // ── Player input ──────────────────────────────────────────────────────────

    pub fn move_player_ship_left(&mut self, canvas: &mut impl Canvas) {
        let Some(ship) = self.player_ship.as_mut() else {
            return;
        };
        let x = (ship.body.x - ship.body.speed_x).max(0.0);
        ship.body.move_to(canvas, x, ship.body.y);
    }

    pub fn move_player_ship_right(&mut self, canvas: &mut impl Canvas) {
        let Some(ship) = self.player_ship.as_mut() else {
            return;
        };
        let max_x = (self.field.width - ship.body.width).max(0.0);
        let x = (ship.body.x + ship.body.speed_x).min(max_x);
        ship.body.move_to(canvas, x, ship.body.y);
    }

    /// Fires from the ship's nose unless the ship is gone or the clip is full.
    pub fn fire_player_bullet(&mut self, canvas: &mut impl Canvas) {
        let Some(ship) = &self.player_ship else {
            return;
        };
        if self.player_bullets.len() >= MAX_PLAYER_BULLETS {
            return;
        }
        let mut bullet = Bullet::at(
            ship.body.x + PLAYER_SHIP_TIP_X_OFFSET,
            ship.body.y - PLAYER_SHIP_TIP_Y_OFFSET,
        );
        bullet.body.attach(canvas);
        self.player_bullets.push(bullet);
    }

    // ── Periodic tasks ────────────────────────────────────────────────────────

    /// One main tick: movement, bullet cleanup, collisions, level end.
    pub fn game_tick(&mut self, canvas: &mut impl Canvas) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Skipped;
        }
        self.move_enemy_ships(canvas);
        self.move_player_bullets_up(canvas);
        self.move_enemy_bullets_down(canvas);
        self.remove_enemy_bullets_leaving_field(canvas);
        self.remove_spent_player_bullets(canvas);

        self.detect_player_bullet_hit(canvas);
        if self.detect_enemy_bullet_hit(canvas) && self.phase == GamePhase::GameOver {
            return TickOutcome::GameOver;
        }
        self.end_level(canvas)
    }

    /// A random enemy fires one bullet downward.
    pub fn fire_enemy_bullet(&mut self, canvas: &mut impl Canvas, rng: &mut impl Rng) {
        if self.phase != GamePhase::Playing || self.enemy_ships.is_empty() {
            return;
        }
        let shooter = &self.enemy_ships[rng.gen_range(0..self.enemy_ships.len())];
        let mut bullet = Bullet::at(
            shooter.body.x + ENEMY_SHIP_CENTER_X,
            shooter.body.y + ENEMY_SHIP_CENTER_Y,
        );
        trace!("{:?} enemy fires from ({}, {})", shooter.tier, bullet.body.x, bullet.body.y);
        bullet.body.attach(canvas);
        self.enemy_bullets.push(bullet);
    }

    pub fn animate_enemy_ships(&mut self, canvas: &mut impl Canvas) {
        if self.phase != GamePhase::Playing {
            return;
        }
        for ship in &self.enemy_ships {
            ship.animate(canvas);
        }
    }

    // ── Tick steps ────────────────────────────────────────────────────────────

    pub fn move_enemy_ships(&mut self, canvas: &mut impl Canvas) {
        self.drift.ticks += 1;
        if self.drift.ticks > ENEMY_DRIFT_TICKS {
            self.drift.ticks = 0;
            self.drift.step = -self.drift.step;
        }
        let step = self.drift.step;
        for ship in &mut self.enemy_ships {
            ship.body.move_by(canvas, step, 0.0);
        }
    }

    pub fn move_player_bullets_up(&mut self, canvas: &mut impl Canvas) {
        let height = self.field.height;
        for bullet in self.player_bullets.iter_mut().filter(|b| b.body.y <= height) {
            bullet.body.move_by(canvas, 0.0, -PLAYER_BULLET_SPEED);
        }
    }

    pub fn move_enemy_bullets_down(&mut self, canvas: &mut impl Canvas) {
        let height = self.field.height;
        for bullet in self.enemy_bullets.iter_mut().filter(|b| b.body.y <= height) {
            bullet.body.move_by(canvas, 0.0, ENEMY_BULLET_SPEED);
        }
    }

    pub fn remove_enemy_bullets_leaving_field(&mut self, canvas: &mut impl Canvas) {
        let height = self.field.height;
        self.enemy_bullets.retain_mut(|b| {
            if b.body.y >= height {
                b.body.detach(canvas);
                false
            } else {
                true
            }
        });
    }

    pub fn remove_spent_player_bullets(&mut self, canvas: &mut impl Canvas) {
        self.player_bullets.retain_mut(|b| {
            if b.body.y <= 0.0 {
                b.body.detach(canvas);
                false
            } else {
                true
            }
        });
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    /// Resolves the first player bullet found inside an enemy ship and
    /// returns the destroyed ship's tier.
    ///
    /// At most one pair is resolved per call, even when several bullets
    /// overlap ships at once; the rest wait for the next tick.
    pub fn detect_player_bullet_hit(&mut self, canvas: &mut impl Canvas) -> Option<EnemyTier> {
        let (ship_index, bullet_index) =
            collision::first_enemy_hit(&self.enemy_ships, &self.player_bullets)?;
        let mut ship = self.enemy_ships.remove(ship_index);
        let mut bullet = self.player_bullets.remove(bullet_index);

        self.add_score(canvas, ship.tier.score());
        ship.body.detach(canvas);
        bullet.body.detach(canvas);
        debug!(
            "{:?} enemy destroyed, score {}, {} left",
            ship.tier,
            self.score,
            self.enemy_ships.len()
        );
        Some(ship.tier)
    }

    /// Checks enemy bullets against the player ship.  A hit costs a life,
    /// clears every enemy bullet and either respawns the ship or ends the
    /// game.  Returns whether the ship was hit.
    pub fn detect_enemy_bullet_hit(&mut self, canvas: &mut impl Canvas) -> bool {
        let Some(ship) = &self.player_ship else {
            return false;
        };
        if collision::first_player_hit(&ship.body, &self.enemy_bullets).is_none() {
            return false;
        }

        self.remove_player_ship(canvas);
        self.remove_enemy_bullets(canvas);
        self.remove_player_life(canvas);

        if self.lives.is_empty() {
            info!("game over at level {} with score {}", self.level.number(), self.score);
            self.show_banner(canvas, "Game Over!");
            self.phase = GamePhase::GameOver;
        } else {
            debug!("player hit, {} lives left", self.lives.len());
            self.create_and_place_player_ship(canvas);
        }
        true
    }

    // ── Level end ─────────────────────────────────────────────────────────────

    /// Finishes the level once every enemy is gone.
    pub fn end_level(&mut self, canvas: &mut impl Canvas) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Skipped;
        }
        if !self.enemy_ships.is_empty() {
            return TickOutcome::Continue;
        }

        self.remove_player_bullets(canvas);
        self.remove_enemy_bullets(canvas);
        self.remove_player_ship(canvas);

        let completed = self.level;
        match completed.next() {
            Some(next) => {
                self.show_banner(
                    canvas,
                    format!(
                        "Level {} Complete!\nPress S for Next Level",
                        completed.number()
                    ),
                );
                self.level = next;
                self.phase = GamePhase::LevelComplete { completed };
                info!("level {} complete, score {}", completed.number(), self.score);
                TickOutcome::LevelComplete(completed)
            }
            None => {
                self.show_banner(
                    canvas,
                    format!("Level {} Complete!\nYOU WON!", completed.number()),
                );
                self.phase = GamePhase::GameWon;
                info!("game won with score {}", self.score);
                TickOutcome::GameWon
            }
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn add_score(&mut self, canvas: &mut impl Canvas, points: u32) {
        self.score += points;
        if let Some(block) = self.score_block.as_mut() {
            block.set_text(canvas, format!("Score: {}", self.score));
        }
    }

    pub fn remove_player_ship(&mut self, canvas: &mut impl Canvas) {
        if let Some(mut ship) = self.player_ship.take() {
            ship.body.detach(canvas);
        }
    }

    fn remove_player_life(&mut self, canvas: &mut impl Canvas) {
        if !self.lives.is_empty() {
            let mut life = self.lives.remove(0);
            life.body.detach(canvas);
        }
    }

    fn remove_player_bullets(&mut self, canvas: &mut impl Canvas) {
        for mut bullet in self.player_bullets.drain(..) {
            bullet.body.detach(canvas);
        }
    }

    fn remove_enemy_bullets(&mut self, canvas: &mut impl Canvas) {
        for mut bullet in self.enemy_bullets.drain(..) {
            bullet.body.detach(canvas);
        }
    }

    fn show_banner(&mut self, canvas: &mut impl Canvas, text: impl Into<String>) {
        if let Some(mut old) = self.banner.take() {
            old.body.detach(canvas);
        }
        let block = TextBlock::game_over_block();
        let x = self.field.width / 2.0 - block.body.width / 2.0;
        let y = self.field.height / 2.0 - block.body.height / 2.0;
        self.banner = Some(text_block(canvas, block, x, y, text));
    }

    /// Text of the banner currently shown, if any.
    pub fn banner_text(&self) -> Option<&str> {
        self.banner.as_ref().map(TextBlock::text)
    }
}

fn text_block(
    canvas: &mut impl Canvas,
    mut block: TextBlock,
    x: f64,
    y: f64,
    text: impl Into<String>,
) -> TextBlock {
    block.body.x = x;
    block.body.y = y;
    block.set_text(canvas, text);
    block.attach(canvas);
    block
}
