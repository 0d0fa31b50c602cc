//! The game manager: canvas, session state and the three periodic tasks.
//!
//! Everything runs on one thread.  The host calls [`GameManager::advance`]
//! with the time that has passed and feeds input through the command
//! methods in between; the order of the two is whatever order the host
//! delivers them in.

use std::time::Duration;

use log::info;
use rand::Rng;

use crate::canvas::Canvas;
use crate::entities::Level;
use crate::error::GameError;
use crate::scheduler::{Scheduler, Task, Timings};
use crate::session::{GamePhase, PlayField, SessionState, TickOutcome};
use crate::settings::Settings;

/// Input commands the host can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    FireBullet,
    /// Build the next level's field and resume play after a level is cleared.
    StartNextLevel,
    ResetGame,
}

pub struct GameManager<C: Canvas> {
    canvas: Option<C>,
    state: SessionState,
    scheduler: Scheduler,
}

impl<C: Canvas> GameManager<C> {
    /// A manager for a `width` × `height` field with the default timer
    /// intervals.  The timers start immediately; nothing is on the field
    /// until [`GameManager::initialize_game`] attaches a canvas.
    pub fn new(width: f64, height: f64) -> Result<Self, GameError> {
        Self::with_timings(width, height, Timings::default())
    }

    pub fn with_timings(width: f64, height: f64, timings: Timings) -> Result<Self, GameError> {
        let field = PlayField::new(width, height)?;
        let mut scheduler = Scheduler::new(&timings);
        scheduler.start_all();
        Ok(GameManager {
            canvas: None,
            state: SessionState::new(field),
            scheduler,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GameError> {
        Self::with_timings(
            settings.field_width,
            settings.field_height,
            settings.timings(),
        )
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Direct access to the session record, for hosts and tests that need
    /// to stage a situation.
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn level(&self) -> Level {
        self.state.level
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    // ── Setup ─────────────────────────────────────────────────────────────────

    /// Rebuilds the field for the current level and resumes the timers.
    /// `Some(canvas)` replaces the attached canvas; `None` keeps the one
    /// already attached.
    pub fn initialize_game(&mut self, canvas: Option<C>) -> Result<(), GameError> {
        if let Some(canvas) = canvas {
            self.canvas = Some(canvas);
        }
        let canvas = self.canvas.as_mut().ok_or(GameError::MissingPlayField)?;
        self.state.initialize(canvas);
        self.resume_timers();
        info!(
            "level {} initialized with {} enemies",
            self.state.level.number(),
            self.state.enemy_ships.len()
        );
        Ok(())
    }

    /// Starts over from level one and resumes the timers.
    pub fn reset_game(&mut self, canvas: Option<C>) -> Result<(), GameError> {
        if let Some(canvas) = canvas {
            self.canvas = Some(canvas);
        }
        let canvas = self.canvas.as_mut().ok_or(GameError::MissingPlayField)?;
        self.state.reset(canvas);
        self.resume_timers();
        info!("game reset");
        Ok(())
    }

    /// Moves on after a cleared level.  Does nothing in any other phase.
    pub fn start_next_level(&mut self) -> Result<(), GameError> {
        if !matches!(self.state.phase, GamePhase::LevelComplete { .. }) {
            return Ok(());
        }
        self.initialize_game(None)
    }

    pub fn resume_timers(&mut self) {
        self.scheduler.start_all();
    }

    pub fn stop_timers(&mut self) {
        self.scheduler.stop_all();
    }

    // ── Player input ──────────────────────────────────────────────────────────

    pub fn move_player_ship_left(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            self.state.move_player_ship_left(canvas);
        }
    }

    pub fn move_player_ship_right(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            self.state.move_player_ship_right(canvas);
        }
    }

    pub fn fire_player_bullet(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            self.state.fire_player_bullet(canvas);
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::MoveLeft => self.move_player_ship_left(),
            Command::MoveRight => self.move_player_ship_right(),
            Command::FireBullet => self.fire_player_bullet(),
            Command::StartNextLevel => self.start_next_level()?,
            Command::ResetGame => self.reset_game(None)?,
        }
        Ok(())
    }

    // ── Time ──────────────────────────────────────────────────────────────────

    /// Lets `dt` of game time pass, running every task that falls due in
    /// time order.  A task that stops the timers prevents any later firing
    /// within the same call.
    pub fn advance(&mut self, dt: Duration, rng: &mut impl Rng) {
        let mut budget = dt;
        while let Some(task) = self.scheduler.next_due(&mut budget) {
            self.run_task(task, rng);
        }
    }

    pub fn run_task(&mut self, task: Task, rng: &mut impl Rng) {
        match task {
            Task::GameTick => {
                self.game_tick();
            }
            Task::EnemyFire => self.fire_enemy_bullet(rng),
            Task::EnemyAnimation => self.animate_enemy_ships(),
        }
    }

    /// One main tick.  Stops all timers when the tick ends the level or the
    /// game.
    pub fn game_tick(&mut self) -> TickOutcome {
        let Some(canvas) = self.canvas.as_mut() else {
            return TickOutcome::Skipped;
        };
        let outcome = self.state.game_tick(canvas);
        if outcome.halts_play() {
            self.stop_timers();
        }
        outcome
    }

    pub fn fire_enemy_bullet(&mut self, rng: &mut impl Rng) {
        if let Some(canvas) = self.canvas.as_mut() {
            self.state.fire_enemy_bullet(canvas, rng);
        }
    }

    pub fn animate_enemy_ships(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            self.state.animate_enemy_ships(canvas);
        }
    }
}
