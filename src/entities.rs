//! All game entity types: plain data plus the small helpers that keep a
//! sprite in step with its position.

use crate::canvas::{Canvas, SpriteId, SpriteKind};

// ── Sizes & offsets ───────────────────────────────────────────────────────────

pub const PLAYER_SHIP_WIDTH: f64 = 44.0;
pub const PLAYER_SHIP_HEIGHT: f64 = 24.0;
pub const PLAYER_SHIP_SPEED: f64 = 7.0;
/// Gap between the ship's bottom edge and the bottom of the field.
pub const PLAYER_SHIP_BOTTOM_OFFSET: f64 = 30.0;
/// Where a player bullet appears relative to the ship's top-left corner.
pub const PLAYER_SHIP_TIP_X_OFFSET: f64 = 22.0;
pub const PLAYER_SHIP_TIP_Y_OFFSET: f64 = 15.0;

/// Where an enemy bullet appears relative to the firing ship's top-left corner.
pub const ENEMY_SHIP_CENTER_X: f64 = 20.0;
pub const ENEMY_SHIP_CENTER_Y: f64 = 29.0;

pub const BULLET_WIDTH: f64 = 4.0;
pub const BULLET_HEIGHT: f64 = 12.0;

pub const LIFE_WIDTH: f64 = 20.0;
pub const LIFE_HEIGHT: f64 = 20.0;

pub const SCORE_BLOCK_WIDTH: f64 = 100.0;
pub const SCORE_BLOCK_HEIGHT: f64 = 20.0;

pub const GAME_OVER_BLOCK_WIDTH: f64 = 124.0;
pub const GAME_OVER_BLOCK_HEIGHT: f64 = 34.0;

// ── Levels & tiers ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    One = 1,
    Two,
    Three,
    Four,
}

impl Level {
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => Some(Level::Four),
            Level::Four => None,
        }
    }

    /// Every enemy tier that takes part in this level's wave.
    pub fn tiers(self) -> &'static [EnemyTier] {
        let all: &'static [EnemyTier; 4] = &EnemyTier::ALL;
        &all[..self.number() as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyTier {
    One,
    Two,
    Three,
    Four,
}

impl EnemyTier {
    pub const ALL: [EnemyTier; 4] = [
        EnemyTier::One,
        EnemyTier::Two,
        EnemyTier::Three,
        EnemyTier::Four,
    ];

    /// Points awarded for destroying a ship of this tier.
    pub fn score(self) -> u32 {
        match self {
            EnemyTier::One => 100,
            EnemyTier::Two => 200,
            EnemyTier::Three => 300,
            EnemyTier::Four => 400,
        }
    }

    /// Ships of this tier in a wave.
    pub fn formation_size(self) -> usize {
        match self {
            EnemyTier::One => 2,
            EnemyTier::Two => 4,
            EnemyTier::Three => 6,
            EnemyTier::Four => 8,
        }
    }

    pub fn size(self) -> (f64, f64) {
        match self {
            EnemyTier::One => (40.0, 30.0),
            EnemyTier::Two => (40.0, 36.0),
            EnemyTier::Three => (40.0, 58.0),
            EnemyTier::Four => (48.0, 58.0),
        }
    }

    /// Tier one ships have a single static frame.
    pub fn animates(self) -> bool {
        self != EnemyTier::One
    }
}

// ── Base object ───────────────────────────────────────────────────────────────

/// Position, size and speed of anything on the play-field, plus the handle
/// of the sprite that shows it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub kind: SpriteKind,
    /// `None` until attached to a canvas, and again after detaching.
    pub sprite: Option<SpriteId>,
}

impl GameObject {
    pub fn new(kind: SpriteKind, width: f64, height: f64) -> Self {
        GameObject {
            x: 0.0,
            y: 0.0,
            width,
            height,
            speed_x: 0.0,
            speed_y: 0.0,
            kind,
            sprite: None,
        }
    }

    /// Adds a fresh sprite for this object and renders it where it is.
    pub fn attach(&mut self, canvas: &mut impl Canvas) {
        let id = canvas.add(self.kind);
        self.sprite = Some(id);
        canvas.render_at(id, self.x, self.y);
    }

    pub fn detach(&mut self, canvas: &mut impl Canvas) {
        if let Some(id) = self.sprite.take() {
            canvas.remove(id);
        }
    }

    /// Forgets the sprite handle without touching the canvas, for when the
    /// canvas has already been cleared.
    pub fn forget_sprite(&mut self) {
        self.sprite = None;
    }

    pub fn move_to(&mut self, canvas: &mut impl Canvas, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.render(canvas);
    }

    pub fn move_by(&mut self, canvas: &mut impl Canvas, dx: f64, dy: f64) {
        self.move_to(canvas, self.x + dx, self.y + dy);
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        if let Some(id) = self.sprite {
            canvas.render_at(id, self.x, self.y);
        }
    }
}

// ── Concrete entities ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerShip {
    pub body: GameObject,
}

impl PlayerShip {
    pub fn new() -> Self {
        let mut body = GameObject::new(
            SpriteKind::PlayerShip,
            PLAYER_SHIP_WIDTH,
            PLAYER_SHIP_HEIGHT,
        );
        body.speed_x = PLAYER_SHIP_SPEED;
        PlayerShip { body }
    }
}

impl Default for PlayerShip {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyShip {
    pub tier: EnemyTier,
    pub body: GameObject,
}

impl EnemyShip {
    pub fn new(tier: EnemyTier) -> Self {
        let (width, height) = tier.size();
        EnemyShip {
            tier,
            body: GameObject::new(SpriteKind::EnemyShip(tier), width, height),
        }
    }

    /// Flips the sprite between its two frames; static tiers do nothing.
    pub fn animate(&self, canvas: &mut impl Canvas) {
        if !self.tier.animates() {
            return;
        }
        if let Some(id) = self.body.sprite {
            canvas.toggle_frame(id);
        }
    }
}

/// A bullet.  Which way it flies depends on the collection holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub body: GameObject,
}

impl Bullet {
    pub fn new() -> Self {
        Bullet {
            body: GameObject::new(SpriteKind::Bullet, BULLET_WIDTH, BULLET_HEIGHT),
        }
    }

    /// An unattached bullet at the given position.
    pub fn at(x: f64, y: f64) -> Self {
        let mut bullet = Self::new();
        bullet.body.x = x;
        bullet.body.y = y;
        bullet
    }
}

impl Default for Bullet {
    fn default() -> Self {
        Self::new()
    }
}

/// One remaining attempt, shown in the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Life {
    pub body: GameObject,
}

impl Life {
    pub fn new() -> Self {
        Life {
            body: GameObject::new(SpriteKind::Life, LIFE_WIDTH, LIFE_HEIGHT),
        }
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::new()
    }
}

/// A text label: the score and level blocks, or the end-of-level banner.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub body: GameObject,
    text: String,
}

impl TextBlock {
    pub fn score_block() -> Self {
        TextBlock {
            body: GameObject::new(
                SpriteKind::ScoreBlock,
                SCORE_BLOCK_WIDTH,
                SCORE_BLOCK_HEIGHT,
            ),
            text: String::new(),
        }
    }

    pub fn game_over_block() -> Self {
        TextBlock {
            body: GameObject::new(
                SpriteKind::GameOverBlock,
                GAME_OVER_BLOCK_WIDTH,
                GAME_OVER_BLOCK_HEIGHT,
            ),
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, canvas: &mut impl Canvas, text: impl Into<String>) {
        self.text = text.into();
        if let Some(id) = self.body.sprite {
            canvas.set_text(id, &self.text);
        }
    }

    /// Attaches the sprite and pushes the current text to it.
    pub fn attach(&mut self, canvas: &mut impl Canvas) {
        self.body.attach(canvas);
        if let Some(id) = self.body.sprite {
            canvas.set_text(id, &self.text);
        }
    }
}
