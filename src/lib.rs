//! Space Pirates: a fixed-field arcade shooter core.
//!
//! - `session`: the session record and the per-tick rules
//! - `manager`: canvas, session and the three periodic tasks
//! - `scheduler`: step-driven periodic timers
//! - `formation` / `collision`: enemy waves and hit tests
//! - `canvas`: the render boundary and an in-memory scene

pub mod canvas;
pub mod collision;
pub mod entities;
pub mod error;
pub mod formation;
pub mod manager;
pub mod scheduler;
pub mod session;
pub mod settings;

pub use canvas::{Canvas, Scene, SpriteId, SpriteKind};
pub use entities::{EnemyTier, Level};
pub use error::{GameError, SettingsError};
pub use manager::{Command, GameManager};
pub use scheduler::{Scheduler, Task, Timings};
pub use session::{GamePhase, PlayField, SessionState, TickOutcome};
pub use settings::Settings;
