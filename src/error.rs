use thiserror::Error;

/// Argument errors raised when building or (re)initializing a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("play-field {dimension} must be positive, got {value}")]
    DimensionOutOfRange { dimension: &'static str, value: f64 },

    #[error("no play-field canvas attached")]
    MissingPlayField,
}

/// Failures while loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} interval must be at least 1 ms")]
    Interval { name: &'static str },
}
