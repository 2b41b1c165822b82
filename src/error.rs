//! Error types for the roster rating service
//!
//! The scoring core returns [`RatingResult`] so callers can match on the
//! variant; the roster service and binary use the anyhow-based [`Result`].

use crate::types::Attribute;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Result type for the pure scoring core
pub type RatingResult<T> = std::result::Result<T, RosterError>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error("Unknown position: {position}")]
    UnknownPosition { position: String },

    #[error("Unknown position group: {group}")]
    UnknownPositionGroup { group: String },

    #[error("Weights for position {position} sum to zero")]
    DivisionByZero { position: String },

    #[error("Invalid {attribute} rating: {value}")]
    InvalidRating { attribute: Attribute, value: i32 },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Player already exists: {email}")]
    DuplicatePlayer { email: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Players cannot rate themselves: {email}")]
    SelfRating { email: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}

impl RosterError {
    /// Short label used for metric dimensions
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::UnknownPosition { .. } => "unknown_position",
            RosterError::UnknownPositionGroup { .. } => "unknown_position_group",
            RosterError::DivisionByZero { .. } => "division_by_zero",
            RosterError::InvalidRating { .. } => "invalid_rating",
            RosterError::InvalidPlayer { .. } => "invalid_player",
            RosterError::DuplicatePlayer { .. } => "duplicate_player",
            RosterError::PlayerNotFound { .. } => "player_not_found",
            RosterError::SelfRating { .. } => "self_rating",
            RosterError::ConfigurationError { .. } => "configuration",
            RosterError::InternalError { .. } => "internal",
        }
    }
}
