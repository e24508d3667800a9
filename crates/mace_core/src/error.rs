//! Error types for impact resolution.
//!
//! The resolution math itself never fails: missing preconditions are
//! reported as "no effect" values. These errors cover the fallible edges
//! only (tuning data, host lookups, projectile lifecycle).

use thiserror::Error;

use crate::components::ActorId;

/// Result type alias using [`MaceError`].
pub type Result<T> = std::result::Result<T, MaceError>;

/// Top-level error type for the mace core.
#[derive(Debug, Error)]
pub enum MaceError {
    /// Tuning data could not be parsed.
    #[error("Failed to parse tuning data: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Tuning data parsed but failed validation.
    #[error("Invalid tuning data: {0:?}")]
    InvalidConfig(Vec<String>),

    /// The host has no actor with this ID.
    #[error("Actor not found: {0}")]
    UnknownActor(ActorId),

    /// The projectile already burst and was removed.
    #[error("Projectile {0} has already been resolved")]
    ProjectileResolved(ActorId),
}
