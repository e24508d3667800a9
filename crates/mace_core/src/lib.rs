//! # Mace Core
//!
//! Impact resolution for the mace weapon and the wind charge projectile.
//!
//! This crate contains **only** the gameplay rules:
//! - No host engine types (everything goes through [`host::HostWorld`])
//! - No IO
//! - No networking
//! - No shared state besides the per-actor fall tracker
//!
//! A host wires its movement, melee and projectile events into a
//! [`listener::MaceListener`], which resolves damage, knockback and
//! feedback and issues the resulting mutations back to the host.
//!
//! ## Crate Structure
//!
//! - [`fall`] - Per-actor fall distance tracking
//! - [`impact`] - Fall-smash damage, armor breach and effect tier
//! - [`area`] - Area knockback around an impact point
//! - [`projectile`] - Wind charge burst, block interactions and flight rules
//! - [`listener`] - Event handlers the host calls
//! - [`sandbox`] - In-memory reference host
//! - [`config`] - Tuning data

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod area;
pub mod components;
pub mod config;
pub mod effects;
pub mod error;
pub mod fall;
pub mod host;
pub mod impact;
pub mod listener;
pub mod math;
pub mod projectile;
pub mod sandbox;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::area::{compute_knockback, AreaEffectRequest, KnockbackAssignment};
    pub use crate::components::*;
    pub use crate::config::{MaceConfig, SmashConfig, WindChargeConfig};
    pub use crate::error::{MaceError, Result};
    pub use crate::fall::{FallTracker, SharedFallTracker};
    pub use crate::host::HostWorld;
    pub use crate::impact::{
        calculate_bonus_damage, EffectTier, ImpactResolver, ImpactResult, StrikeInput,
    };
    pub use crate::listener::{EntityDamageByEntityEvent, MaceListener, MoveEvent, SmashOutcome};
    pub use crate::math::{Aabb, DVec3};
    pub use crate::projectile::{
        BlockInteraction, BurstCandidate, BurstEffect, DamageInstruction, ProjectileHit,
        ProjectileImpactEngine, ProjectilePhase, WindCharge,
    };
    pub use crate::sandbox::{HostEffect, SandboxActor, SandboxWorld};
}
