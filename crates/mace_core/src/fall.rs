//! Per-actor fall distance tracking.
//!
//! An entry is created the first time an actor moves downward, grows with
//! every further drop, and disappears when the actor lands or when a strike
//! consumes it. A present entry always holds a distance greater than zero.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::components::ActorId;

/// Accumulated fall distance per airborne actor.
#[derive(Debug, Clone, Default)]
pub struct FallTracker {
    distances: HashMap<ActorId, f64>,
}

impl FallTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            distances: HashMap::new(),
        }
    }

    /// Add `drop` blocks to the actor's fall distance.
    ///
    /// Drops that are not strictly positive and finite are ignored so the
    /// map never holds a zero or NaN entry.
    pub fn on_descend(&mut self, actor: ActorId, drop: f64) {
        if !drop.is_finite() || drop <= 0.0 {
            return;
        }
        *self.distances.entry(actor).or_insert(0.0) += drop;
    }

    /// Forget the actor's fall; no-op when not tracked.
    pub fn on_grounded(&mut self, actor: ActorId) {
        self.distances.remove(&actor);
    }

    /// Take the actor's accumulated distance, clearing it.
    pub fn consume(&mut self, actor: ActorId) -> Option<f64> {
        self.distances.remove(&actor)
    }

    /// Read the actor's accumulated distance without clearing it.
    #[must_use]
    pub fn distance(&self, actor: ActorId) -> Option<f64> {
        self.distances.get(&actor).copied()
    }

    /// Number of actors currently falling.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether no actor is falling.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Tracked actors with their distances, sorted by ID.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(ActorId, f64)> {
        let mut entries: Vec<_> = self.distances.iter().map(|(id, d)| (*id, *d)).collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

/// A [`FallTracker`] behind a single lock, for hosts that deliver movement
/// and damage events from more than one worker thread.
///
/// `consume` reads and clears under one lock acquisition, so two
/// concurrent strikes by the same actor can never both see the fall.
#[derive(Debug, Clone, Default)]
pub struct SharedFallTracker {
    inner: Arc<Mutex<FallTracker>>,
}

impl SharedFallTracker {
    /// Create an empty shared tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`FallTracker::on_descend`].
    pub fn on_descend(&self, actor: ActorId, drop: f64) {
        self.inner.lock().on_descend(actor, drop);
    }

    /// See [`FallTracker::on_grounded`].
    pub fn on_grounded(&self, actor: ActorId) {
        self.inner.lock().on_grounded(actor);
    }

    /// See [`FallTracker::consume`].
    pub fn consume(&self, actor: ActorId) -> Option<f64> {
        self.inner.lock().consume(actor)
    }

    /// See [`FallTracker::distance`].
    #[must_use]
    pub fn distance(&self, actor: ActorId) -> Option<f64> {
        self.inner.lock().distance(actor)
    }

    /// Run `f` with exclusive access to the underlying tracker.
    pub fn with<R>(&self, f: impl FnOnce(&mut FallTracker) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
