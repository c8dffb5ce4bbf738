//! Versioned snapshots and optimistic local updates.
//!
//! A client applies an engine result locally right away, then confirms it
//! against the backend. Fetched snapshots only replace the local state when
//! their version is strictly newer than the version the client holds, so a
//! slow refresh cannot clobber an optimistic result with stale data.

use serde::{Deserialize, Serialize};

/// A snapshot tagged with a monotonically increasing version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Server-assigned version. Higher is newer.
    pub version: u64,
    /// The snapshot.
    pub value: T,
}

impl<T> Versioned<T> {
    /// Wrap a value with a version.
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}

/// Handle identifying one optimistic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    token: PendingToken,
    value: T,
}

/// Holds the last confirmed snapshot plus at most one optimistic update.
#[derive(Debug, Clone)]
pub struct OptimisticSlot<T> {
    confirmed: Versioned<T>,
    pending: Option<Pending<T>>,
    next_token: u64,
}

impl<T> OptimisticSlot<T> {
    /// Start from a confirmed snapshot.
    pub fn new(confirmed: Versioned<T>) -> Self {
        Self {
            confirmed,
            pending: None,
            next_token: 0,
        }
    }

    /// The value the client should display: the optimistic one if present.
    pub fn current(&self) -> &T {
        self.pending
            .as_ref()
            .map(|p| &p.value)
            .unwrap_or(&self.confirmed.value)
    }

    /// The last snapshot the backend confirmed.
    pub fn confirmed(&self) -> &Versioned<T> {
        &self.confirmed
    }

    /// Returns true while an optimistic update awaits confirmation.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The version the client currently holds. An optimistic update counts
    /// as one version ahead of the confirmed snapshot.
    pub fn held_version(&self) -> u64 {
        if self.pending.is_some() {
            self.confirmed.version + 1
        } else {
            self.confirmed.version
        }
    }

    /// Apply a result locally. Replaces any earlier unconfirmed update.
    pub fn apply_local(&mut self, value: T) -> PendingToken {
        self.next_token += 1;
        let token = PendingToken(self.next_token);
        self.pending = Some(Pending { token, value });
        token
    }

    /// The backend accepted the update identified by `token`.
    ///
    /// Returns false if the token was superseded or already resolved.
    pub fn confirm(&mut self, token: PendingToken, server: Versioned<T>) -> bool {
        match &self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                if server.version >= self.confirmed.version {
                    self.confirmed = server;
                }
                true
            }
            _ => false,
        }
    }

    /// The backend rejected the update identified by `token`; revert to the
    /// confirmed snapshot.
    pub fn rollback(&mut self, token: PendingToken) -> bool {
        match &self.pending {
            Some(p) if p.token == token => {
                tracing::debug!(
                    version = self.confirmed.version,
                    "rolling back optimistic update"
                );
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Offer a fetched or broadcast snapshot. It is applied only if strictly
    /// newer than [`OptimisticSlot::held_version`]; applying it discards any
    /// optimistic update.
    pub fn offer_remote(&mut self, snapshot: Versioned<T>) -> bool {
        let held = self.held_version();
        if snapshot.version <= held {
            tracing::debug!(
                offered = snapshot.version,
                held,
                "ignoring snapshot that is not newer than held state"
            );
            return false;
        }
        self.pending = None;
        self.confirmed = snapshot;
        true
    }
}
