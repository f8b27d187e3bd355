// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted sound preference.
//!
//! Two flags survive page reloads: whether sound is enabled, and whether the
//! user has ever unlocked audio with a real gesture. [`PreferenceStore`]
//! mirrors them in memory, so reads never touch storage. Writes are deferred
//! until [`flush`](PreferenceStore::flush), which the coordinator runs from a
//! zero-delay timer so storage I/O never happens inside an input handler.
//!
//! Storage may be missing entirely (private browsing, sandboxed iframes).
//! Reads then behave as "not set" and writes are dropped after tracing the
//! failure; the preference degrades to session-only.

use alloc::string::String;
use core::fmt;

use crate::config::StorageKeys;
use crate::time::HostTime;
use crate::trace::{StorageErrorEvent, StorageOp, Tracer};

const SOUND_ON: &str = "on";
const SOUND_OFF: &str = "off";
const UNLOCKED: &str = "1";

/// Why a storage operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreError {
    /// No storage is available in this context.
    Unavailable,
    /// The origin's quota is exhausted.
    QuotaExceeded,
    /// Any other failure.
    Other,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unavailable => "storage unavailable",
            Self::QuotaExceeded => "storage quota exceeded",
            Self::Other => "storage operation failed",
        })
    }
}

impl core::error::Error for StoreError {}

/// A durable per-origin string key-value store.
pub trait KeyValueStore {
    /// Reads `key`. `Ok(None)` means the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The two persisted flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlaybackPreference {
    /// The user wants sound.
    pub sound_enabled: bool,
    /// A genuine user gesture has turned sound on at some point.
    ///
    /// One-way: once set it is never cleared.
    pub audio_unlocked_by_user: bool,
}

impl PlaybackPreference {
    /// Whether audio playback may be attempted.
    #[must_use]
    pub const fn allows_audio(&self) -> bool {
        self.sound_enabled && self.audio_unlocked_by_user
    }
}

/// In-memory mirror of the persisted preference with deferred write-back.
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    keys: StorageKeys,
    current: PlaybackPreference,
    dirty: bool,
}

impl PreferenceStore {
    /// Creates a store with the given initial values and nothing to flush.
    #[must_use]
    pub const fn new(keys: StorageKeys, initial: PlaybackPreference) -> Self {
        Self {
            keys,
            current: initial,
            dirty: false,
        }
    }

    /// Loads both flags from `backend`.
    ///
    /// Read failures are traced and count as "not set".
    #[must_use]
    pub fn load(
        backend: &dyn KeyValueStore,
        keys: StorageKeys,
        at: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let mut read = |key: &'static str| match backend.get(key) {
            Ok(value) => value,
            Err(error) => {
                tracer.storage_error(&StorageErrorEvent {
                    at,
                    key,
                    op: StorageOp::Read,
                    error,
                });
                None
            }
        };
        let sound_enabled = read(keys.sound).is_some_and(|v| v == SOUND_ON);
        let audio_unlocked_by_user = read(keys.unlocked).is_some_and(|v| v == UNLOCKED);
        Self::new(
            keys,
            PlaybackPreference {
                sound_enabled,
                audio_unlocked_by_user,
            },
        )
    }

    /// Returns the current preference.
    #[must_use]
    pub const fn get(&self) -> PlaybackPreference {
        self.current
    }

    /// Whether there are changes not yet written to storage.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the sound flag. Returns `true` if the value changed.
    pub fn set_sound_enabled(&mut self, enabled: bool) -> bool {
        // Always schedule a write: storage may disagree with the mirror after
        // an earlier failed flush.
        self.dirty = true;
        let changed = self.current.sound_enabled != enabled;
        self.current.sound_enabled = enabled;
        changed
    }

    /// Records that a user gesture unlocked audio. Returns `true` the first
    /// time only.
    pub fn mark_unlocked(&mut self) -> bool {
        self.dirty = true;
        let first = !self.current.audio_unlocked_by_user;
        self.current.audio_unlocked_by_user = true;
        first
    }

    /// Writes the mirrored values to `backend`.
    ///
    /// Failures are traced and otherwise ignored. The store is clean after a
    /// flush either way; there is no retry loop.
    pub fn flush(
        &mut self,
        backend: &mut dyn KeyValueStore,
        at: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let sound = if self.current.sound_enabled {
            SOUND_ON
        } else {
            SOUND_OFF
        };
        if let Err(error) = backend.set(self.keys.sound, sound) {
            tracer.storage_error(&StorageErrorEvent {
                at,
                key: self.keys.sound,
                op: StorageOp::Write,
                error,
            });
        }

        if self.current.audio_unlocked_by_user
            && let Err(error) = backend.set(self.keys.unlocked, UNLOCKED)
        {
            tracer.storage_error(&StorageErrorEvent {
                at,
                key: self.keys.unlocked,
                op: StorageOp::Write,
                error,
            });
        }
    }
}
