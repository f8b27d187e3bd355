// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory stand-ins for the browser collaborators.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use runway_core::media::{MediaElement, MediaState, PlayTicket, ReadyState};
use runway_core::prefs::{KeyValueStore, StoreError};
use runway_core::status::Surface;
use runway_core::time::Duration;
use runway_core::timecode::Timecode;
use runway_core::timer::{Repeat, TimerHost, TimerKind};

/// A scripted media element.
///
/// Play requests are queued until the test settles them; commands mutate
/// [`state`](Self::state) the way a real element would.
#[derive(Clone, Debug, Default)]
pub struct FakeMedia {
    /// What [`MediaElement::snapshot`] returns.
    pub state: MediaState,
    /// Every ticket passed to `request_play`, in order.
    pub requests: Vec<PlayTicket>,
    /// How many requests have been settled.
    pub settled: usize,
    /// Number of `pause` calls.
    pub pauses: u32,
    /// Every position written by `set_current_time` or `fast_seek`.
    pub seeks: Vec<f64>,
    /// Whether `fast_seek` is available.
    pub fast_seek_supported: bool,
    /// Number of seeks that went through `fast_seek`.
    pub fast_seeks: u32,
}

impl FakeMedia {
    /// An element with metadata loaded and nothing playing.
    #[must_use]
    pub fn loaded(duration: f64) -> Self {
        Self {
            state: MediaState {
                current_time: 0.0,
                duration,
                ready_state: ReadyState::HaveEnoughData,
                paused: true,
                errored: false,
            },
            ..Self::default()
        }
    }

    /// Returns the oldest unsettled request and marks it settled.
    pub fn take_pending(&mut self) -> Option<PlayTicket> {
        let ticket = self.requests.get(self.settled).copied()?;
        self.settled += 1;
        Some(ticket)
    }

    /// Number of requests not yet settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.requests.len() - self.settled
    }
}

impl MediaElement for FakeMedia {
    fn snapshot(&self) -> MediaState {
        self.state
    }

    fn request_play(&mut self, ticket: PlayTicket) {
        self.requests.push(ticket);
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.state.paused = true;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.state.current_time = seconds;
    }

    fn fast_seek(&mut self, seconds: f64) -> bool {
        if !self.fast_seek_supported {
            return false;
        }
        self.fast_seeks += 1;
        self.set_current_time(seconds);
        true
    }
}

/// A key-value store backed by a map, with failure injection.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Stored values.
    pub map: BTreeMap<String, String>,
    /// If set, every read fails with this error.
    pub fail_reads: Option<StoreError>,
    /// If set, every write fails with this error.
    pub fail_writes: Option<StoreError>,
    /// Number of attempted writes (including failed ones).
    pub writes: u32,
}

impl MemoryStore {
    /// A store pre-populated with `entries`.
    #[must_use]
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            map: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// A store that behaves like disabled storage in private browsing.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            fail_reads: Some(StoreError::Unavailable),
            fail_writes: Some(StoreError::Unavailable),
            ..Self::default()
        }
    }

    /// Returns the stored value for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(error) = self.fail_reads {
            return Err(error);
        }
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes += 1;
        if let Some(error) = self.fail_writes {
            return Err(error);
        }
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One armed timer slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmedTimer {
    /// Delay or period.
    pub delay: Duration,
    /// One-shot or periodic.
    pub repeat: Repeat,
}

/// A timer host that only records slot state; tests fire slots by hand.
#[derive(Clone, Debug, Default)]
pub struct FakeTimers {
    slots: [Option<ArmedTimer>; 4],
    /// Times each kind was armed.
    pub arm_counts: [u32; 4],
}

impl FakeTimers {
    /// Returns the armed slot for `kind`.
    #[must_use]
    pub fn get(&self, kind: TimerKind) -> Option<ArmedTimer> {
        self.slots[kind.index()]
    }

    /// Whether `kind` is armed.
    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.get(kind).is_some()
    }

    /// How many times `kind` has been armed.
    #[must_use]
    pub fn arm_count(&self, kind: TimerKind) -> u32 {
        self.arm_counts[kind.index()]
    }

    /// Consumes a one-shot slot the way a host does when it fires.
    pub fn expire(&mut self, kind: TimerKind) -> Option<ArmedTimer> {
        let slot = self.get(kind)?;
        if slot.repeat == Repeat::Once {
            self.slots[kind.index()] = None;
        }
        Some(slot)
    }
}

impl TimerHost for FakeTimers {
    fn arm(&mut self, kind: TimerKind, delay: Duration, repeat: Repeat) {
        self.slots[kind.index()] = Some(ArmedTimer { delay, repeat });
        self.arm_counts[kind.index()] += 1;
    }

    fn disarm(&mut self, kind: TimerKind) {
        self.slots[kind.index()] = None;
    }
}

/// A surface that remembers the latest value of every field.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Current status text.
    pub status: String,
    /// Number of status writes.
    pub status_writes: u32,
    /// Current timecode text.
    pub timecode: Option<String>,
    /// Number of timecode writes.
    pub timecode_writes: u32,
    /// Current toggle state.
    pub sound_toggle: Option<bool>,
    /// Current prompt visibility.
    pub play_prompt: Option<bool>,
}

impl Surface for RecordingSurface {
    fn set_status(&mut self, text: &str) {
        self.status_writes += 1;
        self.status = text.to_string();
    }

    fn set_timecode(&mut self, timecode: Timecode) {
        self.timecode_writes += 1;
        self.timecode = Some(timecode.to_string());
    }

    fn set_sound_toggle(&mut self, sound_enabled: bool) {
        self.sound_toggle = Some(sound_enabled);
    }

    fn set_play_prompt_visible(&mut self, visible: bool) {
        self.play_prompt = Some(visible);
    }
}
