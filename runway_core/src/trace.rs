// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the coordinator.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! coordinator emits. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::drift::DriftDecision;
use crate::gate::{AudioRefusal, GateState};
use crate::media::{MediaKind, PlayRejection, PlayTicket};
use crate::prefs::StoreError;
use crate::status::SyncStatus;
use crate::time::{Duration, HostTime};
use crate::timer::{Repeat, TimerKind};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What caused a drift check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriftTrigger {
    /// The periodic sync task.
    Interval,
    /// Video `seeked`.
    Seeked,
    /// Video `playing`.
    Playing,
    /// Video `ended`.
    Ended,
    /// Alignment before an audio play request.
    Prime,
}

/// A timer slot operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerAction {
    /// The slot was armed.
    Armed {
        /// Delay or period.
        delay: Duration,
        /// One-shot or periodic.
        repeat: Repeat,
    },
    /// The slot was disarmed.
    Disarmed,
    /// The slot fired.
    Fired,
}

/// A storage operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageOp {
    /// Read.
    Read,
    /// Write.
    Write,
}

/// A user input the coordinator received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer release on the sound toggle.
    TogglePointerUp,
    /// Click on the sound toggle.
    ToggleClick,
    /// Click on the play prompt.
    PlayPrompt,
    /// Pointer release on the stage.
    Stage,
    /// Enter or Space.
    Key,
    /// The navigation key.
    Navigate,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the combined gate state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// When.
    pub at: HostTime,
    /// Previous state.
    pub from: GateState,
    /// New state.
    pub to: GateState,
}

/// Emitted when a play request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayRequestEvent {
    /// When.
    pub at: HostTime,
    /// Which element.
    pub media: MediaKind,
    /// Request ticket.
    pub ticket: PlayTicket,
}

/// Emitted when a play request settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaySettledEvent {
    /// When.
    pub at: HostTime,
    /// Which element.
    pub media: MediaKind,
    /// Request ticket.
    pub ticket: PlayTicket,
    /// Outcome.
    pub result: Result<(), PlayRejection>,
    /// The request had been superseded.
    pub stale: bool,
}

/// Emitted for every drift check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftEvent {
    /// When.
    pub at: HostTime,
    /// What caused the check.
    pub trigger: DriftTrigger,
    /// What the corrector decided.
    pub decision: DriftDecision,
}

/// Emitted when the status region changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusEvent {
    /// When.
    pub at: HostTime,
    /// New status.
    pub status: SyncStatus,
}

/// Emitted for timer slot operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerEvent {
    /// When.
    pub at: HostTime,
    /// Which slot.
    pub kind: TimerKind,
    /// What happened.
    pub action: TimerAction,
}

/// Emitted when storage fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageErrorEvent {
    /// When.
    pub at: HostTime,
    /// Key involved.
    pub key: &'static str,
    /// Operation.
    pub op: StorageOp,
    /// Failure.
    pub error: StoreError,
}

/// Emitted when an audio start is not attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioRefusedEvent {
    /// When.
    pub at: HostTime,
    /// Why.
    pub reason: AudioRefusal,
}

/// Emitted for each user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// When.
    pub at: HostTime,
    /// Which input.
    pub input: InputKind,
    /// Whether the input had an effect (false for deduplicated clicks and
    /// gestures while nothing is pending).
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the coordinator.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called when the combined gate state changes.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a play request is issued.
    fn on_play_requested(&mut self, e: &PlayRequestEvent) {
        _ = e;
    }

    /// Called when a play request settles.
    fn on_play_settled(&mut self, e: &PlaySettledEvent) {
        _ = e;
    }

    /// Called for every drift check.
    fn on_drift(&mut self, e: &DriftEvent) {
        _ = e;
    }

    /// Called when the status region changes.
    fn on_status(&mut self, e: &StatusEvent) {
        _ = e;
    }

    /// Called for timer slot operations.
    fn on_timer(&mut self, e: &TimerEvent) {
        _ = e;
    }

    /// Called when storage fails.
    fn on_storage_error(&mut self, e: &StorageErrorEvent) {
        _ = e;
    }

    /// Called when an audio start is not attempted.
    fn on_audio_refused(&mut self, e: &AudioRefusedEvent) {
        _ = e;
    }

    /// Called for each user input.
    fn on_input(&mut self, e: &InputEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! forward {
    ($(#[$doc:meta] $name:ident => $method:ident($ty:ty);)*) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&mut self, e: &$ty) {
                #[cfg(feature = "trace")]
                if let Some(s) = &mut self.sink {
                    s.$method(e);
                }
                #[cfg(not(feature = "trace"))]
                {
                    _ = e;
                }
            }
        )*
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward! {
        /// Emits a [`TransitionEvent`].
        transition => on_transition(TransitionEvent);
        /// Emits a [`PlayRequestEvent`].
        play_requested => on_play_requested(PlayRequestEvent);
        /// Emits a [`PlaySettledEvent`].
        play_settled => on_play_settled(PlaySettledEvent);
        /// Emits a [`DriftEvent`].
        drift => on_drift(DriftEvent);
        /// Emits a [`StatusEvent`].
        status => on_status(StatusEvent);
        /// Emits a [`TimerEvent`].
        timer => on_timer(TimerEvent);
        /// Emits a [`StorageErrorEvent`].
        storage_error => on_storage_error(StorageErrorEvent);
        /// Emits an [`AudioRefusedEvent`].
        audio_refused => on_audio_refused(AudioRefusedEvent);
        /// Emits an [`InputEvent`].
        input => on_input(InputEvent);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
