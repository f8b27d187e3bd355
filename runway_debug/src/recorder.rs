// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it sees,
//! in arrival order, as a [`RecordedEvent`]. Coordinator sessions emit a few
//! events per second, so recordings stay small enough to keep whole.

use runway_core::trace::{
    AudioRefusedEvent, DriftEvent, InputEvent, PlayRequestEvent, PlaySettledEvent,
    StatusEvent, StorageErrorEvent, TimerEvent, TraceSink, TransitionEvent,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_transition`].
    Transition(TransitionEvent),
    /// See [`TraceSink::on_play_requested`].
    PlayRequested(PlayRequestEvent),
    /// See [`TraceSink::on_play_settled`].
    PlaySettled(PlaySettledEvent),
    /// See [`TraceSink::on_drift`].
    Drift(DriftEvent),
    /// See [`TraceSink::on_status`].
    Status(StatusEvent),
    /// See [`TraceSink::on_timer`].
    Timer(TimerEvent),
    /// See [`TraceSink::on_storage_error`].
    StorageError(StorageErrorEvent),
    /// See [`TraceSink::on_audio_refused`].
    AudioRefused(AudioRefusedEvent),
    /// See [`TraceSink::on_input`].
    Input(InputEvent),
}

impl RecordedEvent {
    /// Host time the event carries, in microseconds.
    #[must_use]
    pub fn at_micros(&self) -> u64 {
        match self {
            Self::Transition(e) => e.at.ticks(),
            Self::PlayRequested(e) => e.at.ticks(),
            Self::PlaySettled(e) => e.at.ticks(),
            Self::Drift(e) => e.at.ticks(),
            Self::Status(e) => e.at.ticks(),
            Self::Timer(e) => e.at.ticks(),
            Self::StorageError(e) => e.at.ticks(),
            Self::AudioRefused(e) => e.at.ticks(),
            Self::Input(e) => e.at.ticks(),
        }
    }
}

/// A [`TraceSink`] that stores every event.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        self.events.push(RecordedEvent::Transition(*e));
    }

    fn on_play_requested(&mut self, e: &PlayRequestEvent) {
        self.events.push(RecordedEvent::PlayRequested(*e));
    }

    fn on_play_settled(&mut self, e: &PlaySettledEvent) {
        self.events.push(RecordedEvent::PlaySettled(*e));
    }

    fn on_drift(&mut self, e: &DriftEvent) {
        self.events.push(RecordedEvent::Drift(*e));
    }

    fn on_status(&mut self, e: &StatusEvent) {
        self.events.push(RecordedEvent::Status(*e));
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        self.events.push(RecordedEvent::Timer(*e));
    }

    fn on_storage_error(&mut self, e: &StorageErrorEvent) {
        self.events.push(RecordedEvent::StorageError(*e));
    }

    fn on_audio_refused(&mut self, e: &AudioRefusedEvent) {
        self.events.push(RecordedEvent::AudioRefused(*e));
    }

    fn on_input(&mut self, e: &InputEvent) {
        self.events.push(RecordedEvent::Input(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::gate::GateState;
    use runway_core::status::SyncStatus;
    use runway_core::time::HostTime;
    use runway_core::trace::Tracer;

    #[test]
    fn records_in_arrival_order() {
        let mut rec = RecorderSink::new();
        rec.on_transition(&TransitionEvent {
            at: HostTime(10),
            from: GateState::Uninitialized,
            to: GateState::AttemptingAutoplay,
        });
        rec.on_status(&StatusEvent {
            at: HostTime(20),
            status: SyncStatus::AwaitingGesture,
        });

        let events = rec.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RecordedEvent::Transition(_)));
        assert_eq!(events[1].at_micros(), 20);
    }

    #[test]
    fn tracer_forwards_into_recorder() {
        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            tracer.status(&StatusEvent {
                at: HostTime(5),
                status: SyncStatus::Playing,
            });
        }
        assert_eq!(
            rec.into_events(),
            vec![RecordedEvent::Status(StatusEvent {
                at: HostTime(5),
                status: SyncStatus::Playing,
            })]
        );
    }
}
