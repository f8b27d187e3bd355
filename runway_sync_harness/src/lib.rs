// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles and a scenario driver for the runway media coordinator.
//!
//! [`Harness`] owns a [`Coordinator`] together with fake media elements, an
//! in-memory store, a hand-fired timer host, and a recording surface, so
//! whole playback scenarios run without a browser:
//!
//! ```
//! use runway_core::config::CoordinatorConfig;
//! use runway_core::media::MediaKind;
//! use runway_sync_harness::Harness;
//!
//! let mut h = Harness::new(CoordinatorConfig::runway());
//! h.start();
//! h.settle(MediaKind::Video, Ok(()));
//! assert_eq!(h.surface.status, "");
//! assert!(h.audio.requests.is_empty());
//! ```

#![no_std]

extern crate alloc;

mod fakes;

pub use fakes::{ArmedTimer, FakeMedia, FakeTimers, MemoryStore, RecordingSurface};

use runway_core::config::CoordinatorConfig;
use runway_core::coordinator::{Coordinator, Env, Event};
use runway_core::media::{MediaEvent, MediaKind, PlayRejection, PlayTicket};
use runway_core::prefs::PreferenceStore;
use runway_core::time::{Duration, HostTime};
use runway_core::timer::TimerKind;
use runway_core::trace::{TraceSink, Tracer};

/// Video length used by [`Harness::new`].
pub const VIDEO_SECONDS: f64 = 60.0;
/// Audio loop length used by [`Harness::new`].
pub const AUDIO_SECONDS: f64 = 20.0;

/// A coordinator wired to fakes.
#[derive(Debug)]
pub struct Harness {
    /// The coordinator under test.
    pub coordinator: Coordinator,
    /// The video element.
    pub video: FakeMedia,
    /// The audio element.
    pub audio: FakeMedia,
    /// Durable storage.
    pub store: MemoryStore,
    /// Timer slots.
    pub timers: FakeTimers,
    /// Page surface.
    pub surface: RecordingSurface,
    /// Current host time.
    pub now: HostTime,
}

impl Harness {
    /// A first-time visitor: empty storage, media with known durations.
    #[must_use]
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_store(config, MemoryStore::default())
    }

    /// A visitor whose storage already holds `store`.
    #[must_use]
    pub fn with_store(config: CoordinatorConfig, store: MemoryStore) -> Self {
        Self::load(config, store, Tracer::none())
    }

    /// Like [`with_store`](Self::with_store), tracing the preference load.
    #[must_use]
    pub fn with_store_traced(
        config: CoordinatorConfig,
        store: MemoryStore,
        sink: &mut dyn TraceSink,
    ) -> Self {
        Self::load(config, store, Tracer::new(sink))
    }

    fn load(config: CoordinatorConfig, store: MemoryStore, mut tracer: Tracer<'_>) -> Self {
        let now = HostTime(1_000_000);
        let prefs = PreferenceStore::load(&store, config.keys, now, &mut tracer);
        Self {
            coordinator: Coordinator::new(config, prefs),
            video: FakeMedia::loaded(VIDEO_SECONDS),
            audio: FakeMedia::loaded(AUDIO_SECONDS),
            store,
            timers: FakeTimers::default(),
            surface: RecordingSurface::default(),
            now,
        }
    }

    /// Feeds one event through the coordinator.
    pub fn send(&mut self, event: Event) {
        self.dispatch(event, Tracer::none());
    }

    /// Feeds one event through the coordinator with tracing.
    pub fn send_traced(&mut self, event: Event, sink: &mut dyn TraceSink) {
        self.dispatch(event, Tracer::new(sink));
    }

    fn dispatch<'a>(&'a mut self, event: Event, tracer: Tracer<'a>) {
        let now = self.now;
        let mut env = Env {
            video: &mut self.video,
            audio: &mut self.audio,
            store: &mut self.store,
            timers: &mut self.timers,
            surface: &mut self.surface,
            tracer,
        };
        self.coordinator.handle(now, event, &mut env);
    }

    /// Moves host time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now + by;
    }

    /// Sends [`Event::Start`].
    pub fn start(&mut self) {
        self.send(Event::Start);
    }

    fn element(&mut self, media: MediaKind) -> &mut FakeMedia {
        match media {
            MediaKind::Video => &mut self.video,
            MediaKind::Audio => &mut self.audio,
        }
    }

    /// Settles the oldest outstanding play request on `media`.
    ///
    /// On success the element starts playing first, as a browser's does
    /// before resolving the promise. Returns the settled ticket, or `None`
    /// if nothing was pending.
    pub fn settle(
        &mut self,
        media: MediaKind,
        result: Result<(), PlayRejection>,
    ) -> Option<PlayTicket> {
        let element = self.element(media);
        let ticket = element.take_pending()?;
        if result.is_ok() {
            element.state.paused = false;
        }
        self.send(Event::PlaySettled {
            media,
            ticket,
            result,
        });
        Some(ticket)
    }

    /// Sends a media element event.
    pub fn media(&mut self, media: MediaKind, event: MediaEvent) {
        if event == MediaEvent::Error {
            self.element(media).state.errored = true;
        }
        self.send(Event::Media { media, event });
    }

    /// Fires `kind` if it is armed; one-shot slots are consumed. Returns
    /// whether anything fired.
    pub fn fire(&mut self, kind: TimerKind) -> bool {
        if self.timers.expire(kind).is_none() {
            return false;
        }
        self.send(Event::Timer(kind));
        true
    }

    /// Brings the video up: start, autoplay succeeds, `playing` fires.
    pub fn boot_playing(&mut self) {
        self.start();
        self.fire(TimerKind::Intro);
        self.settle(MediaKind::Video, Ok(()));
        self.media(MediaKind::Video, MediaEvent::Playing);
    }

    /// Toggles sound with a mouse click.
    pub fn click_toggle(&mut self) {
        self.send(Event::SoundToggleClick);
    }

    /// Hides or shows the page.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.send(Event::VisibilityChanged { hidden });
    }
}

#[cfg(test)]
mod scenarios;
