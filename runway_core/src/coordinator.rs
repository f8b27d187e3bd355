// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The media playback coordinator.
//!
//! [`Coordinator`] is the single owner of playback state. Every DOM listener,
//! timer callback, and play-promise settlement is turned into an [`Event`]
//! and fed through [`Coordinator::handle`]; the coordinator reacts by issuing
//! commands through the collaborator traits bundled in [`Env`].
//!
//! ```text
//!  DOM / timers / promises ──► Event ──► Coordinator::handle ──► Env
//!                                             │                  ├─ video / audio: MediaElement
//!                                             │                  ├─ store: KeyValueStore
//!                                             │                  ├─ timers: TimerHost
//!                                             │                  ├─ surface: Surface
//!                                             ▼                  └─ tracer: Tracer
//!                                  gate · drift · timecode · prefs
//! ```
//!
//! After each event the user-facing status is re-derived from the gate, the
//! toggle and play prompt are mirrored, and a deferred preference flush is
//! scheduled if anything changed.

use crate::config::CoordinatorConfig;
use crate::drift::{DriftCorrector, DriftDecision, DriftInput};
use crate::gate::{AudioPhase, AudioSettle, GateState, PlaybackGate, VideoPhase, VideoSettle};
use crate::lifecycle::{KeyIntent, ToggleDedup, Visibility};
use crate::media::{MediaElement, MediaEvent, MediaKind, PlayRejection, PlayTicket, ReadyState};
use crate::prefs::{KeyValueStore, PlaybackPreference, PreferenceStore};
use crate::status::{StatusSurface, Surface, SyncStatus};
use crate::time::{Duration, HostTime};
use crate::timecode::TimecodeReporter;
use crate::timer::{Repeat, TimerHost, TimerKind};
use crate::trace::{
    AudioRefusedEvent, DriftEvent, DriftTrigger, InputEvent, InputKind, PlayRequestEvent,
    PlaySettledEvent, StatusEvent, TimerAction, TimerEvent, Tracer, TransitionEvent,
};

/// Everything the coordinator reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The page is mounted; begin the start-up sequence.
    Start,
    /// A timer slot fired.
    Timer(TimerKind),
    /// A play request issued through [`MediaElement::request_play`] settled.
    PlaySettled {
        /// Which element.
        media: MediaKind,
        /// The ticket passed to `request_play`.
        ticket: PlayTicket,
        /// Resolution of the play promise.
        result: Result<(), PlayRejection>,
    },
    /// A media element fired an event.
    Media {
        /// Which element.
        media: MediaKind,
        /// What happened.
        event: MediaEvent,
    },
    /// Pointer release on the sound toggle.
    SoundTogglePointerUp,
    /// Click on the sound toggle (mouse, keyboard, or synthetic after touch).
    SoundToggleClick,
    /// Click on the play prompt.
    PlayPromptClick,
    /// Pointer release anywhere on the stage.
    StagePointerUp,
    /// A classified key press.
    Key {
        /// What the key means.
        intent: KeyIntent,
    },
    /// `visibilitychange`.
    VisibilityChanged {
        /// `document.hidden` after the change.
        hidden: bool,
    },
}

/// The collaborators one [`Coordinator::handle`] call may touch.
pub struct Env<'a> {
    /// The video element.
    pub video: &'a mut dyn MediaElement,
    /// The audio element.
    pub audio: &'a mut dyn MediaElement,
    /// Durable preference storage.
    pub store: &'a mut dyn KeyValueStore,
    /// Timer scheduling.
    pub timers: &'a mut dyn TimerHost,
    /// Status region, timecode, toggle, and prompt.
    pub surface: &'a mut dyn Surface,
    /// Diagnostics.
    pub tracer: Tracer<'a>,
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}

impl Env<'_> {
    fn element(&mut self, media: MediaKind) -> &mut dyn MediaElement {
        match media {
            MediaKind::Video => &mut *self.video,
            MediaKind::Audio => &mut *self.audio,
        }
    }
}

/// Coordinates one video element, one audio element, and the sound
/// preference.
#[derive(Clone, Debug)]
pub struct Coordinator {
    config: CoordinatorConfig,
    prefs: PreferenceStore,
    gate: PlaybackGate,
    drift: DriftCorrector,
    timecode: TimecodeReporter,
    dedup: ToggleDedup,
    visibility: Visibility,
    surface: StatusSurface,
    started: bool,
    sync_armed: bool,
    persist_armed: bool,
}

impl Coordinator {
    /// Creates a coordinator from a configuration and loaded preferences.
    #[must_use]
    pub fn new(config: CoordinatorConfig, prefs: PreferenceStore) -> Self {
        Self {
            config,
            prefs,
            gate: PlaybackGate::new(),
            drift: DriftCorrector::new(config.drift_tolerance),
            timecode: TimecodeReporter::new(config.timecode),
            dedup: ToggleDedup::new(config.toggle_dedup_window),
            visibility: Visibility::Visible,
            surface: StatusSurface::new(),
            started: false,
            sync_armed: false,
            persist_armed: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Returns the combined gate state.
    #[must_use]
    pub const fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Returns the status the surface should currently show.
    ///
    /// Precedence: missing video, missing audio (only while sound is
    /// enabled), blocked audio, awaiting gesture, playing, idle.
    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        let sound_enabled = self.prefs.get().sound_enabled;
        match (self.gate.video(), self.gate.audio()) {
            (VideoPhase::Missing, _) => SyncStatus::AssetMissing(MediaKind::Video),
            (_, AudioPhase::Missing) if sound_enabled => {
                SyncStatus::AssetMissing(MediaKind::Audio)
            }
            (_, AudioPhase::Blocked) => SyncStatus::Blocked,
            (VideoPhase::GestureRequired, _) => SyncStatus::AwaitingGesture,
            (VideoPhase::Playing, _) => SyncStatus::Playing,
            _ => SyncStatus::Idle,
        }
    }

    /// Returns the in-memory preference.
    #[must_use]
    pub const fn preference(&self) -> PlaybackPreference {
        self.prefs.get()
    }

    /// Whether drift correction was disabled by a media error.
    #[must_use]
    pub const fn drift_disabled(&self) -> bool {
        self.drift.is_disabled()
    }

    /// Whether the page is hidden.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    /// Whether the periodic drift task is armed.
    #[must_use]
    pub const fn sync_armed(&self) -> bool {
        self.sync_armed
    }

    /// Whether the timecode tick is armed.
    #[must_use]
    pub const fn timecode_ticking(&self) -> bool {
        self.timecode.is_ticking()
    }

    /// The single event intake.
    pub fn handle(&mut self, now: HostTime, event: Event, env: &mut Env<'_>) {
        let before = self.gate.state();
        match event {
            Event::Start => self.start(now, env),
            Event::Timer(kind) => self.timer_fired(now, kind, env),
            Event::PlaySettled {
                media,
                ticket,
                result,
            } => self.play_settled(now, media, ticket, result, env),
            Event::Media {
                media: MediaKind::Video,
                event,
            } => self.video_event(now, event, env),
            Event::Media {
                media: MediaKind::Audio,
                event,
            } => self.audio_event(now, event, env),
            Event::SoundTogglePointerUp => {
                let accepted = self.dedup.pointer_up(now);
                self.input(now, InputKind::TogglePointerUp, accepted, env);
                self.toggle_sound(now, env);
            }
            Event::SoundToggleClick => {
                let accepted = self.dedup.click(now);
                self.input(now, InputKind::ToggleClick, accepted, env);
                if accepted {
                    self.toggle_sound(now, env);
                }
            }
            Event::PlayPromptClick => self.gesture(now, InputKind::PlayPrompt, env),
            Event::StagePointerUp => self.gesture(now, InputKind::Stage, env),
            Event::Key { intent } => match intent {
                KeyIntent::UnlockGesture => self.gesture(now, InputKind::Key, env),
                // Scrolling is the page's business; the key never unlocks.
                KeyIntent::Navigate => self.input(now, InputKind::Navigate, false, env),
                KeyIntent::Ignore => {}
            },
            Event::VisibilityChanged { hidden } => self.visibility_changed(now, hidden, env),
        }
        self.publish(now, before, env);
    }

    // -- start-up ----------------------------------------------------------

    fn start(&mut self, now: HostTime, env: &mut Env<'_>) {
        if self.started {
            return;
        }
        self.started = true;

        // A stored "on" without a recorded gesture cannot be honoured.
        let preference = self.prefs.get();
        if preference.sound_enabled && !preference.audio_unlocked_by_user {
            self.prefs.set_sound_enabled(false);
        }

        // An element can fail before its `error` listener is bound.
        if env.video.snapshot().errored {
            self.video_failed(now, env);
        }
        if env.audio.snapshot().errored {
            self.audio_failed(now, env);
        }

        self.refresh_timecode(now, env);
        match self.config.intro_delay {
            Some(delay) => self.arm(now, TimerKind::Intro, delay, Repeat::Once, env),
            None => self.begin_autoplay(now, env),
        }
    }

    fn begin_autoplay(&mut self, now: HostTime, env: &mut Env<'_>) {
        if let Some(ticket) = self.gate.begin_autoplay() {
            self.request_play(now, MediaKind::Video, ticket, env);
        }
    }

    // -- timers ------------------------------------------------------------

    fn timer_fired(&mut self, now: HostTime, kind: TimerKind, env: &mut Env<'_>) {
        env.tracer.timer(&TimerEvent {
            at: now,
            kind,
            action: TimerAction::Fired,
        });
        match kind {
            TimerKind::Intro => self.begin_autoplay(now, env),
            TimerKind::Sync => {
                if self.sync_armed {
                    self.check_drift(now, DriftTrigger::Interval, env);
                }
            }
            TimerKind::Timecode => {
                if self.timecode.is_ticking() {
                    self.refresh_timecode(now, env);
                }
            }
            TimerKind::Persist => {
                self.persist_armed = false;
                self.prefs.flush(env.store, now, &mut env.tracer);
            }
        }
    }

    fn arm(
        &mut self,
        now: HostTime,
        kind: TimerKind,
        delay: Duration,
        repeat: Repeat,
        env: &mut Env<'_>,
    ) {
        env.timers.arm(kind, delay, repeat);
        env.tracer.timer(&TimerEvent {
            at: now,
            kind,
            action: TimerAction::Armed { delay, repeat },
        });
    }

    fn disarm(&mut self, now: HostTime, kind: TimerKind, env: &mut Env<'_>) {
        env.timers.disarm(kind);
        env.tracer.timer(&TimerEvent {
            at: now,
            kind,
            action: TimerAction::Disarmed,
        });
    }

    fn start_sync(&mut self, now: HostTime, env: &mut Env<'_>) {
        // Arming replaces, so the old task is always gone first.
        self.arm(
            now,
            TimerKind::Sync,
            self.config.sync_interval,
            Repeat::Every,
            env,
        );
        self.sync_armed = true;
    }

    fn stop_sync(&mut self, now: HostTime, env: &mut Env<'_>) {
        if self.sync_armed {
            self.disarm(now, TimerKind::Sync, env);
            self.sync_armed = false;
        }
    }

    fn start_tick(&mut self, now: HostTime, env: &mut Env<'_>) {
        if self.visibility.is_hidden() || self.timecode.is_ticking() {
            return;
        }
        if let Some(period) = self.timecode.tick_period() {
            self.arm(now, TimerKind::Timecode, period, Repeat::Every, env);
            self.timecode.set_ticking(true);
        }
    }

    fn stop_tick(&mut self, now: HostTime, env: &mut Env<'_>) {
        if self.timecode.is_ticking() {
            self.disarm(now, TimerKind::Timecode, env);
            self.timecode.set_ticking(false);
        }
    }

    // -- play requests -----------------------------------------------------

    fn request_play(
        &mut self,
        now: HostTime,
        media: MediaKind,
        ticket: PlayTicket,
        env: &mut Env<'_>,
    ) {
        env.tracer.play_requested(&PlayRequestEvent {
            at: now,
            media,
            ticket,
        });
        env.element(media).request_play(ticket);
    }

    fn play_settled(
        &mut self,
        now: HostTime,
        media: MediaKind,
        ticket: PlayTicket,
        result: Result<(), PlayRejection>,
        env: &mut Env<'_>,
    ) {
        let stale = match media {
            MediaKind::Video => {
                let settle = self.gate.video_settled(ticket, result);
                match settle {
                    VideoSettle::Started => self.video_started(now, env),
                    VideoSettle::Stale => {
                        if result.is_ok() && self.gate.video() != VideoPhase::Playing {
                            env.video.pause();
                        }
                    }
                    VideoSettle::GestureRequired(_) | VideoSettle::Missing => {}
                }
                settle == VideoSettle::Stale
            }
            MediaKind::Audio => {
                let settle = self.gate.audio_settled(ticket, result);
                match settle {
                    AudioSettle::Started => self.start_sync(now, env),
                    AudioSettle::Blocked(_) => {
                        self.prefs.set_sound_enabled(false);
                        self.stop_sync(now, env);
                    }
                    AudioSettle::Stale => {
                        // A newer request may still be pending; leave it be.
                        let wanted =
                            matches!(self.gate.audio(), AudioPhase::Starting | AudioPhase::Playing);
                        if result.is_ok() && !wanted {
                            env.audio.pause();
                        }
                    }
                }
                settle == AudioSettle::Stale
            }
        };
        env.tracer.play_settled(&PlaySettledEvent {
            at: now,
            media,
            ticket,
            result,
            stale,
        });
    }

    fn video_started(&mut self, now: HostTime, env: &mut Env<'_>) {
        self.start_tick(now, env);
        self.refresh_timecode(now, env);
        if self.prefs.get().allows_audio() {
            self.start_audio(now, env);
        }
    }

    // -- audio -------------------------------------------------------------

    fn start_audio(&mut self, now: HostTime, env: &mut Env<'_>) {
        match self
            .gate
            .begin_audio(self.prefs.get(), self.visibility.is_hidden())
        {
            Ok(ticket) => {
                self.prime_audio(now, env);
                self.request_play(now, MediaKind::Audio, ticket, env);
            }
            Err(reason) => env.tracer.audio_refused(&AudioRefusedEvent { at: now, reason }),
        }
    }

    fn stop_audio(&mut self, now: HostTime, env: &mut Env<'_>) {
        self.gate.stop_audio();
        if !env.audio.snapshot().paused {
            env.audio.pause();
        }
        self.stop_sync(now, env);
    }

    /// Moves the paused audio to where the video says it belongs, so the
    /// first audible frame is already in phase.
    fn prime_audio(&mut self, now: HostTime, env: &mut Env<'_>) {
        let input = drift_input(env, true);
        self.apply_drift(now, DriftTrigger::Prime, &input, env);
    }

    fn check_drift(&mut self, now: HostTime, trigger: DriftTrigger, env: &mut Env<'_>) {
        let audio_playing =
            self.gate.audio() == AudioPhase::Playing && !env.audio.snapshot().paused;
        let input = drift_input(env, audio_playing);
        self.apply_drift(now, trigger, &input, env);
    }

    fn apply_drift(
        &mut self,
        now: HostTime,
        trigger: DriftTrigger,
        input: &DriftInput,
        env: &mut Env<'_>,
    ) {
        let decision = self.drift.check(input);
        env.tracer.drift(&DriftEvent {
            at: now,
            trigger,
            decision,
        });
        if let DriftDecision::Correct { to, .. } = decision
            && !env.audio.fast_seek(to)
        {
            env.audio.set_current_time(to);
        }
    }

    fn toggle_sound(&mut self, now: HostTime, env: &mut Env<'_>) {
        let enable = !self.prefs.get().sound_enabled;
        self.prefs.set_sound_enabled(enable);
        if enable {
            self.prefs.mark_unlocked();
            self.start_audio(now, env);
        } else {
            self.stop_audio(now, env);
        }
    }

    // -- media events ------------------------------------------------------

    fn video_event(&mut self, now: HostTime, event: MediaEvent, env: &mut Env<'_>) {
        match event {
            MediaEvent::LoadedMetadata | MediaEvent::DurationChange => {
                self.refresh_timecode(now, env);
            }
            MediaEvent::Playing => {
                if self.gate.video_observed_playing() {
                    self.video_started(now, env);
                } else if self.gate.video() == VideoPhase::Playing {
                    self.start_tick(now, env);
                }
                self.check_drift(now, DriftTrigger::Playing, env);
            }
            MediaEvent::Pause => {
                self.stop_tick(now, env);
                self.refresh_timecode(now, env);
            }
            MediaEvent::Seeked => {
                self.check_drift(now, DriftTrigger::Seeked, env);
                self.refresh_timecode(now, env);
            }
            MediaEvent::TimeUpdate => {
                let state = env.video.snapshot();
                if let Some(timecode) = self.timecode.on_time_update(now, &state) {
                    env.surface.set_timecode(timecode);
                }
            }
            MediaEvent::Ended => {
                self.stop_tick(now, env);
                self.check_drift(now, DriftTrigger::Ended, env);
                self.refresh_timecode(now, env);
            }
            MediaEvent::Error => self.video_failed(now, env),
        }
    }

    fn audio_event(&mut self, now: HostTime, event: MediaEvent, env: &mut Env<'_>) {
        if event == MediaEvent::Error {
            self.audio_failed(now, env);
        }
    }

    fn video_failed(&mut self, now: HostTime, env: &mut Env<'_>) {
        self.gate.video_missing();
        self.drift.disable();
        self.stop_sync(now, env);
        self.stop_tick(now, env);
    }

    fn audio_failed(&mut self, now: HostTime, env: &mut Env<'_>) {
        self.gate.audio_missing();
        self.drift.disable();
        self.stop_sync(now, env);
    }

    fn refresh_timecode(&mut self, now: HostTime, env: &mut Env<'_>) {
        let state = env.video.snapshot();
        if let Some(timecode) = self.timecode.refresh(now, &state) {
            env.surface.set_timecode(timecode);
        }
    }

    // -- input and lifecycle -----------------------------------------------

    fn input(&mut self, now: HostTime, input: InputKind, accepted: bool, env: &mut Env<'_>) {
        env.tracer.input(&InputEvent {
            at: now,
            input,
            accepted,
        });
    }

    fn gesture(&mut self, now: HostTime, input: InputKind, env: &mut Env<'_>) {
        let ticket = self.gate.retry_after_gesture();
        self.input(now, input, ticket.is_some(), env);
        if let Some(ticket) = ticket {
            self.request_play(now, MediaKind::Video, ticket, env);
        }
    }

    fn visibility_changed(&mut self, now: HostTime, hidden: bool, env: &mut Env<'_>) {
        let next = Visibility::from_hidden(hidden);
        if next == self.visibility {
            return;
        }
        self.visibility = next;
        if hidden {
            self.gate.stop_audio();
            if !env.audio.snapshot().paused {
                env.audio.pause();
            }
            self.stop_sync(now, env);
            self.stop_tick(now, env);
        } else {
            if self.prefs.get().sound_enabled {
                self.start_audio(now, env);
            }
            if self.gate.video() == VideoPhase::Playing && !env.video.snapshot().paused {
                self.start_tick(now, env);
                self.refresh_timecode(now, env);
            }
        }
    }

    // -- output ------------------------------------------------------------

    fn publish(&mut self, now: HostTime, before: GateState, env: &mut Env<'_>) {
        let after = self.gate.state();
        if before != after {
            env.tracer.transition(&TransitionEvent {
                at: now,
                from: before,
                to: after,
            });
        }

        let status = self.sync_status();
        if self
            .surface
            .show_status(env.surface, status, &self.config.messages)
        {
            env.tracer.status(&StatusEvent { at: now, status });
        }
        self.surface
            .show_sound_toggle(env.surface, self.prefs.get().sound_enabled);
        self.surface.show_play_prompt(
            env.surface,
            self.gate.video() == VideoPhase::GestureRequired,
        );

        if self.prefs.is_dirty() && !self.persist_armed {
            self.persist_armed = true;
            self.arm(now, TimerKind::Persist, Duration::ZERO, Repeat::Once, env);
        }
    }
}

fn drift_input(env: &Env<'_>, audio_playing: bool) -> DriftInput {
    let video = env.video.snapshot();
    let audio = env.audio.snapshot();
    DriftInput {
        video_time: video.current_time,
        video_duration: video.duration,
        video_paused: video.paused,
        video_ready: video.ready_state >= ReadyState::HaveCurrentData,
        audio_time: audio.current_time,
        audio_duration: audio.known_duration(),
        audio_playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKeys;
    use crate::media::MediaState;
    use crate::prefs::StoreError;
    use crate::timecode::Timecode;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Element {
        state: MediaState,
        requests: Vec<PlayTicket>,
    }

    impl MediaElement for Element {
        fn snapshot(&self) -> MediaState {
            self.state
        }
        fn request_play(&mut self, ticket: PlayTicket) {
            self.requests.push(ticket);
        }
        fn pause(&mut self) {
            self.state.paused = true;
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.state.current_time = seconds;
        }
    }

    #[derive(Default)]
    struct Host {
        armed: Vec<TimerKind>,
        status: String,
        timecodes: Vec<Timecode>,
    }

    impl KeyValueStore for Host {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    impl TimerHost for Host {
        fn arm(&mut self, kind: TimerKind, _delay: Duration, _repeat: Repeat) {
            self.armed.retain(|k| *k != kind);
            self.armed.push(kind);
        }
        fn disarm(&mut self, kind: TimerKind) {
            self.armed.retain(|k| *k != kind);
        }
    }

    impl Surface for Host {
        fn set_status(&mut self, text: &str) {
            self.status = text.into();
        }
        fn set_timecode(&mut self, timecode: Timecode) {
            self.timecodes.push(timecode);
        }
        fn set_sound_toggle(&mut self, _sound_enabled: bool) {}
        fn set_play_prompt_visible(&mut self, _visible: bool) {}
    }

    struct Rig {
        video: Element,
        audio: Element,
        store: Host,
        timers: Host,
        surface: Host,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                video: Element::default(),
                audio: Element::default(),
                store: Host::default(),
                timers: Host::default(),
                surface: Host::default(),
            }
        }

        fn send(&mut self, coordinator: &mut Coordinator, event: Event) {
            let mut env = Env {
                video: &mut self.video,
                audio: &mut self.audio,
                store: &mut self.store,
                timers: &mut self.timers,
                surface: &mut self.surface,
                tracer: Tracer::none(),
            };
            coordinator.handle(HostTime(0), event, &mut env);
        }
    }

    fn fresh() -> Coordinator {
        Coordinator::new(
            CoordinatorConfig::runway(),
            PreferenceStore::new(StorageKeys::RUNWAY, PlaybackPreference::default()),
        )
    }

    #[test]
    fn start_requests_video_once() {
        let mut coordinator = fresh();
        let mut rig = Rig::new();
        rig.send(&mut coordinator, Event::Start);
        rig.send(&mut coordinator, Event::Start);
        assert_eq!(rig.video.requests.len(), 1, "one autoplay attempt");
        assert_eq!(coordinator.gate_state(), GateState::AttemptingAutoplay);
        assert!(rig.audio.requests.is_empty());
        assert_eq!(rig.surface.timecodes.len(), 1, "initial 00:00 / 00:00");
    }

    #[test]
    fn stored_sound_without_unlock_is_downgraded() {
        let mut coordinator = Coordinator::new(
            CoordinatorConfig::runway(),
            PreferenceStore::new(
                StorageKeys::RUNWAY,
                PlaybackPreference {
                    sound_enabled: true,
                    audio_unlocked_by_user: false,
                },
            ),
        );
        let mut rig = Rig::new();
        rig.send(&mut coordinator, Event::Start);
        assert!(!coordinator.preference().sound_enabled);
        assert!(
            rig.timers.armed.contains(&TimerKind::Persist),
            "downgrade is persisted"
        );
    }

    #[test]
    fn rejected_autoplay_awaits_gesture() {
        let mut coordinator = fresh();
        let mut rig = Rig::new();
        rig.send(&mut coordinator, Event::Start);
        let ticket = rig.video.requests[0];
        rig.send(
            &mut coordinator,
            Event::PlaySettled {
                media: MediaKind::Video,
                ticket,
                result: Err(PlayRejection::NotAllowed),
            },
        );
        assert_eq!(coordinator.sync_status(), SyncStatus::AwaitingGesture);
        assert_eq!(
            rig.surface.status,
            CoordinatorConfig::runway().messages.tap_to_start
        );

        rig.send(
            &mut coordinator,
            Event::Key {
                intent: KeyIntent::Navigate,
            },
        );
        assert_eq!(rig.video.requests.len(), 1, "navigation never unlocks");

        rig.send(&mut coordinator, Event::StagePointerUp);
        rig.send(&mut coordinator, Event::StagePointerUp);
        assert_eq!(rig.video.requests.len(), 2, "one retry in flight at a time");
    }

    #[test]
    fn toggle_click_after_pointer_up_toggles_once() {
        let mut coordinator = fresh();
        let mut rig = Rig::new();
        rig.send(&mut coordinator, Event::Start);
        rig.send(&mut coordinator, Event::SoundTogglePointerUp);
        rig.send(&mut coordinator, Event::SoundToggleClick);
        let preference = coordinator.preference();
        assert!(preference.sound_enabled, "the synthetic click was suppressed");
        assert!(preference.audio_unlocked_by_user);
        assert_eq!(rig.audio.requests.len(), 1);
    }
}
