// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end coordinator scenarios.

use alloc::vec::Vec;

use runway_core::config::{CoordinatorConfig, StatusMessages, StorageKeys};
use runway_core::gate::GateState;
use runway_core::lifecycle::KeyIntent;
use runway_core::prefs::{PlaybackPreference, StoreError};
use runway_core::status::SyncStatus;
use runway_core::timer::Repeat;
use runway_core::trace::StorageOp;
use runway_debug::recorder::{RecordedEvent, RecorderSink};

use super::*;

const KEYS: StorageKeys = StorageKeys::RUNWAY;
const MESSAGES: StatusMessages = StatusMessages::RUNWAY;

fn returning_listener() -> Harness {
    Harness::with_store(
        CoordinatorConfig::runway(),
        MemoryStore::with(&[(KEYS.sound, "on"), (KEYS.unlocked, "1")]),
    )
}

#[test]
fn fresh_visitor_never_requests_audio() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();

    assert_eq!(h.coordinator.gate_state(), GateState::VideoPlaying);
    assert_eq!(h.coordinator.sync_status(), SyncStatus::Playing);
    assert_eq!(h.surface.status, "");
    assert!(h.audio.requests.is_empty(), "no audio without the ratchet");
    assert!(!h.coordinator.preference().audio_unlocked_by_user);
    assert_eq!(h.surface.sound_toggle, Some(false));
    assert_eq!(h.surface.play_prompt, Some(false));
    assert!(!h.timers.is_armed(TimerKind::Sync));
    assert!(!h.timers.is_armed(TimerKind::Persist), "nothing to persist");
}

#[test]
fn rejected_audio_downgrades_and_reports_blocked() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();

    h.click_toggle();
    let preference = h.coordinator.preference();
    assert!(preference.sound_enabled && preference.audio_unlocked_by_user);
    assert_eq!(h.audio.requests.len(), 1, "toggle requests audio");
    assert_eq!(h.coordinator.gate_state(), GateState::AudioStarting);

    h.settle(MediaKind::Audio, Err(PlayRejection::NotAllowed));
    let preference = h.coordinator.preference();
    assert!(!preference.sound_enabled, "sound forced off");
    assert!(preference.audio_unlocked_by_user, "ratchet survives");
    assert_eq!(h.coordinator.sync_status(), SyncStatus::Blocked);
    assert_eq!(h.surface.status, MESSAGES.sound_blocked);
    assert_eq!(h.surface.sound_toggle, Some(false));
    assert!(!h.timers.is_armed(TimerKind::Sync), "no sync task after a block");

    assert!(h.fire(TimerKind::Persist), "downgrade is persisted");
    assert_eq!(h.store.value(KEYS.sound), Some("off"));
    assert_eq!(h.store.value(KEYS.unlocked), Some("1"));
}

#[test]
fn accepted_audio_starts_the_sync_task() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    h.click_toggle();
    h.settle(MediaKind::Audio, Ok(()));

    assert_eq!(h.coordinator.gate_state(), GateState::AudioPlaying);
    assert_eq!(h.surface.status, "");
    assert_eq!(
        h.timers.get(TimerKind::Sync),
        Some(ArmedTimer {
            delay: Duration::from_millis(1000),
            repeat: Repeat::Every,
        })
    );
}

#[test]
fn blocked_audio_can_be_retried_from_the_toggle() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    h.click_toggle();
    h.settle(MediaKind::Audio, Err(PlayRejection::NotAllowed));

    h.click_toggle();
    assert_eq!(h.audio.requests.len(), 2);
    h.settle(MediaKind::Audio, Ok(()));
    assert_eq!(h.coordinator.sync_status(), SyncStatus::Playing);
    assert_eq!(h.surface.status, "");
}

#[test]
fn hiding_pauses_audio_and_showing_restarts_it() {
    let mut h = returning_listener();
    h.boot_playing();
    assert_eq!(h.audio.requests.len(), 1, "returning listener gets audio");
    h.settle(MediaKind::Audio, Ok(()));
    assert!(h.timers.is_armed(TimerKind::Sync));
    assert!(h.timers.is_armed(TimerKind::Timecode));

    h.set_hidden(true);
    assert!(h.audio.state.paused, "audio paused, not muted");
    assert_eq!(h.audio.pauses, 1);
    assert!(!h.timers.is_armed(TimerKind::Sync));
    assert!(!h.timers.is_armed(TimerKind::Timecode));
    assert!(h.coordinator.is_hidden());

    h.set_hidden(false);
    assert_eq!(h.audio.requests.len(), 2, "restart goes through the gate");
    h.settle(MediaKind::Audio, Ok(()));
    assert!(h.timers.is_armed(TimerKind::Sync));
    assert_eq!(h.timers.arm_count(TimerKind::Sync), 2);
    assert!(h.timers.is_armed(TimerKind::Timecode), "video mid-play resumes tick");
}

#[test]
fn showing_with_sound_off_does_not_request_audio() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    h.set_hidden(true);
    h.set_hidden(false);
    assert!(h.audio.requests.is_empty());
}

#[test]
fn video_error_is_terminal_and_disables_drift() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.start();
    h.media(MediaKind::Video, MediaEvent::Error);
    h.settle(MediaKind::Video, Err(PlayRejection::NotSupported));

    assert_eq!(
        h.coordinator.sync_status(),
        SyncStatus::AssetMissing(MediaKind::Video)
    );
    assert_eq!(h.surface.status, MESSAGES.video_missing);
    assert!(h.coordinator.drift_disabled());
    assert_eq!(h.surface.play_prompt, Some(false));

    h.send(Event::StagePointerUp);
    assert_eq!(h.video.requests.len(), 1, "no retry for a missing file");

    // Audio may still start, but it is never corrected.
    h.click_toggle();
    h.settle(MediaKind::Audio, Ok(()));
    h.audio.state.current_time = 12.0;
    h.fire(TimerKind::Sync);
    h.media(MediaKind::Video, MediaEvent::Seeked);
    assert!(h.audio.seeks.is_empty());
    assert_eq!(h.surface.status, MESSAGES.video_missing, "one message at a time");
}

#[test]
fn audio_error_reports_missing_only_while_sound_is_on() {
    let mut h = returning_listener();
    h.boot_playing();
    h.media(MediaKind::Audio, MediaEvent::Error);
    assert_eq!(h.surface.status, MESSAGES.audio_missing);
    assert!(h.coordinator.drift_disabled());
    assert!(!h.timers.is_armed(TimerKind::Sync));

    h.click_toggle();
    assert!(!h.coordinator.preference().sound_enabled);
    assert_eq!(h.surface.status, "");
}

#[test]
fn ratchet_survives_toggling_off_and_on() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    h.click_toggle();
    h.settle(MediaKind::Audio, Ok(()));
    h.click_toggle();
    assert!(h.audio.state.paused);
    assert!(!h.timers.is_armed(TimerKind::Sync));
    assert!(h.coordinator.preference().audio_unlocked_by_user);
    assert_eq!(h.coordinator.gate_state(), GateState::VideoPlaying, "video untouched");

    h.click_toggle();
    assert!(h.coordinator.preference().audio_unlocked_by_user);
    assert_eq!(h.audio.requests.len(), 2);

    assert!(h.fire(TimerKind::Persist));
    assert_eq!(h.store.value(KEYS.sound), Some("on"));
    assert_eq!(h.store.value(KEYS.unlocked), Some("1"));
}

#[test]
fn audio_requires_both_preference_flags() {
    for sound_enabled in [false, true] {
        for unlocked in [false, true] {
            let mut entries = Vec::new();
            if sound_enabled {
                entries.push((KEYS.sound, "on"));
            }
            if unlocked {
                entries.push((KEYS.unlocked, "1"));
            }
            let mut h =
                Harness::with_store(CoordinatorConfig::runway(), MemoryStore::with(&entries));
            h.boot_playing();
            assert_eq!(
                !h.audio.requests.is_empty(),
                sound_enabled && unlocked,
                "sound={sound_enabled} unlocked={unlocked}"
            );
        }
    }
}

#[test]
fn stored_sound_without_unlock_is_downgraded_on_start() {
    let mut h = Harness::with_store(
        CoordinatorConfig::runway(),
        MemoryStore::with(&[(KEYS.sound, "on")]),
    );
    h.boot_playing();
    assert!(!h.coordinator.preference().sound_enabled);
    assert!(h.fire(TimerKind::Persist));
    assert_eq!(h.store.value(KEYS.sound), Some("off"));
    assert_eq!(h.store.value(KEYS.unlocked), None);
}

#[test]
fn periodic_check_corrects_only_outside_the_band() {
    let mut h = returning_listener();
    h.boot_playing();
    h.settle(MediaKind::Audio, Ok(()));

    // Video at 45s over a 20s audio loop: audio belongs at 5s.
    h.video.state.current_time = 45.0;
    h.audio.state.current_time = 14.0;
    assert!(h.fire(TimerKind::Sync));
    assert_eq!(h.audio.seeks, [5.0]);

    h.audio.state.current_time = 5.25;
    assert!(h.fire(TimerKind::Sync));
    assert_eq!(h.audio.seeks.len(), 1, "inside the band");
}

#[test]
fn scrubbing_resyncs_immediately_with_fast_seek() {
    let mut h = returning_listener();
    h.audio.fast_seek_supported = true;
    h.boot_playing();
    h.settle(MediaKind::Audio, Ok(()));

    h.video.state.current_time = 30.0;
    h.audio.state.current_time = 2.0;
    h.media(MediaKind::Video, MediaEvent::Seeked);
    assert_eq!(h.audio.seeks, [10.0]);
    assert_eq!(h.audio.fast_seeks, 1);
}

#[test]
fn audio_start_is_primed_to_the_video_position() {
    let mut h = returning_listener();
    h.start();
    h.video.state.current_time = 25.0;
    h.settle(MediaKind::Video, Ok(()));
    assert_eq!(h.audio.seeks, [5.0], "primed before the play request");
    assert_eq!(h.audio.requests.len(), 1);
}

#[test]
fn drift_is_skipped_while_video_is_paused() {
    let mut h = returning_listener();
    h.boot_playing();
    h.settle(MediaKind::Audio, Ok(()));
    h.video.state.paused = true;
    h.video.state.current_time = 45.0;
    h.fire(TimerKind::Sync);
    assert!(h.audio.seeks.is_empty());
}

#[test]
fn stale_audio_settlement_is_paused() {
    let mut h = returning_listener();
    h.boot_playing();
    assert_eq!(h.audio.pending(), 1);
    h.click_toggle();
    h.settle(MediaKind::Audio, Ok(()));
    assert!(h.audio.state.paused, "late success after sound off is undone");
    assert_eq!(h.coordinator.gate_state(), GateState::VideoPlaying);
    assert!(!h.timers.is_armed(TimerKind::Sync));
}

#[test]
fn stale_audio_settlement_leaves_newer_request_alone() {
    let mut h = returning_listener();
    h.boot_playing();
    h.click_toggle();
    h.click_toggle();
    assert_eq!(h.audio.requests.len(), 2);

    h.settle(MediaKind::Audio, Ok(()));
    assert_eq!(h.audio.pauses, 0);
    assert_eq!(h.coordinator.gate_state(), GateState::AudioStarting);
    h.settle(MediaKind::Audio, Ok(()));
    assert_eq!(h.coordinator.gate_state(), GateState::AudioPlaying);
}

#[test]
fn rejected_autoplay_waits_for_one_gesture() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.start();
    h.settle(MediaKind::Video, Err(PlayRejection::NotAllowed));
    assert_eq!(h.surface.status, MESSAGES.tap_to_start);
    assert_eq!(h.surface.play_prompt, Some(true));

    h.send(Event::Key {
        intent: KeyIntent::Navigate,
    });
    assert_eq!(h.video.requests.len(), 1, "navigation is not a gesture");

    h.send(Event::Key {
        intent: KeyIntent::UnlockGesture,
    });
    h.send(Event::StagePointerUp);
    h.send(Event::PlayPromptClick);
    assert_eq!(h.video.requests.len(), 2, "one retry in flight");
    assert_eq!(h.surface.play_prompt, Some(false));

    h.settle(MediaKind::Video, Ok(()));
    assert_eq!(h.coordinator.gate_state(), GateState::VideoPlaying);
    assert_eq!(h.surface.status, "");
    assert!(
        !h.coordinator.preference().audio_unlocked_by_user,
        "gestures never flip the ratchet"
    );
}

#[test]
fn gesture_retry_can_be_rejected_again() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.start();
    h.settle(MediaKind::Video, Err(PlayRejection::NotAllowed));
    h.send(Event::StagePointerUp);
    h.settle(MediaKind::Video, Err(PlayRejection::NotAllowed));
    assert_eq!(h.coordinator.gate_state(), GateState::GestureRequired);
    h.send(Event::StagePointerUp);
    assert_eq!(h.video.requests.len(), 3);
}

#[test]
fn touch_tap_toggles_once() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    h.send(Event::SoundTogglePointerUp);
    h.advance(Duration::from_millis(40));
    h.send(Event::SoundToggleClick);
    assert!(h.coordinator.preference().sound_enabled);
    assert_eq!(h.audio.requests.len(), 1);
}

#[test]
fn unavailable_storage_degrades_to_session_preference() {
    let mut h = Harness::with_store(CoordinatorConfig::runway(), MemoryStore::unavailable());
    h.boot_playing();
    h.click_toggle();
    h.settle(MediaKind::Audio, Ok(()));

    let mut rec = RecorderSink::new();
    assert!(h.timers.expire(TimerKind::Persist).is_some());
    h.send_traced(Event::Timer(TimerKind::Persist), &mut rec);

    assert!(h.coordinator.preference().sound_enabled);
    assert_eq!(h.surface.status, "");
    assert_eq!(h.store.writes, 2);
    let failures = rec
        .events()
        .iter()
        .filter(|e| matches!(e, RecordedEvent::StorageError(_)))
        .count();
    assert_eq!(failures, 2, "both writes traced");
}

#[test]
fn unreadable_storage_is_traced_on_load() {
    let mut rec = RecorderSink::new();
    let h = Harness::with_store_traced(
        CoordinatorConfig::runway(),
        MemoryStore::unavailable(),
        &mut rec,
    );
    assert_eq!(h.coordinator.preference(), PlaybackPreference::default());

    let reads: Vec<_> = rec
        .events()
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::StorageError(s) if s.op == StorageOp::Read => Some((s.key, s.error)),
            _ => None,
        })
        .collect();
    assert_eq!(
        reads,
        [
            (KEYS.sound, StoreError::Unavailable),
            (KEYS.unlocked, StoreError::Unavailable),
        ],
        "both failed reads traced"
    );
}

#[test]
fn video_failed_before_start_is_reported_without_a_request() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.video.state.errored = true;
    h.start();

    assert!(h.video.requests.is_empty(), "a broken element is not played");
    assert!(h.coordinator.drift_disabled());
    assert_eq!(h.surface.status, MESSAGES.video_missing);
}

#[test]
fn audio_failed_before_start_blocks_audio() {
    let mut h = returning_listener();
    h.audio.state.errored = true;
    h.boot_playing();

    assert!(h.audio.requests.is_empty(), "a broken element is not played");
    assert_eq!(h.surface.status, MESSAGES.audio_missing);
}

#[test]
fn intro_delay_defers_autoplay() {
    let mut h = Harness::new(CoordinatorConfig::hero());
    h.start();
    assert!(h.video.requests.is_empty());
    assert_eq!(
        h.timers.get(TimerKind::Intro),
        Some(ArmedTimer {
            delay: Duration::from_millis(1200),
            repeat: Repeat::Once,
        })
    );
    assert!(h.fire(TimerKind::Intro));
    assert_eq!(h.video.requests.len(), 1);
    assert!(!h.fire(TimerKind::Intro), "one-shot");
}

#[test]
fn timecode_tick_stops_on_pause_and_resumes_on_play() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    h.boot_playing();
    assert_eq!(
        h.timers.get(TimerKind::Timecode),
        Some(ArmedTimer {
            delay: Duration::from_millis(250),
            repeat: Repeat::Every,
        })
    );

    h.video.state.current_time = 75.0;
    assert!(h.fire(TimerKind::Timecode));
    assert_eq!(h.surface.timecode.as_deref(), Some("01:15 / 01:00"));
    let writes = h.surface.timecode_writes;
    assert!(h.fire(TimerKind::Timecode));
    assert_eq!(h.surface.timecode_writes, writes, "unchanged text is not rewritten");

    h.video.state.paused = true;
    h.media(MediaKind::Video, MediaEvent::Pause);
    assert!(!h.timers.is_armed(TimerKind::Timecode));

    h.video.state.paused = false;
    h.media(MediaKind::Video, MediaEvent::Playing);
    assert!(h.timers.is_armed(TimerKind::Timecode));
    assert_eq!(h.timers.arm_count(TimerKind::Timecode), 2);
}

#[test]
fn coalesced_timecode_throttles_time_updates() {
    let mut h = Harness::new(CoordinatorConfig::hero());
    h.boot_playing();
    assert!(!h.timers.is_armed(TimerKind::Timecode), "no tick under coalescing");
    let writes = h.surface.timecode_writes;

    h.video.state.current_time = 1.0;
    h.advance(Duration::from_millis(100));
    h.media(MediaKind::Video, MediaEvent::TimeUpdate);
    assert_eq!(h.surface.timecode_writes, writes, "inside the interval");

    h.advance(Duration::from_millis(200));
    h.media(MediaKind::Video, MediaEvent::TimeUpdate);
    assert_eq!(h.surface.timecode_writes, writes + 1);
    assert_eq!(h.surface.timecode.as_deref(), Some("00:01 / 01:00"));

    h.video.state.current_time = 1.5;
    h.advance(Duration::from_millis(300));
    h.media(MediaKind::Video, MediaEvent::TimeUpdate);
    assert_eq!(h.surface.timecode_writes, writes + 1, "same whole second");
}

#[test]
fn traced_start_records_the_first_transition() {
    let mut h = Harness::new(CoordinatorConfig::runway());
    let mut rec = RecorderSink::new();
    h.send_traced(Event::Start, &mut rec);

    let transitions: Vec<_> = rec
        .events()
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::Transition(t) => Some((t.from, t.to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        [(GateState::Uninitialized, GateState::AttemptingAutoplay)]
    );
}
