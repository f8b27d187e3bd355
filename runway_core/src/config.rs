// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator configuration.
//!
//! [`CoordinatorConfig`] gathers every tunable the coordinator reads. Two
//! presets match the two page variants in production:
//! [`runway`](CoordinatorConfig::runway) (also the [`Default`]) and
//! [`hero`](CoordinatorConfig::hero).

use crate::time::Duration;
use crate::timecode::TimecodePolicy;

/// Storage keys for the two persisted preference flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key holding `"on"` / `"off"`.
    pub sound: &'static str,
    /// Key holding `"1"` once the user has unlocked audio.
    pub unlocked: &'static str,
}

impl StorageKeys {
    /// Keys used by the runway page.
    pub const RUNWAY: Self = Self {
        sound: "runway_sound",
        unlocked: "runway_sound_unlocked",
    };
}

/// The user-visible status strings.
///
/// Exactly one of these (or the empty string) is shown at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMessages {
    /// Shown while video playback waits for a user gesture.
    pub tap_to_start: &'static str,
    /// Shown after the browser rejected audio playback.
    pub sound_blocked: &'static str,
    /// Shown after the video element reported an error.
    pub video_missing: &'static str,
    /// Shown after the audio element reported an error, while sound is on.
    pub audio_missing: &'static str,
}

impl StatusMessages {
    /// Messages used by the runway page.
    pub const RUNWAY: Self = Self {
        tap_to_start: "Tap to start the runway film.",
        sound_blocked: "Sound is blocked until a direct user gesture.",
        video_missing: "Runway video file is missing. Add files to /assets as documented.",
        audio_missing: "Runway audio file is missing. Add files to /assets as documented.",
    };
}

/// Configuration for the [`Coordinator`](crate::coordinator::Coordinator).
#[derive(Clone, Copy, Debug)]
pub struct CoordinatorConfig {
    /// Period of the drift-correction task while audio plays.
    pub sync_interval: Duration,
    /// Maximum audio/video drift in seconds tolerated without a seek.
    pub drift_tolerance: f64,
    /// How the timecode display is throttled.
    pub timecode: TimecodePolicy,
    /// Delay before the first muted autoplay attempt, if any.
    pub intro_delay: Option<Duration>,
    /// A click on the sound toggle this soon after a pointer release on it is
    /// treated as the same activation.
    pub toggle_dedup_window: Duration,
    /// `KeyboardEvent.key` value bound to the navigation action.
    pub navigation_key: &'static str,
    /// Persisted preference keys.
    pub keys: StorageKeys,
    /// Status strings.
    pub messages: StatusMessages,
}

impl CoordinatorConfig {
    /// The runway page: 1 s drift checks with a 0.35 s band, and a timecode
    /// tick that only runs while the video plays.
    #[must_use]
    pub const fn runway() -> Self {
        Self {
            sync_interval: Duration::from_millis(1_000),
            drift_tolerance: 0.35,
            timecode: TimecodePolicy::Tick {
                period: Duration::from_millis(250),
            },
            intro_delay: None,
            toggle_dedup_window: Duration::from_millis(500),
            navigation_key: "ArrowDown",
            keys: StorageKeys::RUNWAY,
            messages: StatusMessages::RUNWAY,
        }
    }

    /// The hero page: 2 s drift checks with a 0.45 s band, timecode
    /// coalesced from `timeupdate`, and a short intro before autoplay.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            sync_interval: Duration::from_millis(2_000),
            drift_tolerance: 0.45,
            timecode: TimecodePolicy::Coalesce {
                min_interval: Duration::from_millis(250),
            },
            intro_delay: Some(Duration::from_millis(1_200)),
            ..Self::runway()
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::runway()
    }
}
