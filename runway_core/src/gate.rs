// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay and audio-start state machine.
//!
//! The gate tracks two orthogonal phases, one per element, and exposes the
//! combined [`GateState`]:
//!
//! ```text
//!  Uninitialized ──► AttemptingAutoplay ──ok──► VideoPlaying
//!                          │    ▲                    │
//!                     rejected  └─gesture─┐          │ sound on ∧ unlocked
//!                          ▼              │          ▼
//!                    GestureRequired ─────┘    AudioStarting ──ok──► AudioPlaying
//!                                                    │
//!                                                rejected
//!                                                    ▼
//!                                              AudioBlocked
//! ```
//!
//! The gate only decides. It hands out [`PlayTicket`]s for the requests the
//! caller must issue, and matches settlements against the outstanding
//! ticket so late results from superseded requests are recognised as stale.

use core::fmt;

use crate::media::{PlayRejection, PlayTicket};
use crate::prefs::PlaybackPreference;

/// Combined gate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateState {
    /// Nothing attempted yet.
    Uninitialized,
    /// The muted autoplay request is in flight.
    AttemptingAutoplay,
    /// Autoplay was refused; waiting for a user gesture.
    GestureRequired,
    /// Video plays; audio is off.
    VideoPlaying,
    /// An audio play request is in flight.
    AudioStarting,
    /// Audio plays alongside the video.
    AudioPlaying,
    /// The browser refused audio playback.
    AudioBlocked,
}

impl GateState {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::AttemptingAutoplay => "attempting-autoplay",
            Self::GestureRequired => "gesture-required",
            Self::VideoPlaying => "video-playing",
            Self::AudioStarting => "audio-starting",
            Self::AudioPlaying => "audio-playing",
            Self::AudioBlocked => "audio-blocked",
        }
    }
}

/// Video-side phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoPhase {
    /// Nothing attempted yet.
    #[default]
    Uninitialized,
    /// A play request is in flight.
    AttemptingAutoplay,
    /// Waiting for a user gesture.
    GestureRequired,
    /// Playing.
    Playing,
    /// The element reported an error; terminal for the session.
    Missing,
}

/// Audio-side phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AudioPhase {
    /// Not playing.
    #[default]
    Off,
    /// A play request is in flight.
    Starting,
    /// Playing.
    Playing,
    /// The last play request was refused.
    Blocked,
    /// The element reported an error; terminal for the session.
    Missing,
}

/// Why an audio start was not attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioRefusal {
    /// The sound preference is off.
    SoundDisabled,
    /// No user gesture has unlocked audio yet.
    NotUnlocked,
    /// The page is hidden.
    Hidden,
    /// The audio asset is missing.
    Missing,
    /// Audio is already starting or playing.
    AlreadyActive,
}

impl fmt::Display for AudioRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SoundDisabled => "sound disabled",
            Self::NotUnlocked => "audio not unlocked by a user gesture",
            Self::Hidden => "page hidden",
            Self::Missing => "audio asset missing",
            Self::AlreadyActive => "audio already active",
        })
    }
}

/// Result of matching a video play settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VideoSettle {
    /// The settlement belongs to no outstanding request.
    Stale,
    /// Video is now playing.
    Started,
    /// Video needs a gesture.
    GestureRequired(PlayRejection),
    /// The asset already failed; the settlement changes nothing.
    Missing,
}

/// Result of matching an audio play settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioSettle {
    /// The settlement belongs to no outstanding request.
    Stale,
    /// Audio is now playing.
    Started,
    /// Audio was refused.
    Blocked(PlayRejection),
}

/// The two-phase playback gate.
#[derive(Clone, Debug, Default)]
pub struct PlaybackGate {
    video: VideoPhase,
    audio: AudioPhase,
    next_ticket: PlayTicket,
    video_pending: Option<PlayTicket>,
    audio_pending: Option<PlayTicket>,
}

impl PlaybackGate {
    /// Creates an uninitialized gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the combined state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        match self.audio {
            AudioPhase::Starting => return GateState::AudioStarting,
            AudioPhase::Playing => return GateState::AudioPlaying,
            AudioPhase::Blocked => return GateState::AudioBlocked,
            AudioPhase::Off | AudioPhase::Missing => {}
        }
        match self.video {
            VideoPhase::Uninitialized => GateState::Uninitialized,
            VideoPhase::AttemptingAutoplay => GateState::AttemptingAutoplay,
            // A missing video cannot be fixed by a gesture, but the machine
            // still waits on one; the status layer reports the real cause.
            VideoPhase::GestureRequired | VideoPhase::Missing => GateState::GestureRequired,
            VideoPhase::Playing => GateState::VideoPlaying,
        }
    }

    /// Returns the video phase.
    #[must_use]
    pub const fn video(&self) -> VideoPhase {
        self.video
    }

    /// Returns the audio phase.
    #[must_use]
    pub const fn audio(&self) -> AudioPhase {
        self.audio
    }

    /// Whether a video play request is in flight.
    #[must_use]
    pub const fn video_in_flight(&self) -> bool {
        self.video_pending.is_some()
    }

    fn issue(&mut self) -> PlayTicket {
        self.next_ticket = self.next_ticket.next();
        self.next_ticket
    }

    /// Starts the one unconditional autoplay attempt.
    ///
    /// Returns the ticket for the request, or `None` if the gate has already
    /// left [`VideoPhase::Uninitialized`].
    pub fn begin_autoplay(&mut self) -> Option<PlayTicket> {
        if self.video != VideoPhase::Uninitialized {
            return None;
        }
        self.video = VideoPhase::AttemptingAutoplay;
        let ticket = self.issue();
        self.video_pending = Some(ticket);
        Some(ticket)
    }

    /// Retries video playback after a user gesture.
    ///
    /// Returns `None` unless the gate is waiting for a gesture with no
    /// request already in flight.
    pub fn retry_after_gesture(&mut self) -> Option<PlayTicket> {
        if self.video != VideoPhase::GestureRequired || self.video_pending.is_some() {
            return None;
        }
        self.video = VideoPhase::AttemptingAutoplay;
        let ticket = self.issue();
        self.video_pending = Some(ticket);
        Some(ticket)
    }

    /// Applies the outcome of a video play request.
    pub fn video_settled(
        &mut self,
        ticket: PlayTicket,
        result: Result<(), PlayRejection>,
    ) -> VideoSettle {
        if self.video_pending != Some(ticket) {
            return VideoSettle::Stale;
        }
        self.video_pending = None;
        if self.video == VideoPhase::Missing {
            return VideoSettle::Missing;
        }
        match result {
            Ok(()) => {
                self.video = VideoPhase::Playing;
                VideoSettle::Started
            }
            Err(rejection) => {
                self.video = VideoPhase::GestureRequired;
                VideoSettle::GestureRequired(rejection)
            }
        }
    }

    /// Notes that the element started playing by any route. Returns `true`
    /// if this moved the video into [`VideoPhase::Playing`].
    pub fn video_observed_playing(&mut self) -> bool {
        match self.video {
            VideoPhase::Playing | VideoPhase::Missing => false,
            VideoPhase::Uninitialized
            | VideoPhase::AttemptingAutoplay
            | VideoPhase::GestureRequired => {
                self.video = VideoPhase::Playing;
                self.video_pending = None;
                true
            }
        }
    }

    /// Marks the video asset missing. Terminal.
    pub fn video_missing(&mut self) {
        self.video = VideoPhase::Missing;
    }

    /// Starts an audio play request if every precondition holds.
    ///
    /// Audio is never requested unless `sound_enabled` and
    /// `audio_unlocked_by_user` are both set.
    pub fn begin_audio(
        &mut self,
        preference: PlaybackPreference,
        hidden: bool,
    ) -> Result<PlayTicket, AudioRefusal> {
        if !preference.sound_enabled {
            return Err(AudioRefusal::SoundDisabled);
        }
        if !preference.audio_unlocked_by_user {
            return Err(AudioRefusal::NotUnlocked);
        }
        match self.audio {
            AudioPhase::Missing => return Err(AudioRefusal::Missing),
            AudioPhase::Starting | AudioPhase::Playing => return Err(AudioRefusal::AlreadyActive),
            AudioPhase::Off | AudioPhase::Blocked => {}
        }
        if hidden {
            return Err(AudioRefusal::Hidden);
        }
        self.audio = AudioPhase::Starting;
        let ticket = self.issue();
        self.audio_pending = Some(ticket);
        Ok(ticket)
    }

    /// Applies the outcome of an audio play request.
    pub fn audio_settled(
        &mut self,
        ticket: PlayTicket,
        result: Result<(), PlayRejection>,
    ) -> AudioSettle {
        if self.audio_pending != Some(ticket) {
            return AudioSettle::Stale;
        }
        self.audio_pending = None;
        match result {
            Ok(()) => {
                self.audio = AudioPhase::Playing;
                AudioSettle::Started
            }
            Err(rejection) => {
                self.audio = AudioPhase::Blocked;
                AudioSettle::Blocked(rejection)
            }
        }
    }

    /// Stops audio. Any in-flight request becomes stale. Returns `true` if
    /// audio was starting or playing.
    pub fn stop_audio(&mut self) -> bool {
        self.audio_pending = None;
        match self.audio {
            AudioPhase::Starting | AudioPhase::Playing => {
                self.audio = AudioPhase::Off;
                true
            }
            AudioPhase::Blocked => {
                self.audio = AudioPhase::Off;
                false
            }
            AudioPhase::Off | AudioPhase::Missing => false,
        }
    }

    /// Marks the audio asset missing. Terminal.
    pub fn audio_missing(&mut self) {
        self.audio_pending = None;
        self.audio = AudioPhase::Missing;
    }
}
