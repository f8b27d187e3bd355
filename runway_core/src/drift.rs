// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Audio-to-video drift correction.
//!
//! The audio and video elements run on independent clocks with no native
//! linkage. [`DriftCorrector`] keeps the audio position a bounded function of
//! the video position:
//!
//! ```text
//! desired = video.currentTime mod audio.duration   (audio duration known)
//! desired = video.currentTime                      (otherwise)
//! ```
//!
//! A seek is forced only when the absolute drift exceeds the tolerance band;
//! continuous micro-seeks would be audible as stutter.

/// Audio position that corresponds to `video_time`.
///
/// With a finite positive `audio_duration` the result lies in
/// `[0, audio_duration)`; otherwise it is `video_time` unchanged.
#[must_use]
pub fn desired_audio_time(video_time: f64, audio_duration: Option<f64>) -> f64 {
    match audio_duration {
        Some(d) if d.is_finite() && d > 0.0 => {
            let wrapped = ((video_time % d) + d) % d;
            // `x % d + d` can round up to exactly `d` for tiny negative `x`.
            if wrapped >= d { 0.0 } else { wrapped }
        }
        _ => video_time,
    }
}

/// Why a drift check did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Correction was disabled after a media error.
    Disabled,
    /// Audio is not playing.
    AudioIdle,
    /// The video is paused.
    VideoPaused,
    /// The video has no current frame yet.
    VideoNotReady,
    /// The video duration is unknown, infinite, or zero.
    VideoDurationUnknown,
    /// The video position is not a finite number.
    VideoTimeInvalid,
}

/// Outcome of a drift check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriftDecision {
    /// Preconditions not met; nothing was measured.
    Skipped(SkipReason),
    /// Drift (audio minus desired, seconds) is inside the tolerance band.
    WithinBand {
        /// Signed drift in seconds.
        drift: f64,
    },
    /// Drift exceeds the band; audio should jump to `to`.
    Correct {
        /// Target audio position in seconds.
        to: f64,
        /// Signed drift in seconds before correction.
        drift: f64,
    },
}

/// Inputs to one drift check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftInput {
    /// Video position in seconds.
    pub video_time: f64,
    /// Video duration in seconds.
    pub video_duration: f64,
    /// Whether the video is paused.
    pub video_paused: bool,
    /// Whether the video has at least its current frame.
    pub video_ready: bool,
    /// Audio position in seconds.
    pub audio_time: f64,
    /// Audio duration, if known.
    pub audio_duration: Option<f64>,
    /// Whether audio is playing (started by the gate and not paused).
    pub audio_playing: bool,
}

/// Tolerance-band drift corrector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftCorrector {
    tolerance: f64,
    disabled: bool,
}

impl DriftCorrector {
    /// Creates a corrector with the given tolerance band in seconds.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            disabled: false,
        }
    }

    /// Returns the tolerance band in seconds.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether correction has been permanently disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disables correction for the rest of the session.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Decides whether audio needs to jump.
    #[must_use]
    pub fn check(&self, input: &DriftInput) -> DriftDecision {
        if self.disabled {
            return DriftDecision::Skipped(SkipReason::Disabled);
        }
        if !input.audio_playing {
            return DriftDecision::Skipped(SkipReason::AudioIdle);
        }
        if input.video_paused {
            return DriftDecision::Skipped(SkipReason::VideoPaused);
        }
        if !input.video_ready {
            return DriftDecision::Skipped(SkipReason::VideoNotReady);
        }
        if !(input.video_duration.is_finite() && input.video_duration > 0.0) {
            return DriftDecision::Skipped(SkipReason::VideoDurationUnknown);
        }
        if !input.video_time.is_finite() {
            return DriftDecision::Skipped(SkipReason::VideoTimeInvalid);
        }

        let desired = desired_audio_time(input.video_time, input.audio_duration);
        let drift = input.audio_time - desired;
        if drift > self.tolerance || drift < -self.tolerance || drift.is_nan() {
            DriftDecision::Correct { to: desired, drift }
        } else {
            DriftDecision::WithinBand { drift }
        }
    }
}
