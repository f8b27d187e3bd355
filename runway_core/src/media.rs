// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media element model.
//!
//! The coordinator never owns a media element. It reads a [`MediaState`]
//! snapshot through the [`MediaElement`] trait, issues play/pause/seek
//! commands through the same trait, and learns about the outcome of play
//! requests and element transitions through events fed back into
//! [`Coordinator::handle`](crate::coordinator::Coordinator::handle).

use core::fmt;

/// Which of the two coordinated elements an event or command concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// The background/hero `<video>`.
    Video,
    /// The secondary `<audio>` track kept in phase with the video.
    Audio,
}

impl MediaKind {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

/// `HTMLMediaElement.readyState` ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ReadyState {
    /// No information is available about the media resource.
    #[default]
    HaveNothing,
    /// Metadata (duration, dimensions) is known.
    HaveMetadata,
    /// Data for the current playback position is available.
    HaveCurrentData,
    /// Data for the current position and a little beyond is available.
    HaveFutureData,
    /// Enough data is available to play through without stalling.
    HaveEnoughData,
}

impl ReadyState {
    /// Maps the DOM ordinal (0 to 4) to a [`ReadyState`]. Out-of-range values
    /// saturate to [`HaveEnoughData`](Self::HaveEnoughData).
    #[must_use]
    pub const fn from_ordinal(n: u16) -> Self {
        match n {
            0 => Self::HaveNothing,
            1 => Self::HaveMetadata,
            2 => Self::HaveCurrentData,
            3 => Self::HaveFutureData,
            _ => Self::HaveEnoughData,
        }
    }
}

/// Read-only snapshot of one media element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaState {
    /// Playback position in seconds. May be non-finite on a broken element.
    pub current_time: f64,
    /// Duration in seconds. `NaN` while unknown, `+inf` for live streams.
    pub duration: f64,
    /// Buffering state.
    pub ready_state: ReadyState,
    /// Whether the element is paused.
    pub paused: bool,
    /// Whether the element has reported a media error.
    pub errored: bool,
}

impl MediaState {
    /// A freshly created element: position zero, unknown duration, paused.
    pub const INITIAL: Self = Self {
        current_time: 0.0,
        duration: f64::NAN,
        ready_state: ReadyState::HaveNothing,
        paused: true,
        errored: false,
    };

    /// Returns the duration if it is finite and positive.
    #[must_use]
    pub fn known_duration(&self) -> Option<f64> {
        (self.duration.is_finite() && self.duration > 0.0).then_some(self.duration)
    }
}

impl Default for MediaState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Why a `play()` request was rejected.
///
/// Derived from the `DOMException` name the browser rejects the play promise
/// with. All variants are an expected outcome, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayRejection {
    /// `NotAllowedError`: autoplay policy requires a user gesture.
    NotAllowed,
    /// `NotSupportedError`: no playable source (missing or undecodable file).
    NotSupported,
    /// `AbortError`: the request was interrupted by `pause()` or a reload.
    Aborted,
    /// Anything else.
    Other,
}

impl PlayRejection {
    /// Classifies a `DOMException` name.
    #[must_use]
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "NotSupportedError" => Self::NotSupported,
            "AbortError" => Self::Aborted,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotAllowed => "play blocked by autoplay policy",
            Self::NotSupported => "no playable media source",
            Self::Aborted => "play request aborted",
            Self::Other => "play request rejected",
        })
    }
}

impl core::error::Error for PlayRejection {}

/// Identifies one play request so its settlement can be matched to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlayTicket(pub u32);

impl PlayTicket {
    /// Returns the ticket that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Element transitions the coordinator reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// `loadedmetadata`: duration became known.
    LoadedMetadata,
    /// `durationchange`.
    DurationChange,
    /// `playing`: playback started or resumed after buffering.
    Playing,
    /// `pause`.
    Pause,
    /// `seeked`: a seek (manual scrub or programmatic) completed.
    Seeked,
    /// `timeupdate`: fires several times per second while playing.
    TimeUpdate,
    /// `ended`.
    Ended,
    /// `error`: decode or network failure.
    Error,
}

/// Access to one media element.
///
/// Implemented by the browser backend for `HTMLMediaElement` and by test
/// doubles. `request_play` is asynchronous: the implementation must later
/// deliver exactly one
/// [`Event::PlaySettled`](crate::coordinator::Event::PlaySettled) carrying
/// the same ticket.
pub trait MediaElement {
    /// Returns the element's current state.
    fn snapshot(&self) -> MediaState;

    /// Starts an asynchronous play request.
    fn request_play(&mut self, ticket: PlayTicket);

    /// Pauses the element. Pausing a paused element is a no-op.
    fn pause(&mut self);

    /// Writes the playback position directly.
    fn set_current_time(&mut self, seconds: f64);

    /// Seeks using the element's fast (keyframe-granular) seek, if supported.
    ///
    /// Returns `false` when fast seeking is unavailable, in which case the
    /// caller falls back to [`set_current_time`](Self::set_current_time).
    fn fast_seek(&mut self, seconds: f64) -> bool {
        _ = seconds;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_ordinals() {
        assert_eq!(ReadyState::from_ordinal(0), ReadyState::HaveNothing);
        assert_eq!(ReadyState::from_ordinal(2), ReadyState::HaveCurrentData);
        assert_eq!(ReadyState::from_ordinal(9), ReadyState::HaveEnoughData);
        assert!(ReadyState::HaveFutureData >= ReadyState::HaveCurrentData);
    }

    #[test]
    fn dom_exception_names_classify() {
        assert_eq!(
            PlayRejection::from_dom_name("NotAllowedError"),
            PlayRejection::NotAllowed
        );
        assert_eq!(
            PlayRejection::from_dom_name("NotSupportedError"),
            PlayRejection::NotSupported
        );
        assert_eq!(PlayRejection::from_dom_name("AbortError"), PlayRejection::Aborted);
        assert_eq!(PlayRejection::from_dom_name("TypeError"), PlayRejection::Other);
    }

    #[test]
    fn known_duration_filters_unknown_values() {
        let mut state = MediaState::INITIAL;
        assert_eq!(state.known_duration(), None);
        state.duration = f64::INFINITY;
        assert_eq!(state.known_duration(), None);
        state.duration = 0.0;
        assert_eq!(state.known_duration(), None);
        state.duration = 12.5;
        assert_eq!(state.known_duration(), Some(12.5));
    }
}
