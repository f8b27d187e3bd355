// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elapsed/duration timecode display.
//!
//! [`TimecodeReporter`] turns video state into a `"MM:SS / MM:SS"` string and
//! only hands it out when the printed value differs from the last one
//! written. How often it recomputes is governed by a [`TimecodePolicy`].

use alloc::string::String;
use core::fmt;

use crate::media::MediaState;
use crate::time::{Duration, HostTime};

/// How timecode recomputation is throttled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimecodePolicy {
    /// Recompute on a fixed tick that runs only while the video plays and the
    /// page is visible.
    Tick {
        /// Tick period.
        period: Duration,
    },
    /// Recompute from `timeupdate`, at most once per `min_interval`.
    Coalesce {
        /// Minimum wall-clock gap between two recomputations.
        min_interval: Duration,
    },
}

/// Whole seconds of a media position; non-finite or negative is zero.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "finite non-negative seconds; truncation is the intended floor"
)]
pub fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    }
}

/// Formats a position as zero-padded `MM:SS`.
///
/// ```
/// use runway_core::timecode::format_clock;
///
/// assert_eq!(format_clock(0.0), "00:00");
/// assert_eq!(format_clock(75.0), "01:15");
/// assert_eq!(format_clock(f64::NAN), "00:00");
/// assert_eq!(format_clock(-5.0), "00:00");
/// ```
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let mut out = String::with_capacity(5);
    _ = write_clock(&mut out, whole_seconds(seconds));
    out
}

fn write_clock(f: &mut dyn fmt::Write, total: u64) -> fmt::Result {
    write!(f, "{:02}:{:02}", total / 60, total % 60)
}

/// An elapsed/duration pair in whole seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timecode {
    /// Elapsed whole seconds.
    pub elapsed: u64,
    /// Duration in whole seconds (zero while unknown).
    pub duration: u64,
}

impl Timecode {
    /// Derives the timecode for a video state.
    #[must_use]
    pub fn from_media(state: &MediaState) -> Self {
        Self {
            elapsed: whole_seconds(state.current_time),
            duration: whole_seconds(state.duration),
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock(f, self.elapsed)?;
        f.write_str(" / ")?;
        write_clock(f, self.duration)
    }
}

/// Throttled, change-only timecode producer.
#[derive(Clone, Debug)]
pub struct TimecodeReporter {
    policy: TimecodePolicy,
    last_written: Option<Timecode>,
    last_refresh: Option<HostTime>,
    ticking: bool,
}

impl TimecodeReporter {
    /// Creates a reporter that has written nothing yet.
    #[must_use]
    pub const fn new(policy: TimecodePolicy) -> Self {
        Self {
            policy,
            last_written: None,
            last_refresh: None,
            ticking: false,
        }
    }

    /// Returns the throttling policy.
    #[must_use]
    pub const fn policy(&self) -> TimecodePolicy {
        self.policy
    }

    /// Returns the tick period if the policy is tick-driven.
    #[must_use]
    pub const fn tick_period(&self) -> Option<Duration> {
        match self.policy {
            TimecodePolicy::Tick { period } => Some(period),
            TimecodePolicy::Coalesce { .. } => None,
        }
    }

    /// Whether the tick is believed to be running.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Records whether the tick timer is armed.
    pub fn set_ticking(&mut self, ticking: bool) {
        self.ticking = ticking;
    }

    /// Returns the last timecode handed out.
    #[must_use]
    pub const fn last_written(&self) -> Option<Timecode> {
        self.last_written
    }

    /// Recomputes unconditionally; returns the timecode if it changed.
    pub fn refresh(&mut self, now: HostTime, video: &MediaState) -> Option<Timecode> {
        self.last_refresh = Some(now);
        let next = Timecode::from_media(video);
        if self.last_written == Some(next) {
            return None;
        }
        self.last_written = Some(next);
        Some(next)
    }

    /// Recomputes in response to `timeupdate`, honouring the coalescing
    /// interval. Under a tick policy `timeupdate` is ignored.
    pub fn on_time_update(&mut self, now: HostTime, video: &MediaState) -> Option<Timecode> {
        let TimecodePolicy::Coalesce { min_interval } = self.policy else {
            return None;
        };
        if let Some(last) = self.last_refresh
            && now.saturating_duration_since(last) < min_interval
        {
            return None;
        }
        self.refresh(now, video)
    }
}
