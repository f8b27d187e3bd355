// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer contract.
//!
//! The coordinator owns no timers. It asks a [`TimerHost`] to arm or disarm
//! one slot per [`TimerKind`], and the host feeds expirations back as
//! [`Event::Timer`](crate::coordinator::Event::Timer). Arming an armed slot
//! replaces it, so there is never more than one instance of a kind.

use crate::time::Duration;

/// The coordinator's timer slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// One-shot delay before the first autoplay attempt.
    Intro,
    /// Periodic drift correction while audio plays.
    Sync,
    /// Periodic timecode refresh while the video plays.
    Timecode,
    /// Zero-delay one-shot that flushes preference writes.
    Persist,
}

impl TimerKind {
    /// All kinds, in slot order.
    pub const ALL: [Self; 4] = [Self::Intro, Self::Sync, Self::Timecode, Self::Persist];

    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Sync => "sync",
            Self::Timecode => "timecode",
            Self::Persist => "persist",
        }
    }

    /// Dense index for slot arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Intro => 0,
            Self::Sync => 1,
            Self::Timecode => 2,
            Self::Persist => 3,
        }
    }
}

/// Whether a timer fires once or repeatedly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Repeat {
    /// Fire once after the delay, then disarm.
    Once,
    /// Fire every period until disarmed.
    Every,
}

/// Schedules timer expirations on behalf of the coordinator.
pub trait TimerHost {
    /// Arms `kind`, replacing any armed instance.
    fn arm(&mut self, kind: TimerKind, delay: Duration, repeat: Repeat);

    /// Disarms `kind`. Disarming an idle slot is a no-op.
    fn disarm(&mut self, kind: TimerKind);
}
