// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds since the host clock origin.

use std::io::Write;

use runway_core::drift::DriftDecision;
use runway_core::time::HostTime;
use runway_core::trace::{
    AudioRefusedEvent, DriftEvent, InputEvent, PlayRequestEvent, PlaySettledEvent,
    StatusEvent, StorageErrorEvent, TimerAction, TimerEvent, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [gate] {} -> {}",
            ms(e.at),
            e.from.as_str(),
            e.to.as_str(),
        );
    }

    fn on_play_requested(&mut self, e: &PlayRequestEvent) {
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [play] {} ticket={}",
            ms(e.at),
            e.media.as_str(),
            e.ticket.0,
        );
    }

    fn on_play_settled(&mut self, e: &PlaySettledEvent) {
        let outcome = match e.result {
            Ok(()) => "ok".to_owned(),
            Err(rejection) => format!("rejected ({rejection})"),
        };
        let stale = if e.stale { " STALE" } else { "" };
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [settled] {} ticket={} {outcome}{stale}",
            ms(e.at),
            e.media.as_str(),
            e.ticket.0,
        );
    }

    fn on_drift(&mut self, e: &DriftEvent) {
        let _ = match e.decision {
            DriftDecision::Skipped(reason) => writeln!(
                self.writer,
                "[{:.1}ms] [drift:{:?}] skipped {reason:?}",
                ms(e.at),
                e.trigger,
            ),
            DriftDecision::WithinBand { drift } => writeln!(
                self.writer,
                "[{:.1}ms] [drift:{:?}] {drift:+.3}s ok",
                ms(e.at),
                e.trigger,
            ),
            DriftDecision::Correct { to, drift } => writeln!(
                self.writer,
                "[{:.1}ms] [drift:{:?}] {drift:+.3}s CORRECT -> {to:.3}s",
                ms(e.at),
                e.trigger,
            ),
        };
    }

    fn on_status(&mut self, e: &StatusEvent) {
        let _ = writeln!(self.writer, "[{:.1}ms] [status] {:?}", ms(e.at), e.status);
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        let _ = match e.action {
            TimerAction::Armed { delay, repeat } => writeln!(
                self.writer,
                "[{:.1}ms] [timer] {} armed {}ms {repeat:?}",
                ms(e.at),
                e.kind.as_str(),
                delay.as_millis(),
            ),
            TimerAction::Disarmed => writeln!(
                self.writer,
                "[{:.1}ms] [timer] {} disarmed",
                ms(e.at),
                e.kind.as_str(),
            ),
            TimerAction::Fired => writeln!(
                self.writer,
                "[{:.1}ms] [timer] {} fired",
                ms(e.at),
                e.kind.as_str(),
            ),
        };
    }

    fn on_storage_error(&mut self, e: &StorageErrorEvent) {
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [storage] {:?} {} failed: {}",
            ms(e.at),
            e.op,
            e.key,
            e.error,
        );
    }

    fn on_audio_refused(&mut self, e: &AudioRefusedEvent) {
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [audio] not started: {}",
            ms(e.at),
            e.reason,
        );
    }

    fn on_input(&mut self, e: &InputEvent) {
        let verdict = if e.accepted { "accepted" } else { "ignored" };
        let _ = writeln!(
            self.writer,
            "[{:.1}ms] [input] {:?} {verdict}",
            ms(e.at),
            e.input,
        );
    }
}
