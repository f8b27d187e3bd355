// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.

use alloc::format;
use alloc::string::String;

use web_sys::console;

use runway_core::trace::{
    AudioRefusedEvent, DriftEvent, InputEvent, PlayRequestEvent, PlaySettledEvent,
    StatusEvent, StorageErrorEvent, TraceSink, TransitionEvent,
};

/// A [`TraceSink`] that writes one `console.debug` line per event.
///
/// Timer events are not printed; the tick and sync slots fire several times
/// a second.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn emit(line: String) {
        console::debug_1(&line.into());
    }
}

fn ms(micros: u64) -> f64 {
    micros as f64 / 1_000.0
}

impl TraceSink for ConsoleSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        Self::emit(format!("[{:.1}ms] [gate] {:?} -> {:?}", ms(e.at.ticks()), e.from, e.to));
    }

    fn on_play_requested(&mut self, e: &PlayRequestEvent) {
        Self::emit(format!(
            "[{:.1}ms] [play] {} request #{}",
            ms(e.at.ticks()),
            e.media.as_str(),
            e.ticket.0
        ));
    }

    fn on_play_settled(&mut self, e: &PlaySettledEvent) {
        let outcome = match e.result {
            Ok(()) => String::from("ok"),
            Err(rejection) => format!("{rejection}"),
        };
        let stale = if e.stale { " (stale)" } else { "" };
        Self::emit(format!(
            "[{:.1}ms] [play] {} #{} settled: {outcome}{stale}",
            ms(e.at.ticks()),
            e.media.as_str(),
            e.ticket.0
        ));
    }

    fn on_drift(&mut self, e: &DriftEvent) {
        Self::emit(format!(
            "[{:.1}ms] [drift] {:?}: {:?}",
            ms(e.at.ticks()),
            e.trigger,
            e.decision
        ));
    }

    fn on_status(&mut self, e: &StatusEvent) {
        Self::emit(format!("[{:.1}ms] [status] {:?}", ms(e.at.ticks()), e.status));
    }

    fn on_storage_error(&mut self, e: &StorageErrorEvent) {
        Self::emit(format!(
            "[{:.1}ms] [storage] {:?} {}: {}",
            ms(e.at.ticks()),
            e.op,
            e.key,
            e.error
        ));
    }

    fn on_audio_refused(&mut self, e: &AudioRefusedEvent) {
        Self::emit(format!("[{:.1}ms] [audio] not started: {:?}", ms(e.at.ticks()), e.reason));
    }

    fn on_input(&mut self, e: &InputEvent) {
        if !e.accepted {
            Self::emit(format!("[{:.1}ms] [input] {:?} ignored", ms(e.at.ticks()), e.input));
        }
    }
}
