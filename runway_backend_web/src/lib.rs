// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for runway.
//!
//! This crate binds [`runway_core`] to a live page:
//!
//! - [`mount`]: finds the page elements, picks media sources, loads the
//!   stored preference, binds listeners, and starts the coordinator.
//! - [`DomMedia`]: [`MediaElement`](runway_core::media::MediaElement) over an
//!   `HTMLMediaElement`, with play promises awaited on the microtask queue.
//! - [`LocalStorage`]: [`KeyValueStore`](runway_core::prefs::KeyValueStore)
//!   over `window.localStorage`, tolerant of storage being disabled.
//! - [`DomTimers`]: [`TimerHost`](runway_core::timer::TimerHost) over
//!   `setTimeout`/`setInterval`.
//! - [`DomSurface`]: [`Surface`](runway_core::status::Surface) over the
//!   status, timecode, toggle, and prompt elements.
//! - [`ConsoleSink`]: forwards trace events to `console.debug`.
//!
//! All coordinator calls go through [`Dispatch`], which queues events raised
//! while a handler is running so the coordinator is never re-entered.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "the DOM glue only runs in the browser")
)]

extern crate alloc;

mod console;
mod input;
mod media;
mod runtime;
mod source;
mod storage;
mod surface;
mod timers;

pub use console::ConsoleSink;
pub use input::DomTarget;
pub use media::DomMedia;
pub use runtime::{Dispatch, Mounted, PageIds, mount};
pub use storage::LocalStorage;
pub use surface::DomSurface;
pub use timers::DomTimers;

use runway_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(timers::performance_now())
}
