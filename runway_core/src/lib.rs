// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media playback coordination for a portfolio page.
//!
//! `runway_core` owns the state that decides when a background video plays,
//! when the companion audio track may start, and how the two stay in phase.
//! It is `no_std` compatible (with `alloc`) and performs no I/O of its own:
//! media elements, storage, timers, and the page surface are reached through
//! traits, so every behavior runs under test without a browser.
//!
//! # Architecture
//!
//! Every browser callback becomes an [`Event`](coordinator::Event) fed to one
//! intake function:
//!
//! ```text
//!   Backend (DOM listeners, timers, play promises)
//!       │
//!       ▼
//!   Event ──► Coordinator::handle()
//!                 │
//!                 ├──► PlaybackGate ──► MediaElement::request_play()
//!                 │                          │
//!                 │      PlaySettled ◄───────┘
//!                 │
//!                 ├──► DriftCorrector ──► MediaElement::fast_seek()
//!                 ├──► TimecodeReporter ──► Surface::set_timecode()
//!                 ├──► PreferenceStore ──► KeyValueStore (deferred)
//!                 └──► SyncStatus ──► Surface::set_status()
//! ```
//!
//! **[`coordinator`]**: The event intake and the [`Env`](coordinator::Env)
//! bundle of collaborators.
//!
//! **[`gate`]**: Video autoplay, gesture unlock, and audio start/stop state
//! machine with ticket-matched play settlements.
//!
//! **[`drift`]**: Tolerance-band audio-to-video drift correction.
//!
//! **[`timecode`]**: `MM:SS / MM:SS` formatting with tick or coalescing
//! throttles.
//!
//! **[`prefs`]**: Sound preference, the unlock ratchet, and deferred
//! persistence.
//!
//! **[`source`]**: One-shot video and audio source selection.
//!
//! **[`lifecycle`]**: Key classification, toggle click deduplication, and
//! page visibility.
//!
//! **[`status`]**: The single status region and write-on-change surface.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod coordinator;
pub mod drift;
pub mod gate;
pub mod lifecycle;
pub mod media;
pub mod prefs;
pub mod source;
pub mod status;
pub mod time;
pub mod timecode;
pub mod timer;
pub mod trace;
