// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`/`setInterval` timer host.
//!
//! [`DomTimers`] keeps one JS callback per [`TimerKind`] for its whole
//! lifetime and only swaps the browser timer handle on arm and disarm, so a
//! callback is never dropped while it is running (a timer callback may well
//! re-arm its own slot).

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use runway_core::coordinator::Event;
use runway_core::time::Duration;
use runway_core::timer::{Repeat, TimerHost, TimerKind};

use crate::runtime::Dispatch;

// Direct global bindings instead of `web_sys::Window` methods, so no Window
// handle has to be carried around or unwrapped.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

type TimerClosure = Closure<dyn FnMut()>;

#[derive(Clone, Copy, Debug)]
struct Handle {
    id: i32,
    repeat: Repeat,
}

/// Browser timer slots, one per [`TimerKind`].
pub struct DomTimers {
    callbacks: [TimerClosure; 4],
    handles: [Option<Handle>; 4],
}

/// Clamps a delay to what `setTimeout` accepts.
fn delay_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl DomTimers {
    /// Creates idle slots whose expirations are sent through `dispatch`.
    pub fn new(dispatch: &Dispatch) -> Self {
        let callbacks = TimerKind::ALL.map(|kind| {
            let dispatch = dispatch.clone();
            Closure::wrap(Box::new(move || dispatch.send(Event::Timer(kind))) as Box<dyn FnMut()>)
        });
        Self {
            callbacks,
            handles: [None; 4],
        }
    }
}

impl TimerHost for DomTimers {
    fn arm(&mut self, kind: TimerKind, delay: Duration, repeat: Repeat) {
        self.disarm(kind);
        let callback = self.callbacks[kind.index()].as_ref();
        let ms = delay_ms(delay);
        let id = match repeat {
            Repeat::Once => set_timeout(callback, ms),
            Repeat::Every => set_interval(callback, ms),
        };
        self.handles[kind.index()] = Some(Handle { id, repeat });
    }

    fn disarm(&mut self, kind: TimerKind) {
        if let Some(handle) = self.handles[kind.index()].take() {
            match handle.repeat {
                Repeat::Once => clear_timeout(handle.id),
                Repeat::Every => clear_interval(handle.id),
            }
        }
    }
}

impl Drop for DomTimers {
    fn drop(&mut self) {
        for kind in TimerKind::ALL {
            self.disarm(kind);
        }
    }
}

impl core::fmt::Debug for DomTimers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomTimers")
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}
