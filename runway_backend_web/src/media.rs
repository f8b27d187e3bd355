// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `HTMLMediaElement` binding.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{DomException, HtmlMediaElement};

use runway_core::coordinator::Event;
use runway_core::media::{
    MediaElement, MediaKind, MediaState, PlayRejection, PlayTicket, ReadyState,
};

use crate::runtime::Dispatch;

/// A page `<video>` or `<audio>` element driven by the coordinator.
///
/// `play()` is called synchronously inside [`request_play`], so a request
/// made while handling a user gesture still counts as gesture-initiated. The
/// returned promise is awaited on the microtask queue and its outcome comes
/// back as [`Event::PlaySettled`].
///
/// [`request_play`]: MediaElement::request_play
#[derive(Debug)]
pub struct DomMedia {
    element: HtmlMediaElement,
    kind: MediaKind,
    dispatch: Dispatch,
    fast_seek: bool,
}

impl DomMedia {
    /// Wraps `element`. Settlements are sent through `dispatch`.
    pub fn new(element: HtmlMediaElement, kind: MediaKind, dispatch: Dispatch) -> Self {
        let fast_seek =
            js_sys::Reflect::has(&element, &JsValue::from_str("fastSeek")).unwrap_or(false);
        Self {
            element,
            kind,
            dispatch,
            fast_seek,
        }
    }
}

/// Classifies the value a play promise was rejected with.
fn rejection(error: &JsValue) -> PlayRejection {
    error
        .dyn_ref::<DomException>()
        .map_or(PlayRejection::Other, |e| PlayRejection::from_dom_name(&e.name()))
}

impl MediaElement for DomMedia {
    fn snapshot(&self) -> MediaState {
        MediaState {
            current_time: self.element.current_time(),
            duration: self.element.duration(),
            ready_state: ReadyState::from_ordinal(self.element.ready_state()),
            paused: self.element.paused(),
            errored: self.element.error().is_some(),
        }
    }

    fn request_play(&mut self, ticket: PlayTicket) {
        let media = self.kind;
        let dispatch = self.dispatch.clone();
        // A synchronous throw is still reported asynchronously, so the
        // coordinator never sees a settlement inside its own request.
        let played = self.element.play();
        spawn_local(async move {
            let result = match played {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(drop)
                    .map_err(|e| rejection(&e)),
                Err(e) => Err(rejection(&e)),
            };
            dispatch.send(Event::PlaySettled {
                media,
                ticket,
                result,
            });
        });
    }

    fn pause(&mut self) {
        _ = self.element.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn fast_seek(&mut self, seconds: f64) -> bool {
        self.fast_seek && self.element.fast_seek(seconds).is_ok()
    }
}
