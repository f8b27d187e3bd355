// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page mounting and event dispatch.
//!
//! [`mount`] wires one [`Coordinator`] to the page. Every DOM listener, timer
//! callback, and play promise funnels into [`Dispatch::send`], which queues
//! the event and drains the queue in order. An event raised while the
//! coordinator is handling another one is therefore processed after it,
//! never inside it.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, EventTarget, HtmlElement, HtmlMediaElement, KeyboardEvent, MouseEvent,
};

use runway_core::config::CoordinatorConfig;
use runway_core::coordinator::{Coordinator, Env, Event};
use runway_core::gate::GateState;
use runway_core::lifecycle::{KeyIntent, classify_key};
use runway_core::media::{MediaEvent, MediaKind};
use runway_core::prefs::{PlaybackPreference, PreferenceStore};
use runway_core::status::SyncStatus;
use runway_core::time::HostTime;
use runway_core::trace::{TraceSink, Tracer};

use crate::input::DomTarget;
use crate::media::DomMedia;
use crate::source::apply_sources;
use crate::storage::LocalStorage;
use crate::surface::DomSurface;
use crate::timers::DomTimers;

/// Element ids the backend looks up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageIds {
    /// The `<video>` element.
    pub video: &'static str,
    /// The companion `<audio>` element.
    pub audio: &'static str,
    /// The sound toggle button.
    pub sound_toggle: &'static str,
    /// The "tap to play" prompt.
    pub play_prompt: &'static str,
    /// The status text region.
    pub status: &'static str,
    /// The timecode readout, if the page has one.
    pub timecode: Option<&'static str>,
    /// The element whose pointer releases count as an unlock gesture. The
    /// whole document when absent.
    pub stage: Option<&'static str>,
}

impl PageIds {
    /// Ids used by the runway page.
    pub const RUNWAY: Self = Self {
        video: "runway-video",
        audio: "runway-audio",
        sound_toggle: "sound-toggle",
        play_prompt: "play-toggle",
        status: "media-status",
        timecode: Some("media-timecode"),
        stage: None,
    };
}

/// The collaborators the coordinator drives.
struct Parts {
    video: DomMedia,
    audio: DomMedia,
    store: LocalStorage,
    timers: DomTimers,
    surface: DomSurface,
}

impl Parts {
    fn handle<'a>(
        &'a mut self,
        coordinator: &mut Coordinator,
        now: HostTime,
        event: Event,
        tracer: Tracer<'a>,
    ) {
        let mut env = Env {
            video: &mut self.video,
            audio: &mut self.audio,
            store: &mut self.store,
            timers: &mut self.timers,
            surface: &mut self.surface,
            tracer,
        };
        coordinator.handle(now, event, &mut env);
    }
}

struct Shared {
    coordinator: RefCell<Coordinator>,
    /// `None` only while [`mount`] is still building the parts.
    parts: RefCell<Option<Parts>>,
    queue: RefCell<VecDeque<Event>>,
    draining: Cell<bool>,
    sink: RefCell<Option<Box<dyn TraceSink>>>,
}

impl Shared {
    fn handle(&self, event: Event) {
        let now = crate::now();
        let mut parts = self.parts.borrow_mut();
        let Some(parts) = parts.as_mut() else {
            return;
        };
        let mut coordinator = self.coordinator.borrow_mut();
        let mut sink = self.sink.borrow_mut();
        let tracer = match sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        parts.handle(&mut coordinator, now, event, tracer);
    }
}

/// Sends events to a mounted coordinator.
///
/// Cheap to clone. Holds the coordinator weakly: once the [`Mounted`] handle
/// is dropped, sends are ignored.
#[derive(Clone, Debug)]
pub struct Dispatch {
    shared: Weak<Shared>,
}

impl Dispatch {
    /// Queues `event` and, unless a drain is already running further up the
    /// stack, handles every queued event in order.
    pub fn send(&self, event: Event) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        shared.queue.borrow_mut().push_back(event);
        if shared.draining.replace(true) {
            return;
        }
        loop {
            let next = shared.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            shared.handle(event);
        }
        shared.draining.set(false);
    }
}

type ListenerClosure = Closure<dyn FnMut(web_sys::Event)>;

/// An event listener that is removed when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: ListenerClosure,
}

impl Listener {
    fn bind(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// Binds a listener that sends the same coordinator event every time.
    fn forward(
        target: &EventTarget,
        kind: &'static str,
        dispatch: &Dispatch,
        event: Event,
    ) -> Result<Self, JsValue> {
        let dispatch = dispatch.clone();
        Self::bind(target, kind, move |_| dispatch.send(event))
    }

    /// Binds a `pointerup` listener that only forwards primary-button
    /// releases (left mouse button, touch, pen contact).
    fn primary_release(
        target: &EventTarget,
        dispatch: &Dispatch,
        event: Event,
    ) -> Result<Self, JsValue> {
        let dispatch = dispatch.clone();
        Self::bind(target, "pointerup", move |e| {
            if e.dyn_ref::<MouseEvent>().is_none_or(|m| is_primary_button(m.button())) {
                dispatch.send(event);
            }
        })
    }
}

/// `MouseEvent.button` of the main button. Touch and pen contact report it
/// too.
fn is_primary_button(button: i16) -> bool {
    button == 0
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Video element events and the DOM names they arrive under.
const VIDEO_EVENTS: [(&str, MediaEvent); 8] = [
    ("loadedmetadata", MediaEvent::LoadedMetadata),
    ("durationchange", MediaEvent::DurationChange),
    ("playing", MediaEvent::Playing),
    ("pause", MediaEvent::Pause),
    ("seeked", MediaEvent::Seeked),
    ("timeupdate", MediaEvent::TimeUpdate),
    ("ended", MediaEvent::Ended),
    ("error", MediaEvent::Error),
];

/// A coordinator bound to the page.
///
/// Dropping it removes every listener and cancels every timer. Pages that
/// keep the coordinator for their whole lifetime can `core::mem::forget` it.
pub struct Mounted {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mounted")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Mounted {
    /// Returns a handle for sending further events.
    #[must_use]
    pub fn dispatch(&self) -> Dispatch {
        Dispatch {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Current gate state, or `None` while an event is being handled.
    #[must_use]
    pub fn gate_state(&self) -> Option<GateState> {
        self.shared.coordinator.try_borrow().ok().map(|c| c.gate_state())
    }

    /// Current status, or `None` while an event is being handled.
    #[must_use]
    pub fn sync_status(&self) -> Option<SyncStatus> {
        self.shared.coordinator.try_borrow().ok().map(|c| c.sync_status())
    }

    /// Current sound preference, or `None` while an event is being handled.
    #[must_use]
    pub fn preference(&self) -> Option<PlaybackPreference> {
        self.shared.coordinator.try_borrow().ok().map(|c| c.preference())
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Mounts a coordinator on `document`.
///
/// Returns `Ok(None)` without touching the page when any required element is
/// missing (the page simply has no media stage). Otherwise selects sources,
/// loads the stored preference, binds listeners, and sends
/// [`Event::Start`].
///
/// Trace events, starting with the preference load, go to `sink` (only with
/// the `trace` feature).
///
/// # Errors
///
/// Returns the exception if the document has no window or a listener cannot
/// be registered.
pub fn mount(
    document: &Document,
    ids: &PageIds,
    config: CoordinatorConfig,
    mut sink: Option<Box<dyn TraceSink>>,
) -> Result<Option<Mounted>, JsValue> {
    let (Some(video), Some(audio), Some(sound_toggle), Some(play_prompt), Some(status)) = (
        element_by_id::<HtmlMediaElement>(document, ids.video),
        element_by_id::<HtmlMediaElement>(document, ids.audio),
        element_by_id::<Element>(document, ids.sound_toggle),
        element_by_id::<HtmlElement>(document, ids.play_prompt),
        element_by_id::<Element>(document, ids.status),
    ) else {
        return Ok(None);
    };
    let timecode = ids
        .timecode
        .and_then(|id| element_by_id::<Element>(document, id));
    let window = document
        .default_view()
        .ok_or_else(|| JsValue::from_str("document has no window"))?;

    apply_sources(&window, &video, &audio);

    let store = LocalStorage::open(&window);
    let prefs = {
        let mut tracer = match sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        PreferenceStore::load(&store, config.keys, crate::now(), &mut tracer)
    };
    let shared = Rc::new(Shared {
        coordinator: RefCell::new(Coordinator::new(config, prefs)),
        parts: RefCell::new(None),
        queue: RefCell::new(VecDeque::new()),
        draining: Cell::new(false),
        sink: RefCell::new(sink),
    });
    let dispatch = Dispatch {
        shared: Rc::downgrade(&shared),
    };

    let mut listeners = Vec::new();
    for (kind, event) in VIDEO_EVENTS {
        listeners.push(Listener::forward(
            &video,
            kind,
            &dispatch,
            Event::Media {
                media: MediaKind::Video,
                event,
            },
        )?);
    }
    listeners.push(Listener::forward(
        &audio,
        "error",
        &dispatch,
        Event::Media {
            media: MediaKind::Audio,
            event: MediaEvent::Error,
        },
    )?);
    listeners.push(Listener::primary_release(
        &sound_toggle,
        &dispatch,
        Event::SoundTogglePointerUp,
    )?);
    listeners.push(Listener::forward(
        &sound_toggle,
        "click",
        &dispatch,
        Event::SoundToggleClick,
    )?);
    listeners.push(Listener::forward(
        &play_prompt,
        "click",
        &dispatch,
        Event::PlayPromptClick,
    )?);
    let stage: EventTarget = match ids.stage.and_then(|id| document.get_element_by_id(id)) {
        Some(stage) => stage.into(),
        None => document.clone().into(),
    };
    listeners.push(Listener::primary_release(
        &stage,
        &dispatch,
        Event::StagePointerUp,
    )?);
    listeners.push(key_listener(document, &window, &dispatch, config.navigation_key)?);
    {
        let dispatch = dispatch.clone();
        let doc = document.clone();
        listeners.push(Listener::bind(document, "visibilitychange", move |_| {
            dispatch.send(Event::VisibilityChanged {
                hidden: doc.hidden(),
            });
        })?);
    }

    *shared.parts.borrow_mut() = Some(Parts {
        video: DomMedia::new(video, MediaKind::Video, dispatch.clone()),
        audio: DomMedia::new(audio, MediaKind::Audio, dispatch.clone()),
        store,
        timers: DomTimers::new(&dispatch),
        surface: DomSurface::new(status, timecode, sound_toggle, play_prompt),
    });

    let mounted = Mounted {
        shared,
        listeners,
    };
    if document.hidden() {
        dispatch.send(Event::VisibilityChanged { hidden: true });
    }
    dispatch.send(Event::Start);
    Ok(Some(mounted))
}

fn key_listener(
    document: &Document,
    window: &web_sys::Window,
    dispatch: &Dispatch,
    navigation_key: &'static str,
) -> Result<Listener, JsValue> {
    let dispatch = dispatch.clone();
    let window = window.clone();
    Listener::bind(document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.repeat() {
            return;
        }
        let target = DomTarget::new(event.target());
        let intent = classify_key(&key.key(), &target, navigation_key);
        match intent {
            KeyIntent::Navigate => {
                event.prevent_default();
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|h| h.as_f64())
                    .unwrap_or_default();
                window.scroll_by_with_x_and_y(0.0, height);
                dispatch.send(Event::Key { intent });
            }
            KeyIntent::UnlockGesture => dispatch.send(Event::Key { intent }),
            KeyIntent::Ignore => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_main_button_counts() {
        assert!(is_primary_button(0), "left button, touch, and pen contact");
        assert!(!is_primary_button(1), "middle button");
        assert!(!is_primary_button(2), "right button opens a context menu");
    }
}
