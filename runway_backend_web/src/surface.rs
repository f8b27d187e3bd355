// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page affordances the coordinator writes to.

use alloc::string::ToString;

use web_sys::{Element, HtmlElement};

use runway_core::status::Surface;
use runway_core::timecode::Timecode;

/// [`Surface`] over the status region, the optional timecode readout, the
/// sound toggle button, and the play prompt.
#[derive(Debug)]
pub struct DomSurface {
    status: Element,
    timecode: Option<Element>,
    sound_toggle: Element,
    play_prompt: HtmlElement,
}

impl DomSurface {
    /// Binds the given elements.
    #[must_use]
    pub fn new(
        status: Element,
        timecode: Option<Element>,
        sound_toggle: Element,
        play_prompt: HtmlElement,
    ) -> Self {
        Self {
            status,
            timecode,
            sound_toggle,
            play_prompt,
        }
    }
}

/// The toggle's `aria-pressed` value and label. The label names the action
/// the button performs next.
fn toggle_state(sound_enabled: bool) -> (&'static str, &'static str) {
    if sound_enabled {
        ("true", "Sound Off")
    } else {
        ("false", "Sound On")
    }
}

impl Surface for DomSurface {
    fn set_status(&mut self, text: &str) {
        self.status.set_text_content(Some(text));
    }

    fn set_timecode(&mut self, timecode: Timecode) {
        if let Some(el) = &self.timecode {
            el.set_text_content(Some(&timecode.to_string()));
        }
    }

    fn set_sound_toggle(&mut self, sound_enabled: bool) {
        let (pressed, label) = toggle_state(sound_enabled);
        _ = self.sound_toggle.set_attribute("aria-pressed", pressed);
        self.sound_toggle.set_text_content(Some(label));
    }

    fn set_play_prompt_visible(&mut self, visible: bool) {
        self.play_prompt.set_hidden(!visible);
    }
}
