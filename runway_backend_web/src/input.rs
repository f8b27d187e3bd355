// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard event targets.

use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, HtmlInputElement};

use runway_core::lifecycle::EditingTarget;

/// The target of a keyboard event, classified for
/// [`classify_key`](runway_core::lifecycle::classify_key).
#[derive(Debug)]
pub struct DomTarget(Option<EventTarget>);

impl DomTarget {
    /// Wraps an event's target.
    #[must_use]
    pub fn new(target: Option<EventTarget>) -> Self {
        Self(target)
    }
}

/// Whether an upper-case tag name is a control that always accepts typing.
/// `INPUT` depends on its type and is classified by [`is_text_input_type`].
fn is_editing_tag(tag: &str) -> bool {
    matches!(tag, "TEXTAREA" | "SELECT")
}

/// Whether an `<input>` of this (normalized) `type` takes text entry.
///
/// Buttons, checkboxes, radios, ranges, colors, and file pickers do not, so
/// Enter and Space on them still count as a gesture.
fn is_text_input_type(kind: &str) -> bool {
    matches!(
        kind,
        "text"
            | "search"
            | "email"
            | "url"
            | "tel"
            | "password"
            | "number"
            | "date"
            | "datetime-local"
            | "month"
            | "time"
            | "week"
    )
}

impl EditingTarget for DomTarget {
    fn is_text_editing(&self) -> bool {
        let Some(target) = self.0.as_ref() else {
            return false;
        };
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            return is_text_input_type(&input.type_());
        }
        let Some(element) = target.dyn_ref::<HtmlElement>() else {
            return false;
        };
        is_editing_tag(&element.tag_name()) || element.is_content_editable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_and_select_controls_are_editing() {
        assert!(is_editing_tag("TEXTAREA"), "text areas take typing");
        assert!(is_editing_tag("SELECT"), "selects take type-ahead");
    }

    #[test]
    fn other_elements_are_not() {
        assert!(!is_editing_tag("BUTTON"), "buttons activate on Enter");
        assert!(!is_editing_tag("BODY"), "the page body is not a field");
    }

    #[test]
    fn text_like_inputs_are_editing() {
        for kind in ["text", "search", "email", "password", "number", "date"] {
            assert!(is_text_input_type(kind), "{kind} takes typing");
        }
    }

    #[test]
    fn toggle_like_inputs_are_not_editing() {
        for kind in ["checkbox", "radio", "button", "submit", "range", "color", "file"] {
            assert!(!is_text_input_type(kind), "{kind} does not take typing");
        }
    }
}
