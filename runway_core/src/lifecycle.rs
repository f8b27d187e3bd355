// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input and visibility classification.
//!
//! Raw DOM input is reduced to a few intents before it reaches the
//! coordinator: which keys count as an unlock gesture, which one navigates,
//! and which sound-toggle clicks are touch duplicates of a pointer release.

use crate::time::{Duration, HostTime};

/// Capability predicate: is this event target a text-editing control?
///
/// Keys pressed while typing into a field must never start playback.
pub trait EditingTarget {
    /// Returns `true` for inputs, text areas, selects, and content-editable
    /// elements.
    fn is_text_editing(&self) -> bool;
}

impl EditingTarget for bool {
    fn is_text_editing(&self) -> bool {
        *self
    }
}

/// What a key press means to the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// Enter or Space outside a text field: retry gesture-gated playback.
    UnlockGesture,
    /// The dedicated navigation key. Never an unlock gesture.
    Navigate,
    /// Anything else.
    Ignore,
}

/// Classifies a `KeyboardEvent.key` value.
#[must_use]
pub fn classify_key(key: &str, target: &dyn EditingTarget, navigation_key: &str) -> KeyIntent {
    if target.is_text_editing() {
        return KeyIntent::Ignore;
    }
    if key == navigation_key {
        return KeyIntent::Navigate;
    }
    match key {
        "Enter" | " " | "Spacebar" => KeyIntent::UnlockGesture,
        _ => KeyIntent::Ignore,
    }
}

/// Suppresses the synthetic click that follows a pointer release on touch
/// devices, so one tap toggles sound once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleDedup {
    window: Duration,
    last_pointer_up: Option<HostTime>,
}

impl ToggleDedup {
    /// Creates a deduplicator with the given suppression window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_pointer_up: None,
        }
    }

    /// Records a pointer release on the toggle. Always activates.
    pub fn pointer_up(&mut self, now: HostTime) -> bool {
        self.last_pointer_up = Some(now);
        true
    }

    /// Returns `true` if a click at `now` should activate the toggle.
    ///
    /// A click inside the window consumes the recorded pointer release, so a
    /// second click is honoured.
    pub fn click(&mut self, now: HostTime) -> bool {
        match self.last_pointer_up.take() {
            Some(at) if now.saturating_duration_since(at) <= self.window => false,
            _ => true,
        }
    }
}

/// Page visibility as last reported by `visibilitychange`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The tab is in the foreground.
    #[default]
    Visible,
    /// The tab is hidden (background tab, minimized window, locked screen).
    Hidden,
}

impl Visibility {
    /// Maps `document.hidden`.
    #[must_use]
    pub const fn from_hidden(hidden: bool) -> Self {
        if hidden { Self::Hidden } else { Self::Visible }
    }

    /// Whether the page is hidden.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_unlock_outside_text_fields() {
        assert_eq!(classify_key("Enter", &false, "ArrowDown"), KeyIntent::UnlockGesture);
        assert_eq!(classify_key(" ", &false, "ArrowDown"), KeyIntent::UnlockGesture);
        assert_eq!(classify_key("Enter", &true, "ArrowDown"), KeyIntent::Ignore);
        assert_eq!(classify_key(" ", &true, "ArrowDown"), KeyIntent::Ignore);
        assert_eq!(classify_key("a", &false, "ArrowDown"), KeyIntent::Ignore);
    }

    #[test]
    fn navigation_key_is_not_an_unlock_gesture() {
        assert_eq!(classify_key("ArrowDown", &false, "ArrowDown"), KeyIntent::Navigate);
        // Even if the navigation key were bound to Enter, it only navigates.
        assert_eq!(classify_key("Enter", &false, "Enter"), KeyIntent::Navigate);
    }

    #[test]
    fn click_after_pointer_up_is_suppressed() {
        let mut dedup = ToggleDedup::new(Duration::from_millis(500));
        assert!(dedup.pointer_up(HostTime(1_000_000)));
        assert!(!dedup.click(HostTime(1_050_000)), "synthetic click");
        assert!(dedup.click(HostTime(1_100_000)), "a later real click activates");
    }

    #[test]
    fn late_click_activates() {
        let mut dedup = ToggleDedup::new(Duration::from_millis(500));
        dedup.pointer_up(HostTime(0));
        assert!(dedup.click(HostTime(600_000)));
    }

    #[test]
    fn keyboard_click_without_pointer_activates() {
        let mut dedup = ToggleDedup::new(Duration::from_millis(500));
        assert!(dedup.click(HostTime(0)));
    }
}
