// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-facing status.
//!
//! All failures reach the user through one text region. [`SyncStatus`] is
//! recomputed from gate state after every event; [`StatusSurface`] forwards
//! it (and the other page affordances) to a [`Surface`] only when something
//! actually changed.

use crate::config::StatusMessages;
use crate::media::MediaKind;
use crate::timecode::Timecode;

/// What the status region currently reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncStatus {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// Video playback needs a user gesture.
    AwaitingGesture,
    /// Healthy playback.
    Playing,
    /// The browser refused audio playback.
    Blocked,
    /// A media file failed to load or decode.
    AssetMissing(MediaKind),
}

impl SyncStatus {
    /// The text shown for this status. Healthy states show nothing.
    #[must_use]
    pub const fn message(self, messages: &StatusMessages) -> &'static str {
        match self {
            Self::Idle | Self::Playing => "",
            Self::AwaitingGesture => messages.tap_to_start,
            Self::Blocked => messages.sound_blocked,
            Self::AssetMissing(MediaKind::Video) => messages.video_missing,
            Self::AssetMissing(MediaKind::Audio) => messages.audio_missing,
        }
    }
}

/// The page elements the coordinator writes to.
pub trait Surface {
    /// Replaces the status text.
    fn set_status(&mut self, text: &str);

    /// Replaces the timecode text.
    fn set_timecode(&mut self, timecode: Timecode);

    /// Reflects the sound preference on the toggle control.
    fn set_sound_toggle(&mut self, sound_enabled: bool);

    /// Shows or hides the "tap to play" prompt.
    fn set_play_prompt_visible(&mut self, visible: bool);
}

/// Write-on-change front for a [`Surface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSurface {
    status: Option<SyncStatus>,
    sound_toggle: Option<bool>,
    play_prompt: Option<bool>,
}

impl StatusSurface {
    /// Creates a front that will write every field on first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            sound_toggle: None,
            play_prompt: None,
        }
    }

    /// Returns the status last written.
    #[must_use]
    pub const fn status(&self) -> Option<SyncStatus> {
        self.status
    }

    /// Writes `status` if it differs from the last one. Returns `true` on a
    /// write.
    pub fn show_status(
        &mut self,
        surface: &mut dyn Surface,
        status: SyncStatus,
        messages: &StatusMessages,
    ) -> bool {
        if self.status == Some(status) {
            return false;
        }
        let previous_text = self.status.map(|s| s.message(messages));
        self.status = Some(status);
        let text = status.message(messages);
        // Playing and Idle share the empty text; skip the redundant write.
        if previous_text != Some(text) {
            surface.set_status(text);
        }
        true
    }

    /// Mirrors the sound preference on the toggle if it changed.
    pub fn show_sound_toggle(&mut self, surface: &mut dyn Surface, sound_enabled: bool) {
        if self.sound_toggle != Some(sound_enabled) {
            self.sound_toggle = Some(sound_enabled);
            surface.set_sound_toggle(sound_enabled);
        }
    }

    /// Shows or hides the play prompt if that changed.
    pub fn show_play_prompt(&mut self, surface: &mut dyn Surface, visible: bool) {
        if self.play_prompt != Some(visible) {
            self.play_prompt = Some(visible);
            surface.set_play_prompt_visible(visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString as _};
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Surface for Log {
        fn set_status(&mut self, text: &str) {
            self.0.push(alloc::format!("status:{text}"));
        }
        fn set_timecode(&mut self, timecode: Timecode) {
            self.0.push(timecode.to_string());
        }
        fn set_sound_toggle(&mut self, sound_enabled: bool) {
            self.0.push(alloc::format!("toggle:{sound_enabled}"));
        }
        fn set_play_prompt_visible(&mut self, visible: bool) {
            self.0.push(alloc::format!("prompt:{visible}"));
        }
    }

    const MESSAGES: StatusMessages = StatusMessages::RUNWAY;

    #[test]
    fn messages_map_one_to_one() {
        assert_eq!(SyncStatus::Idle.message(&MESSAGES), "");
        assert_eq!(SyncStatus::Playing.message(&MESSAGES), "");
        assert_eq!(
            SyncStatus::AwaitingGesture.message(&MESSAGES),
            MESSAGES.tap_to_start
        );
        assert_eq!(SyncStatus::Blocked.message(&MESSAGES), MESSAGES.sound_blocked);
        assert_eq!(
            SyncStatus::AssetMissing(MediaKind::Video).message(&MESSAGES),
            MESSAGES.video_missing
        );
        assert_eq!(
            SyncStatus::AssetMissing(MediaKind::Audio).message(&MESSAGES),
            MESSAGES.audio_missing
        );
    }

    #[test]
    fn writes_only_on_change() {
        let mut log = Log::default();
        let mut front = StatusSurface::new();

        assert!(front.show_status(&mut log, SyncStatus::Idle, &MESSAGES));
        assert!(!front.show_status(&mut log, SyncStatus::Idle, &MESSAGES));
        assert!(front.show_status(&mut log, SyncStatus::Playing, &MESSAGES));
        assert!(front.show_status(&mut log, SyncStatus::Blocked, &MESSAGES));

        front.show_sound_toggle(&mut log, false);
        front.show_sound_toggle(&mut log, false);
        front.show_play_prompt(&mut log, true);
        front.show_play_prompt(&mut log, true);

        assert_eq!(
            log.0,
            [
                "status:".to_string(),
                alloc::format!("status:{}", MESSAGES.sound_blocked),
                "toggle:false".to_string(),
                "prompt:true".to_string(),
            ]
        );
    }
}
