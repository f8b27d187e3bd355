// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Start-up source selection against the live page.

use alloc::string::String;

use web_sys::{HtmlMediaElement, Window};

use runway_core::source::{
    Capabilities, SourceCandidates, needs_reassignment, select_audio_fallback, select_video_source,
};

/// Viewports at or below this width prefer the mobile encodes.
const NARROW_VIEWPORT_QUERY: &str = "(max-width: 768px)";
const MODERN_VIDEO_TYPE: &str = "video/webm";
const PRIMARY_AUDIO_TYPE: &str = "audio/mp4";

fn can_play(element: &HtmlMediaElement, mime: &str) -> bool {
    !element.can_play_type(mime).is_empty()
}

fn capabilities(window: &Window, video: &HtmlMediaElement) -> Capabilities {
    let narrow_viewport = window
        .match_media(NARROW_VIEWPORT_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    Capabilities {
        narrow_viewport,
        modern_codec: can_play(video, MODERN_VIDEO_TYPE),
    }
}

/// Points the video at its best declared candidate (from the
/// `data-desktop-src`, `data-desktop-webm`, `data-mobile-src`, and
/// `data-mobile-webm` attributes) and swaps the audio to its
/// `data-fallback-src` when the primary codec is unplayable.
///
/// Runs once, before the first play attempt. Reassigning a source the
/// element already resolves to is skipped so the load is not restarted.
pub(crate) fn apply_sources(window: &Window, video: &HtmlMediaElement, audio: &HtmlMediaElement) {
    let data = video.dataset();
    let desktop = data.get("desktopSrc");
    let desktop_modern = data.get("desktopWebm");
    let mobile = data.get("mobileSrc");
    let mobile_modern = data.get("mobileWebm");
    let candidates = SourceCandidates {
        desktop: desktop.as_deref(),
        desktop_modern: desktop_modern.as_deref(),
        mobile: mobile.as_deref(),
        mobile_modern: mobile_modern.as_deref(),
    };

    if let Some(desired) = select_video_source(&candidates, capabilities(window, video)) {
        let current = resolved_source(video);
        if needs_reassignment(&current, desired) {
            video.set_src(desired);
        }
    }

    let fallback = audio.dataset().get("fallbackSrc");
    let primary_playable = can_play(audio, PRIMARY_AUDIO_TYPE);
    if let Some(src) = select_audio_fallback(fallback.as_deref(), primary_playable) {
        audio.set_src(src);
    }
}

/// `currentSrc`, or the raw `src` attribute before the element has resolved
/// a resource.
fn resolved_source(element: &HtmlMediaElement) -> String {
    let current = element.current_src();
    if !current.is_empty() {
        return current;
    }
    element.get_attribute("src").unwrap_or_default()
}
