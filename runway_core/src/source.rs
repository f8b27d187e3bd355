// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Start-up source selection.
//!
//! The page declares up to four video candidates (desktop/mobile, each with
//! a legacy and a modern-codec encoding) plus an optional audio fallback.
//! Selection runs once before the first play attempt. Nothing here fails: if
//! no candidate resolves, the element keeps whatever source it has and a
//! missing file surfaces later through the element's `error` event.

/// Declared video source candidates. Empty strings count as absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceCandidates<'a> {
    /// Desktop source in the legacy codec (e.g. MP4/H.264).
    pub desktop: Option<&'a str>,
    /// Desktop source in the modern codec (e.g. WebM).
    pub desktop_modern: Option<&'a str>,
    /// Mobile source in the legacy codec.
    pub mobile: Option<&'a str>,
    /// Mobile source in the modern codec.
    pub mobile_modern: Option<&'a str>,
}

/// Environment facts that drive selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// The viewport matches the narrow (mobile) media query.
    pub narrow_viewport: bool,
    /// The video element can play the modern codec.
    pub modern_codec: bool,
}

fn present(candidate: Option<&str>) -> Option<&str> {
    candidate.filter(|s| !s.is_empty())
}

/// Picks the video source to use.
///
/// In priority order:
/// 1. narrow viewport, modern codec, mobile modern source;
/// 2. narrow viewport, mobile legacy source;
/// 3. modern codec, desktop modern source;
/// 4. desktop legacy source.
#[must_use]
pub fn select_video_source<'a>(
    candidates: &SourceCandidates<'a>,
    caps: Capabilities,
) -> Option<&'a str> {
    if caps.narrow_viewport {
        if caps.modern_codec
            && let Some(src) = present(candidates.mobile_modern)
        {
            return Some(src);
        }
        if let Some(src) = present(candidates.mobile) {
            return Some(src);
        }
    }
    if caps.modern_codec
        && let Some(src) = present(candidates.desktop_modern)
    {
        return Some(src);
    }
    present(candidates.desktop)
}

/// Whether the element must be pointed at `desired`.
///
/// `current` is the element's resolved source (usually an absolute URL)
/// while `desired` is usually the relative path from markup, so the
/// comparison is by suffix.
#[must_use]
pub fn needs_reassignment(current: &str, desired: &str) -> bool {
    !desired.is_empty() && !current.ends_with(desired)
}

/// Picks the audio fallback source, if one should replace the primary.
///
/// The fallback is only used when the primary codec cannot be played.
#[must_use]
pub fn select_audio_fallback(fallback: Option<&str>, primary_playable: bool) -> Option<&str> {
    if primary_playable {
        return None;
    }
    present(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: SourceCandidates<'static> = SourceCandidates {
        desktop: Some("assets/runway.mp4"),
        desktop_modern: Some("assets/runway.webm"),
        mobile: Some("assets/runway-mobile.mp4"),
        mobile_modern: Some("assets/runway-mobile.webm"),
    };

    fn caps(narrow_viewport: bool, modern_codec: bool) -> Capabilities {
        Capabilities {
            narrow_viewport,
            modern_codec,
        }
    }

    #[test]
    fn priority_order_with_all_candidates() {
        assert_eq!(
            select_video_source(&ALL, caps(true, true)),
            Some("assets/runway-mobile.webm")
        );
        assert_eq!(
            select_video_source(&ALL, caps(true, false)),
            Some("assets/runway-mobile.mp4")
        );
        assert_eq!(
            select_video_source(&ALL, caps(false, true)),
            Some("assets/runway.webm")
        );
        assert_eq!(
            select_video_source(&ALL, caps(false, false)),
            Some("assets/runway.mp4")
        );
    }

    #[test]
    fn narrow_viewport_without_mobile_sources_falls_through_to_desktop() {
        let desktop_only = SourceCandidates {
            mobile: None,
            mobile_modern: Some(""),
            ..ALL
        };
        assert_eq!(
            select_video_source(&desktop_only, caps(true, true)),
            Some("assets/runway.webm")
        );
        assert_eq!(
            select_video_source(&desktop_only, caps(true, false)),
            Some("assets/runway.mp4")
        );
    }

    #[test]
    fn nothing_declared_resolves_to_none() {
        assert_eq!(
            select_video_source(&SourceCandidates::default(), caps(true, true)),
            None
        );
    }

    #[test]
    fn reassignment_is_idempotent_by_suffix() {
        assert!(!needs_reassignment(
            "https://example.com/assets/runway.webm",
            "assets/runway.webm"
        ));
        assert!(needs_reassignment(
            "https://example.com/assets/runway.mp4",
            "assets/runway.webm"
        ));
        assert!(needs_reassignment("", "assets/runway.mp4"));
        assert!(!needs_reassignment("anything", ""), "empty desire never reassigns");
    }

    #[test]
    fn audio_fallback_only_when_primary_unplayable() {
        assert_eq!(select_audio_fallback(Some("a.ogg"), true), None);
        assert_eq!(select_audio_fallback(Some("a.ogg"), false), Some("a.ogg"));
        assert_eq!(select_audio_fallback(Some(""), false), None);
        assert_eq!(select_audio_fallback(None, false), None);
    }
}
