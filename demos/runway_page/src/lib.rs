// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The runway page: a muted background film with an opt-in soundtrack.
//!
//! Build with: `wasm-pack build --target web demos/runway_page`
//! Then serve `demos/runway_page/` (with the media files under `assets/`) and
//! open `index.html`. Build with `--features trace` to log coordinator
//! decisions to the console.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;

use runway_backend_web::{ConsoleSink, PageIds, mount};
use runway_core::config::CoordinatorConfig;
use runway_core::trace::TraceSink;
use wasm_bindgen::prelude::*;

/// Entry point: mounts the coordinator on the runway page's elements.
///
/// A page without the media stage mounts nothing.
///
/// # Errors
///
/// Returns the exception if there is no document or binding fails.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let sink: Option<Box<dyn TraceSink>> = if cfg!(feature = "trace") {
        Some(Box::new(ConsoleSink))
    } else {
        None
    };
    let Some(mounted) = mount(&document, &PageIds::RUNWAY, CoordinatorConfig::runway(), sink)?
    else {
        return Ok(());
    };

    // The coordinator lives as long as the page.
    core::mem::forget(mounted);

    Ok(())
}
