// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `window.localStorage` binding.
//!
//! Storage may be missing entirely (disabled cookies, sandboxed frames) or
//! throw on any access. Neither case is fatal: the store reports a
//! [`StoreError`] and the preference layer treats the flags as unset.

use alloc::string::String;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage, Window};

use runway_core::prefs::{KeyValueStore, StoreError};

/// [`KeyValueStore`] over `localStorage`.
#[derive(Debug)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Opens the window's local storage. Access errors yield a store whose
    /// every operation reports [`StoreError::Unavailable`].
    #[must_use]
    pub fn open(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

/// Maps a `DOMException` name to a [`StoreError`].
fn classify(name: &str) -> StoreError {
    match name {
        "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED" => StoreError::QuotaExceeded,
        "SecurityError" => StoreError::Unavailable,
        _ => StoreError::Other,
    }
}

fn store_error(error: &JsValue) -> StoreError {
    error
        .dyn_ref::<DomException>()
        .map_or(StoreError::Other, |e| classify(&e.name()))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(|e| store_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|e| store_error(&e))
    }
}
