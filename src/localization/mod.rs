// SPDX-License-Identifier: MPL-2.0
//! Runtime localization support.
//!
//! This module loads a YAML translation table for the active locale and
//! resolves dotted `"section.entry"` keys to localized strings.
//!
//! # Features
//!
//! - Lazy loading of `<base>/<locale>.yaml` translation files
//! - Runtime locale switching and host-triggered reload
//! - Locale discovery from the base directory
//! - Synchronous "locale updated" notification for registered listeners

pub mod events;
pub mod loader;
pub mod store;

pub use events::{ListenerId, LocaleListeners};
pub use loader::{LocaleInfo, LocaleTable};
pub use store::{LoadState, LocalizationStore, DEFAULT_LOCALE, DEFAULT_LOCALE_DIR};
