// SPDX-License-Identifier: MPL-2.0
//! `localizer` is a small runtime text-localization library.
//!
//! It loads one locale's translation table from a YAML file on disk and
//! resolves dotted `"section.entry"` keys to human-readable strings, with
//! runtime locale switching, host-triggered reloads, and a synchronous
//! "locale updated" notification.

#![doc(html_root_url = "https://docs.rs/localizer/0.1.0")]

pub mod config;
pub mod error;
pub mod localization;

pub use error::{Error, Result};
pub use localization::{LoadState, LocaleInfo, LocaleTable, LocalizationStore};
