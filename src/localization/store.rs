// SPDX-License-Identifier: MPL-2.0
//! The localization store: one locale's translation table plus the
//! operations to look up, switch, and reload it.
//!
//! The store is an owned value; the host constructs one at startup (see
//! [`LocalizationStore::from_config`]) and passes it to whatever needs
//! translations. Loading is lazy: the first lookup pays the file read,
//! and a failed load is retried by the next lookup or by an explicit
//! [`refresh`]/[`set_locale`].
//!
//! [`refresh`]: LocalizationStore::refresh
//! [`set_locale`]: LocalizationStore::set_locale

use crate::config::Config;
use crate::error::{Error, Result};
use crate::localization::events::{ListenerId, LocaleListeners};
use crate::localization::loader::{self, LocaleInfo, LocaleTable};
use std::path::{Path, PathBuf};

/// Locale assumed when neither the config nor the OS yields a usable one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Directory searched for locale files when the config names none.
pub const DEFAULT_LOCALE_DIR: &str = "locales";

/// Load lifecycle of the translation table.
///
/// `Failed` keeps the load error around so hosts can inspect why the
/// table is absent instead of guessing from a log line.
#[derive(Debug)]
pub enum LoadState {
    /// No load attempted since construction or the last locale switch.
    Uninitialized,
    /// A table is loaded and serving lookups.
    Loaded(LocaleTable),
    /// The last load attempt failed; no table is held.
    Failed(Error),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn table(&self) -> Option<&LocaleTable> {
        match self {
            LoadState::Loaded(table) => Some(table),
            _ => None,
        }
    }
}

/// Holds the active locale's translation table and resolves dotted
/// `"section.entry"` keys to localized strings.
///
/// # Example
///
/// ```no_run
/// use localizer::localization::store::LocalizationStore;
///
/// let mut store = LocalizationStore::new("assets/locales");
/// let label = store.translate("ui.start").to_string();
/// ```
pub struct LocalizationStore {
    state: LoadState,
    locale: String,
    base_dir: PathBuf,
    listeners: LocaleListeners,
}

impl std::fmt::Debug for LocalizationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationStore")
            .field("locale", &self.locale)
            .field("base_dir", &self.base_dir)
            .field("state", &self.state)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl LocalizationStore {
    /// Creates a store reading from `base_dir` with the default locale.
    /// Nothing is loaded until the first lookup or an explicit `init`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_locale(base_dir, DEFAULT_LOCALE)
    }

    /// Creates a store with an explicit starting locale.
    pub fn with_locale(base_dir: impl Into<PathBuf>, locale: impl Into<String>) -> Self {
        Self {
            state: LoadState::Uninitialized,
            locale: locale.into(),
            base_dir: base_dir.into(),
            listeners: LocaleListeners::new(),
        }
    }

    /// Creates a store from persisted host settings, picking the starting
    /// locale from the config file, then the OS locale, then
    /// [`DEFAULT_LOCALE`].
    pub fn from_config(config: &Config) -> Self {
        let base_dir = config
            .locale_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALE_DIR));
        let available = loader::discover_locales(&base_dir);
        let locale = resolve_locale(None, config, &available)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        Self::with_locale(base_dir, locale)
    }

    /// Loads the table for the current locale if none is held.
    ///
    /// Idempotent: with a table already loaded this is a no-op and
    /// touches neither the disk nor the listeners. On a successful load
    /// the "locale updated" listeners fire once, in registration order.
    /// On failure the error is logged, retained in [`LoadState::Failed`],
    /// and returned; no notification fires.
    pub fn init(&mut self) -> Result<()> {
        if self.state.is_loaded() {
            return Ok(());
        }

        match loader::load_table(&self.base_dir, &self.locale) {
            Ok(table) => {
                self.state = LoadState::Loaded(table);
                self.listeners.notify();
                Ok(())
            }
            Err(err) => {
                log::error!("Localization: could not load locale {:?}: {}", self.locale, err);
                self.state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Switches the active locale and reloads.
    ///
    /// The current table is always discarded first, even when `locale`
    /// matches the active one, so every call is a fresh read from disk
    /// with at most one notification.
    pub fn set_locale(&mut self, locale: impl Into<String>) -> Result<()> {
        self.state = LoadState::Uninitialized;
        self.locale = locale.into();
        self.init()
    }

    /// Reloads the current locale's file, for when it may have changed on
    /// disk. A no-op when no table is loaded, so a stray refresh event
    /// never triggers a first load.
    pub fn refresh(&mut self) -> Result<()> {
        if !self.state.is_loaded() {
            return Ok(());
        }
        self.state = LoadState::Uninitialized;
        self.init()
    }

    /// Sets the directory used by subsequent loads. The path is stored
    /// verbatim and nothing is reloaded; callers follow up with
    /// [`set_locale`](Self::set_locale) or [`refresh`](Self::refresh).
    pub fn set_path(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = base_dir.into();
    }

    /// Resolves a dotted `"section.entry"` key against the table.
    ///
    /// Ensures the store is initialized first (lazy load). Returns `""`
    /// for a blank key, an absent table, a key without a `.`, or a
    /// section/entry that is not present. The key is split on the first
    /// `.`, so only two-segment keys ever resolve.
    pub fn resolve(&mut self, key: &str) -> &str {
        // A failed load was already logged by init.
        let _ = self.init();

        if key.trim().is_empty() {
            return "";
        }

        let Some(table) = self.state.table() else {
            return "";
        };
        let Some((section, entry)) = key.split_once('.') else {
            return "";
        };
        table
            .get(section)
            .and_then(|entries| entries.get(entry))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether `key` resolves to a non-empty string. Meant for validation
    /// UIs; never reports an error.
    pub fn contains(&mut self, key: &str) -> bool {
        !self.resolve(key).is_empty()
    }

    /// The user-facing lookup: like [`resolve`](Self::resolve), but a
    /// blank key or an empty result is reported through the logging
    /// surface as a missing key.
    ///
    /// A translation that legitimately resolves to an empty string is
    /// indistinguishable from a missing key here; that conflation is
    /// deliberate.
    pub fn translate(&mut self, key: &str) -> &str {
        let value = self.resolve(key);

        if key.trim().is_empty() || value.is_empty() {
            log::error!("The localized text key {:?} was not found", key);
            return "";
        }

        value
    }

    /// Registers a "locale updated" listener, fired synchronously after
    /// every successful (re)load.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Locales discoverable in the current base directory.
    pub fn available_locales(&self) -> Vec<LocaleInfo> {
        loader::discover_locales(&self.base_dir)
    }

    /// The active locale identifier.
    pub fn current_locale(&self) -> &str {
        &self.locale
    }

    /// The directory locale files are read from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Current load lifecycle state, including a retained load error.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether a table is currently loaded. Cheap and side-effect free,
    /// unlike the lookups, which may trigger the lazy load.
    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// The retained error from the last failed load, if the store is in
    /// the failed state.
    pub fn last_error(&self) -> Option<&Error> {
        self.state.error()
    }
}

/// Picks a starting locale: an explicit override first, then the config
/// file, then the OS locale, each accepted only when present in
/// `available`. Returns `None` when nothing matches.
pub fn resolve_locale(
    explicit: Option<&str>,
    config: &Config,
    available: &[LocaleInfo],
) -> Option<String> {
    let is_available = |tag: &str| available.iter().any(|info| info.tag == tag);

    if let Some(tag) = explicit {
        if is_available(tag) {
            return Some(tag.to_string());
        }
    }

    if let Some(tag) = &config.language {
        if is_available(tag) {
            return Some(tag.clone());
        }
    }

    if let Some(tag) = sys_locale::get_locale() {
        if is_available(&tag) {
            return Some(tag);
        }
    }

    None
}
