// SPDX-License-Identifier: MPL-2.0
//! Locale file loading and discovery.
//!
//! A locale file is a YAML document at `<base>/<locale>.yaml` holding a
//! two-level mapping: section key → entry key → localized string. The
//! loader decodes the whole file into a [`LocaleTable`]; anything that is
//! not exactly that shape (non-string leaf, wrong nesting depth, syntax
//! error) is a decode failure and the file is treated as unusable.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

/// The in-memory translation table for one locale:
/// section key → entry key → localized string.
pub type LocaleTable = HashMap<String, HashMap<String, String>>;

/// File extension of locale files.
pub const LOCALE_FILE_EXT: &str = "yaml";

/// Reserved section holding metadata about the locale file itself.
/// Its `name` entry, when present, is the human-readable locale name.
pub const META_SECTION: &str = "meta";

/// A locale discovered in the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
    /// The identifier used to load the file (file stem, e.g. `"en-US"`).
    pub tag: String,
    /// Human-readable name from the file's `meta.name` entry, if any.
    pub name: Option<String>,
}

/// Returns the path of the file backing `locale` under `base`.
pub fn locale_file_path(base: &Path, locale: &str) -> PathBuf {
    base.join(format!("{}.{}", locale, LOCALE_FILE_EXT))
}

/// Loads and decodes the locale file for `locale` under `base`.
///
/// Fails with [`Error::FileNotFound`] if the file does not exist, and with
/// [`Error::Decode`] if it exists but does not decode to a two-level
/// string mapping. Never panics past this boundary; callers decide how to
/// report the failure.
pub fn load_table(base: &Path, locale: &str) -> Result<LocaleTable> {
    let path = locale_file_path(base, locale);

    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(&path)?;
    let table: LocaleTable = serde_yaml::from_str(&content)?;
    Ok(table)
}

/// Scans `base` for loadable locale files.
///
/// A file counts as a locale when it has the `.yaml` extension and its
/// stem parses as an IETF language identifier; files that fail to decode
/// are skipped. The result is sorted by tag so the listing is stable
/// across platforms. An unreadable directory yields an empty list.
pub fn discover_locales(base: &Path) -> Vec<LocaleInfo> {
    let Ok(entries) = fs::read_dir(base) else {
        return Vec::new();
    };

    let mut locales = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(&format!(".{}", LOCALE_FILE_EXT)) else {
            continue;
        };
        if stem.parse::<LanguageIdentifier>().is_err() {
            continue;
        }
        match load_table(base, stem) {
            Ok(table) => {
                let name = table
                    .get(META_SECTION)
                    .and_then(|meta| meta.get("name"))
                    .cloned();
                locales.push(LocaleInfo {
                    tag: stem.to_string(),
                    name,
                });
            }
            Err(err) => {
                log::debug!("Skipping undecodable locale file {:?}: {}", file_name, err);
            }
        }
    }

    locales.sort_by(|a, b| a.tag.cmp(&b.tag));
    locales
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_locale(dir: &Path, locale: &str, content: &str) {
        fs::write(locale_file_path(dir, locale), content).expect("failed to write locale file");
    }

    #[test]
    fn locale_file_path_joins_base_locale_and_extension() {
        let path = locale_file_path(Path::new("assets/locales"), "en-US");
        assert_eq!(path, Path::new("assets/locales").join("en-US.yaml"));
    }

    #[test]
    fn load_table_decodes_two_level_mapping() {
        let dir = tempdir().expect("failed to create temp dir");
        write_locale(
            dir.path(),
            "en-US",
            "ui:\n  start: Play\n  quit: Exit\nmenu:\n  title: Main Menu\n",
        );

        let table = load_table(dir.path(), "en-US").expect("load should succeed");
        assert_eq!(table["ui"]["start"], "Play");
        assert_eq!(table["menu"]["title"], "Main Menu");
    }

    #[test]
    fn load_table_missing_file_is_file_not_found() {
        let dir = tempdir().expect("failed to create temp dir");
        let err = load_table(dir.path(), "fr-FR").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn load_table_malformed_yaml_is_decode_error() {
        let dir = tempdir().expect("failed to create temp dir");
        write_locale(dir.path(), "en-US", "ui:\n  start: [unclosed\n");

        let err = load_table(dir.path(), "en-US").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn load_table_wrong_shape_is_decode_error() {
        // A flat mapping is not a valid locale table.
        let dir = tempdir().expect("failed to create temp dir");
        write_locale(dir.path(), "en-US", "ui: Play\n");

        let err = load_table(dir.path(), "en-US").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn discover_locales_lists_parseable_stems_sorted() {
        let dir = tempdir().expect("failed to create temp dir");
        write_locale(dir.path(), "fr-FR", "ui:\n  start: Jouer\n");
        write_locale(
            dir.path(),
            "en-US",
            "meta:\n  name: English (US)\nui:\n  start: Play\n",
        );
        fs::write(dir.path().join("notes.txt"), "not a locale").unwrap();

        let locales = discover_locales(dir.path());
        assert_eq!(locales.len(), 2);
        assert_eq!(locales[0].tag, "en-US");
        assert_eq!(locales[0].name.as_deref(), Some("English (US)"));
        assert_eq!(locales[1].tag, "fr-FR");
        assert_eq!(locales[1].name, None);
    }

    #[test]
    fn discover_locales_skips_undecodable_files() {
        let dir = tempdir().expect("failed to create temp dir");
        write_locale(dir.path(), "en-US", "ui:\n  start: Play\n");
        write_locale(dir.path(), "de-DE", "broken: [yaml\n");

        let locales = discover_locales(dir.path());
        assert_eq!(locales.len(), 1);
        assert_eq!(locales[0].tag, "en-US");
    }

    #[test]
    fn discover_locales_missing_directory_is_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        let locales = discover_locales(&dir.path().join("does-not-exist"));
        assert!(locales.is_empty());
    }
}
