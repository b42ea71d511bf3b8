//! UI locale passed explicitly to renderers, with a small key-value store
//! for the persisted language preference.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HyperlocalError, HyperlocalResult};

/// Preference key holding the UI language code.
pub const LANGUAGE_PREFERENCE_KEY: &str = "ui.language";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Hi,
    En,
    Ta,
    Te,
    Bn,
    Mr,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::Hi,
        Locale::En,
        Locale::Ta,
        Locale::Te,
        Locale::Bn,
        Locale::Mr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Hi => "hi",
            Locale::En => "en",
            Locale::Ta => "ta",
            Locale::Te => "te",
            Locale::Bn => "bn",
            Locale::Mr => "mr",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

/// Simple string key-value store.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> HyperlocalResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> HyperlocalResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> HyperlocalResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> HyperlocalResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file backed store. The whole map is rewritten on every `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open the store, reading existing values if the file exists.
    pub fn open(path: impl AsRef<Path>) -> HyperlocalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = values.len(), "opened preference store");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> HyperlocalResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> HyperlocalResult<()> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&*values)?;
        fs::write(&self.path, raw).map_err(|e| {
            HyperlocalError::Preferences(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Locale handed to whatever renders user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleContext {
    pub locale: Locale,
}

impl LocaleContext {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Read the stored preference, falling back to `default` when missing
    /// or unrecognised.
    pub fn from_store(store: &dyn PreferenceStore, default: Locale) -> HyperlocalResult<Self> {
        let locale = match store.get(LANGUAGE_PREFERENCE_KEY)? {
            Some(code) => Locale::parse(&code).unwrap_or_else(|| {
                warn!(code = %code, "unknown stored locale, using default");
                default
            }),
            None => default,
        };
        Ok(Self { locale })
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn persist(&self, store: &dyn PreferenceStore) -> HyperlocalResult<()> {
        store.set(LANGUAGE_PREFERENCE_KEY, self.locale.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("TA"), Some(Locale::Ta));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::default(), Locale::Hi);
    }

    #[test]
    fn test_context_from_memory_store() {
        let store = MemoryPreferenceStore::new();
        let ctx = LocaleContext::from_store(&store, Locale::Hi).unwrap();
        assert_eq!(ctx.locale, Locale::Hi);

        store.set(LANGUAGE_PREFERENCE_KEY, "klingon").unwrap();
        let ctx = LocaleContext::from_store(&store, Locale::En).unwrap();
        assert_eq!(ctx.locale, Locale::En);

        let mut ctx = LocaleContext::new(Locale::Hi);
        ctx.set_locale(Locale::Bn);
        ctx.persist(&store).unwrap();
        assert_eq!(
            store.get(LANGUAGE_PREFERENCE_KEY).unwrap().as_deref(),
            Some("bn")
        );
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = FilePreferenceStore::open(&path).unwrap();
        LocaleContext::new(Locale::Mr).persist(&store).unwrap();
        drop(store);

        let reopened = FilePreferenceStore::open(&path).unwrap();
        let ctx = LocaleContext::from_store(&reopened, Locale::Hi).unwrap();
        assert_eq!(ctx.locale, Locale::Mr);
    }
}
