use crate::core::error::{AppError, Result};
use crate::lang::LanguageCode;
use once_cell::sync::OnceCell;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(RustEmbed)]
#[folder = "src/content/locales/"]
struct Locales;

/// Localized text bundle served for one language. Field names are camelCase
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub title: String,
    pub subtitle: String,
    pub welcome_message: String,
    pub current_language: String,
    pub instructions: String,
}

impl ContentRecord {
    fn validate(&self, lang: LanguageCode) -> Result<()> {
        let fields = [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("welcomeMessage", &self.welcome_message),
            ("currentLanguage", &self.current_language),
            ("instructions", &self.instructions),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Empty content field '{}' for language {}",
                    name, lang
                )));
            }
        }
        Ok(())
    }
}

/// Read-only table of localized content, loaded once at startup from the
/// embedded locale assets and never mutated afterwards.
#[derive(Debug)]
pub struct ContentStore {
    records: HashMap<LanguageCode, ContentRecord>,
    fallback: ContentRecord,
}

impl ContentStore {
    pub fn load() -> Result<Self> {
        let mut records = HashMap::new();

        for lang in LanguageCode::ALL {
            let filename = format!("{}.json", lang.as_str());
            let asset = Locales::get(&filename).ok_or_else(|| {
                AppError::Validation(format!("Missing locale asset: {}", filename))
            })?;

            let raw = std::str::from_utf8(asset.data.as_ref())
                .map_err(|e| AppError::Validation(format!("{}: {}", filename, e)))?;
            let record: ContentRecord = serde_json::from_str(raw)
                .map_err(|e| AppError::Validation(format!("{}: {}", filename, e)))?;

            record.validate(lang)?;
            records.insert(lang, record);
        }

        let fallback = records
            .get(&LanguageCode::DEFAULT)
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Missing locale asset for default language {}",
                    LanguageCode::DEFAULT
                ))
            })?;

        Ok(Self { records, fallback })
    }

    /// Record for `lang`, or the default-language record when the table has
    /// no entry for it. Every supported code is loaded at startup, so the
    /// fallback only matters if the closed set ever grows past the assets.
    pub fn get(&self, lang: LanguageCode) -> &ContentRecord {
        self.records.get(&lang).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

static STORE: OnceCell<ContentStore> = OnceCell::new();

/// Loads the store eagerly so asset problems surface at startup, not on the
/// first request.
pub fn init() -> Result<()> {
    store().map(|_| ())
}

pub fn store() -> Result<&'static ContentStore> {
    STORE.get_or_try_init(ContentStore::load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_record_for_every_supported_language() {
        let store = ContentStore::load().unwrap();
        assert_eq!(store.len(), LanguageCode::ALL.len());
        for lang in LanguageCode::ALL {
            let record = store.get(lang);
            assert!(!record.title.is_empty());
            assert!(!record.welcome_message.is_empty());
        }
    }

    #[test]
    fn records_differ_between_languages() {
        let store = ContentStore::load().unwrap();
        assert_ne!(
            store.get(LanguageCode::It).title,
            store.get(LanguageCode::En).title
        );
    }

    #[test]
    fn wire_format_is_camel_case() {
        let store = ContentStore::load().unwrap();
        let json = serde_json::to_value(store.get(LanguageCode::Fr)).unwrap();
        assert!(json.get("welcomeMessage").is_some());
        assert!(json.get("currentLanguage").is_some());
        assert!(json.get("welcome_message").is_none());
    }

    #[test]
    fn global_store_initializes_once() {
        init().unwrap();
        let a = store().unwrap() as *const ContentStore;
        let b = store().unwrap() as *const ContentStore;
        assert_eq!(a, b);
    }
}
