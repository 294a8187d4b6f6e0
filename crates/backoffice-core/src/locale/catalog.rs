//! Message catalogs and key lookup.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;
use crate::locale::model::{AVAILABLE_LOCALES, DEFAULT_LOCALE};

const EN_MESSAGES: &str = include_str!("../../locales/en.json");
const VI_MESSAGES: &str = include_str!("../../locales/vi.json");

/// Translates dotted message keys (`common.save`) for the active locale.
///
/// Lookup order: active locale, fallback locale, then the key itself.
#[derive(Debug, Clone)]
pub struct Translator {
    messages: BTreeMap<String, Value>,
    locale: String,
    fallback_locale: String,
}

impl Translator {
    /// Creates a translator with the bundled catalogs.
    pub fn bundled() -> Result<Self> {
        let mut translator = Self::empty();
        translator.add_messages("en", serde_json::from_str(EN_MESSAGES)?);
        translator.add_messages("vi", serde_json::from_str(VI_MESSAGES)?);
        Ok(translator)
    }

    /// Creates a translator without catalogs; every key translates to itself.
    pub fn empty() -> Self {
        Self {
            messages: BTreeMap::new(),
            locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn add_messages(&mut self, locale: &str, messages: Value) {
        self.messages.insert(locale.to_string(), messages);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn set_fallback_locale(&mut self, locale: impl Into<String>) {
        self.fallback_locale = locale.into();
    }

    /// Translates `key`; a missing key is returned unchanged.
    pub fn t(&self, key: &str) -> String {
        self.lookup(&self.locale, key)
            .or_else(|| self.lookup(&self.fallback_locale, key))
            .unwrap_or_else(|| key.to_string())
    }

    /// Like [`Translator::t`], but absent or empty keys pass through as-is.
    pub fn safe_translate(&self, key: Option<&str>) -> Option<String> {
        match key {
            None => None,
            Some("") => Some(String::new()),
            Some(key) => Some(self.t(key)),
        }
    }

    /// Whether `key` exists in `locale` (active locale when `None`).
    pub fn has(&self, key: &str, locale: Option<&str>) -> bool {
        self.lookup(locale.unwrap_or(&self.locale), key).is_some()
    }

    /// Translations of `key` in every available locale that defines it.
    pub fn translations(&self, key: &str) -> BTreeMap<String, String> {
        AVAILABLE_LOCALES
            .iter()
            .filter_map(|locale| {
                self.lookup(locale.code, key)
                    .map(|text| (locale.code.to_string(), text))
            })
            .collect()
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let mut node = self.messages.get(locale)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        node.as_str().map(str::to_string)
    }
}
