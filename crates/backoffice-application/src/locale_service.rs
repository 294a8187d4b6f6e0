//! Active locale management and translation.
//!
//! The active locale is persisted under [`LOCALE_KEY`] and restored on
//! construction. The `language` field of the stored settings is written in
//! the same batch, so the two never disagree. Only locales listed in
//! [`AVAILABLE_LOCALES`] are accepted.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use backoffice_core::locale::format::{self, DEFAULT_MAX_FRACTION_DIGITS};
use backoffice_core::locale::model::{self, AVAILABLE_LOCALES, DEFAULT_LOCALE, LocaleInfo};
use backoffice_core::locale::Translator;
use backoffice_core::settings::Settings;
use backoffice_core::storage::{KeyValueStorage, LOCALE_KEY, SETTINGS_KEY, StorageOp};
use chrono::NaiveDate;

/// Shared handle to the translator and the active locale; cheap to clone.
#[derive(Clone)]
pub struct LocaleService {
    translator: Arc<RwLock<Translator>>,
    storage: Arc<dyn KeyValueStorage>,
}

impl LocaleService {
    /// Wraps `translator` and switches it to the stored locale.
    ///
    /// A stored code that is not an available locale falls back to
    /// [`DEFAULT_LOCALE`].
    pub fn new(storage: Arc<dyn KeyValueStorage>, mut translator: Translator) -> Self {
        let stored = match storage.get_item(LOCALE_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[LocaleService] Failed to load locale: {}", e);
                None
            }
        };

        let locale = stored
            .filter(|code| model::is_available(code))
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        translator.set_locale(locale);

        Self {
            translator: Arc::new(RwLock::new(translator)),
            storage,
        }
    }

    /// Current locale code.
    pub fn locale(&self) -> String {
        self.read().locale().to_string()
    }

    /// Switches to `code` if it is an available locale.
    ///
    /// Returns `false` and leaves the locale unchanged otherwise.
    pub fn set_locale(&self, code: &str) -> bool {
        if !model::is_available(code) {
            let available: Vec<_> = AVAILABLE_LOCALES.iter().map(|l| l.code).collect();
            tracing::warn!(
                "[LocaleService] Locale \"{}\" is not available. Available locales: {:?}",
                code,
                available
            );
            return false;
        }

        let changed = {
            let mut translator = self.write();
            if translator.locale() == code {
                false
            } else {
                translator.set_locale(code);
                true
            }
        };

        if changed {
            self.persist(code);
        }
        true
    }

    /// Moves to the next available locale and returns its code.
    pub fn toggle_locale(&self) -> &'static str {
        let next = model::next_locale(&self.locale());
        self.set_locale(next);
        next
    }

    pub fn available_locales(&self) -> &'static [LocaleInfo] {
        AVAILABLE_LOCALES
    }

    pub fn current_locale_info(&self) -> Option<&'static LocaleInfo> {
        model::locale_info(&self.locale())
    }

    pub fn is_rtl(&self) -> bool {
        model::is_rtl(&self.locale())
    }

    /// `"rtl"` or `"ltr"`.
    pub fn locale_direction(&self) -> &'static str {
        model::direction(&self.locale())
    }

    pub fn fallback_locale(&self) -> String {
        self.read().fallback_locale().to_string()
    }

    pub fn set_fallback_locale(&self, code: &str) {
        self.write().set_fallback_locale(code);
    }

    pub fn t(&self, key: &str) -> String {
        self.read().t(key)
    }

    /// Translates `key`, passing absent or empty keys through unchanged.
    pub fn safe_translate(&self, key: Option<&str>) -> Option<String> {
        self.read().safe_translate(key)
    }

    /// Whether `key` exists in `locale`, or in the current locale when `None`.
    pub fn has_translation(&self, key: &str, locale: Option<&str>) -> bool {
        self.read().has(key, locale)
    }

    /// Translations of `key` keyed by locale code.
    pub fn get_translations(&self, key: &str) -> BTreeMap<String, String> {
        self.read().translations(key)
    }

    /// Formats `value` with the active locale's separators.
    pub fn format_number(&self, value: f64) -> String {
        format::format_number(&self.locale(), value, DEFAULT_MAX_FRACTION_DIGITS)
    }

    /// Like [`LocaleService::format_number`] with an explicit precision.
    pub fn format_decimal(&self, value: f64, max_fraction_digits: usize) -> String {
        format::format_number(&self.locale(), value, max_fraction_digits)
    }

    /// Formats `date` in the active locale's short numeric style.
    pub fn format_date(&self, date: NaiveDate) -> String {
        format::format_date(&self.locale(), date)
    }

    /// Writes the locale and the settings language in one batch.
    fn persist(&self, code: &str) {
        let mut settings = match self.storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => Settings::from_json(&raw).unwrap_or_default(),
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("[LocaleService] Failed to load settings: {}", e);
                Settings::default()
            }
        };
        settings.language = code.to_string();

        let mut ops = vec![StorageOp::set(LOCALE_KEY, code)];
        match settings.to_json() {
            Ok(json) => ops.push(StorageOp::set(SETTINGS_KEY, json)),
            Err(e) => tracing::warn!("[LocaleService] Failed to encode settings: {}", e),
        }
        if let Err(e) = self.storage.apply(&ops) {
            tracing::warn!("[LocaleService] Failed to save locale: {}", e);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Translator> {
        self.translator
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Translator> {
        self.translator
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
