//! Display settings with persistence and theme side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use backoffice_core::settings::theme::{apply_dark_mode, apply_primary_color};
use backoffice_core::settings::{Settings, ThemeTarget};
use backoffice_core::storage::{KeyValueStorage, SETTINGS_KEY};
use chrono::NaiveDate;

use crate::locale_service::LocaleService;

/// Owns the [`Settings`] of one application context.
///
/// Every setter applies its side effect immediately and then persists the
/// whole settings object under [`SETTINGS_KEY`]. The language always reads
/// from the shared [`LocaleService`], which keeps the stored field in step.
pub struct SettingsService {
    settings: RwLock<Settings>,
    storage: Arc<dyn KeyValueStorage>,
    theme: Arc<dyn ThemeTarget>,
    locale: LocaleService,
    initialized: AtomicBool,
}

impl SettingsService {
    /// Loads stored settings, merging defaults over missing fields.
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        theme: Arc<dyn ThemeTarget>,
        locale: LocaleService,
    ) -> Self {
        let settings = load_settings(storage.as_ref());
        Self {
            settings: RwLock::new(settings),
            storage,
            theme,
            locale,
            initialized: AtomicBool::new(false),
        }
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> Settings {
        let mut settings = self.cached();
        settings.language = self.locale.locale();
        settings
    }

    /// Applies language, dark mode and primary color once.
    ///
    /// Later calls are no-ops. Returns `true` on the call that applied them.
    pub fn initialize_settings(&self) -> bool {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return false;
        }

        let settings = self.cached();
        self.locale.set_locale(&settings.language);
        apply_dark_mode(self.theme.as_ref(), settings.dark_mode);
        apply_primary_color(self.theme.as_ref(), &settings.primary_color);

        tracing::debug!(
            "[SettingsService] Initialized: language={} dark_mode={} primary={}",
            settings.language,
            settings.dark_mode,
            settings.primary_color
        );
        true
    }

    /// Switches the language. Codes that are not available locales are
    /// rejected and nothing is stored.
    pub fn set_language(&self, language: &str) -> bool {
        if !self.locale.set_locale(language) {
            return false;
        }
        self.update(|settings| settings.language = language.to_string());
        true
    }

    pub fn set_date_format(&self, format: &str) {
        self.update(|settings| settings.date_format = format.to_string());
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.update(|settings| settings.dark_mode = enabled);
        apply_dark_mode(self.theme.as_ref(), enabled);
    }

    pub fn set_primary_color(&self, color: &str) {
        self.update(|settings| settings.primary_color = color.to_string());
        apply_primary_color(self.theme.as_ref(), color);
    }

    /// Formats `date` with the configured date format.
    pub fn format_date(&self, date: NaiveDate) -> String {
        self.settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .format_date(date)
    }

    fn cached(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Mutates the settings and persists the result.
    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut Settings),
    {
        let snapshot = {
            let mut settings = self
                .settings
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            mutate(&mut settings);
            settings.language = self.locale.locale();
            settings.clone()
        };
        save_settings(self.storage.as_ref(), &snapshot);
    }
}

fn load_settings(storage: &dyn KeyValueStorage) -> Settings {
    let stored = match storage.get_item(SETTINGS_KEY) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!("[SettingsService] Error loading settings: {}", e);
            None
        }
    };

    match stored.map(|raw| Settings::from_json(&raw)) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            tracing::error!("[SettingsService] Error loading settings: {}", e);
            Settings::default()
        }
        None => Settings::default(),
    }
}

fn save_settings(storage: &dyn KeyValueStorage, settings: &Settings) {
    let result = settings
        .to_json()
        .and_then(|json| storage.set_item(SETTINGS_KEY, &json));
    if let Err(e) = result {
        tracing::error!("[SettingsService] Error saving settings: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::locale::Translator;
    use backoffice_core::settings::DocumentTheme;
    use backoffice_core::settings::theme::DARK_CLASS;
    use backoffice_core::storage::MemoryStorage;

    struct Fixture {
        storage: Arc<MemoryStorage>,
        theme: Arc<DocumentTheme>,
        locale: LocaleService,
        service: SettingsService,
    }

    fn fixture_with(storage: Arc<MemoryStorage>) -> Fixture {
        let theme = Arc::new(DocumentTheme::new());
        let locale = LocaleService::new(storage.clone(), Translator::bundled().unwrap());
        let service = SettingsService::new(storage.clone(), theme.clone(), locale.clone());
        Fixture {
            storage,
            theme,
            locale,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(MemoryStorage::new()))
    }

    fn stored(storage: &MemoryStorage) -> Settings {
        Settings::from_json(&storage.get_item(SETTINGS_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_partial_stored_settings_merge_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(SETTINGS_KEY, r#"{"darkMode":true}"#).unwrap();

        let f = fixture_with(storage);
        let settings = f.service.settings();
        assert!(settings.dark_mode);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.primary_color, "#6366f1");
    }

    #[test]
    fn test_corrupt_stored_settings_use_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(SETTINGS_KEY, "{oops").unwrap();
        assert_eq!(fixture_with(storage).service.settings(), Settings::default());
    }

    #[test]
    fn test_initialize_applies_once() {
        let f = fixture();

        assert!(f.service.initialize_settings());
        let writes = f.theme.write_count();
        assert!(writes > 0);
        assert_eq!(f.theme.property("--p-primary-color").as_deref(), Some("#6366f1"));

        for _ in 0..5 {
            assert!(!f.service.initialize_settings());
        }
        assert_eq!(f.theme.write_count(), writes);
    }

    #[test]
    fn test_setters_apply_and_persist() {
        let f = fixture();

        f.service.set_dark_mode(true);
        assert!(f.theme.has_class(DARK_CLASS));
        assert!(stored(&f.storage).dark_mode);

        f.service.set_primary_color("#ffffff");
        assert_eq!(
            f.theme.property("--p-button-primary-hover-background").as_deref(),
            Some("#e6e6e6")
        );
        assert_eq!(f.theme.property("--p-button-primary-color").as_deref(), Some("#000000"));
        assert_eq!(stored(&f.storage).primary_color, "#ffffff");

        f.service.set_date_format("YYYY-MM-DD");
        assert_eq!(stored(&f.storage).date_format, "YYYY-MM-DD");

        assert!(f.service.set_language("vi"));
        assert_eq!(f.locale.locale(), "vi");
        assert_eq!(stored(&f.storage).language, "vi");
    }

    #[test]
    fn test_unavailable_language_is_rejected() {
        let f = fixture();

        assert!(!f.service.set_language("fr"));
        assert_eq!(f.locale.locale(), "en");
        assert_eq!(f.service.settings().language, "en");
        assert!(f.storage.get_item(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_locale_change_is_seen_by_settings() {
        let f = fixture();
        f.service.initialize_settings();

        f.locale.set_locale("ko");
        assert_eq!(f.service.settings().language, "ko");

        f.service.set_dark_mode(true);
        let saved = stored(&f.storage);
        assert_eq!(saved.language, "ko");
        assert!(saved.dark_mode);
    }

    #[test]
    fn test_format_date_uses_setting() {
        let f = fixture();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(f.service.format_date(date), "09/03/2024");

        f.service.set_date_format("YYYY-MM-DD");
        assert_eq!(f.service.format_date(date), "2024-03-09");
    }
}
