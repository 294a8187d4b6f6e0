//! Application-wide lists loaded from the backend and the chosen language.

use std::sync::{Arc, RwLock};

use backoffice_core::Result;
use backoffice_core::storage::{KeyValueStorage, LANGUAGE_KEY};
use serde::Serialize;
use serde_json::{Value, json};

use crate::dso_service::DsoService;
use crate::locale_service::LocaleService;

/// Procedure returning the selectable languages.
pub const PROC_LANGUAGES: &str = "SYS_SEL_LANGUAGE";
/// Procedure returning the language mapping list.
pub const PROC_LANGUAGE_MAPPING: &str = "SYS_SEL_LANGUAGE_MAPPING";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub language: String,
    pub languages: Value,
    pub lang_mapping_list: Value,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            languages: json!([]),
            lang_mapping_list: json!([]),
        }
    }
}

pub struct AppService {
    dso: DsoService,
    storage: Arc<dyn KeyValueStorage>,
    locale: LocaleService,
    state: RwLock<AppState>,
}

impl AppService {
    /// The initial language is the active locale.
    pub fn new(dso: DsoService, storage: Arc<dyn KeyValueStorage>, locale: LocaleService) -> Self {
        let state = AppState {
            language: locale.locale(),
            ..AppState::default()
        };

        Self {
            dso,
            storage,
            locale,
            state: RwLock::new(state),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Loads the language list.
    pub async fn get_languages(&self) -> Result<()> {
        let rows = self.fetch(PROC_LANGUAGES).await?;
        if let Some(rows) = rows {
            self.write().languages = rows;
        }
        Ok(())
    }

    /// Loads the language mapping list.
    pub async fn get_lang_mapping_list(&self) -> Result<()> {
        let rows = self.fetch(PROC_LANGUAGE_MAPPING).await?;
        if let Some(rows) = rows {
            self.write().lang_mapping_list = rows;
        }
        Ok(())
    }

    /// Activates and stores `code`.
    ///
    /// Empty codes and codes without a bundled locale are ignored.
    pub fn save_language(&self, code: &str) -> bool {
        if code.is_empty() || !self.locale.set_locale(code) {
            return false;
        }

        self.write().language = code.to_string();
        if let Err(e) = self.storage.set_item(LANGUAGE_KEY, code) {
            tracing::warn!("[AppService] Failed to save language: {}", e);
        }
        true
    }

    /// Loads both lists concurrently. Failures are logged, not returned.
    pub async fn initialize_app(&self) {
        let (languages, mapping) =
            futures::join!(self.get_languages(), self.get_lang_mapping_list());

        if let Err(e) = languages {
            tracing::error!("[AppService] Failed to load languages: {}", e);
        }
        if let Err(e) = mapping {
            tracing::error!("[AppService] Failed to load language mapping: {}", e);
        }
    }

    /// Calls `proc_name` and returns the nested `data` rows, if any.
    async fn fetch(&self, proc_name: &str) -> Result<Option<Value>> {
        let response = self.dso.call(proc_name, json!({})).await?;
        Ok(response.payload().cloned())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AppState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use backoffice_core::BackofficeError;
    use backoffice_core::gateway::{ApiResponse, ProcRequest, ProcedureGateway};
    use backoffice_core::locale::Translator;
    use backoffice_core::storage::{LOCALE_KEY, MemoryStorage};

    /// Serves the language list; the mapping procedure fails.
    struct LanguagesOnly;

    #[async_trait]
    impl ProcedureGateway for LanguagesOnly {
        async fn call_proc(&self, request: &ProcRequest) -> Result<ApiResponse> {
            match request.proc_name.as_str() {
                PROC_LANGUAGES => Ok(ApiResponse::new(
                    200,
                    json!({ "data": [{ "CODE": "en" }, { "CODE": "vi" }] }),
                )),
                _ => Err(BackofficeError::http(500, None)),
            }
        }
    }

    fn service(storage: Arc<MemoryStorage>) -> (AppService, LocaleService) {
        let locale = LocaleService::new(storage.clone(), Translator::bundled().unwrap());
        let app = AppService::new(
            DsoService::new(Arc::new(LanguagesOnly)),
            storage,
            locale.clone(),
        );
        (app, locale)
    }

    #[tokio::test]
    async fn test_initialize_app_logs_failures() {
        let (app, _) = service(Arc::new(MemoryStorage::new()));
        app.initialize_app().await;

        let state = app.state();
        assert_eq!(state.languages, json!([{ "CODE": "en" }, { "CODE": "vi" }]));
        assert_eq!(state.lang_mapping_list, json!([]));
    }

    #[tokio::test]
    async fn test_get_lang_mapping_list_propagates() {
        let (app, _) = service(Arc::new(MemoryStorage::new()));
        assert!(app.get_lang_mapping_list().await.is_err());
    }

    #[test]
    fn test_save_language() {
        let storage = Arc::new(MemoryStorage::new());
        let (app, locale) = service(storage.clone());

        assert!(!app.save_language(""));
        assert!(!app.save_language("ja"));
        assert_eq!(app.state().language, "en");
        assert!(storage.get_item(LANGUAGE_KEY).unwrap().is_none());

        assert!(app.save_language("vi"));
        assert_eq!(app.state().language, "vi");
        assert_eq!(storage.get_item(LANGUAGE_KEY).unwrap().as_deref(), Some("vi"));
        assert_eq!(locale.locale(), "vi");
    }

    #[test]
    fn test_language_starts_at_active_locale() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(LANGUAGE_KEY, "vi").unwrap();
        storage.set_item(LOCALE_KEY, "ko").unwrap();

        let (app, locale) = service(storage);
        assert_eq!(app.state().language, "ko");
        assert_eq!(locale.locale(), "ko");
    }
}
