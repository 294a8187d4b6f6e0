//! Composition root.
//!
//! `AppContext` builds every store and service once and wires them
//! together. There are no process-wide singletons; two contexts never share
//! state unless they share the storage backend.

use std::sync::{Arc, Mutex, MutexGuard};

use backoffice_core::Result;
use backoffice_core::config::AppConfig;
use backoffice_core::locale::Translator;
use backoffice_core::notification::ToastQueue;
use backoffice_core::routing::Router;
use backoffice_core::session::SessionStore;
use backoffice_core::settings::DocumentTheme;
use backoffice_core::sidebar::SidebarState;
use backoffice_core::storage::KeyValueStorage;
use backoffice_core::tabs::TabManager;
use backoffice_infrastructure::{ApiClient, BackofficePaths, FileStorage};

use crate::app_service::AppService;
use crate::auth_flow::AuthFlow;
use crate::auth_service::AuthService;
use crate::dso_service::DsoService;
use crate::locale_service::LocaleService;
use crate::message_service::MessageService;
use crate::session_expiry::SessionExpiryHandler;
use crate::settings_service::SettingsService;

pub struct AppContext {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStorage>,
    pub api: Arc<ApiClient>,
    pub session: SessionStore,
    pub router: Router,
    pub auth: AuthService,
    pub auth_flow: AuthFlow,
    pub dso: DsoService,
    pub locale: LocaleService,
    pub settings: Arc<SettingsService>,
    pub messages: MessageService,
    pub app: Arc<AppService>,
    /// Document root receiving theme side effects
    pub theme: Arc<DocumentTheme>,
    /// Toasts emitted through `messages`
    pub toasts: Arc<ToastQueue>,
    tabs: Arc<Mutex<TabManager>>,
    sidebar: Arc<Mutex<SidebarState>>,
}

impl AppContext {
    /// Opens the context on the file store in the config directory.
    pub fn open(paths: &BackofficePaths, config: AppConfig) -> Result<Self> {
        let storage_file = paths
            .storage_file()
            .map_err(|e| backoffice_core::BackofficeError::config(e.to_string()))?;
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::open(storage_file));
        Self::new(config, storage)
    }

    /// Builds every service over `storage`.
    ///
    /// The session is rehydrated here and the API client's 401 hook is
    /// installed before any request can be made.
    pub fn new(config: AppConfig, storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.api)?);

        let session = SessionStore::new(storage.clone());
        let router = Router::new(session.clone());
        api.set_unauthorized_handler(Arc::new(SessionExpiryHandler::new(
            session.clone(),
            router.clone(),
        )));

        let auth = AuthService::new(api.clone(), session.clone());
        let auth_flow = AuthFlow::new(auth.clone(), router.clone());
        let dso = DsoService::new(api.clone());

        let locale = LocaleService::new(storage.clone(), Translator::bundled()?);
        let theme = Arc::new(DocumentTheme::new());
        let settings = Arc::new(SettingsService::new(
            storage.clone(),
            theme.clone(),
            locale.clone(),
        ));
        let toasts = Arc::new(ToastQueue::new());
        let messages = MessageService::new(locale.clone(), toasts.clone());
        let app = Arc::new(AppService::new(dso.clone(), storage.clone(), locale.clone()));

        let tabs = Arc::new(Mutex::new(TabManager::with_max_tabs(config.ui.max_tabs)));
        let sidebar = Arc::new(Mutex::new(SidebarState::with_breakpoint(
            config.ui.desktop_breakpoint,
        )));

        tracing::debug!(
            "[AppContext] Ready: api={} authenticated={}",
            api.base_url(),
            session.is_authenticated()
        );

        Ok(Self {
            config,
            storage,
            api,
            session,
            router,
            auth,
            auth_flow,
            dso,
            locale,
            settings,
            messages,
            app,
            theme,
            toasts,
            tabs,
            sidebar,
        })
    }

    /// Applies settings once, lays out the sidebar for `viewport_width` and
    /// enters the initial route.
    pub fn bootstrap(&self, viewport_width: u32, initial_path: &str) -> Result<()> {
        self.settings.initialize_settings();
        self.sidebar().initialize(viewport_width);
        let navigation = self.router.push(initial_path)?;
        tracing::debug!("[AppContext] Initial route {}", navigation.path);
        Ok(())
    }

    pub fn tabs(&self) -> MutexGuard<'_, TabManager> {
        self.tabs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sidebar(&self) -> MutexGuard<'_, SidebarState> {
        self.sidebar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::routing::{HOME_PATH, LOGIN_PATH};
    use backoffice_core::session::UserProfile;
    use backoffice_core::storage::{LOCALE_KEY, MemoryStorage};
    use backoffice_core::tabs::MenuItem;

    fn context(storage: Arc<MemoryStorage>) -> AppContext {
        AppContext::new(AppConfig::default(), storage).unwrap()
    }

    #[test]
    fn test_bootstrap_unauthenticated_lands_on_login() {
        let ctx = context(Arc::new(MemoryStorage::new()));
        ctx.bootstrap(1280, HOME_PATH).unwrap();

        assert_eq!(ctx.router.current_path().as_deref(), Some(LOGIN_PATH));
        assert!(ctx.sidebar().open);
        assert!(ctx.theme.property("--p-primary-color").is_some());
    }

    #[test]
    fn test_contexts_do_not_share_state() {
        let a = context(Arc::new(MemoryStorage::new()));
        let b = context(Arc::new(MemoryStorage::new()));

        a.session.establish("tok".into(), UserProfile::default());
        a.tabs().add_tab(&MenuItem::leaf("Users", "/users"));

        assert!(!b.session.is_authenticated());
        assert!(!b.tabs().has_tabs());
    }

    #[test]
    fn test_rehydrated_session_sets_authorization() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(backoffice_core::storage::AUTH_TOKEN_KEY, "stored")
            .unwrap();

        let ctx = context(storage);
        assert!(ctx.api.has_authorization());
        ctx.bootstrap(800, LOGIN_PATH).unwrap();
        assert_eq!(ctx.router.current_path().as_deref(), Some(HOME_PATH));
    }

    #[test]
    fn test_locale_survives_restart() {
        let storage = Arc::new(MemoryStorage::new());
        let first = context(storage.clone());
        first.bootstrap(1280, HOME_PATH).unwrap();
        assert!(first.locale.set_locale("ko"));

        let second = context(storage.clone());
        second.bootstrap(1280, HOME_PATH).unwrap();
        assert_eq!(second.locale.locale(), "ko");
        assert_eq!(second.settings.settings().language, "ko");
        assert_eq!(
            storage.get_item(LOCALE_KEY).unwrap().as_deref(),
            Some("ko")
        );

        second.locale.toggle_locale();
        let third = context(storage);
        third.bootstrap(1280, HOME_PATH).unwrap();
        assert_eq!(third.locale.locale(), "en");
    }

    #[test]
    fn test_tab_capacity_follows_config() {
        let mut config = AppConfig::default();
        config.ui.max_tabs = 2;
        let ctx = AppContext::new(config, Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(ctx.tabs().max_tabs(), 2);
    }
}
