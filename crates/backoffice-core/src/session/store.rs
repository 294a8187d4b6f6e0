//! Authoritative session state with a durable mirror.
//!
//! `SessionStore` is the single source of truth for authentication. Every
//! write goes to durable storage first and then to memory while holding the
//! same lock, so the two never disagree once a call returns. Observers
//! subscribe through a `tokio::sync::watch` channel and can await the
//! "settled" state instead of guessing with timers.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::session::model::{Session, UserProfile};
use crate::storage::{AUTH_TOKEN_KEY, AUTH_USER_KEY, KeyValueStorage, StorageOp};

/// Shared handle to the session; cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
    storage: Arc<dyn KeyValueStorage>,
    /// Serializes storage + memory writes.
    write_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    /// Creates the store and rehydrates it from durable storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (sender, _) = watch::channel(Session::default());
        let store = Self {
            state: Arc::new(sender),
            storage,
            write_lock: Arc::new(Mutex::new(())),
        };
        store.init_auth();
        store
    }

    /// Loads token and user from durable storage into memory.
    ///
    /// Idempotent. Values missing from storage leave memory unchanged; a user
    /// record that fails to parse is removed from storage.
    pub fn init_auth(&self) {
        let _guard = self.lock();

        let stored_token = self.read(AUTH_TOKEN_KEY);
        let stored_user = self.read(AUTH_USER_KEY);

        let user = stored_user.and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!("[SessionStore] Failed to parse stored user data: {}", e);
                if let Err(e) = self.storage.remove_item(AUTH_USER_KEY) {
                    tracing::warn!("[SessionStore] Failed to remove corrupt user data: {}", e);
                }
                None
            }
        });

        self.state.send_if_modified(|session| {
            let mut changed = false;
            if let Some(token) = &stored_token
                && session.token.as_ref() != Some(token)
            {
                session.token = Some(token.clone());
                changed = true;
            }
            if let Some(user) = &user
                && session.user.as_ref() != Some(user)
            {
                session.user = Some(user.clone());
                changed = true;
            }
            changed
        });
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Synchronous authentication check used by the navigation guard.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Marks a login as in flight and clears the previous error.
    pub fn begin_login(&self) {
        self.state.send_modify(|session| {
            session.loading = true;
            session.error = None;
        });
    }

    /// Ends a failed login, keeping token and user as they were.
    pub fn fail_login(&self, message: impl Into<String>) {
        let message = message.into();
        self.state.send_modify(|session| {
            session.loading = false;
            session.error = Some(message);
        });
    }

    /// Commits a successful login: storage first, then memory.
    ///
    /// A storage failure is logged and the in-memory session is still
    /// updated; storage is a mirror, not the authority.
    pub fn establish(&self, token: String, user: UserProfile) {
        let _guard = self.lock();

        let mut ops = vec![StorageOp::set(AUTH_TOKEN_KEY, token.clone())];
        match serde_json::to_string(&user) {
            Ok(json) => ops.push(StorageOp::set(AUTH_USER_KEY, json)),
            Err(e) => tracing::warn!("[SessionStore] Failed to serialize user: {}", e),
        }
        if let Err(e) = self.storage.apply(&ops) {
            tracing::warn!("[SessionStore] Failed to persist session: {}", e);
        }

        self.state.send_modify(|session| {
            session.token = Some(token);
            session.user = Some(user);
            session.loading = false;
            session.error = None;
        });
    }

    /// Replaces the stored user profile, keeping the token.
    pub fn set_user(&self, user: UserProfile) {
        let _guard = self.lock();
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(AUTH_USER_KEY, &json) {
                    tracing::warn!("[SessionStore] Failed to persist user: {}", e);
                }
            }
            Err(e) => tracing::warn!("[SessionStore] Failed to serialize user: {}", e),
        }
        self.state.send_modify(|session| session.user = Some(user));
    }

    /// Clears token and user from storage and memory.
    pub fn clear(&self) {
        let _guard = self.lock();
        let ops = [StorageOp::remove(AUTH_TOKEN_KEY), StorageOp::remove(AUTH_USER_KEY)];
        if let Err(e) = self.storage.apply(&ops) {
            tracing::warn!("[SessionStore] Failed to clear stored session: {}", e);
        }
        self.state.send_modify(|session| {
            session.token = None;
            session.user = None;
            session.loading = false;
        });
    }

    /// Resolves once no login is in flight and returns that session.
    pub async fn settled(&self) -> Session {
        let mut receiver = self.subscribe();
        match receiver.wait_for(|session| !session.loading).await {
            Ok(session) => session.clone(),
            // The sender lives inside `self`, so it cannot be dropped here.
            Err(_) => self.snapshot(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read '{}': {}", key, e);
                None
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::time::Duration;

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::new(storage)
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile::from_backend(&json!({ "USER_NAME": name }))
    }

    #[test]
    fn test_new_store_is_anonymous() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_rehydrates_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        storage
            .set_item(AUTH_USER_KEY, &serde_json::to_string(&profile("Lee")).unwrap())
            .unwrap();

        let store = store_with(storage);
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user().unwrap().display_name(), "Lee");
    }

    #[test]
    fn test_corrupt_user_is_removed() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        storage.set_item(AUTH_USER_KEY, "{not json").unwrap();

        let store = store_with(storage.clone());
        assert!(store.is_authenticated());
        assert!(store.user().is_none());
        assert!(storage.get_item(AUTH_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_init_auth_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        let store = store_with(storage);
        let before = store.snapshot();

        store.init_auth();
        store.init_auth();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_establish_writes_storage_and_memory() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        store.begin_login();
        store.establish("tok-1".into(), profile("Park"));

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        let stored: UserProfile =
            serde_json::from_str(&storage.get_item(AUTH_USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.display_name(), "Park");

        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert!(!session.loading);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_fail_login_keeps_prior_session() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());
        store.establish("old".into(), profile("Choi"));

        store.begin_login();
        assert!(store.is_loading());
        store.fail_login("bad credentials");

        assert_eq!(store.token().as_deref(), Some("old"));
        assert_eq!(store.error().as_deref(), Some("bad credentials"));
        assert!(!store.is_loading());
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());
        store.establish("tok".into(), profile("Jung"));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_settled_waits_for_login_to_finish() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        store.begin_login();

        let finisher = store.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            finisher.establish("late".into(), UserProfile::default());
        });

        let session = store.settled().await;
        assert_eq!(session.token.as_deref(), Some("late"));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_settled_returns_immediately_when_idle() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        let session = store.settled().await;
        assert!(!session.loading);
    }
}
