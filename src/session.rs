use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Identity record returned by `/login` and kept for the lifetime of the
/// session. The numeric `Id` is the structural anchor: a persisted record
/// that fails to deserialize (non-numeric id, missing fields) is discarded
/// at restore time rather than trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "User_role")]
    pub role: String,
}

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == ADMIN_ROLE)
    }
}

/// The two persisted key-value entries: the bearer credential and the
/// serialized identity record.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Persistence behind the session store. File-backed in the app, in-memory
/// in tests.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<PersistedSession>;
    fn store(&self, token: &str, user: &str) -> anyhow::Result<()>;
    fn clear(&self);
}

pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<PersistedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(persisted) => Some(persisted),
            Err(err) => {
                debug!(error = %err, "unreadable session file");
                Some(PersistedSession::default())
            }
        }
    }

    fn store(&self, token: &str, user: &str) -> anyhow::Result<()> {
        let persisted = PersistedSession {
            token: Some(token.to_string()),
            user: Some(user.to_string()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&persisted)?)?;
        Ok(())
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                debug!(error = %err, "failed to remove session file");
            }
        }
    }
}

struct Inner {
    tx: watch::Sender<SessionState>,
    storage: Box<dyn SessionStorage>,
}

/// Single process-wide authentication state: an optional identity plus an
/// opaque bearer credential. Views observe changes through `subscribe`.
/// No expiry, refresh, or multi-session handling.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Reads the persisted credential and identity. The identity is accepted
    /// only if it deserializes with a numeric id; anything else clears both
    /// entries and starts unauthenticated. No network validation happens
    /// here; a stale credential is discovered on the first API failure.
    pub fn restore(storage: Box<dyn SessionStorage>) -> Self {
        let state = match storage.load() {
            Some(PersistedSession {
                token: Some(token),
                user: Some(raw_user),
            }) => match serde_json::from_str::<AuthUser>(&raw_user) {
                Ok(user) => {
                    debug!(user_id = user.id, "session restored");
                    SessionState {
                        token: Some(token),
                        user: Some(user),
                    }
                }
                Err(err) => {
                    debug!(error = %err, "discarding malformed persisted session");
                    storage.clear();
                    SessionState::default()
                }
            },
            Some(_) => {
                // One entry without the other is as good as none.
                storage.clear();
                SessionState::default()
            }
            None => SessionState::default(),
        };
        let (tx, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner { tx, storage }),
        }
    }

    pub fn current(&self) -> SessionState {
        self.inner.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.tx.borrow().token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.tx.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.tx.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.tx.borrow().is_admin()
    }

    /// Observe session changes; the receiver yields the state as of the last
    /// `login` or `logout`.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.tx.subscribe()
    }

    /// Replaces the in-memory state atomically and persists both entries.
    pub fn login(&self, token: String, user: AuthUser) {
        match serde_json::to_string(&user) {
            Ok(raw) => {
                if let Err(err) = self.inner.storage.store(&token, &raw) {
                    warn!(error = %err, "failed to persist session");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize identity"),
        }
        self.inner.tx.send_replace(SessionState {
            token: Some(token),
            user: Some(user),
        });
    }

    /// Clears the in-memory state and removes the persisted entries.
    pub fn logout(&self) {
        self.inner.storage.clear();
        self.inner.tx.send_replace(SessionState::default());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// In-memory stand-in for the session file.
    #[derive(Default)]
    pub struct MemorySessionStorage {
        pub entries: Mutex<Option<(String, String)>>,
    }

    impl MemorySessionStorage {
        pub fn with(token: &str, user: &str) -> Self {
            Self {
                entries: Mutex::new(Some((token.to_string(), user.to_string()))),
            }
        }
    }

    impl SessionStorage for MemorySessionStorage {
        fn load(&self) -> Option<PersistedSession> {
            let entries = self.entries.lock().unwrap();
            entries.as_ref().map(|(token, user)| PersistedSession {
                token: Some(token.clone()),
                user: Some(user.clone()),
            })
        }

        fn store(&self, token: &str, user: &str) -> anyhow::Result<()> {
            *self.entries.lock().unwrap() = Some((token.to_string(), user.to_string()));
            Ok(())
        }

        fn clear(&self) {
            *self.entries.lock().unwrap() = None;
        }
    }

    pub fn sample_user(role: &str) -> AuthUser {
        AuthUser {
            id: 7,
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role: role.into(),
        }
    }

    pub fn unauthenticated_store() -> SessionStore {
        SessionStore::restore(Box::new(MemorySessionStorage::default()))
    }
}
