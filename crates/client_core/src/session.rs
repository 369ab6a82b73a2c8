//! Current-user state and its local persistence.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{domain::User, protocol::Credentials};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    api::BlogApi,
    error::{ClientError, WRONG_CREDENTIALS},
    notification::Notifier,
};

/// Storage key of the serialized session.
pub const SESSION_STORAGE_KEY: &str = "loggedBlogappUser";

/// Holds the serialized session under [`SESSION_STORAGE_KEY`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn read(&self) -> Result<Option<String>>;
    async fn write(&self, value: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Keeps the session in `<dir>/loggedBlogappUser.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read session file '{}'", self.path.display())),
        }
    }

    async fn write(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create session directory '{}'", parent.display())
            })?;
        }
        tokio::fs::write(&self.path, value)
            .await
            .with_context(|| format!("failed to write session file '{}'", self.path.display()))
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to remove session file '{}'", self.path.display())
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.value.lock().await.clone())
    }

    async fn write(&self, value: &str) -> Result<()> {
        *self.value.lock().await = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.value.lock().await = None;
        Ok(())
    }
}

fn parse_session(raw: &str) -> Option<User> {
    match serde_json::from_str::<User>(raw) {
        Ok(user) if !user.token.trim().is_empty() => Some(user),
        Ok(_) => {
            debug!("session: persisted session has an empty token");
            None
        }
        Err(err) => {
            debug!(error = %err, "session: persisted session is malformed");
            None
        }
    }
}

pub struct SessionController {
    api: Arc<dyn BlogApi>,
    store: Arc<dyn SessionStore>,
    notifier: Notifier,
    current: Option<User>,
}

impl SessionController {
    pub fn new(api: Arc<dyn BlogApi>, store: Arc<dyn SessionStore>, notifier: Notifier) -> Self {
        Self {
            api,
            store,
            notifier,
            current: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|user| user.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Local only. Anything unreadable counts as "no session".
    pub async fn restore_session(&mut self) -> Option<&User> {
        let raw = match self.store.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                debug!(error = %err, "session: unable to read persisted session");
                return None;
            }
        };

        let user = parse_session(&raw)?;
        info!(username = %user.username, "session: restored");
        self.current = Some(user);
        self.current.as_ref()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, ClientError> {
        let credentials = Credentials::new(username, password);
        let user = match self.api.login(&credentials).await {
            Ok(user) => user,
            Err(err) => {
                warn!(username, error = %err, "session: login failed");
                self.notifier.show(WRONG_CREDENTIALS).await;
                return Err(err);
            }
        };

        match serde_json::to_string(&user) {
            Ok(serialized) => {
                if let Err(err) = self.store.write(&serialized).await {
                    warn!(error = %err, "session: failed to persist session");
                }
            }
            Err(err) => warn!(error = %err, "session: failed to serialize session"),
        }

        info!(username = %user.username, "session: logged in");
        self.current = Some(user.clone());
        self.notifier.show("Successfully logged in").await;
        Ok(user)
    }

    pub async fn logout(&mut self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "session: failed to clear persisted session");
        }
        if let Some(user) = self.current.take() {
            info!(username = %user.username, "session: logged out");
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
