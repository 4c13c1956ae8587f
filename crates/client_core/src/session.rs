use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    error::ApiStatus,
    protocol::{SigninRequest, SigninResponse},
};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, Result},
    transport::ApiTransport,
};

/// A token issued by the signin endpoint, persisted with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Authorization value handed to every authenticated repository call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    scheme: Option<String>,
}

impl Credential {
    pub fn new(token: impl Into<String>, scheme: Option<String>) -> Self {
        Self {
            token: token.into(),
            scheme,
        }
    }

    pub fn header_value(&self) -> String {
        match &self.scheme {
            Some(scheme) => format!("{scheme} {}", self.token),
            None => self.token.clone(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("scheme", &self.scheme)
            .finish()
    }
}

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file holding the last issued session.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&raw).map(Some).map_err(|e| {
            ClientError::Storage(format!(
                "corrupt session file '{}': {e}",
                self.path.display()
            ))
        })
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(session)
            .map_err(|e| ClientError::Storage(format!("failed to encode session: {e}")))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.slot
            .lock()
            .map_err(|_| ClientError::Storage("session slot poisoned".into()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

pub struct SessionManager {
    transport: ApiTransport,
    store: Arc<dyn TokenStore>,
    auth_scheme: Option<String>,
    current: Option<Session>,
    active: bool,
}

impl SessionManager {
    pub fn new(
        transport: ApiTransport,
        store: Arc<dyn TokenStore>,
        auth_scheme: Option<String>,
    ) -> Self {
        Self {
            transport,
            store,
            auth_scheme,
            current: None,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Credential for the known token, verified or not.
    pub fn credential(&self) -> Option<Credential> {
        self.current
            .as_ref()
            .map(|session| Credential::new(session.token.clone(), self.auth_scheme.clone()))
    }

    /// Credential only while the session is active; repository calls require this one.
    pub fn active_credential(&self) -> Option<Credential> {
        if self.active {
            self.credential()
        } else {
            None
        }
    }

    /// Loads the persisted token without touching the network.
    pub fn restore(&mut self) -> Option<Credential> {
        self.active = false;
        self.current = match self.store.load() {
            Ok(Some(session)) if session.is_expired_at(Utc::now()) => {
                info!(expired_at = %session.expires_at, "stored session expired");
                self.clear_store();
                None
            }
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "failed to read stored session");
                None
            }
        };
        self.credential()
    }

    /// Signs in and persists the issued token. Returns the server's message.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        self.active = false;
        let request = self.transport.post(self.transport.signin_url()).json(&SigninRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        let response: SigninResponse = self.transport.send(request).await.map_err(|err| {
            warn!(error = %err, "signin rejected");
            err
        })?;

        let message = response.message_text();
        if response.token.is_empty() {
            return Err(ClientError::Auth(if message.is_empty() {
                "signin response carried no token".to_string()
            } else {
                message
            }));
        }

        match response.expires_at().filter(|at| *at > Utc::now()) {
            Some(expires_at) => {
                let session = Session {
                    token: response.token,
                    expires_at,
                };
                if let Err(err) = self.store.save(&session) {
                    warn!(error = %err, "failed to persist session; keeping it in memory");
                }
                self.current = Some(session);
            }
            None => {
                // A token without a future expiry is usable now but never persisted.
                warn!(expired = response.expired, "signin returned no future expiry");
                self.current = Some(Session {
                    token: response.token,
                    expires_at: Utc::now(),
                });
            }
        }

        self.active = true;
        info!("signed in");
        Ok(message)
    }

    /// Checks the known token against the API. Any failure ends the session.
    pub async fn verify(&mut self) -> Result<()> {
        let Some(credential) = self.credential() else {
            self.invalidate();
            return Err(ClientError::Auth("no stored token".into()));
        };
        let request = self
            .transport
            .authorized_post(self.transport.check_url(), &credential);
        match self.transport.send::<ApiStatus>(request).await {
            Ok(_) => {
                self.active = true;
                debug!("session verified");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "session verification failed");
                self.invalidate();
                Err(err)
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.active = false;
        self.current = None;
        self.clear_store();
    }

    fn clear_store(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored session");
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
