use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::warn;

use myattire_adapter::{SessionManager, User};

/// Session data persisted between runs, the equivalent of the token the
/// original web client kept in browser local storage. Business data never
/// lands here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub usuario: User,
    pub expires_at: DateTime<Utc>,
}

/// File-backed store for the login session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store under the platform data directory
    /// (`MYATTIRE_DATA_DIR` overrides the location, used by tests)
    pub async fn open() -> Result<Self> {
        let data_dir = match std::env::var("MYATTIRE_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .ok_or_else(|| anyhow!("Could not determine data directory"))?
                .join("myattire"),
        };

        fs::create_dir_all(&data_dir).await?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Load the persisted session. Missing, unreadable, or expired sessions
    /// all come back as None so the caller lands on the login screen.
    pub async fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        let session: PersistedSession = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "discarding unreadable session file");
                return Ok(None);
            }
        };

        if session.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Load the persisted session straight into a session manager,
    /// reporting whether anything was restored
    pub async fn restore_into(&self, manager: &SessionManager) -> Result<bool> {
        match self.load().await? {
            Some(session) => {
                manager.restore(session.token, session.usuario, session.expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn save(&self, session: &PersistedSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Persist whatever the manager currently holds, clearing the file when
    /// the manager holds nothing
    pub async fn save_from(&self, manager: &SessionManager) -> Result<()> {
        match manager.session_data() {
            Some(data) => {
                self.save(&PersistedSession {
                    token: data.token,
                    usuario: data.usuario,
                    expires_at: data.expires_at,
                })
                .await
            }
            None => self.clear().await,
        }
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}
