use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConsoleError, Result};

const SESSION_FILE: &str = "session.toml";

/// The console's single built-in operator account.
pub const DEMO_EMAIL: &str = "admin@example.com";
pub const DEMO_PASSWORD: &str = "admin123";

const LOCAL_TOKEN: &str = "local-session-token";

/// Authentication state for API calls.
///
/// Loaded from `session.toml` on start, written by `login`, removed by
/// `logout`. An empty session sends requests without a bearer token.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Read the persisted session, or an empty one if none exists
    pub fn load(cfg_dir: &Path) -> Result<Self> {
        let path = cfg_dir.join(SESSION_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| ConsoleError::ConfigParse { path, source: e })
    }

    /// Check credentials and persist a new session
    pub fn login(cfg_dir: &Path, email: &str, password: &str) -> Result<Self> {
        if email.is_empty() || password.is_empty() {
            return Err(ConsoleError::InvalidCredentials);
        }
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            tracing::warn!(email, "rejected login");
            return Err(ConsoleError::InvalidCredentials);
        }
        Self::store(cfg_dir, email, LOCAL_TOKEN)
    }

    /// Persist a token issued elsewhere
    pub fn store(cfg_dir: &Path, email: &str, token: &str) -> Result<Self> {
        let session = Self {
            email: Some(email.to_string()),
            token: Some(token.to_string()),
            logged_in_at: Some(Utc::now()),
        };
        let content = toml::to_string_pretty(&session).map_err(|e| {
            ConsoleError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e.to_string(),
            ))
        })?;
        fs::write(cfg_dir.join(SESSION_FILE), content)?;
        tracing::info!(email, "session stored");
        Ok(session)
    }

    /// Remove the persisted session. Returns whether one existed.
    pub fn logout(cfg_dir: &Path) -> Result<bool> {
        let path = cfg_dir.join(SESSION_FILE);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
