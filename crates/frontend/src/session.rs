//! The user currently selected in this terminal.
//!
//! Kept in a small JSON file under the key `mythosengine_current_user`.
//! There is no authentication; selecting a user only decides whose view of
//! private and unlisted articles is shown.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mythos_core::user::User;

pub const CURRENT_USER_KEY: &str = "mythosengine_current_user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct UserSession {
    path: PathBuf,
    current: Option<User>,
}

impl UserSession {
    /// `MYTHOS_SESSION_FILE`, else `$HOME/.mythos/session.json`, else
    /// `.mythos/session.json` in the working directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os("MYTHOS_SESSION_FILE").filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let base = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(".mythos").join("session.json")
    }

    /// Load the session stored at `path`.
    ///
    /// A missing file means no user. An unreadable or corrupt file is
    /// logged, removed, and also means no user.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match read_user(&path) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                if let Err(e) = std::fs::remove_file(&path) {
                    if e.kind() != ErrorKind::NotFound {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to remove session file");
                    }
                }
                None
            }
        };
        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn current_user_id(&self) -> Option<mythos_core::types::DbId> {
        self.current.as_ref().map(|u| u.id)
    }

    /// Select a user, or clear the selection with `None`. The file is
    /// written (or removed) before the in-memory value changes.
    pub fn set_current_user(&mut self, user: Option<User>) -> Result<(), SessionError> {
        match &user {
            Some(user) => {
                if let Some(dir) = self.path.parent() {
                    std::fs::create_dir_all(dir)?;
                }
                let mut doc = HashMap::new();
                doc.insert(CURRENT_USER_KEY, user);
                std::fs::write(&self.path, serde_json::to_vec_pretty(&doc)?)?;
            }
            None => match std::fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        tracing::debug!(user_id = user.as_ref().map(|u| u.id), "Current user changed");
        self.current = user;
        Ok(())
    }
}

fn read_user(path: &Path) -> Result<Option<User>, SessionError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut doc: HashMap<String, Option<User>> = serde_json::from_slice(&bytes)?;
    Ok(doc.remove(CURRENT_USER_KEY).flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = chrono::Utc::now();
        User {
            id: 3,
            username: "ursula".into(),
            email: "u@earthsea.org".into(),
            full_name: Some("Ursula K. Le Guin".into()),
            bio: None,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_file_means_no_user() {
        let dir = tempfile::tempdir().unwrap();
        let session = UserSession::load(dir.path().join("session.json"));
        assert!(session.current_user().is_none());
    }

    #[test]
    fn selection_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = UserSession::load(&path);
        session.set_current_user(Some(user())).unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[CURRENT_USER_KEY]["username"], "ursula");

        let reloaded = UserSession::load(&path);
        assert_eq!(reloaded.current_user_id(), Some(3));
    }

    #[test]
    fn clearing_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = UserSession::load(&path);
        session.set_current_user(Some(user())).unwrap();
        session.set_current_user(None).unwrap();
        assert!(!path.exists());
        assert!(session.current_user().is_none());
        // Clearing twice is fine.
        session.set_current_user(None).unwrap();
    }

    #[test]
    fn corrupt_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let session = UserSession::load(&path);
        assert!(session.current_user().is_none());
        assert!(!path.exists());
    }
}
