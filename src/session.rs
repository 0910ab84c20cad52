//! Session store: the single source of truth for "is there a logged-in user".
//!
//! Exactly one credential is held at a time. It is written on a successful
//! login or registration, read when a request is built, and destroyed on
//! logout or when the backend answers 401. Writes are rare and last-write-wins,
//! so a plain mutex is all the coordination needed.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Holds the bearer token for the current session, optionally persisted to a
/// token file so the session survives process restarts.
pub struct SessionStore {
    path: Option<PathBuf>,
    token: Mutex<Option<String>>,
}

impl SessionStore {
    /// Open a store backed by `path`, reading any token persisted by a
    /// previous run. The initial state is authenticated iff the file holds a
    /// non-empty token.
    pub fn open(path: PathBuf) -> Self {
        let token = match fs::read_to_string(&path) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };
        Self {
            path: Some(path),
            token: Mutex::new(token),
        }
    }

    /// A store with no backing file. Used by tests and callers that do not
    /// want the credential to outlive the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: Mutex::new(None),
        }
    }

    /// Store `token`, overwriting any previous credential.
    pub fn set(&self, token: &str) -> io::Result<()> {
        let mut guard = self.token.lock().unwrap();
        *guard = Some(token.to_string());
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, token)?;
        }
        Ok(())
    }

    /// Current credential, if any.
    pub fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Remove the stored credential and its persisted copy.
    pub fn clear(&self) -> io::Result<()> {
        let mut guard = self.token.lock().unwrap();
        *guard = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// True iff a non-empty credential is stored.
    pub fn is_present(&self) -> bool {
        self.token
            .lock()
            .unwrap()
            .as_deref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }
}
