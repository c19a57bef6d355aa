//! Injectable session persistence. The token and the serialized profile are
//! written and cleared as a pair — callers never see one without the other.
//! Storage failures are logged and degrade to "no session"; they never
//! propagate into UI flows.

use std::{
    fs, io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};
use tracing::warn;

/// Fixed key for the raw token string.
pub const TOKEN_KEY: &str = "auth_token";
/// Fixed key for the JSON-serialized profile.
pub const PROFILE_KEY: &str = "user_data";

/// Read/write/clear operations over the persisted session pair.
pub trait SessionStore: Send + Sync {
    fn read_token(&self) -> Option<String>;
    /// Raw profile JSON as stored; parsing is the reader's concern.
    fn read_profile(&self) -> Option<String>;
    /// Persists both values. Implementations must not leave a token behind
    /// without its profile or vice versa.
    fn write(&self, token: &str, profile_json: &str);
    fn clear(&self);
}

/// In-process store used by tests and embedders that manage persistence
/// themselves. The pair is held in a single slot, so partial writes are
/// impossible by construction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<(String, String)>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn read_token(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|(token, _)| token.clone())
    }

    fn read_profile(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|(_, profile)| profile.clone())
    }

    fn write(&self, token: &str, profile_json: &str) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some((token.to_string(), profile_json.to_string()));
    }

    fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

/// File-backed store for the CLI: one file per key under a session
/// directory. Missing or unreadable files read as an absent session.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn read(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.dir.join(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(%err, key, "failed to read session file, treating as absent");
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.dir.join(key)) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(%err, key, "failed to remove session file");
            }
        }
    }

    fn try_write(&self, token: &str, profile_json: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(PROFILE_KEY), profile_json)?;
        fs::write(self.dir.join(TOKEN_KEY), token)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn read_token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    fn read_profile(&self) -> Option<String> {
        self.read(PROFILE_KEY)
    }

    fn write(&self, token: &str, profile_json: &str) {
        if let Err(err) = self.try_write(token, profile_json) {
            warn!(%err, "failed to persist session, clearing partial state");
            self.clear();
        }
    }

    fn clear(&self) {
        self.remove(TOKEN_KEY);
        self.remove(PROFILE_KEY);
    }
}
