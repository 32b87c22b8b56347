use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::app_dirs::{AppDirs, STATE_KEY};
use crate::env::EnvReading;
use crate::session::{Session, User, UserState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access state record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode state record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("state storage is unavailable")]
    Unavailable,
}

/// Raw key-value slot holding the serialized record
pub trait StateBackend {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, contents: &str) -> Result<(), StoreError>;
}

impl<B: StateBackend + ?Sized> StateBackend for Rc<B> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::state_path()
            .unwrap_or_else(|| PathBuf::from(format!("{STATE_KEY}.json")));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-process slot, used for `--ephemeral` runs and tests
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RefCell<Option<String>>,
    reject_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(contents.into())),
            reject_writes: false,
        }
    }

    /// A backend that refuses every write, like a full or disabled store.
    pub fn read_only() -> Self {
        Self {
            slot: RefCell::new(None),
            reject_writes: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Unavailable);
        }
        *self.slot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

/// Owns the persisted record. Loading never fails and saving is
/// best-effort: the in-memory `UserState` stays authoritative.
pub struct SessionStore {
    backend: Box<dyn StateBackend>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: impl StateBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn load(&self) -> UserState {
        let contents = match self.backend.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!("no stored state, starting empty");
                return UserState::default();
            }
            Err(e) => {
                warn!(error = %e, "could not read stored state, starting empty");
                return UserState::default();
            }
        };

        match serde_json::from_str::<Option<UserState>>(&contents) {
            Ok(Some(mut state)) => {
                state.sanitize();
                debug!(sessions = state.sessions.len(), "loaded stored state");
                state
            }
            Ok(None) => UserState::default(),
            Err(e) => {
                warn!(error = %e, "stored state is malformed, starting empty");
                UserState::default()
            }
        }
    }

    pub fn try_save(&self, state: &UserState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.backend.write(&json)
    }

    pub fn save(&self, state: &UserState) {
        if let Err(e) = self.try_save(state) {
            warn!(error = %e, "could not persist state, keeping it in memory");
        }
    }

    pub fn record_session(&self, state: &mut UserState, session: Session) {
        state.sessions.push(session);
        self.save(state);
    }

    pub fn record_login(&self, state: &mut UserState, user: User) {
        state.user = Some(user);
        self.save(state);
    }

    pub fn record_start(&self, state: &mut UserState, at: i64) {
        state.last_start = Some(at);
        self.save(state);
    }

    pub fn record_env(&self, state: &mut UserState, reading: EnvReading) {
        state.last_env = Some(reading);
        self.save(state);
    }
}
