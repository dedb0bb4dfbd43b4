//! Application state shared across handlers.

use std::sync::Arc;

use notes_store::NoteRepository;

use crate::cancel::CancellationGuard;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Note repository; backend and id encoding are decided at startup.
    notes: Arc<dyn NoteRepository>,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Guard applied to every repository call.
    guard: CancellationGuard,
}

impl AppState {
    /// Create new application state.
    pub fn new(notes: Arc<dyn NoteRepository>, config: ServerConfig) -> Self {
        Self {
            notes,
            guard: CancellationGuard::new(config.min_latency),
            config: Arc::new(config),
        }
    }

    /// Get the note repository.
    pub fn notes(&self) -> &dyn NoteRepository {
        self.notes.as_ref()
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the cancellation guard.
    pub fn guard(&self) -> &CancellationGuard {
        &self.guard
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("notes", &self.notes)
            .field("config", &self.config)
            .field("guard", &self.guard)
            .finish()
    }
}
