use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::editing::DocumentId;
use crate::export::SavedDocument;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Document not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Save rejected: {0}")]
    Rejected(String),
}

/// Where saved documents go. Implementations are called off the editing
/// thread.
pub trait Persistence: Send + Sync {
    fn save(&self, id: DocumentId, document: &SavedDocument) -> Result<(), PersistenceError>;
}

/// Stores each document as pretty JSON in `<root>/<document-id>.json`.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    root: PathBuf,
}

impl FilePersistence {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: DocumentId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Read a previously saved document back.
    pub fn load(&self, id: DocumentId) -> Result<SavedDocument, PersistenceError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(path));
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Persistence for FilePersistence {
    fn save(&self, id: DocumentId, document: &SavedDocument) -> Result<(), PersistenceError> {
        let path = self.path_for(id);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&path, json)?;
        log::debug!("saved {id} to {}", path.display());
        Ok(())
    }
}

/// Result of one save attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(String),
}

impl SaveOutcome {
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Saved => "Saved!".to_string(),
            SaveOutcome::Failed(reason) => format!("Save failed: {reason}"),
        }
    }
}

impl From<Result<(), PersistenceError>> for SaveOutcome {
    fn from(result: Result<(), PersistenceError>) -> Self {
        match result {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => SaveOutcome::Failed(e.to_string()),
        }
    }
}

/// Receives save outcomes for display.
pub trait SaveReporter: Send + 'static {
    fn report(&self, outcome: SaveOutcome);
}

impl SaveReporter for Sender<SaveOutcome> {
    fn report(&self, outcome: SaveOutcome) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.send(outcome);
    }
}

/// Save on the calling thread.
pub fn save_now(
    persistence: &dyn Persistence,
    id: DocumentId,
    document: &SavedDocument,
) -> SaveOutcome {
    let outcome = SaveOutcome::from(persistence.save(id, document));
    if let SaveOutcome::Failed(reason) = &outcome {
        log::error!("failed to save {id}: {reason}");
    }
    outcome
}

/// Save on a background thread and report the outcome. The document is an
/// owned payload, so editing can continue immediately and is never rolled
/// back on failure.
pub fn dispatch_save<R: SaveReporter>(
    persistence: Arc<dyn Persistence>,
    id: DocumentId,
    document: SavedDocument,
    reporter: R,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let outcome = save_now(persistence.as_ref(), id, &document);
        reporter.report(outcome);
    })
}
