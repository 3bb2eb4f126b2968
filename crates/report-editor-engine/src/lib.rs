pub mod editing;
pub mod export;
pub mod import;
pub mod models;
pub mod parsing;
pub mod persistence;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BlockStore, DocumentId, EditError, EditorEvent, EditorSession, EventOutcome, Patch};
pub use export::{DocumentSerializer, SavedDocument, SavedSection, SerializeOptions};
pub use import::{AnalysisImporter, AnalysisReport, ImportError, ImportOptions, ReportSection};
pub use models::*;
pub use parsing::parse_blocks;
pub use persistence::{
    FilePersistence, Persistence, PersistenceError, SaveOutcome, SaveReporter, dispatch_save,
    save_now,
};
