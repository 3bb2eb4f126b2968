/*!
 * # Editing Core Module
 *
 * The block editor is a small, strictly event-driven state machine over an
 * ordered sequence of typed blocks.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Owner: `BlockStore`
 * - The document is an ordered `Vec<Block>`; only `BlockStore` mutates it
 * - Ids come from a per-store counter and are never reused
 * - The sequence is never empty; deleting the last block is a no-op
 * - Every mutation returns a **`Patch`** naming the changed blocks, an
 *   optional focus request and the new version
 *
 * ### 2. Typing Triggers
 * - `MarkdownTriggerDetector` looks at a block's whole plain text
 * - A recognised pattern (`"# "`, `"- [ ] "`, `"1. "`, a video URL, ...)
 *   changes the block type in place and clears the text
 * - A trigger always supersedes applying the keystroke as literal text
 *
 * ### 3. Inline Formatting over Snapshots
 * - Selections are captured as immutable **`SelectionSnapshot`** values
 * - `InlineFormatter` consumes one snapshot per command and rewrites the
 *   block content; it never changes the block type
 *
 * ### 4. Focus without Presentation Objects
 * - The core only emits **`FocusRequest`**s
 * - `FocusRegistry` maps block ids to whatever handles the UI owns
 *
 * ### 5. Session
 * - `EditorSession` routes one `EditorEvent` to at most one store mutation
 * - Composition input is opaque: no triggers and no selection capture until
 *   it ends, then the block is synchronised once
 *
 * ## Usage Pattern
 *
 * ```rust
 * use report_editor_engine::editing::{EditorEvent, EditorSession};
 * use report_editor_engine::models::{BlockType, RichText};
 *
 * let mut session = EditorSession::new();
 * let block = session.store().blocks()[1].id();
 *
 * session
 *     .handle(EditorEvent::Input { block, content: RichText::plain("- [ ] ") })
 *     .unwrap();
 *
 * assert_eq!(session.store().get(block).unwrap().kind(), BlockType::Checkbox);
 * ```
 */

pub mod focus;
pub mod format;
pub mod patch;
pub mod selection;
pub mod session;
pub mod store;
pub mod triggers;

pub use focus::{Caret, FocusRegistry, FocusRequest};
pub use format::{FormatOutcome, InlineFormatter};
pub use patch::Patch;
pub use selection::SelectionSnapshot;
pub use session::{EditorEvent, EditorSession, EventOutcome, SelectionRange};
pub use store::{BlockStore, CONTENT_PLACEHOLDER, DocumentId, EditError, TITLE_PLACEHOLDER};
pub use triggers::{MarkdownTriggerDetector, Trigger, TriggerOutcome, TriggerPattern, detect};
