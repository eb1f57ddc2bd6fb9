//! # Formstudio Designer
//!
//! Core editing engine for the form designer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: element kinds + typed attributes    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ designer: document lifecycle + gestures     │
//! │  - Ordered elements + selection             │
//! │  - Drag/drop resolution at gesture end      │
//! │  - Properties-panel binding                 │
//! │  - Undo/redo over recorded edits            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ gateway: save / publish / fetch             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single-threaded edits**: all designer operations run on one event
//!    loop; mutations are atomic within one synchronous call.
//! 2. **Stateless gestures**: each drag/drop cycle is resolved from the
//!    (source, target) pair captured at gesture end.
//! 3. **Benign misses**: stale drag ids resolve to silent no-ops — a
//!    deleted-mid-drag target is a timing artifact, not an error.
//!
//! ## Usage
//!
//! ```rust
//! use formstudio_designer::{DesignerSurface, DragSource, DropTarget, FormDocument};
//! use formstudio_schema::{ElementKind, SequentialIds};
//!
//! let mut document = FormDocument::new();
//! let mut surface = DesignerSurface::new();
//! let mut ids = SequentialIds::new();
//!
//! let outcome = surface.resolve_drop(
//!     &mut document,
//!     &mut ids,
//!     DragSource::Palette { kind: ElementKind::TextField },
//!     DropTarget::EmptyCanvas,
//! );
//! assert_eq!(document.elements().len(), 1);
//! # let _ = outcome;
//! ```

mod document;
mod errors;
mod properties;
mod surface;
mod undo_stack;

pub use document::{DocumentEvent, FormDocument};
pub use errors::DocumentError;
pub use properties::{PropertiesEditor, PropertiesError};
pub use surface::{DesignerSurface, DragSource, DropOutcome, DropTarget, Half};
pub use undo_stack::{EditBatch, EditOp, UndoStack};

// Re-export the schema layer for convenience
pub use formstudio_schema as schema;
