//! # Undo/Redo Stack
//!
//! Tracks document edits and enables undo/redo.
//!
//! ## Design
//!
//! - Each edit records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the original edits
//! - New edits clear the redo stack
//! - Supports batches (a drag-reorder is remove + reinsert underneath but
//!   one undo step for the user)

use crate::document::FormDocument;
use crate::errors::DocumentError;
use formstudio_schema::{ElementId, ElementInstance};
use serde::{Deserialize, Serialize};

/// One primitive document edit, replayable and invertible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditOp {
    Insert {
        index: usize,
        instance: ElementInstance,
    },
    Remove {
        id: ElementId,
    },
    Update {
        id: ElementId,
        instance: ElementInstance,
    },
}

impl EditOp {
    fn apply(&self, doc: &mut FormDocument) -> Result<(), DocumentError> {
        match self {
            EditOp::Insert { index, instance } => {
                doc.add_element(*index, instance.clone());
                Ok(())
            }
            EditOp::Remove { id } => {
                doc.remove_element(id);
                Ok(())
            }
            EditOp::Update { id, instance } => {
                doc.update_element(id, instance.clone())?;
                Ok(())
            }
        }
    }

    /// Inverse of this op against the current document state, or `None`
    /// when the op would be a no-op (absent target).
    fn inverse(&self, doc: &FormDocument) -> Option<EditOp> {
        match self {
            EditOp::Insert { instance, .. } => Some(EditOp::Remove {
                id: instance.id.clone(),
            }),
            EditOp::Remove { id } => {
                let index = doc.index_of(id)?;
                let instance = doc.get(id)?.clone();
                Some(EditOp::Insert { index, instance })
            }
            EditOp::Update { id, .. } => {
                let previous = doc.get(id)?.clone();
                Some(EditOp::Update {
                    id: id.clone(),
                    instance: previous,
                })
            }
        }
    }
}

/// A group of edits undone/redone together.
#[derive(Debug, Clone)]
pub struct EditBatch {
    /// The edits in application order.
    pub ops: Vec<EditOp>,

    /// The inverse edits, in reverse order for undo.
    pub inverses: Vec<EditOp>,

    pub description: Option<String>,
}

/// Undo/redo stack for one form document.
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<EditBatch>,
    redo_stack: Vec<EditBatch>,

    /// Maximum undo levels (0 = unlimited).
    max_levels: usize,

    current_batch: Option<EditBatch>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply an edit and record it for undo. Edits whose target is absent
    /// are no-ops and are not recorded.
    pub fn apply(&mut self, doc: &mut FormDocument, op: EditOp) -> Result<(), DocumentError> {
        let Some(inverse) = op.inverse(doc) else {
            return Ok(());
        };
        op.apply(doc)?;
        self.record(op, inverse);
        Ok(())
    }

    /// Record an edit that has already been applied.
    ///
    /// The inverse must have been computed against the pre-apply state.
    pub(crate) fn record(&mut self, op: EditOp, inverse: EditOp) {
        if let Some(batch) = &mut self.current_batch {
            batch.ops.push(op);
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(EditBatch {
                ops: vec![op],
                inverses: vec![inverse],
                description: None,
            });
        }
    }

    /// Start grouping edits into one undo step.
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(EditBatch {
            ops: Vec::new(),
            inverses: Vec::new(),
            description: None,
        });
    }

    /// Finish the current batch; empty batches are discarded.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.ops.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: EditBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New edits invalidate the redo future.
        self.redo_stack.clear();
    }

    /// Undo the most recent batch. Returns `false` when there is nothing
    /// to undo.
    pub fn undo(&mut self, doc: &mut FormDocument) -> Result<bool, DocumentError> {
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            inverse.apply(doc)?;
        }

        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch.
    pub fn redo(&mut self, doc: &mut FormDocument) -> Result<bool, DocumentError> {
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        for op in &batch.ops {
            op.apply(doc)?;
        }

        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
