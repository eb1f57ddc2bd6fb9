//! # Designer Surface
//!
//! Drag/drop resolution for the canvas.
//!
//! ## Gesture model
//!
//! A drag is a synchronous sequence of pointer events: start, hover updates,
//! end. The surface carries no state between gestures; the only transient
//! state is the drop target currently highlighted for user feedback, which
//! is discarded on drop or cancel. Resolution runs once, at gesture end,
//! from the (source, target) pair — it never suspends.
//!
//! ## Resolution rules (first match wins)
//!
//! 1. Palette button onto the canvas: construct and append.
//! 2. Palette button onto an element half: construct and insert before
//!    (top) or after (bottom) that element.
//! 3. Existing element onto another element's half: remove, then reinsert
//!    at the index recomputed against the shifted document. The two-pass
//!    form is deliberate — the post-removal recomputation is what makes
//!    the half semantics correct. Id and attributes travel unchanged.
//! 4. Anything else (self-drop, drop outside the canvas, stale ids) is a
//!    silent no-op: a stale drag target is a benign timing artifact, not
//!    an error.

use crate::document::FormDocument;
use crate::undo_stack::{EditOp, UndoStack};
use formstudio_schema::{ElementId, ElementInstance, ElementKind, IdGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which half of an element's bounding box the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Insertion index relative to the anchor element's index.
    fn insertion_index(&self, anchor: usize) -> usize {
        match self {
            Half::Top => anchor,
            Half::Bottom => anchor + 1,
        }
    }
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragSource {
    /// A new-element button from the sidebar palette.
    Palette { kind: ElementKind },
    /// The handle of an element already in the document.
    Existing { element_id: ElementId },
}

/// Where the drag ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DropTarget {
    /// The canvas background / empty drop area.
    EmptyCanvas,
    /// The upper or lower half of an existing element.
    ElementHalf { element_id: ElementId, half: Half },
    /// Released outside any valid drop zone (or cancelled).
    OutsideCanvas,
}

/// What a completed gesture did to the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DropOutcome {
    /// A new element was constructed and inserted.
    Inserted { id: ElementId, index: usize },
    /// An existing element was reordered.
    Moved { id: ElementId, index: usize },
    /// The gesture resolved to a no-op.
    Ignored,
}

/// The drop-target side of the designer canvas.
#[derive(Debug, Default)]
pub struct DesignerSurface {
    /// Drop target currently highlighted during a drag, for user feedback
    /// only; cleared on drop or cancel.
    active_target: Option<DropTarget>,
}

/// Applies edits either directly or through an undo stack.
enum Sink<'a> {
    Direct,
    Recorded(&'a mut UndoStack),
}

impl Sink<'_> {
    fn insert(
        &mut self,
        doc: &mut FormDocument,
        index: usize,
        instance: ElementInstance,
    ) -> usize {
        match self {
            Sink::Direct => doc.add_element(index, instance),
            Sink::Recorded(undo) => {
                let inverse = EditOp::Remove {
                    id: instance.id.clone(),
                };
                let used = doc.add_element(index, instance.clone());
                undo.record(
                    EditOp::Insert {
                        index: used,
                        instance,
                    },
                    inverse,
                );
                used
            }
        }
    }

    fn remove(&mut self, doc: &mut FormDocument, id: &ElementId) -> Option<ElementInstance> {
        match self {
            Sink::Direct => doc.remove_element(id),
            Sink::Recorded(undo) => {
                let index = doc.index_of(id)?;
                let removed = doc.remove_element(id)?;
                undo.record(
                    EditOp::Remove { id: id.clone() },
                    EditOp::Insert {
                        index,
                        instance: removed.clone(),
                    },
                );
                Some(removed)
            }
        }
    }
}

impl DesignerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover update during a drag: track which target to highlight.
    pub fn drag_over(&mut self, target: DropTarget) {
        self.active_target = match target {
            DropTarget::OutsideCanvas => None,
            other => Some(other),
        };
    }

    /// Target currently highlighted, if any.
    pub fn active_target(&self) -> Option<&DropTarget> {
        self.active_target.as_ref()
    }

    /// Drag left the canvas or was cancelled.
    pub fn drag_cancel(&mut self) {
        self.active_target = None;
    }

    /// Resolve a completed gesture and mutate the document.
    pub fn resolve_drop(
        &mut self,
        document: &mut FormDocument,
        ids: &mut dyn IdGenerator,
        source: DragSource,
        target: DropTarget,
    ) -> DropOutcome {
        self.active_target = None;
        Self::resolve(document, ids, &mut Sink::Direct, source, target)
    }

    /// Like [`resolve_drop`](Self::resolve_drop), recording the mutations as
    /// one undo step.
    pub fn resolve_drop_undoable(
        &mut self,
        document: &mut FormDocument,
        ids: &mut dyn IdGenerator,
        undo: &mut UndoStack,
        source: DragSource,
        target: DropTarget,
    ) -> DropOutcome {
        self.active_target = None;

        undo.begin_batch();
        let outcome = Self::resolve(document, ids, &mut Sink::Recorded(undo), source, target);
        match &outcome {
            DropOutcome::Inserted { .. } => undo.set_batch_description("insert element"),
            DropOutcome::Moved { .. } => undo.set_batch_description("move element"),
            DropOutcome::Ignored => {}
        }
        undo.end_batch();

        outcome
    }

    fn resolve(
        document: &mut FormDocument,
        ids: &mut dyn IdGenerator,
        sink: &mut Sink<'_>,
        source: DragSource,
        target: DropTarget,
    ) -> DropOutcome {
        match (source, target) {
            (DragSource::Palette { kind }, DropTarget::EmptyCanvas) => {
                let end = document.len();
                let instance = kind.construct(ids.fresh());
                let id = instance.id.clone();
                let index = sink.insert(document, end, instance);
                debug!(%id, %kind, index, "palette drop on canvas");
                DropOutcome::Inserted { id, index }
            }

            (DragSource::Palette { kind }, DropTarget::ElementHalf { element_id, half }) => {
                let Some(anchor) = document.index_of(&element_id) else {
                    debug!(anchor = %element_id, "drop target vanished mid-drag, ignoring");
                    return DropOutcome::Ignored;
                };
                let instance = kind.construct(ids.fresh());
                let id = instance.id.clone();
                let index = sink.insert(document, half.insertion_index(anchor), instance);
                debug!(%id, %kind, index, "palette drop on element half");
                DropOutcome::Inserted { id, index }
            }

            (
                DragSource::Existing {
                    element_id: source_id,
                },
                DropTarget::ElementHalf {
                    element_id: target_id,
                    half,
                },
            ) if source_id != target_id => {
                if document.index_of(&source_id).is_none()
                    || document.index_of(&target_id).is_none()
                {
                    debug!(%source_id, %target_id, "stale drag ids, ignoring");
                    return DropOutcome::Ignored;
                }

                let Some(captured) = sink.remove(document, &source_id) else {
                    return DropOutcome::Ignored;
                };
                // Recomputed against the shifted document; the anchor survives
                // the removal because source != target.
                let Some(anchor) = document.index_of(&target_id) else {
                    return DropOutcome::Ignored;
                };
                let index = sink.insert(document, half.insertion_index(anchor), captured);
                debug!(id = %source_id, index, "element reordered");
                DropOutcome::Moved {
                    id: source_id,
                    index,
                }
            }

            (source, target) => {
                debug!(?source, ?target, "gesture resolved to no-op");
                DropOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_descriptors_serialize() {
        let source = DragSource::Palette {
            kind: ElementKind::TextField,
        };
        let json = serde_json::to_string(&source).unwrap();
        let back: DragSource = serde_json::from_str(&json).unwrap();
        assert_eq!(source, back);

        let target = DropTarget::ElementHalf {
            element_id: "el-3".into(),
            half: Half::Bottom,
        };
        let json = serde_json::to_string(&target).unwrap();
        let back: DropTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(target, back);
    }
}
