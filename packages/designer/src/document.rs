//! # Form Document
//!
//! The in-memory representation of one form being edited: an ordered
//! sequence of element instances plus selection state.
//!
//! ## Invariants
//!
//! - Element order is the render/tab order of the live form and is preserved
//!   exactly across insert, remove, and reorder.
//! - Every element id is unique within the document.
//! - The selection, if set, always refers to an id currently present;
//!   removing the selected element clears it.
//!
//! ## Observation
//!
//! Every successful mutation emits exactly one [`DocumentEvent::ElementsChanged`]
//! through the registered observer; selection updates additionally emit
//! [`DocumentEvent::SelectionChanged`]. No-ops emit nothing.

use crate::errors::DocumentError;
use formstudio_schema::{ElementId, ElementInstance};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Notification fired after a successful document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// The element sequence changed; carries a snapshot of the new order.
    ElementsChanged {
        elements: Vec<ElementInstance>,
        version: u64,
    },
    /// The selection changed.
    SelectionChanged {
        selected: Option<ElementInstance>,
    },
}

type Observer = Box<dyn FnMut(&DocumentEvent)>;

/// One form open in the designer.
pub struct FormDocument {
    elements: Vec<ElementInstance>,
    selected: Option<ElementId>,

    /// Increments on every successful content mutation.
    version: u64,

    /// Set by every successful content mutation, cleared on save.
    dirty: bool,

    observer: Option<Observer>,
}

impl fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDocument")
            .field("elements", &self.elements)
            .field("selected", &self.selected)
            .field("version", &self.version)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDocument {
    /// Empty document (a form started from scratch).
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            version: 0,
            dirty: false,
            observer: None,
        }
    }

    /// Document loaded from persisted elements.
    ///
    /// Rejects duplicate ids: a stale saved form with colliding ids is a
    /// configuration error, not something the designer can edit safely.
    pub fn from_elements(elements: Vec<ElementInstance>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::new();
        for element in &elements {
            if !seen.insert(element.id.clone()) {
                return Err(DocumentError::DuplicateId(element.id.clone()));
            }
        }

        Ok(Self {
            elements,
            selected: None,
            version: 0,
            dirty: false,
            observer: None,
        })
    }

    /// Register the single observer notified on every mutation.
    pub fn set_observer(&mut self, observer: impl FnMut(&DocumentEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the session after a successful gateway save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&ElementInstance> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn selected_element(&self) -> Option<&ElementInstance> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Insert `instance` at `index`, clamped to `[0, len]`; later elements
    /// shift back by one. Returns the index actually used.
    ///
    /// A colliding id is a caller error: correct callers always supply a
    /// freshly generated id.
    pub fn add_element(&mut self, index: usize, instance: ElementInstance) -> usize {
        debug_assert!(
            self.index_of(&instance.id).is_none(),
            "caller reused element id {}",
            instance.id
        );

        let index = index.min(self.elements.len());
        debug!(id = %instance.id, kind = %instance.kind(), index, "add element");
        self.elements.insert(index, instance);
        self.touch();
        self.notify_elements_changed();
        index
    }

    /// Remove the element with `id` and return it; no-op if absent.
    ///
    /// Clears the selection when the removed element was selected.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<ElementInstance> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        debug!(%id, index, "remove element");
        self.touch();
        self.notify_elements_changed();

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.notify_selection_changed();
        }

        Some(removed)
    }

    /// Replace the element with `id` in place (position unchanged).
    ///
    /// `new_instance.id` must equal `id`. Returns `Ok(false)` when `id` is
    /// not present (no-op).
    pub fn update_element(
        &mut self,
        id: &ElementId,
        new_instance: ElementInstance,
    ) -> Result<bool, DocumentError> {
        if &new_instance.id != id {
            return Err(DocumentError::IdMismatch {
                expected: id.clone(),
                got: new_instance.id,
            });
        }

        let Some(index) = self.index_of(id) else {
            debug!(%id, "update target absent, ignoring");
            return Ok(false);
        };

        debug!(%id, index, "update element");
        self.elements[index] = new_instance;
        self.touch();
        self.notify_elements_changed();
        Ok(true)
    }

    /// Change the selection. Selecting an id that is not present is a no-op.
    /// Returns whether the selection actually changed.
    pub fn set_selected(&mut self, id: Option<ElementId>) -> bool {
        if let Some(id) = &id {
            if self.index_of(id).is_none() {
                debug!(%id, "selection target absent, ignoring");
                return false;
            }
        }
        if self.selected == id {
            return false;
        }

        self.selected = id;
        self.notify_selection_changed();
        true
    }

    fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    fn notify_elements_changed(&mut self) {
        if self.observer.is_some() {
            let event = DocumentEvent::ElementsChanged {
                elements: self.elements.clone(),
                version: self.version,
            };
            if let Some(observer) = self.observer.as_mut() {
                observer(&event);
            }
        }
    }

    fn notify_selection_changed(&mut self) {
        if self.observer.is_some() {
            let event = DocumentEvent::SelectionChanged {
                selected: self.selected_element().cloned(),
            };
            if let Some(observer) = self.observer.as_mut() {
                observer(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_schema::{ElementKind, IdGenerator, SequentialIds};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn instance(ids: &mut SequentialIds, kind: ElementKind) -> ElementInstance {
        kind.construct(ids.fresh())
    }

    #[test]
    fn add_clamps_index_to_length() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();

        let used = doc.add_element(99, instance(&mut ids, ElementKind::TextField));
        assert_eq!(used, 0);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn add_shifts_later_elements() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let a = instance(&mut ids, ElementKind::TextField);
        let b = instance(&mut ids, ElementKind::NumberField);
        let c = instance(&mut ids, ElementKind::DateField);
        let (a_id, b_id, c_id) = (a.id.clone(), b.id.clone(), c.id.clone());

        doc.add_element(0, a);
        doc.add_element(1, b);
        doc.add_element(1, c);

        let order: Vec<_> = doc.elements().iter().map(|e| e.id.clone()).collect();
        assert_eq!(order, vec![a_id, c_id, b_id]);
    }

    #[test]
    fn remove_absent_id_is_a_no_op() {
        let mut doc = FormDocument::new();
        assert!(doc.remove_element(&"ghost".into()).is_none());
        assert_eq!(doc.version(), 0);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn removing_selected_element_clears_selection() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let a = instance(&mut ids, ElementKind::TextField);
        let a_id = a.id.clone();

        doc.add_element(0, a);
        assert!(doc.set_selected(Some(a_id.clone())));
        doc.remove_element(&a_id);

        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn update_rejects_id_mismatch() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let a = instance(&mut ids, ElementKind::TextField);
        let a_id = a.id.clone();
        doc.add_element(0, a);

        let imposter = instance(&mut ids, ElementKind::TextField);
        let err = doc.update_element(&a_id, imposter).unwrap_err();
        assert!(matches!(err, DocumentError::IdMismatch { .. }));
    }

    #[test]
    fn update_absent_id_is_a_no_op() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let orphan = instance(&mut ids, ElementKind::TextField);
        let orphan_id = orphan.id.clone();

        assert_eq!(doc.update_element(&orphan_id, orphan), Ok(false));
        assert!(doc.elements().is_empty());
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn selecting_an_absent_id_is_rejected() {
        let mut doc = FormDocument::new();
        assert!(!doc.set_selected(Some("ghost".into())));
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn mutations_set_dirty_and_save_clears_it() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        assert!(!doc.is_dirty());

        doc.add_element(0, instance(&mut ids, ElementKind::TextField));
        assert!(doc.is_dirty());

        doc.mark_saved();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn from_elements_rejects_duplicate_ids() {
        let mut ids = SequentialIds::new();
        let a = instance(&mut ids, ElementKind::TextField);
        let mut b = instance(&mut ids, ElementKind::NumberField);
        b.id = a.id.clone();

        let err = FormDocument::from_elements(vec![a, b]).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateId(_)));
    }

    #[test]
    fn every_mutation_notifies_exactly_once() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let counter = Rc::new(RefCell::new(0usize));
        let seen = Rc::clone(&counter);
        doc.set_observer(move |event| {
            if matches!(event, DocumentEvent::ElementsChanged { .. }) {
                *seen.borrow_mut() += 1;
            }
        });

        let a = instance(&mut ids, ElementKind::TextField);
        let a_id = a.id.clone();
        doc.add_element(0, a.clone());
        doc.update_element(&a_id, a).unwrap();
        doc.remove_element(&a_id);

        // One ElementsChanged per successful mutation, none for no-ops.
        doc.remove_element(&a_id);
        assert_eq!(*counter.borrow(), 3);
    }

    #[test]
    fn selection_change_notifies_with_the_selected_instance() {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let a = instance(&mut ids, ElementKind::CheckboxField);
        let a_id = a.id.clone();
        doc.add_element(0, a.clone());

        let last: Rc<RefCell<Option<DocumentEvent>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);
        doc.set_observer(move |event| {
            *sink.borrow_mut() = Some(event.clone());
        });

        doc.set_selected(Some(a_id));
        assert_eq!(
            *last.borrow(),
            Some(DocumentEvent::SelectionChanged { selected: Some(a) })
        );
    }
}
