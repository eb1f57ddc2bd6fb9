//! # Properties Editor Binding
//!
//! Binds the properties panel to the currently selected element: the panel
//! edits a copy of the instance's attributes and submits them wholesale.
//! Submission is all-or-nothing — a schema violation rejects the edit with
//! field-level messages and the instance is left untouched. On success the
//! selection is cleared, returning the user to the palette view.

use crate::document::FormDocument;
use crate::errors::DocumentError;
use crate::undo_stack::{EditOp, UndoStack};
use formstudio_schema::{
    ElementInstance, ElementKind, ExtraAttributes, FieldError, RenderNode, RenderVariant,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertiesError {
    #[error("no element is selected")]
    NothingSelected,

    #[error("edited attributes are for {edited}, selected element is {selected}")]
    KindMismatch {
        selected: ElementKind,
        edited: ElementKind,
    },

    #[error("properties failed schema validation ({} field(s))", .0.len())]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Stateless binding between the properties panel and the document.
pub struct PropertiesEditor;

impl PropertiesEditor {
    /// Editing form for the selected element, bound to its current
    /// attributes as initial values.
    pub fn form(document: &FormDocument) -> Result<RenderNode, PropertiesError> {
        let selected = Self::selected(document)?;
        Ok(selected.render(RenderVariant::PropertiesPanel))
    }

    /// Current attributes of the selected element (the panel edits a copy).
    pub fn initial_values(document: &FormDocument) -> Result<ExtraAttributes, PropertiesError> {
        Ok(Self::selected(document)?.attributes.clone())
    }

    /// Submit edited attributes for the selected element.
    pub fn submit(
        document: &mut FormDocument,
        edited: ExtraAttributes,
    ) -> Result<(), PropertiesError> {
        let replacement = Self::checked_replacement(document, edited)?;
        let id = replacement.id.clone();
        document.update_element(&id, replacement)?;
        document.set_selected(None);
        Ok(())
    }

    /// Like [`submit`](Self::submit), recording the edit for undo.
    pub fn submit_undoable(
        document: &mut FormDocument,
        undo: &mut UndoStack,
        edited: ExtraAttributes,
    ) -> Result<(), PropertiesError> {
        let replacement = Self::checked_replacement(document, edited)?;
        let id = replacement.id.clone();
        undo.apply(
            document,
            EditOp::Update {
                id,
                instance: replacement,
            },
        )?;
        document.set_selected(None);
        Ok(())
    }

    fn selected(document: &FormDocument) -> Result<&ElementInstance, PropertiesError> {
        document
            .selected_element()
            .ok_or(PropertiesError::NothingSelected)
    }

    /// Validate the edit against the selected instance; no partial writes.
    fn checked_replacement(
        document: &FormDocument,
        edited: ExtraAttributes,
    ) -> Result<ElementInstance, PropertiesError> {
        let selected = Self::selected(document)?;

        if edited.kind() != selected.kind() {
            return Err(PropertiesError::KindMismatch {
                selected: selected.kind(),
                edited: edited.kind(),
            });
        }

        if let Err(errors) = edited.validate_schema() {
            debug!(id = %selected.id, count = errors.len(), "properties edit rejected");
            return Err(PropertiesError::Invalid(errors));
        }

        Ok(ElementInstance {
            id: selected.id.clone(),
            attributes: edited,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstudio_schema::{IdGenerator, SequentialIds, SpacerAttributes, TextAttributes};

    fn doc_with_selected(kind: ElementKind) -> (FormDocument, formstudio_schema::ElementId) {
        let mut ids = SequentialIds::new();
        let mut doc = FormDocument::new();
        let instance = kind.construct(ids.fresh());
        let id = instance.id.clone();
        doc.add_element(0, instance);
        doc.set_selected(Some(id.clone()));
        (doc, id)
    }

    #[test]
    fn submit_replaces_attributes_and_clears_selection() {
        let (mut doc, id) = doc_with_selected(ElementKind::TextField);

        let edited = ExtraAttributes::TextField(TextAttributes {
            label: "Full name".to_string(),
            required: true,
            ..TextAttributes::default()
        });
        PropertiesEditor::submit(&mut doc, edited.clone()).unwrap();

        assert_eq!(doc.get(&id).map(|e| &e.attributes), Some(&edited));
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn submit_without_selection_is_rejected() {
        let mut doc = FormDocument::new();
        let edited = ExtraAttributes::TextField(TextAttributes::default());
        assert_eq!(
            PropertiesEditor::submit(&mut doc, edited),
            Err(PropertiesError::NothingSelected)
        );
    }

    #[test]
    fn kind_mismatch_is_rejected_without_writes() {
        let (mut doc, id) = doc_with_selected(ElementKind::SpacerField);
        let before = doc.get(&id).cloned();

        let edited = ExtraAttributes::TextField(TextAttributes::default());
        let err = PropertiesEditor::submit(&mut doc, edited).unwrap_err();

        assert!(matches!(err, PropertiesError::KindMismatch { .. }));
        assert_eq!(doc.get(&id).cloned(), before);
        // Selection survives a rejected edit.
        assert_eq!(doc.selected_id(), Some(&id));
    }

    #[test]
    fn invalid_schema_is_rejected_with_field_errors() {
        let (mut doc, id) = doc_with_selected(ElementKind::SpacerField);
        let before = doc.get(&id).cloned();

        let edited = ExtraAttributes::SpacerField(SpacerAttributes { height: 9999 });
        match PropertiesEditor::submit(&mut doc, edited).unwrap_err() {
            PropertiesError::Invalid(errors) => assert_eq!(errors[0].field, "height"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(doc.get(&id).cloned(), before);
    }

    #[test]
    fn form_exposes_the_selected_elements_editor() {
        let (doc, _) = doc_with_selected(ElementKind::SpacerField);
        match PropertiesEditor::form(&doc).unwrap() {
            RenderNode::PropertiesForm { fields } => assert_eq!(fields[0].name, "height"),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn undoable_submit_restores_previous_attributes() {
        let (mut doc, id) = doc_with_selected(ElementKind::SpacerField);
        let before = doc.get(&id).cloned();
        let mut undo = UndoStack::new();

        let edited = ExtraAttributes::SpacerField(SpacerAttributes { height: 60 });
        PropertiesEditor::submit_undoable(&mut doc, &mut undo, edited).unwrap();

        undo.undo(&mut doc).unwrap();
        assert_eq!(doc.get(&id).cloned(), before);
    }
}
