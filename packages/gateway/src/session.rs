//! # Design Session
//!
//! Ties one open form document to the persistence gateway: loading, saving,
//! and publish state. The session owns the document for its lifetime and
//! hands the gateway a snapshot of the element sequence only at explicit
//! save time.

use crate::gateway::{FormGateway, GatewayError, PublishAction};
use formstudio_designer::{DocumentError, FormDocument};
use formstudio_schema::ElementInstance;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Persisted payload did not parse as an element sequence.
    #[error("corrupt form payload: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Persisted form violates a document invariant (duplicate ids).
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One form open in the designer, with its persistence gateway.
pub struct DesignSession<G: FormGateway> {
    form_id: String,
    document: FormDocument,
    gateway: G,
}

impl<G: FormGateway> std::fmt::Debug for DesignSession<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignSession")
            .field("form_id", &self.form_id)
            .finish_non_exhaustive()
    }
}

impl<G: FormGateway> DesignSession<G> {
    /// Open an existing form from the gateway.
    pub fn open(gateway: G, form_id: &str) -> Result<Self, SessionError> {
        let record = gateway.fetch_form(form_id)?;
        let elements: Vec<ElementInstance> = if record.content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&record.content)?
        };

        info!(form_id, elements = elements.len(), "form opened");
        Ok(Self {
            form_id: form_id.to_string(),
            document: FormDocument::from_elements(elements)?,
            gateway,
        })
    }

    /// Start a fresh, empty form.
    pub fn create(gateway: G, form_id: &str) -> Self {
        Self {
            form_id: form_id.to_string(),
            document: FormDocument::new(),
            gateway,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.document
    }

    /// Save a snapshot of the element sequence. Clears the dirty flag on
    /// success; on failure the document (and its dirty flag) are untouched.
    pub fn save(&mut self) -> Result<(), SessionError> {
        match self.gateway.save_form(&self.form_id, self.document.elements()) {
            Ok(()) => {
                self.document.mark_saved();
                info!(form_id = %self.form_id, version = self.document.version(), "form saved");
                Ok(())
            }
            Err(err) => {
                warn!(form_id = %self.form_id, error = %err, "form save failed");
                Err(err.into())
            }
        }
    }

    pub fn publish(&mut self) -> Result<(), SessionError> {
        self.gateway
            .set_published(&self.form_id, PublishAction::Publish)?;
        info!(form_id = %self.form_id, "form published");
        Ok(())
    }

    pub fn unpublish(&mut self) -> Result<(), SessionError> {
        self.gateway
            .set_published(&self.form_id, PublishAction::Unpublish)?;
        info!(form_id = %self.form_id, "form unpublished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FormRecord;
    use crate::memory::MemoryGateway;
    use formstudio_schema::{ElementKind, IdGenerator, SequentialIds};

    fn session_with_elements(count: usize) -> DesignSession<MemoryGateway> {
        let mut ids = SequentialIds::new();
        let mut session = DesignSession::create(MemoryGateway::new(), "form-1");
        for i in 0..count {
            let instance = ElementKind::TextField.construct(ids.fresh());
            session.document_mut().add_element(i, instance);
        }
        session
    }

    #[test]
    fn save_clears_the_dirty_flag() {
        let mut session = session_with_elements(2);
        assert!(session.document().is_dirty());

        session.save().unwrap();
        assert!(!session.document().is_dirty());
    }

    #[test]
    fn failed_save_leaves_document_dirty_and_unchanged() {
        let mut session = session_with_elements(2);
        session.gateway.fail_next_save();

        let err = session.save().unwrap_err();
        assert!(matches!(err, SessionError::Gateway(GatewayError::Backend(_))));
        assert!(session.document().is_dirty());
        assert_eq!(session.document().len(), 2);
    }

    #[test]
    fn saved_forms_round_trip_through_open() {
        let mut session = session_with_elements(3);
        let saved_order: Vec<_> = session
            .document()
            .elements()
            .iter()
            .map(|e| e.id.clone())
            .collect();
        session.save().unwrap();

        let DesignSession { gateway, .. } = session;
        let reopened = DesignSession::open(gateway, "form-1").unwrap();
        let loaded_order: Vec<_> = reopened
            .document()
            .elements()
            .iter()
            .map(|e| e.id.clone())
            .collect();

        assert_eq!(loaded_order, saved_order);
        assert!(!reopened.document().is_dirty());
    }

    #[test]
    fn opening_a_missing_form_is_not_found() {
        let err = DesignSession::open(MemoryGateway::new(), "nope").unwrap_err();
        assert!(matches!(err, SessionError::Gateway(GatewayError::NotFound(_))));
    }

    #[test]
    fn opening_an_empty_form_yields_an_empty_document() {
        let gateway = MemoryGateway::new().with_form(FormRecord {
            id: "blank".to_string(),
            name: "Blank".to_string(),
            published: false,
            content: String::new(),
        });

        let session = DesignSession::open(gateway, "blank").unwrap();
        assert!(session.document().is_empty());
    }

    #[test]
    fn corrupt_payload_is_reported() {
        let gateway = MemoryGateway::new().with_form(FormRecord {
            id: "bad".to_string(),
            name: "Bad".to_string(),
            published: false,
            content: "{not json".to_string(),
        });

        let err = DesignSession::open(gateway, "bad").unwrap_err();
        assert!(matches!(err, SessionError::Corrupt(_)));
    }

    #[test]
    fn stale_payload_with_unknown_type_tag_fails_to_open() {
        // A saved form referencing a removed element kind is a fatal
        // configuration error, not a recoverable one.
        let gateway = MemoryGateway::new().with_form(FormRecord {
            id: "stale".to_string(),
            name: "Stale".to_string(),
            published: false,
            content: r#"[{"id":"x","type":"HologramField","extraAttributes":{}}]"#.to_string(),
        });

        let err = DesignSession::open(gateway, "stale").unwrap_err();
        assert!(matches!(err, SessionError::Corrupt(_)));
    }

    #[test]
    fn publish_and_unpublish_round_trip() {
        let mut session = session_with_elements(1);
        session.save().unwrap();

        session.publish().unwrap();
        assert!(session.gateway.record("form-1").unwrap().published);

        session.unpublish().unwrap();
        assert!(!session.gateway.record("form-1").unwrap().published);
    }

    #[test]
    fn publishing_a_never_saved_form_is_not_found() {
        let mut session = DesignSession::create(MemoryGateway::new(), "unsaved");
        let err = session.publish().unwrap_err();
        assert!(matches!(err, SessionError::Gateway(GatewayError::NotFound(_))));
    }
}
