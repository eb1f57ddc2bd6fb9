//! The persistence seam.
//!
//! The designer core calls these operations but never implements them
//! against a real backend; the surrounding shell provides that. Gateway
//! failures surface to the caller, and the in-memory document is left
//! untouched on failure — the local edit already happened, save is a
//! downstream sync, not a precondition.

use formstudio_schema::ElementInstance;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("form not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Publish-state change requested for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishAction {
    Publish,
    Unpublish,
}

/// A persisted form as the gateway returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: String,
    pub name: String,
    pub published: bool,

    /// Serialized element sequence (JSON array of instances).
    pub content: String,
}

/// Save / publish / fetch operations on the form store.
pub trait FormGateway {
    /// Persist a snapshot of the element sequence.
    fn save_form(&mut self, form_id: &str, elements: &[ElementInstance])
        -> Result<(), GatewayError>;

    fn set_published(&mut self, form_id: &str, action: PublishAction) -> Result<(), GatewayError>;

    fn fetch_form(&self, form_id: &str) -> Result<FormRecord, GatewayError>;
}
