//! In-memory gateway, for tests and temp sessions.

use crate::gateway::{FormGateway, FormRecord, GatewayError, PublishAction};
use formstudio_schema::ElementInstance;
use std::collections::HashMap;

/// Memory-backed form store with failure injection for error-path tests.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    forms: HashMap<String, FormRecord>,
    fail_next_save: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a persisted form.
    pub fn with_form(mut self, record: FormRecord) -> Self {
        self.forms.insert(record.id.clone(), record);
        self
    }

    /// Make the next `save_form` call fail with a backend error.
    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    pub fn record(&self, form_id: &str) -> Option<&FormRecord> {
        self.forms.get(form_id)
    }
}

impl FormGateway for MemoryGateway {
    fn save_form(
        &mut self,
        form_id: &str,
        elements: &[ElementInstance],
    ) -> Result<(), GatewayError> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(GatewayError::Backend("injected save failure".to_string()));
        }

        let content = serde_json::to_string(elements)?;
        self.forms
            .entry(form_id.to_string())
            .and_modify(|record| record.content = content.clone())
            .or_insert_with(|| FormRecord {
                id: form_id.to_string(),
                name: "Untitled form".to_string(),
                published: false,
                content,
            });
        Ok(())
    }

    fn set_published(&mut self, form_id: &str, action: PublishAction) -> Result<(), GatewayError> {
        let record = self
            .forms
            .get_mut(form_id)
            .ok_or_else(|| GatewayError::NotFound(form_id.to_string()))?;
        record.published = matches!(action, PublishAction::Publish);
        Ok(())
    }

    fn fetch_form(&self, form_id: &str) -> Result<FormRecord, GatewayError> {
        self.forms
            .get(form_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(form_id.to_string()))
    }
}
