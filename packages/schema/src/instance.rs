//! Element instances: one placed field in one form.

use crate::attributes::ExtraAttributes;
use crate::id::ElementId;
use crate::kind::ElementKind;
use serde::{Deserialize, Serialize};

/// One concrete field placed in a form, with a stable id and type-specific
/// configuration.
///
/// Serializes to the persisted shape
/// `{"id": ..., "type": ..., "extraAttributes": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInstance {
    pub id: ElementId,
    #[serde(flatten)]
    pub attributes: ExtraAttributes,
}

impl ElementInstance {
    pub fn kind(&self) -> ElementKind {
        self.attributes.kind()
    }

    /// Whether `candidate` satisfies this instance's constraints.
    ///
    /// Pure predicate: never errors, returns `false` when a required value
    /// is absent. Layout kinds accept anything.
    pub fn validate(&self, candidate: &str) -> bool {
        match &self.attributes {
            ExtraAttributes::TitleField(_)
            | ExtraAttributes::SubTitleField(_)
            | ExtraAttributes::ParagraphField(_)
            | ExtraAttributes::SeparatorField(_)
            | ExtraAttributes::SpacerField(_) => true,

            ExtraAttributes::TextField(a) => !a.required || !candidate.trim().is_empty(),
            ExtraAttributes::TextAreaField(a) => !a.required || !candidate.trim().is_empty(),
            ExtraAttributes::DateField(a) => !a.required || !candidate.trim().is_empty(),
            ExtraAttributes::SelectField(a) => !a.required || !candidate.trim().is_empty(),
            ExtraAttributes::ExpandableSelectField(a) => {
                !a.required || !candidate.trim().is_empty()
            }

            // Non-empty numeric inputs must actually parse.
            ExtraAttributes::NumberField(a) => {
                if candidate.trim().is_empty() {
                    !a.required
                } else {
                    candidate.trim().parse::<f64>().is_ok()
                }
            }

            // A required checkbox must be checked.
            ExtraAttributes::CheckboxField(a) => !a.required || candidate == "true",
        }
    }
}
