//! Typed per-kind element configuration.
//!
//! Each element kind carries its own attribute struct behind the
//! [`ExtraAttributes`] enum, which serializes to the persisted shape
//! `{"type": "<tag>", "extraAttributes": {...}}`. The bounds enforced by
//! [`ExtraAttributes::validate_schema`] are the properties-form schema: an
//! edit that violates them is rejected wholesale, never partially written.

use crate::kind::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label length cap shared by all labelled kinds.
const LABEL_MAX: usize = 50;
/// Helper-text length cap.
const HELPER_MAX: usize = 200;

/// One option in a select or expandable-select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: String,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            label: "Text field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleAttributes {
    pub title: String,
}

impl Default for TitleAttributes {
    fn default() -> Self {
        Self {
            title: "Title field".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTitleAttributes {
    pub title: String,
}

impl Default for SubTitleAttributes {
    fn default() -> Self {
        Self {
            title: "SubTitle field".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAttributes {
    pub text: String,
}

impl Default for ParagraphAttributes {
    fn default() -> Self {
        Self {
            text: "Text here".to_string(),
        }
    }
}

/// Separator has no configuration; the empty struct keeps the persisted
/// `extraAttributes: {}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparatorAttributes {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerAttributes {
    /// Vertical gap in pixels.
    pub height: u32,
}

impl Default for SpacerAttributes {
    fn default() -> Self {
        Self { height: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: String,
}

impl Default for NumberAttributes {
    fn default() -> Self {
        Self {
            label: "Number field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAreaAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: String,
    pub rows: u32,
}

impl Default for TextAreaAttributes {
    fn default() -> Self {
        Self {
            label: "Text area".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
            rows: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
}

impl Default for DateAttributes {
    fn default() -> Self {
        Self {
            label: "Date field".to_string(),
            helper_text: "Pick a date".to_string(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl Default for SelectAttributes {
    fn default() -> Self {
        Self {
            label: "Select field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandableSelectAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: String,
    pub search_placeholder: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl Default for ExpandableSelectAttributes {
    fn default() -> Self {
        Self {
            label: "Expandable select".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            placeholder: "Pick an option...".to_string(),
            search_placeholder: "Search...".to_string(),
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxAttributes {
    pub label: String,
    pub helper_text: String,
    #[serde(default)]
    pub required: bool,
}

impl Default for CheckboxAttributes {
    fn default() -> Self {
        Self {
            label: "Checkbox field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
        }
    }
}

/// Type-specific configuration bag of one element instance.
///
/// The variant tag doubles as the element's wire type, so an
/// `ElementInstance` flattening this enum serializes to
/// `{"id", "type", "extraAttributes"}` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "extraAttributes")]
pub enum ExtraAttributes {
    TextField(TextAttributes),
    TitleField(TitleAttributes),
    SubTitleField(SubTitleAttributes),
    ParagraphField(ParagraphAttributes),
    SeparatorField(SeparatorAttributes),
    SpacerField(SpacerAttributes),
    NumberField(NumberAttributes),
    TextAreaField(TextAreaAttributes),
    DateField(DateAttributes),
    SelectField(SelectAttributes),
    ExpandableSelectField(ExpandableSelectAttributes),
    CheckboxField(CheckboxAttributes),
}

/// One rejected field from a properties-form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ExtraAttributes {
    /// Kind this configuration belongs to.
    pub fn kind(&self) -> ElementKind {
        match self {
            ExtraAttributes::TextField(_) => ElementKind::TextField,
            ExtraAttributes::TitleField(_) => ElementKind::TitleField,
            ExtraAttributes::SubTitleField(_) => ElementKind::SubTitleField,
            ExtraAttributes::ParagraphField(_) => ElementKind::ParagraphField,
            ExtraAttributes::SeparatorField(_) => ElementKind::SeparatorField,
            ExtraAttributes::SpacerField(_) => ElementKind::SpacerField,
            ExtraAttributes::NumberField(_) => ElementKind::NumberField,
            ExtraAttributes::TextAreaField(_) => ElementKind::TextAreaField,
            ExtraAttributes::DateField(_) => ElementKind::DateField,
            ExtraAttributes::SelectField(_) => ElementKind::SelectField,
            ExtraAttributes::ExpandableSelectField(_) => ElementKind::ExpandableSelectField,
            ExtraAttributes::CheckboxField(_) => ElementKind::CheckboxField,
        }
    }

    /// Default configuration for a kind. Deterministic: same kind, same
    /// shape, every time.
    pub fn defaults(kind: ElementKind) -> Self {
        match kind {
            ElementKind::TextField => ExtraAttributes::TextField(TextAttributes::default()),
            ElementKind::TitleField => ExtraAttributes::TitleField(TitleAttributes::default()),
            ElementKind::SubTitleField => {
                ExtraAttributes::SubTitleField(SubTitleAttributes::default())
            }
            ElementKind::ParagraphField => {
                ExtraAttributes::ParagraphField(ParagraphAttributes::default())
            }
            ElementKind::SeparatorField => {
                ExtraAttributes::SeparatorField(SeparatorAttributes::default())
            }
            ElementKind::SpacerField => ExtraAttributes::SpacerField(SpacerAttributes::default()),
            ElementKind::NumberField => ExtraAttributes::NumberField(NumberAttributes::default()),
            ElementKind::TextAreaField => {
                ExtraAttributes::TextAreaField(TextAreaAttributes::default())
            }
            ElementKind::DateField => ExtraAttributes::DateField(DateAttributes::default()),
            ElementKind::SelectField => ExtraAttributes::SelectField(SelectAttributes::default()),
            ElementKind::ExpandableSelectField => {
                ExtraAttributes::ExpandableSelectField(ExpandableSelectAttributes::default())
            }
            ElementKind::CheckboxField => {
                ExtraAttributes::CheckboxField(CheckboxAttributes::default())
            }
        }
    }

    /// Check this configuration against the properties-form schema.
    ///
    /// Collects every violation rather than stopping at the first, so the
    /// properties editor can show field-level messages.
    pub fn validate_schema(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        match self {
            ExtraAttributes::TextField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
            }
            ExtraAttributes::TitleField(a) => {
                check_text("title", &a.title, LABEL_MAX, &mut errors);
            }
            ExtraAttributes::SubTitleField(a) => {
                check_text("title", &a.title, LABEL_MAX, &mut errors);
            }
            ExtraAttributes::ParagraphField(a) => {
                check_text("text", &a.text, 500, &mut errors);
            }
            ExtraAttributes::SeparatorField(_) => {}
            ExtraAttributes::SpacerField(a) => {
                if !(5..=200).contains(&a.height) {
                    errors.push(FieldError::new("height", "must be between 5 and 200"));
                }
            }
            ExtraAttributes::NumberField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
            }
            ExtraAttributes::TextAreaField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
                if !(1..=10).contains(&a.rows) {
                    errors.push(FieldError::new("rows", "must be between 1 and 10"));
                }
            }
            ExtraAttributes::DateField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
            }
            ExtraAttributes::SelectField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
                check_options(&a.options, &mut errors);
            }
            ExtraAttributes::ExpandableSelectField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
                check_options(&a.options, &mut errors);
            }
            ExtraAttributes::CheckboxField(a) => {
                check_label(&a.label, &mut errors);
                check_helper(&a.helper_text, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_label(label: &str, errors: &mut Vec<FieldError>) {
    check_text("label", label, LABEL_MAX, errors);
}

fn check_helper(helper: &str, errors: &mut Vec<FieldError>) {
    if helper.chars().count() > HELPER_MAX {
        errors.push(FieldError::new(
            "helperText",
            format!("must be at most {HELPER_MAX} characters"),
        ));
    }
}

fn check_text(field: &'static str, value: &str, max: usize, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    } else if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

fn check_options(options: &[SelectOption], errors: &mut Vec<FieldError>) {
    if options.iter().any(|o| o.value.trim().is_empty()) {
        errors.push(FieldError::new("options", "option values must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_their_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(ExtraAttributes::defaults(kind).kind(), kind);
        }
    }

    #[test]
    fn defaults_pass_their_own_schema() {
        for kind in ElementKind::ALL {
            assert!(ExtraAttributes::defaults(kind).validate_schema().is_ok());
        }
    }

    #[test]
    fn empty_label_is_rejected() {
        let attrs = ExtraAttributes::TextField(TextAttributes {
            label: "   ".to_string(),
            ..TextAttributes::default()
        });
        let errors = attrs.validate_schema().unwrap_err();
        assert_eq!(errors[0].field, "label");
    }

    #[test]
    fn overlong_label_is_rejected() {
        let attrs = ExtraAttributes::TextField(TextAttributes {
            label: "x".repeat(51),
            ..TextAttributes::default()
        });
        assert!(attrs.validate_schema().is_err());
    }

    #[test]
    fn spacer_height_bounds() {
        let ok = ExtraAttributes::SpacerField(SpacerAttributes { height: 5 });
        assert!(ok.validate_schema().is_ok());

        let too_tall = ExtraAttributes::SpacerField(SpacerAttributes { height: 500 });
        let errors = too_tall.validate_schema().unwrap_err();
        assert_eq!(errors[0].field, "height");
    }

    #[test]
    fn textarea_rows_bounds() {
        let attrs = ExtraAttributes::TextAreaField(TextAreaAttributes {
            rows: 0,
            ..TextAreaAttributes::default()
        });
        assert!(attrs.validate_schema().is_err());
    }

    #[test]
    fn blank_option_values_are_rejected() {
        let attrs = ExtraAttributes::SelectField(SelectAttributes {
            options: vec![SelectOption::new("ok"), SelectOption::new("")],
            ..SelectAttributes::default()
        });
        let errors = attrs.validate_schema().unwrap_err();
        assert_eq!(errors[0].field, "options");
    }

    #[test]
    fn schema_errors_accumulate() {
        let attrs = ExtraAttributes::TextAreaField(TextAreaAttributes {
            label: String::new(),
            rows: 99,
            ..TextAreaAttributes::default()
        });
        let errors = attrs.validate_schema().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
