//! Derived render views.
//!
//! Every kind renders in three contexts: the designer canvas preview, the
//! live form, and the properties panel. The output is a declarative
//! [`RenderNode`] tree the UI shell turns into widgets; exact layout is the
//! shell's business, not ours.

use crate::attributes::ExtraAttributes;
use crate::instance::ElementInstance;
use serde::Serialize;
use serde_json::{json, Value};

/// Context a render is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderVariant {
    /// Read-only preview on the designer canvas.
    DesignerPreview,
    /// Interactive input in the published form.
    LiveForm,
    /// Editing form shown in the properties panel.
    PropertiesPanel,
}

/// Widget for editing one property in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyControl {
    TextInput,
    LongTextInput,
    NumberInput,
    Toggle,
    OptionList,
}

/// One editable property with its current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyField {
    pub name: &'static str,
    pub control: PropertyControl,
    pub value: Value,
}

/// Declarative render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum RenderNode {
    Stack { children: Vec<RenderNode> },
    Label { text: String, required: bool },
    HelperText { text: String },
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    Divider,
    Gap { height: u32 },
    TextInput { placeholder: String, rows: u32, interactive: bool },
    NumberInput { placeholder: String, interactive: bool },
    DatePicker { interactive: bool },
    SelectInput { placeholder: String, options: Vec<String>, searchable: bool, interactive: bool },
    Checkbox { label: String, interactive: bool },
    PropertiesForm { fields: Vec<PropertyField> },
}

impl ElementInstance {
    /// Render this instance for the given context.
    pub fn render(&self, variant: RenderVariant) -> RenderNode {
        match variant {
            RenderVariant::PropertiesPanel => RenderNode::PropertiesForm {
                fields: property_fields(&self.attributes),
            },
            RenderVariant::DesignerPreview => render_field(&self.attributes, false),
            RenderVariant::LiveForm => render_field(&self.attributes, true),
        }
    }
}

fn render_field(attributes: &ExtraAttributes, interactive: bool) -> RenderNode {
    match attributes {
        ExtraAttributes::TitleField(a) => RenderNode::Heading {
            text: a.title.clone(),
            level: 1,
        },
        ExtraAttributes::SubTitleField(a) => RenderNode::Heading {
            text: a.title.clone(),
            level: 2,
        },
        ExtraAttributes::ParagraphField(a) => RenderNode::Paragraph {
            text: a.text.clone(),
        },
        ExtraAttributes::SeparatorField(_) => RenderNode::Divider,
        ExtraAttributes::SpacerField(a) => RenderNode::Gap { height: a.height },

        ExtraAttributes::TextField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::TextInput {
                placeholder: a.placeholder.clone(),
                rows: 1,
                interactive,
            },
        ),
        ExtraAttributes::TextAreaField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::TextInput {
                placeholder: a.placeholder.clone(),
                rows: a.rows,
                interactive,
            },
        ),
        ExtraAttributes::NumberField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::NumberInput {
                placeholder: a.placeholder.clone(),
                interactive,
            },
        ),
        ExtraAttributes::DateField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::DatePicker { interactive },
        ),
        ExtraAttributes::SelectField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::SelectInput {
                placeholder: a.placeholder.clone(),
                options: a.options.iter().map(|o| o.value.clone()).collect(),
                searchable: false,
                interactive,
            },
        ),
        ExtraAttributes::ExpandableSelectField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::SelectInput {
                placeholder: a.placeholder.clone(),
                options: a.options.iter().map(|o| o.value.clone()).collect(),
                searchable: true,
                interactive,
            },
        ),
        ExtraAttributes::CheckboxField(a) => labelled(
            &a.label,
            a.required,
            &a.helper_text,
            RenderNode::Checkbox {
                label: a.label.clone(),
                interactive,
            },
        ),
    }
}

fn labelled(label: &str, required: bool, helper: &str, input: RenderNode) -> RenderNode {
    let mut children = vec![
        RenderNode::Label {
            text: label.to_string(),
            required,
        },
        input,
    ];
    if !helper.is_empty() {
        children.push(RenderNode::HelperText {
            text: helper.to_string(),
        });
    }
    RenderNode::Stack { children }
}

fn property_fields(attributes: &ExtraAttributes) -> Vec<PropertyField> {
    use PropertyControl::*;

    fn field(name: &'static str, control: PropertyControl, value: Value) -> PropertyField {
        PropertyField {
            name,
            control,
            value,
        }
    }

    match attributes {
        ExtraAttributes::TitleField(a) => vec![field("title", TextInput, json!(a.title))],
        ExtraAttributes::SubTitleField(a) => vec![field("title", TextInput, json!(a.title))],
        ExtraAttributes::ParagraphField(a) => vec![field("text", LongTextInput, json!(a.text))],
        ExtraAttributes::SeparatorField(_) => vec![],
        ExtraAttributes::SpacerField(a) => vec![field("height", NumberInput, json!(a.height))],

        ExtraAttributes::TextField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("placeholder", TextInput, json!(a.placeholder)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::NumberField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("placeholder", TextInput, json!(a.placeholder)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::TextAreaField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("placeholder", TextInput, json!(a.placeholder)),
            field("rows", NumberInput, json!(a.rows)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::DateField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::SelectField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("placeholder", TextInput, json!(a.placeholder)),
            field("options", OptionList, json!(a.options)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::ExpandableSelectField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("placeholder", TextInput, json!(a.placeholder)),
            field("searchPlaceholder", TextInput, json!(a.search_placeholder)),
            field("options", OptionList, json!(a.options)),
            field("required", Toggle, json!(a.required)),
        ],
        ExtraAttributes::CheckboxField(a) => vec![
            field("label", TextInput, json!(a.label)),
            field("helperText", LongTextInput, json!(a.helper_text)),
            field("required", Toggle, json!(a.required)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{IdGenerator, SequentialIds};
    use crate::kind::ElementKind;

    #[test]
    fn every_kind_renders_in_every_variant() {
        let mut ids = SequentialIds::new();
        for kind in ElementKind::ALL {
            let instance = kind.construct(ids.fresh());
            for variant in [
                RenderVariant::DesignerPreview,
                RenderVariant::LiveForm,
                RenderVariant::PropertiesPanel,
            ] {
                // Render must be total over kinds; panics here are registry bugs.
                let _ = instance.render(variant);
            }
        }
    }

    #[test]
    fn preview_inputs_are_not_interactive() {
        let mut ids = SequentialIds::new();
        let instance = ElementKind::TextField.construct(ids.fresh());

        match instance.render(RenderVariant::DesignerPreview) {
            RenderNode::Stack { children } => match &children[1] {
                RenderNode::TextInput { interactive, .. } => assert!(!interactive),
                other => panic!("unexpected input node: {other:?}"),
            },
            other => panic!("unexpected root node: {other:?}"),
        }
    }

    #[test]
    fn properties_form_exposes_current_values() {
        let mut ids = SequentialIds::new();
        let instance = ElementKind::SpacerField.construct(ids.fresh());

        match instance.render(RenderVariant::PropertiesPanel) {
            RenderNode::PropertiesForm { fields } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].name, "height");
                assert_eq!(fields[0].value, json!(20));
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn separator_has_an_empty_properties_form() {
        let mut ids = SequentialIds::new();
        let instance = ElementKind::SeparatorField.construct(ids.fresh());
        match instance.render(RenderVariant::PropertiesPanel) {
            RenderNode::PropertiesForm { fields } => assert!(fields.is_empty()),
            other => panic!("unexpected node: {other:?}"),
        }
    }
}
