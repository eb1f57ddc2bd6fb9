//! The element type registry.
//!
//! The registry is a closed enum rather than a runtime dictionary: every
//! supported kind is a variant, every dispatch is an exhaustive `match`.
//! The only string-keyed entry point is [`ElementKind::from_tag`], used when
//! loading persisted forms; an unrecognized tag there means a stale form
//! references a removed kind, which is a configuration bug and propagates as
//! [`UnknownTypeError`] rather than being handled at runtime.

use crate::attributes::ExtraAttributes;
use crate::id::ElementId;
use crate::instance::ElementInstance;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lookup of a type tag that is not registered.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown element type tag: {0}")]
pub struct UnknownTypeError(pub String);

/// One registered kind of form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    TextField,
    TitleField,
    SubTitleField,
    ParagraphField,
    SeparatorField,
    SpacerField,
    NumberField,
    TextAreaField,
    DateField,
    SelectField,
    ExpandableSelectField,
    CheckboxField,
}

impl ElementKind {
    /// Every registered kind, in palette order.
    pub const ALL: [ElementKind; 12] = [
        ElementKind::TitleField,
        ElementKind::SubTitleField,
        ElementKind::ParagraphField,
        ElementKind::SeparatorField,
        ElementKind::SpacerField,
        ElementKind::TextField,
        ElementKind::NumberField,
        ElementKind::TextAreaField,
        ElementKind::DateField,
        ElementKind::SelectField,
        ElementKind::ExpandableSelectField,
        ElementKind::CheckboxField,
    ];

    /// Stable wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::TextField => "TextField",
            ElementKind::TitleField => "TitleField",
            ElementKind::SubTitleField => "SubTitleField",
            ElementKind::ParagraphField => "ParagraphField",
            ElementKind::SeparatorField => "SeparatorField",
            ElementKind::SpacerField => "SpacerField",
            ElementKind::NumberField => "NumberField",
            ElementKind::TextAreaField => "TextAreaField",
            ElementKind::DateField => "DateField",
            ElementKind::SelectField => "SelectField",
            ElementKind::ExpandableSelectField => "ExpandableSelectField",
            ElementKind::CheckboxField => "CheckboxField",
        }
    }

    /// Resolve a persisted type tag.
    pub fn from_tag(tag: &str) -> Result<ElementKind, UnknownTypeError> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownTypeError(tag.to_string()))
    }

    /// Construct a fresh instance with this kind's default attributes.
    ///
    /// Deterministic apart from the injected id.
    pub fn construct(&self, id: ElementId) -> ElementInstance {
        ElementInstance {
            id,
            attributes: ExtraAttributes::defaults(*self),
        }
    }

    /// Sidebar palette icon name.
    pub fn palette_icon(&self) -> &'static str {
        match self {
            ElementKind::TextField => "text-cursor-input",
            ElementKind::TitleField => "heading-1",
            ElementKind::SubTitleField => "heading-2",
            ElementKind::ParagraphField => "text",
            ElementKind::SeparatorField => "separator-horizontal",
            ElementKind::SpacerField => "move-vertical",
            ElementKind::NumberField => "hash",
            ElementKind::TextAreaField => "scroll-text",
            ElementKind::DateField => "calendar-days",
            ElementKind::SelectField => "chevrons-up-down",
            ElementKind::ExpandableSelectField => "list-tree",
            ElementKind::CheckboxField => "square-check",
        }
    }

    /// Sidebar palette label.
    pub fn palette_label(&self) -> &'static str {
        match self {
            ElementKind::TextField => "Text field",
            ElementKind::TitleField => "Title",
            ElementKind::SubTitleField => "Subtitle",
            ElementKind::ParagraphField => "Paragraph",
            ElementKind::SeparatorField => "Separator",
            ElementKind::SpacerField => "Spacer",
            ElementKind::NumberField => "Number field",
            ElementKind::TextAreaField => "Text area",
            ElementKind::DateField => "Date field",
            ElementKind::SelectField => "Select field",
            ElementKind::ExpandableSelectField => "Expandable select",
            ElementKind::CheckboxField => "Checkbox",
        }
    }

    /// Layout-only kinds never take a submission value.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            ElementKind::TitleField
                | ElementKind::SubTitleField
                | ElementKind::ParagraphField
                | ElementKind::SeparatorField
                | ElementKind::SpacerField
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
