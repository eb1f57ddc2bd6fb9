//! # Formstudio Schema
//!
//! Leaf data layer for the form designer: the closed set of element kinds,
//! their typed configuration, and the derived render views.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: element kinds + typed attributes    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ designer: form document + drag/drop + props │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ gateway: persistence seam + design session  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Closed registry**: element kinds are an enum, not a string-keyed
//!    dictionary — dispatch is exhaustive and checked at compile time.
//! 2. **Deterministic construction**: `ElementKind::construct` yields the
//!    same default attribute shape every time, apart from the injected id,
//!    so older saved forms stay structurally compatible.
//! 3. **Document is truth, render is a view**: `RenderNode` trees are
//!    derived, serializable, and carry no state of their own.

mod attributes;
mod id;
mod instance;
mod kind;
mod render;

pub use attributes::{
    CheckboxAttributes, DateAttributes, ExpandableSelectAttributes, ExtraAttributes, FieldError,
    NumberAttributes, ParagraphAttributes, SelectAttributes, SelectOption, SeparatorAttributes,
    SpacerAttributes, SubTitleAttributes, TextAreaAttributes, TextAttributes, TitleAttributes,
};
pub use id::{ElementId, IdGenerator, SequentialIds, UuidIds};
pub use instance::ElementInstance;
pub use kind::{ElementKind, UnknownTypeError};
pub use render::{PropertyControl, PropertyField, RenderNode, RenderVariant};
