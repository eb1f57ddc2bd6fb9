//! Element identifiers and the id-generation seam.
//!
//! Documents never mint their own ids: every new element gets its id from an
//! injected [`IdGenerator`], which guarantees uniqueness. Ids are stable for
//! the lifetime of an instance and never reused after deletion.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one element instance, unique within a form document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Source of fresh, collision-free element ids.
pub trait IdGenerator {
    fn fresh(&mut self) -> ElementId;
}

/// Random v4 uuid ids (production default).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn fresh(&mut self) -> ElementId {
        ElementId(Uuid::new_v4().to_string())
    }
}

/// Deterministic counter ids ("el-0", "el-1", ...) for tests and tooling.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn fresh(&mut self) -> ElementId {
        let id = ElementId(format!("el-{}", self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_distinct_and_ordered() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.fresh().as_str(), "el-0");
        assert_eq!(ids.fresh().as_str(), "el-1");
    }

    #[test]
    fn uuid_ids_do_not_collide() {
        let mut ids = UuidIds;
        let a = ids.fresh();
        let b = ids.fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn element_id_serializes_transparently() {
        let id = ElementId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
