//! Priority stack placeholder.
//!
//! Pending effects are pushed onto a stack and popped in LIFO order. No
//! entry is ever executed; the stack only records what is waiting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry kind used when a pushed entry names none.
pub const GENERIC_KIND: &str = "generic";

/// Unique identifier for a stack entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackEntryId(pub u32);

impl StackEntryId {
    /// Create a new stack entry ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackEntry({})", self.0)
    }
}

/// An entry on the stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: StackEntryId,

    /// Free-form entry kind.
    #[serde(rename = "type")]
    pub kind: String,

    /// Opaque entry data.
    #[serde(default)]
    pub payload: Value,
}

/// LIFO stack of pending entries.
///
/// ```
/// use kudurru_rules::stack::PriorityStack;
/// use serde_json::json;
///
/// let mut stack = PriorityStack::new();
/// stack.push("trigger", json!({ "card": 2 }));
/// stack.push("response", json!(null));
///
/// assert_eq!(stack.pop().map(|e| e.kind), Some("response".to_string()));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityStack {
    /// Index 0 = bottom, last = top.
    entries: Vec<StackEntry>,

    /// Next stack entry ID.
    next_id: u32,
}

impl PriorityStack {
    /// Create an empty stack. IDs start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry, returning its ID.
    pub fn push(&mut self, kind: impl Into<String>, payload: Value) -> StackEntryId {
        self.next_id += 1;
        let id = StackEntryId::new(self.next_id);
        self.entries.push(StackEntry {
            id,
            kind: kind.into(),
            payload,
        });
        id
    }

    /// Push an entry in its JSON wire form: `{"type": ..., ...}`.
    ///
    /// The `type` field (default `"generic"`) becomes the kind; every other
    /// field is kept as the payload object. A non-object value becomes the
    /// payload of a generic entry.
    pub fn push_json(&mut self, entry: Value) -> StackEntryId {
        match entry {
            Value::Object(mut fields) => {
                let kind = match fields.remove("type") {
                    Some(Value::String(kind)) => kind,
                    _ => GENERIC_KIND.to_string(),
                };
                fields.remove("id");
                self.push(kind, Value::Object(fields))
            }
            Value::Null => self.push(GENERIC_KIND, Value::Object(Map::new())),
            other => self.push(GENERIC_KIND, other),
        }
    }

    /// Remove and return the most recently pushed entry.
    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    /// Get the top entry without removing it.
    #[must_use]
    pub fn peek_top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// All entries, bottom first.
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and restart IDs.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 0;
    }
}
