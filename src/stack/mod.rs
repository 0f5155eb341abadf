//! Pending-effect stack.
//!
//! A LIFO list of opaque entries awaiting resolution. Entries are recorded
//! and popped on request; nothing resolves automatically.

mod priority;

pub use priority::{PriorityStack, StackEntry, StackEntryId, GENERIC_KIND};
