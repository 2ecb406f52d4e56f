//! Field-definition data model: the form config, its fields, their
//! visibility conditions and the builder's draft factory.
pub mod condition;
pub mod draft;
pub mod field;

// --- Re-exports ---
pub use condition::{Comparison, Condition, Operator};
pub use draft::{DraftError, FieldDraft};
pub use field::{FieldDefinition, FieldType, FormConfig};
