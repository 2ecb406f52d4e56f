//! Renderer-side logic: values, rule derivation and the live form session.
pub mod derive;
pub mod file;
pub mod rules;
pub mod session;
pub mod values;

// --- Re-exports ---
pub use rules::{FieldRules, Rule};
pub use session::{FieldState, FormSession, SubmitOutcome};
pub use values::{FieldValue, FileValue, FormValues};
