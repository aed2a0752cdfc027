//! Form domain layer
//!
//! Prompt input fields and the sequential request/order workflow.

mod field;
mod request_workflow;

pub use field::FormField;
pub use request_workflow::{RequestWorkflow, WorkflowStep};
