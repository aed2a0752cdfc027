//! Application state module

mod app_state;
mod catalog;
mod forms;
mod gate;
mod records;

pub use app_state::*;
pub use catalog::{builtin_catalog, Product};
pub use forms::*;
pub use gate::{GateOutcome, ACCESS_DENIED_MESSAGE};
pub use records::{RequestDraft, RequestKind, RequestRecord};
