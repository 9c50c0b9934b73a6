//! AI feature prioritization.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`FeatureForm::to_request`] coerces raw form input and validates it into
//!    a [`PrioritizationRequest`](crate::models::PrioritizationRequest).
//! 2. [`ScoringOracle::score`] renders the RICE prompt, makes one call to the
//!    language model, and strictly parses the answer.
//! 3. [`present`] turns the resulting [`ScoringStatus`] into what the result
//!    panel shows, keeping the oracle's row order.

mod form;
mod oracle;
mod present;
pub mod prompt;
mod status;
pub mod validation;

pub use form::*;
pub use oracle::*;
pub use present::*;
pub use status::*;
pub use validation::{ValidationError, ValidationErrors};
