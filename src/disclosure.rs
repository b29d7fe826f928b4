//! Consent-based disclosure of locker documents to requesting departments.

pub mod engine;
pub mod service;

use thiserror::Error;

pub use engine::{ConsentFlow, ConsentState, ReviewSession};
pub use service::DisclosureService;

/// Errors raised while walking a disclosure request.
///
/// All of them are local to the consent flow: the state machine is left
/// exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsentError {
    #[error("select at least one document")]
    NoDocumentSelected,

    #[error("no pending disclosure request '{0}'")]
    UnknownRequest(String),

    #[error("document '{0}' is not part of this request")]
    UnknownDocument(String),

    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("consent duration must be 15, 30, 45 or 60 days, got {0}")]
    InvalidDuration(u32),
}
