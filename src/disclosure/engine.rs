//! Consent state machine.
//!
//! `Listing → Reviewing → (deny → Listing) | (grant → Granted) → Closed`.
//! One request is reviewed at a time; every transition is an explicit method
//! that either succeeds or leaves the state untouched.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use super::ConsentError;
use crate::models::disclosure::{ConsentDuration, ConsentGrant, DisclosureRequest};

/// The user's in-progress answer to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSession {
    request: DisclosureRequest,
    selected: BTreeSet<String>,
    duration: ConsentDuration,
}

impl ReviewSession {
    /// Required documents start selected, optional ones unselected.
    fn new(request: DisclosureRequest) -> Self {
        Self {
            selected: request.required_ids(),
            request,
            duration: ConsentDuration::default(),
        }
    }

    pub fn request(&self) -> &DisclosureRequest {
        &self.request
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, document_id: &str) -> bool {
        self.selected.contains(document_id)
    }

    pub fn duration(&self) -> ConsentDuration {
        self.duration
    }
}

/// Where the consent flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConsentState {
    /// Showing all pending requests.
    Listing,
    /// One request is open and being answered.
    Reviewing(ReviewSession),
    /// Consent was given; the summary is on screen.
    Granted(ConsentGrant),
    /// The summary was acknowledged and the request is gone.
    Closed,
}

impl ConsentState {
    pub fn name(&self) -> &'static str {
        match self {
            ConsentState::Listing => "listing",
            ConsentState::Reviewing(_) => "reviewing",
            ConsentState::Granted(_) => "granted",
            ConsentState::Closed => "closed",
        }
    }
}

/// Pending disclosure requests and the single consent decision in progress.
#[derive(Debug, Clone)]
pub struct ConsentFlow {
    pending: Vec<DisclosureRequest>,
    state: ConsentState,
}

impl ConsentFlow {
    pub fn new(pending: Vec<DisclosureRequest>) -> Self {
        Self {
            pending,
            state: ConsentState::Listing,
        }
    }

    pub fn pending(&self) -> &[DisclosureRequest] {
        &self.pending
    }

    pub fn state(&self) -> &ConsentState {
        &self.state
    }

    /// Open a pending request for review.
    pub fn review(&mut self, request_id: &str) -> Result<(), ConsentError> {
        if !matches!(self.state, ConsentState::Listing | ConsentState::Closed) {
            return Err(self.invalid("review a request"));
        }

        let request = self
            .pending
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
            .ok_or_else(|| ConsentError::UnknownRequest(request_id.to_string()))?;

        self.state = ConsentState::Reviewing(ReviewSession::new(request));
        Ok(())
    }

    /// Flip whether an optional document is shared.
    ///
    /// Required documents stay selected whatever happens. Returns whether the
    /// document is selected after the call.
    pub fn toggle(&mut self, document_id: &str) -> Result<bool, ConsentError> {
        let session = self.reviewing_mut("toggle a document")?;
        let required = session
            .request
            .requested(document_id)
            .map(|d| d.required)
            .ok_or_else(|| ConsentError::UnknownDocument(document_id.to_string()))?;

        if required {
            return Ok(true);
        }
        if session.selected.remove(document_id) {
            Ok(false)
        } else {
            session.selected.insert(document_id.to_string());
            Ok(true)
        }
    }

    pub fn set_duration(&mut self, duration: ConsentDuration) -> Result<(), ConsentError> {
        self.reviewing_mut("change the duration")?.duration = duration;
        Ok(())
    }

    /// Close the review without deciding. The request stays pending.
    pub fn back(&mut self) -> Result<(), ConsentError> {
        self.reviewing_mut("go back")?;
        self.state = ConsentState::Listing;
        Ok(())
    }

    /// Refuse the request under review. It is dropped without a trace.
    pub fn deny(&mut self) -> Result<DisclosureRequest, ConsentError> {
        let request_id = self.reviewing_mut("deny")?.request.id.clone();
        let position = self
            .pending
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| ConsentError::UnknownRequest(request_id.clone()))?;

        let denied = self.pending.remove(position);
        self.state = ConsentState::Listing;
        Ok(denied)
    }

    /// Consent to the current selection, starting `today`.
    ///
    /// An empty selection is refused and the review stays open unchanged.
    pub fn grant(&mut self, today: NaiveDate) -> Result<ConsentGrant, ConsentError> {
        let session = self.reviewing_mut("grant")?;
        if session.selected.is_empty() {
            return Err(ConsentError::NoDocumentSelected);
        }

        let grant = ConsentGrant::new(&session.request, &session.selected, session.duration, today)?;
        self.state = ConsentState::Granted(grant.clone());
        Ok(grant)
    }

    /// Dismiss the grant summary and retire the request.
    pub fn acknowledge(&mut self) -> Result<ConsentGrant, ConsentError> {
        let ConsentState::Granted(grant) = &self.state else {
            return Err(self.invalid("acknowledge"));
        };

        let grant = grant.clone();
        self.pending.retain(|r| r.id != grant.request_id());
        self.state = ConsentState::Closed;
        Ok(grant)
    }

    fn reviewing_mut(&mut self, operation: &'static str) -> Result<&mut ReviewSession, ConsentError> {
        let state = self.state.name();
        match &mut self.state {
            ConsentState::Reviewing(session) => Ok(session),
            _ => Err(ConsentError::InvalidTransition { operation, state }),
        }
    }

    fn invalid(&self, operation: &'static str) -> ConsentError {
        ConsentError::InvalidTransition {
            operation,
            state: self.state.name(),
        }
    }
}
