use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::disclosure::ConsentError;

/// How pressing a department marks its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
}

/// One document a department asks to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedDocument {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// The department will not accept the request without this document.
    #[serde(default)]
    pub required: bool,
}

/// A pending ask from a department to view some of the user's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureRequest {
    pub id: String,
    pub department: String,
    pub purpose: String,
    pub request_date: NaiveDate,
    #[serde(default)]
    pub urgency: Urgency,
    pub requested_documents: Vec<RequestedDocument>,
}

impl DisclosureRequest {
    /// Ids of the documents the department insists on.
    pub fn required_ids(&self) -> BTreeSet<String> {
        self.requested_documents
            .iter()
            .filter(|d| d.required)
            .map(|d| d.id.clone())
            .collect()
    }

    pub fn requested(&self, document_id: &str) -> Option<&RequestedDocument> {
        self.requested_documents.iter().find(|d| d.id == document_id)
    }
}

/// How long a department may view the shared documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ConsentDuration {
    Days15,
    #[default]
    Days30,
    Days45,
    Days60,
}

impl ConsentDuration {
    pub const ALL: [ConsentDuration; 4] = [
        ConsentDuration::Days15,
        ConsentDuration::Days30,
        ConsentDuration::Days45,
        ConsentDuration::Days60,
    ];

    pub fn days(self) -> u32 {
        match self {
            ConsentDuration::Days15 => 15,
            ConsentDuration::Days30 => 30,
            ConsentDuration::Days45 => 45,
            ConsentDuration::Days60 => 60,
        }
    }
}

impl TryFrom<u32> for ConsentDuration {
    type Error = ConsentError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        ConsentDuration::ALL
            .into_iter()
            .find(|d| d.days() == days)
            .ok_or(ConsentError::InvalidDuration(days))
    }
}

impl From<ConsentDuration> for u32 {
    fn from(duration: ConsentDuration) -> Self {
        duration.days()
    }
}

impl fmt::Display for ConsentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// The user's recorded decision to share documents with a department.
///
/// Only [`ConsentGrant::new`] builds one, so every grant shares at least one
/// document and includes every document the request marked as required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentGrant {
    request_id: String,
    department: String,
    documents: Vec<RequestedDocument>,
    duration: ConsentDuration,
    granted_date: NaiveDate,
    expiry_date: NaiveDate,
}

impl ConsentGrant {
    /// Build a grant for `request` sharing the documents whose ids are in
    /// `selection`, kept in the order the department listed them.
    pub fn new(
        request: &DisclosureRequest,
        selection: &BTreeSet<String>,
        duration: ConsentDuration,
        granted_date: NaiveDate,
    ) -> Result<Self, ConsentError> {
        let documents: Vec<RequestedDocument> = request
            .requested_documents
            .iter()
            .filter(|d| d.required || selection.contains(&d.id))
            .cloned()
            .collect();

        if documents.is_empty() {
            return Err(ConsentError::NoDocumentSelected);
        }

        let expiry_date = granted_date
            .checked_add_days(Days::new(u64::from(duration.days())))
            .ok_or(ConsentError::InvalidDuration(duration.days()))?;

        Ok(Self {
            request_id: request.id.clone(),
            department: request.department.clone(),
            documents,
            duration,
            granted_date,
            expiry_date,
        })
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn documents(&self) -> &[RequestedDocument] {
        &self.documents
    }

    pub fn duration(&self) -> ConsentDuration {
        self.duration
    }

    pub fn granted_date(&self) -> NaiveDate {
        self.granted_date
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }
}
