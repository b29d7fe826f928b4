//! The government-service wizards that feed the locker.
//!
//! Only their boundary lives here: what each one writes through
//! [`DocumentRegistry::add_document`](crate::registry::DocumentRegistry::add_document)
//! once its (simulated) submission succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::document::{Document, NewDocument};
use crate::registry::DocumentRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GovernmentService {
    BirthCertificate,
    PassportApplication,
    PoliceRecord,
}

impl GovernmentService {
    pub const ALL: [GovernmentService; 3] = [
        GovernmentService::BirthCertificate,
        GovernmentService::PassportApplication,
        GovernmentService::PoliceRecord,
    ];

    /// Two-letter prefix of the service's transaction numbers.
    pub fn code(self) -> &'static str {
        match self {
            GovernmentService::BirthCertificate => "BC",
            GovernmentService::PassportApplication => "PA",
            GovernmentService::PoliceRecord => "PR",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            GovernmentService::BirthCertificate => "birth-certificate",
            GovernmentService::PassportApplication => "passport-application",
            GovernmentService::PoliceRecord => "police-record",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|svc| svc.slug() == s)
    }

    pub fn document_title(self) -> &'static str {
        match self {
            GovernmentService::BirthCertificate => "Birth Certificate",
            GovernmentService::PassportApplication => "Passport",
            GovernmentService::PoliceRecord => "Police Record Certificate",
        }
    }

    pub fn issuer(self) -> &'static str {
        match self {
            GovernmentService::BirthCertificate => "Registrar General's Office",
            GovernmentService::PassportApplication => "Passport and Immigration Office",
            GovernmentService::PoliceRecord => "Police Records Bureau",
        }
    }

    fn description(self) -> &'static str {
        match self {
            GovernmentService::BirthCertificate => "Certified copy of birth registration",
            GovernmentService::PassportApplication => "Machine-readable travel document",
            GovernmentService::PoliceRecord => "Certificate of character from the national police",
        }
    }

    /// The registry input this service submits for transaction `reference`.
    pub fn document(self, reference: impl Into<String>) -> NewDocument {
        NewDocument::new(self.document_title())
            .issuer(self.issuer())
            .description(self.description())
            .reference_number(reference)
    }

    /// Complete the service at `now` and file the resulting document.
    pub async fn issue(
        self,
        registry: &DocumentRegistry,
        now: DateTime<Utc>,
    ) -> Result<Document, AppError> {
        let reference = service_reference_number(self.code(), now);
        registry.add_document(self.document(reference)).await
    }
}

/// Service code followed by the last six digits of the millisecond timestamp,
/// e.g. `BC123456`.
pub fn service_reference_number(code: &str, now: DateTime<Utc>) -> String {
    format!("{}{:06}", code, now.timestamp_millis().rem_euclid(1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::db::repository::InMemoryDocumentRepository;
    use crate::models::document::DocumentCategory;
    use chrono::{NaiveDate, TimeZone};
    use std::sync::Arc;

    #[test]
    fn test_reference_number_format() {
        let now = Utc.timestamp_millis_opt(1_717_236_123_456).unwrap();
        assert_eq!(service_reference_number("BC", now), "BC123456");
    }

    #[test]
    fn test_reference_number_pads_to_six_digits() {
        let now = Utc.timestamp_millis_opt(1_717_000_000_042).unwrap();
        assert_eq!(service_reference_number("PR", now), "PR000042");
    }

    #[test]
    fn test_slug_roundtrip() {
        for svc in GovernmentService::ALL {
            assert_eq!(GovernmentService::from_slug(svc.slug()), Some(svc));
        }
        assert_eq!(GovernmentService::from_slug("taxi-booking"), None);
    }

    #[tokio::test]
    async fn test_issue_files_verified_document() {
        let registry = DocumentRegistry::new(
            Arc::new(InMemoryDocumentRepository::new()),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())),
        );
        let now = Utc.timestamp_millis_opt(1_717_236_654_321).unwrap();

        let doc = GovernmentService::PoliceRecord.issue(&registry, now).await.unwrap();
        assert_eq!(doc.title(), "Police Record Certificate");
        assert_eq!(doc.issuer(), "Police Records Bureau");
        assert_eq!(doc.service_reference_number(), Some("PR654321"));
        assert_eq!(doc.category(), DocumentCategory::Government);
        assert!(doc.verified());
    }
}
