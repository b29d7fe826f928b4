use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Issuer recorded on government documents whose caller did not name one.
pub const DEFAULT_GOVERNMENT_ISSUER: &str = "Government of the Republic";
/// Classification recorded on government documents whose caller did not give one.
pub const DEFAULT_GOVERNMENT_TYPE: &str = "Government Document";
/// Issuer recorded on every user upload.
pub const USER_UPLOAD_ISSUER: &str = "User Upload";
/// Classification recorded on every user upload.
pub const PERSONAL_DOCUMENT_TYPE: &str = "Personal Document";

/// Where a document came from.
///
/// Government documents only enter the locker through the registry write API
/// and are always verified. Personal documents are user uploads and never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Government,
    Personal,
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentCategory::Government => write!(f, "government"),
            DocumentCategory::Personal => write!(f, "personal"),
        }
    }
}

impl DocumentCategory {
    /// Parse a category from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "government" => Some(DocumentCategory::Government),
            "personal" => Some(DocumentCategory::Personal),
            _ => None,
        }
    }
}

/// A credential held in the locker.
///
/// Fields are read-only: a document is built once by the registry and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: Uuid,
    title: String,
    #[serde(rename = "type")]
    doc_type: String,
    category: DocumentCategory,
    verified: bool,
    date_added: NaiveDate,
    issuer: String,
    document_number: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_reference_number: Option<String>,
}

impl Document {
    /// A verified government document built from wizard input.
    ///
    /// `document_number` is used only when the input carries none.
    pub(crate) fn government(input: NewDocument, date_added: NaiveDate, document_number: String) -> Self {
        let description = input
            .description
            .unwrap_or_else(|| format!("Official {}", input.title));

        Self {
            id: Uuid::new_v4(),
            doc_type: input
                .doc_type
                .unwrap_or_else(|| DEFAULT_GOVERNMENT_TYPE.to_string()),
            category: DocumentCategory::Government,
            verified: true,
            date_added,
            issuer: input
                .issuer
                .unwrap_or_else(|| DEFAULT_GOVERNMENT_ISSUER.to_string()),
            document_number: input.document_number.unwrap_or(document_number),
            description,
            service_reference_number: input.reference_number,
            title: input.title,
        }
    }

    /// An unverified user upload.
    pub(crate) fn personal(kind: &PersonalDocumentKind, date_added: NaiveDate, document_number: String) -> Self {
        let title = kind.title().to_string();
        Self {
            id: Uuid::new_v4(),
            description: format!("Uploaded {}", title),
            title,
            doc_type: PERSONAL_DOCUMENT_TYPE.to_string(),
            category: DocumentCategory::Personal,
            verified: false,
            date_added,
            issuer: USER_UPLOAD_ISSUER.to_string(),
            document_number,
            service_reference_number: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn date_added(&self) -> NaiveDate {
        self.date_added
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn service_reference_number(&self) -> Option<&str> {
        self.service_reference_number.as_deref()
    }
}

/// Input of the registry write API, as sent by a completed service wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    /// Human-readable name, e.g. `Birth Certificate`.
    pub title: String,
    /// Free-text classification. Defaults to `Government Document`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Authority of record. Defaults to a generic government issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Human-facing reference code. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Free-text summary. Defaults to `Official {title}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Transaction number of the service that produced the document.
    #[serde(
        default,
        alias = "service_reference_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_number: Option<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn reference_number(mut self, reference: impl Into<String>) -> Self {
        self.reference_number = Some(reference.into());
        self
    }

    pub fn document_number(mut self, number: impl Into<String>) -> Self {
        self.document_number = Some(number.into());
        self
    }
}

/// Kinds of document a user can upload by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalDocumentKind {
    Resume,
    Diploma,
    MedicalRecord,
    InsuranceCard,
    /// Anything else, named by the user.
    Other(String),
}

impl PersonalDocumentKind {
    pub fn title(&self) -> &str {
        match self {
            PersonalDocumentKind::Resume => "Resume",
            PersonalDocumentKind::Diploma => "University Diploma",
            PersonalDocumentKind::MedicalRecord => "Medical Record",
            PersonalDocumentKind::InsuranceCard => "Health Insurance Card",
            PersonalDocumentKind::Other(title) => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_government_defaults() {
        let doc = Document::government(
            NewDocument::new("Passport"),
            june_first(),
            "GOV-20240601-000001".to_string(),
        );
        assert_eq!(doc.category(), DocumentCategory::Government);
        assert!(doc.verified());
        assert_eq!(doc.doc_type(), DEFAULT_GOVERNMENT_TYPE);
        assert_eq!(doc.issuer(), DEFAULT_GOVERNMENT_ISSUER);
        assert_eq!(doc.description(), "Official Passport");
        assert_eq!(doc.document_number(), "GOV-20240601-000001");
        assert_eq!(doc.service_reference_number(), None);
    }

    #[test]
    fn test_government_keeps_supplied_fields() {
        let input = NewDocument::new("Birth Certificate")
            .issuer("Registrar General's Office")
            .description("Certified copy")
            .document_number("BC-77")
            .reference_number("BC123456");
        let doc = Document::government(input, june_first(), "unused".to_string());
        assert_eq!(doc.issuer(), "Registrar General's Office");
        assert_eq!(doc.description(), "Certified copy");
        assert_eq!(doc.document_number(), "BC-77");
        assert_eq!(doc.service_reference_number(), Some("BC123456"));
    }

    #[test]
    fn test_personal_is_unverified() {
        let doc = Document::personal(
            &PersonalDocumentKind::Resume,
            june_first(),
            "USR-20240601-000001".to_string(),
        );
        assert_eq!(doc.category(), DocumentCategory::Personal);
        assert!(!doc.verified());
        assert_eq!(doc.issuer(), USER_UPLOAD_ISSUER);
        assert_eq!(doc.doc_type(), PERSONAL_DOCUMENT_TYPE);
    }

    #[test]
    fn test_document_serialization_shape() {
        let doc = Document::government(
            NewDocument::new("Passport"),
            june_first(),
            "GOV-1".to_string(),
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "Government Document");
        assert_eq!(json["category"], "government");
        assert_eq!(json["date_added"], "2024-06-01");
        assert!(json.get("service_reference_number").is_none());
    }

    #[test]
    fn test_new_document_deserialization_defaults() {
        let json = r###"{ "title": "Police Record" }"###;
        let input: NewDocument = serde_json::from_str(json).unwrap();
        assert_eq!(input.title, "Police Record");
        assert!(input.issuer.is_none());
        assert!(input.reference_number.is_none());
    }

    #[test]
    fn test_new_document_reference_alias() {
        let json = r###"{ "title": "Passport", "service_reference_number": "PA654321" }"###;
        let input: NewDocument = serde_json::from_str(json).unwrap();
        assert_eq!(input.reference_number.as_deref(), Some("PA654321"));
    }

    #[test]
    fn test_category_from_str_ci() {
        assert_eq!(
            DocumentCategory::from_str_ci("Government"),
            Some(DocumentCategory::Government)
        );
        assert_eq!(
            DocumentCategory::from_str_ci("PERSONAL"),
            Some(DocumentCategory::Personal)
        );
        assert_eq!(DocumentCategory::from_str_ci("secret"), None);
    }

    #[test]
    fn test_personal_kind_deserialization() {
        let kind: PersonalDocumentKind = serde_json::from_str(r#""medical_record""#).unwrap();
        assert_eq!(kind, PersonalDocumentKind::MedicalRecord);
        let other: PersonalDocumentKind =
            serde_json::from_str(r#"{ "other": "Gym Membership" }"#).unwrap();
        assert_eq!(other.title(), "Gym Membership");
    }
}
