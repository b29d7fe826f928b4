pub mod icons;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::clock::{self, Clock};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::models::document::{Document, DocumentCategory, NewDocument, PersonalDocumentKind};

pub use icons::{resolve_icon, DocumentIcon};

/// The user's document locker.
///
/// Constructed once at start-up and shared by reference. Documents only ever
/// enter through [`add_document`](Self::add_document) (government services)
/// or [`upload_personal`](Self::upload_personal) (the user).
pub struct DocumentRegistry {
    repo: Arc<dyn DocumentRepository>,
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl DocumentRegistry {
    pub fn new(repo: Arc<dyn DocumentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            sequence: AtomicU64::new(0),
        }
    }

    /// Store a verified government document produced by a service wizard.
    ///
    /// Omitted optional fields are defaulted. A blank title is rejected.
    pub async fn add_document(&self, input: NewDocument) -> Result<Document, AppError> {
        if input.title.trim().is_empty() {
            tracing::warn!("Rejected government document with an empty title");
            return Err(AppError::BadRequest("Document title cannot be empty".into()));
        }

        let today = clock::today(self.clock.as_ref());
        let number = self.next_document_number("GOV", today);
        let doc = Document::government(input, today, number);

        self.repo.append(doc.clone()).await?;
        tracing::info!(
            id = %doc.id(),
            title = doc.title(),
            issuer = doc.issuer(),
            reference = doc.service_reference_number().unwrap_or("-"),
            "Added government document"
        );
        Ok(doc)
    }

    /// Store a document the user uploaded themselves.
    pub async fn upload_personal(&self, kind: PersonalDocumentKind) -> Result<Document, AppError> {
        let today = clock::today(self.clock.as_ref());
        let number = self.next_document_number("USR", today);
        let doc = Document::personal(&kind, today, number);

        self.repo.append(doc.clone()).await?;
        tracing::info!(id = %doc.id(), title = doc.title(), "Added personal upload");
        Ok(doc)
    }

    /// Documents in insertion order, optionally restricted to one category.
    pub async fn list_documents(
        &self,
        category: Option<DocumentCategory>,
    ) -> Result<Vec<Document>, AppError> {
        self.repo.list(category).await
    }

    pub async fn find_document(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        self.repo.find_by_id(id).await
    }

    /// `{prefix}-{YYYYMMDD}-{seq}`, unique for the lifetime of this registry.
    fn next_document_number(&self, prefix: &str, date: NaiveDate) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}-{:06}", prefix, date.format("%Y%m%d"), seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::db::repository::InMemoryDocumentRepository;
    use std::collections::HashSet;

    fn registry() -> DocumentRegistry {
        DocumentRegistry::new(
            Arc::new(InMemoryDocumentRepository::new()),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())),
        )
    }

    #[tokio::test]
    async fn test_add_document_is_verified_government() {
        let registry = registry();
        let doc = registry
            .add_document(NewDocument::new("Birth Certificate").issuer("Registrar General's Office"))
            .await
            .unwrap();

        assert_eq!(doc.category(), DocumentCategory::Government);
        assert!(doc.verified());
        assert_eq!(doc.date_added(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(doc.document_number(), "GOV-20240601-000001");
        assert_eq!(doc.description(), "Official Birth Certificate");
    }

    #[tokio::test]
    async fn test_added_document_is_immediately_visible() {
        let registry = registry();
        let doc = registry.add_document(NewDocument::new("Passport")).await.unwrap();

        let listed = registry.list_documents(None).await.unwrap();
        assert_eq!(listed, vec![doc.clone()]);
        assert_eq!(registry.find_document(doc.id()).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_add_document_rejects_blank_title() {
        let registry = registry();
        let result = registry.add_document(NewDocument::new("   ")).await;
        match result.unwrap_err() {
            AppError::BadRequest(msg) => assert!(msg.contains("title cannot be empty")),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
        assert!(registry.list_documents(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_personal_is_unverified() {
        let registry = registry();
        let doc = registry
            .upload_personal(PersonalDocumentKind::Diploma)
            .await
            .unwrap();

        assert_eq!(doc.category(), DocumentCategory::Personal);
        assert!(!doc.verified());
        assert_eq!(doc.issuer(), "User Upload");
        assert!(doc.document_number().starts_with("USR-20240601-"));
    }

    #[tokio::test]
    async fn test_generated_document_numbers_are_unique() {
        let registry = registry();
        let mut numbers = HashSet::new();
        for i in 0..20 {
            let doc = if i % 2 == 0 {
                registry.add_document(NewDocument::new("Passport")).await.unwrap()
            } else {
                registry
                    .upload_personal(PersonalDocumentKind::Resume)
                    .await
                    .unwrap()
            };
            assert!(numbers.insert(doc.document_number().to_string()));
        }
    }

    #[tokio::test]
    async fn test_supplied_document_number_is_kept() {
        let registry = registry();
        let doc = registry
            .add_document(NewDocument::new("Passport").document_number("P1234567"))
            .await
            .unwrap();
        assert_eq!(doc.document_number(), "P1234567");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_all_kept() {
        let registry = Arc::new(registry());
        let mut handles = Vec::new();
        for i in 0..32 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry
                    .add_document(NewDocument::new(format!("Permit {i}")))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let docs = registry.list_documents(None).await.unwrap();
        assert_eq!(docs.len(), 32);
        let ids: HashSet<Uuid> = docs.iter().map(|d| d.id()).collect();
        assert_eq!(ids.len(), 32);
    }
}
