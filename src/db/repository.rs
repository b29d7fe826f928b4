use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::document::{Document, DocumentCategory};

/// Repository trait for locker documents.
///
/// The locker is append-only: there is no update or delete. This trait allows
/// swapping the storage layer in tests.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Append a document. It is visible to every read that starts afterwards.
    async fn append(&self, doc: Document) -> Result<(), AppError>;

    /// List documents in insertion order (oldest first), optionally restricted
    /// to one category.
    async fn list(&self, category: Option<DocumentCategory>) -> Result<Vec<Document>, AppError>;

    /// Find a document by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError>;
}

/// Process-lifetime, in-memory implementation of the DocumentRepository.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("Document store lock poisoned".into())
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn append(&self, doc: Document) -> Result<(), AppError> {
        self.documents.write().map_err(poisoned)?.push(doc);
        Ok(())
    }

    async fn list(&self, category: Option<DocumentCategory>) -> Result<Vec<Document>, AppError> {
        Ok(self
            .documents
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|d| category.map_or(true, |c| d.category() == c))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|d| d.id() == id)
            .cloned())
    }
}
