use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::document::{Document, DocumentCategory, NewDocument, PersonalDocumentKind};
use crate::registry::{resolve_icon, DocumentIcon, DocumentRegistry};

/// A document as returned by the API, with its resolved icon.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub icon: DocumentIcon,
    pub glyph: &'static str,
}

impl From<Document> for DocumentView {
    fn from(document: Document) -> Self {
        let icon = resolve_icon(&document);
        Self {
            document,
            icon,
            glyph: icon.glyph(),
        }
    }
}

/// Body of `POST /api/v1/documents`, sent by a government service.
#[derive(Debug, Clone, Deserialize)]
pub struct AddDocumentRequest {
    /// Service authentication token.
    pub service_token: String,
    #[serde(flatten)]
    pub document: NewDocument,
}

/// Body of `POST /api/v1/documents/personal`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadPersonalRequest {
    pub kind: PersonalDocumentKind,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Core write-API logic, separated from the HTTP layer for testability.
pub async fn process_add_document(
    registry: &DocumentRegistry,
    request: AddDocumentRequest,
    expected_token: &str,
) -> Result<DocumentView, AppError> {
    if request.service_token != expected_token {
        return Err(AppError::Auth("Invalid service token".into()));
    }

    let doc = registry.add_document(request.document).await?;
    Ok(doc.into())
}

fn parse_category(raw: Option<&str>) -> Result<Option<DocumentCategory>, AppError> {
    raw.map(|s| {
        DocumentCategory::from_str_ci(s).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid category '{}'. Expected: government, personal",
                s
            ))
        })
    })
    .transpose()
}

/// `GET /api/v1/documents?category=`
pub async fn list_documents_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DocumentView>>, AppError> {
    let category = parse_category(query.category.as_deref())?;
    let docs = state.registry.list_documents(category).await?;
    Ok(Json(docs.into_iter().map(DocumentView::from).collect()))
}

/// `GET /api/v1/documents/{id}`
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentView>, AppError> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| AppError::BadRequest(format!("Invalid document id '{}'", id)))?;

    state
        .registry
        .find_document(uuid)
        .await?
        .map(|doc| Json(doc.into()))
        .ok_or_else(|| AppError::NotFound(format!("Document '{}' not found", id)))
}

/// `POST /api/v1/documents`
pub async fn add_document_handler(
    State(state): State<AppState>,
    Json(request): Json<AddDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentView>), AppError> {
    let view = process_add_document(&state.registry, request, &state.service_token).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `POST /api/v1/documents/personal`
pub async fn upload_personal_handler(
    State(state): State<AppState>,
    Json(request): Json<UploadPersonalRequest>,
) -> Result<(StatusCode, Json<DocumentView>), AppError> {
    let doc = state.registry.upload_personal(request.kind).await?;
    Ok((StatusCode::CREATED, Json(doc.into())))
}
