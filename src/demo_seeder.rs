use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::error::AppError;
use crate::models::disclosure::{DisclosureRequest, RequestedDocument, Urgency};
use crate::models::document::{NewDocument, PersonalDocumentKind};
use crate::registry::{icons::resolve_title_icon, DocumentRegistry};

/// Fill an empty locker with the documents every demo user starts with:
/// one personal upload and three government documents.
pub async fn seed_demo_data(registry: &DocumentRegistry) -> Result<(), AppError> {
    tracing::info!("Starting demo data seeding...");

    registry.upload_personal(PersonalDocumentKind::Resume).await?;

    let government = [
        NewDocument::new("Passport")
            .issuer("Passport and Immigration Office")
            .document_number("P4821937"),
        NewDocument::new("Driver's License")
            .issuer("Licensing Authority")
            .document_number("DL-582-114-09"),
        NewDocument::new("National Insurance Card")
            .issuer("National Insurance Board")
            .description("Proof of social security registration"),
    ];
    for input in government {
        registry.add_document(input).await?;
    }

    tracing::info!("Demo data seeding completed.");
    Ok(())
}

fn requested(id: &str, name: &str, required: bool) -> RequestedDocument {
    RequestedDocument {
        id: id.to_string(),
        name: name.to_string(),
        icon: resolve_title_icon(name).glyph().to_string(),
        required,
    }
}

/// Department requests waiting in a demo user's inbox, dated relative to `today`.
pub fn demo_requests(today: NaiveDate) -> Vec<DisclosureRequest> {
    let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);

    vec![
        DisclosureRequest {
            id: "req-immigration-001".to_string(),
            department: "Immigration Department".to_string(),
            purpose: "Residency permit renewal".to_string(),
            request_date: days_ago(1),
            urgency: Urgency::High,
            requested_documents: vec![
                requested("passport", "Passport", true),
                requested("police-record", "Police Record Certificate", true),
                requested("resume", "Resume", false),
            ],
        },
        DisclosureRequest {
            id: "req-licensing-002".to_string(),
            department: "Licensing Authority".to_string(),
            purpose: "Driver's license renewal verification".to_string(),
            request_date: days_ago(2),
            urgency: Urgency::Normal,
            requested_documents: vec![
                requested("drivers-license", "Driver's License", true),
                requested("national-insurance", "National Insurance Card", false),
            ],
        },
        DisclosureRequest {
            id: "req-nib-003".to_string(),
            department: "National Insurance Board".to_string(),
            purpose: "Benefit eligibility review".to_string(),
            request_date: days_ago(3),
            urgency: Urgency::Normal,
            requested_documents: vec![
                requested("national-insurance", "National Insurance Card", true),
                requested("birth-certificate", "Birth Certificate", false),
            ],
        },
    ]
}

/// Read a list of disclosure requests from a YAML file.
pub fn load_requests(path: &Path) -> Result<Vec<DisclosureRequest>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read requests file '{}': {}", path.display(), e))
    })?;
    let requests: Vec<DisclosureRequest> = serde_yaml::from_str(&raw).map_err(|e| {
        AppError::Config(format!("Invalid requests file '{}': {}", path.display(), e))
    })?;

    tracing::info!("Loaded {} disclosure requests from {}", requests.len(), path.display());
    Ok(requests)
}
