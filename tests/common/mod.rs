use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;

use locker::app::{router, AppState};
use locker::clock::{Clock, FixedClock};
use locker::db::repository::{DocumentRepository, InMemoryDocumentRepository};
use locker::demo_seeder;
use locker::disclosure::DisclosureService;
use locker::models::disclosure::{DisclosureRequest, RequestedDocument, Urgency};
use locker::registry::DocumentRegistry;

pub const SERVICE_TOKEN: &str = "test-token";

pub fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// An isolated locker wired to an Axum router, with the clock pinned to
/// 2024-06-01.
pub struct TestEnv {
    pub router: Router,
    pub registry: Arc<DocumentRegistry>,
    pub disclosures: Arc<DisclosureService>,
}

impl TestEnv {
    /// Seeded locker plus the given pending requests.
    pub async fn start(requests: Vec<DisclosureRequest>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(june_first()));
        let repo: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
        let registry = Arc::new(DocumentRegistry::new(repo, clock.clone()));
        demo_seeder::seed_demo_data(&registry)
            .await
            .expect("Failed to seed demo data");

        let disclosures = Arc::new(DisclosureService::new(requests, clock));
        let state = AppState {
            registry: registry.clone(),
            disclosures: disclosures.clone(),
            service_token: SERVICE_TOKEN.to_string(),
        };

        Self {
            router: router(state),
            registry,
            disclosures,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}

fn requested(id: &str, name: &str, required: bool) -> RequestedDocument {
    RequestedDocument {
        id: id.to_string(),
        name: name.to_string(),
        icon: "📄".to_string(),
        required,
    }
}

/// Two required documents and one optional one.
pub fn work_permit_request() -> DisclosureRequest {
    DisclosureRequest {
        id: "req-work".to_string(),
        department: "Ministry of Labour".to_string(),
        purpose: "Work permit application".to_string(),
        request_date: NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(),
        urgency: Urgency::High,
        requested_documents: vec![
            requested("passport", "Passport", true),
            requested("police-record", "Police Record Certificate", true),
            requested("resume", "Resume", false),
        ],
    }
}

/// Nothing required, so the user can end up with an empty selection.
pub fn survey_request() -> DisclosureRequest {
    DisclosureRequest {
        id: "req-survey".to_string(),
        department: "Statistical Institute".to_string(),
        purpose: "Household survey".to_string(),
        request_date: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        urgency: Urgency::Normal,
        requested_documents: vec![
            requested("resume", "Resume", false),
            requested("diploma", "University Diploma", false),
        ],
    }
}
