use std::sync::{Arc, Mutex};

use super::engine::{ConsentFlow, ConsentState};
use super::ConsentError;
use crate::clock::{self, Clock};
use crate::error::AppError;
use crate::models::disclosure::{ConsentDuration, ConsentGrant, DisclosureRequest};

/// Thread-safe front of the consent state machine.
///
/// Every operation runs under one lock, so concurrent callers see the
/// transitions in some serial order. Two racing grants on the same request
/// cannot both succeed: the second one finds the flow already `Granted`.
pub struct DisclosureService {
    flow: Mutex<ConsentFlow>,
    clock: Arc<dyn Clock>,
}

impl DisclosureService {
    pub fn new(pending: Vec<DisclosureRequest>, clock: Arc<dyn Clock>) -> Self {
        Self {
            flow: Mutex::new(ConsentFlow::new(pending)),
            clock,
        }
    }

    pub fn pending(&self) -> Result<Vec<DisclosureRequest>, AppError> {
        self.with_flow(|flow| Ok(flow.pending().to_vec()))
    }

    pub fn state(&self) -> Result<ConsentState, AppError> {
        self.with_flow(|flow| Ok(flow.state().clone()))
    }

    pub fn review(&self, request_id: &str) -> Result<ConsentState, AppError> {
        self.transition(|flow| flow.review(request_id))
    }

    pub fn toggle(&self, document_id: &str) -> Result<ConsentState, AppError> {
        self.transition(|flow| flow.toggle(document_id).map(|_| ()))
    }

    pub fn set_duration(&self, days: u32) -> Result<ConsentState, AppError> {
        let duration = ConsentDuration::try_from(days)?;
        self.transition(|flow| flow.set_duration(duration))
    }

    pub fn back(&self) -> Result<ConsentState, AppError> {
        self.transition(ConsentFlow::back)
    }

    pub fn deny(&self) -> Result<DisclosureRequest, AppError> {
        let denied = self.with_flow(ConsentFlow::deny)?;
        tracing::info!(
            request = %denied.id,
            department = %denied.department,
            "Disclosure request denied"
        );
        Ok(denied)
    }

    pub fn grant(&self) -> Result<ConsentGrant, AppError> {
        let today = clock::today(self.clock.as_ref());
        let result = self.with_flow(|flow| flow.grant(today));
        match &result {
            Ok(grant) => tracing::info!(
                request = grant.request_id(),
                department = grant.department(),
                documents = grant.documents().len(),
                expires = %grant.expiry_date(),
                "Consent granted"
            ),
            Err(AppError::Validation(msg)) => tracing::warn!("Consent not granted: {msg}"),
            Err(_) => {}
        }
        result
    }

    /// Dismiss the grant summary. The returned grant is the completion signal
    /// for whoever drives the flow.
    pub fn acknowledge(&self) -> Result<ConsentGrant, AppError> {
        let grant = self.with_flow(ConsentFlow::acknowledge)?;
        tracing::info!(request = grant.request_id(), "Disclosure request closed");
        Ok(grant)
    }

    fn transition(
        &self,
        step: impl FnOnce(&mut ConsentFlow) -> Result<(), ConsentError>,
    ) -> Result<ConsentState, AppError> {
        self.with_flow(|flow| {
            step(flow)?;
            Ok(flow.state().clone())
        })
    }

    fn with_flow<T>(
        &self,
        f: impl FnOnce(&mut ConsentFlow) -> Result<T, ConsentError>,
    ) -> Result<T, AppError> {
        let mut flow = self
            .flow
            .lock()
            .map_err(|_| AppError::Internal("Consent state lock poisoned".into()))?;
        Ok(f(&mut *flow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::models::disclosure::{RequestedDocument, Urgency};
    use chrono::NaiveDate;

    fn request() -> DisclosureRequest {
        DisclosureRequest {
            id: "req-1".to_string(),
            department: "Immigration Department".to_string(),
            purpose: "Residency renewal".to_string(),
            request_date: NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(),
            urgency: Urgency::Normal,
            requested_documents: vec![
                RequestedDocument {
                    id: "passport".to_string(),
                    name: "Passport".to_string(),
                    icon: "🛂".to_string(),
                    required: true,
                },
                RequestedDocument {
                    id: "birth".to_string(),
                    name: "Birth Certificate".to_string(),
                    icon: "👶".to_string(),
                    required: false,
                },
            ],
        }
    }

    fn june_first_clock() -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
                .and_utc(),
        );
        Arc::new(clock)
    }

    #[test]
    fn test_grant_uses_clock_date() {
        let service = DisclosureService::new(vec![request()], june_first_clock());
        service.review("req-1").unwrap();
        service.set_duration(45).unwrap();

        let grant = service.grant().unwrap();
        assert_eq!(grant.granted_date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(grant.expiry_date(), NaiveDate::from_ymd_opt(2024, 7, 16).unwrap());
    }

    #[test]
    fn test_invalid_duration_is_bad_request() {
        let service = DisclosureService::new(vec![request()], june_first_clock());
        service.review("req-1").unwrap();

        match service.set_duration(10).unwrap_err() {
            AppError::BadRequest(msg) => assert!(msg.contains("15, 30, 45 or 60")),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
        match service.state().unwrap() {
            ConsentState::Reviewing(session) => {
                assert_eq!(session.duration(), ConsentDuration::Days30)
            }
            other => panic!("Expected reviewing, got: {:?}", other),
        }
    }

    #[test]
    fn test_full_cycle_removes_request() {
        let service = DisclosureService::new(vec![request()], june_first_clock());
        service.review("req-1").unwrap();
        service.toggle("birth").unwrap();
        service.grant().unwrap();
        let grant = service.acknowledge().unwrap();

        assert_eq!(grant.documents().len(), 2);
        assert!(service.pending().unwrap().is_empty());
        assert_eq!(service.state().unwrap(), ConsentState::Closed);
    }

    #[test]
    fn test_concurrent_grants_produce_one_grant() {
        let service = Arc::new(DisclosureService::new(vec![request()], june_first_clock()));
        service.review("req-1").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.grant())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let granted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(granted, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, AppError::Conflict(_))));
    }
}
