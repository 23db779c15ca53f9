//! Dashboard Loader
//!
//! Two independent panels (weekly summary, AI tips). Each starts in
//! `Loading`, ends in `Content` or `Error`, and can be retried. A panel
//! whose fetch is still running ignores further load requests.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::api::dto::{AiTip, ExpenseSummary};
use crate::api::ApiClient;
use crate::clock::{self, Clock, MIN_SPINNER};
use crate::lifetime::Lifetime;

use super::format::{SummaryView, TipsView, MAX_TIPS};

pub const MSG_SUMMARY_FAILED: &str = "Nie udało się pobrać podsumowania wydatków.";
pub const MSG_TIPS_FAILED: &str = "Nie udało się pobrać porad.";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Loading,
    Content(T),
    Error(String),
}

/// One asynchronously loaded dashboard panel
pub struct Panel<T> {
    state: RefCell<PanelState<T>>,
    in_flight: Cell<bool>,
    clock: Rc<dyn Clock>,
    lifetime: Lifetime,
}

impl<T: Clone> Panel<T> {
    pub fn new(clock: Rc<dyn Clock>, lifetime: Lifetime) -> Self {
        Self {
            state: RefCell::new(PanelState::Loading),
            in_flight: Cell::new(false),
            clock,
            lifetime,
        }
    }

    pub fn state(&self) -> PanelState<T> {
        self.state.borrow().clone()
    }

    pub fn aria_busy(&self) -> bool {
        matches!(*self.state.borrow(), PanelState::Loading)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Run `fetch` unless a previous one is still pending
    ///
    /// Returns `false` when the call was skipped.
    pub async fn load<F, Fut>(&self, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, String>>,
    {
        if self.in_flight.replace(true) {
            return false;
        }
        *self.state.borrow_mut() = PanelState::Loading;

        let started = self.clock.now_ms();
        let result = fetch().await;

        if result.is_ok() {
            if let Some(pad) = clock::remaining(started, self.clock.now_ms(), MIN_SPINNER) {
                self.clock.sleep(pad).await;
            }
        }

        self.in_flight.set(false);
        if !self.lifetime.is_alive() {
            return true;
        }

        *self.state.borrow_mut() = match result {
            Ok(value) => PanelState::Content(value),
            Err(message) => PanelState::Error(message),
        };
        true
    }
}

/// Both dashboard panels wired to the API
pub struct DashboardLoader {
    api: Rc<ApiClient>,
    pub summary: Panel<SummaryView>,
    pub tips: Panel<TipsView>,
}

impl DashboardLoader {
    pub fn new(api: Rc<ApiClient>, clock: Rc<dyn Clock>, lifetime: Lifetime) -> Self {
        Self {
            api,
            summary: Panel::new(clock.clone(), lifetime.clone()),
            tips: Panel::new(clock, lifetime),
        }
    }

    pub async fn load_summary(&self) -> bool {
        let api = self.api.clone();
        self.summary
            .load(|| async move {
                api.get_with_query::<ExpenseSummary>(
                    "/expenses/summary",
                    &[("period", "weekly".to_string())],
                )
                .await
                .map(|summary| SummaryView::from(&summary))
                .map_err(|e| {
                    tracing::error!(error = %e, "Error fetching weekly summary");
                    MSG_SUMMARY_FAILED.to_string()
                })
            })
            .await
    }

    pub async fn load_tips(&self) -> bool {
        let api = self.api.clone();
        self.tips
            .load(|| async move {
                api.get_with_query::<Vec<AiTip>>("/ai/tips", &[("limit", MAX_TIPS.to_string())])
                    .await
                    .map(|tips| TipsView::from(tips.as_slice()))
                    .map_err(|e| {
                        tracing::error!(error = %e, "Error fetching AI tips");
                        MSG_TIPS_FAILED.to_string()
                    })
            })
            .await
    }

    /// Initial load of both panels, concurrently
    pub async fn load_all(&self) {
        futures_util::join!(self.load_summary(), self.load_tips());
    }

    pub async fn retry_summary(&self) -> bool {
        self.load_summary().await
    }

    pub async fn retry_tips(&self) -> bool {
        self.load_tips().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use std::time::Duration;

    fn loader(h: &Harness, lifetime: Lifetime) -> DashboardLoader {
        DashboardLoader::new(h.api.clone(), h.clock.clone(), lifetime)
    }

    #[tokio::test]
    async fn test_summary_success_is_padded() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        assert!(dash.summary.aria_busy());
        h.transport.set_latency(50.0);
        h.transport
            .respond(200, r#"{"total_amount":"1234.5","transaction_count":7}"#);

        assert!(dash.load_summary().await);

        assert_eq!(h.clock.sleeps(), vec![Duration::from_millis(150)]);
        assert_eq!(
            h.transport.last_request().unwrap().url,
            "http://api.test/expenses/summary?period=weekly"
        );
        match dash.summary.state() {
            PanelState::Content(view) => {
                assert_eq!(view.total_amount, "1234,50");
                assert_eq!(view.transaction_count, 7);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!dash.summary.aria_busy());
    }

    #[tokio::test]
    async fn test_slow_success_is_not_padded() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        h.transport.set_latency(350.0);
        h.transport.respond(200, "[]");

        dash.load_tips().await;

        assert!(h.clock.sleeps().is_empty());
        assert_eq!(
            dash.tips.state(),
            PanelState::Content(TipsView {
                tips: vec![],
                empty_message: Some("Brak porad do wyświetlenia."),
            })
        );
    }

    #[tokio::test]
    async fn test_error_is_not_padded_and_retry_recovers() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        h.transport.respond(500, "");

        dash.load_summary().await;
        assert_eq!(
            dash.summary.state(),
            PanelState::Error(MSG_SUMMARY_FAILED.to_string())
        );
        assert!(h.clock.sleeps().is_empty());

        h.transport
            .respond(200, r#"{"total_amount":0,"transaction_count":0}"#);
        dash.retry_summary().await;
        match dash.summary.state() {
            PanelState::Content(view) => {
                assert_eq!(view.empty_message, Some("Brak danych za ten tydzień."))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tips_limited_to_three() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        h.transport.respond(
            200,
            r#"[{"message":"1"},{"message":"2"},{"message":"3"},{"message":"4"},{"message":"5"}]"#,
        );

        dash.load_tips().await;

        assert_eq!(
            h.transport.last_request().unwrap().url,
            "http://api.test/ai/tips?limit=3"
        );
        match dash.tips.state() {
            PanelState::Content(view) => assert_eq!(view.tips.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_load_while_in_flight_is_ignored() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        h.transport.respond(200, "[]");
        h.transport.respond(200, "[]");

        // the first load parks on the spinner pad; the second sees it in flight
        let (first, second) = futures_util::join!(dash.load_tips(), dash.load_tips());

        assert!(first);
        assert!(!second);
        assert_eq!(h.transport.request_count(), 1);
        assert!(!dash.tips.is_in_flight());
    }

    #[tokio::test]
    async fn test_load_all_fills_both_panels() {
        let h = Harness::new();
        let dash = loader(&h, Lifetime::new());
        h.transport
            .respond(200, r#"{"total_amount":10,"transaction_count":1}"#);
        h.transport.respond(200, r#"[{"message":"Oszczędzaj"}]"#);

        dash.load_all().await;

        assert!(matches!(dash.summary.state(), PanelState::Content(_)));
        assert!(matches!(dash.tips.state(), PanelState::Content(_)));
    }

    #[tokio::test]
    async fn test_disposed_dashboard_keeps_state() {
        let h = Harness::new();
        let lifetime = Lifetime::new();
        let dash = loader(&h, lifetime.clone());
        h.transport.respond(200, "[]");

        lifetime.dispose();
        dash.load_tips().await;

        assert_eq!(dash.tips.state(), PanelState::Loading);
        assert!(!dash.tips.is_in_flight());
    }
}
