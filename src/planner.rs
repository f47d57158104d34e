// Trip planner: ties the estimator, live prices, itinerary and saved trips together
//
// A plan always starts from the static estimate. When both dates are known
// the three live lookups run concurrently, and once all of them have settled
// any prices they returned replace the matching static figures.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::estimator::{estimate, estimate_with_overrides, BudgetEstimate, LineCategory};
use crate::itinerary::{select_itinerary, ItineraryDay};
use crate::live_price::{
    fetch_live_prices, AmadeusProvider, LookupError, LookupQueries, PriceProvider,
};
use crate::persistence::{Identity, NewTrip, SavedTrip, StoreError, TripStore};
use crate::season::season_label;
use crate::trip::TripRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Dismissible message for the user. Never blocks the plan from rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn price_fallback(category: LineCategory) -> Self {
        let what = match category {
            LineCategory::Flight => "flight",
            LineCategory::Hotel => "hotel",
            LineCategory::CarRental => "car rental",
            _ => "live",
        };
        Self {
            kind: NoticeKind::Warning,
            title: format!("Unable to fetch {what} prices"),
            description: "Using estimated prices instead".to_string(),
        }
    }

    fn live_prices_unavailable(reason: &str) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: "Live prices unavailable".to_string(),
            description: format!("Using estimated prices instead ({reason})"),
        }
    }

    pub fn from_store_error(err: &StoreError) -> Self {
        match err {
            StoreError::Authorization(_) => Self {
                kind: NoticeKind::Info,
                title: "Sign in to save your trip".to_string(),
                description: "Your trip details are kept while you sign in".to_string(),
            },
            StoreError::Validation(reason) => Self {
                kind: NoticeKind::Error,
                title: "Trip not saved".to_string(),
                description: reason.clone(),
            },
            StoreError::Backend(_) => Self {
                kind: NoticeKind::Error,
                title: "Error".to_string(),
                description: "Failed to save trip".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub request_id: u64,
    pub request: TripRequest,
    pub estimate: BudgetEstimate,
    pub season_label: &'static str,
    pub itinerary: Vec<ItineraryDay>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub enum PlanOutcome {
    Ready(TripPlan),
    // A newer request was started before this one's lookups settled
    Superseded { request_id: u64 },
}

impl PlanOutcome {
    pub fn ready(self) -> Option<TripPlan> {
        match self {
            PlanOutcome::Ready(plan) => Some(plan),
            PlanOutcome::Superseded { .. } => None,
        }
    }
}

pub struct TripPlanner {
    config: PlannerConfig,
    provider: Option<Arc<dyn PriceProvider>>,
    store: Arc<dyn TripStore>,
    latest_request: AtomicU64,
}

impl TripPlanner {
    /// Planner talking to the configured pricing provider.
    pub fn new(config: PlannerConfig, store: Arc<dyn TripStore>) -> Self {
        let provider: Option<Arc<dyn PriceProvider>> = if config.live_prices_enabled {
            Some(Arc::new(AmadeusProvider::new(config.provider.clone())))
        } else {
            None
        };
        Self {
            config,
            provider,
            store,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn PriceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn without_live_prices(mut self) -> Self {
        self.provider = None;
        self
    }

    fn assemble(
        &self,
        request_id: u64,
        request: &TripRequest,
        estimate: BudgetEstimate,
        notices: Vec<Notice>,
    ) -> TripPlan {
        TripPlan {
            request_id,
            request: request.clone(),
            estimate,
            season_label: season_label(request.start_date()),
            itinerary: select_itinerary(request.day_count()),
            notices,
        }
    }

    /// Plan with static prices only; no I/O.
    pub fn static_plan(&self, request: &TripRequest) -> TripPlan {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.assemble(request_id, request, estimate(request), Vec::new())
    }

    pub async fn plan(&self, request: &TripRequest) -> PlanOutcome {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let static_estimate = estimate(request);

        let (provider, queries) = match (&self.provider, LookupQueries::from_request(request)) {
            (Some(provider), Some(queries)) => (provider, queries),
            _ => {
                debug!(request_id, "no live lookups for this request");
                let plan = self.assemble(request_id, request, static_estimate, Vec::new());
                return PlanOutcome::Ready(plan);
            }
        };

        let timeout = self.config.provider.timeout();
        let lookup = fetch_live_prices(provider.as_ref(), &queries, timeout).await;

        let latest = self.latest_request.load(Ordering::SeqCst);
        if latest != request_id {
            info!(request_id, latest, "discarding live prices for a stale request");
            return PlanOutcome::Superseded { request_id };
        }

        let mut notices = Vec::new();
        let mut config_reported = false;
        for (category, err) in &lookup.failures {
            match err {
                LookupError::Configuration(reason) => {
                    // one notice for all lookups sharing the missing credentials
                    if !config_reported {
                        notices.push(Notice::live_prices_unavailable(reason));
                        config_reported = true;
                    }
                }
                _ => notices.push(Notice::price_fallback(*category)),
            }
        }

        let final_estimate = if lookup.overrides.is_empty() {
            static_estimate
        } else {
            estimate_with_overrides(request, &lookup.overrides)
        };
        info!(
            request_id,
            total = final_estimate.total(),
            fallbacks = lookup.failures.len(),
            "trip plan ready"
        );
        PlanOutcome::Ready(self.assemble(request_id, request, final_estimate, notices))
    }

    pub async fn save(
        &self,
        identity: Option<&Identity>,
        request: &TripRequest,
    ) -> Result<SavedTrip, StoreError> {
        self.store
            .create(identity, NewTrip::from(request))
            .await
            .inspect_err(|err| warn!(error = %err, "trip not saved"))
    }

    pub async fn saved_trips(&self, identity: &Identity) -> Result<Vec<SavedTrip>, StoreError> {
        self.store.list(identity).await
    }

    pub async fn delete_trip(&self, identity: &Identity, id: Uuid) -> Result<bool, StoreError> {
        self.store.delete(identity, id).await
    }
}
