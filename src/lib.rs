// Trip planner library for visitors to Yellowstone National Park

pub mod config;
pub mod content;
pub mod estimator;
pub mod itinerary;
pub mod journal;
pub mod live_price;
pub mod persistence;
pub mod planner;
pub mod season;
pub mod trip;

// Re-export key types for convenience
pub use config::{ConfigError, PlannerConfig, ProviderConfig, StoreConfig};
pub use estimator::{
    estimate, estimate_with_overrides, BudgetEstimate, BudgetLineItem, LineCategory,
    LiveOverrides, SourceTag, VehicleOption,
};
pub use itinerary::{select_itinerary, DayPlan, ItineraryDay};
pub use journal::{Journal, JournalError};
pub use live_price::{fetch_live_prices, AmadeusProvider, LookupError, PriceProvider};
pub use persistence::{
    Identity, InMemoryTripStore, RestTripStore, SavedTrip, StoreError, TripStore,
};
pub use planner::{Notice, PlanOutcome, TripPlan, TripPlanner};
pub use season::Season;
pub use trip::{TripForm, TripRequest, ValidationError};
