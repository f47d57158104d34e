// Live price lookups against the travel-data provider
// Three independent lookups (flight, hotel, car) run together and each one
// either yields a price or falls back to the static estimate

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ProviderConfig};
use crate::estimator::{LineCategory, LiveOverrides};
use crate::trip::{TripRequest, GATEWAY_CODE};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upstream error: {status_code} - {message}")]
    Upstream { status_code: u16, message: String },

    #[error("Lookup timeout after {0}ms")]
    Timeout(u64),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<ConfigError> for LookupError {
    fn from(err: ConfigError) -> Self {
        LookupError::Configuration(err.to_string())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Upstream {
                status_code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            LookupError::NetworkError(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelQuery {
    pub city_code: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarQuery {
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQueries {
    pub flight: FlightQuery,
    pub hotel: HotelQuery,
    pub car: CarQuery,
}

impl LookupQueries {
    /// Live lookups need both dates; returns `None` otherwise.
    pub fn from_request(request: &TripRequest) -> Option<Self> {
        let (start, end) = request.date_range()?;
        Some(Self {
            flight: FlightQuery {
                origin: request.origin_code(),
                destination: GATEWAY_CODE.to_string(),
                departure_date: start,
                return_date: end,
                travelers: request.traveler_count(),
            },
            hotel: HotelQuery {
                city_code: GATEWAY_CODE.to_string(),
                check_in_date: start,
                check_out_date: end,
                adults: request.traveler_count(),
            },
            car: CarQuery {
                pickup_location: GATEWAY_CODE.to_string(),
                pickup_date: start,
                dropoff_date: end,
            },
        })
    }
}

// Each lookup returns Ok(None) when the provider has no offer
#[async_trait]
pub trait PriceProvider: Send + Sync + 'static {
    // Round trip total for the whole party
    async fn flight_price(&self, query: &FlightQuery) -> Result<Option<f64>, LookupError>;

    async fn hotel_price_per_night(&self, query: &HotelQuery) -> Result<Option<f64>, LookupError>;

    async fn car_rental_total(&self, query: &CarQuery) -> Result<Option<f64>, LookupError>;
}

/// Joined result of the three lookups.
#[derive(Debug, Clone, Default)]
pub struct LiveLookup {
    pub overrides: LiveOverrides,
    pub failures: Vec<(LineCategory, LookupError)>,
}

async fn settle<F>(
    category: LineCategory,
    timeout: Duration,
    lookup: F,
) -> Result<Option<f64>, LookupError>
where
    F: std::future::Future<Output = Result<Option<f64>, LookupError>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(price)) => {
            debug!(?category, ?price, "live price settled");
            Ok(price)
        }
        Ok(Err(err)) => {
            warn!(?category, error = %err, "live price lookup failed, using estimate");
            Err(err)
        }
        Err(_) => {
            let ms = timeout.as_millis() as u64;
            warn!(?category, timeout_ms = ms, "live price lookup timed out, using estimate");
            Err(LookupError::Timeout(ms))
        }
    }
}

/// Runs the three lookups concurrently and waits for all of them.
///
/// A failing or slow branch never cancels the others; its line item simply
/// has no override and the error is reported in `failures`.
pub async fn fetch_live_prices(
    provider: &dyn PriceProvider,
    queries: &LookupQueries,
    timeout: Duration,
) -> LiveLookup {
    info!(origin = %queries.flight.origin, "fetching live prices");

    let (flight, hotel, car) = futures::join!(
        settle(LineCategory::Flight, timeout, provider.flight_price(&queries.flight)),
        settle(
            LineCategory::Hotel,
            timeout,
            provider.hotel_price_per_night(&queries.hotel)
        ),
        settle(
            LineCategory::CarRental,
            timeout,
            provider.car_rental_total(&queries.car)
        ),
    );

    let mut lookup = LiveLookup::default();
    match flight {
        Ok(price) => lookup.overrides.flight_total = price,
        Err(err) => lookup.failures.push((LineCategory::Flight, err)),
    }
    match hotel {
        Ok(price) => lookup.overrides.hotel_per_night = price,
        Err(err) => lookup.failures.push((LineCategory::Hotel, err)),
    }
    match car {
        Ok(price) => lookup.overrides.car_rental_total = price,
        Err(err) => lookup.failures.push((LineCategory::CarRental, err)),
    }
    lookup
}

// Provider response shapes. Prices arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OfferPrice {
    pub total: Option<String>,
}

impl OfferPrice {
    fn parsed_total(&self) -> Option<f64> {
        self.total
            .as_deref()
            .and_then(|t| t.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PricedOffer {
    pub price: Option<OfferPrice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<PricedOffer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HotelEntry {
    #[serde(default)]
    pub offers: Vec<PricedOffer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HotelOffersResponse {
    #[serde(default)]
    pub data: Vec<HotelEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CarOffersResponse {
    #[serde(default)]
    pub data: Vec<PricedOffer>,
}

fn offer_total(offer: &PricedOffer) -> Option<f64> {
    offer.price.as_ref().and_then(OfferPrice::parsed_total)
}

// Offers are requested with max=1, so the first one is the cheapest
pub fn lowest_flight_price(response: &FlightOffersResponse) -> Option<f64> {
    response.data.first().and_then(offer_total)
}

// Average of each hotel's best rate; hotels without a rate are skipped
pub fn average_hotel_price(response: &HotelOffersResponse) -> Option<f64> {
    let prices: Vec<f64> = response
        .data
        .iter()
        .filter_map(|hotel| hotel.offers.first().and_then(offer_total))
        .collect();
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}

pub fn lowest_car_total(response: &CarOffersResponse) -> Option<f64> {
    response
        .data
        .iter()
        .filter_map(offer_total)
        .min_by(|a, b| a.total_cmp(b))
}

/// HTTP provider for the Amadeus self-service APIs.
pub struct AmadeusProvider {
    http: reqwest::Client,
    config: ProviderConfig,
    config_reported: AtomicBool,
}

impl AmadeusProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            config_reported: AtomicBool::new(false),
        }
    }

    fn credentials(&self) -> Result<(String, String), LookupError> {
        self.config.credentials().map_err(|err| {
            // only the first lookup logs loudly
            if !self.config_reported.swap(true, Ordering::SeqCst) {
                warn!(error = %err, "live prices disabled: provider credentials missing");
            } else {
                debug!(error = %err, "provider credentials still missing");
            }
            LookupError::from(err)
        })
    }

    fn token_request(&self, client_id: &str, client_secret: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/v1/security/oauth2/token", self.config.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
    }

    fn offers_request(
        &self,
        path: &str,
        token: &str,
        params: &[(&str, String)],
    ) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{}", self.config.base_url, path))
            .bearer_auth(token)
            .query(params)
    }

    async fn access_token(&self) -> Result<String, LookupError> {
        let (client_id, client_secret) = self.credentials()?;
        let response = self.token_request(&client_id, &client_secret).send().await?;

        if !response.status().is_success() {
            return Err(upstream(response).await);
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, LookupError>
    where
        T: serde::de::DeserializeOwned,
    {
        let token = self.access_token().await?;
        let response = self.offers_request(path, &token, params).send().await?;

        if !response.status().is_success() {
            return Err(upstream(response).await);
        }
        Ok(response.json::<T>().await?)
    }
}

async fn upstream(response: reqwest::Response) -> LookupError {
    let status_code = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    LookupError::Upstream {
        status_code,
        message,
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const HOTEL_OFFERS_PATH: &str = "/v3/shopping/hotel-offers";
const CAR_OFFERS_PATH: &str = "/v1/shopping/car-rental-offers";

fn flight_params(query: &FlightQuery) -> Vec<(&'static str, String)> {
    vec![
        ("originLocationCode", query.origin.clone()),
        ("destinationLocationCode", query.destination.clone()),
        ("departureDate", iso(query.departure_date)),
        ("returnDate", iso(query.return_date)),
        ("adults", query.travelers.to_string()),
        ("currencyCode", "USD".to_string()),
        ("max", "1".to_string()),
    ]
}

fn hotel_params(query: &HotelQuery) -> Vec<(&'static str, String)> {
    vec![
        ("cityCode", query.city_code.clone()),
        ("checkInDate", iso(query.check_in_date)),
        ("checkOutDate", iso(query.check_out_date)),
        ("adults", query.adults.to_string()),
        ("roomQuantity", "1".to_string()),
        ("currency", "USD".to_string()),
        ("bestRateOnly", "true".to_string()),
    ]
}

// Pick-up and drop-off at 10:00 local time
fn car_params(query: &CarQuery) -> Vec<(&'static str, String)> {
    vec![
        ("pickUpLocationCode", query.pickup_location.clone()),
        ("pickUpDateTime", format!("{}T10:00:00", iso(query.pickup_date))),
        ("dropOffDateTime", format!("{}T10:00:00", iso(query.dropoff_date))),
        ("currency", "USD".to_string()),
    ]
}

#[async_trait]
impl PriceProvider for AmadeusProvider {
    async fn flight_price(&self, query: &FlightQuery) -> Result<Option<f64>, LookupError> {
        let response: FlightOffersResponse =
            self.get_json(FLIGHT_OFFERS_PATH, &flight_params(query)).await?;
        Ok(lowest_flight_price(&response))
    }

    async fn hotel_price_per_night(&self, query: &HotelQuery) -> Result<Option<f64>, LookupError> {
        let response: HotelOffersResponse =
            self.get_json(HOTEL_OFFERS_PATH, &hotel_params(query)).await?;
        Ok(average_hotel_price(&response))
    }

    async fn car_rental_total(&self, query: &CarQuery) -> Result<Option<f64>, LookupError> {
        let response: CarOffersResponse =
            self.get_json(CAR_OFFERS_PATH, &car_params(query)).await?;
        Ok(lowest_car_total(&response))
    }
}

// Scriptable provider for tests and offline runs
pub mod mock_provider {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize};

    #[derive(Debug, Clone, Copy)]
    pub enum ProviderMode {
        Normal,
        PartialOutage,
        CompleteOutage,
        Unconfigured,
    }

    pub struct MockPriceProvider {
        mode: AtomicU8,
        flight: Mutex<Option<f64>>,
        hotel: Mutex<Option<f64>>,
        car: Mutex<Option<f64>>,
        failing: Mutex<HashSet<LineCategory>>,
        slow: Mutex<HashSet<LineCategory>>,
        delay_ms: AtomicU64,
        request_count: AtomicUsize,
    }

    impl Default for MockPriceProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockPriceProvider {
        pub fn new() -> Self {
            Self {
                mode: AtomicU8::new(0),
                flight: Mutex::new(None),
                hotel: Mutex::new(None),
                car: Mutex::new(None),
                failing: Mutex::new(HashSet::new()),
                slow: Mutex::new(HashSet::new()),
                delay_ms: AtomicU64::new(0),
                request_count: AtomicUsize::new(0),
            }
        }

        pub fn with_prices(flight: Option<f64>, hotel: Option<f64>, car: Option<f64>) -> Self {
            let provider = Self::new();
            *provider.flight.lock() = flight;
            *provider.hotel.lock() = hotel;
            *provider.car.lock() = car;
            provider
        }

        pub fn set_mode(&self, mode: ProviderMode) {
            let mode_value = match mode {
                ProviderMode::Normal => 0,
                ProviderMode::PartialOutage => 1,
                ProviderMode::CompleteOutage => 2,
                ProviderMode::Unconfigured => 3,
            };
            self.mode.store(mode_value, Ordering::SeqCst);
        }

        pub fn set_price(&self, category: LineCategory, price: Option<f64>) {
            match category {
                LineCategory::Flight => *self.flight.lock() = price,
                LineCategory::Hotel => *self.hotel.lock() = price,
                LineCategory::CarRental => *self.car.lock() = price,
                _ => {}
            }
        }

        pub fn fail(&self, category: LineCategory) {
            self.failing.lock().insert(category);
        }

        // Slow lookups sleep for the configured delay before answering
        pub fn slow_down(&self, category: LineCategory, delay_ms: u64) {
            self.slow.lock().insert(category);
            self.delay_ms.store(delay_ms, Ordering::SeqCst);
        }

        pub fn request_count(&self) -> usize {
            self.request_count.load(Ordering::SeqCst)
        }

        async fn answer(&self, category: LineCategory) -> Result<Option<f64>, LookupError> {
            self.request_count.fetch_add(1, Ordering::SeqCst);

            match self.mode.load(Ordering::SeqCst) {
                3 => {
                    return Err(LookupError::Configuration(
                        "AMADEUS_API_KEY not configured".to_string(),
                    ))
                }
                2 => return Err(LookupError::NetworkError("Service unavailable".to_string())),
                1 => {
                    // Partial outage - 50% chance of failure
                    if rand::random::<f32>() < 0.5 {
                        return Err(LookupError::Upstream {
                            status_code: 503,
                            message: "Service temporarily unavailable".to_string(),
                        });
                    }
                }
                _ => {}
            }

            let slow = self.slow.lock().contains(&category);
            if slow {
                let delay = self.delay_ms.load(Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let failing = self.failing.lock().contains(&category);
            if failing {
                return Err(LookupError::Upstream {
                    status_code: 500,
                    message: "Internal Server Error".to_string(),
                });
            }

            Ok(match category {
                LineCategory::Flight => *self.flight.lock(),
                LineCategory::Hotel => *self.hotel.lock(),
                LineCategory::CarRental => *self.car.lock(),
                _ => None,
            })
        }
    }

    #[async_trait]
    impl PriceProvider for MockPriceProvider {
        async fn flight_price(&self, _query: &FlightQuery) -> Result<Option<f64>, LookupError> {
            self.answer(LineCategory::Flight).await
        }

        async fn hotel_price_per_night(
            &self,
            _query: &HotelQuery,
        ) -> Result<Option<f64>, LookupError> {
            self.answer(LineCategory::Hotel).await
        }

        async fn car_rental_total(&self, _query: &CarQuery) -> Result<Option<f64>, LookupError> {
            self.answer(LineCategory::CarRental).await
        }
    }
}
