// Saved trips: create, list and delete, scoped to a signed-in identity
// Only the trip parameters are stored, never the computed budget

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::trip::TripRequest;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// A signed-in user as handed over by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub access_token: String,
}

impl Identity {
    pub fn new(user_id: Uuid, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: access_token.into(),
        }
    }
}

// Fields the user asked to save
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTrip {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_count: u32,
    pub traveler_count: u32,
}

impl From<&TripRequest> for NewTrip {
    fn from(request: &TripRequest) -> Self {
        Self {
            destination: request.destination_city().to_string(),
            start_date: request.start_date(),
            end_date: request.end_date(),
            day_count: request.day_count(),
            traveler_count: request.traveler_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTrip {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub owner: Uuid,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "days")]
    pub day_count: u32,
    #[serde(rename = "travelers")]
    pub traveler_count: u32,
    pub created_at: DateTime<Utc>,
}

// Row body for inserts; id and created_at are filled by the backend
#[derive(Debug, Serialize)]
struct TripRow<'a> {
    user_id: Uuid,
    destination: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: u32,
    travelers: u32,
}

fn checked_fields<'a>(
    identity: Option<&'a Identity>,
    trip: &NewTrip,
) -> Result<(&'a Identity, NaiveDate, NaiveDate), StoreError> {
    let identity = identity
        .ok_or_else(|| StoreError::Authorization("sign in to save trips".to_string()))?;
    let start = trip
        .start_date
        .ok_or_else(|| StoreError::Validation("start date is required".to_string()))?;
    let end = trip
        .end_date
        .ok_or_else(|| StoreError::Validation("end date is required".to_string()))?;
    Ok((identity, start, end))
}

#[async_trait]
pub trait TripStore: Send + Sync + 'static {
    async fn create(
        &self,
        identity: Option<&Identity>,
        trip: NewTrip,
    ) -> Result<SavedTrip, StoreError>;

    // Newest first
    async fn list(&self, identity: &Identity) -> Result<Vec<SavedTrip>, StoreError>;

    // Returns whether a row was removed
    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, StoreError>;
}

/// Process-local store. Rows are only visible to, and deletable by, their owner.
#[derive(Default)]
pub struct InMemoryTripStore {
    rows: DashMap<Uuid, (u64, SavedTrip)>,
    next_seq: AtomicU64,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn create(
        &self,
        identity: Option<&Identity>,
        trip: NewTrip,
    ) -> Result<SavedTrip, StoreError> {
        let (identity, start_date, end_date) = checked_fields(identity, &trip)?;
        let owner = identity.user_id;
        let saved = SavedTrip {
            id: Uuid::new_v4(),
            owner,
            destination: trip.destination,
            start_date,
            end_date,
            day_count: trip.day_count,
            traveler_count: trip.traveler_count,
            created_at: Utc::now(),
        };
        // insertion order breaks created_at ties
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(saved.id, (seq, saved.clone()));
        info!(trip_id = %saved.id, owner = %owner, "trip saved");
        Ok(saved)
    }

    async fn list(&self, identity: &Identity) -> Result<Vec<SavedTrip>, StoreError> {
        let mut rows: Vec<(u64, SavedTrip)> = self
            .rows
            .iter()
            .filter(|entry| entry.value().1.owner == identity.user_id)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, trip)| trip).collect())
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, StoreError> {
        let removed = self
            .rows
            .remove_if(&id, |_, (_, trip)| trip.owner == identity.user_id)
            .is_some();
        debug!(trip_id = %id, removed, "trip delete");
        Ok(removed)
    }
}

/// Store backed by a PostgREST table (the hosted backend's REST interface).
pub struct RestTripStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestTripStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn request(&self, method: reqwest::Method, identity: &Identity) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.config.table_url())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&identity.access_token)
    }

    fn insert_request(&self, identity: &Identity, row: &TripRow<'_>) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, identity)
            .header("Prefer", "return=representation")
            .json(row)
    }

    // Owner filter mirrors the backend's row-level policy
    fn list_request(&self, identity: &Identity) -> reqwest::RequestBuilder {
        let owner = format!("eq.{}", identity.user_id);
        self.request(reqwest::Method::GET, identity).query(&[
            ("select", "*"),
            ("user_id", owner.as_str()),
            ("order", "created_at.desc"),
        ])
    }

    fn delete_request(&self, identity: &Identity, id: Uuid) -> reqwest::RequestBuilder {
        let id_filter = format!("eq.{id}");
        self.request(reqwest::Method::DELETE, identity)
            .header("Prefer", "return=representation")
            .query(&[("id", id_filter.as_str())])
    }

    async fn rows(response: reqwest::Response) -> Result<Vec<SavedTrip>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(response.json::<Vec<SavedTrip>>().await?)
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> StoreError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        StoreError::Authorization(format!("backend refused: {status}"))
    } else {
        StoreError::Backend(format!("{status}: {body}"))
    }
}

#[async_trait]
impl TripStore for RestTripStore {
    async fn create(
        &self,
        identity: Option<&Identity>,
        trip: NewTrip,
    ) -> Result<SavedTrip, StoreError> {
        let (identity, start_date, end_date) = checked_fields(identity, &trip)?;
        let owner = identity.user_id;
        let row = TripRow {
            user_id: owner,
            destination: &trip.destination,
            start_date,
            end_date,
            days: trip.day_count,
            travelers: trip.traveler_count,
        };
        let response = self.insert_request(identity, &row).send().await?;
        let saved = Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("insert returned no row".to_string()))?;
        info!(trip_id = %saved.id, owner = %owner, "trip saved");
        Ok(saved)
    }

    async fn list(&self, identity: &Identity) -> Result<Vec<SavedTrip>, StoreError> {
        let response = self.list_request(identity).send().await?;
        Self::rows(response).await
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, StoreError> {
        let response = self.delete_request(identity, id).send().await?;
        let removed = !Self::rows(response).await?.is_empty();
        debug!(trip_id = %id, removed, "trip delete");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new(Uuid::new_v4(), "token")
    }

    fn trip(days: u32) -> NewTrip {
        NewTrip {
            destination: "Yellowstone National Park".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 4),
            day_count: days,
            traveler_count: 2,
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_create_stores_nothing() {
        let store = InMemoryTripStore::new();
        let err = store.create(None, trip(3)).await.unwrap_err();
        assert!(matches!(err, StoreError::Authorization(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_dates_rejected() {
        let store = InMemoryTripStore::new();
        let me = identity();
        let no_end = NewTrip {
            end_date: None,
            ..trip(3)
        };
        let err = store.create(Some(&me), no_end).await.unwrap_err();
        assert_eq!(err, StoreError::Validation("end date is required".to_string()));

        let no_start = NewTrip {
            start_date: None,
            ..trip(3)
        };
        assert!(matches!(
            store.create(Some(&me), no_start).await,
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_authorization_checked_before_dates() {
        let store = InMemoryTripStore::new();
        let err = store.create(None, NewTrip::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_list_newest_first_and_scoped() {
        let store = InMemoryTripStore::new();
        let me = identity();
        let other = identity();

        let first = store.create(Some(&me), trip(1)).await.unwrap();
        let second = store.create(Some(&me), trip(2)).await.unwrap();
        store.create(Some(&other), trip(5)).await.unwrap();

        let mine = store.list(&me).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);
        assert!(mine.iter().all(|t| t.owner == me.user_id));
        assert_eq!(store.list(&other).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_only_own_rows() {
        let store = InMemoryTripStore::new();
        let me = identity();
        let other = identity();
        let saved = store.create(Some(&me), trip(3)).await.unwrap();

        assert!(!store.delete(&other, saved.id).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.delete(&me, saved.id).await.unwrap());
        assert!(store.list(&me).await.unwrap().is_empty());
        assert!(!store.delete(&me, saved.id).await.unwrap());
    }

    #[test]
    fn test_list_on_empty_store() {
        let store = InMemoryTripStore::new();
        let trips = tokio_test::block_on(store.list(&identity()));
        tokio_test::assert_ok!(&trips);
        assert!(trips.unwrap().is_empty());
    }

    #[test]
    fn test_row_format() -> anyhow::Result<()> {
        let json = r#"{
            "id": "8f9a3c1e-2b4d-4e6f-8a1b-3c5d7e9f0a2b",
            "user_id": "1b2c3d4e-5f60-4718-9a0b-1c2d3e4f5a6b",
            "destination": "Yellowstone National Park",
            "start_date": "2025-08-01",
            "end_date": "2025-08-04",
            "days": 3,
            "travelers": 2,
            "created_at": "2025-06-01T12:30:00Z"
        }"#;
        let saved: SavedTrip = serde_json::from_str(json)?;
        assert_eq!(saved.day_count, 3);
        assert_eq!(saved.traveler_count, 2);
        assert_eq!(saved.start_date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        Ok(())
    }

    #[test]
    fn test_new_trip_from_request() {
        let request = TripRequest::new("Boise", 4, 3, NaiveDate::from_ymd_opt(2025, 9, 2), None).unwrap();
        let new_trip = NewTrip::from(&request);
        assert_eq!(new_trip.day_count, 4);
        assert_eq!(new_trip.traveler_count, 3);
        assert_eq!(new_trip.end_date, None);
        assert_eq!(new_trip.destination, "Yellowstone National Park");
    }

    fn rest_store() -> RestTripStore {
        RestTripStore::new(StoreConfig {
            base_url: "https://project.supabase.co".to_string(),
            anon_key: "anon-key".to_string(),
            table: "saved_trips".to_string(),
        })
    }

    fn query(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_rest_list_request_is_owner_scoped() -> anyhow::Result<()> {
        let store = rest_store();
        let me = Identity::new(Uuid::new_v4(), "user-jwt");
        let request = store.list_request(&me).build()?;

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/saved_trips");
        assert_eq!(
            query(&request),
            vec![
                ("select".to_string(), "*".to_string()),
                ("user_id".to_string(), format!("eq.{}", me.user_id)),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert_eq!(header(&request, "authorization"), Some("Bearer user-jwt"));
        Ok(())
    }

    #[test]
    fn test_rest_insert_request() -> anyhow::Result<()> {
        let store = rest_store();
        let me = identity();
        let row = TripRow {
            user_id: me.user_id,
            destination: "Yellowstone National Park",
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            days: 3,
            travelers: 2,
        };
        let request = store.insert_request(&me, &row).build()?;

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(header(&request, "prefer"), Some("return=representation"));
        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert!(request.url().query().is_none());

        let body = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_slice(body)?;
        assert_eq!(value["user_id"], me.user_id.to_string());
        assert_eq!(value["days"], 3);
        assert_eq!(value["travelers"], 2);
        assert_eq!(value["start_date"], "2025-08-01");
        assert!(value.get("id").is_none());
        Ok(())
    }

    #[test]
    fn test_rest_delete_request_targets_one_row() -> anyhow::Result<()> {
        let store = rest_store();
        let me = identity();
        let id = Uuid::new_v4();
        let request = store.delete_request(&me, id).build()?;

        assert_eq!(request.method(), &reqwest::Method::DELETE);
        assert_eq!(query(&request), vec![("id".to_string(), format!("eq.{id}"))]);
        assert_eq!(header(&request, "prefer"), Some("return=representation"));
        assert_eq!(header(&request, "authorization"), Some("Bearer token"));
        Ok(())
    }

    #[test]
    fn test_rest_status_mapping() {
        assert!(matches!(
            status_error(reqwest::StatusCode::UNAUTHORIZED, ""),
            StoreError::Authorization(_)
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::FORBIDDEN, "policy"),
            StoreError::Authorization(_)
        ));
        assert_eq!(
            status_error(reqwest::StatusCode::CONFLICT, "duplicate key"),
            StoreError::Backend("409 Conflict: duplicate key".to_string())
        );
    }

    #[tokio::test]
    async fn test_rest_create_without_identity_sends_nothing() {
        // nothing listens here; both errors come before any request
        let store = RestTripStore::new(StoreConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            anon_key: "anon-key".to_string(),
            table: "saved_trips".to_string(),
        });
        let err = store.create(None, trip(3)).await.unwrap_err();
        assert!(matches!(err, StoreError::Authorization(_)));
        let err = store
            .create(Some(&identity()), NewTrip { start_date: None, ..trip(3) })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
