// Trip parameters collected from the planner form
// Everything past this module can assume the counts are in range

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PARK_NAME: &str = "Yellowstone National Park";
// Jackson Hole airport, the gateway used for flights, hotels and cars
pub const GATEWAY_CODE: &str = "JAC";

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;
pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Day count must be between 1 and 14, got {0}")]
    DayCountOutOfRange(i64),

    #[error("Traveler count must be between 1 and 20, got {0}")]
    TravelerCountOutOfRange(i64),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

// Raw form submission, before any checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripForm {
    pub origin_city: String,
    pub destination_city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_count: i64,
    pub traveler_count: i64,
}

impl TripForm {
    pub fn validate(&self) -> Result<TripRequest, ValidationError> {
        let origin = self.origin_city.trim();
        if origin.is_empty() {
            return Err(ValidationError::MissingField("origin_city"));
        }

        let destination = self
            .destination_city
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(PARK_NAME);

        let day_count = u32::try_from(self.day_count)
            .ok()
            .filter(|d| (MIN_DAYS..=MAX_DAYS).contains(d))
            .ok_or(ValidationError::DayCountOutOfRange(self.day_count))?;

        let traveler_count = u32::try_from(self.traveler_count)
            .ok()
            .filter(|t| (MIN_TRAVELERS..=MAX_TRAVELERS).contains(t))
            .ok_or(ValidationError::TravelerCountOutOfRange(self.traveler_count))?;

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::EndBeforeStart { start, end });
            }
        }

        Ok(TripRequest {
            origin_city: origin.to_string(),
            destination_city: destination.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            day_count,
            traveler_count,
        })
    }
}

/// A validated trip. Fields are private so a request can only come out of
/// [`TripForm::validate`] or [`TripRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    origin_city: String,
    destination_city: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    day_count: u32,
    traveler_count: u32,
}

impl TripRequest {
    pub fn new(
        origin_city: &str,
        day_count: u32,
        traveler_count: u32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        TripForm {
            origin_city: origin_city.to_string(),
            destination_city: None,
            start_date,
            end_date,
            day_count: day_count.into(),
            traveler_count: traveler_count.into(),
        }
        .validate()
    }

    pub fn origin_city(&self) -> &str {
        &self.origin_city
    }

    pub fn destination_city(&self) -> &str {
        &self.destination_city
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn traveler_count(&self) -> u32 {
        self.traveler_count
    }

    /// Both dates, when the traveler picked them.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }

    // Three-letter airport code guessed from the free-text origin
    pub fn origin_code(&self) -> String {
        self.origin_city.chars().take(3).collect::<String>().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TripForm {
        TripForm {
            origin_city: "  Denver ".to_string(),
            destination_city: None,
            start_date: None,
            end_date: None,
            day_count: 3,
            traveler_count: 2,
        }
    }

    #[test]
    fn test_valid_form() {
        let request = form().validate().unwrap();
        assert_eq!(request.origin_city(), "Denver");
        assert_eq!(request.destination_city(), PARK_NAME);
        assert_eq!(request.day_count(), 3);
        assert_eq!(request.traveler_count(), 2);
        assert_eq!(request.origin_code(), "DEN");
        assert!(request.date_range().is_none());
    }

    #[test]
    fn test_rejects_blank_origin() {
        let f = TripForm {
            origin_city: "   ".to_string(),
            ..form()
        };
        assert_eq!(f.validate(), Err(ValidationError::MissingField("origin_city")));
    }

    #[test]
    fn test_count_bounds() {
        for days in [0, -1, 15] {
            let f = TripForm {
                day_count: days,
                ..form()
            };
            assert_eq!(f.validate(), Err(ValidationError::DayCountOutOfRange(days)));
        }
        for travelers in [0, 21] {
            let f = TripForm {
                traveler_count: travelers,
                ..form()
            };
            assert_eq!(
                f.validate(),
                Err(ValidationError::TravelerCountOutOfRange(travelers))
            );
        }
        assert!(TripRequest::new("Boise", 14, 20, None, None).is_ok());
        assert!(TripRequest::new("Boise", 1, 1, None, None).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let start = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 8).unwrap();
        let err = TripRequest::new("Boise", 3, 2, Some(start), Some(end)).unwrap_err();
        assert_eq!(err, ValidationError::EndBeforeStart { start, end });
    }

    #[test]
    fn test_origin_code_short_city() {
        let request = TripRequest::new("sf", 2, 1, None, None).unwrap();
        assert_eq!(request.origin_code(), "SF");
    }
}
