// Seasonal pricing: classifies a trip start date into a park season

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    PeakSummer,
    Shoulder,
    OffSeason,
}

impl Season {
    /// Season for a 0-indexed month (0 = January).
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            5..=7 => Season::PeakSummer,
            4 | 8 => Season::Shoulder,
            _ => Season::OffSeason,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month0(date.month0())
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Season::PeakSummer => 1.3,
            Season::Shoulder => 1.1,
            Season::OffSeason => 0.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::PeakSummer => "Peak Summer",
            Season::Shoulder => "Shoulder",
            Season::OffSeason => "Off-Season",
        }
    }
}

// No start date means standard pricing
pub fn seasonal_multiplier(start_date: Option<NaiveDate>) -> f64 {
    start_date.map_or(1.0, |date| Season::from_date(date).multiplier())
}

pub fn season_label(start_date: Option<NaiveDate>) -> &'static str {
    start_date.map_or("Standard", |date| Season::from_date(date).label())
}
