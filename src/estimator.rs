// Budget estimation: closed-form pricing rules plus the live-price merge
// Amounts are whole US dollars

use serde::{Deserialize, Serialize};

use crate::season::{seasonal_multiplier, Season};
use crate::trip::TripRequest;

pub type Usd = u64;

pub const BASE_FLIGHT_PER_PERSON: f64 = 400.0;
pub const BASE_HOTEL_PER_NIGHT: f64 = 180.0;
pub const BASE_CAR_PER_DAY: f64 = 60.0;
pub const FOOD_PER_PERSON_DAY: Usd = 80;
pub const ACTIVITIES_PER_PERSON_DAY: Usd = 50;
pub const VEHICLE_PASS: Usd = 35;
pub const PERSON_PASS: Usd = 20;
pub const TRAVELERS_PER_VEHICLE: u32 = 5;
// Live figures above this are malformed responses, not prices
pub const MAX_LIVE_PRICE: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineCategory {
    Flight,
    Hotel,
    CarRental,
    Food,
    Activities,
    ParkEntrance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    Static,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    pub category: LineCategory,
    pub label: String,
    pub amount: Usd,
    pub detail: String,
    pub source: SourceTag,
}

/// Line items in display order and their total.
///
/// There is no way to change an item after construction, so `total` always
/// equals the sum of `items`. A new request produces a new estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEstimate {
    items: Vec<BudgetLineItem>,
    total: Usd,
    season: Option<Season>,
    multiplier: f64,
    vehicles_needed: u32,
}

impl BudgetEstimate {
    fn from_items(
        items: Vec<BudgetLineItem>,
        season: Option<Season>,
        multiplier: f64,
        vehicles_needed: u32,
    ) -> Self {
        let total = items.iter().map(|item| item.amount).sum();
        Self {
            items,
            total,
            season,
            multiplier,
            vehicles_needed,
        }
    }

    pub fn items(&self) -> &[BudgetLineItem] {
        &self.items
    }

    pub fn total(&self) -> Usd {
        self.total
    }

    pub fn season(&self) -> Option<Season> {
        self.season
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn vehicles_needed(&self) -> u32 {
        self.vehicles_needed
    }

    pub fn item(&self, category: LineCategory) -> Option<&BudgetLineItem> {
        self.items.iter().find(|item| item.category == category)
    }

    pub fn amount(&self, category: LineCategory) -> Usd {
        self.item(category).map_or(0, |item| item.amount)
    }
}

/// Values returned by the live price lookups. `None` means "use the static rule".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveOverrides {
    // Whole-party round trip total
    pub flight_total: Option<f64>,
    pub hotel_per_night: Option<f64>,
    pub car_rental_total: Option<f64>,
}

impl LiveOverrides {
    pub fn is_empty(&self) -> bool {
        self.flight_total.is_none()
            && self.hotel_per_night.is_none()
            && self.car_rental_total.is_none()
    }
}

fn round_usd(value: f64) -> Usd {
    value.round().max(0.0) as Usd
}

// Zero, negative, NaN and out-of-range prices are treated as missing
fn usable(value: Option<f64>) -> Option<Usd> {
    value
        .filter(|v| v.is_finite() && *v > 0.0 && *v <= MAX_LIVE_PRICE)
        .map(round_usd)
}

fn plural<'a>(count: u32, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn vehicles_needed(traveler_count: u32) -> u32 {
    traveler_count.div_ceil(TRAVELERS_PER_VEHICLE)
}

/// Cheaper of the vehicle pass and per-person pass. Returns the fee and
/// whether the vehicle pass was chosen (it wins ties).
pub fn park_entrance_fee(traveler_count: u32) -> (Usd, bool) {
    let by_vehicle = VEHICLE_PASS * Usd::from(vehicles_needed(traveler_count));
    let by_person = PERSON_PASS * Usd::from(traveler_count);
    if by_vehicle <= by_person {
        (by_vehicle, true)
    } else {
        (by_person, false)
    }
}

/// Static estimate from the pricing rules alone.
pub fn estimate(request: &TripRequest) -> BudgetEstimate {
    estimate_with_overrides(request, &LiveOverrides::default())
}

/// Static estimate with each live value taking precedence over its rule.
pub fn estimate_with_overrides(request: &TripRequest, live: &LiveOverrides) -> BudgetEstimate {
    let days = request.day_count();
    let travelers = request.traveler_count();
    let days_usd = Usd::from(days);
    let travelers_usd = Usd::from(travelers);

    let season = request.start_date().map(Season::from_date);
    let multiplier = seasonal_multiplier(request.start_date());
    let vehicles = vehicles_needed(travelers);

    let flight_per_person = round_usd(BASE_FLIGHT_PER_PERSON * multiplier);
    let flight = match usable(live.flight_total) {
        Some(total) => BudgetLineItem {
            category: LineCategory::Flight,
            label: "Round-trip Flights".to_string(),
            amount: total,
            detail: format!(
                "{travelers} {} @ live fare",
                plural(travelers, "traveler", "travelers")
            ),
            source: SourceTag::Live,
        },
        None => BudgetLineItem {
            category: LineCategory::Flight,
            label: "Round-trip Flights".to_string(),
            amount: flight_per_person * travelers_usd,
            detail: format!(
                "{travelers} {} @ ${flight_per_person}/person",
                plural(travelers, "traveler", "travelers")
            ),
            source: SourceTag::Static,
        },
    };

    let live_hotel = usable(live.hotel_per_night)
        .and_then(|per_night| Some((per_night, per_night.checked_mul(days_usd)?)));
    let (hotel_per_night, hotel_amount, hotel_source) = match live_hotel {
        Some((per_night, amount)) => (per_night, amount, SourceTag::Live),
        None => {
            let per_night = round_usd(BASE_HOTEL_PER_NIGHT * multiplier);
            (per_night, per_night * days_usd, SourceTag::Static)
        }
    };
    let hotel = BudgetLineItem {
        category: LineCategory::Hotel,
        label: "Accommodation".to_string(),
        amount: hotel_amount,
        detail: format!("{days} nights @ ${hotel_per_night}/night"),
        source: hotel_source,
    };

    // Flat per-day figure; the vehicle count is only shown
    let (car_amount, car_source) = match usable(live.car_rental_total) {
        Some(total) => (total, SourceTag::Live),
        None => (
            round_usd(BASE_CAR_PER_DAY * f64::from(days) * multiplier),
            SourceTag::Static,
        ),
    };
    let car = BudgetLineItem {
        category: LineCategory::CarRental,
        label: "Car Rental".to_string(),
        amount: car_amount,
        detail: format!(
            "{vehicles} {} × {days} days",
            plural(vehicles, "vehicle", "vehicles")
        ),
        source: car_source,
    };

    let food = BudgetLineItem {
        category: LineCategory::Food,
        label: "Food & Dining".to_string(),
        amount: FOOD_PER_PERSON_DAY * travelers_usd * days_usd,
        detail: format!(
            "{travelers} {} × {days} days @ ${FOOD_PER_PERSON_DAY}/day",
            plural(travelers, "person", "people")
        ),
        source: SourceTag::Static,
    };

    let activities = BudgetLineItem {
        category: LineCategory::Activities,
        label: "Activities & Tours".to_string(),
        amount: ACTIVITIES_PER_PERSON_DAY * travelers_usd * days_usd,
        detail: format!(
            "{travelers} {} × {days} days @ ${ACTIVITIES_PER_PERSON_DAY}/day",
            plural(travelers, "person", "people")
        ),
        source: SourceTag::Static,
    };

    let (park_fee, vehicle_pass) = park_entrance_fee(travelers);
    let park = BudgetLineItem {
        category: LineCategory::ParkEntrance,
        label: "Park Entrance Fee".to_string(),
        amount: park_fee,
        detail: if vehicle_pass {
            format!(
                "Vehicle pass ({vehicles} {})",
                plural(vehicles, "vehicle", "vehicles")
            )
        } else {
            "Per-person pass (better value)".to_string()
        },
        source: SourceTag::Static,
    };

    BudgetEstimate::from_items(
        vec![flight, hotel, car, food, activities, park],
        season,
        multiplier,
        vehicles,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VehicleOption {
    pub label: &'static str,
    pub per_day: Usd,
}

// Rates relative to the SUV daily rate
const VEHICLE_RATES: [(&str, f64); 4] = [
    ("SUV - Recommended for Yellowstone", 1.0),
    ("Sedan (Economy)", 0.7),
    ("Crossover", 0.85),
    ("Minivan (7+ passengers)", 1.3),
];

/// Daily rate implied by a rental total, rounded to whole dollars.
pub fn car_rental_per_day(total: Usd, days: u32) -> Usd {
    if days == 0 {
        return total;
    }
    round_usd(total as f64 / f64::from(days))
}

/// The recommended SUV first, then the other vehicle types priced from its daily rate.
pub fn vehicle_options(per_day: Usd) -> Vec<VehicleOption> {
    VEHICLE_RATES
        .iter()
        .map(|&(label, factor)| VehicleOption {
            label,
            per_day: round_usd(per_day as f64 * factor),
        })
        .collect()
}
