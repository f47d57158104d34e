// Day-by-day itinerary built from a fixed pool of day plans

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityIcon {
    Mountain,
    Star,
    MapPin,
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub time: &'static str,
    pub label: &'static str,
    pub icon: ActivityIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub title: &'static str,
    pub activities: [Activity; 4],
}

// One entry of the generated itinerary; `day` is 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub plan: &'static DayPlan,
}

const fn activity(time: &'static str, label: &'static str, icon: ActivityIcon) -> Activity {
    Activity { time, label, icon }
}

pub static DAY_TEMPLATES: [DayPlan; 4] = [
    DayPlan {
        title: "Grand Canyon & Old Faithful",
        activities: [
            activity("8:00 AM", "Sunrise at Grand Canyon of Yellowstone", ActivityIcon::Mountain),
            activity("11:00 AM", "Old Faithful Geyser viewing", ActivityIcon::Star),
            activity("2:00 PM", "Upper Geyser Basin walk", ActivityIcon::MapPin),
            activity("5:00 PM", "Sunset at Fountain Paint Pot", ActivityIcon::Clock),
        ],
    },
    DayPlan {
        title: "Wildlife & Geothermal Wonders",
        activities: [
            activity("7:00 AM", "Lamar Valley wildlife watching", ActivityIcon::Mountain),
            activity("11:00 AM", "Mammoth Hot Springs terraces", ActivityIcon::Star),
            activity("3:00 PM", "Norris Geyser Basin", ActivityIcon::MapPin),
            activity("6:00 PM", "Boiling River hot springs", ActivityIcon::Clock),
        ],
    },
    DayPlan {
        title: "Lakes & Waterfalls",
        activities: [
            activity("8:00 AM", "Yellowstone Lake scenic drive", ActivityIcon::Mountain),
            activity("11:00 AM", "Lower Falls viewing platforms", ActivityIcon::Star),
            activity("2:00 PM", "Artist Point photo stop", ActivityIcon::MapPin),
            activity("5:00 PM", "Hayden Valley wildlife viewing", ActivityIcon::Clock),
        ],
    },
    DayPlan {
        title: "Hidden Gems & Scenic Routes",
        activities: [
            activity("8:00 AM", "Grand Prismatic Spring overlook", ActivityIcon::Mountain),
            activity("11:00 AM", "Biscuit Basin boardwalk", ActivityIcon::Star),
            activity("2:00 PM", "West Thumb Geyser Basin", ActivityIcon::MapPin),
            activity("5:00 PM", "Lake overlook sunset", ActivityIcon::Clock),
        ],
    },
];

/// Plan for a 0-based day index. Wraps around the template pool.
pub fn plan_for_day(day_index: u32) -> &'static DayPlan {
    &DAY_TEMPLATES[day_index as usize % DAY_TEMPLATES.len()]
}

pub fn select_itinerary(day_count: u32) -> Vec<ItineraryDay> {
    (0..day_count)
        .map(|index| ItineraryDay {
            day: index + 1,
            plan: plan_for_day(index),
        })
        .collect()
}

// Suggestions by trip length, shown before the traveler has planned anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedItinerary {
    pub duration: &'static str,
    pub title: &'static str,
    pub badge: &'static str,
    pub highlights: &'static [&'static str],
}

pub fn suggested_itineraries() -> &'static [SuggestedItinerary] {
    &SUGGESTED
}

static SUGGESTED: [SuggestedItinerary; 3] = [
    SuggestedItinerary {
        duration: "1 Day",
        title: "Park Highlights Loop",
        badge: "Quick Visit",
        highlights: &[
            "Old Faithful Geyser Basin",
            "Grand Prismatic Spring overlook",
            "Canyon & Lower Falls viewpoint",
            "Hayden Valley wildlife viewing",
        ],
    },
    SuggestedItinerary {
        duration: "3 Days",
        title: "Balanced Explorer",
        badge: "Recommended",
        highlights: &[
            "Upper & Lower Geyser Basins",
            "Grand Canyon of Yellowstone trails",
            "Lamar Valley wildlife safari",
            "Yellowstone Lake & West Thumb",
            "Norris Geyser Basin",
        ],
    },
    SuggestedItinerary {
        duration: "5-7 Days",
        title: "In-Depth Adventure",
        badge: "Complete Experience",
        highlights: &[
            "All major geyser basins & hot springs",
            "Multiple canyon hikes & waterfalls",
            "Extended wildlife watching",
            "Backcountry hiking trails",
            "Yellowstone Lake boat tour",
            "Lesser-known thermal features",
        ],
    },
];
