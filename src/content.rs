// Static park information shown alongside the planner

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attraction {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonGuide {
    pub season: &'static str,
    pub months: &'static str,
    pub highlights: &'static [&'static str],
    pub note: &'static str,
}

// A titled list of short tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TipGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LodgingKind {
    InPark,
    Camping,
    GatewayTown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lodging {
    pub name: &'static str,
    pub kind: LodgingKind,
    pub note: &'static str,
}

pub const LIMITED_SERVICE_NOTICE: &str = "Cell service is limited throughout the park. \
Download maps and information before your visit. Be prepared for crowds during summer \
months and arrive early at popular attractions.";

pub static ATTRACTIONS: [Attraction; 5] = [
    Attraction {
        title: "Old Faithful Geyser",
        description: "The world's most famous geyser erupts approximately every 90 minutes",
    },
    Attraction {
        title: "Grand Prismatic Spring",
        description: "The largest hot spring in the US, with stunning rainbow colors",
    },
    Attraction {
        title: "Yellowstone Lake",
        description: "One of the largest high-elevation lakes in North America",
    },
    Attraction {
        title: "Grand Canyon of the Yellowstone",
        description: "Dramatic canyon with spectacular waterfalls and colorful rock formations",
    },
    Attraction {
        title: "Wildlife Viewing",
        description: "Encounter bison, bears, wolves, and elk throughout the park",
    },
];

pub static BEST_TIME_TO_VISIT: [SeasonGuide; 4] = [
    SeasonGuide {
        season: "Summer",
        months: "June - August",
        highlights: &[
            "Warm weather perfect for hiking",
            "All park areas accessible",
            "Peak wildlife activity",
        ],
        note: "Most crowded season - book early!",
    },
    SeasonGuide {
        season: "Fall",
        months: "September - October",
        highlights: &["Beautiful autumn colors", "Fewer visitors", "Elk rutting season"],
        note: "Best for photographers",
    },
    SeasonGuide {
        season: "Winter",
        months: "November - February",
        highlights: &[
            "Snowy wonderland scenery",
            "Unique snowmobile & snowcoach tours",
            "Steaming geysers in frost",
        ],
        note: "Limited road access",
    },
    SeasonGuide {
        season: "Spring",
        months: "March - May",
        highlights: &[
            "Baby animals everywhere",
            "Wildflowers blooming",
            "Great bear viewing",
        ],
        note: "Variable weather conditions",
    },
];

pub static KNOW_BEFORE_YOU_GO: [TipGroup; 4] = [
    TipGroup {
        title: "Entrance Fees",
        items: &[
            "Private vehicle: $35 (7 days)",
            "Motorcycle: $30 (7 days)",
            "Per person: $20 (7 days)",
            "Annual pass: $70 (best value)",
        ],
    },
    TipGroup {
        title: "Wildlife Safety",
        items: &[
            "Stay 100+ yards from bears & wolves",
            "Stay 25+ yards from bison & elk",
            "Never feed or approach animals",
            "Carry bear spray on trails",
        ],
    },
    TipGroup {
        title: "Thermal Area Safety",
        items: &[
            "Stay on boardwalks & designated trails",
            "Water can be boiling temperature",
            "Ground may be unstable",
            "Keep children and pets close",
        ],
    },
    TipGroup {
        title: "What to Pack",
        items: &[
            "Layers for variable weather",
            "Sunscreen & sunglasses",
            "Reusable water bottle",
            "Binoculars for wildlife viewing",
        ],
    },
];

pub static TRAVEL_TIPS: [TipGroup; 3] = [
    TipGroup {
        title: "Essential Packing",
        items: &[
            "Layered clothing for variable weather",
            "Hiking boots and comfortable walking shoes",
            "Sunscreen, hat, and sunglasses",
            "Reusable water bottle",
            "Binoculars for wildlife viewing",
            "Camera and extra batteries",
        ],
    },
    TipGroup {
        title: "Best Visiting Times",
        items: &[
            "Summer (June-August): Warmest weather, all roads open",
            "Spring (April-May): Wildlife active, fewer crowds",
            "Fall (September-October): Beautiful colors, pleasant temps",
            "Winter (November-March): Unique snow experiences, limited access",
        ],
    },
    TipGroup {
        title: "Important Information",
        items: &[
            "Park entrance fee: $35 per vehicle (7 days)",
            "Annual pass available for $70",
            "Cell service limited inside park",
            "Stay 100 yards from bears, 25 yards from other wildlife",
            "Never feed or approach wildlife",
            "Book lodging 6-12 months in advance",
        ],
    },
];

pub static WHERE_TO_STAY: [Lodging; 11] = [
    Lodging {
        name: "Old Faithful Inn",
        kind: LodgingKind::InPark,
        note: "Iconic log structure",
    },
    Lodging {
        name: "Lake Yellowstone Hotel",
        kind: LodgingKind::InPark,
        note: "Elegant lakeside",
    },
    Lodging {
        name: "Mammoth Hot Springs Hotel",
        kind: LodgingKind::InPark,
        note: "",
    },
    Lodging {
        name: "Canyon Lodge & Cabins",
        kind: LodgingKind::InPark,
        note: "",
    },
    Lodging {
        name: "Park campgrounds",
        kind: LodgingKind::Camping,
        note: "12 campgrounds (some reservable)",
    },
    Lodging {
        name: "RV and tent sites",
        kind: LodgingKind::Camping,
        note: "Backcountry camping needs a permit",
    },
    Lodging {
        name: "West Yellowstone, MT",
        kind: LodgingKind::GatewayTown,
        note: "Most popular gateway, minutes from West Entrance",
    },
    Lodging {
        name: "Gardiner, MT",
        kind: LodgingKind::GatewayTown,
        note: "North Entrance, year-round access, charming town",
    },
    Lodging {
        name: "Jackson, WY",
        kind: LodgingKind::GatewayTown,
        note: "Upscale option near South Entrance & Grand Teton",
    },
    Lodging {
        name: "Cody, WY",
        kind: LodgingKind::GatewayTown,
        note: "East Entrance, Wild West heritage town",
    },
    Lodging {
        name: "Vacation rentals",
        kind: LodgingKind::GatewayTown,
        note: "From $180/night",
    },
];

pub fn lodging_of_kind(kind: LodgingKind) -> impl Iterator<Item = &'static Lodging> {
    WHERE_TO_STAY.iter().filter(move |lodging| lodging.kind == kind)
}
