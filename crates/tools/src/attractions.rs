//! Attraction recommendation tool — static lookup tables keyed by city
//! and weather category.
//!
//! The weather argument is free text (usually the output of the weather
//! tool relayed by the model), so it is classified by keyword into one
//! of five categories. Both English and Chinese weather keywords are
//! recognized, since upstream weather descriptions come in either
//! language.

use async_trait::async_trait;
use wayfinder_core::error::ToolError;
use wayfinder_core::tool::{Tool, ToolArgs};

/// Weather categories the recommendation tables are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherKind {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
    Foggy,
    Unknown,
}

impl WeatherKind {
    fn classify(weather: &str) -> Self {
        let w = weather.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| w.contains(k));

        if has(&["sunny", "clear", "晴"]) {
            Self::Sunny
        } else if has(&["rain", "drizzle", "shower", "雨"]) {
            Self::Rainy
        } else if has(&["cloud", "overcast", "阴"]) {
            Self::Cloudy
        } else if has(&["snow", "雪"]) {
            Self::Snowy
        } else if has(&["fog", "mist", "haze", "雾"]) {
            Self::Foggy
        } else {
            Self::Unknown
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Snowy => "snowy",
            Self::Foggy => "foggy",
            Self::Unknown => "typical",
        }
    }
}

/// (city, weather kind, recommendation block)
const ATTRACTIONS: &[(&str, WeatherKind, &str)] = &[
    (
        "Beijing",
        WeatherKind::Sunny,
        "Sunny-day picks for Beijing:\n\
         1. The Forbidden City - red walls and golden roofs shine in the sun\n\
         2. The Summer Palace - best time for a boat ride on Kunming Lake\n\
         3. Badaling Great Wall - clear views for miles\n\
         4. Temple of Heaven Park - imperial architecture at its best\n\
         5. Olympic Park - great for outdoor activities",
    ),
    (
        "Beijing",
        WeatherKind::Rainy,
        "Rainy-day picks for Beijing:\n\
         1. National Museum of China - vast collections to explore\n\
         2. Capital Museum - Beijing's history under one roof\n\
         3. China Science and Technology Museum - hands-on exhibits\n\
         4. 798 Art District - indoor galleries and cafes\n\
         5. Wangfujing - shopping and food in one stop",
    ),
    (
        "Beijing",
        WeatherKind::Cloudy,
        "Cloudy-day picks for Beijing:\n\
         1. The Summer Palace - the gardens have a quiet charm under grey skies\n\
         2. Old Summer Palace (Yuanmingyuan) - historic ruins\n\
         3. Shichahai - a comfortable lakeside stroll\n\
         4. Nanluoguxiang - hutong shops and snacks\n\
         5. Lama Temple - an active Buddhist temple",
    ),
    (
        "Beijing",
        WeatherKind::Snowy,
        "Snowy-day picks for Beijing:\n\
         1. The Forbidden City - the palace under snow is otherworldly\n\
         2. The Summer Palace - imperial gardens in white\n\
         3. Jingshan Park - overlook the snow-covered palace\n\
         4. Beihai Park - winter scenery by the lake",
    ),
    (
        "Beijing",
        WeatherKind::Foggy,
        "Foggy-day indoor picks for Beijing:\n\
         1. National Centre for the Performing Arts - catch a show\n\
         2. Beijing Planetarium - explore the universe\n\
         3. Laoshe Teahouse - traditional culture and tea",
    ),
    (
        "Shanghai",
        WeatherKind::Sunny,
        "Sunny-day picks for Shanghai:\n\
         1. The Bund - riverside promenade with skyline views\n\
         2. Yu Garden - classical gardens in full light\n\
         3. Century Park - picnics and bike rides\n\
         4. Zhujiajiao Water Town - canals and old bridges",
    ),
    (
        "Shanghai",
        WeatherKind::Rainy,
        "Rainy-day picks for Shanghai:\n\
         1. Shanghai Museum - bronzes, ceramics, calligraphy\n\
         2. Shanghai Science and Technology Museum - family favorite\n\
         3. Xintiandi - covered lanes, restaurants and boutiques\n\
         4. Power Station of Art - contemporary exhibitions",
    ),
];

/// Generic fallbacks for cities without a curated table.
fn generic_recommendation(city: &str, kind: WeatherKind) -> String {
    match kind {
        WeatherKind::Rainy => format!(
            "It's rainy in {city} - indoor sights are the way to go: museums, \
             art galleries, science centers, and shopping malls."
        ),
        WeatherKind::Sunny => format!(
            "It's sunny in {city} - perfect for the outdoors: parks, lakesides, \
             hills, and historic open-air sites."
        ),
        _ => format!(
            "Well-known spots in {city} worth a visit: the city center, \
             cultural districts, and local food streets."
        ),
    }
}

pub struct AttractionTool;

#[async_trait]
impl Tool for AttractionTool {
    fn name(&self) -> &str {
        "get_attraction"
    }

    fn description(&self) -> &str {
        "Recommend tourist attractions for a city, adjusted for the current weather."
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let city = args
            .get("city")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'city' argument".into()))?;
        let kind = args
            .get("weather")
            .map(|w| WeatherKind::classify(w))
            .unwrap_or(WeatherKind::Unknown);

        // Exact city + weather match first, then any entry for the city
        let exact = ATTRACTIONS
            .iter()
            .find(|(c, k, _)| *c == city.as_str() && *k == kind)
            .map(|(_, _, text)| *text);

        if let Some(text) = exact {
            return Ok(format!(
                "Given the {} weather, recommended attractions in {city}:\n\n{text}",
                kind.label()
            ));
        }

        let any_for_city = ATTRACTIONS
            .iter()
            .find(|(c, _, _)| *c == city.as_str())
            .map(|(_, _, text)| *text);

        if let Some(text) = any_for_city {
            return Ok(format!("Recommended attractions in {city}:\n\n{text}"));
        }

        Ok(generic_recommendation(city, kind))
    }
}
