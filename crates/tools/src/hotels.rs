//! Hotel recommendation tool — static lookup tables keyed by city and
//! budget tier (economy / mid-range / luxury).

use async_trait::async_trait;
use wayfinder_core::error::ToolError;
use wayfinder_core::tool::{Tool, ToolArgs};

const DEFAULT_BUDGET: &str = "mid-range";

/// (city, budget tier, recommendation block)
const HOTELS: &[(&str, &str, &str)] = &[
    (
        "Beijing",
        "economy",
        "Economy hotels in Beijing:\n\
         1. Home Inn (Wangfujing)\n\
         2. 7 Days Inn\n\
         3. Hanting Hotel\n\
         4. GreenTree Inn",
    ),
    (
        "Beijing",
        "mid-range",
        "Mid-range hotels in Beijing:\n\
         1. Ji Hotel\n\
         2. Atour Hotel\n\
         3. Crystal Orange Hotel\n\
         4. Yitel",
    ),
    (
        "Beijing",
        "luxury",
        "Luxury hotels in Beijing:\n\
         1. The Peninsula Beijing\n\
         2. Waldorf Astoria Beijing\n\
         3. Rosewood Beijing\n\
         4. Park Hyatt Beijing",
    ),
    (
        "Shanghai",
        "economy",
        "Economy hotels in Shanghai:\n\
         1. Home Inn (Nanjing Road)\n\
         2. Jinjiang Inn\n\
         3. Pod Inn\n\
         4. Super 8",
    ),
    (
        "Shanghai",
        "mid-range",
        "Mid-range hotels in Shanghai:\n\
         1. Ji Hotel\n\
         2. Atour Hotel\n\
         3. Crystal Orange Hotel\n\
         4. Yitel",
    ),
    (
        "Shanghai",
        "luxury",
        "Luxury hotels in Shanghai:\n\
         1. Waldorf Astoria Shanghai on the Bund\n\
         2. The Ritz-Carlton Shanghai, Pudong\n\
         3. The Peninsula Shanghai\n\
         4. Bulgari Hotel Shanghai",
    ),
];

pub struct HotelsTool;

#[async_trait]
impl Tool for HotelsTool {
    fn name(&self) -> &str {
        "get_hotels"
    }

    fn description(&self) -> &str {
        "Recommend hotels for a city within a budget tier \
         (economy, mid-range, or luxury)."
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let city = args
            .get("city")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'city' argument".into()))?;
        let budget = args
            .get("budget")
            .map(String::as_str)
            .unwrap_or(DEFAULT_BUDGET);

        let hit = HOTELS
            .iter()
            .find(|(c, b, _)| *c == city.as_str() && b.eq_ignore_ascii_case(budget))
            .map(|(_, _, text)| *text);

        match hit {
            Some(text) => Ok(text.to_string()),
            None => Ok(format!(
                "No curated list for {budget} hotels in {city}; try a booking \
                 platform such as Trip.com or Booking.com for current options."
            )),
        }
    }
}
