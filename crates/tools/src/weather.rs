//! Weather lookup tool backed by the free wttr.in JSON API.
//!
//! Chinese city names are mapped to their English spellings before the
//! request — wttr.in resolves those far more reliably. Timeouts and
//! upstream failures are reported as friendly observation text rather
//! than errors, so the agent can relay them to the user.

use async_trait::async_trait;
use tracing::debug;
use wayfinder_core::error::ToolError;
use wayfinder_core::tool::{Tool, ToolArgs};

/// Chinese city name → English spelling, for wttr.in queries.
const CITY_MAPPING: &[(&str, &str)] = &[
    ("北京", "Beijing"),
    ("上海", "Shanghai"),
    ("广州", "Guangzhou"),
    ("深圳", "Shenzhen"),
    ("杭州", "Hangzhou"),
    ("南京", "Nanjing"),
    ("成都", "Chengdu"),
    ("重庆", "Chongqing"),
    ("西安", "Xi'an"),
    ("武汉", "Wuhan"),
    ("苏州", "Suzhou"),
    ("厦门", "Xiamen"),
    ("青岛", "Qingdao"),
    ("大连", "Dalian"),
    ("天津", "Tianjin"),
    ("沈阳", "Shenyang"),
    ("哈尔滨", "Harbin"),
    ("长春", "Changchun"),
    ("郑州", "Zhengzhou"),
    ("长沙", "Changsha"),
    ("合肥", "Hefei"),
    ("福州", "Fuzhou"),
    ("昆明", "Kunming"),
    ("南宁", "Nanning"),
    ("贵阳", "Guiyang"),
    ("兰州", "Lanzhou"),
    ("银川", "Yinchuan"),
    ("西宁", "Xining"),
    ("乌鲁木齐", "Urumqi"),
    ("拉萨", "Lhasa"),
    ("香港", "Hongkong"),
    ("澳门", "Macau"),
    ("台北", "Taipei"),
];

/// Resolve a city name to the spelling wttr.in understands best.
fn query_name(city: &str) -> &str {
    CITY_MAPPING
        .iter()
        .find(|(zh, _)| *zh == city)
        .map(|(_, en)| *en)
        .unwrap_or(city)
}

pub struct WeatherTool {
    client: reqwest::Client,
}

impl WeatherTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Format the wttr.in `format=j1` payload into a readable report.
    fn format_report(city: &str, data: &serde_json::Value) -> Option<String> {
        let current = data["current_condition"].get(0)?;
        let desc = current["weatherDesc"][0]["value"].as_str()?;
        let temp_c = current["temp_C"].as_str()?;
        let feels_like = current["FeelsLikeC"].as_str().unwrap_or(temp_c);
        let humidity = current["humidity"].as_str().unwrap_or("N/A");
        let wind_speed = current["windspeedKmph"].as_str().unwrap_or("N/A");

        let mut lines = vec![
            format!("Current weather in {city}"),
            format!("  Conditions: {desc}"),
            format!("  Temperature: {temp_c}°C (feels like {feels_like}°C)"),
            format!("  Humidity: {humidity}%"),
            format!("  Wind speed: {wind_speed} km/h"),
        ];

        // Today's forecast, when present
        if let Some(today) = data["weather"].get(0)
            && let (Some(max), Some(min)) = (today["maxtempC"].as_str(), today["mintempC"].as_str())
        {
            lines.push(format!("  High/low: {max}°C / {min}°C"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up current weather conditions for a city. Returns conditions, \
         temperature, humidity, wind speed, and today's high/low."
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let city = args
            .get("city")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'city' argument".into()))?;

        let query = query_name(city);
        let url = format!("https://wttr.in/{query}?format=j1");

        debug!(%city, %query, "Weather lookup");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return Ok(format!(
                    "Weather lookup for {city} timed out, please try again later"
                ));
            }
            Err(e) => {
                return Ok(format!("Weather lookup for {city} failed: {e}"));
            }
        };

        if !response.status().is_success() {
            return Ok(format!(
                "Weather lookup for {city} failed: upstream returned {}",
                response.status()
            ));
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "get_weather".into(),
                reason: format!("invalid weather payload: {e}"),
            }
        })?;

        Self::format_report(city, &data).ok_or_else(|| ToolError::ExecutionFailed {
            tool_name: "get_weather".into(),
            reason: "weather payload missing current conditions".into(),
        })
    }
}
