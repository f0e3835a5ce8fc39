//! Built-in travel tool implementations for Wayfinder.
//!
//! Tools give the agent the ability to answer travel questions:
//! live weather lookups, attraction recommendations adjusted for the
//! weather, and hotel recommendations by budget tier.

pub mod attractions;
pub mod hotels;
pub mod weather;

use wayfinder_core::tool::ToolRegistry;

pub use attractions::AttractionTool;
pub use hotels::HotelsTool;
pub use weather::WeatherTool;

/// Create a default tool registry with all built-in travel tools.
pub fn default_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register(Box::new(WeatherTool::new()));
    registry.register(Box::new(AttractionTool));
    registry.register(Box::new(HotelsTool));
    registry
}
