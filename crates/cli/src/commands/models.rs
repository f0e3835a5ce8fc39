//! `wayfinder models` — list model aliases and, when a key is
//! configured, the endpoint's live model listing.

use wayfinder_config::{known_models, AppConfig};
use wayfinder_core::ChatProvider;
use wayfinder_providers::OpenAiCompatProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Known aliases:");
    for &(alias, full) in known_models() {
        println!("  {alias:<14} -> {full}");
    }

    match config.api_key.clone() {
        Some(api_key) => {
            let provider = OpenAiCompatProvider::new(
                "siliconflow",
                &config.base_url,
                api_key,
                config.timeout_secs,
            )?;
            println!();
            println!("Models at {}:", config.base_url);
            for model in provider.list_models().await? {
                println!("  {model}");
            }
        }
        None => {
            println!();
            println!("(no API key configured; skipping remote model listing)");
        }
    }

    Ok(())
}
