//! `wayfinder ask` — run the agent loop on a single request.

use std::sync::Arc;
use wayfinder_agent::{ReactAgent, RunState};
use wayfinder_config::AppConfig;
use wayfinder_providers::OpenAiCompatProvider;

pub async fn run(
    query: String,
    stream: bool,
    max_iterations: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export SILICONFLOW_API_KEY='sk-...'");
        eprintln!("    export WAYFINDER_API_KEY='sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let provider = Arc::new(OpenAiCompatProvider::new(
        "siliconflow",
        &config.base_url,
        api_key,
        config.timeout_secs,
    )?);
    let tools = Arc::new(wayfinder_tools::default_registry());

    let mut agent = ReactAgent::new(
        provider,
        &config.default_model,
        config.default_temperature,
        tools,
    )
    .with_max_tokens(config.default_max_tokens)
    .with_max_iterations(max_iterations.unwrap_or(config.max_iterations as usize))
    .with_streaming(stream);

    eprint!("  Thinking...");
    let answer = agent.run(&query).await?;
    eprint!("\r              \r");

    match agent.state() {
        RunState::Exhausted => {
            eprintln!("  (stopped at the iteration limit; best available answer below)");
        }
        RunState::AbortedParseError => {
            eprintln!("  (the model's reply could not be interpreted)");
        }
        _ => {}
    }
    println!("{answer}");

    Ok(())
}
