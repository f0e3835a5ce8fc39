//! `wayfinder tools` — list the built-in tools.

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = wayfinder_tools::default_registry();

    let mut names = registry.names();
    names.sort_unstable();

    println!("Built-in tools:");
    for name in names {
        if let Some(tool) = registry.get(&name) {
            println!("  {name:<16} {}", tool.description());
        }
    }

    Ok(())
}
