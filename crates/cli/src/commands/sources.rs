//! `medtriage sources` — List the trusted medical sources.

use super::load_config;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    println!("🔗 Trusted Sources");
    println!("==================\n");

    if !config.gatherer.enabled {
        println!("  (web context disabled in config)\n");
    }

    for source in &config.gatherer.sources {
        println!("  {:<14} {}", source.name, source.search_url);
    }

    println!();
    println!(
        "  Up to {} paragraphs per page, {} characters in total.",
        config.gatherer.max_paragraphs, config.gatherer.max_chars
    );
    println!(
        "  Summarization: {}",
        if config.gatherer.summarize { "on" } else { "off" }
    );

    Ok(())
}
