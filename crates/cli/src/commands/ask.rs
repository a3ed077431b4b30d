//! `medtriage ask` — Triage a single query.

use medtriage_agent::{present, render_markdown};

use super::{build_agent, load_config};

pub async fn run(query: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let agent = build_agent(&config)?;

    if !json {
        eprint!("  Analyzing your symptoms...");
    }
    let report = agent.run_detailed(query).await;

    if json {
        println!("{}", report.result.to_wire_json());
    } else {
        eprint!("\r                             \r");
        println!("{}", render_markdown(&present(&report.result)));
    }

    Ok(())
}
