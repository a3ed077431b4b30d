//! `medtriage chat` — Interactive triage session.

use std::io::Write;
use std::sync::Arc;
use medtriage_agent::{ChatSession, OffTopicFilter};
use medtriage_channels::CliChannel;
use medtriage_core::channel::Channel;

use super::{build_agent, load_config};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let agent = Arc::new(build_agent(&config)?);

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     MedTriage — AI Healthcare Triage Chat      ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  This assistant does NOT diagnose or prescribe.");
    println!("  It gives general guidance using trusted sources");
    println!("  (NHS, Mayo Clinic, MedlinePlus). Always consult a");
    println!("  qualified doctor for medical concerns.");
    println!();
    println!("  Provider:  {}", agent.provider_name());
    println!("  Model:     {}", agent.model());
    println!(
        "  Sources:   {}",
        if config.gatherer.enabled { "web" } else { "disabled" }
    );
    println!();
    println!("  Describe your symptoms and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut session = ChatSession::new(agent, OffTopicFilter::from_config(&config.prefilter));
    let channel = CliChannel::new();
    let mut rx = channel.start().await.map_err(|e| format!("Channel error: {e}"))?;

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(result) = rx.recv().await {
        match result {
            Ok(chan_msg) => {
                eprint!("  Analyzing your symptoms...");
                let replies = session.handle(&chan_msg.content).await;
                eprint!("\r                             \r");
                println!();

                for reply in replies {
                    channel.send(&chan_msg.chat_id, &reply).await?;
                }

                print!("  You > ");
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        }
    }

    println!();
    println!("  Take care! 👋");
    println!();

    Ok(())
}
