//! `medtriage doctor` — Diagnose configuration and provider health.

use medtriage_config::AppConfig;
use medtriage_sources::WebContextGatherer;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 MedTriage Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_path();
    if !config_path.exists() {
        println!("  ⚠️  No config file — using defaults (run `medtriage onboard`)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config before running further checks.");
            return Ok(());
        }
    };

    // Check provider
    let router = medtriage_providers::build_from_config(&config);
    match router.default() {
        Some(provider) => match provider.health_check().await {
            Ok(true) => {
                println!("  ✅ Provider '{}' reachable", provider.name());

                let model = config.effective_model();
                match provider.list_models().await {
                    Ok(models) if models.is_empty() => {}
                    Ok(models) if models.iter().any(|m| m == model) => {
                        println!("  ✅ Model '{model}' available");
                    }
                    Ok(_) => {
                        println!("  ⚠️  Model '{model}' not listed by '{}'", provider.name());
                        issues += 1;
                    }
                    Err(e) => {
                        println!("  ⚠️  Could not list models: {e}");
                        issues += 1;
                    }
                }
            }
            Ok(false) => {
                println!("  ❌ Provider '{}' not responding", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                issues += 1;
            }
        },
        None => {
            println!("  ❌ No default provider configured");
            issues += 1;
        }
    }

    // Check gatherer
    if config.gatherer.enabled {
        match WebContextGatherer::from_config(&config.gatherer) {
            Ok(gatherer) => println!("  ✅ {} trusted sources configured", gatherer.sources().len()),
            Err(e) => {
                println!("  ❌ Trusted sources invalid: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ⚠️  Web context disabled — triage runs without source text");
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
