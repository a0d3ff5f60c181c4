//! `docmentor doctor`: Diagnose configuration and provider health.

use docmentor_config::AppConfig;
use tracing::warn;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 DocMentor Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file, using defaults (run `docmentor onboard` to create one)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    println!("  Provider: {}", config.default_provider);
    println!("  Model:    {}", config.model());

    match docmentor_providers::router::default_from_config(&config) {
        Ok(provider) => {
            if config.has_api_key() {
                println!("  ✅ API key configured");
            } else {
                println!("  ✅ No API key needed for local provider");
            }

            match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider reachable"),
                Ok(false) => {
                    println!("  ❌ Provider rejected the health check (check the API key)");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider unreachable: {e}");
                    issues += 1;
                }
            }

            if let Ok(models) = provider.list_models().await {
                let model = config.model();
                if models.is_empty() {
                    println!("  ⚠️  Provider listed no models");
                } else if models.iter().any(|m| m == model) {
                    println!("  ✅ Model '{model}' available");
                } else {
                    // Listings can lag behind what the API serves; not counted as an issue.
                    println!("  ⚠️  Model '{model}' not in the provider's model list");
                    warn!(model, listed = models.len(), "Configured model not listed by provider");
                }
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("     Set GEMINI_API_KEY or DOCMENTOR_API_KEY, or add api_key to config.toml");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
