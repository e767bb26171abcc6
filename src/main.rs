use anyhow::Context;
use clap::Parser;
use corpus_uploader::utils::{logger, validation::Validate};
use corpus_uploader::{
    CliArgs, ConfigProvider, HttpTransport, IngestEngine, IngestError, UploadConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Logging
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting corpus-uploader");
    tracing::debug!("CLI args: {:?}", args);

    // Configuration: file, then command line overrides, then validation
    let config = match args.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e, "Configuration failed"),
    };

    display_config_summary(&config, args.dry_run);

    // Transport and engine
    let transport = HttpTransport::new(config.field_name(), config.request_timeout())
        .context("Failed to create HTTP client")?;
    let engine = IngestEngine::new_with_monitoring(&config, transport, args.monitor);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be uploaded");
        match engine.scan() {
            Ok(candidates) => {
                println!(
                    "🔍 {} document(s) would be uploaded to {}:",
                    candidates.len(),
                    engine.target_url()
                );
                for candidate in &candidates {
                    println!("  {}", candidate.file_path.display());
                }
            }
            Err(e) => exit_with(&e, "Scan failed"),
        }
        return Ok(());
    }

    // Scan and upload; only a failed scan changes the exit code
    match engine.run().await {
        Ok(outcomes) => {
            tracing::info!("✅ All {} document(s) attempted", outcomes.len());
        }
        Err(e) => exit_with(&e, "Upload run aborted"),
    }

    Ok(())
}

fn display_config_summary(config: &UploadConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Target: {}", config.target().url());
    println!("  Corpus: {}", config.corpus_dir.display());
    println!("  Field: {}", config.field_name);
    println!("  Status policy: {:?}", config.status_policy);
    if let Some(timeout) = config.timeout_seconds {
        println!("  Timeout: {}s", timeout);
    }
    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn exit_with(e: &IngestError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
