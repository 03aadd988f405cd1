use clap::Parser;
use css_split::config::LogFormat;
use css_split::utils::{logger, report, validation::Validate};
use css_split::{CliConfig, LocalStorage, SplitEngine, SplitError, SplitPipeline};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting css-split");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let layout = match config.load_layout() {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("❌ Layout rejected: {}", e);
            exit_with(&e);
        }
    };

    if config.print_layout {
        print!("{}", layout.to_toml_string()?);
        return Ok(());
    }

    let storage = LocalStorage::new(config.workdir.clone());
    let pipeline = SplitPipeline::new(storage, layout, config.source.clone());
    let engine = SplitEngine::new(pipeline).with_dry_run(config.dry_run);

    match engine.run() {
        Ok(run_report) => {
            tracing::info!("✅ Split completed successfully");
            if config.json {
                println!("{}", report::render_json(&run_report)?);
            } else {
                print!("{}", report::render_text(&run_report));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Split failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    }

    Ok(())
}

fn exit_with(e: &SplitError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
