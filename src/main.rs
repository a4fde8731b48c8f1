use clap::Parser;
use dose_dispense::config::{AppConfig, CliConfig, Command};
use dose_dispense::utils::{logger, validation::Validate};
use dose_dispense::{DoseError, WebServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置 (未指定時使用內建預設值)
    let mut config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(e.exit_code());
            }
        },
        None => AppConfig::default(),
    };

    cli.command.apply_overrides(&mut config);

    logger::init_logger(cli.verbose, config.logging.format);
    tracing::info!("Starting dose-dispense");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let outcome = match &cli.command {
        Command::Calc(args) => args.run(&config).map(|output| print!("{}", output)),
        Command::Serve(_) => run_serve(config).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_serve(config: AppConfig) -> Result<(), DoseError> {
    let server = WebServer::new(config)?;
    println!("🚀 Serving calculator on http://{}", server.addr());
    server.run().await
}
