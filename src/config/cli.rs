use crate::config::AppConfig;
use crate::core::calculator::DoseCalculator;
use crate::core::report::{self, ReportFormat};
use crate::domain::model::DispenseRequest;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dose-dispense")]
#[command(about = "Radiopharmaceutical dispensing volume calculator")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute withdrawal volumes and print them
    Calc(CalcArgs),
    /// Serve the HTML calculator form
    Serve(ServeArgs),
}

impl Command {
    /// 命令列參數覆寫配置檔的值
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match self {
            Command::Calc(CalcArgs {
                window: Some(window),
                ..
            }) => config.calculation.window_minutes = *window,
            Command::Serve(ServeArgs { host, port }) => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Nuclide key (F18, C11)
    #[arg(long, default_value = "F18")]
    pub nuclide: String,

    /// Target dose in mCi
    #[arg(long)]
    pub dose: String,

    /// Measured activity in mCi
    #[arg(long)]
    pub activity: String,

    /// Vial volume in mL
    #[arg(long)]
    pub volume: String,

    /// Measurement time, HH:MM
    #[arg(long)]
    pub start: String,

    /// Withdrawal time, HH:MM
    #[arg(long)]
    pub target: String,

    /// Override the early/late window from the config file
    #[arg(long)]
    pub window: Option<u32>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

impl From<&CalcArgs> for DispenseRequest {
    fn from(args: &CalcArgs) -> Self {
        DispenseRequest {
            nuclide: args.nuclide.clone(),
            dose: args.dose.clone(),
            init_activity: args.activity.clone(),
            init_volume: args.volume.clone(),
            start_time: args.start.clone(),
            target_time: args.target.clone(),
        }
    }
}

impl CalcArgs {
    /// Evaluates the request with the configured window and renders the report.
    pub fn run(&self, config: &AppConfig) -> Result<String> {
        let calculator = DoseCalculator::new(config.window_minutes());
        let results = calculator.evaluate_request(&DispenseRequest::from(self))?;
        tracing::info!("✅ Calculated {} time points", results.len());

        report::render(&results, self.format)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}
