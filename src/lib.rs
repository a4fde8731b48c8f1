pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::AppConfig;
pub use core::calculator::DoseCalculator;
pub use domain::model::{CalculationInput, CalculationResult, DispenseRequest, Nuclide, TimeOffset};
pub use utils::error::{DoseError, Result};
pub use web::WebServer;
