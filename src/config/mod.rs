#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CalcArgs, CliConfig, Command, ServeArgs};
pub use toml_config::{AppConfig, LogFormat};
