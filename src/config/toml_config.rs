use crate::core::calculator::DEFAULT_WINDOW_MINUTES;
use crate::domain::model::{DispenseRequest, Nuclide};
use crate::utils::error::{DoseError, Result};
use crate::utils::validation::{
    parse_number, parse_time, validate_non_empty_string, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub calculation: CalculationConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Width of the early/late tolerance window in minutes.
    pub window_minutes: u32,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

/// Values the form is pre-filled with on first load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub nuclide: String,
    pub dose: String,
    pub init_activity: String,
    pub init_volume: String,
    pub start_time: String,
    pub target_time: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            nuclide: "F18".to_string(),
            dose: "7.56".to_string(),
            init_activity: "178.8".to_string(),
            init_volume: "10".to_string(),
            start_time: "07:40".to_string(),
            target_time: "07:50".to_string(),
        }
    }
}

impl From<&DefaultsConfig> for DispenseRequest {
    fn from(defaults: &DefaultsConfig) -> Self {
        DispenseRequest {
            nuclide: defaults.nuclide.clone(),
            dose: defaults.dose.clone(),
            init_activity: defaults.init_activity.clone(),
            init_volume: defaults.init_volume.clone(),
            start_time: defaults.start_time.clone(),
            target_time: defaults.target_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DoseError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DoseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DISPENSE_PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoseError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        self.socket_addr()?;

        validate_range("calculation.window_minutes", self.calculation.window_minutes, 0, 720)?;

        // 預設值必須能被計算器接受，否則首頁會直接顯示錯誤
        let defaults = &self.defaults;
        defaults
            .nuclide
            .parse::<Nuclide>()
            .map_err(|e| DoseError::ConfigError {
                message: format!("defaults.nuclide: {}", e),
            })?;
        for (field, value) in [
            ("defaults.start_time", &defaults.start_time),
            ("defaults.target_time", &defaults.target_time),
        ] {
            parse_time(field, value).map_err(|e| DoseError::ConfigError {
                message: e.to_string(),
            })?;
        }
        for (field, value) in [
            ("defaults.dose", &defaults.dose),
            ("defaults.init_activity", &defaults.init_activity),
            ("defaults.init_volume", &defaults.init_volume),
        ] {
            parse_number(field, value).map_err(|e| DoseError::ConfigError {
                message: e.to_string(),
            })?;
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| DoseError::ConfigError {
                message: format!(
                    "invalid listen address {}:{}: {}",
                    self.server.host, self.server.port, e
                ),
            })
    }

    pub fn window_minutes(&self) -> u32 {
        self.calculation.window_minutes
    }

    pub fn default_request(&self) -> DispenseRequest {
        DispenseRequest::from(&self.defaults)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
