use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::DoseError;

/// Supported PET nuclides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nuclide {
    F18,
    C11,
}

impl Nuclide {
    pub const ALL: [Nuclide; 2] = [Nuclide::F18, Nuclide::C11];

    /// Physical half-life in minutes.
    pub fn half_life_minutes(self) -> f64 {
        match self {
            Nuclide::F18 => 109.7,
            Nuclide::C11 => 20.3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Nuclide::F18 => "F18",
            Nuclide::C11 => "C11",
        }
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Nuclide {
    type Err = DoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nuclide::ALL
            .into_iter()
            .find(|n| n.key() == s)
            .ok_or_else(|| DoseError::UnknownNuclide {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub nuclide: Nuclide,
    /// mCi
    pub initial_activity: f64,
    /// mL
    pub initial_volume: f64,
    pub initial_time: NaiveTime,
    /// mCi
    pub target_dose: f64,
    pub target_time: NaiveTime,
}

/// A signed shift of the withdrawal time relative to the target time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffset {
    pub minutes: i64,
    pub label: String,
}

impl TimeOffset {
    pub fn new(minutes: i64, label: impl Into<String>) -> Self {
        Self {
            minutes,
            label: label.into(),
        }
    }

    /// Target time first, then the early and late edges of the window.
    pub fn tolerance_window(window_minutes: u32) -> Vec<TimeOffset> {
        let width = i64::from(window_minutes);
        vec![
            TimeOffset::new(0, "target (recommended)"),
            TimeOffset::new(-width, format!("{} min early", window_minutes)),
            TimeOffset::new(width, format!("{} min late", window_minutes)),
        ]
    }

    pub fn is_target(&self) -> bool {
        self.minutes == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub label: String,
    pub offset_minutes: i64,
    pub elapsed_minutes: f64,
    /// mCi
    pub activity: f64,
    /// mCi/mL
    pub concentration: f64,
    /// mL
    pub volume: f64,
}

/// Raw, string-typed request as submitted by the form, the CLI or a JSON
/// client. Missing fields come through as empty strings and fail parsing.
/// JSON clients may send the numeric fields as numbers; they are kept in
/// their string form so every source goes through the same parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispenseRequest {
    pub nuclide: String,
    #[serde(deserialize_with = "string_or_number")]
    pub dose: String,
    #[serde(deserialize_with = "string_or_number")]
    pub init_activity: String,
    #[serde(deserialize_with = "string_or_number")]
    pub init_volume: String,
    pub start_time: String,
    pub target_time: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    })
}
