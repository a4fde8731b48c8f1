use crate::utils::error::{DoseError, Result};
use chrono::NaiveTime;

pub const TIME_FORMAT: &str = "%H:%M";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a decimal field. Surrounding whitespace is ignored; NaN and
/// infinities are rejected.
pub fn parse_number(field_name: &str, value: &str) -> Result<f64> {
    let invalid = || DoseError::InvalidNumericInput {
        field: field_name.to_string(),
        value: value.to_string(),
    };

    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Parses an `HH:MM` time-of-day field.
pub fn parse_time(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        DoseError::InvalidTimeInput {
            field: field_name.to_string(),
            value: value.to_string(),
        }
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DoseError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DoseError::ConfigError {
            message: format!(
                "{} = {} is out of range, must be between {} and {}",
                field_name, value, min, max
            ),
        });
    }
    Ok(())
}
