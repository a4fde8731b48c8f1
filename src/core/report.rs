//! Presentation of calculation results: activity to 2 decimals,
//! concentration and volume to 3.

use serde::{Deserialize, Serialize};

use crate::domain::model::CalculationResult;
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<'a> {
    pub label: &'a str,
    pub offset_minutes: i64,
    pub elapsed_minutes: f64,
    pub activity_mci: f64,
    pub concentration_mci_per_ml: f64,
    pub volume_ml: f64,
    pub exact: &'a CalculationResult,
}

impl<'a> From<&'a CalculationResult> for ReportRow<'a> {
    fn from(result: &'a CalculationResult) -> Self {
        Self {
            label: &result.label,
            offset_minutes: result.offset_minutes,
            elapsed_minutes: result.elapsed_minutes,
            activity_mci: round_to(result.activity, 2),
            concentration_mci_per_ml: round_to(result.concentration, 3),
            volume_ml: round_to(result.volume, 3),
            exact: result,
        }
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    label: &'a str,
    offset_minutes: i64,
    elapsed_minutes: f64,
    activity_mci: String,
    concentration_mci_per_ml: String,
    volume_ml: String,
}

pub fn render(results: &[CalculationResult], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(results)),
        ReportFormat::Json => render_json(results),
        ReportFormat::Csv => render_csv(results),
    }
}

pub fn render_block(result: &CalculationResult) -> String {
    format!(
        "[{}]\nactivity: {:.2} mCi\nconcentration: {:.3} mCi/mL\nvolume to withdraw: {:.3} mL\n",
        result.label, result.activity, result.concentration, result.volume
    )
}

pub fn render_text(results: &[CalculationResult]) -> String {
    results
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(results: &[CalculationResult]) -> Result<String> {
    let rows: Vec<ReportRow<'_>> = results.iter().map(ReportRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn render_csv(results: &[CalculationResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer.serialize(CsvRow {
            label: &result.label,
            offset_minutes: result.offset_minutes,
            elapsed_minutes: result.elapsed_minutes,
            activity_mci: format!("{:.2}", result.activity),
            concentration_mci_per_ml: format!("{:.3}", result.concentration),
            volume_ml: format!("{:.3}", result.volume),
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Recommended (offset 0) withdrawal volume, if present.
pub fn headline_volume(results: &[CalculationResult]) -> Option<String> {
    results
        .iter()
        .find(|r| r.offset_minutes == 0)
        .map(|r| format!("{:.3}", r.volume))
}
