//! Radioactive decay and dilution formulas.
//!
//! Division by zero is not an error here: a zero volume gives a zero
//! concentration and a zero concentration gives a zero withdrawal volume.

use crate::utils::error::{DoseError, Result};

/// Activity left after `elapsed_minutes`, `A * 0.5^(t / T½)`.
///
/// Negative elapsed time is valid and back-calculates a higher activity.
pub fn decayed_activity(initial_activity: f64, elapsed_minutes: f64, half_life: f64) -> Result<f64> {
    if !(half_life.is_finite() && half_life > 0.0) {
        return Err(DoseError::InvalidHalfLife { value: half_life });
    }
    Ok(initial_activity * 0.5_f64.powf(elapsed_minutes / half_life))
}

/// mCi/mL, zero when `volume` is zero.
pub fn concentration(activity: f64, volume: f64) -> f64 {
    if volume == 0.0 {
        0.0
    } else {
        activity / volume
    }
}

/// mL to withdraw for `dose`, zero when `concentration` is zero.
pub fn required_volume(dose: f64, concentration: f64) -> f64 {
    if concentration == 0.0 {
        0.0
    } else {
        dose / concentration
    }
}
