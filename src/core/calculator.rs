use chrono::NaiveTime;

use crate::core::decay::{concentration, decayed_activity, required_volume};
use crate::domain::model::{
    CalculationInput, CalculationResult, DispenseRequest, Nuclide, TimeOffset,
};
use crate::utils::error::Result;
use crate::utils::validation::{parse_number, parse_time};

pub const DEFAULT_WINDOW_MINUTES: u32 = 5;

/// Evaluates a dispensing request at the target time and at the edges of a
/// tolerance window around it.
#[derive(Debug, Clone)]
pub struct DoseCalculator {
    offsets: Vec<TimeOffset>,
}

impl DoseCalculator {
    pub fn new(window_minutes: u32) -> Self {
        Self {
            offsets: TimeOffset::tolerance_window(window_minutes),
        }
    }

    /// Signed minutes from `initial` to `target` shifted by `offset_minutes`.
    /// Both times are taken on the same day; no wrap-around at midnight.
    pub fn elapsed_minutes(initial: NaiveTime, target: NaiveTime, offset_minutes: i64) -> f64 {
        let delta = target.signed_duration_since(initial);
        delta.num_seconds() as f64 / 60.0 + offset_minutes as f64
    }

    /// Runs the decay, concentration and volume chain once per offset.
    /// Either every offset yields a result or the call fails as a whole.
    pub fn evaluate(
        input: &CalculationInput,
        offsets: &[TimeOffset],
    ) -> Result<Vec<CalculationResult>> {
        let half_life = input.nuclide.half_life_minutes();

        offsets
            .iter()
            .map(|offset| -> Result<CalculationResult> {
                let elapsed =
                    Self::elapsed_minutes(input.initial_time, input.target_time, offset.minutes);
                let activity = decayed_activity(input.initial_activity, elapsed, half_life)?;
                let conc = concentration(activity, input.initial_volume);
                let volume = required_volume(input.target_dose, conc);

                Ok(CalculationResult {
                    label: offset.label.clone(),
                    offset_minutes: offset.minutes,
                    elapsed_minutes: elapsed,
                    activity,
                    concentration: conc,
                    volume,
                })
            })
            .collect()
    }

    pub fn evaluate_window(&self, input: &CalculationInput) -> Result<Vec<CalculationResult>> {
        Self::evaluate(input, &self.offsets)
    }

    /// Turns the raw string fields into a typed input. The first invalid
    /// field is reported: nuclide, times, then the numbers.
    pub fn parse_request(request: &DispenseRequest) -> Result<CalculationInput> {
        let nuclide: Nuclide = request.nuclide.parse()?;
        let initial_time = parse_time("start_time", &request.start_time)?;
        let target_time = parse_time("target_time", &request.target_time)?;
        let initial_activity = parse_number("init_activity", &request.init_activity)?;
        let initial_volume = parse_number("init_volume", &request.init_volume)?;
        let target_dose = parse_number("dose", &request.dose)?;

        Ok(CalculationInput {
            nuclide,
            initial_activity,
            initial_volume,
            initial_time,
            target_dose,
            target_time,
        })
    }

    pub fn evaluate_request(&self, request: &DispenseRequest) -> Result<Vec<CalculationResult>> {
        let input = Self::parse_request(request)?;
        tracing::debug!(
            nuclide = %input.nuclide,
            start = %input.initial_time,
            target = %input.target_time,
            "evaluating dispense request"
        );
        self.evaluate_window(&input)
    }
}

impl Default for DoseCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DoseError;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn f18_input(target: NaiveTime) -> CalculationInput {
        CalculationInput {
            nuclide: Nuclide::F18,
            initial_activity: 178.8,
            initial_volume: 10.0,
            initial_time: time(7, 40),
            target_dose: 7.9,
            target_time: target,
        }
    }

    #[test]
    fn test_elapsed_minutes_is_signed() {
        assert_eq!(DoseCalculator::elapsed_minutes(time(7, 40), time(7, 50), 0), 10.0);
        assert_eq!(DoseCalculator::elapsed_minutes(time(7, 40), time(7, 50), -5), 5.0);
        assert_eq!(DoseCalculator::elapsed_minutes(time(7, 50), time(7, 40), 0), -10.0);
    }

    #[test]
    fn test_elapsed_minutes_does_not_wrap_midnight() {
        assert_eq!(
            DoseCalculator::elapsed_minutes(time(0, 2), time(23, 58), 5),
            1436.0 + 5.0
        );
        assert_eq!(
            DoseCalculator::elapsed_minutes(time(23, 58), time(0, 2), 0),
            -1436.0
        );
    }

    #[test]
    fn test_evaluate_target_offset() {
        let results = DoseCalculator::evaluate(
            &f18_input(time(7, 50)),
            &[TimeOffset::new(0, "target (recommended)")],
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.elapsed_minutes, 10.0);
        assert!((r.activity - 167.8519).abs() < 1e-3);
        assert!((r.concentration - 16.78519).abs() < 1e-4);
        assert!((r.volume - 0.47065).abs() < 1e-4);
    }

    #[test]
    fn test_evaluate_window_order() {
        let calculator = DoseCalculator::default();
        let results = calculator.evaluate_window(&f18_input(time(7, 50))).unwrap();

        let offsets: Vec<i64> = results.iter().map(|r| r.offset_minutes).collect();
        assert_eq!(offsets, vec![0, -5, 5]);
        assert!(results[1].volume < results[0].volume);
        assert!(results[2].volume > results[0].volume);
    }

    #[test]
    fn test_zero_volume_gives_zero_results() {
        let mut input = f18_input(time(7, 50));
        input.initial_volume = 0.0;
        let results = DoseCalculator::default().evaluate_window(&input).unwrap();
        assert!(results.iter().all(|r| r.concentration == 0.0 && r.volume == 0.0));
    }

    #[test]
    fn test_parse_request_reports_first_bad_field() {
        let request = DispenseRequest {
            nuclide: "F18".to_string(),
            dose: "x".to_string(),
            init_activity: "178.8".to_string(),
            init_volume: "10".to_string(),
            start_time: "07:40".to_string(),
            target_time: "".to_string(),
        };
        assert!(matches!(
            DoseCalculator::parse_request(&request),
            Err(DoseError::InvalidTimeInput { ref field, .. }) if field == "target_time"
        ));
    }

    #[test]
    fn test_parse_request_nuclide_key_is_exact() {
        let request = DispenseRequest {
            nuclide: " F18".to_string(),
            dose: "7.9".to_string(),
            init_activity: "178.8".to_string(),
            init_volume: "10".to_string(),
            start_time: "07:40".to_string(),
            target_time: "07:50".to_string(),
        };
        assert!(matches!(
            DoseCalculator::parse_request(&request),
            Err(DoseError::UnknownNuclide { ref value }) if value == " F18"
        ));
    }

    #[test]
    fn test_widest_window_does_not_overflow() {
        let results = DoseCalculator::new(u32::MAX)
            .evaluate_window(&f18_input(time(7, 50)))
            .unwrap();
        assert_eq!(results[1].offset_minutes, -i64::from(u32::MAX));
        assert_eq!(results[2].label, format!("{} min late", u32::MAX));
    }

    #[test]
    fn test_parse_request_unknown_nuclide() {
        let request = DispenseRequest {
            nuclide: "Tc99m".to_string(),
            ..DispenseRequest::default()
        };
        assert!(matches!(
            DoseCalculator::parse_request(&request),
            Err(DoseError::UnknownNuclide { .. })
        ));
    }
}
