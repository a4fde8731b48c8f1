use dose_dispense::core::report::{self, ReportFormat};
use dose_dispense::{DispenseRequest, DoseCalculator, DoseError, Nuclide};

fn f18_request(target_time: &str) -> DispenseRequest {
    DispenseRequest {
        nuclide: "F18".to_string(),
        dose: "7.9".to_string(),
        init_activity: "178.8".to_string(),
        init_volume: "10".to_string(),
        start_time: "07:40".to_string(),
        target_time: target_time.to_string(),
    }
}

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

#[test]
fn test_f18_ten_minute_scenario() {
    let results = DoseCalculator::default()
        .evaluate_request(&f18_request("07:50"))
        .unwrap();

    let target = &results[0];
    assert_eq!(target.label, "target (recommended)");
    assert_eq!(target.elapsed_minutes, 10.0);

    let expected_activity = 178.8 * 0.5_f64.powf(10.0 / 109.7);
    assert!(close(target.activity, expected_activity, 1e-9));
    assert!(close(target.activity, 167.85, 0.01));
    assert!(close(target.concentration, 16.785, 0.001));
    assert!(close(target.volume, 0.471, 0.001));
}

#[test]
fn test_earlier_target_needs_less_volume() {
    let calculator = DoseCalculator::default();
    let at_ten = calculator.evaluate_request(&f18_request("07:50")).unwrap();
    let at_five = calculator.evaluate_request(&f18_request("07:45")).unwrap();

    assert_eq!(at_five[0].elapsed_minutes, 5.0);
    assert!(close(at_five[0].activity, 173.24, 0.01));
    assert!(at_five[0].volume < at_ten[0].volume);

    // the early edge of the 07:50 window is the 07:45 target
    assert!(close(at_ten[1].activity, at_five[0].activity, 1e-9));
    assert_eq!(at_ten[1].label, "5 min early");
    assert_eq!(at_ten[2].label, "5 min late");
    assert_eq!(at_ten[2].elapsed_minutes, 15.0);
}

#[test]
fn test_target_before_measurement_back_calculates() {
    let results = DoseCalculator::default()
        .evaluate_request(&f18_request("07:30"))
        .unwrap();
    assert_eq!(results[0].elapsed_minutes, -10.0);
    assert!(results[0].activity > 178.8);
}

#[test]
fn test_c11_decays_faster_than_f18() {
    let mut c11 = f18_request("08:00");
    c11.nuclide = "C11".to_string();

    let calculator = DoseCalculator::default();
    let f18_results = calculator.evaluate_request(&f18_request("08:00")).unwrap();
    let c11_results = calculator.evaluate_request(&c11).unwrap();

    assert!(c11_results[0].activity < f18_results[0].activity);
    let expected = 178.8 * 0.5_f64.powf(20.0 / Nuclide::C11.half_life_minutes());
    assert!(close(c11_results[0].activity, expected, 1e-9));
}

#[test]
fn test_empty_target_time_fails_whole_request() {
    let result = DoseCalculator::default().evaluate_request(&f18_request(""));
    match result {
        Err(DoseError::InvalidTimeInput { field, .. }) => assert_eq!(field, "target_time"),
        other => panic!("expected InvalidTimeInput, got {:?}", other),
    }
}

#[test]
fn test_invalid_number_and_nuclide() {
    let calculator = DoseCalculator::default();

    let mut bad_volume = f18_request("07:50");
    bad_volume.init_volume = "ten".to_string();
    assert!(matches!(
        calculator.evaluate_request(&bad_volume),
        Err(DoseError::InvalidNumericInput { .. })
    ));

    let mut bad_nuclide = f18_request("07:50");
    bad_nuclide.nuclide = "Ga68".to_string();
    assert!(matches!(
        calculator.evaluate_request(&bad_nuclide),
        Err(DoseError::UnknownNuclide { .. })
    ));
}

#[test]
fn test_zero_volume_policy() {
    let mut request = f18_request("07:50");
    request.init_volume = "0".to_string();
    let results = DoseCalculator::default().evaluate_request(&request).unwrap();
    assert!(results.iter().all(|r| r.concentration == 0.0));
    assert!(results.iter().all(|r| r.volume == 0.0));
}

#[test]
fn test_custom_window() {
    let results = DoseCalculator::new(10)
        .evaluate_request(&f18_request("07:50"))
        .unwrap();
    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["target (recommended)", "10 min early", "10 min late"]);
    assert_eq!(results[1].elapsed_minutes, 0.0);
    assert!(close(results[1].activity, 178.8, 1e-12));
}

#[test]
fn test_text_report_for_scenario() {
    let results = DoseCalculator::default()
        .evaluate_request(&f18_request("07:50"))
        .unwrap();
    let text = report::render(&results, ReportFormat::Text).unwrap();

    assert!(text.contains("[target (recommended)]\nactivity: 167.85 mCi"));
    assert!(text.contains("volume to withdraw: 0.471 mL"));
    assert_eq!(text.matches('[').count(), 3);
    assert_eq!(report::headline_volume(&results).as_deref(), Some("0.471"));
}
