use dose_dispense::utils::validation::Validate;
use dose_dispense::{AppConfig, DoseCalculator};

#[test]
fn test_example_config_loads_and_validates() {
    let config = AppConfig::from_file("dispense.example.toml").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.port, 5000);

    // the shipped defaults must evaluate without error
    let results = DoseCalculator::new(config.window_minutes())
        .evaluate_request(&config.default_request())
        .unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = AppConfig::from_file("does-not-exist.toml").unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
