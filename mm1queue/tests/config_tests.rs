use std::io::Write;

use mm1queue::config::SimulationConfig;
use mm1queue::error::ConfigError;
use mm1queue::process::ControlPolicy;

#[test]
fn test_defaults_are_reference_parameters() {
    let config = SimulationConfig::default();

    assert_eq!(config.process.arrival_prob, 0.25);
    assert_eq!(config.process.departure_prob, 0.30);
    assert_eq!(config.process.control, ControlPolicy::every(10, 2));
    assert_eq!(config.steps, 10_000);
    assert_eq!(config.trials, 100);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_fills_defaults() {
    let config = SimulationConfig::from_json_str(
        r#"{
            "process": {
                "arrival_prob": 0.4,
                "departure_prob": 0.2,
                "control": { "enabled": true, "limit": 3 }
            },
            "steps": 500
        }"#,
    )
    .unwrap();

    assert_eq!(config.process.arrival_prob, 0.4);
    assert_eq!(config.process.control, ControlPolicy::every(10, 3));
    assert_eq!(config.steps, 500);
    assert_eq!(config.trials, 100);
    assert_eq!(config.seed, 1234);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(
        SimulationConfig::from_json_str("{}").unwrap(),
        SimulationConfig::default()
    );
}

#[test]
fn test_invalid_values_rejected() {
    let err = SimulationConfig::from_json_str(
        r#"{ "process": { "arrival_prob": 1.2, "departure_prob": 0.2 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ProbabilityOutOfRange { name: "arrival_prob", .. }));

    let err = SimulationConfig::from_json_str(r#"{ "capacity": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroCapacity));

    let err = SimulationConfig::from_json_str(
        r#"{ "process": { "arrival_prob": 0.2, "departure_prob": 0.2, "control": { "interval": 0 } } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroInterval));
}

#[test]
fn test_malformed_json() {
    let err = SimulationConfig::from_json_str("{ steps: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("mm1queue-config-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{ "trials": 5, "seed": 99 }"#).unwrap();
    drop(file);

    let config = SimulationConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.trials, 5);
    assert_eq!(config.seed, 99);

    assert!(matches!(
        SimulationConfig::from_json_file(&path),
        Err(ConfigError::Read(_))
    ));
}

#[test]
fn test_partial_process_fills_reference_values() {
    let config = SimulationConfig::from_json_str(
        r#"{ "process": { "arrival_prob": 0.25, "departure_prob": 0.30, "control": { "enabled": true } } }"#,
    )
    .unwrap();
    assert_eq!(config.process.control, ControlPolicy::every(10, 2));

    let config = SimulationConfig::from_json_str(r#"{ "process": { "control": { "limit": 3 } } }"#).unwrap();
    assert_eq!(config.process.arrival_prob, 0.25);
    assert_eq!(config.process.departure_prob, 0.30);
    assert_eq!(config.process.control, ControlPolicy::every(10, 3));

    let config = SimulationConfig::from_json_str(r#"{ "process": { "arrival_prob": 0.4 } }"#).unwrap();
    assert_eq!(config.process.departure_prob, 0.30);
    assert_eq!(config.process.control, ControlPolicy::every(10, 2));

    let config = SimulationConfig::from_json_str(r#"{ "process": { "control": { "enabled": false } } }"#).unwrap();
    assert!(!config.process.control.enabled);
    assert_eq!(config.process.control.interval, 10);
}
