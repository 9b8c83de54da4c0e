/*!
 * Tests for configuration loading and validation
 */

use wordflash::Config;
use wordflash::app_config::LogLevel;

#[test]
fn test_defaultConfig_shouldRoundTripThroughJson() {
    let config = Config::default();

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert!(parsed.validate().is_ok());
    assert_eq!(parsed.quiz.batch_size, config.quiz.batch_size);
    assert_eq!(parsed.quiz.streak_interval, config.quiz.streak_interval);
    assert_eq!(parsed.language_pairs, config.language_pairs);
}

#[test]
fn test_parseConfig_withMissingSections_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.quiz.batch_size, 5);
    assert_eq!(config.quiz.streak_interval, 5);
    assert!(config.database.path.is_none());
    assert!(!config.lookup.endpoint.is_empty());
}

#[test]
fn test_parseConfig_withCustomQuizSettings_shouldOverrideDefaults() {
    let config: Config = serde_json::from_str(
        r#"{
            "language_pairs": [["fr", "es"]],
            "quiz": { "batch_size": 10, "streak_interval": 3 },
            "log_level": "warn"
        }"#,
    )
    .unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.quiz.batch_size, 10);
    assert_eq!(config.quiz.streak_interval, 3);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.language_pairs, vec![["fr".to_string(), "es".to_string()]]);
}

#[test]
fn test_validate_withInvalidSettings_shouldFail() {
    let bad_pair: Config =
        serde_json::from_str(r#"{"language_pairs": [["en", "xx"]]}"#).unwrap();
    assert!(bad_pair.validate().is_err());

    let bad_batch: Config =
        serde_json::from_str(r#"{"quiz": {"batch_size": 0}}"#).unwrap();
    assert!(bad_batch.validate().is_err());

    let bad_endpoint: Config =
        serde_json::from_str(r#"{"lookup": {"endpoint": "  "}}"#).unwrap();
    assert!(bad_endpoint.validate().is_err());
}
