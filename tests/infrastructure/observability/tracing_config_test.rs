use quizpress::infrastructure::observability::TracingConfig;

#[test]
fn given_text_format_when_settings_ask_for_json_then_json_is_enabled() {
    let config = TracingConfig {
        environment: "local".to_string(),
        json_format: false,
    };

    assert!(config.with_settings(true).json_format);
}

#[test]
fn given_json_forced_by_environment_when_settings_disable_it_then_json_stays_on() {
    let config = TracingConfig {
        environment: "prod".to_string(),
        json_format: true,
    };

    assert!(config.with_settings(false).json_format);
}
