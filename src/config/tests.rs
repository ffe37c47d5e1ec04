use super::*;
use crate::error::DtwinError;
use crate::test_support::EnvGuard;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn empty_yaml_yields_defaults() {
    let config = DtwinConfig::from_yaml("").unwrap();
    assert_eq!(config.llm.model, "gpt-4");
    assert_eq!(config.llm.temperature, 0.7);
    assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
    assert_eq!(config.limits.max_tool_loops, 6);
    assert!(config.prompts.is_empty());
    assert!(!config.profile.role.is_empty());
    config.validate().unwrap();
}

#[test]
fn parse_full_config() {
    let yaml = r#"
profile:
  role: "Acme Founder Twin"
  goal: "Open doors for Acme"
  backstory: "Founded Acme in 2020."

llm:
  model: gpt-4-turbo
  temperature: 0.3
  base_url: "https://llm.internal/v1"
  api_key_env: ACME_LLM_KEY
  timeout_seconds: 45

tools:
  max_directory_entries: 50
  max_file_bytes: 1024
  max_search_results: 3
  max_page_bytes: 5000
  http_timeout_seconds: 10

limits:
  max_tool_loops: 2

prompts:
  pitch: "Pitch {idea_or_company|my business idea} in three sentences."
"#;
    let config = DtwinConfig::from_yaml(yaml).unwrap();
    config.validate().unwrap();

    assert_eq!(config.profile.role, "Acme Founder Twin");
    assert_eq!(config.profile.backstory, "Founded Acme in 2020.");
    assert_eq!(config.llm.model, "gpt-4-turbo");
    assert_eq!(config.llm.temperature, 0.3);
    assert_eq!(config.llm.base_url, "https://llm.internal/v1");
    assert_eq!(config.llm.api_key_env, "ACME_LLM_KEY");
    assert_eq!(config.llm.timeout_seconds, 45);
    assert_eq!(config.tools.max_directory_entries, 50);
    assert_eq!(config.tools.max_file_bytes, 1024);
    assert_eq!(config.tools.max_search_results, 3);
    assert_eq!(config.tools.max_page_bytes, 5000);
    assert_eq!(config.tools.http_timeout_seconds, 10);
    assert_eq!(config.limits.max_tool_loops, 2);
    assert!(config.prompts.contains_key("pitch"));
}

#[test]
fn partial_sections_keep_defaults_for_the_rest() {
    let yaml = r#"
llm:
  model: gpt-4o
"#;
    let config = DtwinConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.llm.temperature, 0.7);
    assert_eq!(config.tools.max_search_results, 8);
}

#[test]
fn invalid_yaml_is_a_user_error() {
    let result = DtwinConfig::from_yaml("llm: [not, a, mapping");
    match result.unwrap_err() {
        DtwinError::UserError(message) => assert!(message.contains("parse")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn empty_model_fails_validation() {
    let config = DtwinConfig::from_yaml("llm:\n  model: \"\"\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("llm.model"));
    assert!(err.to_string().contains("Fix:"));
}

#[test]
fn out_of_range_temperature_fails_validation() {
    let config = DtwinConfig::from_yaml("llm:\n  temperature: 3.5\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("temperature"));

    let config = DtwinConfig::from_yaml("llm:\n  temperature: -0.1\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn boundary_temperatures_pass_validation() {
    let config = DtwinConfig::from_yaml("llm:\n  temperature: 0.0\n").unwrap();
    config.validate().unwrap();
    let config = DtwinConfig::from_yaml("llm:\n  temperature: 2.0\n").unwrap();
    config.validate().unwrap();
}

#[test]
fn zero_timeout_fails_validation() {
    let config = DtwinConfig::from_yaml("llm:\n  timeout_seconds: 0\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
}

#[test]
fn zero_tool_loops_fails_validation() {
    let config = DtwinConfig::from_yaml("limits:\n  max_tool_loops: 0\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("max_tool_loops"));
}

#[test]
fn zero_tool_limits_fail_validation() {
    let config = DtwinConfig::from_yaml("tools:\n  max_file_bytes: 0\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tools limits"));
}

#[test]
fn unknown_prompt_key_fails_validation() {
    let config = DtwinConfig::from_yaml("prompts:\n  banana: \"text\"\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("unknown task type 'banana'"));
}

#[test]
fn non_canonical_prompt_key_fails_validation() {
    let config = DtwinConfig::from_yaml("prompts:\n  PITCH: \"text\"\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("canonical tag 'pitch'"));
}

#[test]
fn empty_prompt_template_fails_validation() {
    let config = DtwinConfig::from_yaml("prompts:\n  pitch: \"  \"\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("prompts.pitch is empty"));
}

#[test]
fn forward_compatibility_preserves_unknown_fields() {
    let yaml = r#"
llm:
  model: gpt-4
  future_setting: true

future_top_level: "also preserved"
"#;
    let config = DtwinConfig::from_yaml(yaml).unwrap();
    assert!(config.llm.extra.contains_key("future_setting"));
    assert!(config.extra.contains_key("future_top_level"));

    // Round-trip should preserve unknown fields
    let yaml_out = config.to_yaml().unwrap();
    let config2 = DtwinConfig::from_yaml(&yaml_out).unwrap();
    assert!(config2.extra.contains_key("future_top_level"));
    assert!(config2.llm.extra.contains_key("future_setting"));
}

#[test]
fn load_from_missing_file_is_none() {
    let result = DtwinConfig::load_from("/nonexistent/dtwin.yaml").unwrap();
    assert!(result.is_none());
}

#[test]
fn load_from_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "llm:\n  model: gpt-4o-mini").unwrap();
    let config = DtwinConfig::load_from(file.path()).unwrap().unwrap();
    assert_eq!(config.llm.model, "gpt-4o-mini");
}

#[test]
#[serial]
fn env_overrides_replace_file_values() {
    let _guard = EnvGuard::apply(&[
        ("DTWIN_MODEL", Some("gpt-env-model")),
        ("OPENAI_MODEL", None),
        ("OPENAI_BASE_URL", Some("https://proxy.example/v1/")),
        ("OPENAI_API_BASE", None),
    ]);

    let mut config = DtwinConfig::from_yaml("llm:\n  model: gpt-file-model\n").unwrap();
    config.apply_env_overrides();

    assert_eq!(config.llm.model, "gpt-env-model");
    // Trailing slash is stripped so URL joining stays predictable.
    assert_eq!(config.llm.base_url, "https://proxy.example/v1");
}

#[test]
#[serial]
fn dtwin_model_takes_precedence_over_openai_model() {
    let _guard = EnvGuard::apply(&[
        ("DTWIN_MODEL", Some("specific")),
        ("OPENAI_MODEL", Some("generic")),
    ]);
    let mut config = DtwinConfig::default();
    config.apply_env_overrides();
    assert_eq!(config.llm.model, "specific");
}

#[test]
#[serial]
fn load_uses_dtwin_config_env_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "llm:\n  model: from-env-path").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let _guard = EnvGuard::apply(&[
        ("DTWIN_CONFIG", Some(path.as_str())),
        ("DTWIN_MODEL", None),
        ("OPENAI_MODEL", None),
        ("OPENAI_BASE_URL", None),
        ("OPENAI_API_BASE", None),
    ]);

    let config = DtwinConfig::load().unwrap();
    assert_eq!(config.llm.model, "from-env-path");
}

#[test]
#[serial]
fn load_fails_when_dtwin_config_points_nowhere() {
    let _guard = EnvGuard::apply(&[("DTWIN_CONFIG", Some("/nonexistent/dtwin.yaml"))]);
    let err = DtwinConfig::load().unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(err.to_string().contains("DTWIN_CONFIG"));
}

#[test]
#[serial]
fn load_validates_the_merged_result() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "llm:\n  temperature: 9.0").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let _guard = EnvGuard::apply(&[("DTWIN_CONFIG", Some(path.as_str()))]);
    let err = DtwinConfig::load().unwrap_err();
    assert!(err.to_string().contains("temperature"));
}

#[test]
#[serial]
fn api_key_reads_configured_env_var() {
    let _guard = EnvGuard::apply(&[("DTWIN_TEST_KEY_VAR", Some("sk-test-123"))]);
    let mut config = DtwinConfig::default();
    config.llm.api_key_env = "DTWIN_TEST_KEY_VAR".to_string();
    assert_eq!(config.api_key().unwrap(), "sk-test-123");
}

#[test]
#[serial]
fn missing_api_key_is_a_user_error_naming_the_variable() {
    let _guard = EnvGuard::apply(&[("DTWIN_TEST_KEY_VAR", None)]);
    let mut config = DtwinConfig::default();
    config.llm.api_key_env = "DTWIN_TEST_KEY_VAR".to_string();
    let err = config.api_key().unwrap_err();
    assert!(err.to_string().contains("DTWIN_TEST_KEY_VAR"));
    assert!(err.to_string().contains("Fix:"));
}
