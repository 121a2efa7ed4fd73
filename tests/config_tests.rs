mod common;

use gametime_utils::{AppError, ConfigOptions, OptionSpec, OptionValue};

fn specs() -> Vec<OptionSpec> {
    vec![
        OptionSpec::toggle("log_sensitive_data"),
        OptionSpec::new(
            "presence_mode",
            OptionValue::Int(1),
            (0..4).map(OptionValue::Int).collect(),
        )
        .expect("valid spec"),
        OptionSpec::string("nickname", "anonymous"),
    ]
}

#[test]
fn declared_options_resolve_to_defaults_when_absent() {
    let cfg_path = common::temp_file("cfg_defaults", "cfg");
    common::write_file(&cfg_path, "# empty settings file\n");

    let declared = specs();
    assert_eq!(declared[0].name(), "log_sensitive_data");

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &declared)
        .expect("load settings");

    assert_eq!(cfg.get_bool("log_sensitive_data"), Some(false));
    assert_eq!(cfg.get_int("presence_mode"), Some(1));
    assert_eq!(cfg.get_str("nickname"), Some("anonymous"));
    assert!(cfg.get("undeclared").is_none());
}

#[test]
fn file_values_override_defaults() {
    let cfg_path = common::temp_file("cfg_overrides", "cfg");
    common::write_file(
        &cfg_path,
        "# user settings\n\
         log_sensitive_data = true\n\
         presence_mode = 3\n\
         nickname = player_one\n",
    );

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs())
        .expect("load settings");

    assert_eq!(cfg.get_bool("log_sensitive_data"), Some(true));
    assert_eq!(cfg.get_int("presence_mode"), Some(3));
    assert_eq!(cfg.get_str("nickname"), Some("player_one"));
}

#[test]
fn disallowed_values_fall_back_to_the_default() {
    let cfg_path = common::temp_file("cfg_disallowed", "cfg");
    common::write_file(
        &cfg_path,
        "presence_mode = 99\n\
         log_sensitive_data = maybe\n",
    );

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs())
        .expect("load settings");

    assert_eq!(cfg.get_int("presence_mode"), Some(1));
    assert_eq!(cfg.get_bool("log_sensitive_data"), Some(false));
}

#[test]
fn boolean_matching_is_case_insensitive() {
    let cfg_path = common::temp_file("cfg_case", "cfg");
    common::write_file(&cfg_path, "log_sensitive_data = TRUE\n");

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs())
        .expect("load settings");

    assert_eq!(cfg.get_bool("log_sensitive_data"), Some(true));
}

#[test]
fn unknown_keys_and_malformed_lines_are_ignored() {
    let cfg_path = common::temp_file("cfg_unknown", "cfg");
    common::write_file(
        &cfg_path,
        "some_future_option = 5\n\
         line without an equals sign\n\
         nickname = still_works\n",
    );

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs())
        .expect("load settings");

    assert_eq!(cfg.get_str("nickname"), Some("still_works"));
    assert!(cfg.get("some_future_option").is_none());
}

#[test]
fn missing_settings_file_is_created_from_the_template() {
    let cfg_path = common::temp_file("cfg_from_template", "cfg");
    let template_path = common::temp_file("cfg_template", "cfg");
    common::write_file(
        &template_path,
        "## This documentation block is stripped when the\n\
         ## user settings file is generated.\n\
         \n\
         # Set to true to include sensitive data in logs.\n\
         log_sensitive_data = true\n\
         presence_mode = 2\n",
    );

    let cfg = ConfigOptions::load(&cfg_path, &template_path, &specs())
        .expect("template copied and parsed");

    assert_eq!(cfg.get_bool("log_sensitive_data"), Some(true));
    assert_eq!(cfg.get_int("presence_mode"), Some(2));

    // The generated file exists and carries no `##` documentation lines.
    let generated = std::fs::read_to_string(&cfg_path).expect("generated settings file");
    assert!(!generated.contains("##"));
    assert!(generated.contains("log_sensitive_data = true"));
}

#[test]
fn missing_template_is_a_config_error() {
    let cfg_path = common::temp_file("cfg_no_template", "cfg");

    let err = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs()).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn spec_default_must_be_an_allowed_value() {
    let err = OptionSpec::new(
        "broken",
        OptionValue::Int(9),
        vec![OptionValue::Int(0), OptionValue::Int(1)],
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidOption(ref name) if name == "broken"));
}

#[test]
fn blank_values_keep_the_default() {
    let cfg_path = common::temp_file("cfg_blank_value", "cfg");
    common::write_file(&cfg_path, "nickname =\n");

    let cfg = ConfigOptions::load(&cfg_path, "/nonexistent/default.cfg", &specs())
        .expect("load settings");

    assert_eq!(cfg.get_str("nickname"), Some("anonymous"));
}
