use autosuggest_common::config::{
    load_widget_settings, Orientation, ServerConfig, WidgetSettings, Width,
};
use std::io::Write;

#[test]
fn test_parse_widget_settings() {
    let toml_str = r#"
min_chars = 2
lookup_limit = 5
auto_select_first = true
trigger_select_on_valid_input = false
orientation = "Top"
show_no_suggestion_notice = true
no_suggestion_notice = "Nothing here"
width = 420
container_class = "country-suggestions"
"#;
    let s: WidgetSettings = toml::from_str(toml_str).unwrap();
    assert_eq!(s.min_chars, 2);
    assert_eq!(s.lookup_limit, Some(5));
    assert!(s.auto_select_first);
    assert!(!s.trigger_select_on_valid_input);
    assert_eq!(s.orientation, Orientation::Top);
    assert!(s.show_no_suggestion_notice);
    assert_eq!(s.no_suggestion_notice, "Nothing here");
    assert_eq!(s.width, Width::Pixels(420));
    assert_eq!(s.container_class, "country-suggestions");
}

#[test]
fn test_widget_settings_defaults() {
    let s: WidgetSettings = toml::from_str("").unwrap();
    assert_eq!(s, WidgetSettings::default());
    assert_eq!(s.min_chars, 1);
    assert_eq!(s.max_height, 300);
    assert_eq!(s.z_index, 9999);
    assert_eq!(s.kill_delay_ms, 50);
    assert_eq!(s.width, Width::Auto);
    assert_eq!(s.no_suggestion_notice, "No results");
    assert!(s.trigger_select_on_valid_input);
}

#[test]
fn test_invalid_values_fall_back() {
    let toml_str = r#"
orientation = "left"
lookup_limit = 0
width = "flex"
"#;
    let s: WidgetSettings = toml::from_str(toml_str).unwrap();
    assert_eq!(s.orientation, Orientation::Bottom);
    assert_eq!(s.lookup_limit, None);
    assert_eq!(s.width, Width::Flex);
}

#[test]
fn test_load_widget_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "min_chars = 3\npreserve_input = true").unwrap();
    let s = load_widget_settings(file.path()).unwrap();
    assert_eq!(s.min_chars, 3);
    assert!(s.preserve_input);
}

#[test]
fn test_server_config_defaults() {
    let config: ServerConfig = toml::from_str("").unwrap();
    assert_eq!(config.listen_addr, "127.0.0.1:3000");
    assert!(config.catalog_path.is_none());
}

#[test]
fn test_server_config_parse() {
    let config: ServerConfig = toml::from_str(
        r#"
listen_addr = "0.0.0.0:8080"
catalog_path = "/srv/catalog.json"
"#,
    )
    .unwrap();
    assert_eq!(config.listen_addr, "0.0.0.0:8080");
    assert_eq!(config.catalog_path.as_deref(), Some("/srv/catalog.json"));
}
