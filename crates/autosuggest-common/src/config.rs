use anyhow::Result;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Returns the autosuggest base directory: `~/.autosuggest`, fallback `/tmp/autosuggest`.
pub fn autosuggest_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".autosuggest"))
        .unwrap_or_else(|| PathBuf::from("/tmp/autosuggest"))
}

// ---------------------------------------------------------------------------
// Widget settings
// ---------------------------------------------------------------------------

/// Which side of the input the suggestion list opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Bottom,
    Top,
    Auto,
}

impl Orientation {
    /// Lenient parse: anything unrecognised falls back to `Bottom`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "top" => Orientation::Top,
            "auto" => Orientation::Auto,
            _ => Orientation::Bottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Bottom => "bottom",
            Orientation::Top => "top",
            Orientation::Auto => "auto",
        }
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Orientation::parse(&raw))
    }
}

/// Container width policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
    /// Track the input's width.
    #[default]
    Auto,
    /// Leave width unset so the widest row decides.
    Flex,
    Pixels(u32),
}

impl<'de> Deserialize<'de> for Width {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Pixels(u32),
            Keyword(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Pixels(px) => Width::Pixels(px),
            Raw::Keyword(k) => match k.trim().to_lowercase().as_str() {
                "flex" => Width::Flex,
                other => other.parse().map(Width::Pixels).unwrap_or(Width::Auto),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetSettings {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    /// Cap on static results; None means unlimited.
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub lookup_limit: Option<usize>,
    #[serde(default)]
    pub auto_select_first: bool,
    #[serde(default = "default_true")]
    pub trigger_select_on_valid_input: bool,
    #[serde(default)]
    pub preserve_input: bool,
    #[serde(default)]
    pub tab_disabled: bool,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub show_no_suggestion_notice: bool,
    #[serde(default = "default_no_suggestion_notice")]
    pub no_suggestion_notice: String,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    #[serde(default)]
    pub width: Width,
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    /// Parent element for the container; None means the document body.
    #[serde(default)]
    pub append_to: Option<String>,
    #[serde(default)]
    pub force_fix_position: bool,
    #[serde(default = "default_container_class")]
    pub container_class: String,
    #[serde(default = "default_kill_delay_ms")]
    pub kill_delay_ms: u64,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            lookup_limit: None,
            auto_select_first: false,
            trigger_select_on_valid_input: true,
            preserve_input: false,
            tab_disabled: false,
            orientation: Orientation::Bottom,
            show_no_suggestion_notice: false,
            no_suggestion_notice: default_no_suggestion_notice(),
            max_height: default_max_height(),
            width: Width::Auto,
            z_index: default_z_index(),
            append_to: None,
            force_fix_position: false,
            container_class: default_container_class(),
            kill_delay_ms: default_kill_delay_ms(),
        }
    }
}

/// Partial settings for `set_options`. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub min_chars: Option<usize>,
    pub lookup_limit: Option<i64>,
    pub auto_select_first: Option<bool>,
    pub trigger_select_on_valid_input: Option<bool>,
    pub preserve_input: Option<bool>,
    pub tab_disabled: Option<bool>,
    pub orientation: Option<String>,
    pub show_no_suggestion_notice: Option<bool>,
    pub no_suggestion_notice: Option<String>,
    pub max_height: Option<u32>,
    pub width: Option<Width>,
    pub z_index: Option<i32>,
    pub append_to: Option<String>,
    pub force_fix_position: Option<bool>,
    pub container_class: Option<String>,
    pub kill_delay_ms: Option<u64>,
}

impl WidgetSettings {
    /// Merge `update` over the current settings, re-validating as it goes.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.min_chars {
            self.min_chars = v;
        }
        if let Some(v) = update.lookup_limit {
            self.lookup_limit = normalize_limit(v);
        }
        if let Some(v) = update.auto_select_first {
            self.auto_select_first = v;
        }
        if let Some(v) = update.trigger_select_on_valid_input {
            self.trigger_select_on_valid_input = v;
        }
        if let Some(v) = update.preserve_input {
            self.preserve_input = v;
        }
        if let Some(v) = update.tab_disabled {
            self.tab_disabled = v;
        }
        if let Some(v) = update.orientation {
            self.orientation = Orientation::parse(&v);
        }
        if let Some(v) = update.show_no_suggestion_notice {
            self.show_no_suggestion_notice = v;
        }
        if let Some(v) = update.no_suggestion_notice {
            self.no_suggestion_notice = v;
        }
        if let Some(v) = update.max_height {
            self.max_height = v;
        }
        if let Some(v) = update.width {
            self.width = v;
        }
        if let Some(v) = update.z_index {
            self.z_index = v;
        }
        if let Some(v) = update.append_to {
            self.append_to = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = update.force_fix_position {
            self.force_fix_position = v;
        }
        if let Some(v) = update.container_class {
            self.container_class = v;
        }
        if let Some(v) = update.kill_delay_ms {
            self.kill_delay_ms = v;
        }
    }
}

/// Non-positive limits mean "no limit".
fn normalize_limit(raw: i64) -> Option<usize> {
    if raw > 0 {
        usize::try_from(raw).ok()
    } else {
        None
    }
}

fn deserialize_limit<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.and_then(normalize_limit))
}

fn default_min_chars() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_no_suggestion_notice() -> String {
    "No results".to_string()
}

fn default_max_height() -> u32 {
    300
}

fn default_z_index() -> i32 {
    9999
}

fn default_container_class() -> String {
    "autocomplete-suggestions".to_string()
}

fn default_kill_delay_ms() -> u64 {
    50
}

pub fn load_widget_settings(path: &std::path::Path) -> Result<WidgetSettings> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

// ---------------------------------------------------------------------------
// Server config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// JSON catalog to serve instead of the built-in country list.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            catalog_path: None,
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

pub fn load_server_config() -> Result<ServerConfig> {
    let path = std::env::var("AUTOSUGGEST_SERVER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| autosuggest_dir().join("server.toml"));
    if path.exists() {
        tracing::debug!("loading server config from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        Ok(ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_parse_fallback() {
        assert_eq!(Orientation::parse(" TOP "), Orientation::Top);
        assert_eq!(Orientation::parse("auto"), Orientation::Auto);
        assert_eq!(Orientation::parse("sideways"), Orientation::Bottom);
        assert_eq!(Orientation::parse(""), Orientation::Bottom);
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit(0), None);
        assert_eq!(normalize_limit(-3), None);
        assert_eq!(normalize_limit(5), Some(5));
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut s = WidgetSettings::default();
        s.apply(SettingsUpdate {
            no_suggestion_notice: Some("nothing".to_string()),
            ..Default::default()
        });
        assert_eq!(s.no_suggestion_notice, "nothing");
        assert_eq!(s.min_chars, 1);
        assert!(s.trigger_select_on_valid_input);
    }

    #[test]
    fn test_apply_revalidates_orientation_and_limit() {
        let mut s = WidgetSettings::default();
        s.apply(SettingsUpdate {
            orientation: Some("diagonal".to_string()),
            lookup_limit: Some(-1),
            ..Default::default()
        });
        assert_eq!(s.orientation, Orientation::Bottom);
        assert_eq!(s.lookup_limit, None);
    }
}
