use crate::{args::CONFIG_FILENAME, corpus::SearchMode, ui::highlight::HighlightMode};
use itertools::Itertools;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};
use strum::VariantNames;
use thiserror::Error;
use tracing::warn;

/// User preferences that survive between sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub highlight: bool,
    pub search_mode: SearchMode,
    pub highlight_mode: HighlightMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            highlight: true,
            search_mode: SearchMode::And,
            highlight_mode: HighlightMode::Default,
        }
    }
}

/// A user-settable option: the command that changes it, its key in the
/// config file and the values it accepts.
pub struct Setting {
    pub command: &'static str,
    pub key: &'static str,
    pub allowed: &'static [&'static str],
    pub label: &'static str,
    apply: fn(&mut Configuration, &str) -> bool,
    current: fn(&Configuration) -> String,
}

pub static SETTINGS: [Setting; 3] = [
    Setting {
        command: ":highlight",
        key: "highlight",
        allowed: &["ON", "OFF"],
        label: "Highlighting",
        apply: |config, value| match value {
            "ON" => {
                config.highlight = true;
                true
            }
            "OFF" => {
                config.highlight = false;
                true
            }
            _ => false,
        },
        current: |config| String::from(if config.highlight { "ON" } else { "OFF" }),
    },
    Setting {
        command: ":search-mode",
        key: "search_mode",
        allowed: SearchMode::VARIANTS,
        label: "Search mode set to",
        apply: |config, value| {
            SearchMode::from_str(value)
                .map(|mode| config.search_mode = mode)
                .is_ok()
        },
        current: |config| config.search_mode.to_string(),
    },
    Setting {
        command: ":highlight-mode",
        key: "highlight_mode",
        allowed: HighlightMode::VARIANTS,
        label: "Highlight mode set to",
        apply: |config, value| {
            HighlightMode::from_str(value)
                .map(|mode| config.highlight_mode = mode)
                .is_ok()
        },
        current: |config| config.highlight_mode.to_string(),
    },
];

/// Looks up the setting changed by `command`, e.g. `:search-mode`.
pub fn find_setting(command: &str) -> Option<&'static Setting> {
    SETTINGS.iter().find(|setting| setting.command == command)
}

impl PartialEq for Setting {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command
    }
}

impl Eq for Setting {}

impl std::fmt::Debug for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setting")
            .field("command", &self.command)
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

impl Setting {
    /// Normalizes a user supplied value, `None` if it is not allowed.
    pub fn parse_value(&self, value: &str) -> Option<String> {
        let value = value.trim().to_uppercase();
        self.allowed.contains(&value.as_str()).then_some(value)
    }

    pub fn apply(&self, config: &mut Configuration, value: &str) -> bool {
        self.allowed.contains(&value) && (self.apply)(config, value)
    }

    pub fn current(&self, config: &Configuration) -> String {
        (self.current)(config)
    }

    pub fn usage(&self) -> String {
        format!("Usage: {} {}", self.command, self.allowed.iter().join("|"))
    }
}

impl Configuration {
    /// Builds a configuration from the persisted JSON object. Unknown keys and
    /// values outside a setting's allowed set leave the default in place.
    pub fn from_json(json: &Value) -> Self {
        let mut config = Self::default();

        let Some(object) = json.as_object() else {
            return config;
        };

        for setting in &SETTINGS {
            let value = match object.get(setting.key) {
                Some(Value::String(value)) => value.as_str(),
                // files written by older versions stored a plain boolean
                Some(Value::Bool(true)) => "ON",
                Some(Value::Bool(false)) => "OFF",
                _ => continue,
            };
            setting.apply(&mut config, value);
        }

        config
    }

    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = SETTINGS
            .iter()
            .map(|setting| {
                let value = setting.current(self);
                (setting.key.to_string(), Value::String(value))
            })
            .collect();
        Value::Object(object)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No {} found", CONFIG_FILENAME)]
    NotFound,

    #[error("{} is invalid", CONFIG_FILENAME)]
    Invalid(#[source] serde_json::Error),

    #[error("Could not read {}", CONFIG_FILENAME)]
    Unreadable(#[source] io::Error),

    #[error("Writing {} failed", CONFIG_FILENAME)]
    Write(#[source] io::Error),

    #[error("Writing {} failed", CONFIG_FILENAME)]
    Serialize(#[source] serde_json::Error),
}

/// Persistence of the [`Configuration`].
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore {
    fn load(&self) -> Result<Configuration, ConfigError>;
    fn save(&self, config: &Configuration) -> Result<(), ConfigError>;
}

/// Stores the configuration as a 4-space indented JSON object.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Configuration, ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Unreadable(e),
        })?;

        let json: Value = serde_json::from_str(&content).map_err(ConfigError::Invalid)?;

        Ok(Configuration::from_json(&json))
    }

    fn save(&self, config: &Configuration) -> Result<(), ConfigError> {
        let file = File::create(&self.path).map_err(ConfigError::Write)?;
        let mut writer = BufWriter::new(file);

        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        config
            .to_json()
            .serialize(&mut serializer)
            .map_err(ConfigError::Serialize)?;

        writer.flush().map_err(ConfigError::Write)
    }
}

/// Loads the configuration, falling back to the defaults and telling the user
/// why whenever the store cannot provide one.
pub fn load_or_default(
    store: &impl ConfigStore,
    out: &mut impl Write,
) -> io::Result<Configuration> {
    match store.load() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(error = ?e, "using default configuration");
            writeln!(out, "{e}. Using default configuration.")?;
            Ok(Configuration::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert!(config.highlight);
        assert_eq!(config.search_mode, SearchMode::And);
        assert_eq!(config.highlight_mode, HighlightMode::Default);
    }

    #[test_case(":highlight" => Some("highlight"); "highlight")]
    #[test_case(":search-mode" => Some("search_mode"); "search mode")]
    #[test_case(":highlight-mode" => Some("highlight_mode"); "highlight mode")]
    #[test_case(":hl-mode" => None; "unknown")]
    #[test_case("highlight" => None; "without colon")]
    fn lookup(command: &str) -> Option<&'static str> {
        find_setting(command).map(|setting| setting.key)
    }

    #[test_case(":highlight", " on " => Some("ON".into()); "lowercase is normalized")]
    #[test_case(":highlight", "yes" => None; "not allowed")]
    #[test_case(":search-mode", "or" => Some("OR".into()); "search mode")]
    #[test_case(":highlight-mode", "Green" => Some("GREEN".into()); "highlight mode")]
    #[test_case(":highlight-mode", "green extra" => None; "trailing words")]
    #[test_case(":search-mode", "" => None; "empty")]
    fn parse_value(command: &str, value: &str) -> Option<String> {
        find_setting(command).and_then(|setting| setting.parse_value(value))
    }

    #[test_case(":highlight" => "Usage: :highlight ON|OFF"; "highlight")]
    #[test_case(":search-mode" => "Usage: :search-mode AND|OR"; "search mode")]
    #[test_case(":highlight-mode" => "Usage: :highlight-mode DEFAULT|GREEN"; "highlight mode")]
    fn usage(command: &str) -> String {
        find_setting(command).map(Setting::usage).unwrap_or_default()
    }

    #[test]
    fn apply_changes_only_the_target() {
        let mut config = Configuration::default();

        assert!(find_setting(":search-mode").unwrap().apply(&mut config, "OR"));
        assert!(!find_setting(":highlight").unwrap().apply(&mut config, "MAYBE"));

        assert_eq!(
            config,
            Configuration {
                search_mode: SearchMode::Or,
                ..Configuration::default()
            }
        );
    }

    #[test]
    fn json_round_trip() {
        let config = Configuration {
            highlight: false,
            search_mode: SearchMode::Or,
            highlight_mode: HighlightMode::Green,
        };

        assert_eq!(
            config.to_json(),
            json!({"highlight": "OFF", "search_mode": "OR", "highlight_mode": "GREEN"})
        );
        assert_eq!(Configuration::from_json(&config.to_json()), config);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = Configuration::from_json(&json!({
            "highlight": "off",
            "search_mode": "XOR",
            "highlight_mode": "GREEN",
            "colour": "RED",
        }));

        assert_eq!(
            config,
            Configuration {
                highlight_mode: HighlightMode::Green,
                ..Configuration::default()
            }
        );
    }

    #[test]
    fn boolean_highlight_is_accepted() {
        let config = Configuration::from_json(&json!({"highlight": false, "search_mode": "OR"}));
        assert!(!config.highlight);
        assert_eq!(config.search_mode, SearchMode::Or);
    }

    #[test]
    fn non_object_is_default() {
        assert_eq!(Configuration::from_json(&json!([1, 2])), Configuration::default());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let store = JsonFileStore::new(&path);
        let config = Configuration {
            highlight: false,
            ..Configuration::default()
        };

        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    \"highlight\": \"OFF\""));
    }

    #[test]
    fn file_store_keeps_settings_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);

        JsonFileStore::new(&path)
            .save(&Configuration::default())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let positions: Vec<_> = ["\"highlight\"", "\"search_mode\"", "\"highlight_mode\""]
            .iter()
            .map(|key| content.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{content}");
    }

    #[test]
    fn file_store_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let store = JsonFileStore::new(&path);

        assert!(matches!(store.load(), Err(ConfigError::NotFound)));

        std::fs::write(&path, "{ highlight").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Invalid(_))));

        let unwritable = JsonFileStore::new(dir.path().join("missing").join(CONFIG_FILENAME));
        assert!(matches!(
            unwritable.save(&Configuration::default()),
            Err(ConfigError::Write(_))
        ));
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(store.load(), Err(ConfigError::Unreadable(_))));
    }

    #[test_case(Err(ConfigError::NotFound) => "No config.json found. Using default configuration.\n"; "missing")]
    #[test_case(
        Err(ConfigError::Invalid(serde_json::from_str::<Value>("{").unwrap_err()))
        => "config.json is invalid. Using default configuration.\n"; "invalid")]
    #[test_case(
        Err(ConfigError::Unreadable(io::Error::from(io::ErrorKind::PermissionDenied)))
        => "Could not read config.json. Using default configuration.\n"; "unreadable")]
    fn fallback_message(result: Result<Configuration, ConfigError>) -> String {
        let mut store = MockConfigStore::new();
        store.expect_load().return_once(move || result);

        let mut out = Vec::new();
        let config = load_or_default(&store, &mut out).unwrap();

        assert_eq!(config, Configuration::default());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn loaded_config_is_silent() {
        let loaded = Configuration {
            search_mode: SearchMode::Or,
            ..Configuration::default()
        };
        let mut store = MockConfigStore::new();
        store.expect_load().return_once(move || Ok(loaded));

        let mut out = Vec::new();

        assert_eq!(load_or_default(&store, &mut out).unwrap(), loaded);
        assert!(out.is_empty());
    }
}
