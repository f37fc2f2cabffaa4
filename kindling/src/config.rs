//! Application configuration.
//!
//! Framework behavior is controlled by [ApplicationConfig], while arbitrary application values live
//! in a [ConfigStore], which is available for injection under [CONFIG_TAG]. Both can be loaded
//! from the environment: an optional `kindling.json` file, overridden by environment variables
//! prefixed with `KINDLING_`. Nested keys in variable names are separated with `__`, e.g.
//! `KINDLING_DATABASE__URL` sets `database.url`.

use config::{Config, ConfigError, Environment, File, Map, Value, ValueKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::RefCell;

const CONFIG_ENV_PREFIX: &str = "KINDLING";
const CONFIG_ENV_SEPARATOR: &str = "__";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "kindling.json";

/// Tag under which the application's [ConfigStore] is registered.
pub const CONFIG_TAG: &str = "config";

/// Settings of the [Application](crate::application::Application) itself, as opposed to values
/// meant for services, which belong in the [ConfigStore]. Missing keys keep their defaults.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Install a `tracing_subscriber` fmt logger filtered by `RUST_LOG` when
    /// [start](crate::application::Application::start) is called. A global subscriber installed
    /// earlier is kept. Enabled by default.
    pub install_tracing_logger: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
        }
    }
}

impl ApplicationConfig {
    /// Reads the settings from `kindling.json` and `KINDLING_` variables, e.g.
    /// `KINDLING_INSTALL_TRACING_LOGGER=false`.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        load_environment().and_then(|config| config.try_deserialize())
    }
}

fn load_environment() -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator(CONFIG_ENV_SEPARATOR),
        )
        .build()
}

/// Hierarchical key-value store addressed with dotted paths, e.g. `database.url`. Values are
/// [config] crate values, so anything deserializable can be read back with
/// [get_typed](ConfigStore::get_typed).
#[derive(Default, Debug)]
pub struct ConfigStore {
    root: RefCell<Map<String, Value>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: Map<String, Value>) -> Self {
        Self {
            root: RefCell::new(table),
        }
    }

    /// Creates a store with values loaded from the environment, as described in the module
    /// documentation.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        load_environment()
            .and_then(|config| config.try_deserialize::<Map<String, Value>>())
            .map(Self::from_table)
    }

    /// Returns the value under given path, if present.
    pub fn get(&self, key: &str) -> Option<Value> {
        let root = self.root.borrow();
        let mut segments = key.split('.');
        let mut current = segments.next().and_then(|segment| root.get(segment))?;

        for segment in segments {
            current = match &current.kind {
                ValueKind::Table(table) => table.get(segment)?,
                _ => return None,
            };
        }

        Some(current.clone())
    }

    /// Returns the deserialized value under given path, if present.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.get(key).map(|value| value.try_deserialize()).transpose()
    }

    /// Returns the deserialized value under given path, or `default` if it's missing.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        self.get_typed(key).map(|value| value.unwrap_or(default))
    }

    /// Sets the value under given path. Missing intermediate tables are created, and intermediate
    /// values which are not tables get replaced.
    pub fn set<V: Into<Value>>(&self, key: &str, value: V) -> Result<(), ConfigError> {
        let path: Vec<_> = key.split('.').collect();
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(ConfigError::Message(format!("Invalid config key: '{key}'")));
        }

        insert_path(&mut self.root.borrow_mut(), &path, value.into());
        Ok(())
    }

    /// Deep merges given table into the store. Nested tables are merged, while other values
    /// replace existing ones.
    pub fn merge(&self, table: Map<String, Value>) {
        merge_tables(&mut self.root.borrow_mut(), table);
    }

    /// Returns a copy of all stored values.
    pub fn to_table(&self) -> Map<String, Value> {
        self.root.borrow().clone()
    }
}

fn empty_table() -> Value {
    Value::new(None, ValueKind::Table(Map::new()))
}

fn insert_path(table: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [key] => {
            table.insert(key.to_string(), value);
        }
        [key, rest @ ..] => {
            let entry = table.entry(key.to_string()).or_insert_with(empty_table);
            if !matches!(entry.kind, ValueKind::Table(_)) {
                *entry = empty_table();
            }

            if let ValueKind::Table(nested) = &mut entry.kind {
                insert_path(nested, rest, value);
            }
        }
    }
}

fn merge_tables(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(current)
                if matches!(current.kind, ValueKind::Table(_))
                    && matches!(value.kind, ValueKind::Table(_)) =>
            {
                if let (ValueKind::Table(current), ValueKind::Table(incoming)) =
                    (&mut current.kind, value.kind)
                {
                    merge_tables(current, incoming);
                }
            }
            _ => {
                target.insert(key, value);
            }
        }
    }
}
