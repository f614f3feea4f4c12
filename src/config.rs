//! The configuration store.
//!
//! [`Config`] is the facade applications talk to. Load operations populate
//! its entries; every read resolves precedence again against the live
//! environment, so a variable changed after loading is seen on the next read.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::dotenv;
use crate::env::{Environment, ProcessEnv};
use crate::error::ConfigError;
use crate::object::{self, KeyFilter};
use crate::registry::{EnvVar, Registry};
use crate::search::Discovery;
use crate::table;
use crate::value::{Value, ValueKind};

type DiagnosticSink = Box<dyn Fn(&Diagnostic) + Send + Sync>;

/// A layered key/value configuration store.
///
/// Load in whatever order suits the application; for any name, the last load
/// that touched it decides the stored value. Entries declared with
/// [`from_envar`](Self::from_envar) check the environment first on every read,
/// regardless of load order.
///
/// Loading is expected to finish before the store is shared. After that,
/// reads through `&Config` are safe from several threads as long as the
/// environment `E` is.
pub struct Config<E = ProcessEnv> {
    registry: Registry,
    env: E,
    sink: Option<DiagnosticSink>,
}

impl Config<ProcessEnv> {
    /// An empty store reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }
}

impl Default for Config<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Config<E> {
    /// An empty store reading variables from `env`.
    pub fn with_env(env: E) -> Self {
        Self {
            registry: Registry::default(),
            env,
            sink: None,
        }
    }

    /// Receive every [`Diagnostic`] this store raises, in addition to the
    /// `tracing` warning.
    pub fn on_diagnostic<F>(mut self, sink: F) -> Self
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Store `value` under `key`, creating the entry if needed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.registry.set_value(key, value.into());
    }

    /// Resolve `key`: live environment (for deferred entries), then the
    /// stored value, then the default.
    ///
    /// Once an entry has been renamed, only the alias works as a key; its
    /// original name fails with [`ConfigError::MissingValue`].
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        self.try_get(key).ok_or_else(|| ConfigError::MissingValue {
            key: key.to_string(),
        })
    }

    /// Like [`get`](Self::get), with `None` instead of an error.
    pub fn try_get(&self, key: &str) -> Option<Value> {
        self.registry.lookup(key, &self.env)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.get(key)?;
        value
            .as_bool()
            .ok_or_else(|| mismatch(key, ValueKind::Boolean, &value))
    }

    pub fn get_integer(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.get(key)?;
        value
            .as_integer()
            .ok_or_else(|| mismatch(key, ValueKind::Integer, &value))
    }

    /// Integers are accepted and widened.
    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        let value = self.get(key)?;
        value
            .as_float()
            .ok_or_else(|| mismatch(key, ValueKind::Float, &value))
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        match self.get(key)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(key, ValueKind::String, &other)),
        }
    }

    /// True iff an entry is registered under this exact name. Aliases do not
    /// count.
    pub fn contains(&self, key: &str) -> bool {
        self.registry.contains(key)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Registered entry names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Store every upper-case field of `source`. See [`KeyFilter::UpperCase`].
    pub fn from_object<S: Serialize + ?Sized>(&mut self, source: &S) -> Result<(), ConfigError> {
        self.from_object_with(source, KeyFilter::UpperCase)
    }

    pub fn from_object_with<S: Serialize + ?Sized>(
        &mut self,
        source: &S,
        filter: KeyFilter,
    ) -> Result<(), ConfigError> {
        let entries = object::object_entries(source, filter)?;
        tracing::debug!(entries = entries.len(), "loaded configuration object");
        self.merge(entries);
        Ok(())
    }

    /// Store every entry of a key=value file. Nothing is stored if the file
    /// cannot be read or parsed.
    pub fn from_dotenv(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let entries = dotenv::load_dotenv(path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded key=value file");
        self.merge(entries);
        Ok(())
    }

    /// Store every top-level scalar of a flat TOML file.
    pub fn from_toml(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let entries = table::load_table(path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded TOML file");
        self.merge(entries);
        Ok(())
    }

    /// Find files as described by `discovery` and load them in priority
    /// order. Returns the paths that were loaded. Nothing is stored unless
    /// every file loads.
    pub fn discover(&mut self, discovery: &Discovery) -> Result<Vec<PathBuf>, ConfigError> {
        let files = discovery.read_files()?;
        let mut layers = Vec::with_capacity(files.len());
        for (path, content) in &files {
            let entries = if discovery.is_toml() {
                table::parse_table(content, path)?
            } else {
                dotenv::parse_dotenv(content, path)?
            };
            tracing::debug!(path = %path.display(), entries = entries.len(), "loaded discovered file");
            layers.push(entries);
        }
        for entries in layers {
            self.merge(entries);
        }
        Ok(files.into_iter().map(|(path, _)| path).collect())
    }

    /// Declare an entry that reads the named environment variable on every
    /// lookup.
    ///
    /// If the variable is not set and no rename is given, a
    /// [`Diagnostic::MissingEnvironment`] is raised and nothing is registered.
    /// Otherwise the entry is created or updated, keeping any stored value.
    pub fn from_envar(&mut self, var: impl Into<EnvVar>) {
        let var = var.into();
        if var.alias.is_none() && !self.env.exists(&var.name) {
            self.emit(Diagnostic::MissingEnvironment { name: var.name });
            return;
        }
        tracing::debug!(name = %var.name, alias = ?var.alias, "registered environment variable");
        self.registry.declare_env(var);
    }

    /// Effective values by external key (the alias for renamed entries).
    /// Keys that currently resolve to nothing are left out.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.registry
            .external_keys()
            .into_iter()
            .filter_map(|key| Some((key.to_string(), self.try_get(key)?)))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.to_map()
                .into_iter()
                .map(|(key, value)| {
                    let json = serde_json::to_value(&value).unwrap_or(serde_json::Value::Null);
                    (key, json)
                })
                .collect(),
        )
    }

    fn merge(&mut self, entries: Vec<(String, Value)>) {
        for (name, value) in entries {
            self.registry.set_value(&name, value);
        }
    }

    fn emit(&self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        if let Some(sink) = &self.sink {
            sink(&diagnostic);
        }
    }
}

fn mismatch(key: &str, expected: ValueKind, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Renders [`to_map`](Config::to_map) as JSON.
impl<E: Environment> fmt::Display for Config<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.to_map()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl<E: fmt::Debug> fmt::Debug for Config<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("registry", &self.registry)
            .field("env", &self.env)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// Two stores are equal when they resolve the same keys to the same values
/// right now, however those values were obtained.
impl<E: Environment, F: Environment> PartialEq<Config<F>> for Config<E> {
    fn eq(&self, other: &Config<F>) -> bool {
        self.to_map() == other.to_map()
    }
}
