//! Entry storage and precedence resolution.
//!
//! A [`ConfigVar`] holds everything known about one name: the stored value,
//! an alias, a default, and whether it defers to the environment. Resolution
//! of one entry, first hit wins:
//!
//! 1. Environment-deferred and the variable is set right now: the coerced
//!    environment value.
//! 2. The stored value. For deferred entries a falsy stored value is skipped.
//! 3. The default.
//!
//! The [`Registry`] maps external keys onto entries. A key reaches an entry
//! either through its canonical name or through its alias, and an alias hides
//! the canonical name of the entry it belongs to. When a key reaches two
//! entries, the steps above are compared across both before moving down.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::coerce::coerce;
use crate::env::Environment;
use crate::value::Value;

/// Declaration of an environment-backed entry, for
/// [`Config::from_envar`](crate::Config::from_envar).
///
/// ```ignore
/// config.from_envar("PORT");
/// config.from_envar(EnvVar::new("MYAPP_DEBUG").rename("DEBUG").default(false));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnvVar {
    pub(crate) name: String,
    pub(crate) alias: Option<String>,
    pub(crate) default: Option<Value>,
}

impl EnvVar {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            default: None,
        }
    }

    /// Expose the entry under `alias` instead of the variable name. An empty
    /// alias is ignored.
    pub fn rename(mut self, alias: &str) -> Self {
        self.alias = (!alias.is_empty()).then(|| alias.to_string());
        self
    }

    /// Value used when the variable is unset and nothing truthy is stored.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl From<&str> for EnvVar {
    fn from(name: &str) -> Self {
        EnvVar::new(name)
    }
}

impl From<String> for EnvVar {
    fn from(name: String) -> Self {
        EnvVar::new(&name)
    }
}

/// One named configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConfigVar {
    pub name: String,
    pub value: Option<Value>,
    pub alias: Option<String>,
    pub default: Option<Value>,
    pub use_env: bool,
}

impl ConfigVar {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            alias: None,
            default: None,
            use_env: false,
        }
    }

    /// True when an alias makes the canonical name unusable as a key.
    fn is_hidden(&self) -> bool {
        self.alias.as_ref().is_some_and(|alias| *alias != self.name)
    }

    /// The coerced environment value, when deferred and the variable is set.
    fn env_value<E: Environment + ?Sized>(&self, env: &E) -> Option<Value> {
        self.use_env
            .then(|| env.var(&self.name))
            .flatten()
            .map(|raw| coerce(&raw))
    }

    /// The stored value as this entry sees it. Deferred entries skip a falsy one.
    fn stored(&self) -> Option<&Value> {
        self.value
            .as_ref()
            .filter(|value| !self.use_env || value.is_truthy())
    }

    /// The effective value right now, reading `env` live.
    pub fn resolve<E: Environment + ?Sized>(&self, env: &E) -> Option<Value> {
        self.env_value(env)
            .or_else(|| self.stored().cloned())
            .or_else(|| self.default.clone())
    }
}

/// All entries of one store.
#[derive(Debug, Clone, Default)]
pub(crate) struct Registry {
    vars: BTreeMap<String, ConfigVar>,
    /// alias -> canonical name
    aliases: HashMap<String, String>,
}

impl Registry {
    /// Create or update the stored value of `name`. Alias, default and the
    /// environment flag are left alone.
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.vars
            .entry(name.to_string())
            .or_insert_with(|| ConfigVar::new(name))
            .value = Some(value);
    }

    /// Create or update an environment-deferred entry, merging in the alias
    /// and default when supplied.
    pub fn declare_env(&mut self, decl: EnvVar) {
        let var = self
            .vars
            .entry(decl.name.clone())
            .or_insert_with(|| ConfigVar::new(&decl.name));
        var.use_env = true;
        // A falsy default only fills an empty slot.
        if let Some(default) = decl.default
            && (default.is_truthy() || var.default.is_none())
        {
            var.default = Some(default);
        }
        if let Some(alias) = decl.alias {
            if let Some(previous) = var.alias.replace(alias.clone())
                && self.aliases.get(&previous) == Some(&decl.name)
            {
                self.aliases.remove(&previous);
            }
            // A re-used alias points at the latest declaration.
            self.aliases.insert(alias, decl.name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Entries reachable through `key`: the entry aliased to `key`, and the
    /// visible entry named `key` when that is a different one.
    fn candidates(&self, key: &str) -> (Option<&ConfigVar>, Option<&ConfigVar>) {
        let aliased = self.aliases.get(key).and_then(|name| self.vars.get(name));
        let direct = self.vars.get(key).filter(|var| {
            !var.is_hidden() && aliased.is_none_or(|alias| alias.name != var.name)
        });
        (aliased, direct)
    }

    /// Resolve `key` against `env`. `None` when no reachable entry has a value.
    ///
    /// When an alias and a visible entry share `key`, the tiers are compared
    /// across both: environment (aliased first), then stored value (visible
    /// first), then default (aliased first).
    pub fn lookup<E: Environment + ?Sized>(&self, key: &str, env: &E) -> Option<Value> {
        let (aliased, direct) = match self.candidates(key) {
            (Some(aliased), Some(direct)) => (aliased, direct),
            (aliased, direct) => return aliased.or(direct)?.resolve(env),
        };
        aliased
            .env_value(env)
            .or_else(|| direct.env_value(env))
            .or_else(|| direct.stored().or(aliased.stored()).cloned())
            .or_else(|| aliased.default.clone().or_else(|| direct.default.clone()))
    }

    /// Every key a lookup can succeed with: visible canonical names and aliases.
    pub fn external_keys(&self) -> BTreeSet<&str> {
        self.vars
            .values()
            .filter(|var| !var.is_hidden())
            .map(|var| var.name.as_str())
            .chain(self.aliases.keys().map(String::as_str))
            .collect()
    }

    #[cfg(test)]
    pub fn get_var(&self, name: &str) -> Option<&ConfigVar> {
        self.vars.get(name)
    }
}
