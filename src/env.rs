//! Read access to environment variables.
//!
//! Resolution reads the environment through the [`Environment`] trait on every
//! lookup, never caching. [`ProcessEnv`] is the real process environment;
//! [`MapEnv`] is an in-memory stand-in so precedence can be tested without
//! touching process state.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A source of named string variables.
pub trait Environment {
    /// The current value of `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;

    fn exists(&self, name: &str) -> bool {
        self.var(name).is_some()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

/// The host process environment. Names are matched exactly. A value that is
/// not valid Unicode exists but reads as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn exists(&self, name: &str) -> bool {
        std::env::var_os(name).is_some()
    }
}

/// An in-memory environment.
///
/// Clones share the same variables, so a handle kept by the caller can change
/// what a [`Config`](crate::Config) sees after it was built.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: Arc<RwLock<HashMap<String, String>>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: Arc::new(RwLock::new(vars)),
        }
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
