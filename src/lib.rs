//! Layered key/value configuration with live environment overrides.
//!
//! Layerfig gives an application one dictionary-like [`Config`] for all of its
//! settings, wherever they came from: defaults declared in code, key=value or
//! TOML files, and environment variables.
//!
//! ```ignore
//! let mut config = Config::new();
//! config.from_object(&Defaults::default())?;
//! config.from_dotenv(".env")?;
//! config.from_envar("DATABASE_URL");
//! config.from_envar(EnvVar::new("MYAPP_DEBUG").rename("DEBUG").default(false));
//!
//! let debug = config.get_bool("DEBUG")?;
//! ```
//!
//! # Sources
//!
//! - **Objects** ([`Config::from_object`]): any `Serialize` value that
//!   serializes to a flat map. Only upper-case field names are taken by
//!   default, so a struct can carry helpers or private state next to its
//!   settings. Values keep their Rust types.
//! - **Key=value files** ([`Config::from_dotenv`]): `NAME=value` lines, `#`
//!   comments. Values are coerced (see below).
//! - **TOML files** ([`Config::from_toml`]): a flat document of scalars.
//!   Values keep their TOML types.
//! - **Discovered files** ([`Config::discover`]): look for a file name along
//!   a list of [`SearchPath`]s and load what is found.
//! - **Environment variables** ([`Config::from_envar`]): declares an entry
//!   that reads the variable on every lookup.
//!
//! Nested values are not supported. Object and TOML sources that contain
//! tables or arrays are rejected with [`ConfigError::UnsupportedValue`].
//!
//! # Precedence
//!
//! Loads are applied in call order: for a given name, the last object or file
//! load that mentions it sets its stored value. Environment-declared entries
//! sit above that, whatever the call order:
//!
//! ```text
//! Default               EnvVar::default(..)
//!        ↑ overridden by
//! Stored value          set(), from_object(), from_dotenv(), from_toml()
//!        ↑ overridden by
//! Environment           from_envar(), read on every get()
//! ```
//!
//! The environment is never cached. Change a variable after loading and the
//! next [`Config::get`] sees the new value; unset it and the stored value or
//! default comes back. A falsy stored value (`false`, `0`, `0.0`, `""`) on
//! an environment-declared entry does not shadow its default.
//!
//! # Renaming
//!
//! [`EnvVar::rename`] exposes an environment variable under another key.
//! After `from_envar(EnvVar::new("MYAPP_PORT").rename("PORT"))`, `get("PORT")`
//! reads `MYAPP_PORT` and `get("MYAPP_PORT")` fails: the alias is the only
//! external key. If a value is also stored under `PORT` itself, precedence
//! still holds across the two: a set `MYAPP_PORT` wins, then the value stored
//! under `PORT`, then the rename's default. [`Config::contains`] only knows
//! canonical names.
//!
//! # Coercion
//!
//! Text from files and the environment becomes the most specific [`Value`]:
//! `true`/`True`/`false`/`False` → boolean, base-10 integers → integer,
//! other finite numbers → float, anything else → string. The [`coerce`]
//! module exposes the individual checks and strict parsers.
//!
//! # Diagnostics
//!
//! Declaring an unset environment variable without a rename registers
//! nothing and raises [`Diagnostic::MissingEnvironment`]. Diagnostics are
//! logged through `tracing` at `warn` level and passed to the callback set
//! with [`Config::on_diagnostic`]; they never fail a load.
//!
//! # Testing
//!
//! [`Config::with_env`] accepts any [`Environment`]. [`MapEnv`] is an
//! in-memory one whose clones share state, so tests can change variables
//! after the store is built without touching the process environment.
//!
//! # Error handling
//!
//! All fallible operations return [`ConfigError`]. A failed load leaves the
//! store unchanged.

pub mod coerce;
pub mod error;
pub mod types;

mod config;
mod diagnostic;
mod dotenv;
mod env;
mod object;
mod registry;
mod search;
mod table;
mod value;

#[cfg(test)]
mod fixtures;

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use dotenv::{load_dotenv, parse_dotenv};
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use object::{KeyFilter, object_entries};
pub use registry::EnvVar;
pub use search::Discovery;
pub use table::{load_table, parse_table};
pub use types::{Boundary, SearchMode, SearchPath};
pub use value::{Value, ValueKind};
