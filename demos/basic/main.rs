//! # layerfig basic demo
//!
//! Layers in-code defaults, a key=value file and the environment, then
//! prints what each key resolves to.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example basic
//! TESTING=false cargo run --example basic
//! DEMO_LOG_LEVEL=debug cargo run --example basic
//! RUST_LOG=debug cargo run --example basic
//! ```
//!
//! | Key         | Comes from                                                   |
//! |-------------|--------------------------------------------------------------|
//! | `DEBUG`     | `DevConfig` default                                          |
//! | `TESTING`   | `$TESTING` if set, else `DevConfig`                          |
//! | `DATABASE`  | `app.env`                                                    |
//! | `MAX_LINES` | `app.env`                                                    |
//! | `GREETING`  | `app.env` (value contains `=`)                               |
//! | `LOG_LEVEL` | `$DEMO_LOG_LEVEL` if set, else the `"info"` default          |

use std::path::Path;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use layerfig::{Config, EnvVar};

/// Defaults declared in code. Only upper-case fields become settings.
#[derive(Serialize)]
#[allow(non_snake_case)]
struct DevConfig {
    DEBUG: bool,
    TESTING: bool,
    banner: &'static str,
}

const DEV: DevConfig = DevConfig {
    DEBUG: true,
    TESTING: true,
    banner: "not a setting",
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = Config::new();

    if let Err(e) = config.from_object(&DEV) {
        eprintln!("Failed to load defaults:\n{e}");
        std::process::exit(1);
    }

    let env_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/basic/app.env");
    if let Err(e) = config.from_dotenv(&env_file) {
        eprintln!("Failed to load {}:\n{e}", env_file.display());
        std::process::exit(1);
    }

    // Logs a warning and registers nothing when TESTING is unset.
    config.from_envar("TESTING");
    config.from_envar(EnvVar::new("DEMO_LOG_LEVEL").rename("LOG_LEVEL").default("info"));

    for key in ["DEBUG", "TESTING", "DATABASE", "MAX_LINES", "GREETING", "LOG_LEVEL"] {
        match config.get(key) {
            Ok(value) => println!("{key:<10} {value}"),
            Err(e) => println!("{key:<10} <{e}>"),
        }
    }
    println!();
    println!("{config}");
}
