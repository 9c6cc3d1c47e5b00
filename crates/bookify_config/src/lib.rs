// --- File: crates/bookify_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. `{CONFIG_DIR}/default.*` (defaults shipped with the repo)
/// 2. `{CONFIG_DIR}/{RUN_ENV}.*` (per-environment overrides)
/// 3. Environment variables with the `BOOKIFY` prefix and `__` separator,
///    e.g. `BOOKIFY__SERVER__PORT=9000` or `BOOKIFY__DATABASE__URL=...`.
///
/// `CONFIG_DIR` defaults to `config`, `RUN_ENV` to `debug`, and the env
/// prefix can be replaced via `PREFIX`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BOOKIFY".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let default_path = PathBuf::from(&config_dir).join("default");
    let env_path = PathBuf::from(&config_dir).join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// This function checks if the dotenv file has already been loaded using a `OnceCell`.
/// If not, it attempts to load the file named by `DOTENV_OVERRIDE`, falling
/// back to ".env". Missing files are ignored.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path =
        std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
