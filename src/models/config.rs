use serde::Deserialize;

/// Settings of the Vitrine server, loaded from `config/*.yaml` and `APP__*`
/// environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Cookie signing key for sessions and flash messages, at least 64 bytes.
    #[serde(default)]
    pub secret_key: String,
    /// Glob passed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    pub static_dir: String,
}
