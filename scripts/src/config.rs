use envconfig::Envconfig;
use std::sync::LazyLock;

/// Database slice of the app configuration; the values must match the
/// ones the api server runs with or the encrypted db will not open.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    #[envconfig(default = "local")]
    pub env: String,
    pub db_host: String,
    pub db_pass_encrypt: String,
}

impl AppConfig {
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

pub static APP_CONFIG: LazyLock<AppConfig> =
    LazyLock::new(|| AppConfig::init_from_env().expect("failed to load scripts configuration"));
