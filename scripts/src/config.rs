use envconfig::Envconfig;
use std::sync::LazyLock;

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

pub static APP_CONFIG: LazyLock<Result<AppConfig, envconfig::Error>> =
    LazyLock::new(AppConfig::init_from_env);

pub fn app_config() -> anyhow::Result<&'static AppConfig> {
    APP_CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("configuration couldnt be loaded: {e}"))
}
