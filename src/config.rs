use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_url: Url,
    pub token_file: PathBuf,
    pub http_timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let graphql_url = get_env("GRAPHQL_URL")?;
        let graphql_url = Url::parse(&graphql_url)
            .map_err(|e| Error::Config(format!("Invalid GRAPHQL_URL: {}", e)))?;

        let token_file = env::var("TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_file());

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for HTTP_TIMEOUT_SECS: {}", e)))?,
            Err(_) => 60,
        };

        Ok(Self {
            graphql_url,
            token_file,
            http_timeout_secs,
        })
    }
}

fn default_token_file() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".linkedicci")
        .join("token")
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
