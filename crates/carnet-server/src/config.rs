use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub media_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "data/recettes.db".to_string()),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media/uploads")),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
