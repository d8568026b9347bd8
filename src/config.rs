use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Subdirectory of the static root that holds uploaded media.
pub const UPLOADS: &str = "uploads";

/// Server settings, built once at startup and shared with every handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub static_dir: PathBuf,
    pub static_url: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "database.db".to_owned(),
            bind_address: "127.0.0.1:8088".to_owned(),
            static_dir: PathBuf::from("static"),
            static_url: "/static".to_owned(),
            pool_size: 8,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let default = Self::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(default.bind_address),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.static_dir),
            static_url: env::var("STATIC_URL").unwrap_or(default.static_url),
            pool_size: parse_var("DATABASE_POOL_SIZE")?.unwrap_or(default.pool_size),
            busy_timeout: parse_var("DATABASE_BUSY_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(default.busy_timeout),
        })
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join(UPLOADS)
    }

    /// Renders a stored media path (`uploads/a.png`) as a URL under the static root.
    pub fn media_url(&self, path: &str) -> String {
        format!("{}/{}", self.static_url.trim_end_matches('/'), path)
    }
}

fn parse_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number, got {:?}", key, value)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_url() {
        let config = Config::default();
        assert_eq!(config.media_url("uploads/a.png"), "/static/uploads/a.png");
        let config = Config {
            static_url: "https://cdn.example.com/assets/".to_owned(),
            ..Config::default()
        };
        assert_eq!(
            config.media_url("uploads/b.mp4"),
            "https://cdn.example.com/assets/uploads/b.mp4"
        );
    }

    #[test]
    fn test_unparseable_number_is_an_error() {
        // The only test touching these variables.
        env::set_var("DATABASE_POOL_SIZE", "eight");
        let result = Config::from_env();
        env::remove_var("DATABASE_POOL_SIZE");
        let message = format!("{:#}", result.expect_err("must reject non-numeric pool size"));
        assert!(message.contains("DATABASE_POOL_SIZE"), "{}", message);

        env::set_var("DATABASE_BUSY_TIMEOUT_MS", "-5");
        let result = Config::from_env();
        env::remove_var("DATABASE_BUSY_TIMEOUT_MS");
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_dir() {
        let config = Config {
            static_dir: PathBuf::from("/srv/site"),
            ..Config::default()
        };
        assert_eq!(config.upload_dir(), PathBuf::from("/srv/site/uploads"));
    }
}
