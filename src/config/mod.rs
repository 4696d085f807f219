use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: PathBuf,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub trust_proxy_headers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            static_dir: PathBuf::from("dist"),
            rate_limit_window_secs: 5 * 60,
            rate_limit_requests: 100,
            trust_proxy_headers: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    /// 从任意键值来源构建配置，缺失的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let get = |key: &str| match lookup(key) {
            Ok(v) => Ok(Some(v)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e),
        };
        let defaults = Config::default();

        Ok(Config {
            server_host: get("SERVER_HOST")?.unwrap_or(defaults.server_host),
            server_port: parse_or("PORT", get("PORT")?, defaults.server_port),
            static_dir: get("STATIC_DIR")?
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            rate_limit_window_secs: parse_or(
                "RATE_LIMIT_WINDOW",
                get("RATE_LIMIT_WINDOW")?,
                defaults.rate_limit_window_secs,
            ),
            rate_limit_requests: parse_or(
                "RATE_LIMIT_REQUESTS",
                get("RATE_LIMIT_REQUESTS")?,
                defaults.rate_limit_requests,
            ),
            trust_proxy_headers: parse_or(
                "TRUST_PROXY_HEADERS",
                get("TRUST_PROXY_HEADERS")?,
                defaults.trust_proxy_headers,
            ),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
