// region:    --- Imports
use std::str::FromStr;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Config Error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("환경 변수 {name}의 값이 올바르지 않습니다: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

// endregion: --- Config Error

// region:    --- Config
/// 서비스 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// 설정되지 않은 경우 인메모리 저장소를 사용
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub reset_database: bool,
    pub secure_cookies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            database_max_connections: 5,
            reset_database: false,
            secure_cookies: !cfg!(debug_assertions),
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로부터 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            reset_database: parse_var(&lookup, "DATABASE_RESET", defaults.reset_database)?,
            secure_cookies: parse_var(&lookup, "SECURE_COOKIES", defaults.secure_cookies)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

// endregion: --- Config
