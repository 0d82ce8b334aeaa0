use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Upper bound for `ACCESS_TOKEN_EXPIRE_MINUTES`: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub pool_size: u32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("pool_size", &self.pool_size)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_minutes: token_ttl(&lookup)?,
            pool_size: parse_or(&lookup, "DB_POOL_SIZE", 10)?,
        })
    }
}

fn token_ttl<F>(lookup: &F) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const NAME: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
    let minutes = parse_or(lookup, NAME, 30)?;
    if (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(ConfigError::Invalid {
            name: NAME,
            value: minutes.to_string(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_SECRET", "s3cret"),
        ])
        .expect("config");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/shop")]).unwrap_err();
        assert_eq!(err.to_string(), "JWT_SECRET must be set");
    }

    #[test]
    fn bad_port_is_reported() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn token_ttl_must_be_positive_and_bounded() {
        for ttl in ["0", "-5", "9223372036854775807"] {
            let err = load(&[
                ("DATABASE_URL", "postgres://localhost/shop"),
                ("JWT_SECRET", "s3cret"),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", ttl),
            ])
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: "ACCESS_TOKEN_EXPIRE_MINUTES", .. }),
                "{ttl} accepted"
            );
        }

        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "525600"),
        ])
        .expect("config");
        assert_eq!(config.token_ttl_minutes, MAX_TOKEN_TTL_MINUTES);
    }

    #[test]
    fn debug_hides_secrets() {
        let config = load(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/shop"),
            ("JWT_SECRET", "s3cret"),
        ])
        .expect("config");
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("pw@"));
    }
}
