//! Process settings from environment variables (`.env` is loaded by the server binary).

use crate::config::resource::{AddSchema, ResourceConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_RESOURCE_NAME};
use crate::error::ConfigError;
use regex::Regex;
use std::net::SocketAddr;
use std::str::FromStr;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_SCHEMA: &str = "COMMENTS_SCHEMA";
pub const ENV_RESOURCE_NAME: &str = "COMMENTS_RESOURCE_NAME";
pub const ENV_BIND_ADDR: &str = "COMMENTS_BIND_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "COMMENTS_MAX_BODY_BYTES";
pub const ENV_TXT_MAX_LENGTH: &str = "COMMENTS_TXT_MAX_LENGTH";
pub const ENV_DB_MAX_CONNECTIONS: &str = "COMMENTS_DB_MAX_CONNECTIONS";

#[derive(Clone, Debug)]
pub struct Settings {
    /// When absent the server keeps comments in memory.
    pub database_url: Option<String>,
    /// PostgreSQL schema holding the `comments` table.
    pub schema: String,
    pub resource_name: String,
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub txt_max_length: Option<usize>,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let schema = get(ENV_SCHEMA).unwrap_or_else(|| "public".into());
        check_pattern(ENV_SCHEMA, &schema, r"^[A-Za-z_][A-Za-z0-9_]*$")?;
        let resource_name = get(ENV_RESOURCE_NAME).unwrap_or_else(|| DEFAULT_RESOURCE_NAME.into());
        check_pattern(ENV_RESOURCE_NAME, &resource_name, r"^[A-Za-z0-9_-]+$")?;

        Ok(Settings {
            database_url: get(ENV_DATABASE_URL),
            schema,
            resource_name,
            bind_addr: parse_or(ENV_BIND_ADDR, get(ENV_BIND_ADDR), SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            max_body_bytes: parse_or(ENV_MAX_BODY_BYTES, get(ENV_MAX_BODY_BYTES), DEFAULT_MAX_BODY_BYTES)?,
            txt_max_length: get(ENV_TXT_MAX_LENGTH)
                .map(|v| parse_value(ENV_TXT_MAX_LENGTH, &v))
                .transpose()?,
            db_max_connections: parse_or(ENV_DB_MAX_CONNECTIONS, get(ENV_DB_MAX_CONNECTIONS), 5)?,
        })
    }

    pub fn resource(&self) -> ResourceConfig {
        ResourceConfig {
            name: self.resource_name.clone(),
            add_schema: AddSchema::comments(self.txt_max_length),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

fn check_pattern(key: &'static str, value: &str, pattern: &str) -> Result<(), ConfigError> {
    let re = Regex::new(pattern).map_err(|e| ConfigError::Invalid {
        key,
        value: pattern.to_string(),
        reason: e.to_string(),
    })?;
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => parse_value(key, &v),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, None);
        assert_eq!(s.schema, "public");
        assert_eq!(s.resource_name, "comments");
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(s.txt_max_length, None);
        assert_eq!(s.db_max_connections, 5);
    }

    #[test]
    fn overrides() {
        let s = settings(&[
            (ENV_DATABASE_URL, "postgres://localhost/comments"),
            (ENV_SCHEMA, "superset"),
            (ENV_BIND_ADDR, "127.0.0.1:8088"),
            (ENV_TXT_MAX_LENGTH, "500"),
        ])
        .unwrap();
        assert_eq!(s.database_url.as_deref(), Some("postgres://localhost/comments"));
        assert_eq!(s.schema, "superset");
        assert_eq!(s.bind_addr, "127.0.0.1:8088".parse().unwrap());
        let resource = s.resource();
        assert_eq!(resource.add_schema.columns["txt"].max_length, Some(500));
        assert_eq!(resource.base_path(), "/api/v1/comments");
    }

    #[test]
    fn blank_values_are_unset() {
        let s = settings(&[(ENV_DATABASE_URL, "  "), (ENV_TXT_MAX_LENGTH, "")]).unwrap();
        assert_eq!(s.database_url, None);
        assert_eq!(s.txt_max_length, None);
    }

    #[test]
    fn rejects_bad_schema_name() {
        let err = settings(&[(ENV_SCHEMA, "public; DROP TABLE x")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { key: ENV_SCHEMA, .. }));
    }

    #[test]
    fn rejects_bad_number() {
        let err = settings(&[(ENV_MAX_BODY_BYTES, "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_MAX_BODY_BYTES, .. }));
    }
}
