//! Environment-driven server settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::{DefaultEnv, Env};
use tracing::info;

const PORT_ENV: &str = "PORT";
const HOST_ENV: &str = "HOST";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Process settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Postgres URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    pub pool_max_size: u32,
}

/// Invalid startup configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ServerSettings {
    /// Read settings from `env`.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    /// [`SettingsError::InvalidEnv`] when a variable is present but malformed.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = parse_or(env, PORT_ENV, DEFAULT_PORT, "a TCP port between 0 and 65535")?;
        let host = parse_or(env, HOST_ENV, DEFAULT_HOST, "an IPv4 or IPv6 address")?;
        let pool_max_size = parse_or(
            env,
            POOL_MAX_SIZE_ENV,
            DEFAULT_POOL_MAX_SIZE,
            "a positive integer",
        )?;
        if pool_max_size == 0 {
            return Err(SettingsError::InvalidEnv {
                name: POOL_MAX_SIZE_ENV,
                value: "0".to_owned(),
                expected: "a positive integer",
            });
        }
        let database_url = non_blank(env, DATABASE_URL_ENV);
        info!(
            %host,
            port,
            database = database_url.is_some(),
            "server settings loaded"
        );
        Ok(Self {
            host,
            port,
            database_url,
            pool_max_size,
        })
    }

    /// Read settings from the process environment.
    ///
    /// # Errors
    /// See [`ServerSettings::from_env`].
    pub fn from_process_env() -> Result<Self, SettingsError> {
        Self::from_env(&DefaultEnv::new())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank<E: Env>(env: &E, name: &'static str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_or<E, T>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, SettingsError>
where
    E: Env,
    T: std::str::FromStr,
{
    match non_blank(env, name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidEnv {
            name,
            value: raw,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = ServerSettings::from_env(&mock_env(&[])).expect("defaults are valid");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.bind_addr(), "0.0.0.0:5000".parse().expect("addr"));
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.pool_max_size, 10);
    }

    #[rstest]
    fn reads_every_variable() {
        let env = mock_env(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_URL", "postgres://site@db/site"),
            ("DB_POOL_MAX_SIZE", "4"),
        ]);
        let settings = ServerSettings::from_env(&env).expect("valid settings");
        assert_eq!(settings.bind_addr(), "127.0.0.1:8080".parse().expect("addr"));
        assert_eq!(settings.database_url.as_deref(), Some("postgres://site@db/site"));
        assert_eq!(settings.pool_max_size, 4);
    }

    #[rstest]
    #[case("PORT", "")]
    #[case("PORT", "   ")]
    #[case("DATABASE_URL", "")]
    fn blank_values_count_as_unset(#[case] name: &str, #[case] value: &str) {
        let settings =
            ServerSettings::from_env(&mock_env(&[(name, value)])).expect("blank is unset");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.database_url, None);
    }

    #[rstest]
    fn process_environment_is_readable() {
        let Ok(settings) = ServerSettings::from_process_env() else {
            // A malformed ambient variable is reported, not a panic.
            return;
        };
        let port_set = std::env::var("PORT").is_ok_and(|value| !value.trim().is_empty());
        if !port_set {
            assert_eq!(settings.port, DEFAULT_PORT);
        }
    }

    #[rstest]
    #[case("PORT", "http")]
    #[case("PORT", "70000")]
    #[case("HOST", "localhost")]
    #[case("DB_POOL_MAX_SIZE", "-1")]
    #[case("DB_POOL_MAX_SIZE", "0")]
    fn rejects_malformed_values(#[case] name: &'static str, #[case] value: &str) {
        let err = ServerSettings::from_env(&mock_env(&[(name, value)])).expect_err("malformed");
        let SettingsError::InvalidEnv { name: reported, .. } = err;
        assert_eq!(reported, name);
    }
}
