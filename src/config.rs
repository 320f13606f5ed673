use crate::error::{BadEnvVarSnafu, ParsePortSnafu, RosterResult, UnknownStoreKindSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:5069";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    store: StoreConfig,
    server_ip: String,
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Postgres(Arc<DbConfig>),
    Memory,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        let store = match var("ROSTER_STORE").ok().as_deref() {
            None | Some("postgres") => StoreConfig::Postgres(Arc::new(DbConfig::new()?)),
            Some("memory") => StoreConfig::Memory,
            Some(kind) => return UnknownStoreKindSnafu { kind }.fail(),
        };
        let server_ip = var("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        Ok(Self { store, server_ip })
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("DB_NAME")?,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }
}
