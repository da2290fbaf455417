//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TODO_*` environment variables, an optional config file
//! and command-line flags, in increasing order of precedence.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings controlling the listener and the PostgreSQL store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO")]
pub struct AppSettings {
    /// Interface the HTTP listener binds to.
    pub host: Option<String>,
    /// Port the HTTP listener binds to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL host. The in-memory store is used when unset.
    pub db_host: Option<String>,
    /// PostgreSQL port.
    #[ortho_config(default = 5432)]
    pub db_port: u16,
    /// PostgreSQL role.
    pub db_username: Option<String>,
    /// Password for `db_username`.
    pub db_password: Option<String>,
    /// PostgreSQL database name. The in-memory store is used when unset.
    pub db_database: Option<String>,
    /// Schema placed first on the connection `search_path`.
    pub db_schema: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 100)]
    pub db_max_connections: u32,
    /// Serve without applying embedded migrations.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

/// Errors raised while turning settings into addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The listener host is not an IP address.
    #[error("invalid listen address {host}:{port}: {message}")]
    BindAddr {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Parser diagnostic.
        message: String,
    },
    /// A database setting cannot be placed in a connection URL.
    #[error("invalid database {part} {value:?}")]
    DatabaseUrl {
        /// Which setting was rejected.
        part: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl SettingsError {
    fn database_url(part: &'static str, value: &str) -> Self {
        Self::DatabaseUrl {
            part,
            value: value.to_owned(),
        }
    }
}

impl AppSettings {
    /// Return the configured host, falling back to every interface.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Whether embedded migrations run before serving.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the host is not an IPv4 or
    /// IPv6 address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|err| SettingsError::BindAddr {
                host: host.to_owned(),
                port: self.port,
                message: err.to_string(),
            })
    }

    /// PostgreSQL connection URL, or `None` when no database is configured.
    ///
    /// Credentials, database name and schema are percent-encoded.
    ///
    /// ```
    /// # use todo_backend::settings::AppSettings;
    /// let settings = AppSettings {
    ///     host: None,
    ///     port: 8080,
    ///     db_host: Some("db".into()),
    ///     db_port: 5432,
    ///     db_username: Some("app".into()),
    ///     db_password: Some("secret".into()),
    ///     db_database: Some("todos".into()),
    ///     db_schema: None,
    ///     db_max_connections: 100,
    ///     skip_migrations: false,
    /// };
    /// assert_eq!(
    ///     settings.database_url().expect("valid settings").as_deref(),
    ///     Some("postgres://app:secret@db:5432/todos")
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DatabaseUrl`] when the host or credentials
    /// cannot appear in a URL.
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        let (Some(host), Some(database)) = (self.db_host.as_deref(), self.db_database.as_deref())
        else {
            return Ok(None);
        };

        let mut url = Url::parse("postgres://localhost/")
            .map_err(|_| SettingsError::database_url("host", host))?;
        match host.parse::<IpAddr>() {
            Ok(ip) => url.set_ip_host(ip),
            Err(_) => url.set_host(Some(host)).map_err(|_| ()),
        }
        .map_err(|()| SettingsError::database_url("host", host))?;
        url.set_port(Some(self.db_port))
            .map_err(|()| SettingsError::database_url("port", &self.db_port.to_string()))?;
        if let Some(user) = self.db_username.as_deref() {
            url.set_username(user)
                .map_err(|()| SettingsError::database_url("username", user))?;
            url.set_password(self.db_password.as_deref())
                .map_err(|()| SettingsError::database_url("password", "<redacted>"))?;
        }
        url.path_segments_mut()
            .map_err(|()| SettingsError::database_url("database", database))?
            .pop_if_empty()
            .push(database);
        if let Some(schema) = self.db_schema.as_deref().filter(|s| !s.is_empty()) {
            url.query_pairs_mut()
                .append_pair("options", &format!("-csearch_path={schema}"));
        }
        Ok(Some(url.into()))
    }
}
