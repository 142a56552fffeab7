use chrono::Duration;
use std::path::PathBuf;

use crate::common::GeneralError;
use crate::services::AdminCredentials;
use crate::services::session::DEFAULT_SESSION_TTL_HOURS;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub site_url: String,
    pub site_name: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_password_hash: Option<String>,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, GeneralError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GeneralError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let session_ttl_hours = match get("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or_else(|| {
                    GeneralError::Config(format!("SESSION_TTL_HOURS must be a positive integer, got {raw:?}"))
                })?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };

        let secure_cookies = match get("SECURE_COOKIES").as_deref() {
            None => false,
            Some(v) => parse_bool(v).ok_or_else(|| {
                GeneralError::Config(format!("SECURE_COOKIES must be true or false, got {v:?}"))
            })?,
        };

        let upload_url_prefix = get("UPLOAD_URL_PREFIX").unwrap_or_else(|| "/uploads".to_string());
        if !upload_url_prefix.starts_with('/') {
            return Err(GeneralError::Config(format!(
                "UPLOAD_URL_PREFIX must start with '/', got {upload_url_prefix:?}"
            )));
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            site_url: get("SITE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            site_name: get("SITE_NAME").unwrap_or_else(|| "Pressroom".to_string()),
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
            admin_password_hash: get("ADMIN_PASSWORD_HASH"),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            upload_url_prefix: upload_url_prefix.trim_end_matches('/').to_string(),
            session_ttl_hours,
            secure_cookies,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours)
    }

    /// `None` when no admin account is configured; the login page then
    /// refuses every attempt. A configured hash wins over a plain password.
    pub fn admin_credentials(&self) -> Result<Option<AdminCredentials>, GeneralError> {
        let Some(username) = self.admin_username.as_deref() else {
            return Ok(None);
        };

        let credentials = match (&self.admin_password_hash, &self.admin_password) {
            (Some(hash), _) => AdminCredentials::from_hash(username, hash),
            (None, Some(password)) => AdminCredentials::from_password(username, password),
            (None, None) => return Ok(None),
        };

        credentials
            .map(Some)
            .map_err(|e| GeneralError::Config(format!("Invalid admin password settings: {e}")))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
