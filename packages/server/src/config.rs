use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which record store backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!("Invalid store backend: {}", other)),
        }
    }
}

/// SMTP settings. Absent host means emails are only logged.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Implicit TLS when true, STARTTLS otherwise
    pub use_tls: bool,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub site_domain: String,
    pub smtp: Option<SmtpConfig>,
    pub job_queue_capacity: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let store: StoreBackend = env::var("STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL").ok();
        if store == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE=postgres");
        }

        let smtp = match env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty()) {
            Some(host) => Some(SmtpConfig {
                host,
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .context("SMTP_PORT must be a valid number")?,
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
                use_tls: env::var("SMTP_TLS")
                    .map(|v| parse_bool(&v))
                    .unwrap_or(false),
            }),
            None => None,
        };

        Ok(Self {
            store,
            database_url,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "installer-dispatch".to_string()),
            site_domain: env::var("SITE_DOMAIN")
                .unwrap_or_else(|_| "protectglobal.co.uk".to_string()),
            smtp,
            job_queue_capacity: env::var("JOB_QUEUE_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .context("JOB_QUEUE_CAPACITY must be a valid number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Sender address for outgoing notifications
    pub fn from_address(&self) -> String {
        format!("no-reply@{}", self.site_domain)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
