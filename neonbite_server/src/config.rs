use std::env;

use chrono::Duration;
use log::*;
use neonbite_common::{parse_boolean_flag, Secret};

const DEFAULT_NEONBITE_HOST: &str = "127.0.0.1";
const DEFAULT_NEONBITE_PORT: u16 = 3001;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::seconds(60);
const DEFAULT_STALLED_AFTER: Duration = Duration::minutes(5);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Free-form deployment label ("development", "production", ...). Logged at startup; nothing else keys off it.
    pub environment: String,
    /// When false, no background sweeper is spawned and stalled fulfilments are only retried on the next restart.
    pub sweeper_enabled: bool,
    /// How often the sweeper wakes up.
    pub sweep_interval: Duration,
    /// How long a fulfilment must sit below `Notified` before the sweeper considers it stalled.
    pub stalled_after: Duration,
    pub smtp: SmtpConfig,
}

#[derive(Clone, Debug, Default)]
pub struct SmtpConfig {
    /// The SMTP relay host. When unset, confirmation emails are disabled and checkout carries on without them.
    pub host: Option<String>,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub from_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_NEONBITE_HOST.to_string(),
            port: DEFAULT_NEONBITE_PORT,
            database_url: String::default(),
            environment: "development".to_string(),
            sweeper_enabled: true,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            stalled_after: DEFAULT_STALLED_AFTER,
            smtp: SmtpConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("NEONBITE_HOST").ok().unwrap_or_else(|| DEFAULT_NEONBITE_HOST.into());
        let port = env::var("NEONBITE_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for NEONBITE_PORT. {e} Using the default, \
                         {DEFAULT_NEONBITE_PORT}, instead."
                    );
                    DEFAULT_NEONBITE_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_NEONBITE_PORT);
        let database_url = env::var("NEONBITE_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ NEONBITE_DATABASE_URL is not set. Please set it to the URL for the storefront database.");
            String::default()
        });
        let environment = env::var("NEONBITE_ENVIRONMENT").ok().unwrap_or_else(|| "development".into());
        let sweeper_enabled = !parse_boolean_flag(env::var("NEONBITE_DISABLE_SWEEPER").ok(), false);
        let sweep_interval = duration_from_env("NEONBITE_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL);
        let stalled_after = duration_from_env("NEONBITE_STALLED_AFTER_SECS", DEFAULT_STALLED_AFTER);
        let smtp = SmtpConfig::from_env_or_default();
        Self { host, port, database_url, environment, sweeper_enabled, sweep_interval, stalled_after, smtp }
    }
}

impl SmtpConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("NEONBITE_SMTP_HOST").ok();
        if host.is_none() {
            warn!("🪛️ NEONBITE_SMTP_HOST is not set. Order confirmation emails will not be sent.");
        }
        let port = env::var("NEONBITE_SMTP_PORT")
            .ok()
            .and_then(|s| match s.parse::<u16>() {
                Ok(p) => Some(p),
                Err(e) => {
                    error!(
                        "🪛️ {s} is not a valid port for NEONBITE_SMTP_PORT. {e} Using the default, \
                         {DEFAULT_SMTP_PORT}, instead."
                    );
                    None
                },
            })
            .unwrap_or(DEFAULT_SMTP_PORT);
        let username = env::var("NEONBITE_SMTP_USERNAME").ok().unwrap_or_default();
        let password = Secret::new(env::var("NEONBITE_SMTP_PASSWORD").ok().unwrap_or_default());
        let from_address = env::var("NEONBITE_SMTP_FROM").ok().unwrap_or_else(|| {
            warn!("🪛️ NEONBITE_SMTP_FROM is not set. Using orders@neonbite.example as the sender address.");
            "orders@neonbite.example".into()
        });
        Self { host, port, username, password, from_address }
    }

    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

fn duration_from_env(var: &str, default: Duration) -> Duration {
    match env::var(var) {
        Ok(s) => match s.parse::<i64>() {
            Ok(secs) if secs > 0 => Duration::seconds(secs),
            _ => {
                error!(
                    "🪛️ {var} must be a positive number of seconds, not {s}. Using the default of {}s instead.",
                    default.num_seconds()
                );
                default
            },
        },
        Err(_) => default,
    }
}
