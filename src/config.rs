use std::net::IpAddr;
use std::time::Duration;

const SMTP_REQUIRED: [&str; 4] = [
    "PWRESET_SMTP_HOST",
    "PWRESET_SMTP_PORT",
    "PWRESET_SMTP_USER",
    "PWRESET_SMTP_PASS",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub token_ttl: chrono::Duration,
    pub sweep_interval: Duration,
    pub max_body_size: usize,
    pub frontend_port: u16,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host: IpAddr = env_or("PWRESET_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_HOST: {e}"))?;

        let port: u16 = env_or("PWRESET_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_PORT: {e}"))?;

        let ttl_secs: i64 = env_or("PWRESET_TOKEN_TTL_SECS", "1800")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_TOKEN_TTL_SECS: {e}"))?;
        let token_ttl = chrono::Duration::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| "PWRESET_TOKEN_TTL_SECS must be a positive number of seconds".to_string())?;

        let sweep_secs: u64 = env_or("PWRESET_SWEEP_INTERVAL_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_SWEEP_INTERVAL_SECS: {e}"))?;
        if sweep_secs == 0 {
            return Err("PWRESET_SWEEP_INTERVAL_SECS must be greater than zero".to_string());
        }

        let max_body_size: usize = env_or("PWRESET_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_MAX_BODY_SIZE: {e}"))?;

        let frontend_port: u16 = env_or("PWRESET_FRONTEND_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_FRONTEND_PORT: {e}"))?;

        let log_level = env_or("PWRESET_LOG_LEVEL", "info");

        let smtp = match (
            lookup("PWRESET_SMTP_HOST"),
            lookup("PWRESET_SMTP_PORT"),
            lookup("PWRESET_SMTP_USER"),
            lookup("PWRESET_SMTP_PASS"),
        ) {
            (Some(host), Some(port), Some(user), Some(pass)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid PWRESET_SMTP_PORT: {e}"))?,
                from: lookup("PWRESET_SMTP_FROM").unwrap_or_else(|| user.clone()),
                user,
                pass,
            }),
            (None, None, None, None) => None,
            _ => {
                let missing: Vec<&str> = SMTP_REQUIRED
                    .iter()
                    .copied()
                    .filter(|key| lookup(*key).is_none())
                    .collect();
                return Err(format!(
                    "Incomplete SMTP configuration, missing: {}",
                    missing.join(", ")
                ));
            }
        };

        Ok(Config {
            host,
            port,
            token_ttl,
            sweep_interval: Duration::from_secs(sweep_secs),
            max_body_size,
            frontend_port,
            log_level,
            smtp,
        })
    }
}
