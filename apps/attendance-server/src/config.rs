//! Server configuration.

use std::env;

/// Default number of timetable periods per day.
pub const DEFAULT_PERIODS_PER_DAY: usize = 8;

/// Upper bound for `ATTENDANCE_PERIODS_PER_DAY`.
pub const MAX_PERIODS_PER_DAY: usize = 24;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL. `None` keeps everything in memory.
    pub database_url: Option<String>,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Timetable periods per day.
    pub periods_per_day: usize,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("ATTENDANCE_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("ATTENDANCE_JWT_SECRET is required"))?;

        let periods_per_day = match env::var("ATTENDANCE_PERIODS_PER_DAY") {
            Ok(value) => value
                .parse()
                .map_err(|_| anyhow::anyhow!("ATTENDANCE_PERIODS_PER_DAY must be a number"))?,
            Err(_) => DEFAULT_PERIODS_PER_DAY,
        };
        if !(1..=MAX_PERIODS_PER_DAY).contains(&periods_per_day) {
            anyhow::bail!(
                "ATTENDANCE_PERIODS_PER_DAY must be between 1 and {MAX_PERIODS_PER_DAY}"
            );
        }

        Ok(Self {
            host: env::var("ATTENDANCE_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ATTENDANCE_SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            periods_per_day,
            log_level: env::var("ATTENDANCE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Creates a configuration for tests and embedding.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: None,
            jwt_secret: jwt_secret.into(),
            periods_per_day: DEFAULT_PERIODS_PER_DAY,
            log_level: "info".to_string(),
        }
    }

    /// Sets the number of timetable periods per day.
    pub fn with_periods_per_day(mut self, periods_per_day: usize) -> Self {
        self.periods_per_day = periods_per_day;
        self
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
