use chrono::FixedOffset;
use serde::Deserialize;

/// Deployment environment, selects logging format and security headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Settings read from the process environment (and `.env` when present).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    /// Signing secret of the auth provider's access tokens
    pub jwt_secret: String,
    /// Expected `aud` claim, checked only when set
    #[serde(default)]
    pub jwt_audience: Option<String>,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma separated
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Offset from UTC, in hours, of the timezone that decides what "today" is
    #[serde(default = "default_study_utc_offset_hours")]
    pub study_utc_offset_hours: i32,
    #[serde(default = "default_review_queue_limit")]
    pub review_queue_limit: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

const fn default_db_max_connections() -> u32 {
    10
}

const fn default_study_utc_offset_hours() -> i32 {
    -3
}

const fn default_review_queue_limit() -> i64 {
    200
}

impl ApiConfig {
    /// Load the configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        if self.review_queue_limit < 1 {
            anyhow::bail!("REVIEW_QUEUE_LIMIT must be at least 1");
        }
        self.study_offset()?;
        Ok(())
    }

    /// The study timezone as a fixed UTC offset.
    pub fn study_offset(&self) -> anyhow::Result<FixedOffset> {
        self.study_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "STUDY_UTC_OFFSET_HOURS out of range: {}",
                    self.study_utc_offset_hours
                )
            })
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}
