use axum::extract::FromRef;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sqlx::PgPool;

use crate::{ApiConfig, config::Environment};

/// What the session extractor needs to verify access tokens.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiState {
    pub pool: PgPool,
    pub auth: AuthConfig,
    pub environment: Environment,
    /// Timezone that decides the current study day
    pub study_offset: FixedOffset,
    pub review_queue_limit: i64,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> anyhow::Result<Self> {
        Ok(Self {
            pool,
            auth: AuthConfig {
                jwt_secret: config.jwt_secret.clone(),
                jwt_audience: config.jwt_audience.clone(),
            },
            environment: config.env,
            study_offset: config.study_offset()?,
            review_queue_limit: config.review_queue_limit,
        })
    }

    /// The current calendar day in the study timezone.
    pub fn today(&self) -> NaiveDate {
        study_day(Utc::now(), self.study_offset)
    }
}

pub fn study_day(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
