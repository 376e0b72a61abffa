use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.permission";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Permission {
    pub id: Uuid,
    pub permission_name: String,
    pub description: String,
    pub category: String,
    pub created_date: Option<DateTime<FixedOffset>>,
}
