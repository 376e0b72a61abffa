use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.employee";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: NaiveDate,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}
