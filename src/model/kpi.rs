use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.kpi";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Kpi {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub title: String,
    pub category: String,
    pub target_percentage: f64,
    pub achieved_percentage: Option<f64>,
    pub period: String,
    pub created_by: Option<Uuid>,
    pub created_date: Option<DateTime<FixedOffset>>,
}
