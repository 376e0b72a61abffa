use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::role::Role;

pub const TABLE_NAME: &str = "public.role_permission";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct RolePermission {
    pub id: Uuid,
    pub role: Role,
    pub permission_id: Uuid,
    pub created_by: Option<Uuid>,
    pub created_date: Option<DateTime<FixedOffset>>,
}
