use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

pub mod employee;
pub mod kpi;
pub mod leave_request;
pub mod permission;
pub mod resignation_request;
pub mod reward_punishment;
pub mod role_permission;
pub mod setting;
pub mod user;

/// Writes a review decision in one statement, guarded on `status = 'pending'`.
///
/// Returns `false` when no pending row matched, in which case nothing was written.
pub async fn update_pending_review(
    tx: &mut Transaction<'_, Postgres>,
    table_name: &str,
    id: &Uuid,
    status: &str,
    reviewed_by: Option<Uuid>,
    reviewed_date: Option<DateTime<FixedOffset>>,
    admin_notes: Option<String>,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET status = $1, reviewed_by = $2, reviewed_date = $3, admin_notes = $4
        WHERE id = $5 AND status = 'pending'"#,
            table_name
        )
        .as_str(),
    )
    .bind(status)
    .bind(reviewed_by)
    .bind(reviewed_date)
    .bind(admin_notes)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() == 1)
}
