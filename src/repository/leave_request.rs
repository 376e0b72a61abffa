use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, page_count, query_builder, SqlxBinds},
    model::leave_request::{LeaveRequest, LeaveRequestFilter, TABLE_NAME},
};

use super::update_pending_review;

pub async fn paginate_leave_request(
    tx: &mut Transaction<'_, Postgres>,
    filter: &LeaveRequestFilter,
    page: u32,
    page_size: u32,
) -> anyhow::Result<(Vec<LeaveRequest>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(status) = filter.status {
        binds.push(SqlxBinds::String(status.to_string()));
        filters.push(format!("status = ${}", binds.len()));
    }
    if let Some(employee_id) = filter.employee_id {
        binds.push(SqlxBinds::Uuid(employee_id));
        filters.push(format!("employee_id = ${}", binds.len()));
    }

    let page = page.max(1);
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["created_date DESC".to_string(), "id DESC".to_string()],
        Some(page_size),
        Some(page.saturating_sub(1).saturating_mul(page_size)),
    );
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );

    let q = binds_query_as::<LeaveRequest>(&stmt, binds.clone());
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds);
    let data = q.fetch_all(&mut **tx).await?;
    let count = q_count.fetch_one(&mut **tx).await?;
    let counts = count.0 as u32;
    Ok((data, counts, page_count(counts, page_size)))
}

pub async fn get_leave_request_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    for_update: bool,
) -> anyhow::Result<Option<LeaveRequest>> {
    let mut stmt = format!("SELECT * FROM {} WHERE id = $1", TABLE_NAME);
    if for_update {
        stmt.push_str(" FOR UPDATE");
    }
    Ok(sqlx::query_as(stmt.as_str())
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn create_leave_request(
    tx: &mut Transaction<'_, Postgres>,
    leave_request: &LeaveRequest,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, employee_id, leave_type, start_date, end_date, days_requested,
    reason, status, reviewed_by, reviewed_date, admin_notes, created_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(leave_request.id)
    .bind(leave_request.employee_id)
    .bind(&leave_request.leave_type)
    .bind(leave_request.start_date)
    .bind(leave_request.end_date)
    .bind(leave_request.days_requested)
    .bind(&leave_request.reason)
    .bind(leave_request.status)
    .bind(leave_request.reviewed_by)
    .bind(leave_request.reviewed_date)
    .bind(&leave_request.admin_notes)
    .bind(leave_request.created_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_leave_request_review(
    tx: &mut Transaction<'_, Postgres>,
    leave_request: &LeaveRequest,
) -> anyhow::Result<bool> {
    update_pending_review(
        tx,
        TABLE_NAME,
        &leave_request.id,
        leave_request.status.as_str(),
        leave_request.reviewed_by,
        leave_request.reviewed_date,
        leave_request.admin_notes.clone(),
    )
    .await
}
