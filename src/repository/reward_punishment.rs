use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, page_count, query_builder, SqlxBinds},
    model::reward_punishment::{RewardPunishment, RewardPunishmentFilter, TABLE_NAME},
};

use super::update_pending_review;

pub async fn paginate_reward_punishment(
    tx: &mut Transaction<'_, Postgres>,
    filter: &RewardPunishmentFilter,
    page: u32,
    page_size: u32,
) -> anyhow::Result<(Vec<RewardPunishment>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(record_type) = filter.record_type {
        binds.push(SqlxBinds::String(record_type.to_string()));
        filters.push(format!("record_type = ${}", binds.len()));
    }
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

    let q = binds_query_as::<RewardPunishment>(&stmt, binds.clone());
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds);
    let data = q.fetch_all(&mut **tx).await?;
    let count = q_count.fetch_one(&mut **tx).await?;
    let counts = count.0 as u32;
    Ok((data, counts, page_count(counts, page_size)))
}

pub async fn get_reward_punishment_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    for_update: bool,
) -> anyhow::Result<Option<RewardPunishment>> {
    let mut stmt = format!("SELECT * FROM {} WHERE id = $1", TABLE_NAME);
    if for_update {
        stmt.push_str(" FOR UPDATE");
    }
    Ok(sqlx::query_as(stmt.as_str())
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn create_reward_punishment(
    tx: &mut Transaction<'_, Postgres>,
    record: &RewardPunishment,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, employee_id, record_type, category, description, amount, award_date,
    status, awarded_by, incident_id, reviewed_by, reviewed_date, admin_notes, created_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(record.id)
    .bind(record.employee_id)
    .bind(record.record_type)
    .bind(&record.category)
    .bind(&record.description)
    .bind(record.amount)
    .bind(record.award_date)
    .bind(record.status)
    .bind(record.awarded_by)
    .bind(record.incident_id)
    .bind(record.reviewed_by)
    .bind(record.reviewed_date)
    .bind(&record.admin_notes)
    .bind(record.created_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_reward_punishment_review(
    tx: &mut Transaction<'_, Postgres>,
    record: &RewardPunishment,
) -> anyhow::Result<bool> {
    update_pending_review(
        tx,
        TABLE_NAME,
        &record.id,
        record.status.as_str(),
        record.reviewed_by,
        record.reviewed_date,
        record.admin_notes.clone(),
    )
    .await
}
