use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder},
    model::permission::{Permission, TABLE_NAME},
};

pub async fn get_all_permission(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<Permission>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &[],
        vec!["category ASC".to_string(), "permission_name ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Permission>(&stmt, vec![]);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn get_permission_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Permission>> {
    Ok(
        sqlx::query_as(format!("SELECT * FROM {} WHERE id = $1", TABLE_NAME).as_str())
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?,
    )
}

pub async fn get_permission_by_name(
    tx: &mut Transaction<'_, Postgres>,
    permission_name: &str,
) -> anyhow::Result<Option<Permission>> {
    Ok(sqlx::query_as(
        format!("SELECT * FROM {} WHERE permission_name = $1", TABLE_NAME).as_str(),
    )
    .bind(permission_name)
    .fetch_optional(&mut **tx)
    .await?)
}

/// Inserts the permission unless one with the same name exists.
pub async fn create_permission(
    tx: &mut Transaction<'_, Postgres>,
    permission: &Permission,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        format!(
            "INSERT INTO {} (id, permission_name, description, category, created_date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (permission_name) DO NOTHING",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(permission.id)
    .bind(&permission.permission_name)
    .bind(&permission.description)
    .bind(&permission.category)
    .bind(permission.created_date)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() == 1)
}
