use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::{
        role::Role,
        role_permission::{RolePermission, TABLE_NAME},
    },
};

pub async fn get_all_role_permission(
    tx: &mut Transaction<'_, Postgres>,
    role: Role,
) -> anyhow::Result<Vec<RolePermission>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(role.to_string())];
    let filters: Vec<String> = vec!["role = $1".to_string()];
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["created_date DESC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<RolePermission>(&stmt, binds);
    Ok(q.fetch_all(&mut **tx).await?)
}

/// Inserts the grant; a repeated grant is a no-op and returns `false`.
pub async fn create_role_permission(
    tx: &mut Transaction<'_, Postgres>,
    role_permission: &RolePermission,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        format!(
            "INSERT INTO {} (id, role, permission_id, created_by, created_date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (role, permission_id) DO NOTHING",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(role_permission.id)
    .bind(role_permission.role)
    .bind(role_permission.permission_id)
    .bind(role_permission.created_by)
    .bind(role_permission.created_date)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() == 1)
}

pub async fn delete_role_permission(
    tx: &mut Transaction<'_, Postgres>,
    role: Role,
    permission_id: &Uuid,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        format!(
            "DELETE FROM {} WHERE role = $1 AND permission_id = $2",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(role)
    .bind(permission_id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() > 0)
}
