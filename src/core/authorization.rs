use tracing::debug;
use uuid::Uuid;

use crate::{
    core::{
        error::{HrError, HrResult},
        permission_matrix::PermissionMatrix,
    },
    model::role::Role,
    store::HrStore,
};

/// Answers whether a role may perform an action guarded by a permission.
#[derive(Clone)]
pub struct Authorizer {
    matrix: PermissionMatrix,
}

impl Authorizer {
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self { matrix }
    }

    /// Admin always holds every permission, whatever the stored grants say.
    pub async fn has_permission(&self, role: Role, permission_id: &Uuid) -> HrResult<bool> {
        if role.is_superuser() {
            return Ok(true);
        }
        Ok(self.matrix.get_grants(role).await?.contains(permission_id))
    }

    /// Same as [`Self::has_permission`], addressed by permission name.
    pub async fn role_can(
        &self,
        store: &dyn HrStore,
        role: Role,
        permission_name: &str,
    ) -> HrResult<bool> {
        if role.is_superuser() {
            return Ok(true);
        }
        let permission = store
            .get_permission_by_name(permission_name)
            .await?
            .ok_or_else(|| HrError::not_found("permission", permission_name))?;
        let allowed = self.has_permission(role, &permission.id).await?;
        debug!("role {} can {}: {}", role, permission_name, allowed);
        Ok(allowed)
    }

    /// Names of the permissions `role` holds, in catalog order.
    pub async fn effective_permissions(
        &self,
        store: &dyn HrStore,
        role: Role,
    ) -> HrResult<Vec<String>> {
        let permissions = store.list_permissions().await?;
        if role.is_superuser() {
            return Ok(permissions.into_iter().map(|x| x.permission_name).collect());
        }
        let grants = self.matrix.get_grants(role).await?;
        Ok(permissions
            .into_iter()
            .filter(|x| grants.contains(&x.id))
            .map(|x| x.permission_name)
            .collect())
    }
}
