//! Role → permission grants, with read-your-writes caching.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use chrono::Local;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    core::{
        cache::GrantCache,
        error::{HrError, HrResult},
    },
    model::{role::Role, role_permission::RolePermission},
    store::HrStore,
};

#[derive(Clone)]
pub struct PermissionMatrix {
    store: Arc<dyn HrStore>,
    cache: Arc<dyn GrantCache>,
}

impl PermissionMatrix {
    pub fn new(store: Arc<dyn HrStore>, cache: Arc<dyn GrantCache>) -> Self {
        Self { store, cache }
    }

    /// Stored grants for `role`. Admin's stored grants are always empty; use
    /// the authorization evaluator to ask what admin may do.
    pub async fn get_grants(&self, role: Role) -> HrResult<HashSet<Uuid>> {
        if let Some(grants) = self.cache.get(role).await? {
            debug!("grant cache hit for role {}", role);
            return Ok(grants);
        }
        let generation = self.cache.generation(role).await?;
        let grants: HashSet<Uuid> = self
            .store
            .get_role_permissions(role)
            .await?
            .into_iter()
            .map(|x| x.permission_id)
            .collect();
        if !self.cache.put(role, &grants, generation).await? {
            debug!("grants of role {} changed while loading, not cached", role);
        }
        Ok(grants)
    }

    /// Grants `permission_id` to `role`. Returns `false` if it was already granted.
    pub async fn grant(
        &self,
        role: Role,
        permission_id: &Uuid,
        granted_by: Option<Uuid>,
    ) -> HrResult<bool> {
        self.ensure_editable(role, permission_id).await?;
        let role_permission = RolePermission {
            id: Uuid::now_v7(),
            role,
            permission_id: *permission_id,
            created_by: granted_by,
            created_date: Some(Local::now().fixed_offset()),
        };
        let created = self.store.insert_role_permission(&role_permission).await?;
        self.cache.invalidate(role).await?;
        if created {
            info!("granted permission {} to role {}", permission_id, role);
        }
        Ok(created)
    }

    /// Revokes `permission_id` from `role`. Returns `false` if it was not granted.
    pub async fn revoke(&self, role: Role, permission_id: &Uuid) -> HrResult<bool> {
        self.ensure_editable(role, permission_id).await?;
        let deleted = self
            .store
            .delete_role_permission(role, permission_id)
            .await?;
        self.cache.invalidate(role).await?;
        if deleted {
            info!("revoked permission {} from role {}", permission_id, role);
        }
        Ok(deleted)
    }

    /// Effective grants of every role; admin is reported with the full catalog.
    pub async fn matrix(&self) -> HrResult<BTreeMap<Role, HashSet<Uuid>>> {
        let mut matrix = BTreeMap::new();
        for role in Role::ALL {
            let grants = if role.is_superuser() {
                self.store
                    .list_permissions()
                    .await?
                    .into_iter()
                    .map(|x| x.id)
                    .collect()
            } else {
                self.get_grants(role).await?
            };
            matrix.insert(role, grants);
        }
        Ok(matrix)
    }

    async fn ensure_editable(&self, role: Role, permission_id: &Uuid) -> HrResult<()> {
        if role.is_superuser() {
            return Err(HrError::validation(
                "permissions of the admin role are not editable",
            ));
        }
        if self
            .store
            .get_permission_by_id(permission_id)
            .await?
            .is_none()
        {
            return Err(HrError::not_found("permission", permission_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        core::{
            cache::MemoryGrantCache,
            catalog::{seed_permission_catalog, MANAGE_LEAVE_REQUESTS, VIEW_KPIS},
        },
        store::memory::MemoryStore,
    };

    async fn setup() -> (Arc<MemoryStore>, Arc<MemoryGrantCache>, PermissionMatrix) {
        let store = Arc::new(MemoryStore::new());
        seed_permission_catalog(store.as_ref()).await.unwrap();
        let cache = Arc::new(MemoryGrantCache::new());
        let matrix = PermissionMatrix::new(store.clone(), cache.clone());
        (store, cache, matrix)
    }

    async fn permission_id(store: &MemoryStore, name: &str) -> Uuid {
        store.get_permission_by_name(name).await.unwrap().unwrap().id
    }

    #[tokio::test]
    async fn test_grant_and_revoke_are_idempotent() {
        let (store, _, matrix) = setup().await;
        let id = permission_id(&store, MANAGE_LEAVE_REQUESTS).await;

        assert!(matrix.grant(Role::Hr, &id, None).await.unwrap());
        assert!(!matrix.grant(Role::Hr, &id, None).await.unwrap());
        assert_eq!(store.get_role_permissions(Role::Hr).await.unwrap().len(), 1);

        assert!(matrix.revoke(Role::Hr, &id).await.unwrap());
        assert!(!matrix.revoke(Role::Hr, &id).await.unwrap());
        assert!(store.get_role_permissions(Role::Hr).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_invalidates_cached_grants() {
        let (store, cache, matrix) = setup().await;
        let id = permission_id(&store, VIEW_KPIS).await;

        assert!(matrix.get_grants(Role::Employee).await.unwrap().is_empty());
        assert!(cache.get(Role::Employee).await.unwrap().is_some());

        matrix.grant(Role::Employee, &id, None).await.unwrap();
        assert!(cache.get(Role::Employee).await.unwrap().is_none());
        assert!(matrix.get_grants(Role::Employee).await.unwrap().contains(&id));

        matrix.revoke(Role::Employee, &id).await.unwrap();
        assert!(!matrix.get_grants(Role::Employee).await.unwrap().contains(&id));
    }

    #[tokio::test]
    async fn test_admin_grants_are_rejected() {
        let (store, _, matrix) = setup().await;
        let id = permission_id(&store, VIEW_KPIS).await;

        let res = matrix.grant(Role::Admin, &id, None).await;
        assert!(matches!(res, Err(HrError::Validation(_))));
        let res = matrix.revoke(Role::Admin, &id).await;
        assert!(matches!(res, Err(HrError::Validation(_))));
        assert!(store.get_role_permissions(Role::Admin).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_permission_is_not_found() {
        let (_, _, matrix) = setup().await;
        let res = matrix.grant(Role::Hr, &Uuid::now_v7(), None).await;
        assert!(matches!(res, Err(HrError::NotFound { .. })));
        let res = matrix.revoke(Role::Hr, &Uuid::now_v7()).await;
        assert!(matches!(res, Err(HrError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_matrix_reports_admin_with_full_catalog() {
        let (store, _, matrix) = setup().await;
        let id = permission_id(&store, VIEW_KPIS).await;
        matrix.grant(Role::Manager, &id, None).await.unwrap();

        let all = matrix.matrix().await.unwrap();
        let catalog_size = store.list_permissions().await.unwrap().len();
        assert_eq!(all[&Role::Admin].len(), catalog_size);
        assert_eq!(all[&Role::Manager], HashSet::from([id]));
        assert!(all[&Role::Hr].is_empty());
        assert!(all[&Role::Employee].is_empty());
    }

    /// Holds every put back long enough for a write to land mid-load.
    struct SlowPutCache {
        inner: MemoryGrantCache,
    }

    #[async_trait]
    impl GrantCache for SlowPutCache {
        async fn get(&self, role: Role) -> HrResult<Option<HashSet<Uuid>>> {
            self.inner.get(role).await
        }

        async fn generation(&self, role: Role) -> HrResult<u64> {
            self.inner.generation(role).await
        }

        async fn put(&self, role: Role, grants: &HashSet<Uuid>, generation: u64) -> HrResult<bool> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.inner.put(role, grants, generation).await
        }

        async fn invalidate(&self, role: Role) -> HrResult<()> {
            self.inner.invalidate(role).await
        }
    }

    #[tokio::test]
    async fn test_grant_during_cache_fill_is_visible_afterwards() {
        let store = Arc::new(MemoryStore::new());
        seed_permission_catalog(store.as_ref()).await.unwrap();
        let cache = Arc::new(SlowPutCache {
            inner: MemoryGrantCache::new(),
        });
        let matrix = PermissionMatrix::new(store.clone(), cache.clone());
        let id = permission_id(&store, VIEW_KPIS).await;

        // reader loads the empty grant set, then stalls before caching it
        let reader = {
            let matrix = matrix.clone();
            tokio::spawn(async move { matrix.get_grants(Role::Hr).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matrix.grant(Role::Hr, &id, None).await.unwrap());

        let stale = reader.await.unwrap().unwrap();
        assert!(!stale.contains(&id));
        assert!(cache.get(Role::Hr).await.unwrap().is_none());
        assert!(matrix.get_grants(Role::Hr).await.unwrap().contains(&id));

        // same race for revoke, starting from an empty cache again
        cache.invalidate(Role::Hr).await.unwrap();
        let reader = {
            let matrix = matrix.clone();
            tokio::spawn(async move { matrix.get_grants(Role::Hr).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matrix.revoke(Role::Hr, &id).await.unwrap());
        reader.await.unwrap().unwrap();
        assert!(!matrix.get_grants(Role::Hr).await.unwrap().contains(&id));
    }
}
