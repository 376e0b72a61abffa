//! Static permission catalog and the stock role grants.

use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::error::{HrError, HrResult},
    model::{permission::Permission, role::Role, role_permission::RolePermission},
    store::HrStore,
};

pub const MANAGE_PERMISSIONS: &str = "manage_permissions";
pub const MANAGE_SETTINGS: &str = "manage_settings";
pub const VIEW_EMPLOYEES: &str = "view_employees";
pub const MANAGE_EMPLOYEES: &str = "manage_employees";
pub const VIEW_LEAVE_REQUESTS: &str = "view_leave_requests";
pub const MANAGE_LEAVE_REQUESTS: &str = "manage_leave_requests";
pub const VIEW_RESIGNATIONS: &str = "view_resignations";
pub const MANAGE_RESIGNATIONS: &str = "manage_resignations";
pub const VIEW_REWARDS: &str = "view_rewards";
pub const MANAGE_REWARDS: &str = "manage_rewards";
pub const VIEW_KPIS: &str = "view_kpis";
pub const MANAGE_KPIS: &str = "manage_kpis";

pub struct PermissionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const DEFAULT_PERMISSIONS: &[PermissionDefinition] = &[
    PermissionDefinition {
        name: VIEW_EMPLOYEES,
        description: "View employee records",
        category: "Employee Management",
    },
    PermissionDefinition {
        name: MANAGE_EMPLOYEES,
        description: "Create and edit employee records",
        category: "Employee Management",
    },
    PermissionDefinition {
        name: VIEW_LEAVE_REQUESTS,
        description: "View leave requests",
        category: "Leave Management",
    },
    PermissionDefinition {
        name: MANAGE_LEAVE_REQUESTS,
        description: "Approve or reject leave requests",
        category: "Leave Management",
    },
    PermissionDefinition {
        name: VIEW_KPIS,
        description: "View KPI targets and results",
        category: "KPI Management",
    },
    PermissionDefinition {
        name: MANAGE_KPIS,
        description: "Create KPI targets",
        category: "KPI Management",
    },
    PermissionDefinition {
        name: VIEW_REWARDS,
        description: "View rewards and incidents",
        category: "Rewards & Incidents",
    },
    PermissionDefinition {
        name: MANAGE_REWARDS,
        description: "Record and review rewards and punishments",
        category: "Rewards & Incidents",
    },
    PermissionDefinition {
        name: VIEW_RESIGNATIONS,
        description: "View resignation and termination requests",
        category: "Resignation Management",
    },
    PermissionDefinition {
        name: MANAGE_RESIGNATIONS,
        description: "Validate resignation and termination requests",
        category: "Resignation Management",
    },
    PermissionDefinition {
        name: MANAGE_SETTINGS,
        description: "Change system settings",
        category: "System Settings",
    },
    PermissionDefinition {
        name: MANAGE_PERMISSIONS,
        description: "Edit the role permission matrix",
        category: "System Settings",
    },
];

/// Stock grants applied by `db seed --default-grants`. Admin is absent on purpose:
/// it never has stored grants.
pub const DEFAULT_GRANTS: &[(Role, &[&str])] = &[
    (
        Role::Hr,
        &[
            VIEW_EMPLOYEES,
            MANAGE_EMPLOYEES,
            VIEW_LEAVE_REQUESTS,
            MANAGE_LEAVE_REQUESTS,
            VIEW_KPIS,
            MANAGE_KPIS,
            VIEW_REWARDS,
            MANAGE_REWARDS,
            VIEW_RESIGNATIONS,
            MANAGE_RESIGNATIONS,
        ],
    ),
    (
        Role::Manager,
        &[
            VIEW_EMPLOYEES,
            VIEW_LEAVE_REQUESTS,
            MANAGE_LEAVE_REQUESTS,
            VIEW_KPIS,
            MANAGE_KPIS,
            VIEW_REWARDS,
        ],
    ),
    (Role::Employee, &[VIEW_KPIS]),
];

#[derive(Clone, Debug)]
pub struct PermissionGroup {
    pub category: String,
    pub permissions: Vec<Permission>,
}

pub async fn list_permissions(store: &dyn HrStore) -> HrResult<Vec<Permission>> {
    store.list_permissions().await
}

/// Catalog grouped by category, categories and permissions in name order.
pub async fn list_permissions_grouped(store: &dyn HrStore) -> HrResult<Vec<PermissionGroup>> {
    let permissions = store.list_permissions().await?;
    let mut groups: Vec<PermissionGroup> = vec![];
    for permission in permissions {
        match groups.last_mut() {
            Some(group) if group.category == permission.category => {
                group.permissions.push(permission)
            }
            _ => groups.push(PermissionGroup {
                category: permission.category.clone(),
                permissions: vec![permission],
            }),
        }
    }
    Ok(groups)
}

/// Inserts catalog entries that are missing; returns how many were created.
pub async fn seed_permission_catalog(store: &dyn HrStore) -> HrResult<u32> {
    let now = Local::now().fixed_offset();
    let mut created = 0;
    for definition in DEFAULT_PERMISSIONS {
        let permission = Permission {
            id: Uuid::now_v7(),
            permission_name: definition.name.to_string(),
            description: definition.description.to_string(),
            category: definition.category.to_string(),
            created_date: Some(now),
        };
        if store.insert_permission(&permission).await? {
            created += 1;
        }
    }
    info!("permission catalog seeded, {} new permissions", created);
    Ok(created)
}

/// Inserts the stock grants that are missing; returns how many were created.
pub async fn seed_default_grants(store: &dyn HrStore) -> HrResult<u32> {
    let now = Local::now().fixed_offset();
    let mut created = 0;
    for (role, names) in DEFAULT_GRANTS {
        for name in names.iter() {
            let permission = store
                .get_permission_by_name(name)
                .await?
                .ok_or_else(|| HrError::not_found("permission", name))?;
            let role_permission = RolePermission {
                id: Uuid::now_v7(),
                role: *role,
                permission_id: permission.id,
                created_by: None,
                created_date: Some(now),
            };
            if store.insert_role_permission(&role_permission).await? {
                created += 1;
            }
        }
    }
    info!("default grants seeded, {} new grants", created);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_seed_permission_catalog_is_idempotent() {
        let store = MemoryStore::new();
        let created = seed_permission_catalog(&store).await.unwrap();
        assert_eq!(created as usize, DEFAULT_PERMISSIONS.len());
        let created = seed_permission_catalog(&store).await.unwrap();
        assert_eq!(created, 0);
        assert_eq!(
            list_permissions(&store).await.unwrap().len(),
            DEFAULT_PERMISSIONS.len()
        );
    }

    #[tokio::test]
    async fn test_list_permissions_grouped() {
        let store = MemoryStore::new();
        seed_permission_catalog(&store).await.unwrap();

        let groups = list_permissions_grouped(&store).await.unwrap();
        let categories: Vec<&str> = groups.iter().map(|x| x.category.as_str()).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(categories, sorted);

        let leave = groups
            .iter()
            .find(|x| x.category == "Leave Management")
            .unwrap();
        let names: Vec<&str> = leave
            .permissions
            .iter()
            .map(|x| x.permission_name.as_str())
            .collect();
        assert_eq!(names, vec![MANAGE_LEAVE_REQUESTS, VIEW_LEAVE_REQUESTS]);
        let total: usize = groups.iter().map(|x| x.permissions.len()).sum();
        assert_eq!(total, DEFAULT_PERMISSIONS.len());
    }

    #[tokio::test]
    async fn test_seed_default_grants() {
        let store = MemoryStore::new();
        seed_permission_catalog(&store).await.unwrap();
        let created = seed_default_grants(&store).await.unwrap();
        let expected: usize = DEFAULT_GRANTS.iter().map(|(_, names)| names.len()).sum();
        assert_eq!(created as usize, expected);
        assert_eq!(seed_default_grants(&store).await.unwrap(), 0);
        assert!(store
            .get_role_permissions(Role::Admin)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_seed_default_grants_without_catalog() {
        let store = MemoryStore::new();
        let res = seed_default_grants(&store).await;
        assert!(matches!(res, Err(HrError::NotFound { .. })));
    }
}
