use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::{error::HrError, security::hash_password},
    model::{role::Role, user::User},
    store::HrStore,
};

pub async fn create_user(
    store: &dyn HrStore,
    username: &str,
    password: &str,
    role: Role,
    employee_id: Option<Uuid>,
) -> anyhow::Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("username and password must not be empty");
    }
    if let Some(employee_id) = employee_id {
        if store.get_employee_by_id(&employee_id).await?.is_none() {
            return Err(HrError::not_found("employee", employee_id).into());
        }
    }

    let hashed_password = hash_password(password).map_err(|err| anyhow::anyhow!(err))?;
    let now = Local::now().fixed_offset();
    let user = User {
        id: Uuid::now_v7(),
        user_name: username.to_string(),
        password: hashed_password,
        role,
        employee_id,
        is_active: Some(true),
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    store.create_user(&user).await?;
    info!("user {} created with role {}", user.user_name, user.role);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        cli::auth::create_user,
        core::security::verify_hash_password,
        factory::employee::EmployeeFactory,
        model::role::Role,
        store::{memory::MemoryStore, HrStore},
    };

    #[tokio::test]
    async fn test_create_user() -> anyhow::Result<()> {
        // Given
        let store = MemoryStore::new();
        let employee = EmployeeFactory::<()>::new().generate_one(&store, ()).await?;

        // When
        create_user(&store, "test", "test", Role::Hr, Some(employee.id)).await?;

        // Expect
        let user = store.get_user_by_username("test").await?;
        assert!(user.is_some());
        let user = user.unwrap();
        assert_eq!(user.role, Role::Hr);
        assert_eq!(user.employee_id, Some(employee.id));
        assert!(verify_hash_password("test", &user.password).unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_unknown_employee() {
        // Given
        let store = MemoryStore::new();

        // When
        let res = create_user(&store, "test", "test", Role::Employee, Some(Uuid::now_v7())).await;

        // Expect
        assert!(res.is_err());
        assert!(store.get_user_by_username("test").await.unwrap().is_none());
    }
}
