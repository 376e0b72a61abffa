use std::sync::Arc;

use chrono::Local;
use fake::{Fake, Faker};
use uuid::Uuid;

use super::security::{generate_refresh_token_from_user, generate_token_from_user};
use crate::{
    core::{cache::MemoryGrantCache, catalog::seed_permission_catalog, security::hash_password},
    model::{role::Role, user::User},
    settings::{CacheBackend, Config, StoreBackend},
    store::{memory::MemoryStore, HrStore},
    AppState,
};

pub fn generate_random<T: fake::Dummy<fake::Faker>>() -> T {
    Faker.fake()
}

/// Config for the in-process backends; nothing is read from the environment.
pub fn test_config() -> Config {
    Config {
        env: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 8000,
        prefix: Some("/api".to_string()),
        store_backend: StoreBackend::Memory,
        database_url: None,
        cache_backend: CacheBackend::Memory,
        redis_url: None,
        grant_cache_ttl: 300,
        jwt_secret: generate_random::<Uuid>().to_string(),
        jwt_exp: 60,
        jwt_refresh_exp: 120,
        log_level: "debug".to_string(),
        log_to_console: true,
    }
}

/// App state over a fresh memory store holding the permission catalog and no grants.
pub async fn test_app_state() -> anyhow::Result<Arc<AppState>> {
    let store = Arc::new(MemoryStore::new());
    seed_permission_catalog(store.as_ref()).await?;
    Ok(Arc::new(AppState {
        store,
        grant_cache: Arc::new(MemoryGrantCache::new()),
        config: test_config(),
    }))
}

pub struct TestUser {
    pub user: User,
    pub token: String,
    pub refresh_token: String,
}

pub async fn generate_test_user(
    store: &dyn HrStore,
    config: &Config,
    username: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<TestUser> {
    // Prepare user
    let hashed_password = hash_password(password).map_err(|err| anyhow::anyhow!(err))?;
    let now = Local::now().fixed_offset();
    let user = User {
        id: Uuid::now_v7(),
        user_name: username.to_string(),
        password: hashed_password,
        role,
        employee_id: None,
        is_active: Some(true),
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    store.create_user(&user).await?;

    // Generate token
    let token = generate_token_from_user(&user, config)?;
    let refresh_token = generate_refresh_token_from_user(&user, config)?;

    Ok(TestUser {
        user,
        token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            security::get_user_from_token,
            test_utils::{generate_test_user, test_app_state},
        },
        model::role::Role,
        store::HrStore,
    };

    #[tokio::test]
    async fn test_generate_test_user() -> anyhow::Result<()> {
        // Given
        let app_state = test_app_state().await?;

        // When
        let res = generate_test_user(
            app_state.store.as_ref(),
            &app_state.config,
            "testuser",
            "testpassword",
            Role::Employee,
        )
        .await?;

        // Expect
        // is user exists on store
        let user = app_state.store.get_user_by_username("testuser").await?;
        assert!(user.is_some());
        assert_eq!(user.unwrap().id, res.user.id);

        // is jwt token valid
        let user_token = get_user_from_token(
            app_state.store.as_ref(),
            &app_state.config,
            Some(res.token.clone()),
        )
        .await?;
        assert!(user_token.is_some());
        assert_eq!(user_token.unwrap().role, Role::Employee);
        Ok(())
    }
}
