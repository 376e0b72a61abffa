use chrono::{DateTime, FixedOffset};
use fake::{faker::internet::en::Username, Dummy, Fake, Faker};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{role::Role, user::User},
    store::HrStore,
};

pub struct UserFactory<T: Clone> {
    modifier_one: fn(x: &User, ext: T) -> User,
    modifier_many: fn(x: &User, idx: usize, ext: T) -> User,
}

impl<T: Clone> Default for UserFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> UserFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &User, ext: T) -> User) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &User, idx: usize, ext: T) -> User) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, store: &dyn HrStore, ext: T) -> anyhow::Result<User> {
        let data = UserDummy::generate_one();
        let data = (self.modifier_one)(&data, ext);
        store.create_user(&data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        store: &dyn HrStore,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<User>> {
        let mut result: Vec<User> = vec![];
        for (idx, item) in UserDummy::generate_many(num).iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        for item in result.iter() {
            store.create_user(item).await?;
        }
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct UserDummy {
    pub id: Uuid,
    #[dummy(faker = "Username()")]
    pub user_name: String,
    pub password: String,
    pub role: Role,
    pub created_date: DateTime<FixedOffset>,
}

impl UserDummy {
    fn into_user(self, idx: usize) -> User {
        User {
            id: self.id,
            // usernames are unique, fake ones may collide
            user_name: format!("{}_{}", self.user_name, idx),
            password: self.password,
            role: self.role,
            employee_id: None,
            is_active: Some(true),
            created_date: Some(self.created_date),
            updated_date: Some(self.created_date),
            deleted_date: None,
        }
    }

    pub fn generate_one() -> User {
        Faker.fake::<Self>().into_user(0)
    }

    pub fn generate_many(num: u32) -> Vec<User> {
        (0..num as usize)
            .map(|idx| Faker.fake::<Self>().into_user(idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        factory::user::UserFactory,
        model::{role::Role, user::User},
        store::{memory::MemoryStore, HrStore},
    };

    #[tokio::test]
    async fn test_generate_one_modified() -> anyhow::Result<()> {
        // Given
        let store = MemoryStore::new();
        let mut factory = UserFactory::<Role>::new();
        factory.modified_one(|data, role| User {
            user_name: "test_user".to_string(),
            role,
            ..data.clone()
        });

        // When
        let user = factory.generate_one(&store, Role::Manager).await?;

        // Expect
        let stored = store.get_user_by_username("test_user").await?;
        assert!(stored.is_some());
        let stored = stored.unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.role, Role::Manager);
        assert_eq!(stored.is_active, Some(true));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_many() -> anyhow::Result<()> {
        // When
        let store = MemoryStore::new();
        let mut factory = UserFactory::new();
        let users = factory.generate_many(&store, 5, ()).await?;

        // Expect
        assert_eq!(users.len(), 5);
        for user in users {
            assert!(store.get_user_by_id(&user.id).await?.is_some());
        }
        Ok(())
    }
}
