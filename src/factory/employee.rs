use chrono::{DateTime, FixedOffset, NaiveDate};
use fake::{
    faker::{company::en::Industry, internet::en::SafeEmail, job::en::Title, name::en::Name},
    Dummy, Fake, Faker,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{model::employee::Employee, store::HrStore};

pub struct EmployeeFactory<T: Clone> {
    modifier_one: fn(x: &Employee, ext: T) -> Employee,
    modifier_many: fn(x: &Employee, idx: usize, ext: T) -> Employee,
}

impl<T: Clone> Default for EmployeeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EmployeeFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Employee, ext: T) -> Employee) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Employee, idx: usize, ext: T) -> Employee) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(
        &mut self,
        store: &dyn HrStore,
        ext: T,
    ) -> anyhow::Result<Employee> {
        let data: Employee = Faker.fake::<EmployeeDummy>().into();
        let data = (self.modifier_one)(&data, ext);
        store.create_employee(&data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        store: &dyn HrStore,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Employee>> {
        let mut result: Vec<Employee> = vec![];
        for idx in 0..num as usize {
            let data: Employee = Faker.fake::<EmployeeDummy>().into();
            result.push((self.modifier_many)(&data, idx, ext.clone()));
        }
        for item in result.iter() {
            store.create_employee(item).await?;
        }
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct EmployeeDummy {
    pub id: Uuid,
    #[dummy(faker = "Name()")]
    pub full_name: String,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    #[dummy(faker = "Industry()")]
    pub department: String,
    #[dummy(faker = "Title()")]
    pub position: String,
    pub start_date: NaiveDate,
    pub created_date: DateTime<FixedOffset>,
}

impl From<EmployeeDummy> for Employee {
    fn from(dummy: EmployeeDummy) -> Self {
        Employee {
            id: dummy.id,
            full_name: dummy.full_name,
            email: dummy.email,
            department: Some(dummy.department),
            position: Some(dummy.position),
            start_date: dummy.start_date,
            created_date: Some(dummy.created_date),
            updated_date: Some(dummy.created_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        factory::employee::EmployeeFactory,
        model::employee::Employee,
        store::{memory::MemoryStore, HrStore},
    };

    #[tokio::test]
    async fn test_generate_many_modified() -> anyhow::Result<()> {
        // Given
        let store = MemoryStore::new();
        let mut factory = EmployeeFactory::<String>::new();
        factory.modified_many(|data, idx, department| Employee {
            full_name: format!("Employee {}", idx),
            department: Some(department),
            ..data.clone()
        });

        // When
        factory
            .generate_many(&store, 4, "Finance".to_string())
            .await?;

        // Expect
        let (data, counts, _) = store.paginate_employee(1, 10, None).await?;
        assert_eq!(counts, 4);
        for item in data {
            assert_eq!(item.department, Some("Finance".to_string()));
            assert!(item.full_name.starts_with("Employee "));
        }
        Ok(())
    }
}
