use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use fake::{faker::lorem::en::Sentence, Dummy, Fake, Faker};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{leave_request::LeaveRequest, review_status::ApprovalStatus},
    store::HrStore,
};

pub struct LeaveRequestFactory<T: Clone> {
    modifier_one: fn(x: &LeaveRequest, ext: T) -> LeaveRequest,
    modifier_many: fn(x: &LeaveRequest, idx: usize, ext: T) -> LeaveRequest,
}

impl<T: Clone> Default for LeaveRequestFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LeaveRequestFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &LeaveRequest, ext: T) -> LeaveRequest) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &LeaveRequest, idx: usize, ext: T) -> LeaveRequest,
    ) {
        self.modifier_many = modifier
    }

    /// A pending request that is not stored anywhere.
    pub fn dummy() -> LeaveRequest {
        Faker.fake::<LeaveRequestDummy>().into()
    }

    pub async fn generate_one(
        &mut self,
        store: &dyn HrStore,
        ext: T,
    ) -> anyhow::Result<LeaveRequest> {
        let data = (self.modifier_one)(&Self::dummy(), ext);
        store.create_leave_request(&data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        store: &dyn HrStore,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        let mut result: Vec<LeaveRequest> = vec![];
        for idx in 0..num as usize {
            result.push((self.modifier_many)(&Self::dummy(), idx, ext.clone()));
        }
        for item in result.iter() {
            store.create_leave_request(item).await?;
        }
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct LeaveRequestDummy {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[dummy(faker = "1..15")]
    pub days_requested: i32,
    #[dummy(faker = "Sentence(3..8)")]
    pub reason: String,
    pub start_date: NaiveDate,
    pub created_date: DateTime<FixedOffset>,
}

impl From<LeaveRequestDummy> for LeaveRequest {
    fn from(dummy: LeaveRequestDummy) -> Self {
        let end_date = dummy
            .start_date
            .checked_add_days(Days::new(dummy.days_requested as u64 - 1))
            .unwrap_or(dummy.start_date);
        LeaveRequest {
            id: dummy.id,
            employee_id: dummy.employee_id,
            leave_type: "annual".to_string(),
            start_date: dummy.start_date,
            end_date,
            days_requested: dummy.days_requested,
            reason: Some(dummy.reason),
            status: ApprovalStatus::Pending,
            reviewed_by: None,
            reviewed_date: None,
            admin_notes: None,
            created_date: Some(dummy.created_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        factory::leave_request::LeaveRequestFactory,
        model::{
            leave_request::{LeaveRequest, LeaveRequestFilter},
            review_status::ApprovalStatus,
        },
        store::{memory::MemoryStore, HrStore},
    };

    #[tokio::test]
    async fn test_generate_many_modified() -> anyhow::Result<()> {
        // Given
        let store = MemoryStore::new();
        let employee_id = Uuid::now_v7();
        let mut factory = LeaveRequestFactory::<Uuid>::new();
        factory.modified_many(|data, idx, employee_id| LeaveRequest {
            employee_id,
            status: if idx % 2 == 0 {
                ApprovalStatus::Pending
            } else {
                ApprovalStatus::Approved
            },
            ..data.clone()
        });

        // When
        let data = factory.generate_many(&store, 6, employee_id).await?;

        // Expect
        for item in data.iter() {
            assert!(item.end_date >= item.start_date);
            assert!(item.days_requested > 0);
        }
        let filter = LeaveRequestFilter {
            status: Some(ApprovalStatus::Pending),
            employee_id: Some(employee_id),
        };
        let (_, counts, _) = store.paginate_leave_request(&filter, 1, 10).await?;
        assert_eq!(counts, 3);
        Ok(())
    }
}
