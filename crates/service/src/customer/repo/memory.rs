use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::customer::domain::{Customer, CustomerRecord};
use crate::customer::repository::{customer_not_found, duplicate_id, taken, CustomerRepository};
use crate::errors::ServiceError;

/// Process-local repository keeping records in insertion order.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    records: RwLock<Vec<CustomerRecord>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let records = self.records.read().await;
        Ok(records.iter().map(CustomerRecord::customer).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).map(CustomerRecord::customer))
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        let records = self.records.read().await;
        Ok(taken(records.iter(), exclude, email, |r| r.email.as_str()))
    }

    async fn phone_taken(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        let records = self.records.read().await;
        Ok(taken(records.iter(), exclude, phone, |r| r.phone.as_str()))
    }

    async fn insert(&self, record: CustomerRecord) -> Result<Customer, ServiceError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(duplicate_id(record.id));
        }
        let customer = record.customer();
        records.push(record);
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let mut records = self.records.write().await;
        let existing = records
            .iter_mut()
            .find(|r| r.id == customer.id)
            .ok_or_else(|| customer_not_found(customer.id))?;
        existing.apply(customer);
        Ok(existing.customer())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        let mut records = self.records.write().await;
        let Some(pos) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        Ok(Some(records.remove(pos).customer()))
    }

    async fn set_picture(&self, id: Uuid, picture: Option<Vec<u8>>) -> Result<(), ServiceError> {
        let mut records = self.records.write().await;
        let existing = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| customer_not_found(id))?;
        existing.picture = picture;
        Ok(())
    }

    async fn get_picture(&self, id: Uuid) -> Result<Option<Vec<u8>>, ServiceError> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.picture.clone())
            .ok_or_else(|| customer_not_found(id))
    }
}
