use async_trait::async_trait;
use uuid::Uuid;

use crate::customer::domain::{Customer, CustomerRecord};
use crate::customer::repository::{customer_not_found, duplicate_id, taken, CustomerRepository};
use crate::errors::ServiceError;
use crate::storage::json_file_store::JsonFileStore;

/// File storage: persists customers as a JSON array, in insertion order.
pub struct JsonFileCustomerRepository {
    store: JsonFileStore<CustomerRecord>,
}

impl JsonFileCustomerRepository {
    /// Open the data file, creating it if it does not exist.
    pub async fn open<P: Into<std::path::PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonFileStore::open(path).await?;
        Ok(Self { store })
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

#[async_trait]
impl CustomerRepository for JsonFileCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.store.read(|records| records.iter().map(CustomerRecord::customer).collect()).await)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        Ok(self
            .store
            .read(|records| records.iter().find(|r| r.id == id).map(CustomerRecord::customer))
            .await)
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(self.store.read(|records| taken(records, exclude, email, |r| r.email.as_str())).await)
    }

    async fn phone_taken(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(self.store.read(|records| taken(records, exclude, phone, |r| r.phone.as_str())).await)
    }

    async fn insert(&self, record: CustomerRecord) -> Result<Customer, ServiceError> {
        self.store
            .update(|records| {
                if records.iter().any(|r| r.id == record.id) {
                    return Err(duplicate_id(record.id));
                }
                let customer = record.customer();
                records.push(record);
                Ok(customer)
            })
            .await
    }

    async fn update(&self, customer: Customer) -> Result<Customer, ServiceError> {
        self.store
            .update(|records| {
                let existing = records
                    .iter_mut()
                    .find(|r| r.id == customer.id)
                    .ok_or_else(|| customer_not_found(customer.id))?;
                existing.apply(customer);
                Ok(existing.customer())
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        self.store
            .update(|records| {
                let Some(pos) = records.iter().position(|r| r.id == id) else {
                    return Ok(None);
                };
                Ok(Some(records.remove(pos).customer()))
            })
            .await
    }

    async fn set_picture(&self, id: Uuid, picture: Option<Vec<u8>>) -> Result<(), ServiceError> {
        self.store
            .update(|records| {
                let existing = records.iter_mut().find(|r| r.id == id).ok_or_else(|| customer_not_found(id))?;
                existing.picture = picture;
                Ok(())
            })
            .await
    }

    async fn get_picture(&self, id: Uuid) -> Result<Option<Vec<u8>>, ServiceError> {
        self.store
            .read(|records| {
                records
                    .iter()
                    .find(|r| r.id == id)
                    .map(|r| r.picture.clone())
                    .ok_or_else(|| customer_not_found(id))
            })
            .await
    }
}
