use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Customer, CustomerRecord};
use crate::errors::ServiceError;

/// Storage primitives for customers. No business rules: validation and
/// uniqueness policy live in [`CustomerService`](super::service::CustomerService).
///
/// Reads return owned snapshots. Operations addressing a single id report
/// [`ServiceError::NotFound`] when it does not exist.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers in insertion order.
    async fn list(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError>;

    /// Whether a customer other than `exclude` already uses this email.
    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError>;
    /// Whether a customer other than `exclude` already uses this phone.
    async fn phone_taken(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError>;

    async fn insert(&self, record: CustomerRecord) -> Result<Customer, ServiceError>;
    /// Overwrite the contact fields of an existing customer; the picture stays.
    async fn update(&self, customer: Customer) -> Result<Customer, ServiceError>;
    /// Remove a customer with its picture, returning what was removed.
    async fn delete(&self, id: Uuid) -> Result<Option<Customer>, ServiceError>;

    async fn set_picture(&self, id: Uuid, picture: Option<Vec<u8>>) -> Result<(), ServiceError>;
    async fn get_picture(&self, id: Uuid) -> Result<Option<Vec<u8>>, ServiceError>;
}

pub(crate) fn customer_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("no customer found for id {id}"))
}

pub(crate) fn duplicate_id(id: Uuid) -> ServiceError {
    ServiceError::Storage(format!("customer id {id} already exists"))
}

/// Shared scan used by the list-backed repositories.
pub(crate) fn taken<'a, I>(records: I, exclude: Option<Uuid>, value: &str, field: fn(&CustomerRecord) -> &str) -> bool
where
    I: IntoIterator<Item = &'a CustomerRecord>,
{
    records
        .into_iter()
        .any(|r| Some(r.id) != exclude && field(r) == value)
}
