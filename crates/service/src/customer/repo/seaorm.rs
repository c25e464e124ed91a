use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::customer::{self as rows, Column, Fields};

use crate::customer::domain::{Customer, CustomerRecord};
use crate::customer::repository::{customer_not_found, CustomerRepository};
use crate::errors::ServiceError;

/// SeaORM-backed repository over the `customer` table.
///
/// The table's unique indexes on email and phone back up the service-level
/// scan; a violation surfaces as [`ServiceError::Conflict`].
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn fields(c: &Customer) -> Fields<'_> {
    Fields { name: &c.name, email: &c.email, phone: &c.phone, city: c.city.as_deref() }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let all = rows::list(&self.db).await?;
        Ok(all.into_iter().map(Customer::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        Ok(rows::find(&self.db, id).await?.map(Customer::from))
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(rows::value_taken(&self.db, Column::Email, email, exclude).await?)
    }

    async fn phone_taken(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(rows::value_taken(&self.db, Column::Phone, phone, exclude).await?)
    }

    async fn insert(&self, record: CustomerRecord) -> Result<Customer, ServiceError> {
        let customer = record.customer();
        let created = rows::insert(&self.db, customer.id, fields(&customer)).await?;
        if record.picture.is_some() {
            rows::set_picture(&self.db, created.id, record.picture).await?;
        }
        Ok(Customer::from(created))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let updated = rows::update_fields(&self.db, customer.id, fields(&customer))
            .await
            .map_err(|e| match e {
                models::errors::ModelError::NotFound(_) => customer_not_found(customer.id),
                other => other.into(),
            })?;
        Ok(Customer::from(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        Ok(rows::delete(&self.db, id).await?.map(Customer::from))
    }

    async fn set_picture(&self, id: Uuid, picture: Option<Vec<u8>>) -> Result<(), ServiceError> {
        rows::set_picture(&self.db, id, picture).await.map_err(|e| match e {
            models::errors::ModelError::NotFound(_) => customer_not_found(id),
            other => other.into(),
        })
    }

    async fn get_picture(&self, id: Uuid) -> Result<Option<Vec<u8>>, ServiceError> {
        let row = rows::find(&self.db, id).await?.ok_or_else(|| customer_not_found(id))?;
        Ok(row.picture)
    }
}
