use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Customer, CustomerInput, CustomerPatch, CustomerRecord};
use super::repository::CustomerRepository;
use super::validation::{apply_patch, check_mandatory, check_unique};
use crate::errors::ServiceError;

/// Customer record service: validation, uniqueness, and mutation rules
/// over any [`CustomerRepository`].
///
/// Mutations are serialized through a write gate so that the uniqueness
/// scan and the write it guards happen as one step. Reads go straight to
/// the repository, which hands back owned snapshots.
///
/// Errors are returned to the caller as-is; nothing is logged or retried here.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
    write_gate: Mutex<()>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, write_gate: Mutex::new(()) } }

    /// All customers in storage order.
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate and store a new customer under a freshly generated id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::customer::{CustomerInput, CustomerService, InMemoryCustomerRepository};
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::new()));
    /// let ann = tokio_test::block_on(svc.insert(CustomerInput::new("Ann", "a@x.com", "111"))).unwrap();
    /// let dup = tokio_test::block_on(svc.insert(CustomerInput::new("Bob", "a@x.com", "222")));
    /// assert!(dup.is_err());
    /// assert_eq!(tokio_test::block_on(svc.get(ann.id)).unwrap().name, "Ann");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn insert(&self, input: CustomerInput) -> Result<Customer, ServiceError> {
        check_mandatory(&input)?;
        let _gate = self.write_gate.lock().await;
        check_unique(self.repo.as_ref(), &input, None).await?;
        let record = CustomerRecord::new(Customer::from_input(Uuid::new_v4(), input));
        let created = self.repo.insert(record).await?;
        info!(customer_id = %created.id, "customer_created");
        Ok(created)
    }

    /// Full update of name, email, phone and city. The picture is untouched.
    #[instrument(skip(self, input), fields(customer_id = %id))]
    pub async fn replace(&self, id: Uuid, input: CustomerInput) -> Result<Customer, ServiceError> {
        check_mandatory(&input)?;
        let _gate = self.write_gate.lock().await;
        self.repo.get(id).await?.ok_or_else(|| not_found(id))?;
        check_unique(self.repo.as_ref(), &input, Some(id)).await?;
        let updated = self.repo.update(Customer::from_input(id, input)).await?;
        info!("customer_replaced");
        Ok(updated)
    }

    /// Partial update: present, non-empty fields replace stored ones.
    /// Nothing is written unless the merged result passes every check.
    #[instrument(skip(self, patch), fields(customer_id = %id))]
    pub async fn merge(&self, id: Uuid, patch: CustomerPatch) -> Result<Customer, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let current = self.repo.get(id).await?.ok_or_else(|| not_found(id))?;
        let merged = apply_patch(&current, &patch);
        check_mandatory(&merged)?;
        check_unique(self.repo.as_ref(), &merged, Some(id)).await?;
        let updated = self.repo.update(Customer::from_input(id, merged)).await?;
        info!("customer_merged");
        Ok(updated)
    }

    /// Remove a customer and its picture, returning the removed data.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Customer, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let removed = self.repo.delete(id).await?.ok_or_else(|| not_found(id))?;
        info!("customer_deleted");
        Ok(removed)
    }

    /// Store a picture, replacing any previous one. Content is not inspected.
    #[instrument(skip(self, picture), fields(customer_id = %id, bytes = picture.len()))]
    pub async fn set_picture(&self, id: Uuid, picture: Vec<u8>) -> Result<(), ServiceError> {
        let _gate = self.write_gate.lock().await;
        self.repo.set_picture(id, Some(picture)).await?;
        info!("customer_picture_set");
        Ok(())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn clear_picture(&self, id: Uuid) -> Result<(), ServiceError> {
        let _gate = self.write_gate.lock().await;
        self.repo.set_picture(id, None).await?;
        info!("customer_picture_cleared");
        Ok(())
    }

    /// `Ok(None)` when the customer exists without a picture,
    /// `Err(NotFound)` when the customer does not exist.
    pub async fn get_picture(&self, id: Uuid) -> Result<Option<Vec<u8>>, ServiceError> {
        self.repo.get_picture(id).await
    }
}

fn not_found(id: Uuid) -> ServiceError {
    super::repository::customer_not_found(id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::customer::repo::{InMemoryCustomerRepository, JsonFileCustomerRepository, SeaOrmCustomerRepository};
    use crate::errors::UniqueField;

    fn ann() -> CustomerInput { CustomerInput::new("Ann", "a@x.com", "111").with_city("Bangalore") }
    fn bob() -> CustomerInput { CustomerInput::new("Bob", "b@x.com", "222") }

    async fn assert_unique<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let all = svc.list().await.unwrap();
        let emails: HashSet<_> = all.iter().map(|c| c.email.clone()).collect();
        let phones: HashSet<_> = all.iter().map(|c| c.phone.clone()).collect();
        assert_eq!(emails.len(), all.len(), "duplicate email in {all:?}");
        assert_eq!(phones.len(), all.len(), "duplicate phone in {all:?}");
    }

    // Behaviour every backend must show; run once per repository below.

    async fn insert_round_trip<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let created = svc.insert(ann()).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.email, "a@x.com");
        assert_eq!(fetched.phone, "111");
        assert_eq!(fetched.city.as_deref(), Some("Bangalore"));
        assert_unique(svc).await;
    }

    async fn email_conflict_keeps_original<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let first = svc.insert(CustomerInput::new("Ann", "a@x.com", "111")).await.unwrap();
        let err = svc.insert(CustomerInput::new("Bob", "a@x.com", "222")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(UniqueField::Email)));
        let still = svc.get(first.id).await.unwrap();
        assert_eq!(still, first);
        assert_eq!(svc.list().await.unwrap().len(), 1);
        assert_unique(svc).await;
    }

    async fn email_reported_before_phone<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        svc.insert(CustomerInput::new("Ann", "a@x.com", "111")).await.unwrap();
        svc.insert(CustomerInput::new("Bob", "b@x.com", "222")).await.unwrap();
        // email clashes with Bob, phone with Ann
        let err = svc.insert(CustomerInput::new("Cid", "b@x.com", "111")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(UniqueField::Email)));
        let err = svc.insert(CustomerInput::new("Cid", "c@x.com", "111")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(UniqueField::Phone)));
    }

    async fn replace_rules<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let a = svc.insert(ann()).await.unwrap();
        let b = svc.insert(bob()).await.unwrap();

        // own email and phone may be kept
        let same = svc.replace(a.id, CustomerInput::new("Ann B", "a@x.com", "111")).await.unwrap();
        assert_eq!(same.name, "Ann B");
        assert_eq!(same.city, None);

        let err = svc.replace(a.id, CustomerInput::new("", "x@x.com", "333")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(a.id).await.unwrap(), same);

        let err = svc.replace(a.id, CustomerInput::new("Ann", "a@x.com", "222")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(UniqueField::Phone)));
        assert_eq!(svc.get(a.id).await.unwrap(), same);

        let err = svc.replace(Uuid::new_v4(), CustomerInput::new("Zed", "z@x.com", "999")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        assert_eq!(svc.get(b.id).await.unwrap(), b);
        assert_unique(svc).await;
    }

    async fn merge_rules<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let a = svc.insert(ann()).await.unwrap();
        let b = svc.insert(bob()).await.unwrap();

        let moved = svc
            .merge(a.id, CustomerPatch { city: Some("X".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.city.as_deref(), Some("X"));
        assert_eq!((moved.name.as_str(), moved.email.as_str(), moved.phone.as_str()), ("Ann", "a@x.com", "111"));

        let before = svc.get(a.id).await.unwrap();
        let err = svc
            .merge(a.id, CustomerPatch { name: Some("Changed".into()), email: Some(b.email.clone()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(UniqueField::Email)));
        assert_eq!(svc.get(a.id).await.unwrap(), before);

        let err = svc.merge(a.id, CustomerPatch { name: Some("   ".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(a.id).await.unwrap(), before);

        let err = svc.merge(Uuid::new_v4(), CustomerPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_unique(svc).await;
    }

    async fn delete_and_picture<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let a = svc.insert(ann()).await.unwrap();
        assert_eq!(svc.get_picture(a.id).await.unwrap(), None);

        svc.set_picture(a.id, vec![0x01, 0x02]).await.unwrap();
        assert_eq!(svc.get_picture(a.id).await.unwrap(), Some(vec![0x01, 0x02]));

        // replace leaves the picture alone
        svc.replace(a.id, CustomerInput::new("Ann", "a@x.com", "111")).await.unwrap();
        assert_eq!(svc.get_picture(a.id).await.unwrap(), Some(vec![0x01, 0x02]));

        svc.clear_picture(a.id).await.unwrap();
        assert_eq!(svc.get_picture(a.id).await.unwrap(), None);
        svc.set_picture(a.id, vec![0x01, 0x02]).await.unwrap();

        let snapshot = svc.delete(a.id).await.unwrap();
        assert_eq!(snapshot.id, a.id);
        assert_eq!(snapshot.email, "a@x.com");
        assert!(matches!(svc.get(a.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_picture(a.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(a.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.set_picture(a.id, vec![1]).await, Err(ServiceError::NotFound(_))));

        // a deleted customer's email and phone are free again, under a new id
        let again = svc.insert(ann()).await.unwrap();
        assert_ne!(again.id, a.id);
    }

    async fn validation_names_fields<R: CustomerRepository + ?Sized>(svc: &CustomerService<R>) {
        let err = svc.insert(CustomerInput::new("Ann", " ", "")).await.unwrap_err();
        match err {
            ServiceError::Validation(msg) => assert!(msg.contains("email") && msg.contains("phone")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    async fn run_suite<R, F, Fut>(make: F)
    where
        R: CustomerRepository + ?Sized,
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = CustomerService<R>>,
    {
        insert_round_trip(&make().await).await;
        email_conflict_keeps_original(&make().await).await;
        email_reported_before_phone(&make().await).await;
        replace_rules(&make().await).await;
        merge_rules(&make().await).await;
        delete_and_picture(&make().await).await;
        validation_names_fields(&make().await).await;
    }

    #[tokio::test]
    async fn in_memory_backend() {
        run_suite(|| async { CustomerService::new(Arc::new(InMemoryCustomerRepository::new())) }).await;
    }

    #[tokio::test]
    async fn json_file_backend() {
        let dir = std::env::temp_dir().join(format!("customer_service_{}", Uuid::new_v4()));
        let dir_ref = &dir;
        run_suite(|| async move {
            let path = dir_ref.join(format!("{}.json", Uuid::new_v4()));
            CustomerService::new(Arc::new(JsonFileCustomerRepository::open(path).await.unwrap()))
        })
        .await;
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn seaorm_backend() {
        run_suite(|| async {
            let db = models::db::connect_sqlite_memory().await.unwrap();
            CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)))
        })
        .await;
    }

    #[tokio::test]
    async fn list_follows_insertion_order() {
        let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::new()));
        let a = svc.insert(ann()).await.unwrap();
        let b = svc.insert(bob()).await.unwrap();
        let listed: Vec<Uuid> = svc.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(listed, vec![a.id, b.id]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_with_same_email_admit_one() {
        let svc = Arc::new(CustomerService::new(Arc::new(InMemoryCustomerRepository::new())));
        let mut handles = Vec::new();
        for i in 0..32 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.insert(CustomerInput::new(format!("C{i}"), "same@x.com", format!("{i}"))).await
            }));
        }
        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert!(matches!(e, ServiceError::Conflict(UniqueField::Email))),
            }
        }
        assert_eq!(ok, 1);
        assert_unique(svc.as_ref()).await;
    }

    #[tokio::test]
    async fn works_behind_trait_object() {
        let repo: Arc<dyn CustomerRepository> = Arc::new(InMemoryCustomerRepository::new());
        let svc: CustomerService<dyn CustomerRepository> = CustomerService::new(repo);
        let created = svc.insert(ann()).await.unwrap();
        assert_eq!(svc.get(created.id).await.unwrap(), created);
    }
}
