//! Acceptance rules for candidate customer data.
//!
//! Pure checks live here; the uniqueness scan needs a repository and is
//! only correct while the caller holds the service write gate.

use uuid::Uuid;

use super::domain::{Customer, CustomerInput, CustomerPatch};
use super::repository::CustomerRepository;
use crate::errors::{ServiceError, UniqueField};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject candidates whose name, email or phone is empty after trimming.
/// The error lists every missing field.
pub fn check_mandatory(input: &CustomerInput) -> Result<(), ServiceError> {
    let missing: Vec<&str> = [("name", &input.name), ("email", &input.email), ("phone", &input.phone)]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(field, _)| field)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ServiceError::Validation(format!(
        "missing one or more mandatory fields: {}",
        missing.join(", ")
    )))
}

/// Overlay a patch on the stored customer. Absent or empty patch values keep
/// the stored one, so `city` cannot be cleared this way.
pub fn apply_patch(current: &Customer, patch: &CustomerPatch) -> CustomerInput {
    fn pick(new: &Option<String>, old: &str) -> String {
        match new.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => old.to_string(),
        }
    }
    let city = match patch.city.as_deref() {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => current.city.clone(),
    };
    CustomerInput {
        name: pick(&patch.name, &current.name),
        email: pick(&patch.email, &current.email),
        phone: pick(&patch.phone, &current.phone),
        city,
    }
}

/// Scan every stored customer except `exclude` for a clashing email, then
/// for a clashing phone. Email wins when both clash.
pub async fn check_unique<R>(
    repo: &R,
    input: &CustomerInput,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError>
where
    R: CustomerRepository + ?Sized,
{
    if repo.email_taken(&input.email, exclude).await? {
        return Err(ServiceError::Conflict(UniqueField::Email));
    }
    if repo.phone_taken(&input.phone, exclude).await? {
        return Err(ServiceError::Conflict(UniqueField::Phone));
    }
    Ok(())
}
