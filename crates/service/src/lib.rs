//! Service layer for customer records.
//! - Validation and uniqueness rules live in `customer::service`.
//! - Storage is pluggable through `customer::CustomerRepository`.
//! - Errors follow one taxonomy: validation, conflict, not found, storage.

pub mod errors;
pub mod storage;
pub mod customer;
