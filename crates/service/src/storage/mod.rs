//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed store used by the JSON customer
//! repository.

pub mod json_file_store;
