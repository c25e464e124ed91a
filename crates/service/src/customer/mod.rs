//! Customer records: domain types, validation rules, repository
//! abstraction with its backends, and the service tying them together.

pub mod domain;
pub mod validation;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Customer, CustomerInput, CustomerPatch, CustomerRecord};
pub use repo::{InMemoryCustomerRepository, JsonFileCustomerRepository, SeaOrmCustomerRepository};
pub use repository::CustomerRepository;
pub use service::CustomerService;
