//! Repository backends: in-memory, JSON file, and SeaORM.

pub mod memory;
pub mod json_file;
pub mod seaorm;

pub use json_file::JsonFileCustomerRepository;
pub use memory::InMemoryCustomerRepository;
pub use seaorm::SeaOrmCustomerRepository;
