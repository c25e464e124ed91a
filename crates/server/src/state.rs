use std::sync::Arc;

use service::customer::{CustomerRepository, CustomerService};

/// Service over whichever backend the configuration selected.
pub type DynCustomerService = CustomerService<dyn CustomerRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<DynCustomerService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customers: Arc::new(CustomerService::new(repo)) }
    }
}
