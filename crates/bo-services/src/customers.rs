//! Customer services

use bo_core::{Id, ServiceResult};
use bo_models::{validate_record, Customer, CustomerPatch};
use bo_store::CustomerStore;

/// Service for creating customers
pub struct CreateCustomerService<'a, S: CustomerStore> {
    store: &'a S,
}

impl<'a, S: CustomerStore> CreateCustomerService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn call(&self, customer: Customer) -> ServiceResult<Customer> {
        if let Err(errors) = validate_record(&customer) {
            return ServiceResult::failure(errors);
        }
        match self.store.create(customer).await {
            Ok(created) => ServiceResult::success(created),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

/// Service for updating customers
pub struct UpdateCustomerService<'a, S: CustomerStore> {
    store: &'a S,
}

impl<'a, S: CustomerStore> UpdateCustomerService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn call(&self, id: Id, patch: CustomerPatch) -> ServiceResult<Customer> {
        let existing = match self.store.get(id).await {
            Ok(Some(customer)) => customer,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Customer not found: {id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut merged = existing.clone();
        patch.apply_to(&mut merged);
        if let Err(errors) = validate_record(&merged) {
            return ServiceResult::failure(errors);
        }

        match self.store.update(id, patch).await {
            Ok(Some(updated)) => ServiceResult::success(updated),
            Ok(None) => ServiceResult::failure_with_message(format!("Customer not found: {id}")),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}
