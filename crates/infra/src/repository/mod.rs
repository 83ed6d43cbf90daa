//! Repository abstractions over the persistence store.
//!
//! One explicit, named query function per access pattern (by id, by cpf,
//! by email, by credit code, by owning customer) — no dynamic lookup.
//! `find_*` methods return `Ok(None)` for absence; translating absence
//! into a domain error is the service layer's job. `Err` is reserved for
//! store failures and uniqueness conflicts.

use async_trait::async_trait;

use creditapp_core::{CreditCode, CustomerId, DomainResult};
use creditapp_credits::{Credit, NewCredit};
use creditapp_customers::{Customer, NewCustomer};

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryCreditRepository, InMemoryCustomerRepository, InMemoryStore};
pub use postgres::{PostgresCreditRepository, PostgresCustomerRepository};

/// Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer, assigning its id. Fails with `Conflict` if
    /// cpf or email already exist.
    async fn insert(&self, customer: NewCustomer) -> DomainResult<Customer>;

    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>>;

    async fn find_by_cpf(&self, cpf: &str) -> DomainResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>>;

    /// Overwrite the stored record with the given one (matched by id).
    /// Returns `false` if the id does not exist.
    async fn update(&self, customer: Customer) -> DomainResult<bool>;

    /// Delete by id. Owned credits are removed as well (`ON DELETE
    /// CASCADE` in Postgres; explicit sweep in memory). Returns `false`
    /// if the id does not exist.
    async fn delete(&self, id: CustomerId) -> DomainResult<bool>;
}

/// Credit persistence.
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Insert a new credit, assigning its sequence id.
    async fn insert(&self, credit: NewCredit) -> DomainResult<Credit>;

    async fn find_by_credit_code(&self, code: CreditCode) -> DomainResult<Option<Credit>>;

    /// All credits owned by `customer_id`, in creation order. Empty for
    /// unknown customers.
    async fn find_all_by_customer_id(&self, customer_id: CustomerId) -> DomainResult<Vec<Credit>>;
}
