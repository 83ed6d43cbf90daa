//! `creditapp-infra` — persistence implementations for the domain.
//!
//! Repository traits plus two interchangeable backends: an in-memory
//! store for dev/test and a Postgres store (sqlx) for deployment.

pub mod repository;

pub use repository::{
    CreditRepository, CustomerRepository, InMemoryCreditRepository, InMemoryCustomerRepository,
    InMemoryStore, PostgresCreditRepository, PostgresCustomerRepository,
};
