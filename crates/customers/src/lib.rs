//! Customers domain module.
//!
//! Business rules for customer registration and mutation, implemented as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod cpf;
pub mod customer;

pub use customer::{Address, Customer, CustomerPatch, NewCustomer};
