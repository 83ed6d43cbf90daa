//! Credits domain module.
//!
//! Credit requests and the eligibility/scheduling policy that guards
//! them. Pure domain logic; persistence and HTTP live elsewhere.

pub mod credit;
pub mod policy;

pub use credit::{Credit, CreditRequest, CreditStatus, NewCredit};
pub use policy::{MAX_INSTALLMENTS, MAX_SCHEDULE_MONTHS, MIN_INSTALLMENTS};
