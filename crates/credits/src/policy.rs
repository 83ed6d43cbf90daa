//! Credit eligibility and installment-scheduling policy.
//!
//! Pure checks over a caller-supplied `today` so the rules stay
//! deterministic under test.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use creditapp_core::{DomainError, DomainResult};

/// Minimum number of installments for a credit.
pub const MIN_INSTALLMENTS: i32 = 1;

/// Maximum number of installments for a credit.
pub const MAX_INSTALLMENTS: i32 = 48;

/// The first installment must fall within this many months from today.
pub const MAX_SCHEDULE_MONTHS: u32 = 3;

/// Check the installment count against the policy bounds.
pub fn validate_installments(count: i32) -> DomainResult<()> {
    if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count) {
        return Err(DomainError::validation(format!(
            "numberOfInstallments must be between {MIN_INSTALLMENTS} and {MAX_INSTALLMENTS}, got {count}"
        )));
    }
    Ok(())
}

/// Check that the first installment is scheduled in the allowed window:
/// strictly after `today` and no later than `today` + 3 months.
pub fn validate_first_installment(day: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if day <= today {
        return Err(DomainError::validation(format!(
            "dayFirstInstallment must be a future date, got {day}"
        )));
    }
    let limit = today
        .checked_add_months(Months::new(MAX_SCHEDULE_MONTHS))
        .ok_or_else(|| DomainError::validation("dayFirstInstallment out of range"))?;
    if day > limit {
        return Err(DomainError::validation(format!(
            "dayFirstInstallment must be no later than {limit} ({MAX_SCHEDULE_MONTHS} months from today)"
        )));
    }
    Ok(())
}

/// Check that the requested credit value is strictly positive.
pub fn validate_credit_value(value: Decimal) -> DomainResult<()> {
    if value <= Decimal::ZERO {
        return Err(DomainError::validation("creditValue must be positive"));
    }
    Ok(())
}
