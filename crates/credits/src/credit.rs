use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creditapp_core::{CreditCode, CustomerId, DomainResult, Entity};

use crate::policy;

/// Lifecycle status of a credit request.
///
/// Every credit starts in `InProgress`; approval and rejection have no
/// workflow trigger in this system yet and exist for forward
/// compatibility with the stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    InProgress,
    Approved,
    Rejected,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::InProgress => "IN_PROGRESS",
            CreditStatus::Approved => "APPROVED",
            CreditStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(CreditStatus::InProgress),
            "APPROVED" => Some(CreditStatus::Approved),
            "REJECTED" => Some(CreditStatus::Rejected),
            _ => None,
        }
    }
}

/// A stored credit.
///
/// `id` is the store-assigned insertion sequence (creation order);
/// `credit_code` is the public token clients use to look the credit up.
/// The customer is referenced by id, not owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub id: i64,
    pub credit_code: CreditCode,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: CustomerId,
}

impl Entity for Credit {
    type Id = CreditCode;

    fn id(&self) -> &Self::Id {
        &self.credit_code
    }
}

/// An incoming credit request, before policy checks and code assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: CustomerId,
}

impl CreditRequest {
    /// Run the eligibility policy against a caller-supplied `today`.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        policy::validate_credit_value(self.credit_value)?;
        policy::validate_installments(self.number_of_installments)?;
        policy::validate_first_installment(self.day_first_installment, today)
    }

    /// Promote a validated request into an insertable credit with a fresh
    /// code and the initial status.
    pub fn into_new_credit(self) -> NewCredit {
        NewCredit {
            credit_code: CreditCode::new(),
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            status: CreditStatus::InProgress,
            customer_id: self.customer_id,
        }
    }
}

/// Credit data ready for insertion, before the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredit {
    pub credit_code: CreditCode,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: CustomerId,
}

impl NewCredit {
    pub fn into_credit(self, id: i64) -> Credit {
        Credit {
            id,
            credit_code: self.credit_code,
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            status: self.status,
            customer_id: self.customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use creditapp_core::DomainError;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn build_request(number_of_installments: i32) -> CreditRequest {
        CreditRequest {
            credit_value: dec!(500.00),
            day_first_installment: today() + Duration::days(30),
            number_of_installments,
            customer_id: CustomerId::new(1),
        }
    }

    #[test]
    fn valid_request_passes_policy() {
        assert!(build_request(5).validate(today()).is_ok());
    }

    #[test]
    fn too_many_installments_fail_policy() {
        let err = build_request(49).validate(today()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn promoted_request_starts_in_progress_with_fresh_code() {
        let new_a = build_request(5).into_new_credit();
        let new_b = build_request(5).into_new_credit();

        assert_eq!(new_a.status, CreditStatus::InProgress);
        assert_ne!(new_a.credit_code, new_b.credit_code);

        let credit = new_a.clone().into_credit(3);
        assert_eq!(credit.id, 3);
        assert_eq!(credit.credit_code, new_a.credit_code);
        assert_eq!(credit.credit_value, dec!(500.00));
    }

    #[test]
    fn status_serializes_in_wire_format() {
        let json = serde_json::to_string(&CreditStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        assert_eq!(CreditStatus::parse("REJECTED"), Some(CreditStatus::Rejected));
        assert_eq!(CreditStatus::parse("bogus"), None);
    }
}
