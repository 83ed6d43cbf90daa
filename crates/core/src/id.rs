//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a customer.
///
/// Sequential, assigned by the persistence store on insert and immutable
/// afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for CustomerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("CustomerId: {e}")))?;
        Ok(Self(id))
    }
}

/// Opaque token identifying a credit request.
///
/// Generated server-side (UUIDv7, time-ordered), never client-supplied,
/// unique and immutable once assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditCode(Uuid);

impl CreditCode {
    /// Generate a fresh credit code.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CreditCode {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for CreditCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for CreditCode {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<CreditCode> for Uuid {
    fn from(value: CreditCode) -> Self {
        value.0
    }
}

impl FromStr for CreditCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("CreditCode: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_parses_round_trip() {
        let id: CustomerId = "17".parse().unwrap();
        assert_eq!(id, CustomerId::new(17));
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn customer_id_rejects_non_numeric() {
        let err = "abc".parse::<CustomerId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn credit_codes_are_distinct() {
        assert_ne!(CreditCode::new(), CreditCode::new());
    }

    #[test]
    fn credit_code_rejects_malformed_input() {
        let err = "not-a-uuid".parse::<CreditCode>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
