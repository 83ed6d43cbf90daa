use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creditapp_core::{CustomerId, DomainError, DomainResult, Entity, ValueObject};

use crate::cpf;

/// Postal address, owned by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

impl ValueObject for Address {}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    /// Opaque secret; stored as given (hashing is out of scope here).
    pub password: String,
    pub address: Address,
    pub income: Decimal,
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Registration data for a customer, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub address: Address,
    pub income: Decimal,
}

impl NewCustomer {
    /// Check field-level business rules. Uniqueness of cpf/email is a
    /// store concern and checked in the service layer.
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("firstName", &self.first_name)?;
        require_non_blank("lastName", &self.last_name)?;
        cpf::validate(&self.cpf)?;
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        require_non_blank("zipCode", &self.address.zip_code)?;
        require_non_blank("street", &self.address.street)?;
        validate_income(self.income)
    }

    /// Attach the store-assigned identifier.
    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password: self.password,
            address: self.address,
            income: self.income,
        }
    }
}

/// Partial update for a customer.
///
/// Only names, address and income are mutable; identity fields (id, cpf,
/// email) and the password are not touched by updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
    pub income: Option<Decimal>,
}

impl CustomerPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(v) = &self.first_name {
            require_non_blank("firstName", v)?;
        }
        if let Some(v) = &self.last_name {
            require_non_blank("lastName", v)?;
        }
        if let Some(v) = &self.zip_code {
            require_non_blank("zipCode", v)?;
        }
        if let Some(v) = &self.street {
            require_non_blank("street", v)?;
        }
        if let Some(income) = self.income {
            validate_income(income)?;
        }
        Ok(())
    }

    /// Overwrite the mutable fields of `customer` with the provided ones.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(v) = self.first_name {
            customer.first_name = v;
        }
        if let Some(v) = self.last_name {
            customer.last_name = v;
        }
        if let Some(v) = self.zip_code {
            customer.address.zip_code = v;
        }
        if let Some(v) = self.street {
            customer.address.street = v;
        }
        if let Some(v) = self.income {
            customer.income = v;
        }
    }
}

fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be blank")));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::validation(format!("invalid email: {email}")));
    }
    Ok(())
}

fn validate_income(income: Decimal) -> DomainResult<()> {
    if income < Decimal::ZERO {
        return Err(DomainError::validation("income cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn build_new_customer() -> NewCustomer {
        NewCustomer {
            first_name: "Matheus".to_string(),
            last_name: "Ribeiro".to_string(),
            cpf: "166.876.568-99".to_string(),
            email: "matheuskraot@gmail.com".to_string(),
            password: "12345".to_string(),
            address: Address {
                zip_code: "12345".to_string(),
                street: "Rua da Cassiana".to_string(),
            },
            income: dec!(1000.00),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(build_new_customer().validate().is_ok());
    }

    #[test]
    fn blank_first_name_is_rejected() {
        let mut c = build_new_customer();
        c.first_name = "   ".to_string();
        let err = c.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_cpf_is_rejected() {
        let mut c = build_new_customer();
        c.cpf = "not-a-cpf".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["", "no-at-sign", "@missing.local", "local@nodot"] {
            let mut c = build_new_customer();
            c.email = email.to_string();
            assert!(c.validate().is_err(), "accepted {email:?}");
        }
    }

    #[test]
    fn negative_income_is_rejected() {
        let mut c = build_new_customer();
        c.income = dec!(-0.01);
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_income_is_allowed() {
        let mut c = build_new_customer();
        c.income = Decimal::ZERO;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn into_customer_preserves_fields_and_assigns_id() {
        let new = build_new_customer();
        let customer = new.clone().into_customer(CustomerId::new(7));
        assert_eq!(customer.id, CustomerId::new(7));
        assert_eq!(customer.first_name, new.first_name);
        assert_eq!(customer.cpf, new.cpf);
        assert_eq!(customer.income, new.income);
    }

    #[test]
    fn patch_overwrites_only_provided_fields() {
        let mut customer = build_new_customer().into_customer(CustomerId::new(1));
        let patch = CustomerPatch {
            first_name: Some("Cami".to_string()),
            income: Some(dec!(2500.00)),
            ..Default::default()
        };
        patch.validate().unwrap();
        patch.apply_to(&mut customer);

        assert_eq!(customer.first_name, "Cami");
        assert_eq!(customer.income, dec!(2500.00));
        // Untouched fields survive.
        assert_eq!(customer.last_name, "Ribeiro");
        assert_eq!(customer.address.zip_code, "12345");
        assert_eq!(customer.cpf, "166.876.568-99");
    }

    #[test]
    fn patch_with_blank_name_is_rejected() {
        let patch = CustomerPatch {
            last_name: Some("".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_with_negative_income_is_rejected() {
        let patch = CustomerPatch {
            income: Some(dec!(-1)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
