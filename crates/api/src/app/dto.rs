use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use creditapp_core::CustomerId;
use creditapp_credits::{Credit, CreditRequest};
use creditapp_customers::{Address, Customer, CustomerPatch, NewCustomer};

use crate::app::services::CreditDetails;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
    pub income: Decimal,
}

impl CustomerCreateRequest {
    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password: self.password,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
            income: self.income,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
    pub income: Option<Decimal>,
}

impl CustomerUpdateRequest {
    pub fn into_patch(self) -> CustomerPatch {
        CustomerPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            zip_code: self.zip_code,
            street: self.street,
            income: self.income,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCreateRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreditCreateRequest {
    pub fn into_credit_request(self) -> CreditRequest {
        CreditRequest {
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            customer_id: CustomerId::new(self.customer_id),
        }
    }
}

/// `?customerId=N` — the caller identity for credit reads.
#[derive(Debug, Deserialize)]
pub struct CreditOwnerQuery {
    #[serde(rename = "customerId")]
    pub customer_id: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Customer view. Never exposes the password.
pub fn customer_to_json(c: &Customer) -> serde_json::Value {
    serde_json::json!({
        "id": c.id.as_i64(),
        "firstName": c.first_name,
        "lastName": c.last_name,
        "cpf": c.cpf,
        "email": c.email,
        "income": c.income,
        "zipCode": c.address.zip_code,
        "street": c.address.street,
    })
}

/// Credit view returned from create.
pub fn credit_created_to_json(c: &Credit) -> serde_json::Value {
    serde_json::json!({
        "creditCode": c.credit_code.to_string(),
        "creditValue": c.credit_value,
        "numberOfInstallments": c.number_of_installments,
        "dayFirstInstallment": c.day_first_installment,
        "status": c.status,
        "customerId": c.customer_id.as_i64(),
    })
}

/// Compact credit view used in per-customer listings.
pub fn credit_summary_to_json(c: &Credit) -> serde_json::Value {
    serde_json::json!({
        "creditCode": c.credit_code.to_string(),
        "creditValue": c.credit_value,
        "numberOfInstallments": c.number_of_installments,
    })
}

/// Full credit view, including owner email and income.
pub fn credit_view_to_json(details: &CreditDetails) -> serde_json::Value {
    serde_json::json!({
        "creditCode": details.credit.credit_code.to_string(),
        "creditValue": details.credit.credit_value,
        "numberOfInstallments": details.credit.number_of_installments,
        "dayFirstInstallment": details.credit.day_first_installment,
        "status": details.credit.status,
        "emailCustomer": details.owner.email,
        "incomeCustomer": details.owner.income,
    })
}
