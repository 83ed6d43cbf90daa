//! Postgres-backed repositories (sqlx).
//!
//! Queries are runtime-bound (`sqlx::query` + `bind`), one named query
//! per access pattern. Uniqueness lives in the schema (`UNIQUE` on cpf,
//! email and credit_code) and surfaces as `DomainError::Conflict`;
//! everything else maps to `DomainError::Store`. Schema:
//! `migrations/0001_init.sql`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use creditapp_core::{CreditCode, CustomerId, DomainError, DomainResult};
use creditapp_credits::{Credit, CreditStatus, NewCredit};
use creditapp_customers::{Address, Customer, NewCustomer};

use super::{CreditRepository, CustomerRepository};

fn map_sqlx_err(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::conflict(db.message().to_string());
        }
    }
    DomainError::store(e.to_string())
}

fn customer_from_row(row: &PgRow) -> DomainResult<Customer> {
    Ok(Customer {
        id: CustomerId::new(row.try_get("id").map_err(map_sqlx_err)?),
        first_name: row.try_get("first_name").map_err(map_sqlx_err)?,
        last_name: row.try_get("last_name").map_err(map_sqlx_err)?,
        cpf: row.try_get("cpf").map_err(map_sqlx_err)?,
        email: row.try_get("email").map_err(map_sqlx_err)?,
        password: row.try_get("password").map_err(map_sqlx_err)?,
        address: Address {
            zip_code: row.try_get("zip_code").map_err(map_sqlx_err)?,
            street: row.try_get("street").map_err(map_sqlx_err)?,
        },
        income: row.try_get("income").map_err(map_sqlx_err)?,
    })
}

fn credit_from_row(row: &PgRow) -> DomainResult<Credit> {
    let status: String = row.try_get("status").map_err(map_sqlx_err)?;
    let status = CreditStatus::parse(&status)
        .ok_or_else(|| DomainError::store(format!("unknown credit status in store: {status}")))?;

    Ok(Credit {
        id: row.try_get("id").map_err(map_sqlx_err)?,
        credit_code: CreditCode::from_uuid(row.try_get("credit_code").map_err(map_sqlx_err)?),
        credit_value: row.try_get("credit_value").map_err(map_sqlx_err)?,
        day_first_installment: row
            .try_get("day_first_installment")
            .map_err(map_sqlx_err)?,
        number_of_installments: row
            .try_get("number_of_installments")
            .map_err(map_sqlx_err)?,
        status,
        customer_id: CustomerId::new(row.try_get("customer_id").map_err(map_sqlx_err)?),
    })
}

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, cpf, email, password, zip_code, street, income";

const CREDIT_COLUMNS: &str =
    "id, credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id";

/// Postgres-backed `CustomerRepository`.
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> DomainResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE {column} = $1");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref().map(customer_from_row).transpose()
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn insert(&self, customer: NewCustomer) -> DomainResult<Customer> {
        let row = sqlx::query(
            r#"
            INSERT INTO customers
                (first_name, last_name, cpf, email, password, zip_code, street, income)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, cpf, email, password, zip_code, street, income
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(&customer.password)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(customer.income)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        customer_from_row(&row)
    }

    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.as_ref().map(customer_from_row).transpose()
    }

    async fn find_by_cpf(&self, cpf: &str) -> DomainResult<Option<Customer>> {
        self.find_one("cpf", cpf).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        self.find_one("email", email).await
    }

    async fn update(&self, customer: Customer) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = $1, last_name = $2, zip_code = $3, street = $4, income = $5
            WHERE id = $6
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(customer.income)
        .bind(customer.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CustomerId) -> DomainResult<bool> {
        // Credits go with the customer via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Postgres-backed `CreditRepository`.
#[derive(Debug, Clone)]
pub struct PostgresCreditRepository {
    pool: PgPool,
}

impl PostgresCreditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for PostgresCreditRepository {
    async fn insert(&self, credit: NewCredit) -> DomainResult<Credit> {
        let row = sqlx::query(
            r#"
            INSERT INTO credits
                (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id
            "#,
        )
        .bind(credit.credit_code.as_uuid())
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status.as_str())
        .bind(credit.customer_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        credit_from_row(&row)
    }

    async fn find_by_credit_code(&self, code: CreditCode) -> DomainResult<Option<Credit>> {
        let row = sqlx::query(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE credit_code = $1"
        ))
        .bind(code.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.as_ref().map(credit_from_row).transpose()
    }

    async fn find_all_by_customer_id(&self, customer_id: CustomerId) -> DomainResult<Vec<Credit>> {
        let rows = sqlx::query(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.iter().map(credit_from_row).collect()
    }
}
