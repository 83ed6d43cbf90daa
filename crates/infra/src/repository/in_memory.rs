//! In-memory repositories for tests and dev mode.
//!
//! Both repositories share one `RwLock`-guarded state so that deleting a
//! customer cascades to its credits exactly like the relational schema
//! does.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use creditapp_core::{CreditCode, CustomerId, DomainError, DomainResult};
use creditapp_credits::{Credit, NewCredit};
use creditapp_customers::{Customer, NewCustomer};

use super::{CreditRepository, CustomerRepository};

#[derive(Debug, Default)]
struct State {
    customers: HashMap<i64, Customer>,
    customer_seq: i64,
    /// Insertion-ordered; creation order falls out of the Vec.
    credits: Vec<Credit>,
    credit_seq: i64,
}

/// Shared backing store for the in-memory repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

fn poisoned() -> DomainError {
    DomainError::store("in-memory store lock poisoned")
}

/// In-memory `CustomerRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryCustomerRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCustomerRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: NewCustomer) -> DomainResult<Customer> {
        let mut state = self.store.state.write().map_err(|_| poisoned())?;

        if state.customers.values().any(|c| c.cpf == customer.cpf) {
            return Err(DomainError::conflict(format!(
                "CPF {} already registered",
                customer.cpf
            )));
        }
        if state.customers.values().any(|c| c.email == customer.email) {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                customer.email
            )));
        }

        state.customer_seq += 1;
        let id = state.customer_seq;
        let stored = customer.into_customer(CustomerId::new(id));
        state.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        let state = self.store.state.read().map_err(|_| poisoned())?;
        Ok(state.customers.get(&id.as_i64()).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> DomainResult<Option<Customer>> {
        let state = self.store.state.read().map_err(|_| poisoned())?;
        Ok(state.customers.values().find(|c| c.cpf == cpf).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        let state = self.store.state.read().map_err(|_| poisoned())?;
        Ok(state.customers.values().find(|c| c.email == email).cloned())
    }

    async fn update(&self, customer: Customer) -> DomainResult<bool> {
        let mut state = self.store.state.write().map_err(|_| poisoned())?;
        let key = customer.id.as_i64();
        match state.customers.get_mut(&key) {
            Some(slot) => {
                *slot = customer;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CustomerId) -> DomainResult<bool> {
        let mut state = self.store.state.write().map_err(|_| poisoned())?;
        let existed = state.customers.remove(&id.as_i64()).is_some();
        if existed {
            // Cascade, mirroring the relational foreign key.
            state.credits.retain(|c| c.customer_id != id);
        }
        Ok(existed)
    }
}

/// In-memory `CreditRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryCreditRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCreditRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CreditRepository for InMemoryCreditRepository {
    async fn insert(&self, credit: NewCredit) -> DomainResult<Credit> {
        let mut state = self.store.state.write().map_err(|_| poisoned())?;

        if state
            .credits
            .iter()
            .any(|c| c.credit_code == credit.credit_code)
        {
            return Err(DomainError::conflict(format!(
                "credit code {} already exists",
                credit.credit_code
            )));
        }

        state.credit_seq += 1;
        let stored = credit.into_credit(state.credit_seq);
        state.credits.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_credit_code(&self, code: CreditCode) -> DomainResult<Option<Credit>> {
        let state = self.store.state.read().map_err(|_| poisoned())?;
        Ok(state.credits.iter().find(|c| c.credit_code == code).cloned())
    }

    async fn find_all_by_customer_id(&self, customer_id: CustomerId) -> DomainResult<Vec<Credit>> {
        let state = self.store.state.read().map_err(|_| poisoned())?;
        Ok(state
            .credits
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use creditapp_credits::CreditStatus;
    use creditapp_customers::Address;
    use rust_decimal_macros::dec;

    fn build_new_customer(cpf: &str, email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Matheus".to_string(),
            last_name: "Ribeiro".to_string(),
            cpf: cpf.to_string(),
            email: email.to_string(),
            password: "12345".to_string(),
            address: Address {
                zip_code: "12345".to_string(),
                street: "Rua da Cassiana".to_string(),
            },
            income: dec!(1000.00),
        }
    }

    fn build_new_credit(customer_id: CustomerId) -> NewCredit {
        NewCredit {
            credit_code: CreditCode::new(),
            credit_value: dec!(500.00),
            day_first_installment: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
            number_of_installments: 5,
            status: CreditStatus::InProgress,
            customer_id,
        }
    }

    fn repos() -> (InMemoryCustomerRepository, InMemoryCreditRepository) {
        let store = InMemoryStore::new();
        (
            InMemoryCustomerRepository::new(store.clone()),
            InMemoryCreditRepository::new(store),
        )
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let (customers, _) = repos();
        let a = customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();
        let b = customers
            .insert(build_new_customer("288.987.679-00", "b@mail.com"))
            .await
            .unwrap();
        assert_eq!(a.id, CustomerId::new(1));
        assert_eq!(b.id, CustomerId::new(2));
    }

    #[tokio::test]
    async fn duplicate_cpf_conflicts() {
        let (customers, _) = repos();
        customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();
        let err = customers
            .insert(build_new_customer("166.876.568-99", "other@mail.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let (customers, _) = repos();
        customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();
        let err = customers
            .insert(build_new_customer("288.987.679-00", "a@mail.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_natural_keys() {
        let (customers, _) = repos();
        let stored = customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();

        let by_id = customers.find_by_id(stored.id).await.unwrap();
        assert_eq!(by_id, Some(stored.clone()));

        let by_cpf = customers.find_by_cpf("166.876.568-99").await.unwrap();
        assert_eq!(by_cpf, Some(stored.clone()));

        let by_email = customers.find_by_email("a@mail.com").await.unwrap();
        assert_eq!(by_email, Some(stored));

        assert_eq!(customers.find_by_id(CustomerId::new(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn credits_list_in_creation_order() {
        let (customers, credits) = repos();
        let owner = customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();

        let first = credits.insert(build_new_credit(owner.id)).await.unwrap();
        let second = credits.insert(build_new_credit(owner.id)).await.unwrap();

        let listed = credits.find_all_by_customer_id(owner.id).await.unwrap();
        assert_eq!(listed, vec![first, second]);

        let none = credits
            .find_all_by_customer_id(CustomerId::new(99))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_customer_cascades_to_credits() {
        let (customers, credits) = repos();
        let owner = customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();
        let credit = credits.insert(build_new_credit(owner.id)).await.unwrap();

        assert!(customers.delete(owner.id).await.unwrap());

        assert_eq!(customers.find_by_id(owner.id).await.unwrap(), None);
        assert_eq!(
            credits
                .find_by_credit_code(credit.credit_code)
                .await
                .unwrap(),
            None
        );
        assert!(!customers.delete(owner.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_credit_code_conflicts() {
        let (customers, credits) = repos();
        let owner = customers
            .insert(build_new_customer("166.876.568-99", "a@mail.com"))
            .await
            .unwrap();

        let mut dup = build_new_credit(owner.id);
        let stored = credits.insert(dup.clone()).await.unwrap();
        dup.credit_code = stored.credit_code;
        let err = credits.insert(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
