//! Service layer: validation, existence checks, persistence calls.
//!
//! Services orchestrate the domain crates against the repository traits
//! and translate absence/conflict into typed domain errors. Which
//! repository backend they run on is decided once, in `build_services`.

use std::sync::Arc;

use chrono::Utc;

use creditapp_core::{CreditCode, CustomerId, DomainError, DomainResult};
use creditapp_credits::{Credit, CreditRequest};
use creditapp_customers::{Customer, CustomerPatch, NewCustomer};
use creditapp_infra::{
    CreditRepository, CustomerRepository, InMemoryCreditRepository, InMemoryCustomerRepository,
    InMemoryStore, PostgresCreditRepository, PostgresCustomerRepository,
};

/// The wired service layer handed to every handler.
pub struct AppServices {
    pub customers: CustomerService,
    pub credits: CreditService,
}

/// Build services from the environment.
pub async fn build_services() -> AppServices {
    let persistent = std::env::var("USE_PERSISTENT_STORES")
        .map(|v| v == "true")
        .unwrap_or(false);

    if persistent {
        build_postgres_services().await
    } else {
        tracing::info!("using in-memory stores (dev/test mode)");
        build_in_memory_services()
    }
}

/// Wire services onto a fresh in-memory store.
pub fn build_in_memory_services() -> AppServices {
    let store = InMemoryStore::new();
    let customer_repo: Arc<dyn CustomerRepository> =
        Arc::new(InMemoryCustomerRepository::new(store.clone()));
    let credit_repo: Arc<dyn CreditRepository> = Arc::new(InMemoryCreditRepository::new(store));
    wire(customer_repo, credit_repo)
}

async fn build_postgres_services() -> AppServices {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("failed to connect to Postgres");

    tracing::info!("using Postgres stores");
    let customer_repo: Arc<dyn CustomerRepository> =
        Arc::new(PostgresCustomerRepository::new(pool.clone()));
    let credit_repo: Arc<dyn CreditRepository> = Arc::new(PostgresCreditRepository::new(pool));
    wire(customer_repo, credit_repo)
}

fn wire(
    customer_repo: Arc<dyn CustomerRepository>,
    credit_repo: Arc<dyn CreditRepository>,
) -> AppServices {
    AppServices {
        customers: CustomerService::new(customer_repo.clone()),
        credits: CreditService::new(credit_repo, customer_repo),
    }
}

/// Customer registration, lookup, mutation, deletion.
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// Register a new customer. Uniqueness of cpf and email is checked
    /// here; the store's unique constraints back it up under races.
    pub async fn register(&self, new: NewCustomer) -> DomainResult<Customer> {
        new.validate()?;

        if self.repo.find_by_cpf(&new.cpf).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "CPF {} already registered",
                new.cpf
            )));
        }
        if self.repo.find_by_email(&new.email).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                new.email
            )));
        }

        let stored = self.repo.insert(new).await?;
        tracing::info!(customer_id = %stored.id, "customer registered");
        Ok(stored)
    }

    pub async fn find_by_id(&self, id: CustomerId) -> DomainResult<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::id_not_found(id))
    }

    /// Apply a partial update. Only names, address and income change.
    pub async fn update(&self, id: CustomerId, patch: CustomerPatch) -> DomainResult<Customer> {
        patch.validate()?;

        let mut customer = self.find_by_id(id).await?;
        patch.apply_to(&mut customer);

        if !self.repo.update(customer.clone()).await? {
            return Err(DomainError::id_not_found(id));
        }
        Ok(customer)
    }

    /// Delete a customer and, via cascade, its credits.
    pub async fn delete(&self, id: CustomerId) -> DomainResult<()> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::id_not_found(id));
        }
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}

/// A credit together with its owning customer, for the detail view.
#[derive(Debug)]
pub struct CreditDetails {
    pub credit: Credit,
    pub owner: Customer,
}

/// Credit requests and lookups.
pub struct CreditService {
    repo: Arc<dyn CreditRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl CreditService {
    pub fn new(repo: Arc<dyn CreditRepository>, customers: Arc<dyn CustomerRepository>) -> Self {
        Self { repo, customers }
    }

    /// Run the eligibility policy, resolve the owner, and persist the
    /// credit with a fresh code and initial status.
    pub async fn request(&self, request: CreditRequest) -> DomainResult<Credit> {
        request.validate(Utc::now().date_naive())?;

        let customer_id = request.customer_id;
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(DomainError::id_not_found(customer_id));
        }

        let stored = self.repo.insert(request.into_new_credit()).await?;
        tracing::info!(credit_code = %stored.credit_code, customer_id = %customer_id, "credit requested");
        Ok(stored)
    }

    /// Fetch a credit by its code on behalf of `customer_id`. Callers
    /// asking for a credit they do not own get `Forbidden`.
    pub async fn find_by_credit_code(
        &self,
        customer_id: CustomerId,
        code: CreditCode,
    ) -> DomainResult<CreditDetails> {
        let credit = self
            .repo
            .find_by_credit_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Creditcode {code} not found")))?;

        if credit.customer_id != customer_id {
            return Err(DomainError::forbidden("Contact admin"));
        }

        let owner = self
            .customers
            .find_by_id(credit.customer_id)
            .await?
            .ok_or_else(|| DomainError::store("credit owner missing from store"))?;

        Ok(CreditDetails { credit, owner })
    }

    /// All credits of a customer, in creation order. Empty, not an
    /// error, for customers without credits.
    pub async fn find_all_by_customer(&self, customer_id: CustomerId) -> DomainResult<Vec<Credit>> {
        self.repo.find_all_by_customer_id(customer_id).await
    }
}
