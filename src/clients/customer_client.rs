use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::customer_actor::CustomerError;
use crate::domain::{Customer, CustomerCreate, CustomerUpdate};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, CustomerError, customer);

impl CustomerClient {
    #[instrument(skip(self, params), fields(customer_email = %params.email))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<String, CustomerError> {
        debug!("Sending request");
        let email = params.email.clone();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => CustomerError::EmailInUse(email),
            other => CustomerError::from(other),
        })
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn find_by_email(&self, email: String) -> Result<Option<Customer>, CustomerError> {
        debug!("Sending request");
        self.inner
            .find_first(move |customer: &Customer| customer.has_email(&email))
            .await
            .map_err(CustomerError::from)
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn update_customer(&self, id: String, update: CustomerUpdate) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        let email = update.email.clone().unwrap_or_default();
        self.inner.update(id, update).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => CustomerError::EmailInUse(email),
            other => CustomerError::from(other),
        })
    }
}
