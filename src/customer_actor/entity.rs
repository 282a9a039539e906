use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerCreate, CustomerUpdate};

fn validate(name: &str, email: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Customer name required".to_string());
    }
    if !email.contains('@') {
        return Err(format!("Invalid email: {}", email));
    }
    Ok(())
}

impl Entity for Customer {
    type Id = String;
    type CreateParams = CustomerCreate;
    type UpdateParams = CustomerUpdate;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    /// Creates a new Customer from creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name or an email without `@`.
    fn from_create_params(id: String, params: CustomerCreate) -> Result<Self, String> {
        validate(&params.name, &params.email)?;
        Ok(Self::new(id, params.name, params.email))
    }

    /// Updates the customer's name and/or email.
    fn on_update(&mut self, params: CustomerUpdate) -> Result<(), String> {
        let name = params.name.unwrap_or_else(|| self.name.clone());
        let email = params.email.unwrap_or_else(|| self.email.clone());
        validate(&name, &email)?;
        self.name = name;
        self.email = email;
        Ok(())
    }

    /// One account per email address.
    fn conflicts_with(&self, other: &Self) -> bool {
        other.has_email(&self.email)
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
