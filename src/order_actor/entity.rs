use std::time::SystemTime;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type UpdateParams = (); // Orders are immutable once placed
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    /// Stamps the creation time and refuses an order without lines.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.products.is_empty() {
            return Err("Order has no products".to_string());
        }
        Ok(Self {
            id,
            customer: params.customer,
            products: params.products,
            created_at: SystemTime::now(),
        })
    }

    fn on_update(&mut self, _params: ()) -> Result<(), String> {
        Err(format!("Order {} cannot be modified", self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
