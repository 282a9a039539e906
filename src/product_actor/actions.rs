/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Takes the given number of units out of stock.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Puts units back, undoing a reservation.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Stock left after the reservation
    ReserveStock(u32),
    /// Stock after restocking
    Restock(u32),
}
