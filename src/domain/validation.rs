/// Order Validator - Business Rule Validation
///
/// Rejects order parameters the book must never hold, before any slot is
/// reserved.
///
/// ## Validation Rules
/// - Quantity must be positive
/// - Price must be finite and positive
///
/// ## Usage
/// ```rust
/// use ticker_matching_core::domain::validation::OrderValidator;
///
/// let validator = OrderValidator::new();
/// assert!(validator.validate(10, 42.5).is_ok());
/// assert!(validator.validate(0, 42.5).is_err());
/// ```

use crate::shared::error::EngineError;

/// Order validator
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates quantity and price of a new order
    pub fn validate(&self, quantity: u64, price: f64) -> Result<(), EngineError> {
        self.validate_quantity(quantity)?;
        self.validate_price(price)?;
        Ok(())
    }

    fn validate_quantity(&self, quantity: u64) -> Result<(), EngineError> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }
        Ok(())
    }

    /// NaN, infinities, zero and negatives are all rejected; a NaN price
    /// would make the lowest-sell scan meaningless.
    fn validate_price(&self, price: f64) -> Result<(), EngineError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(EngineError::InvalidPrice(price));
        }
        Ok(())
    }
}
