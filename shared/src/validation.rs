//! Validation helpers for Workshop OS
//!
//! Domain checks shared by the backend services. These mirror the schema
//! validation the API applies to incoming payloads, so the rules live in one
//! place and the pure engines can rely on them.

use rust_decimal::Decimal;

// ============================================================================
// Costing Inputs
// ============================================================================

/// Validate a BOM line: positive quantity, scrap factor in [0, 1]
pub fn validate_bom_item(quantity: Decimal, scrap_factor: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("BOM quantity must be greater than 0");
    }
    if scrap_factor < Decimal::ZERO || scrap_factor > Decimal::ONE {
        return Err("Scrap factor must be between 0 and 1");
    }
    Ok(())
}

/// Validate a routing step: positive step number and time estimate
pub fn validate_routing_step(step_number: i32, estimated_time_min: i32) -> Result<(), &'static str> {
    if step_number <= 0 {
        return Err("Routing step number must be positive");
    }
    if estimated_time_min <= 0 {
        return Err("Routing step time must be a positive number of minutes");
    }
    Ok(())
}

/// Validate workshop rates: labor per hour and overhead percentage, both >= 0
pub fn validate_rates(labor_rate: Decimal, overhead_rate: Decimal) -> Result<(), &'static str> {
    if labor_rate < Decimal::ZERO {
        return Err("Labor rate cannot be negative");
    }
    if overhead_rate < Decimal::ZERO {
        return Err("Overhead rate cannot be negative");
    }
    Ok(())
}

/// Validate a selling price; zero means "not yet priced" and is allowed
pub fn validate_selling_price(selling_price: Decimal) -> Result<(), &'static str> {
    if selling_price < Decimal::ZERO {
        return Err("Selling price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Inventory
// ============================================================================

/// Validate material stock fields: non-negative integers
pub fn validate_stock_fields(stock_level: i32, stock_alert_threshold: i32) -> Result<(), &'static str> {
    if stock_level < 0 {
        return Err("Stock level cannot be negative");
    }
    if stock_alert_threshold < 0 {
        return Err("Stock alert threshold cannot be negative");
    }
    Ok(())
}

/// Validate a material unit cost
pub fn validate_unit_cost(unit_cost: Decimal) -> Result<(), &'static str> {
    if unit_cost < Decimal::ZERO {
        return Err("Unit cost cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Orders
// ============================================================================

/// Validate one order item: positive quantity, non-negative captured price
pub fn validate_order_item(quantity: i32, unit_price: Decimal) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Order item quantity must be positive");
    }
    if unit_price < Decimal::ZERO {
        return Err("Order item unit price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Settings
// ============================================================================

/// Validate an ISO 4217 currency code: exactly 3 ASCII uppercase letters
pub fn validate_currency_code(code: &str) -> Result<(), &'static str> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err("Currency code must be 3 uppercase letters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_bom_item() {
        assert!(validate_bom_item(dec("0.75"), dec("0.1")).is_ok());
        assert!(validate_bom_item(dec("1"), dec("0")).is_ok());
        assert!(validate_bom_item(dec("1"), dec("1")).is_ok());
        assert!(validate_bom_item(dec("0"), dec("0")).is_err());
        assert!(validate_bom_item(dec("-1"), dec("0")).is_err());
        assert!(validate_bom_item(dec("1"), dec("1.01")).is_err());
        assert!(validate_bom_item(dec("1"), dec("-0.1")).is_err());
    }

    #[test]
    fn test_validate_routing_step() {
        assert!(validate_routing_step(1, 20).is_ok());
        assert!(validate_routing_step(0, 20).is_err());
        assert!(validate_routing_step(1, 0).is_err());
        assert!(validate_routing_step(1, -5).is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(validate_rates(dec("50"), dec("15")).is_ok());
        assert!(validate_rates(dec("0"), dec("0")).is_ok());
        assert!(validate_rates(dec("-1"), dec("0")).is_err());
        assert!(validate_rates(dec("0"), dec("-1")).is_err());
    }

    #[test]
    fn test_validate_selling_price() {
        assert!(validate_selling_price(dec("85.00")).is_ok());
        // Zero is "not yet priced", not an error
        assert!(validate_selling_price(Decimal::ZERO).is_ok());
        assert!(validate_selling_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_stock_fields() {
        assert!(validate_stock_fields(50, 10).is_ok());
        assert!(validate_stock_fields(0, 0).is_ok());
        assert!(validate_stock_fields(-1, 0).is_err());
        assert!(validate_stock_fields(0, -1).is_err());
    }

    #[test]
    fn test_validate_order_item() {
        assert!(validate_order_item(1, dec("85.00")).is_ok());
        assert!(validate_order_item(0, dec("85.00")).is_err());
        assert!(validate_order_item(-2, dec("85.00")).is_err());
        assert!(validate_order_item(1, dec("-1")).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDT").is_err());
        assert!(validate_currency_code("U5D").is_err());
    }
}
