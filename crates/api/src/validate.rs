//! Request payload validation.
//!
//! All constraints for one payload are checked together so the client
//! receives the complete list of field errors in a single response.

use domain::{MenuItemRequest, RestaurantRequest};
use rust_decimal::Decimal;

use crate::error::ApiError;

const PHONE_CHARS: &str = "0123456789. ()-";

/// Validates a restaurant payload, returning every failed constraint.
pub fn restaurant_request(req: &RestaurantRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_length(&mut errors, "name", &req.name, 2, 100);
    check_length(&mut errors, "address", &req.address, 5, 255);

    if !is_valid_phone(&req.phone_number) {
        errors.push("phoneNumber: must be a valid phone number".to_string());
    }
    if !is_valid_email(&req.email) {
        errors.push("email: must be a valid email address".to_string());
    }

    finish(errors)
}

/// Validates a menu item payload, returning every failed constraint.
pub fn menu_item_request(req: &MenuItemRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_length(&mut errors, "name", &req.name, 2, 100);

    if let Some(description) = &req.description {
        if description.chars().count() > 500 {
            errors.push("description: size must be at most 500".to_string());
        }
    }
    if req.price <= Decimal::ZERO {
        errors.push("price: must be greater than zero".to_string());
    }

    finish(errors)
}

fn check_length(errors: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(format!("{field}: size must be between {min} and {max}"));
    }
}

/// Optional leading `+`, then 7 to 25 characters drawn from digits,
/// dots, spaces, parentheses, and hyphens.
fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let len = rest.chars().count();
    (7..=25).contains(&len) && rest.chars().all(|c| PHONE_CHARS.contains(c))
}

fn is_valid_email(email: &str) -> bool {
    let len = email.chars().count();
    if len == 0 || len > 255 {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
