use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// Postal address.
///
/// Compared by value; two addresses with the same fields are the same
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "PL", "DE").
    pub country_code: String,
    pub phone: Option<String>,
}

impl ValueObject for Address {}
