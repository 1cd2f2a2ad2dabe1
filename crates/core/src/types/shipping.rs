//! Shipping details collected at the first checkout step.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Country preselected on the shipping form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// A required shipping field, used to report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Address,
    City,
    State,
    ZipCode,
    Country,
    PhoneNumber,
}

impl ShippingField {
    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip code",
            Self::Country => "country",
            Self::PhoneNumber => "phone number",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping form contents. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone_number: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone_number: String::new(),
        }
    }
}

impl ShippingInfo {
    /// A blank form with the email prefilled.
    #[must_use]
    pub fn prefilled(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// Required fields that are empty or whitespace-only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        [
            (ShippingField::FirstName, &self.first_name),
            (ShippingField::LastName, &self.last_name),
            (ShippingField::Email, &self.email),
            (ShippingField::Address, &self.address),
            (ShippingField::City, &self.city),
            (ShippingField::State, &self.state),
            (ShippingField::ZipCode, &self.zip_code),
            (ShippingField::Country, &self.country),
            (ShippingField::PhoneNumber, &self.phone_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
