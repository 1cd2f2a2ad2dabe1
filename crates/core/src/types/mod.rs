//! Core types for Emporium.
//!
//! This module provides type-safe wrappers and state values for the storefront domain.

pub mod cart;
pub mod category;
pub mod email;
pub mod filter;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod shipping;
pub mod status;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartItem};
pub use category::{CategoryFilter, display_category, normalize_category};
pub use email::{Email, EmailError};
pub use filter::{FilterError, FilterUpdate, MAX_RATING, PriceRange, ProductFilter};
pub use id::*;
pub use order::{Order, OrderNumber};
pub use price::{CurrencyCode, TAX_RATE, format_price, to_minor_units, with_tax};
pub use product::{Product, Rating};
pub use shipping::{DEFAULT_COUNTRY, ShippingField, ShippingInfo};
pub use status::*;
pub use user::{Credentials, ProfileUpdate, PublicUser, RegisterRequest, UserRecord};
pub use wishlist::Wishlist;
