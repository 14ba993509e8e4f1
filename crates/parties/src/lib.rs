//! Parties domain module (customers and their addresses).
//!
//! Plain value holders handed to other bounded contexts as opaque
//! references; no business rules live here.

pub mod address;
pub mod customer;

pub use address::Address;
pub use customer::{Customer, CustomerId};
