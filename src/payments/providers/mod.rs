//! Payment gateway implementations
//!
//! Concrete implementations of the PaymentGateway trait.

pub mod iamport;

pub use iamport::IamportClient;
