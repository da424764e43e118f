//! Payment gateway integration module
//!
//! This module provides typed access to the Iamport payment gateway:
//! payment lookup, cancellation and pre-registration.

pub mod bank;
pub mod providers;
pub mod token;
pub mod traits;
pub mod types;
