//! Validation provider implementations
//!
//! Concrete implementations of the AddressValidator and SuggestionProvider
//! traits for Google's Address Validation and Places APIs.

pub mod google;
pub mod places;

pub use google::*;
pub use places::*;
